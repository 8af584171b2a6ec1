//! # Pinscope RS
//!
//! A Rust library implementing a polling-based logic sampler for a small
//! number of digital GPIO lines.
//!
//! The library snapshots a 32-bit hardware register bank as fast as the host
//! can sustain, stores the snapshots in a fixed-capacity buffer, optionally
//! timestamps every sample, and pages the captured data back out as bounded
//! text chunks through a small set of named read/write endpoints.
//!
//! ## Features
//!
//! - **Pluggable sample source**: the hardware register bank sits behind the
//!   [`SampleSource`] trait; simulators and test stubs drop in unchanged
//! - **Fast and Accurate capture modes**: raw poll rate, or a timestamp
//!   recorded after every poll
//! - **Bounded paged export**: deterministic, never-overflowing 1024-byte
//!   text pages in two formats (compact hex, timestamped CSV)
//! - **Read-once cursor semantics**: each capture is drained exactly once,
//!   then reads report a `"No data"` sentinel until the next trigger
//! - **Real-time seam**: preemption suppression behind the
//!   [`CriticalSection`] trait, a no-op on non-privileged hosts
//!
//! ## Examples
//!
//! ### Capture and paged readout
//!
//! ```rust
//! use pinscope_rs::{CaptureMode, CaptureSession, RenderFormat, SequenceSource};
//!
//! let source = SequenceSource::new(vec![0x1, 0x2, 0x3])?;
//! let mut session = CaptureSession::new(source);
//! session.config_mut().set_sample_count(3)?;
//!
//! session.trigger(CaptureMode::Fast);
//! let page = session.next_page(RenderFormat::Compact);
//! assert_eq!(page.text, "000000010000000200000003\n");
//! assert_eq!(session.remaining(), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Named endpoint surface
//!
//! ```rust
//! use pinscope_rs::{Attribute, DeviceEndpoints, FnSource};
//!
//! let mut counter = 0u32;
//! let source = FnSource::new(move || {
//!     counter = counter.wrapping_add(1);
//!     counter
//! });
//!
//! let mut device = DeviceEndpoints::new(source);
//! device.write(Attribute::SampleSize, "8");
//! assert_eq!(device.read(Attribute::TriggerFast), "Done.\n");
//!
//! let page = device.read(Attribute::ReadDataFast);
//! assert_eq!(page.len(), 8 * 8 + 1);
//! assert_eq!(device.read(Attribute::DataRemaining), "0\n");
//! ```
//!
//! ### Timestamped capture
//!
//! ```rust
//! use pinscope_rs::{CaptureMode, CaptureSession, RenderFormat, SequenceSource};
//!
//! let mut session = CaptureSession::new(SequenceSource::new(vec![0xAA, 0xBB])?);
//! session.config_mut().set_sample_count(2)?;
//!
//! session.trigger(CaptureMode::Accurate);
//! let page = session.next_page(RenderFormat::TimestampedCsv);
//! // One "<9-hex timestamp>,<8-hex value>" line per sample.
//! assert_eq!(page.text.lines().count(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod buffer;
pub mod config;
pub mod endpoint;
pub mod engine;
pub mod host;
pub mod sample_source;
pub mod session;

// Re-export the main types for convenience
pub use buffer::{CaptureBuffer, Page, PageWriter, RenderFormat, Sample, NO_DATA, PAGE_SIZE};

pub use config::{CaptureConfig, ConfigError, DEFAULT_SAMPLE_COUNT, MAX_SAMPLE_SIZE};

pub use engine::{AcquisitionEngine, CaptureMode, CaptureResult};

pub use host::{Clock, CriticalSection, MonotonicClock, NoopCriticalSection};

pub use sample_source::{FnSource, SampleSource, SampleSourceError, SequenceSource};

pub use session::CaptureSession;

pub use endpoint::{Attribute, DeviceEndpoints, EndpointError, DONE_MARKER};
