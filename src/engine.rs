//! The timed acquisition loop.
//!
//! The engine owns the sample source, the clock, and the critical-section
//! handle, and does exactly one thing: fill a [`CaptureBuffer`] with
//! back-to-back polls as fast as the host will go. The loop runs inside the
//! critical section with no branches beyond the sample count, no
//! cancellation, and no timeout; once started it completes all polls.

use crate::buffer::CaptureBuffer;
use crate::host::{Clock, CriticalSection};
use crate::sample_source::SampleSource;

/// How the acquisition loop treats time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// No per-sample timestamps; maximizes the poll rate.
    Fast,
    /// A timestamp recorded immediately after every poll; lower max rate,
    /// finer temporal attribution.
    Accurate,
}

/// Outcome of one completed acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureResult {
    pub elapsed_ns: u64,
    pub samples_written: usize,
}

pub struct AcquisitionEngine<S, C, G> {
    source: S,
    clock: C,
    section: G,
}

impl<S: SampleSource, C: Clock, G: CriticalSection> AcquisitionEngine<S, C, G> {
    pub fn new(source: S, clock: C, section: G) -> Self {
        Self {
            source,
            clock,
            section,
        }
    }

    /// Poll the source exactly `count` times into `buffer` and publish it.
    ///
    /// `count` is trusted: config validation upstream guarantees
    /// `0 < count <= buffer.capacity()`. The reported elapsed time is
    /// as-measured; polling overhead dominates the timestamp resolution on
    /// slow hosts, so no correction is applied.
    pub fn capture(
        &mut self,
        buffer: &mut CaptureBuffer,
        mode: CaptureMode,
        count: usize,
    ) -> CaptureResult {
        debug_assert!(count > 0 && count <= buffer.capacity());

        let slots = buffer.slots_mut();

        self.section.enter();
        let start = self.clock.now_ns();
        match mode {
            CaptureMode::Fast => {
                for slot in &mut slots[..count] {
                    slot.value = self.source.poll_bits();
                    slot.timestamp_ns = None;
                }
            }
            CaptureMode::Accurate => {
                for slot in &mut slots[..count] {
                    slot.value = self.source.poll_bits();
                    slot.timestamp_ns = Some(self.clock.now_ns());
                }
            }
        }
        let end = self.clock.now_ns();
        self.section.exit();

        let elapsed_ns = end.saturating_sub(start);
        buffer.publish(count, elapsed_ns);

        tracing::debug!(?mode, samples = count, elapsed_ns, "capture complete");

        CaptureResult {
            elapsed_ns,
            samples_written: count,
        }
    }
}
