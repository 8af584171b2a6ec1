//! The single owned capture aggregate.
//!
//! One [`CaptureSession`] per process bundles the acquisition engine, the
//! capture buffer, and the run-time config, and is threaded explicitly
//! through whatever surface exposes it (see `endpoint`). All trigger and
//! export paths take `&mut self`, so access is serialized by construction:
//! a host that needs cross-thread access wraps the session in a `Mutex` and
//! gets the same guarantee.

use crate::buffer::{CaptureBuffer, Page, RenderFormat, PAGE_SIZE};
use crate::config::CaptureConfig;
use crate::engine::{AcquisitionEngine, CaptureMode, CaptureResult};
use crate::host::{Clock, CriticalSection, MonotonicClock, NoopCriticalSection};
use crate::sample_source::SampleSource;

pub struct CaptureSession<S, C = MonotonicClock, G = NoopCriticalSection> {
    engine: AcquisitionEngine<S, C, G>,
    buffer: CaptureBuffer,
    config: CaptureConfig,
}

impl<S: SampleSource> CaptureSession<S> {
    /// Session over `source` with the std monotonic clock, no preemption
    /// suppression, and default config.
    pub fn new(source: S) -> Self {
        Self::with_parts(
            source,
            MonotonicClock::new(),
            NoopCriticalSection,
            CaptureConfig::default(),
        )
    }
}

impl<S: SampleSource, C: Clock, G: CriticalSection> CaptureSession<S, C, G> {
    /// Fully injected constructor for privileged hosts and tests.
    pub fn with_parts(source: S, clock: C, section: G, config: CaptureConfig) -> Self {
        Self {
            engine: AcquisitionEngine::new(source, clock, section),
            buffer: CaptureBuffer::new(),
            config,
        }
    }

    /// Run a capture over the currently requested sample count.
    ///
    /// Overwrites any previous capture, including one that is mid-drain.
    pub fn trigger(&mut self, mode: CaptureMode) -> CaptureResult {
        let count = self.config.sample_count();
        self.engine.capture(&mut self.buffer, mode, count)
    }

    /// Export the next page (ceiling [`PAGE_SIZE`] bytes) of the current
    /// capture.
    pub fn next_page(&mut self, format: RenderFormat) -> Page {
        self.buffer.next_page(PAGE_SIZE, format)
    }

    /// Unconsumed samples of the current capture.
    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }

    /// Elapsed time of the last capture, in nanoseconds.
    pub fn elapsed_ns(&self) -> u64 {
        self.buffer.elapsed_ns()
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CaptureConfig {
        &mut self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_source::SequenceSource;

    fn session_with(values: Vec<u32>, count: usize) -> CaptureSession<SequenceSource> {
        let mut session = CaptureSession::new(SequenceSource::new(values).unwrap());
        session.config_mut().set_sample_count(count).unwrap();
        session
    }

    #[test]
    fn test_trigger_then_drain_exactly_count_samples() {
        for count in [1, 5, 127, 128, 500] {
            let mut session = session_with(vec![0xF0F0F0F0], count);
            session.trigger(CaptureMode::Fast);
            assert_eq!(session.remaining(), count);

            let mut drained = 0;
            loop {
                let page = session.next_page(RenderFormat::Compact);
                if page.samples_consumed == 0 {
                    break;
                }
                drained += page.samples_consumed;
            }
            assert_eq!(drained, count);
            assert_eq!(session.remaining(), 0);
        }
    }

    #[test]
    fn test_no_capture_yields_sentinel() {
        let mut session = session_with(vec![0x1], 4);
        let page = session.next_page(RenderFormat::TimestampedCsv);
        assert_eq!(page.text, "No data\n");
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_drained_state_is_idempotent() {
        let mut session = session_with(vec![0x1], 2);
        session.trigger(CaptureMode::Fast);
        while session.next_page(RenderFormat::Compact).samples_consumed > 0 {}

        for _ in 0..3 {
            let page = session.next_page(RenderFormat::Compact);
            assert_eq!(page.text, "No data\n");
            assert_eq!(page.samples_consumed, 0);
        }

        session.trigger(CaptureMode::Fast);
        assert_eq!(session.remaining(), 2);
    }

    #[test]
    fn test_accurate_trigger_produces_timestamped_pages() {
        let mut session = session_with(vec![0xAB, 0xCD], 2);
        session.trigger(CaptureMode::Accurate);

        let page = session.next_page(RenderFormat::TimestampedCsv);
        assert_eq!(page.samples_consumed, 2);
        for line in page.text.lines() {
            let (ts, value) = line.split_once(',').unwrap();
            assert_eq!(ts.len(), 9);
            assert_eq!(value.len(), 8);
            u64::from_str_radix(ts, 16).unwrap();
            u32::from_str_radix(value, 16).unwrap();
        }
    }

    #[test]
    fn test_elapsed_time_visible_after_drain() {
        let mut session = session_with(vec![0x1], 3);
        session.trigger(CaptureMode::Fast);
        let elapsed = session.elapsed_ns();
        while session.next_page(RenderFormat::Compact).samples_consumed > 0 {}
        assert_eq!(session.elapsed_ns(), elapsed);
    }

    #[test]
    fn test_retrigger_mid_drain_overwrites_cleanly() {
        let mut session = session_with(vec![0x1, 0x2, 0x3], 200);
        session.trigger(CaptureMode::Fast);
        session.next_page(RenderFormat::Compact);
        assert_eq!(session.remaining(), 73);

        session.config_mut().set_sample_count(4).unwrap();
        session.trigger(CaptureMode::Fast);
        assert_eq!(session.remaining(), 4);
    }
}
