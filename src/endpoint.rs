//! Named read/write endpoint surface.
//!
//! Maps the virtual-device attribute names onto the capture session. The
//! transport has no fault channel: every per-call failure is rendered as
//! data (the `"No data"` sentinel, `"0"`, an unchanged config value), and a
//! write always reports the full byte count as accepted, whether or not the
//! value was applied. The only hard errors are source construction at
//! startup and [`EndpointError::Busy`] on a second concurrent open.

use crate::buffer::RenderFormat;
use crate::engine::CaptureMode;
use crate::host::{Clock, CriticalSection, MonotonicClock, NoopCriticalSection};
use crate::sample_source::SampleSource;
use crate::session::CaptureSession;

/// Completion marker returned by the trigger endpoints.
pub const DONE_MARKER: &str = "Done.\n";

/// The named operations exposed by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    TriggerFast,
    TriggerAccurate,
    ReadDataFast,
    ReadData,
    DataRemaining,
    ReadTime,
    SampleSize,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::TriggerFast,
        Attribute::TriggerAccurate,
        Attribute::ReadDataFast,
        Attribute::ReadData,
        Attribute::DataRemaining,
        Attribute::ReadTime,
        Attribute::SampleSize,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::TriggerFast => "trigger_fast",
            Attribute::TriggerAccurate => "trigger_accurate",
            Attribute::ReadDataFast => "read_data_fast",
            Attribute::ReadData => "read_data",
            Attribute::DataRemaining => "data_remaining",
            Attribute::ReadTime => "read_time",
            Attribute::SampleSize => "sample_size",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.name() == name)
    }

    /// Whether the endpoint accepts writes. Triggers accept (and ignore)
    /// a body; `sample_size` parses one.
    pub fn writable(&self) -> bool {
        matches!(
            self,
            Attribute::TriggerFast | Attribute::TriggerAccurate | Attribute::SampleSize
        )
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("device is busy")]
    Busy,
}

/// Dispatcher turning named read/write calls into session operations,
/// with the open/close channel discipline and the one-shot page policy.
pub struct DeviceEndpoints<S, C = MonotonicClock, G = NoopCriticalSection> {
    session: CaptureSession<S, C, G>,
    channel_open: bool,
    pages_served: usize,
}

impl<S: SampleSource> DeviceEndpoints<S> {
    pub fn new(source: S) -> Self {
        Self::with_session(CaptureSession::new(source))
    }
}

impl<S: SampleSource, C: Clock, G: CriticalSection> DeviceEndpoints<S, C, G> {
    pub fn with_session(session: CaptureSession<S, C, G>) -> Self {
        Self {
            session,
            channel_open: false,
            pages_served: 0,
        }
    }

    pub fn session(&self) -> &CaptureSession<S, C, G> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CaptureSession<S, C, G> {
        &mut self.session
    }

    /// Open the export channel. A second open before `close` is refused.
    pub fn open(&mut self) -> Result<(), EndpointError> {
        if self.channel_open {
            return Err(EndpointError::Busy);
        }
        self.channel_open = true;
        self.pages_served = 0;
        Ok(())
    }

    /// Close the export channel and reset the per-cycle page count.
    pub fn close(&mut self) {
        self.channel_open = false;
        self.pages_served = 0;
    }

    /// Handle a read against `attr`, returning the text payload.
    pub fn read(&mut self, attr: Attribute) -> String {
        self.trace("read", attr);
        match attr {
            Attribute::TriggerFast => {
                self.session.trigger(CaptureMode::Fast);
                DONE_MARKER.to_string()
            }
            Attribute::TriggerAccurate => {
                self.session.trigger(CaptureMode::Accurate);
                DONE_MARKER.to_string()
            }
            Attribute::ReadDataFast => self.data_page(RenderFormat::Compact),
            Attribute::ReadData => self.data_page(RenderFormat::TimestampedCsv),
            Attribute::DataRemaining => format!("{}\n", self.session.remaining()),
            Attribute::ReadTime => format!("{}\n", self.session.elapsed_ns()),
            Attribute::SampleSize => format!("{}\n", self.session.config().sample_count()),
        }
    }

    /// Handle a write against `attr`.
    ///
    /// Always reports the full byte count as accepted; a rejected
    /// `sample_size` value is logged and dropped.
    pub fn write(&mut self, attr: Attribute, body: &str) -> usize {
        self.trace("write", attr);
        match attr {
            Attribute::TriggerFast => {
                self.session.trigger(CaptureMode::Fast);
            }
            Attribute::TriggerAccurate => {
                self.session.trigger(CaptureMode::Accurate);
            }
            Attribute::SampleSize => {
                if let Err(e) = self.session.config_mut().set_sample_count_text(body) {
                    log::warn!("sample_size write rejected: {}", e);
                }
            }
            _ => {
                log::warn!("write to read-only attribute {}", attr);
            }
        }
        body.len()
    }

    fn data_page(&mut self, format: RenderFormat) -> String {
        if self.session.config().one_shot() && self.pages_served > 0 {
            return String::new();
        }
        let page = self.session.next_page(format);
        if page.samples_consumed > 0 {
            self.pages_served += 1;
        }
        page.text
    }

    fn trace(&self, op: &str, attr: Attribute) {
        if self.session.config().debug_enabled() {
            log::debug!("{} {}", op, attr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_source::SequenceSource;

    fn endpoints(values: Vec<u32>, count: usize, one_shot: bool) -> DeviceEndpoints<SequenceSource> {
        let mut endpoints = DeviceEndpoints::new(SequenceSource::new(values).unwrap());
        endpoints
            .session_mut()
            .config_mut()
            .set_sample_count(count)
            .unwrap();
        endpoints.session_mut().config_mut().set_one_shot(one_shot);
        endpoints
    }

    #[test]
    fn test_attribute_names_round_trip() {
        for attr in Attribute::ALL {
            assert_eq!(Attribute::from_name(attr.name()), Some(attr));
        }
        assert_eq!(Attribute::from_name("bogus"), None);
    }

    #[test]
    fn test_writable_attributes() {
        let writable: Vec<&str> = Attribute::ALL
            .iter()
            .filter(|a| a.writable())
            .map(|a| a.name())
            .collect();
        assert_eq!(
            writable,
            vec!["trigger_fast", "trigger_accurate", "sample_size"]
        );
    }

    #[test]
    fn test_trigger_and_paged_readout() {
        let mut endpoints = endpoints(vec![0x1, 0x2, 0x3], 3, false);

        assert_eq!(endpoints.read(Attribute::TriggerFast), "Done.\n");
        assert_eq!(endpoints.read(Attribute::DataRemaining), "3\n");
        assert_eq!(
            endpoints.read(Attribute::ReadDataFast),
            "000000010000000200000003\n"
        );
        assert_eq!(endpoints.read(Attribute::DataRemaining), "0\n");
        assert_eq!(endpoints.read(Attribute::ReadDataFast), "No data\n");
    }

    #[test]
    fn test_read_before_trigger_reports_sentinels() {
        let mut endpoints = endpoints(vec![0x1], 2, false);
        assert_eq!(endpoints.read(Attribute::ReadData), "No data\n");
        assert_eq!(endpoints.read(Attribute::DataRemaining), "0\n");
        assert_eq!(endpoints.read(Attribute::ReadTime), "0\n");
    }

    #[test]
    fn test_write_always_reports_full_count() {
        let mut endpoints = endpoints(vec![0x1], 2, false);

        assert_eq!(endpoints.write(Attribute::SampleSize, "50\n"), 3);
        assert_eq!(endpoints.read(Attribute::SampleSize), "50\n");

        // Rejected value: same transport-level outcome, state unchanged.
        assert_eq!(endpoints.write(Attribute::SampleSize, "notanumber"), 10);
        assert_eq!(endpoints.read(Attribute::SampleSize), "50\n");

        assert_eq!(endpoints.write(Attribute::ReadTime, "x"), 1);
    }

    #[test]
    fn test_write_triggers_capture() {
        let mut endpoints = endpoints(vec![0xFF], 1, false);
        assert_eq!(endpoints.write(Attribute::TriggerFast, ""), 0);
        assert_eq!(endpoints.read(Attribute::DataRemaining), "1\n");
    }

    #[test]
    fn test_accurate_endpoint_returns_timestamped_lines() {
        let mut endpoints = endpoints(vec![0xAB], 2, false);
        endpoints.read(Attribute::TriggerAccurate);
        let page = endpoints.read(Attribute::ReadData);
        assert_eq!(page.lines().count(), 2);
        for line in page.lines() {
            assert_eq!(line.len(), 18);
            assert_eq!(&line[9..10], ",");
        }
    }

    #[test]
    fn test_one_shot_limits_cycle_to_single_page() {
        let mut endpoints = endpoints(vec![0x1], 300, true);
        endpoints.read(Attribute::TriggerFast);

        endpoints.open().unwrap();
        let first = endpoints.read(Attribute::ReadDataFast);
        assert!(!first.is_empty());
        assert_eq!(endpoints.read(Attribute::ReadDataFast), "");
        endpoints.close();

        // A new cycle serves the next page of the same capture.
        endpoints.open().unwrap();
        assert!(!endpoints.read(Attribute::ReadDataFast).is_empty());
        endpoints.close();
    }

    #[test]
    fn test_multi_page_readout_without_one_shot() {
        let mut endpoints = endpoints(vec![0x1], 300, false);
        endpoints.read(Attribute::TriggerFast);

        let mut drained = 0;
        loop {
            let page = endpoints.read(Attribute::ReadDataFast);
            if page == "No data\n" || page.trim_end_matches('\n').is_empty() {
                break;
            }
            drained += page.trim_end_matches('\n').len() / 8;
        }
        assert_eq!(drained, 300);
    }

    #[test]
    fn test_debug_gated_reads_behave_identically() {
        let mut endpoints = endpoints(vec![0x1, 0x2], 2, false);
        endpoints.session_mut().config_mut().set_debug(true);

        assert_eq!(endpoints.read(Attribute::TriggerFast), "Done.\n");
        assert_eq!(endpoints.read(Attribute::DataRemaining), "2\n");
        assert_eq!(
            endpoints.read(Attribute::ReadDataFast),
            "0000000100000002\n"
        );
        assert_eq!(endpoints.write(Attribute::SampleSize, "7"), 1);
        assert_eq!(endpoints.read(Attribute::SampleSize), "7\n");
    }

    #[test]
    fn test_second_open_is_busy() {
        let mut endpoints = endpoints(vec![0x1], 1, true);
        endpoints.open().unwrap();
        assert!(matches!(endpoints.open(), Err(EndpointError::Busy)));
        endpoints.close();
        assert!(endpoints.open().is_ok());
    }

    #[test]
    fn test_read_time_reports_elapsed_after_drain() {
        let mut endpoints = endpoints(vec![0x1], 2, false);
        endpoints.read(Attribute::TriggerFast);
        endpoints.read(Attribute::ReadDataFast);
        let elapsed: u64 = endpoints
            .read(Attribute::ReadTime)
            .trim()
            .parse()
            .unwrap();
        let _ = elapsed;
    }
}
