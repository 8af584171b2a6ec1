//! Run-time capture parameters.
//!
//! The config is mutated only through validated setters, so a capture can
//! never observe an out-of-range sample count. Rejected writes leave the
//! previous value in place; the endpoint layer decides whether the caller
//! ever hears about it (it doesn't, see `endpoint`).

/// Capacity of the capture buffer, in samples.
pub const MAX_SAMPLE_SIZE: usize = 10_000;

/// Startup value for the requested sample count.
pub const DEFAULT_SAMPLE_COUNT: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("sample count {0} out of range (expected 0 < n < {max})", max = MAX_SAMPLE_SIZE)]
    SampleCountOutOfRange(i64),

    #[error("could not parse a sample count from {0:?}")]
    UnparsableSampleCount(String),
}

/// Mutable capture parameters with validated writes.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    requested_sample_count: usize,
    debug_enabled: bool,
    one_shot: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            requested_sample_count: DEFAULT_SAMPLE_COUNT,
            debug_enabled: false,
            one_shot: true,
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_count(&self) -> usize {
        self.requested_sample_count
    }

    /// Set the requested sample count; only `0 < n < MAX_SAMPLE_SIZE` is
    /// accepted.
    pub fn set_sample_count(&mut self, n: usize) -> Result<(), ConfigError> {
        if n == 0 || n >= MAX_SAMPLE_SIZE {
            return Err(ConfigError::SampleCountOutOfRange(n as i64));
        }
        self.requested_sample_count = n;
        Ok(())
    }

    /// Parse a decimal sample count from free-form text and apply it.
    ///
    /// Rejection leaves the current value unchanged.
    pub fn set_sample_count_text(&mut self, text: &str) -> Result<(), ConfigError> {
        let parsed: i64 = text
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnparsableSampleCount(text.to_string()))?;
        if parsed <= 0 || parsed >= MAX_SAMPLE_SIZE as i64 {
            return Err(ConfigError::SampleCountOutOfRange(parsed));
        }
        self.requested_sample_count = parsed as usize;
        Ok(())
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug_enabled = enabled;
    }

    pub fn one_shot(&self) -> bool {
        self.one_shot
    }

    pub fn set_one_shot(&mut self, enabled: bool) {
        self.one_shot = enabled;
    }
}
