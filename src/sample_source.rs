//! Abstraction over the hardware bit-vector register bank.
//!
//! The acquisition loop only ever needs one operation from the hardware: a
//! single 32-bit snapshot of the GPIO input register. Everything about how
//! that register is found, mapped and released stays behind [`SampleSource`],
//! so the engine runs unchanged against real hardware, a simulator, or a
//! test stub.

#[derive(Debug, thiserror::Error)]
pub enum SampleSourceError {
    #[error("sample source unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One polled snapshot of the GPIO register bank per call.
///
/// Implementations are acquired once at process start (the constructor is
/// the only fallible path, see [`SampleSourceError::Unavailable`]) and
/// released when dropped. `poll_bits` itself is infallible: once the bank is
/// mapped, a register read cannot fail, and the acquisition loop must not
/// branch on anything but the sample count.
pub trait SampleSource {
    /// Read the current state of all 32 lines as a bit vector.
    fn poll_bits(&mut self) -> u32;
}

/// Adapter turning a closure into a [`SampleSource`].
///
/// Handy for demos and for hosts that already own a mapped register and
/// just need to hand the engine a read function.
pub struct FnSource<F>(F);

impl<F: FnMut() -> u32> FnSource<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut() -> u32> SampleSource for FnSource<F> {
    fn poll_bits(&mut self) -> u32 {
        (self.0)()
    }
}

/// Replays a fixed sequence of register values, wrapping at the end.
///
/// Deterministic stand-in for the register bank in tests and simulations.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<u32>,
    next: usize,
}

impl SequenceSource {
    /// Create a replay source over `values`.
    ///
    /// Returns [`SampleSourceError::Unavailable`] for an empty sequence,
    /// mirroring the symmetric acquire-or-abort contract of a real register
    /// mapping.
    pub fn new(values: Vec<u32>) -> Result<Self, SampleSourceError> {
        if values.is_empty() {
            return Err(SampleSourceError::Unavailable(
                "replay sequence is empty".to_string(),
            ));
        }
        Ok(Self { values, next: 0 })
    }
}

impl SampleSource for SequenceSource {
    fn poll_bits(&mut self) -> u32 {
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_source_replays_and_wraps() {
        let mut source = SequenceSource::new(vec![0x1, 0x2, 0x3]).unwrap();
        let polled: Vec<u32> = (0..5).map(|_| source.poll_bits()).collect();
        assert_eq!(polled, vec![0x1, 0x2, 0x3, 0x1, 0x2]);
    }

    #[test]
    fn test_sequence_source_rejects_empty() {
        assert!(matches!(
            SequenceSource::new(Vec::new()),
            Err(SampleSourceError::Unavailable(_))
        ));
    }

    #[test]
    fn test_fn_source() {
        let mut counter = 0u32;
        let mut source = FnSource::new(move || {
            counter += 1;
            counter
        });
        assert_eq!(source.poll_bits(), 1);
        assert_eq!(source.poll_bits(), 2);
    }
}
