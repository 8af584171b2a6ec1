//! Host timing and preemption control.
//!
//! The polling loop is only useful if the polls run back to back, so the
//! engine brackets it in a [`CriticalSection`] and timestamps it through a
//! [`Clock`]. Both are seams: privileged or embedded hosts supply real
//! interrupt suppression and a hardware timer, everyone else gets the
//! std-backed defaults below.

use std::time::Instant;

/// Monotonic nanosecond timestamp source.
pub trait Clock {
    fn now_ns(&self) -> u64;
}

/// [`Clock`] backed by `std::time::Instant`, measured from a fixed origin.
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Real-time critical section around the acquisition loop.
///
/// `enter` must suppress whatever preemption sources the host allows the
/// caller to suppress; `exit` must undo exactly that. Calls are strictly
/// paired and never nested. The engine keeps the section as short as the
/// loop itself.
pub trait CriticalSection {
    fn enter(&mut self);
    fn exit(&mut self);
}

/// No-op section for non-privileged hosts, where the loop simply runs at
/// the scheduler's mercy.
#[derive(Debug, Default)]
pub struct NoopCriticalSection;

impl CriticalSection for NoopCriticalSection {
    fn enter(&mut self) {}
    fn exit(&mut self) {}
}
