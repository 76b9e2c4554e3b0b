//! Wall-clock instrumentation for the inverse iteration.
//!
//! Measurements are opt-in through [`crate::algorithms::InverseIterationOptions::measure_time`]
//! and never influence the computed result.

use std::time::{Duration, Instant};

/// Accumulated wall-clock time of one call to the inverse iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timing {
    /// The whole call, shift search and iteration included.
    pub total: Duration,
    /// All factorization attempts of the shift search.
    pub factorization: Duration,
    /// All triangular solves of the iteration loop.
    pub solve: Duration,
}

/// A stopwatch that is a no-op when disabled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stopwatch {
    enabled: bool,
}

impl Stopwatch {
    pub(crate) fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    #[inline]
    pub(crate) fn start(&self) -> Option<Instant> {
        self.enabled.then(Instant::now)
    }

    /// Adds the time elapsed since `started` to `slot`.
    #[inline]
    pub(crate) fn lap(&self, started: Option<Instant>, slot: &mut Duration) {
        if let Some(t) = started {
            *slot += t.elapsed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_stopwatch_records_nothing() {
        let sw = Stopwatch::new(false);
        let mut slot = Duration::ZERO;
        let t = sw.start();
        assert!(t.is_none());
        sw.lap(t, &mut slot);
        assert_eq!(slot, Duration::ZERO);
    }

    #[test]
    fn test_enabled_stopwatch_accumulates() {
        let sw = Stopwatch::new(true);
        let mut slot = Duration::from_nanos(5);
        let t = sw.start();
        assert!(t.is_some());
        sw.lap(t, &mut slot);
        assert!(slot >= Duration::from_nanos(5));
    }
}
