//! Lock-free pulse counter.
//!
//! [`CounterEngine`] holds two independent atomic counters: pulses within the
//! current rotation and completed rotations. The pulse path is a single
//! compare-and-swap with wrap followed, on roll-over, by one atomic add. It
//! never blocks, allocates or logs, so it is safe to call from an interrupt
//! handler while readers and resetters run concurrently.
//!
//! # Consistency
//!
//! Each counter is atomic on its own; the pair is not. A roll-over clears the
//! signal counter before it bumps the rotation counter, and readers load the
//! rotation counter first. A read racing a roll-over can therefore come out
//! low by less than one rotation, but never higher than the pulses counted so
//! far. A reset racing a pulse may leave either counter non-zero.

use crate::{
    Result,
    constants::SIGNALS_PER_ROTATION,
    error::Error,
    types::{CounterSnapshot, Distance, ResetCommand},
};
use std::sync::atomic::{AtomicU32, Ordering};

/// Pulse counting and distance accumulation for one encoder.
///
/// Share it between the pulse source and readers with an `Arc`.
///
/// # Examples
///
/// ```
/// use hallcount_core::{CounterEngine, CounterSnapshot};
///
/// let engine = CounterEngine::new();
/// for _ in 0..192 {
///     engine.on_pulse();
/// }
///
/// assert_eq!(engine.snapshot(), CounterSnapshot::new(1, 0));
/// assert_eq!(engine.read_distance().as_micrometers(), 204_204);
/// ```
#[derive(Debug, Default)]
pub struct CounterEngine {
    /// Pulses since the last roll-over, always below `SIGNALS_PER_ROTATION`.
    signals: AtomicU32,

    /// Completed rotations since the last reset.
    rotations: AtomicU32,
}

impl CounterEngine {
    /// Create a zeroed engine.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            signals: AtomicU32::new(0),
            rotations: AtomicU32::new(0),
        }
    }

    /// Record one sensor pulse.
    ///
    /// Call exactly once per detected edge. Cannot fail.
    #[inline]
    pub fn on_pulse(&self) {
        let rolled_over = self
            .signals
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |signals| {
                Some(next_signal(signals))
            })
            .is_ok_and(|previous| previous == SIGNALS_PER_ROTATION - 1);

        if rolled_over {
            self.rotations.fetch_add(1, Ordering::AcqRel);
        }
    }

    /// Accumulated distance since the last reset.
    #[inline]
    #[must_use]
    pub fn read_distance(&self) -> Distance {
        self.snapshot().distance()
    }

    /// Accumulated distance formatted for the `distance` attribute.
    #[must_use]
    pub fn show_distance(&self) -> String {
        self.read_distance().to_string()
    }

    /// Read both counters, rotations first.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        let rotations = self.rotations.load(Ordering::Acquire);
        let signals = self.signals.load(Ordering::Acquire);
        CounterSnapshot { rotations, signals }
    }

    /// Pulses counted within the current rotation.
    #[must_use]
    pub fn signals(&self) -> u32 {
        self.signals.load(Ordering::Acquire)
    }

    /// Completed rotations since the last reset.
    #[must_use]
    pub fn rotations(&self) -> u32 {
        self.rotations.load(Ordering::Acquire)
    }

    /// Zero both counters.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` unless `confirmation` is
    /// [`RESET_CONFIRMATION`](crate::constants::RESET_CONFIRMATION). The
    /// counters are left untouched on error.
    pub fn reset(&self, confirmation: u64) -> Result<()> {
        let command = ResetCommand::new(confirmation);
        if !command.is_confirmed() {
            return Err(unconfirmed(&confirmation.to_string()));
        }

        self.clear();
        Ok(())
    }

    /// Apply a textual reset request, as written to the `reset` attribute.
    ///
    /// Returns the number of input bytes consumed, which is always the full
    /// input length on success.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if the input does not parse as an
    /// unsigned decimal integer or is not the confirmation value.
    ///
    /// ```
    /// use hallcount_core::CounterEngine;
    ///
    /// let engine = CounterEngine::new();
    /// engine.on_pulse();
    ///
    /// assert!(engine.reset_from_str("2").is_err());
    /// assert_eq!(engine.signals(), 1);
    ///
    /// assert_eq!(engine.reset_from_str("1\n").unwrap(), 2);
    /// assert_eq!(engine.signals(), 0);
    /// ```
    pub fn reset_from_str(&self, input: &str) -> Result<usize> {
        let command = ResetCommand::parse(input)?;
        if !command.is_confirmed() {
            return Err(unconfirmed(input));
        }

        self.clear();
        Ok(input.len())
    }

    /// Zero both counters without a confirmation value.
    ///
    /// The two counters are stored one after the other; a pulse landing
    /// between the stores is kept.
    pub fn clear(&self) {
        self.signals.store(0, Ordering::Release);
        self.rotations.store(0, Ordering::Release);
    }
}

#[inline]
const fn next_signal(signals: u32) -> u32 {
    if signals + 1 >= SIGNALS_PER_ROTATION {
        0
    } else {
        signals + 1
    }
}

fn unconfirmed(input: &str) -> Error {
    Error::invalid_argument(input, "reset requires the value 1")
}
