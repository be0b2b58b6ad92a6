use crate::{
    Result,
    constants::{CIRCUMFERENCE, DIST_PER_SIG, RESET_CONFIRMATION, SIGNALS_PER_ROTATION},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear distance in micrometers.
///
/// Displays as a bare decimal integer with no unit and no trailing newline,
/// which is the format of the `distance` attribute.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Distance(u64);

impl Distance {
    /// Zero distance.
    pub const ZERO: Distance = Distance(0);

    /// Create a distance from a micrometer value.
    #[must_use]
    pub const fn from_micrometers(micrometers: u64) -> Self {
        Distance(micrometers)
    }

    /// Distance for a pair of counter values.
    ///
    /// ```
    /// use hallcount_core::Distance;
    ///
    /// assert_eq!(Distance::from_counts(1, 1).as_micrometers(), 204_204 + 1064);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_counts(rotations: u32, signals: u32) -> Self {
        Distance(rotations as u64 * CIRCUMFERENCE + signals as u64 * DIST_PER_SIG)
    }

    /// Get the raw micrometer value.
    #[inline]
    #[must_use]
    pub const fn as_micrometers(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Distance> for u64 {
    fn from(distance: Distance) -> Self {
        distance.0
    }
}

/// A `(rotations, signals)` pair read from a [`CounterEngine`](crate::CounterEngine).
///
/// The two fields are read one after the other, not as a single atomic unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterSnapshot {
    /// Completed rotations since the last reset.
    pub rotations: u32,

    /// Pulses counted within the current rotation.
    pub signals: u32,
}

impl CounterSnapshot {
    /// Create a snapshot from raw counter values.
    #[must_use]
    pub const fn new(rotations: u32, signals: u32) -> Self {
        Self { rotations, signals }
    }

    /// Counter state expected after `pulses` pulses from zero.
    ///
    /// The rotation count wraps at `u32` width the same way the engine's does.
    ///
    /// ```
    /// use hallcount_core::CounterSnapshot;
    ///
    /// let snapshot = CounterSnapshot::from_pulse_count(193);
    /// assert_eq!(snapshot, CounterSnapshot::new(1, 1));
    /// ```
    #[must_use]
    pub const fn from_pulse_count(pulses: u64) -> Self {
        let per_rotation = SIGNALS_PER_ROTATION as u64;
        Self {
            rotations: (pulses / per_rotation) as u32,
            signals: (pulses % per_rotation) as u32,
        }
    }

    /// Distance represented by this snapshot.
    #[inline]
    #[must_use]
    pub const fn distance(&self) -> Distance {
        Distance::from_counts(self.rotations, self.signals)
    }

    /// Total pulses represented by this snapshot.
    #[must_use]
    pub const fn total_signals(&self) -> u64 {
        self.rotations as u64 * SIGNALS_PER_ROTATION as u64 + self.signals as u64
    }

    /// Returns `true` if both counters are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.rotations == 0 && self.signals == 0
    }
}

/// Parsed value of a reset request.
///
/// Parsing accepts an unsigned decimal integer with an optional leading `+`
/// and a single optional trailing newline, so `echo 1 > reset` is accepted.
/// Parsing succeeds for any such integer; only [`RESET_CONFIRMATION`] is
/// [confirmed](ResetCommand::is_confirmed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResetCommand(u64);

impl ResetCommand {
    /// Create a reset command from an already parsed value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        ResetCommand(value)
    }

    /// Parse a reset request.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` if the input is empty, carries a
    /// minus sign, contains anything other than decimal digits (besides the
    /// allowed `+` prefix and trailing newline), or overflows `u64`.
    ///
    /// ```
    /// use hallcount_core::ResetCommand;
    ///
    /// assert_eq!(ResetCommand::parse("1\n").unwrap().value(), 1);
    /// assert_eq!(ResetCommand::parse("+007").unwrap().value(), 7);
    /// assert!(ResetCommand::parse(" 1").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let body = input.strip_suffix('\n').unwrap_or(input);
        body.parse::<u64>()
            .map(ResetCommand)
            .map_err(|e| Error::invalid_argument(input, e.to_string()))
    }

    /// Get the parsed value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns `true` if this value authorizes a reset.
    #[must_use]
    pub const fn is_confirmed(self) -> bool {
        self.0 == RESET_CONFIRMATION
    }
}

impl std::str::FromStr for ResetCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResetCommand::parse(s)
    }
}
