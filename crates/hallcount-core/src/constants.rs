//! Calibration constants for the hall-effect wheel encoder.
//!
//! These values are fixed at compile time. They describe the wheel the sensor
//! is mounted on and are not configurable at runtime.
//!
//! # Calibration
//!
//! | Constant | Value | Unit |
//! |----------|-------|------|
//! | [`SIGNALS_PER_ROTATION`] | 192 | pulses |
//! | [`CIRCUMFERENCE`] | 204204 | micrometers |
//! | [`DIST_PER_SIG`] | 1064 | micrometers |
//!
//! `192 * 1064 = 204288`, which is 84 um more than [`CIRCUMFERENCE`]. The
//! per-signal distance is a rounded measurement and does not evenly divide
//! the circumference. A full rotation always counts as [`CIRCUMFERENCE`],
//! partial rotations count in [`DIST_PER_SIG`] steps.
//!
//! ```
//! use hallcount_core::constants::*;
//!
//! assert_eq!(SIGNALS_PER_ROTATION, 192);
//! assert_ne!(u64::from(SIGNALS_PER_ROTATION) * DIST_PER_SIG, CIRCUMFERENCE);
//! ```

// ============================================================================
// Wheel Geometry
// ============================================================================

/// Number of sensor pulses emitted per full wheel rotation.
///
/// The signal counter rolls over to zero when it reaches this value.
pub const SIGNALS_PER_ROTATION: u32 = 192;

/// Linear distance covered by one full rotation, in micrometers.
pub const CIRCUMFERENCE: u64 = 204_204;

/// Linear distance covered by one sensor pulse, in micrometers.
pub const DIST_PER_SIG: u64 = 1064;

// ============================================================================
// Reset Command
// ============================================================================

/// The only confirmation value accepted by a reset request.
///
/// ```
/// use hallcount_core::constants::RESET_CONFIRMATION;
/// use hallcount_core::CounterEngine;
///
/// let engine = CounterEngine::new();
/// assert!(engine.reset(RESET_CONFIRMATION).is_ok());
/// assert!(engine.reset(RESET_CONFIRMATION + 1).is_err());
/// ```
pub const RESET_CONFIRMATION: u64 = 1;

// ============================================================================
// Error Codes
// ============================================================================

/// Invalid argument.
pub const EINVAL: i32 = 22;
