//! Pulse source trait definition.
//!
//! A pulse source delivers one event per detected sensor edge. The driver's
//! interrupt task awaits these events and forwards each one to the counter
//! engine.
//!
//! The trait returns `impl Future + Send` (Edition 2024 RPITIT) so the driver
//! can spawn its interrupt task for any source. Implementations may still be
//! written with plain `async fn`, eliminating the need for the `async_trait`
//! macro.

use crate::error::Result;
use crate::types::DeviceInfo;

/// Source of hall-effect sensor pulses.
///
/// # Object Safety
///
/// **NOTE**: This trait is NOT object-safe because its methods return
/// `impl Future`. Use it through generic type parameters:
///
/// ```no_run
/// use hallcount_core::CounterEngine;
/// use hallcount_hardware::traits::PulseSource;
/// use hallcount_hardware::Result;
///
/// async fn count_pulses<S: PulseSource>(source: &mut S, engine: &CounterEngine) -> Result<()> {
///     loop {
///         source.wait_for_pulse().await?;
///         engine.on_pulse();
///     }
/// }
/// ```
///
/// # Edge Delivery
///
/// Implementations must report every edge exactly once. Coalescing or
/// dropping edges corrupts the measured distance.
pub trait PulseSource: Send + Sync {
    /// Wait for the next sensor edge.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sensor is disconnected
    /// - A communication error occurs
    fn wait_for_pulse(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected.
    fn get_info(&self) -> impl Future<Output = Result<DeviceInfo>> + Send;
}
