//! Mock hall-effect sensor for testing and development.
//!
//! This module provides a simulated pulse source that can be driven
//! programmatically for testing without requiring a physical sensor.

use crate::{Result, traits::PulseSource, types::DeviceInfo};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Default number of pulses that can be queued before senders wait.
pub const DEFAULT_PULSE_QUEUE_CAPACITY: usize = 64;

/// Mock hall-effect sensor.
///
/// Pulses are delivered through a bounded channel. A full channel makes the
/// sender wait rather than drop the pulse, so every simulated edge reaches
/// the reader.
///
/// # Examples
///
/// ```
/// use hallcount_hardware::mock::MockHallSensor;
/// use hallcount_hardware::traits::PulseSource;
///
/// #[tokio::main]
/// async fn main() -> hallcount_hardware::Result<()> {
///     let (mut sensor, handle) = MockHallSensor::new();
///
///     tokio::spawn(async move {
///         handle.send_pulses(3).await.unwrap();
///     });
///
///     for _ in 0..3 {
///         sensor.wait_for_pulse().await?;
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockHallSensor {
    /// Channel receiver for simulated edges
    pulse_rx: mpsc::Receiver<()>,

    /// Device name
    name: String,
}

impl MockHallSensor {
    /// Create a new mock sensor with the default name and queue capacity.
    ///
    /// Returns a tuple of (MockHallSensor, MockHallSensorHandle) where the
    /// handle is used to simulate pulses.
    pub fn new() -> (Self, MockHallSensorHandle) {
        Self::with_name("Mock Hall Sensor".to_string())
    }

    /// Create a new mock sensor with a custom name.
    pub fn with_name(name: String) -> (Self, MockHallSensorHandle) {
        Self::with_config(name, DEFAULT_PULSE_QUEUE_CAPACITY)
    }

    /// Create a new mock sensor with a custom name and queue capacity.
    ///
    /// A capacity of zero is raised to one.
    ///
    /// # Examples
    ///
    /// ```
    /// use hallcount_hardware::mock::MockHallSensor;
    ///
    /// let (sensor, handle) = MockHallSensor::with_config("wheel-left".to_string(), 8);
    /// assert_eq!(handle.name(), "wheel-left");
    /// ```
    pub fn with_config(name: String, capacity: usize) -> (Self, MockHallSensorHandle) {
        let (pulse_tx, pulse_rx) = mpsc::channel(capacity.max(1));

        let sensor = Self {
            pulse_rx,
            name: name.clone(),
        };

        let handle = MockHallSensorHandle {
            pulse_tx,
            name,
            sent: Arc::new(AtomicU64::new(0)),
        };

        (sensor, handle)
    }
}

impl PulseSource for MockHallSensor {
    async fn wait_for_pulse(&mut self) -> Result<()> {
        self.pulse_rx
            .recv()
            .await
            .ok_or_else(|| crate::HardwareError::disconnected(self.name.clone()))
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock Hall Sensor v1.0"))
    }
}

/// Handle for driving a mock hall sensor.
///
/// Clones share the same channel and sent-pulse counter.
#[derive(Debug, Clone)]
pub struct MockHallSensorHandle {
    /// Channel sender for simulated edges
    pulse_tx: mpsc::Sender<()>,

    /// Device name
    name: String,

    /// Pulses accepted by the channel, across all clones
    sent: Arc<AtomicU64>,
}

impl MockHallSensorHandle {
    /// Simulate one sensor edge.
    ///
    /// Waits while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns an error if the sensor has been dropped and the channel is closed.
    pub async fn send_pulse(&self) -> Result<()> {
        self.pulse_tx
            .send(())
            .await
            .map_err(|_| crate::HardwareError::disconnected(self.name.clone()))?;
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Simulate `count` consecutive sensor edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the sensor is dropped before all pulses are queued.
    ///
    /// # Examples
    ///
    /// ```
    /// use hallcount_hardware::mock::MockHallSensor;
    ///
    /// #[tokio::main]
    /// async fn main() -> hallcount_hardware::Result<()> {
    ///     let (_sensor, handle) = MockHallSensor::new();
    ///
    ///     handle.send_pulses(10).await?;
    ///     assert_eq!(handle.pulses_sent(), 10);
    ///
    ///     Ok(())
    /// }
    /// ```
    pub async fn send_pulses(&self, count: u64) -> Result<()> {
        for _ in 0..count {
            self.send_pulse().await?;
        }
        Ok(())
    }

    /// Total pulses queued through this handle and its clones.
    pub fn pulses_sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    /// Pulses queued but not yet taken by the sensor.
    pub fn queued(&self) -> usize {
        self.pulse_tx.max_capacity() - self.pulse_tx.capacity()
    }

    /// Returns `true` if the sensor side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.pulse_tx.is_closed()
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
