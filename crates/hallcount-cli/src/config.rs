//! Emulator configuration.

use anyhow::{Context, Result};
use hallcount_hardware::DriverConfig;
use hallcount_hardware::mock::hall_sensor::DEFAULT_PULSE_QUEUE_CAPACITY;

/// Environment variable overriding the device name.
pub const ENV_DEVICE: &str = "HALLCOUNT_DEVICE";

/// Environment variable overriding the interrupt line.
pub const ENV_IRQ: &str = "HALLCOUNT_IRQ";

/// Environment variable overriding the pulse queue capacity.
pub const ENV_QUEUE: &str = "HALLCOUNT_QUEUE";

/// Settings for one emulated encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// Platform device name.
    pub device_name: String,

    /// Interrupt line the device is wired to.
    pub irq: u32,

    /// Pulses the mock sensor queues before `pulse` waits.
    pub pulse_queue_capacity: usize,

    /// Driver settings.
    pub driver: DriverConfig,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            device_name: "encoder.0".to_string(),
            irq: 42,
            pulse_queue_capacity: DEFAULT_PULSE_QUEUE_CAPACITY,
            driver: DriverConfig::default(),
        }
    }
}

impl EmulatorConfig {
    /// Defaults overridden by `HALLCOUNT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(device) = lookup(ENV_DEVICE) {
            config.device_name = device;
        }
        if let Some(irq) = lookup(ENV_IRQ) {
            config.irq = irq
                .trim()
                .parse()
                .with_context(|| format!("{ENV_IRQ} must be an unsigned integer, got {irq:?}"))?;
        }
        if let Some(queue) = lookup(ENV_QUEUE) {
            config.pulse_queue_capacity = queue.trim().parse().with_context(|| {
                format!("{ENV_QUEUE} must be an unsigned integer, got {queue:?}")
            })?;
        }

        Ok(config)
    }
}
