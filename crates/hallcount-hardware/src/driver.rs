//! Encoder platform driver.
//!
//! [`EncoderDriver::probe`] binds a [`CounterEngine`] to a platform device:
//! it validates the device, claims the interrupt line, spawns the interrupt
//! task that feeds pulses into the engine and publishes the attribute group.
//! [`BoundEncoder::remove`] undoes all of it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   edge    ┌────────────────┐  on_pulse()  ┌───────────────┐
//! │ PulseSource │──────────►│ Interrupt Task │─────────────►│               │
//! └─────────────┘           └────────────────┘              │ CounterEngine │
//!                                                           │               │
//! ┌─────────────┐  show/store  ┌────────────────┐           │               │
//! │   Caller    │─────────────►│ AttributeGroup │──────────►│               │
//! └─────────────┘              └────────────────┘           └───────────────┘
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use hallcount_hardware::driver::{DriverConfig, EncoderDriver};
//! use hallcount_hardware::irq::InterruptController;
//! use hallcount_hardware::mock::MockHallSensor;
//! use hallcount_hardware::types::PlatformDevice;
//!
//! #[tokio::main]
//! async fn main() -> hallcount_hardware::Result<()> {
//!     let driver = EncoderDriver::new(DriverConfig::default(), InterruptController::new());
//!     let device = PlatformDevice::new("encoder.0")
//!         .with_of_node("dagu,hall-encoder")
//!         .with_irq(42);
//!
//!     let (sensor, handle) = MockHallSensor::new();
//!     let encoder = driver.probe(&device, sensor).await?;
//!
//!     handle.send_pulses(192).await?;
//!     println!("distance: {}", encoder.attributes().show("distance")?);
//!
//!     encoder.remove().await
//! }
//! ```

use crate::attributes::AttributeGroup;
use crate::irq::{InterruptController, IrqLine};
use crate::traits::PulseSource;
use crate::types::{PinctrlState, PlatformDevice};
use crate::{HardwareError, Result};
use hallcount_core::{CounterEngine, CounterSnapshot};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, warn};

/// Default driver name.
pub const DRIVER_NAME: &str = "encoder";

/// Device-tree compatible string the driver binds to by default.
pub const COMPATIBLE: &str = "dagu,hall-encoder";

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Driver name, used in log messages.
    pub name: String,

    /// Compatible strings this driver binds to.
    pub compatible: Vec<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            name: DRIVER_NAME.to_string(),
            compatible: vec![COMPATIBLE.to_string()],
        }
    }
}

/// Encoder platform driver.
#[derive(Debug, Clone)]
pub struct EncoderDriver {
    config: DriverConfig,
    irqs: InterruptController,
}

impl EncoderDriver {
    /// Create a driver that claims lines from `irqs`.
    pub fn new(config: DriverConfig, irqs: InterruptController) -> Self {
        Self { config, irqs }
    }

    /// Driver name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns `true` if the device's node is compatible with this driver.
    ///
    /// # Examples
    ///
    /// ```
    /// use hallcount_hardware::driver::{DriverConfig, EncoderDriver};
    /// use hallcount_hardware::irq::InterruptController;
    /// use hallcount_hardware::types::PlatformDevice;
    ///
    /// let driver = EncoderDriver::new(DriverConfig::default(), InterruptController::new());
    ///
    /// assert!(driver.matches(&PlatformDevice::new("a").with_of_node("dagu,hall-encoder")));
    /// assert!(!driver.matches(&PlatformDevice::new("b").with_of_node("acme,other")));
    /// assert!(!driver.matches(&PlatformDevice::new("c")));
    /// ```
    pub fn matches(&self, device: &PlatformDevice) -> bool {
        device
            .of_node
            .as_ref()
            .is_some_and(|node| self.config.compatible.contains(&node.compatible))
    }

    /// Bind the driver to `device`, counting pulses from `source`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The device has no device-tree node
    /// - The node is not compatible with this driver
    /// - The device has no interrupt line, or line 0
    /// - The interrupt line is already claimed
    pub async fn probe<S>(&self, device: &PlatformDevice, source: S) -> Result<BoundEncoder>
    where
        S: PulseSource + 'static,
    {
        let Some(node) = device.of_node.as_ref() else {
            error!("{}: Non DT platforms not supported", device.name);
            return Err(HardwareError::not_device_tree(&device.name));
        };

        if !self.matches(device) {
            return Err(HardwareError::no_match(&device.name, &node.compatible));
        }

        let engine = Arc::new(CounterEngine::new());

        if device.pinctrl == PinctrlState::Unavailable {
            warn!("{}: Unable to select pin group", device.name);
        }

        let irq = match device.irq {
            Some(irq) if irq > 0 => irq,
            _ => {
                error!("{}: no interrupt line", device.name);
                return Err(HardwareError::missing_irq(&device.name));
            }
        };

        let irq_line = self.irqs.request(irq, &device.name).inspect_err(|e| {
            error!("{}: request_irq failed: {}", device.name, e);
        })?;

        match source.get_info().await {
            Ok(info) => debug!("{}: pulse source {} ({})", device.name, info.name, info.model),
            Err(e) => warn!("{}: pulse source info unavailable: {}", device.name, e),
        }

        let task = tokio::spawn(interrupt_task(source, Arc::clone(&engine)));
        let attributes = AttributeGroup::new(Arc::clone(&engine), &device.name);

        engine.clear();

        info!(
            "{}: bound {} on IRQ {}",
            device.name, self.config.name, irq
        );

        Ok(BoundEncoder {
            device_name: device.name.clone(),
            engine,
            attributes,
            irq_line,
            task,
        })
    }
}

/// An encoder bound to a platform device.
#[derive(Debug)]
pub struct BoundEncoder {
    device_name: String,
    engine: Arc<CounterEngine>,
    attributes: AttributeGroup,
    irq_line: IrqLine,
    task: JoinHandle<Result<()>>,
}

impl BoundEncoder {
    /// Name of the bound device.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// The encoder's attribute group.
    pub fn attributes(&self) -> &AttributeGroup {
        &self.attributes
    }

    /// The encoder's counter engine.
    pub fn engine(&self) -> &Arc<CounterEngine> {
        &self.engine
    }

    /// Interrupt line in use.
    pub fn irq(&self) -> u32 {
        self.irq_line.number()
    }

    /// Current counter values.
    pub fn snapshot(&self) -> CounterSnapshot {
        self.engine.snapshot()
    }

    /// Returns `true` while the interrupt task is running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Unbind the encoder.
    ///
    /// Stops the interrupt task, drops the attribute group and frees the
    /// interrupt line. A task that already ended, for instance because the
    /// pulse source disconnected, is logged and does not fail removal.
    pub async fn remove(self) -> Result<()> {
        let Self {
            device_name,
            attributes,
            irq_line,
            task,
            ..
        } = self;

        task.abort();
        match TaskTermination::classify(task.await) {
            TaskTermination::Cancelled | TaskTermination::Success => {}
            TaskTermination::Error(e) => warn!("{}: pulse source stopped: {}", device_name, e),
            TaskTermination::Panic => warn!("{}: interrupt task panicked", device_name),
        }

        drop(attributes);
        let irq = irq_line.number();
        drop(irq_line);

        info!("{}: removed, IRQ {} freed", device_name, irq);
        Ok(())
    }
}

/// Forward every pulse from `source` to `engine` until the source fails.
async fn interrupt_task<S: PulseSource>(mut source: S, engine: Arc<CounterEngine>) -> Result<()> {
    loop {
        source.wait_for_pulse().await?;
        engine.on_pulse();
    }
}

/// Task termination classification for removal.
#[derive(Debug)]
enum TaskTermination {
    /// Task completed successfully.
    Success,
    /// Task returned an error.
    Error(HardwareError),
    /// Task was cancelled (expected during removal).
    Cancelled,
    /// Task panicked.
    Panic,
}

impl TaskTermination {
    fn classify(result: std::result::Result<Result<()>, JoinError>) -> Self {
        match result {
            Ok(Ok(())) => Self::Success,
            Ok(Err(e)) => Self::Error(e),
            Err(e) if e.is_cancelled() => Self::Cancelled,
            Err(_) => Self::Panic,
        }
    }
}
