//! One emulated encoder: a mock hall sensor bound through the driver.

use crate::command::{Command, HELP};
use crate::config::EmulatorConfig;
use hallcount_hardware::driver::COMPATIBLE;
use hallcount_hardware::mock::{MockHallSensor, MockHallSensorHandle};
use hallcount_hardware::{
    BoundEncoder, DISTANCE_ATTR, EncoderDriver, InterruptController, PlatformDevice, RESET_ATTR,
    Result,
};
use tracing::info;

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print.
    Output(String),
    /// Leave the command loop.
    Quit,
}

/// Emulated encoder driven from the command loop.
#[derive(Debug)]
pub struct Emulator {
    encoder: BoundEncoder,
    sensor: MockHallSensorHandle,
}

impl Emulator {
    /// Probe the driver against a mock sensor described by `config`.
    pub async fn start(config: EmulatorConfig) -> Result<Self> {
        let compatible = config
            .driver
            .compatible
            .first()
            .cloned()
            .unwrap_or_else(|| COMPATIBLE.to_string());
        let device = PlatformDevice::new(&config.device_name)
            .with_of_node(compatible)
            .with_irq(config.irq);

        let (sensor, handle) =
            MockHallSensor::with_config(config.device_name.clone(), config.pulse_queue_capacity);
        let driver = EncoderDriver::new(config.driver, InterruptController::new());
        let encoder = driver.probe(&device, sensor).await?;

        info!("emulating {} on IRQ {}", encoder.device_name(), encoder.irq());
        Ok(Self {
            encoder,
            sensor: handle,
        })
    }

    /// Execute one command.
    ///
    /// # Errors
    ///
    /// Returns the attribute or sensor error for the command; the emulator
    /// stays usable afterwards.
    pub async fn execute(&self, command: Command) -> Result<Outcome> {
        let output = match command {
            Command::Pulse(count) => {
                self.sensor.send_pulses(count).await?;
                self.settle().await;
                format!("sent {count} pulse(s)")
            }
            Command::Distance => self.encoder.attributes().show(DISTANCE_ATTR)?,
            Command::Reset(value) => {
                let consumed = self.encoder.attributes().store(RESET_ATTR, &value)?;
                format!("reset ok ({consumed} bytes)")
            }
            Command::Status => {
                let snapshot = self.encoder.snapshot();
                format!(
                    "device={} irq={} rotations={} signals={} counted={} distance={}um pulses_sent={}",
                    self.encoder.device_name(),
                    self.encoder.irq(),
                    snapshot.rotations,
                    snapshot.signals,
                    snapshot.total_signals(),
                    snapshot.distance(),
                    self.sensor.pulses_sent(),
                )
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Output(output))
    }

    /// Unbind the encoder.
    pub async fn shutdown(self) -> Result<()> {
        self.encoder.remove().await
    }

    /// Wait until the interrupt task has taken every queued pulse.
    async fn settle(&self) {
        while self.sensor.queued() > 0 && self.encoder.is_running() {
            tokio::task::yield_now().await;
        }
    }
}
