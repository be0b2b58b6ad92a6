//! Platform glue for the hall-effect encoder counter.
//!
//! This crate binds a [`CounterEngine`](hallcount_core::CounterEngine) to a
//! platform device. It models the pieces a real driver needs around the
//! counting core: the pulse source that plays the interrupt, device matching,
//! interrupt line registration, the text attribute interface and the
//! probe/remove lifecycle.
//!
//! # Design Philosophy
//!
//! - **Core stays pure**: the counting engine never blocks, allocates or logs;
//!   everything platform-specific lives here.
//! - **Async-first**: pulse sources are awaited from a Tokio task standing in
//!   for the interrupt handler.
//! - **Thread-safe**: pulse sources require `Send + Sync`; the engine is shared
//!   through `Arc`.
//! - **Error-aware**: all fallible operations return [`Result<T>`] with a
//!   [`HardwareError`] that maps to a negative errno.
//!
//! # Binding an Encoder
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
//!     handle.send_pulses(193).await?;
//!     let distance = encoder.attributes().show("distance")?;
//!     println!("{distance} um");
//!
//!     encoder.attributes().store("reset", "1\n")?;
//!     encoder.remove().await
//! }
//! ```
//!
//! # Mock Implementations
//!
//! [`mock::MockHallSensor`] simulates a sensor for development and testing
//! without physical hardware.

pub mod attributes;
pub mod driver;
pub mod error;
pub mod irq;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use attributes::{AttributeGroup, DISTANCE_ATTR, RESET_ATTR};
pub use driver::{BoundEncoder, DriverConfig, EncoderDriver};
pub use error::{HardwareError, Result};
pub use irq::InterruptController;
pub use traits::PulseSource;
pub use types::{DeviceInfo, PinctrlState, PlatformDevice};
