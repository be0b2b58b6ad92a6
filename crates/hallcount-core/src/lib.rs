//! Distance counting engine for an interrupt-driven hall-effect rotary encoder.
//!
//! The sensor emits [`SIGNALS_PER_ROTATION`](constants::SIGNALS_PER_ROTATION)
//! pulses per wheel revolution. [`CounterEngine`] counts those pulses, rolls
//! them over into completed rotations and derives the linear distance
//! travelled in micrometers.
//!
//! ```
//! use hallcount_core::CounterEngine;
//!
//! let engine = CounterEngine::new();
//! for _ in 0..193 {
//!     engine.on_pulse();
//! }
//! assert_eq!(engine.show_distance(), "205268");
//!
//! assert_eq!(engine.reset_from_str("1\n").unwrap(), 2);
//! assert_eq!(engine.read_distance().as_micrometers(), 0);
//! ```

pub mod constants;
pub mod counter;
pub mod error;
pub mod types;

pub use counter::CounterEngine;
pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
