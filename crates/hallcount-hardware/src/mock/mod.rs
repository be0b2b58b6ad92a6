//! Mock device implementations for testing and development.
//!
//! This module provides simulated devices that can be controlled
//! programmatically without requiring physical hardware.

pub mod hall_sensor;

// Re-export commonly used types
pub use hall_sensor::{MockHallSensor, MockHallSensorHandle};
