//! Common types shared by the pulse source and the platform device model.

use serde::{Deserialize, Serialize};

/// Generic device information.
///
/// Name and model reported by a pulse source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device name (e.g., "Mock Hall Sensor").
    pub name: String,

    /// Device model identifier.
    pub model: String,
}

impl DeviceInfo {
    /// Create a new DeviceInfo with required fields.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// State of the device's pin-control group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinctrlState {
    /// Default pin group selected.
    #[default]
    Default,

    /// No pin group could be selected.
    Unavailable,
}

/// Device-tree node of a platform device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceNode {
    /// Compatible string, e.g. `"dagu,hall-encoder"`.
    pub compatible: String,
}

impl DeviceNode {
    /// Create a node with the given compatible string.
    pub fn new(compatible: impl Into<String>) -> Self {
        Self {
            compatible: compatible.into(),
        }
    }
}

/// A platform device the encoder driver can bind to.
///
/// # Examples
///
/// ```
/// use hallcount_hardware::types::{PinctrlState, PlatformDevice};
///
/// let device = PlatformDevice::new("encoder.0")
///     .with_of_node("dagu,hall-encoder")
///     .with_irq(42);
///
/// assert_eq!(device.irq, Some(42));
/// assert_eq!(device.pinctrl, PinctrlState::Default);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDevice {
    /// Device name, used as the interrupt line owner.
    pub name: String,

    /// Device-tree node, `None` on non-DT platforms.
    pub of_node: Option<DeviceNode>,

    /// Interrupt line number.
    pub irq: Option<u32>,

    /// Pin-control group state.
    pub pinctrl: PinctrlState,
}

impl PlatformDevice {
    /// Create a device with no node, no interrupt line and default pins.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            of_node: None,
            irq: None,
            pinctrl: PinctrlState::Default,
        }
    }

    /// Attach a device-tree node with the given compatible string.
    pub fn with_of_node(mut self, compatible: impl Into<String>) -> Self {
        self.of_node = Some(DeviceNode::new(compatible));
        self
    }

    /// Set the interrupt line.
    pub fn with_irq(mut self, irq: u32) -> Self {
        self.irq = Some(irq);
        self
    }

    /// Set the pin-control state.
    pub fn with_pinctrl(mut self, pinctrl: PinctrlState) -> Self {
        self.pinctrl = pinctrl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_new() {
        let info = DeviceInfo::new("Hall Sensor", "A3144");

        assert_eq!(info.name, "Hall Sensor");
        assert_eq!(info.model, "A3144");
    }

    #[test]
    fn test_platform_device_defaults() {
        let device = PlatformDevice::new("encoder.0");

        assert_eq!(device.of_node, None);
        assert_eq!(device.irq, None);
        assert_eq!(device.pinctrl, PinctrlState::Default);
    }

    #[test]
    fn test_platform_device_builder() {
        let device = PlatformDevice::new("encoder.1")
            .with_of_node("dagu,hall-encoder")
            .with_irq(7)
            .with_pinctrl(PinctrlState::Unavailable);

        assert_eq!(
            device.of_node.map(|node| node.compatible),
            Some("dagu,hall-encoder".to_string())
        );
        assert_eq!(device.irq, Some(7));
        assert_eq!(device.pinctrl, PinctrlState::Unavailable);
    }

    #[test]
    fn test_platform_device_serialization() {
        let device = PlatformDevice::new("encoder.0")
            .with_of_node("dagu,hall-encoder")
            .with_irq(42);
        let json = serde_json::to_string(&device).unwrap();
        let deserialized: PlatformDevice = serde_json::from_str(&json).unwrap();
        assert_eq!(device, deserialized);
    }
}
