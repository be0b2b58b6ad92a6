//! Error types for the encoder platform glue.
//!
//! This module defines error types for binding the counter engine to a
//! platform device: device matching, interrupt line registration, the pulse
//! source and the attribute interface.

use hallcount_core::constants::EINVAL;

/// No such file or directory.
pub const ENOENT: i32 = 2;

/// No such device or address.
pub const ENXIO: i32 = 6;

/// Permission denied.
pub const EACCES: i32 = 13;

/// Device or resource busy.
pub const EBUSY: i32 = 16;

/// No such device.
pub const ENODEV: i32 = 19;

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur while binding or operating an encoder.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Pulse source is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Device has no device-tree node.
    #[error("Non DT platforms not supported: {device}")]
    NotDeviceTree { device: String },

    /// Device-tree node is not compatible with this driver.
    #[error("Device {device} ({compatible}) does not match driver")]
    NoMatch { device: String, compatible: String },

    /// Device has no usable interrupt line.
    #[error("No interrupt line for device {device}")]
    MissingIrq { device: String },

    /// Interrupt line is already claimed.
    #[error("IRQ {irq} already requested by {owner}")]
    IrqBusy { irq: u32, owner: String },

    /// Attribute does not exist in the group.
    #[error("Attribute not found: {name}")]
    AttributeNotFound { name: String },

    /// Attribute mode does not allow the operation.
    #[error("Permission denied: cannot {operation} attribute {attribute}")]
    PermissionDenied {
        attribute: String,
        operation: &'static str,
    },

    /// Counter engine rejected the request.
    #[error(transparent)]
    Counter(#[from] hallcount_core::Error),
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new missing device-tree node error.
    pub fn not_device_tree(device: impl Into<String>) -> Self {
        Self::NotDeviceTree {
            device: device.into(),
        }
    }

    /// Create a new compatible mismatch error.
    pub fn no_match(device: impl Into<String>, compatible: impl Into<String>) -> Self {
        Self::NoMatch {
            device: device.into(),
            compatible: compatible.into(),
        }
    }

    /// Create a new missing interrupt line error.
    pub fn missing_irq(device: impl Into<String>) -> Self {
        Self::MissingIrq {
            device: device.into(),
        }
    }

    /// Create a new busy interrupt line error.
    pub fn irq_busy(irq: u32, owner: impl Into<String>) -> Self {
        Self::IrqBusy {
            irq,
            owner: owner.into(),
        }
    }

    /// Create a new attribute not found error.
    pub fn attribute_not_found(name: impl Into<String>) -> Self {
        Self::AttributeNotFound { name: name.into() }
    }

    /// Create a new permission denied error.
    pub fn permission_denied(attribute: impl Into<String>, operation: &'static str) -> Self {
        Self::PermissionDenied {
            attribute: attribute.into(),
            operation,
        }
    }

    /// Negative errno for attribute and probe return values.
    #[must_use]
    pub fn errno(&self) -> i32 {
        match self {
            Self::Disconnected { .. } | Self::NoMatch { .. } => -ENODEV,
            Self::NotDeviceTree { .. } => -EINVAL,
            Self::MissingIrq { .. } => -ENXIO,
            Self::IrqBusy { .. } => -EBUSY,
            Self::AttributeNotFound { .. } => -ENOENT,
            Self::PermissionDenied { .. } => -EACCES,
            Self::Counter(e) => e.errno(),
        }
    }
}
