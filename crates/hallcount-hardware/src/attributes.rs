//! Text attribute interface for a bound encoder.
//!
//! An encoder exposes two attributes:
//!
//! | Name | Mode | Access |
//! |------|------|--------|
//! | `distance` | `0o444` | show: accumulated distance in micrometers |
//! | `reset` | `0o200` | store: `1` zeroes the counters |
//!
//! Shows return the attribute text. Stores return the number of input bytes
//! consumed, or an error whose [`errno`](crate::HardwareError::errno) is the
//! value a write should fail with.

use crate::{HardwareError, Result};
use hallcount_core::CounterEngine;
use std::sync::Arc;
use tracing::{debug, warn};

/// Name of the read-only distance attribute.
pub const DISTANCE_ATTR: &str = "distance";

/// Name of the write-only reset attribute.
pub const RESET_ATTR: &str = "reset";

/// Permission bits of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeMode(u16);

impl AttributeMode {
    /// Readable by everyone.
    pub const READ_ALL: AttributeMode = AttributeMode(0o444);

    /// Writable by the owner only.
    pub const WRITE_OWNER: AttributeMode = AttributeMode(0o200);

    /// Returns `true` if any read bit is set.
    pub const fn is_readable(self) -> bool {
        self.0 & 0o444 != 0
    }

    /// Returns `true` if any write bit is set.
    pub const fn is_writable(self) -> bool {
        self.0 & 0o222 != 0
    }
}

/// A named attribute and its permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub mode: AttributeMode,
}

/// The attributes every bound encoder exposes.
pub const ENCODER_ATTRIBUTES: [Attribute; 2] = [
    Attribute {
        name: DISTANCE_ATTR,
        mode: AttributeMode::READ_ALL,
    },
    Attribute {
        name: RESET_ATTR,
        mode: AttributeMode::WRITE_OWNER,
    },
];

/// Attribute group bound to one encoder's counter engine.
///
/// # Examples
///
/// ```
/// use hallcount_core::CounterEngine;
/// use hallcount_hardware::attributes::AttributeGroup;
/// use std::sync::Arc;
///
/// let engine = Arc::new(CounterEngine::new());
/// let group = AttributeGroup::new(Arc::clone(&engine), "encoder.0");
///
/// for _ in 0..192 {
///     engine.on_pulse();
/// }
/// assert_eq!(group.show("distance").unwrap(), "204204");
///
/// assert_eq!(group.store("reset", "1\n").unwrap(), 2);
/// assert_eq!(group.show("distance").unwrap(), "0");
/// ```
#[derive(Debug, Clone)]
pub struct AttributeGroup {
    engine: Arc<CounterEngine>,
    device: String,
}

impl AttributeGroup {
    /// Create the attribute group for a device.
    pub fn new(engine: Arc<CounterEngine>, device: impl Into<String>) -> Self {
        Self {
            engine,
            device: device.into(),
        }
    }

    /// All attributes in the group.
    pub fn attributes(&self) -> &'static [Attribute] {
        &ENCODER_ATTRIBUTES
    }

    /// Look up an attribute by name.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::AttributeNotFound` for unknown names.
    pub fn attribute(&self, name: &str) -> Result<&'static Attribute> {
        ENCODER_ATTRIBUTES
            .iter()
            .find(|attr| attr.name == name)
            .ok_or_else(|| HardwareError::attribute_not_found(name))
    }

    /// Read an attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute does not exist or is not readable.
    pub fn show(&self, name: &str) -> Result<String> {
        let attr = self.attribute(name)?;
        if !attr.mode.is_readable() {
            return Err(HardwareError::permission_denied(name, "show"));
        }

        match attr.name {
            DISTANCE_ATTR => Ok(self.engine.show_distance()),
            _ => Err(HardwareError::attribute_not_found(name)),
        }
    }

    /// Write an attribute, returning the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute does not exist, is not writable,
    /// or the counter engine rejects the input.
    pub fn store(&self, name: &str, buf: &str) -> Result<usize> {
        let attr = self.attribute(name)?;
        if !attr.mode.is_writable() {
            return Err(HardwareError::permission_denied(name, "store"));
        }

        match attr.name {
            RESET_ATTR => match self.engine.reset_from_str(buf) {
                Ok(consumed) => {
                    debug!("{}: counters reset", self.device);
                    Ok(consumed)
                }
                Err(e) => {
                    warn!("{}: reset rejected: {}", self.device, e);
                    Err(e.into())
                }
            },
            _ => Err(HardwareError::attribute_not_found(name)),
        }
    }

    /// The counter engine behind this group.
    pub fn engine(&self) -> &Arc<CounterEngine> {
        &self.engine
    }
}
