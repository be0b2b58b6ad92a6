//! Interrupt line registry.
//!
//! Models the platform interrupt controller: each line can be requested by
//! one owner at a time. The returned [`IrqLine`] guard frees the line when
//! dropped, so a removed driver releases its line automatically.

use crate::{HardwareError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

type Registry = Arc<Mutex<HashMap<u32, String>>>;

/// Shared registry of claimed interrupt lines.
///
/// Cloning yields another handle to the same registry.
///
/// # Examples
///
/// ```
/// use hallcount_hardware::irq::InterruptController;
///
/// let irqs = InterruptController::new();
/// let line = irqs.request(42, "encoder.0").unwrap();
/// assert!(irqs.request(42, "encoder.1").is_err());
///
/// drop(line);
/// assert!(irqs.request(42, "encoder.1").is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterruptController {
    claimed: Registry,
}

impl InterruptController {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an interrupt line for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::IrqBusy` if the line is already claimed.
    pub fn request(&self, irq: u32, owner: impl Into<String>) -> Result<IrqLine> {
        let owner = owner.into();
        let mut claimed = lock(&self.claimed);

        if let Some(current) = claimed.get(&irq) {
            return Err(HardwareError::irq_busy(irq, current.clone()));
        }

        debug!("IRQ {} requested by {}", irq, owner);
        claimed.insert(irq, owner);

        Ok(IrqLine {
            irq,
            claimed: Arc::clone(&self.claimed),
        })
    }

    /// Current owner of an interrupt line, if claimed.
    pub fn owner(&self, irq: u32) -> Option<String> {
        lock(&self.claimed).get(&irq).cloned()
    }

    /// Returns `true` if the line is claimed.
    pub fn is_claimed(&self, irq: u32) -> bool {
        lock(&self.claimed).contains_key(&irq)
    }
}

/// A claimed interrupt line, freed on drop.
#[derive(Debug)]
pub struct IrqLine {
    irq: u32,
    claimed: Registry,
}

impl IrqLine {
    /// Interrupt line number.
    pub fn number(&self) -> u32 {
        self.irq
    }
}

impl Drop for IrqLine {
    fn drop(&mut self) {
        if let Some(owner) = lock(&self.claimed).remove(&self.irq) {
            debug!("IRQ {} freed by {}", self.irq, owner);
        }
    }
}

// Registry updates are single inserts and removes, so a poisoned map is still consistent.
fn lock(registry: &Registry) -> MutexGuard<'_, HashMap<u32, String>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}
