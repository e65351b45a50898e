//! # Registry Module
//!
//! The single coordinator of the control panel.
//!
//! The registry maps subsystem names to subsystem handles and exposes
//! facade operations. Each facade looks up one fixed name and invokes one
//! fixed operation on it. A missing subsystem is a valid state: void
//! facades become no-ops and the report facade falls back to
//! [`ENERGY_NOT_CONNECTED`].
//!
//! ## Single instance
//!
//! There is no global static. The entry point owns a [`RegistryCell`] and
//! passes it to consumers; [`RegistryCell::get_instance`] creates the
//! registry on first use and hands out the same [`RegistryHandle`] on every
//! later call.
//!
//! The registry does not log. Visible effects come from the subsystems.

use crate::error::{CityError, Result};
use crate::subsystems::{EnergyMode, Subsystem, SubsystemKind};
use std::cell::{OnceCell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Fallback returned by [`Registry::energy_report`] when no energy
/// subsystem is registered.
pub const ENERGY_NOT_CONNECTED: &str = "energy system not connected";

/// Shared handle to the process-wide registry.
pub type RegistryHandle = Rc<RefCell<Registry>>;

// =============================================================================
// REGISTRY
// =============================================================================

/// Name → subsystem map plus facade operations.
#[derive(Default)]
pub struct Registry {
    subsystems: BTreeMap<String, Box<dyn Subsystem>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `subsystem` under `name`, replacing any previous handle.
    ///
    /// The replaced handle is dropped; nothing is merged.
    pub fn register(&mut self, name: impl Into<String>, subsystem: impl Subsystem + 'static) {
        self.subsystems.insert(name.into(), Box::new(subsystem));
    }

    /// Look up a subsystem by name.
    pub fn get(&self, name: &str) -> Option<&(dyn Subsystem + 'static)> {
        self.subsystems.get(name).map(|s| &**s)
    }

    /// Look up a subsystem by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Subsystem + 'static)> {
        self.subsystems.get_mut(name).map(|s| &mut **s)
    }

    /// Like [`Registry::get`], but a missing name is an `UnknownSubsystem`.
    pub fn lookup(&self, name: &str) -> Result<&(dyn Subsystem + 'static)> {
        self.get(name)
            .ok_or_else(|| CityError::UnknownSubsystem(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.subsystems.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subsystems.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subsystems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subsystems.is_empty()
    }

    // -------------------------------------------------------------------------
    // Facade
    // -------------------------------------------------------------------------

    /// `lighting.turn_on_all()`. `None` when lighting is not connected.
    pub fn turn_on_all_lights(&mut self) -> Option<String> {
        self.get_mut(SubsystemKind::Lighting.as_str())?.turn_on_all()
    }

    /// `transport.emergency_stop()`. `None` when transport is not connected.
    pub fn emergency_stop_traffic(&mut self) -> Option<String> {
        self.get_mut(SubsystemKind::Transport.as_str())?
            .emergency_stop()
    }

    /// `energy.report()`, or [`ENERGY_NOT_CONNECTED`].
    pub fn energy_report(&self) -> String {
        self.get(SubsystemKind::Energy.as_str())
            .and_then(|energy| energy.report())
            .unwrap_or_else(|| ENERGY_NOT_CONNECTED.to_string())
    }

    /// `energy.set_mode(mode)`, with `mode` forwarded verbatim.
    /// `None` when energy is not connected.
    pub fn set_energy_mode(&mut self, mode: &str) -> Option<Result<EnergyMode>> {
        self.get_mut(SubsystemKind::Energy.as_str())?.set_mode(mode)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("subsystems", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// SINGLE INSTANCE
// =============================================================================

/// Lazily-created holder of the one registry.
///
/// Construct once at startup and pass by reference.
#[derive(Debug, Default)]
pub struct RegistryCell {
    instance: OnceCell<RegistryHandle>,
}

impl RegistryCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry, created on first call. Every call returns a handle to
    /// the same instance.
    pub fn get_instance(&self) -> RegistryHandle {
        Rc::clone(
            self.instance
                .get_or_init(|| Rc::new(RefCell::new(Registry::new()))),
        )
    }

    /// Whether the registry has been created yet.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.instance.get().is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================
