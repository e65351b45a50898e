//! # Subsystems Module
//!
//! The capability interface shared by every registrable city service, and
//! the three built-in services (lighting, transport, energy).
//!
//! Each operation on [`Subsystem`] has a default body returning `None`,
//! which means "this subsystem does not offer the operation". Callers treat
//! `None` as a silent no-op rather than an error.

mod energy;
mod lighting;
mod transport;

pub use energy::*;
pub use lighting::*;
pub use transport::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// OPERATION NAMES
// =============================================================================

/// The closed set of named operations a subsystem can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Switch every lamp on.
    TurnOnAll,
    /// Halt all traffic immediately.
    EmergencyStop,
    /// Read a status report.
    GetReport,
    /// Change the operating mode.
    SetMode,
}

impl Operation {
    /// Stable snake_case name of the operation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::TurnOnAll => "turn_on_all",
            Operation::EmergencyStop => "emergency_stop",
            Operation::GetReport => "get_report",
            Operation::SetMode => "set_mode",
        }
    }

    /// Human-readable action phrase, used in denial messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Operation::TurnOnAll => "turn on all city lights",
            Operation::EmergencyStop => "stop all traffic",
            Operation::GetReport => "read the energy report",
            Operation::SetMode => "change the energy mode",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SUBSYSTEM NAMES
// =============================================================================

/// The well-known subsystem names the registry facade dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubsystemKind {
    /// Street lighting, registered as `"lighting"`.
    Lighting,
    /// Traffic control, registered as `"transport"`.
    Transport,
    /// The energy grid, registered as `"energy"`.
    Energy,
}

impl SubsystemKind {
    /// Registry key for this subsystem.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SubsystemKind::Lighting => "lighting",
            SubsystemKind::Transport => "transport",
            SubsystemKind::Energy => "energy",
        }
    }
}

impl fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SUBSYSTEM TRAIT
// =============================================================================

/// Capability interface for anything the registry can hold.
///
/// Implementors override only the operations they offer and list them in
/// [`Subsystem::operations`]. Everything else falls through to `None`.
pub trait Subsystem {
    /// The operations this subsystem offers.
    fn operations(&self) -> &'static [Operation];

    /// Whether `op` is offered.
    fn supports(&self, op: Operation) -> bool {
        self.operations().contains(&op)
    }

    /// Switch every lamp on. Returns the notice to display.
    fn turn_on_all(&mut self) -> Option<String> {
        None
    }

    /// Halt all traffic. Returns the notice to display.
    fn emergency_stop(&mut self) -> Option<String> {
        None
    }

    /// Produce a status report.
    fn report(&self) -> Option<String> {
        None
    }

    /// Change the operating mode.
    ///
    /// The inner `Result` carries rejected outcomes (`InvalidMode`,
    /// `Unauthorized`) as values; it is never used to abort the caller.
    fn set_mode(&mut self, _mode: &str) -> Option<Result<EnergyMode>> {
        None
    }
}

/// Shared single-threaded handle: the registry and the app can both hold
/// the same subsystem state.
impl<S: Subsystem + ?Sized> Subsystem for Rc<RefCell<S>> {
    fn operations(&self) -> &'static [Operation] {
        self.borrow().operations()
    }

    fn turn_on_all(&mut self) -> Option<String> {
        self.borrow_mut().turn_on_all()
    }

    fn emergency_stop(&mut self) -> Option<String> {
        self.borrow_mut().emergency_stop()
    }

    fn report(&self) -> Option<String> {
        self.borrow().report()
    }

    fn set_mode(&mut self, mode: &str) -> Option<Result<EnergyMode>> {
        self.borrow_mut().set_mode(mode)
    }
}

// =============================================================================
// TESTS
// =============================================================================
