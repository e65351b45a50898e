//! Energy subsystem: the only stateful service.

use super::{Operation, Subsystem};
use crate::error::{CityError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Operating mode of the energy grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyMode {
    /// Reduced draw, 180 kWh.
    Eco,
    /// Startup mode, 312 kWh.
    #[default]
    Normal,
    /// Full output, 450 kWh.
    Max,
}

impl EnergyMode {
    pub const ALL: [EnergyMode; 3] = [EnergyMode::Eco, EnergyMode::Normal, EnergyMode::Max];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EnergyMode::Eco => "eco",
            EnergyMode::Normal => "normal",
            EnergyMode::Max => "max",
        }
    }

    /// Estimated consumption in kWh. Fixed per mode.
    #[must_use]
    pub fn consumption_kwh(self) -> u32 {
        match self {
            EnergyMode::Eco => 180,
            EnergyMode::Normal => 312,
            EnergyMode::Max => 450,
        }
    }
}

impl fmt::Display for EnergyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; anything else is `InvalidMode` carrying the raw input.
impl FromStr for EnergyMode {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self> {
        EnergyMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CityError::InvalidMode(s.to_string()))
    }
}

/// The energy grid controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnergySystem {
    mode: EnergyMode,
}

/// Shared handle so a new guard can be built over the same grid state.
pub type EnergyHandle = Rc<RefCell<EnergySystem>>;

impl EnergySystem {
    /// Create a grid in `normal` mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared handle in `normal` mode.
    #[must_use]
    pub fn shared() -> EnergyHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    #[must_use]
    pub fn mode(&self) -> EnergyMode {
        self.mode
    }
}

impl Subsystem for EnergySystem {
    fn operations(&self) -> &'static [Operation] {
        &[Operation::GetReport, Operation::SetMode]
    }

    fn report(&self) -> Option<String> {
        Some(format!(
            "Energy mode: {} | Estimated consumption: {} kWh",
            self.mode,
            self.mode.consumption_kwh()
        ))
    }

    fn set_mode(&mut self, mode: &str) -> Option<Result<EnergyMode>> {
        let outcome = mode.parse::<EnergyMode>();
        match &outcome {
            Ok(next) => {
                self.mode = *next;
                tracing::info!(mode = %next, "energy mode changed");
            }
            Err(err) => tracing::warn!(requested = mode, %err, "energy mode rejected"),
        }
        Some(outcome)
    }
}

// =============================================================================
// TESTS
// =============================================================================
