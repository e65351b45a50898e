//! # Error Module
//!
//! Error taxonomy for the SmartCity core.
//!
//! Only `UnknownDeviceType` is meant to reach the caller as a failure.
//! The other variants are expected outcomes: the facade and the guard hand
//! them back as values so the interactive loop can always continue.

use crate::device::DeviceKind;
use crate::subsystems::Operation;

/// Errors and rejected outcomes produced by the core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CityError {
    /// No subsystem is registered under the requested name.
    #[error("subsystem '{0}' is not registered")]
    UnknownSubsystem(String),

    /// The factory selector was given a key it does not know.
    #[error("unknown device type: '{0}' (expected {expected})", expected = DeviceKind::expected())]
    UnknownDeviceType(String),

    /// A mode outside eco / normal / max was requested.
    #[error("ERROR: \"{0}\" mode does not exist (eco / normal / max)")]
    InvalidMode(String),

    /// A privileged operation was invoked without the admin role.
    #[error("ERROR: only ADMIN may {}", .operation.describe())]
    Unauthorized {
        /// The operation that was denied.
        operation: Operation,
        /// The role that attempted it.
        role: String,
    },
}

/// Result alias used across the core.
pub type Result<T> = std::result::Result<T, CityError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_message_names_the_action() {
        let err = CityError::Unauthorized {
            operation: Operation::SetMode,
            role: "guest".to_string(),
        };
        assert_eq!(err.to_string(), "ERROR: only ADMIN may change the energy mode");
    }

    #[test]
    fn unknown_device_message_lists_known_kinds() {
        let err = CityError::UnknownDeviceType("heating".to_string());
        assert_eq!(
            err.to_string(),
            "unknown device type: 'heating' (expected lighting / transport)"
        );
    }

    #[test]
    fn invalid_mode_message_lists_choices() {
        let err = CityError::InvalidMode("turbo".to_string());
        let text = err.to_string();
        assert!(text.contains("\"turbo\""));
        assert!(text.contains("eco / normal / max"));
    }
}
