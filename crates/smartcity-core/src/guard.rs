//! # Access Guard
//!
//! Role-checking proxy in front of a subsystem.
//!
//! The guard exposes exactly the operations of its target. Operations in
//! the privileged set are forwarded only for the `admin` role; for any
//! other role the call is replaced by an `Unauthorized` outcome and the
//! target is never touched. Everything else passes straight through.
//!
//! Neither the role nor the privileged set can change after construction.
//! To switch roles, wrap the target again.

use crate::error::{CityError, Result};
use crate::subsystems::{EnergyMode, Operation, Subsystem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The only role allowed through privileged operations.
pub const ADMIN_ROLE: &str = "admin";

/// Role assumed when none is given.
pub const GUEST_ROLE: &str = "guest";

/// Operations gated by [`AccessGuard::wrap`].
pub const DEFAULT_PRIVILEGED: [Operation; 1] = [Operation::SetMode];

// =============================================================================
// ROLE
// =============================================================================

/// A caller role token.
///
/// Any string is accepted; only the exact, case-sensitive `"admin"` is
/// privileged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role(String);

impl Role {
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    #[must_use]
    pub fn guest() -> Self {
        Self::new(GUEST_ROLE)
    }

    #[must_use]
    pub fn admin() -> Self {
        Self::new(ADMIN_ROLE)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.0 == ADMIN_ROLE
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::guest()
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Self::new(role)
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        Self(role)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// GUARD
// =============================================================================

/// Proxy that gates privileged operations of `S` behind the admin role.
#[derive(Debug)]
pub struct AccessGuard<S> {
    target: S,
    role: Role,
    privileged: BTreeSet<Operation>,
}

impl<S: Subsystem> AccessGuard<S> {
    /// Wrap `target`, gating the default privileged set (`set_mode`).
    pub fn wrap(target: S, role: impl Into<Role>) -> Self {
        Self::with_privileged(target, role, DEFAULT_PRIVILEGED)
    }

    /// Wrap `target`, gating exactly `privileged`.
    pub fn with_privileged(
        target: S,
        role: impl Into<Role>,
        privileged: impl IntoIterator<Item = Operation>,
    ) -> Self {
        Self {
            target,
            role: role.into(),
            privileged: privileged.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_privileged(&self, op: Operation) -> bool {
        self.privileged.contains(&op)
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    /// Discard the guard and take back the target.
    pub fn into_inner(self) -> S {
        self.target
    }

    /// `Some(Unauthorized)` when `op` must be denied for this role.
    ///
    /// Operations the target does not offer are never denied, so the guard
    /// keeps reporting them as absent.
    fn denial(&self, op: Operation) -> Option<CityError> {
        if !self.target.supports(op) || !self.is_privileged(op) || self.role.is_admin() {
            return None;
        }
        tracing::warn!(role = %self.role, operation = %op, "privileged operation denied");
        Some(CityError::Unauthorized {
            operation: op,
            role: self.role.to_string(),
        })
    }
}

impl<S: Subsystem> Subsystem for AccessGuard<S> {
    fn operations(&self) -> &'static [Operation] {
        self.target.operations()
    }

    fn turn_on_all(&mut self) -> Option<String> {
        match self.denial(Operation::TurnOnAll) {
            Some(err) => Some(err.to_string()),
            None => self.target.turn_on_all(),
        }
    }

    fn emergency_stop(&mut self) -> Option<String> {
        match self.denial(Operation::EmergencyStop) {
            Some(err) => Some(err.to_string()),
            None => self.target.emergency_stop(),
        }
    }

    fn report(&self) -> Option<String> {
        match self.denial(Operation::GetReport) {
            Some(err) => Some(err.to_string()),
            None => self.target.report(),
        }
    }

    fn set_mode(&mut self, mode: &str) -> Option<Result<EnergyMode>> {
        match self.denial(Operation::SetMode) {
            Some(err) => Some(Err(err)),
            None => self.target.set_mode(mode),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsystems::{EnergySystem, LightingSystem};
    use std::rc::Rc;

    #[test]
    fn guest_cannot_set_mode() {
        let energy = EnergySystem::shared();
        let mut guard = AccessGuard::wrap(Rc::clone(&energy), "guest");

        let outcome = guard.set_mode("eco");
        assert!(matches!(
            outcome,
            Some(Err(CityError::Unauthorized { operation: Operation::SetMode, .. }))
        ));
        assert_eq!(energy.borrow().mode(), EnergyMode::Normal);
    }

    #[test]
    fn guest_report_matches_unwrapped() {
        let energy = EnergySystem::shared();
        let guard = AccessGuard::wrap(Rc::clone(&energy), Role::guest());

        assert_eq!(guard.report(), energy.borrow().report());
        assert_eq!(guard.operations(), energy.borrow().operations());
    }

    #[test]
    fn admin_set_mode_reaches_target() {
        let mut guard = AccessGuard::wrap(EnergySystem::new(), Role::admin());

        assert_eq!(guard.set_mode("eco"), Some(Ok(EnergyMode::Eco)));
        assert_eq!(
            guard.report().as_deref(),
            Some("Energy mode: eco | Estimated consumption: 180 kWh")
        );

        guard.set_mode("max");
        assert!(guard.report().is_some_and(|r| r.contains("450")));

        guard.set_mode("normal");
        assert!(guard.report().is_some_and(|r| r.contains("312")));
    }

    #[test]
    fn admin_invalid_mode_is_rejected() {
        let mut guard = AccessGuard::wrap(EnergySystem::new(), "admin");
        guard.set_mode("eco");

        assert_eq!(
            guard.set_mode("bogus"),
            Some(Err(CityError::InvalidMode("bogus".to_string())))
        );
        assert_eq!(guard.target().mode(), EnergyMode::Eco);
    }

    #[test]
    fn role_match_is_case_sensitive() {
        for role in ["Admin", "ADMIN", " admin", "", "root"] {
            let mut guard = AccessGuard::wrap(EnergySystem::new(), role);
            assert!(matches!(guard.set_mode("max"), Some(Err(_))), "role {role:?}");
            assert_eq!(guard.into_inner().mode(), EnergyMode::Normal);
            assert_eq!(Role::new(role).as_str(), role);
        }
    }

    #[test]
    fn rewrap_changes_role_over_same_target() {
        let energy = EnergySystem::shared();

        let mut guest = AccessGuard::wrap(Rc::clone(&energy), "guest");
        assert!(matches!(guest.set_mode("max"), Some(Err(_))));

        let mut admin = AccessGuard::wrap(Rc::clone(&energy), "admin");
        assert_eq!(admin.set_mode("max"), Some(Ok(EnergyMode::Max)));

        // The guest guard still denies; its role never changed.
        assert!(matches!(guest.set_mode("eco"), Some(Err(_))));
        assert_eq!(energy.borrow().mode(), EnergyMode::Max);
    }

    #[test]
    fn custom_privileged_set_only_gates_offered_operations() {
        let mut guard = AccessGuard::with_privileged(
            LightingSystem::new(),
            "guest",
            [Operation::TurnOnAll, Operation::SetMode],
        );

        let notice = guard.turn_on_all().unwrap_or_default();
        assert_eq!(notice, "ERROR: only ADMIN may turn on all city lights");
        assert!(!guard.target().is_lit());

        // Lighting has no set_mode, so the guard reports it as absent.
        assert!(guard.set_mode("eco").is_none());
    }
}
