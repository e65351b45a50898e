//! Street lighting subsystem.

use super::{Operation, Subsystem};
use crate::logging::{Logged, NoticeSink, TracingNotices};

fn switch_on(_: ()) -> String {
    "All city lights are ON!".to_string()
}

/// City-wide lamp control. The switch action runs through the logging
/// decorator under the name `turnOnAllLights`.
#[derive(Debug)]
pub struct LightingSystem<N = TracingNotices> {
    turn_on_all: Logged<fn(()) -> String, N>,
    lit: bool,
}

impl LightingSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::with_notices(TracingNotices)
    }
}

impl Default for LightingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NoticeSink> LightingSystem<N> {
    /// Build with a custom notice sink for the logged action.
    pub fn with_notices(sink: N) -> Self {
        Self {
            turn_on_all: Logged::new(switch_on as fn(()) -> String)
                .named("turnOnAllLights")
                .with_sink(sink),
            lit: false,
        }
    }

    /// Whether the lights have been switched on.
    #[must_use]
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl<N: NoticeSink> Subsystem for LightingSystem<N> {
    fn operations(&self) -> &'static [Operation] {
        &[Operation::TurnOnAll]
    }

    fn turn_on_all(&mut self) -> Option<String> {
        let notice = self.turn_on_all.call(());
        self.lit = true;
        Some(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counter {
        started: Cell<u32>,
        finished: Cell<u32>,
    }

    impl NoticeSink for Counter {
        fn started(&self, _name: &str) {
            self.started.set(self.started.get() + 1);
        }

        fn finished(&self, _name: &str) {
            self.finished.set(self.finished.get() + 1);
        }
    }

    #[test]
    fn turn_on_all_is_logged_once() {
        let counter = Counter::default();
        let mut lights = LightingSystem::with_notices(&counter);

        assert!(!lights.is_lit());
        assert_eq!(lights.turn_on_all().as_deref(), Some("All city lights are ON!"));
        assert!(lights.is_lit());
        assert_eq!(counter.started.get(), 1);
        assert_eq!(counter.finished.get(), 1);
    }

    #[test]
    fn offers_only_lighting() {
        let mut lights = LightingSystem::new();
        assert!(lights.supports(Operation::TurnOnAll));
        assert!(lights.emergency_stop().is_none());
        assert!(lights.report().is_none());
    }
}
