//! Traffic control subsystem.

use super::{Operation, Subsystem};
use crate::logging::{Logged, NoticeSink, TracingNotices};

fn halt_traffic(_: ()) -> String {
    "ALL TRANSPORT HAS BEEN STOPPED (EMERGENCY)!".to_string()
}

/// Traffic control. Emergency stop runs through the logging decorator
/// under the name `emergencyStop`.
#[derive(Debug)]
pub struct TransportSystem<N = TracingNotices> {
    emergency_stop: Logged<fn(()) -> String, N>,
    stopped: bool,
}

impl TransportSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::with_notices(TracingNotices)
    }
}

impl Default for TransportSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NoticeSink> TransportSystem<N> {
    pub fn with_notices(sink: N) -> Self {
        Self {
            emergency_stop: Logged::new(halt_traffic as fn(()) -> String)
                .named("emergencyStop")
                .with_sink(sink),
            stopped: false,
        }
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl<N: NoticeSink> Subsystem for TransportSystem<N> {
    fn operations(&self) -> &'static [Operation] {
        &[Operation::EmergencyStop]
    }

    fn emergency_stop(&mut self) -> Option<String> {
        let notice = self.emergency_stop.call(());
        if !self.stopped {
            tracing::warn!("traffic halted city-wide");
        }
        self.stopped = true;
        Some(notice)
    }
}
