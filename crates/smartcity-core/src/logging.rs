//! # Logging Decorator
//!
//! Wraps an operation so each call is bracketed by a "started" and a
//! "finished" notice. The wrapped operation's result is returned untouched.
//!
//! A failing call emits only the "started" notice: the error (or panic)
//! propagates before the "finished" notice is reached. There is no
//! drop-guard that would emit it anyway.
//!
//! Operations take their arguments as a single value; use a tuple for
//! several arguments and `()` for none.

use std::fmt;
use std::rc::Rc;

/// Display name used when none is given.
pub const DEFAULT_OPERATION_NAME: &str = "operation";

// =============================================================================
// NOTICE SINKS
// =============================================================================

/// Destination for started/finished notices.
pub trait NoticeSink {
    fn started(&self, name: &str);
    fn finished(&self, name: &str);
}

/// Emits notices as `tracing` INFO events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn started(&self, name: &str) {
        tracing::info!(operation = name, "[LOG] {} started", name);
    }

    fn finished(&self, name: &str) {
        tracing::info!(operation = name, "[LOG] {} finished", name);
    }
}

impl<T: NoticeSink + ?Sized> NoticeSink for &T {
    fn started(&self, name: &str) {
        (**self).started(name);
    }

    fn finished(&self, name: &str) {
        (**self).finished(name);
    }
}

impl<T: NoticeSink + ?Sized> NoticeSink for Rc<T> {
    fn started(&self, name: &str) {
        (**self).started(name);
    }

    fn finished(&self, name: &str) {
        (**self).finished(name);
    }
}

// =============================================================================
// DECORATOR
// =============================================================================

/// An operation wrapped with started/finished notices.
pub struct Logged<F, N = TracingNotices> {
    name: String,
    operation: F,
    sink: N,
}

/// Wrap `operation`, optionally under a display name.
pub fn with_logging<F>(operation: F, name: Option<&str>) -> Logged<F> {
    let logged = Logged::new(operation);
    match name {
        Some(name) => logged.named(name),
        None => logged,
    }
}

impl<F> Logged<F> {
    /// Wrap `operation` with the default name and the tracing sink.
    pub fn new(operation: F) -> Self {
        Self {
            name: DEFAULT_OPERATION_NAME.to_string(),
            operation,
            sink: TracingNotices,
        }
    }
}

impl<F, N> Logged<F, N> {
    /// Set the display name used in notices.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Route notices to a different sink.
    #[must_use]
    pub fn with_sink<M: NoticeSink>(self, sink: M) -> Logged<F, M> {
        Logged {
            name: self.name,
            operation: self.operation,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<F, N: NoticeSink> Logged<F, N> {
    /// Invoke the wrapped operation.
    pub fn call<A, R>(&mut self, args: A) -> R
    where
        F: FnMut(A) -> R,
    {
        self.sink.started(&self.name);
        let result = (self.operation)(args);
        self.sink.finished(&self.name);
        result
    }

    /// Invoke a fallible operation. On `Err` the "finished" notice is
    /// skipped and the error is returned as-is.
    pub fn try_call<A, T, E>(&mut self, args: A) -> Result<T, E>
    where
        F: FnMut(A) -> Result<T, E>,
    {
        self.sink.started(&self.name);
        let value = (self.operation)(args)?;
        self.sink.finished(&self.name);
        Ok(value)
    }
}

impl<F, N> fmt::Debug for Logged<F, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logged").field("name", &self.name).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
