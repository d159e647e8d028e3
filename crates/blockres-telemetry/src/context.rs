//! Application-level span that carries build information for every log line.

use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Guard that keeps the application-level span entered for the lifetime of the process.
pub struct GlobalContextGuard {
    _guard: Entered<'static>,
}

impl GlobalContextGuard {
    /// Enter the application-level tracing span for the lifetime of the guard.
    #[must_use]
    pub fn new(component: impl Into<String>) -> Self {
        let component = component.into();
        let span: &'static Span = Box::leak(Box::new(tracing::info_span!(
            "app",
            component = %component,
            build_sha = %build_sha()
        )));
        let guard = span.enter();
        Self { _guard: guard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_context_guard_enters_and_exits() {
        let guard = GlobalContextGuard::new("test");
        drop(guard);
    }
}
