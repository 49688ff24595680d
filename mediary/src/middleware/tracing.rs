//! Span instrumentation for dispatches.

use mediary_core::{Contract, DispatchContext, DispatchError, Middleware, Next};
use tracing::Instrument;

/// Middleware that wraps the rest of the chain in a `tracing` span.
///
/// The span covers everything downstream of this middleware: later user
/// middleware, the framework guards, and the delivery stage. Place it early
/// (low order) to capture the whole dispatch.
pub struct TracingMiddleware {
    name: &'static str,
}

impl TracingMiddleware {
    /// Span-instrumenting middleware with a default span name.
    pub const fn new() -> Self {
        Self { name: "dispatch" }
    }

    /// Span-instrumenting middleware with a custom span name.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for TracingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Contract> Middleware<C> for TracingMiddleware {
    async fn handle(
        &self,
        cx: &mut DispatchContext<C>,
        next: Next<'_, C>,
    ) -> Result<(), DispatchError> {
        let span = tracing::info_span!(
            "dispatch",
            stage = %self.name,
            contract = %C::name(),
        );
        async move { next.invoke(cx).await }.instrument(span).await
    }
}
