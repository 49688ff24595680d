//! Logging middleware - observability for dispatches.

use mediary_core::{Contract, DispatchContext, DispatchError, Middleware, Next};

/// Middleware that records each dispatch and its outcome.
///
/// Emits through the `tracing` crate when the `tracing` feature is enabled
/// and compiles to a pass-through otherwise.
///
/// # Example
///
/// ```rust,ignore
/// use mediary::{InvocationPipeline, middleware::logging::LoggingMiddleware};
///
/// let pipeline = InvocationPipeline::builder()
///     .middleware(LoggingMiddleware::named("billing"))
///     .handler(ChargeHandler)
///     .build()?;
/// ```
pub struct LoggingMiddleware {
    name: &'static str,
}

impl LoggingMiddleware {
    /// Logging middleware with a default stage name.
    pub fn new() -> Self {
        Self { name: "dispatch" }
    }

    /// Logging middleware with a custom stage name, used in log records to
    /// identify the pipeline.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Contract> Middleware<C> for LoggingMiddleware {
    async fn handle(
        &self,
        cx: &mut DispatchContext<C>,
        next: Next<'_, C>,
    ) -> Result<(), DispatchError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(stage = %self.name, contract = %C::name(), "dispatching");

        let result = next.invoke(cx).await;

        #[cfg(feature = "tracing")]
        if let Some(error) = cx.error() {
            tracing::warn!(stage = %self.name, contract = %C::name(), %error, "dispatch failed");
        } else {
            tracing::debug!(
                stage = %self.name,
                contract = %C::name(),
                has_response = cx.has_response(),
                "dispatch completed"
            );
        }

        #[cfg(not(feature = "tracing"))]
        let _ = self.name;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InvocationPipeline;
    use mediary_core::{BoxError, Cancellation, ContractHandler};

    struct Probe;
    impl Contract for Probe {
        type Response = u32;
    }

    struct Fixed;
    impl ContractHandler<Probe> for Fixed {
        async fn handle(
            &self,
            _request: &Probe,
            _cancellation: &Cancellation,
        ) -> Result<u32, BoxError> {
            Ok(9)
        }
    }

    #[tokio::test]
    async fn logging_middleware_passes_through() {
        let pipeline = InvocationPipeline::builder()
            .middleware(LoggingMiddleware::named("probe"))
            .handler(Fixed)
            .build()
            .unwrap();
        let cx = pipeline.handle(Probe, &Cancellation::new()).await;
        assert!(cx.is_success());
        assert_eq!(cx.response(), Some(&9));
    }
}
