//! The mediator facade.
//!
//! The entry point callers hold on to: looks up the pipeline for a contract's
//! type pair, dispatches through it, and falls back to the no-op pipeline for
//! unrouted contracts. [`execute`](Mediator::execute) re-raises a captured
//! context error to give callers a conventional `Result` surface;
//! [`execute_and_capture`](Mediator::execute_and_capture) hands the context
//! back untouched for callers who want to inspect it themselves.

use crate::noop::NoopPipelineCache;
use crate::registry::PipelineRegistry;
use mediary_core::{
    Cancellation, CommandReceipt, Contract, DispatchContext, DispatchError, EventReceipt,
};

/// Routes contracts to their pipelines.
///
/// Cheap to share behind an `Arc`; every dispatch gets its own context and
/// the registry is immutable.
pub struct Mediator {
    registry: PipelineRegistry,
    fallback: NoopPipelineCache,
}

impl Mediator {
    /// Mediator over a frozen registry.
    pub fn new(registry: PipelineRegistry) -> Self {
        Self {
            registry,
            fallback: NoopPipelineCache::new(),
        }
    }

    /// Dispatch `request` and return its response, re-raising any captured
    /// error.
    ///
    /// An absent response on a successful dispatch (an event with zero
    /// subscribers, or a short-circuiting middleware that set none) falls back
    /// to `Default::default()`, hence the bound. Use
    /// [`execute_and_capture`](Mediator::execute_and_capture) for response
    /// types without a default.
    pub async fn execute<C: Contract>(&self, request: C) -> Result<C::Response, DispatchError>
    where
        C::Response: Default,
    {
        self.execute_with(request, &Cancellation::new()).await
    }

    /// [`execute`](Mediator::execute) with a caller-owned cancellation token.
    pub async fn execute_with<C: Contract>(
        &self,
        request: C,
        cancellation: &Cancellation,
    ) -> Result<C::Response, DispatchError>
    where
        C::Response: Default,
    {
        let cx = self.execute_and_capture_with(request, cancellation).await;
        cx.into_result()
            .map(|response| response.unwrap_or_default())
    }

    /// Dispatch `request` and return the full context without re-raising.
    pub async fn execute_and_capture<C: Contract>(&self, request: C) -> DispatchContext<C> {
        self.execute_and_capture_with(request, &Cancellation::new())
            .await
    }

    /// [`execute_and_capture`](Mediator::execute_and_capture) with a
    /// caller-owned cancellation token.
    pub async fn execute_and_capture_with<C: Contract>(
        &self,
        request: C,
        cancellation: &Cancellation,
    ) -> DispatchContext<C> {
        match self.registry.lookup::<C>() {
            Some(pipeline) => pipeline.handle(request, cancellation).await,
            None => self.fallback.resolve::<C>().handle(request),
        }
    }

    /// Dispatch a command, discarding the receipt.
    pub async fn send<C>(&self, command: C) -> Result<(), DispatchError>
    where
        C: Contract<Response = CommandReceipt>,
    {
        self.execute(command).await.map(|_| ())
    }

    /// Publish an event to its subscribers, discarding the receipt. Zero
    /// subscribers is a success.
    pub async fn publish<C>(&self, event: C) -> Result<(), DispatchError>
    where
        C: Contract<Response = EventReceipt>,
    {
        self.execute(event).await.map(|_| ())
    }
}
