//! Testing utilities for Mediary.
//!
//! Doubles for exercising pipelines without real business logic:
//!
//! - [`CountingHandler`] - succeeds with a fixed response, counting calls
//! - [`FailingHandler`] - always fails, counting calls
//! - [`RecordingMiddleware`] - appends its id to a shared log, then continues
//! - [`ShortCircuit`] - sets a response and drops the continuation
//!
//! All counters and logs are `Arc`-shared so tests keep a handle after moving
//! the double into a pipeline.

use mediary_core::{
    BoxError, Cancellation, Contract, ContractHandler, DispatchContext, DispatchError, Middleware,
    Next,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;

/// The error produced by [`FailingHandler`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TestFailure(pub &'static str);

/// A handler that returns a fixed response and counts invocations.
pub struct CountingHandler<R> {
    /// Invocation count, shared with the test.
    pub calls: Arc<AtomicUsize>,
    /// The response returned on every call.
    pub response: R,
}

impl<R> CountingHandler<R> {
    /// Handler answering `response`, with a fresh counter.
    pub fn new(response: R) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            response,
        }
    }

    /// A handle to the invocation counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl<C> ContractHandler<C> for CountingHandler<C::Response>
where
    C: Contract,
    C::Response: Clone,
{
    async fn handle(
        &self,
        _request: &C,
        _cancellation: &Cancellation,
    ) -> Result<C::Response, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// A handler that always fails with [`TestFailure`] and counts invocations.
pub struct FailingHandler {
    /// Invocation count, shared with the test.
    pub calls: Arc<AtomicUsize>,
    /// The failure message.
    pub message: &'static str,
}

impl FailingHandler {
    /// Handler failing with `message`, with a fresh counter.
    pub fn new(message: &'static str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            message,
        }
    }

    /// A handle to the invocation counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl<C: Contract> ContractHandler<C> for FailingHandler {
    async fn handle(
        &self,
        _request: &C,
        _cancellation: &Cancellation,
    ) -> Result<C::Response, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Box::new(TestFailure(self.message)))
    }
}

/// Middleware that appends its id to a shared log before continuing.
///
/// Useful for asserting middleware execution order.
pub struct RecordingMiddleware {
    /// This middleware's id, pushed onto the log when it runs.
    pub id: usize,
    /// The shared visit log.
    pub log: Arc<Mutex<Vec<usize>>>,
}

impl RecordingMiddleware {
    /// Recording middleware writing `id` into `log`.
    pub fn new(id: usize, log: Arc<Mutex<Vec<usize>>>) -> Self {
        Self { id, log }
    }
}

impl<C: Contract> Middleware<C> for RecordingMiddleware {
    async fn handle(
        &self,
        cx: &mut DispatchContext<C>,
        next: Next<'_, C>,
    ) -> Result<(), DispatchError> {
        self.log.lock().unwrap().push(self.id);
        next.invoke(cx).await
    }
}

/// Middleware that writes a fixed response and drops its continuation,
/// short-circuiting the rest of the chain.
pub struct ShortCircuit<R> {
    /// The response written before short-circuiting.
    pub response: R,
}

impl<R> ShortCircuit<R> {
    /// Short-circuit with `response`.
    pub fn new(response: R) -> Self {
        Self { response }
    }
}

impl<C> Middleware<C> for ShortCircuit<C::Response>
where
    C: Contract,
    C::Response: Clone,
{
    async fn handle(
        &self,
        cx: &mut DispatchContext<C>,
        _next: Next<'_, C>,
    ) -> Result<(), DispatchError> {
        cx.set_response(self.response.clone());
        Ok(())
    }
}
