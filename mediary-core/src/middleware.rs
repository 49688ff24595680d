//! Middleware and the chain-of-responsibility driver.
//!
//! A pipeline's call chain is an explicit ordered list of [`ChainStage`]
//! objects. The driver is [`Next`]: invoking stage *i* hands it a `Next`
//! holding stages *i+1..*, so each stage decides whether (and when) the rest
//! of the chain runs. There is no closure nesting; every stage is inspectable
//! and testable on its own.
//!
//! User middleware implements [`Middleware`] with native `async fn`; the
//! chain stores stages object-safely, so a [`DynMiddleware`] mirror with a
//! blanket impl bridges the two, the same split used for handlers.

use crate::cancellation::Cancellation;
use crate::context::DispatchContext;
use crate::contract::Contract;
use crate::error::DispatchError;
use std::sync::Arc;
use std::{future::Future, pin::Pin};

/// A cross-cutting stage wrapped around the delivery of one contract type.
///
/// Middleware runs outward-in, then inward-out: code before `next.invoke(cx)`
/// sees the request on the way down, code after it sees the mutated context on
/// the way back up. Not invoking `next` at all is legal and short-circuits the
/// rest of the chain, leaving whatever response or error this middleware set.
///
/// Returned errors do not cross stage boundaries: the pipeline's guard stages
/// capture them into the context.
///
/// # Example
///
/// ```rust
/// use mediary_core::{Contract, DispatchContext, DispatchError, Middleware, Next};
///
/// struct Ping;
///
/// impl Contract for Ping {
///     type Response = u32;
/// }
///
/// struct Defaulting;
///
/// impl Middleware<Ping> for Defaulting {
///     async fn handle(
///         &self,
///         cx: &mut DispatchContext<Ping>,
///         next: Next<'_, Ping>,
///     ) -> Result<(), DispatchError> {
///         next.invoke(cx).await?;
///         if !cx.has_response() {
///             cx.set_response(0);
///         }
///         Ok(())
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Middleware<{C}>`",
    label = "missing `Middleware` implementation",
    note = "Middleware must implement `handle` for the specific contract type `{C}`."
)]
pub trait Middleware<C: Contract>: Send + Sync + 'static {
    /// Run this stage. The cancellation token for the dispatch is available
    /// as [`Next::cancellation`] and must be forwarded untouched.
    fn handle(
        &self,
        cx: &mut DispatchContext<C>,
        next: Next<'_, C>,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// Object-safe mirror of [`Middleware`], used for stage storage.
pub trait DynMiddleware<C: Contract>: Send + Sync + 'static {
    /// Type-erased [`Middleware::handle`].
    fn handle_dyn<'a>(
        &'a self,
        cx: &'a mut DispatchContext<C>,
        next: Next<'a, C>,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + 'a>>;
}

impl<C: Contract, M: Middleware<C>> DynMiddleware<C> for M {
    fn handle_dyn<'a>(
        &'a self,
        cx: &'a mut DispatchContext<C>,
        next: Next<'a, C>,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + 'a>> {
        Box::pin(self.handle(cx, next))
    }
}

/// One slot in a built chain. Pipelines produce these; the driver only ever
/// calls `invoke`.
pub trait ChainStage<C: Contract>: Send + Sync + 'static {
    /// Run the stage against the context, with `next` holding the chain tail.
    fn invoke<'a>(
        &'a self,
        cx: &'a mut DispatchContext<C>,
        next: Next<'a, C>,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + 'a>>;
}

/// Continuation over the remaining stages of a chain.
///
/// Consumed on use: a stage may invoke its continuation at most once, or drop
/// it to short-circuit. Also carries the dispatch's cancellation token so the
/// same token reaches every stage without restating it in signatures.
pub struct Next<'a, C: Contract> {
    stages: &'a [Arc<dyn ChainStage<C>>],
    cancellation: &'a Cancellation,
}

impl<'a, C: Contract> Next<'a, C> {
    /// Continuation over `stages`, carrying `cancellation` to each of them.
    pub fn new(stages: &'a [Arc<dyn ChainStage<C>>], cancellation: &'a Cancellation) -> Self {
        Self {
            stages,
            cancellation,
        }
    }

    /// The dispatch's advisory cancellation token.
    pub fn cancellation(&self) -> &'a Cancellation {
        self.cancellation
    }

    /// Number of stages left after this point.
    pub fn remaining(&self) -> usize {
        self.stages.len()
    }

    /// Run the next stage, handing it a continuation over the rest. A fully
    /// consumed chain is a successful no-op.
    pub async fn invoke(self, cx: &mut DispatchContext<C>) -> Result<(), DispatchError> {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                stage
                    .invoke(cx, Next::new(rest, self.cancellation))
                    .await
            }
            None => Ok(()),
        }
    }
}
