//! Terminal business-logic endpoints.
//!
//! A [`ContractHandler`] is the final destination of a pipeline: it receives
//! the request by reference (the [`DispatchContext`](crate::DispatchContext)
//! keeps ownership for the whole call) and produces the contract's response.
//!
//! The trait uses native `async fn` for static dispatch; delivery strategies,
//! which store handlers behind resolvers, go through the object-safe
//! [`DynContractHandler`] mirror instead.

use crate::cancellation::Cancellation;
use crate::contract::Contract;
use crate::error::BoxError;
use std::{future::Future, pin::Pin};

/// Handles one contract type, producing its response.
///
/// Faults are returned as [`BoxError`]; the pipeline's guard stages capture
/// them into the context rather than letting them cross stage boundaries.
///
/// # Example
///
/// ```rust
/// use mediary_core::{BoxError, Cancellation, Contract, ContractHandler};
///
/// struct Ping {
///     seq: u32,
/// }
///
/// impl Contract for Ping {
///     type Response = u32;
/// }
///
/// struct Echo;
///
/// impl ContractHandler<Ping> for Echo {
///     async fn handle(&self, request: &Ping, _cancellation: &Cancellation) -> Result<u32, BoxError> {
///         Ok(request.seq)
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle contracts of type `{C}`",
    label = "missing `ContractHandler<{C}>` implementation",
    note = "Handlers must implement `handle` for the specific contract type `{C}`."
)]
pub trait ContractHandler<C: Contract>: Send + Sync + 'static {
    /// Execute the handler. The cancellation token is advisory; long-running
    /// handlers should poll it.
    fn handle(
        &self,
        request: &C,
        cancellation: &Cancellation,
    ) -> impl Future<Output = Result<C::Response, BoxError>> + Send;
}

/// Object-safe mirror of [`ContractHandler`], used wherever handlers are
/// stored behind resolvers.
pub trait DynContractHandler<C: Contract>: Send + Sync + 'static {
    /// Type-erased [`ContractHandler::handle`].
    fn handle_dyn<'a>(
        &'a self,
        request: &'a C,
        cancellation: &'a Cancellation,
    ) -> Pin<Box<dyn Future<Output = Result<C::Response, BoxError>> + Send + 'a>>;
}

impl<C: Contract, H: ContractHandler<C>> DynContractHandler<C> for H {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a C,
        cancellation: &'a Cancellation,
    ) -> Pin<Box<dyn Future<Output = Result<C::Response, BoxError>> + Send + 'a>> {
        Box::pin(self.handle(request, cancellation))
    }
}

// Closure handlers: the future may not borrow from the request, so closures
// copy what they need before going async.
impl<C, F, Fut> ContractHandler<C> for F
where
    C: Contract,
    F: Fn(&C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<C::Response, BoxError>> + Send + 'static,
{
    fn handle(
        &self,
        request: &C,
        _cancellation: &Cancellation,
    ) -> impl Future<Output = Result<C::Response, BoxError>> + Send {
        (self)(request)
    }
}
