//! # mediary - In-Process Contract Dispatch
//!
//! `mediary` routes typed contract objects - requests, commands, and events -
//! through an ordered chain of cross-cutting middleware to the handler(s)
//! registered for the contract's exact (request type, response type) pair,
//! then hands back the result or the captured failure without throwing.
//!
//! ## Quick Start
//!
//! ```rust
//! use mediary::{
//!     BoxError, Cancellation, Contract, ContractHandler, InvocationPipeline, Mediator,
//!     PipelineRegistry,
//! };
//!
//! struct Ping {
//!     seq: u32,
//! }
//!
//! impl Contract for Ping {
//!     type Response = u32;
//! }
//!
//! struct Echo;
//!
//! impl ContractHandler<Ping> for Echo {
//!     async fn handle(&self, request: &Ping, _cancellation: &Cancellation) -> Result<u32, BoxError> {
//!         Ok(request.seq)
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = PipelineRegistry::builder()
//!     .register(InvocationPipeline::builder().handler(Echo).build()?)?
//!     .build();
//! let mediator = Mediator::new(registry);
//!
//! assert_eq!(mediator.execute(Ping { seq: 7 }).await?, 7);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Contract** ([`Contract`], [`ContractKind`]) - the dispatched value and
//!   its shape (request / command / event).
//! - **Pipeline** ([`InvocationPipeline`]) - the composed, cached call chain
//!   for one contract type: framework guards, ordered user middleware, and a
//!   delivery strategy. Built once, reused for every dispatch.
//! - **Delivery** ([`delivery`]) - how many handlers run and in what
//!   concurrency mode (single, sequential, parallel).
//! - **Registry** ([`PipelineRegistry`]) - type-token keyed lookup from
//!   contract to pipeline.
//! - **Mediator** ([`Mediator`]) - the facade: lookup, dispatch, no-op
//!   fallback for unrouted contracts, and error re-raising on
//!   [`execute`](Mediator::execute).
//!
//! Faults never escape the chain as errors: the pipeline's guard stages
//! capture them into the [`DispatchContext`], and only
//! [`Mediator::execute`] turns a captured error back into an `Err`.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod delivery;
mod macros;
mod mediator;
pub mod middleware;
mod noop;
mod pipeline;
mod registry;
pub mod testing;

pub use mediary_core::{
    // Cancellation
    Cancellation,
    ChainStage,
    // Contract model
    CommandReceipt,
    // Resolvers
    ComponentResolver,
    // Context
    ContextFactory,
    Contract,
    // Handler
    ContractHandler,
    ContractKind,
    DefaultContextFactory,
    DispatchContext,
    // Errors
    DispatchError,
    DynContractHandler,
    DynMiddleware,
    EventReceipt,
    HandlerResolver,
    // Middleware / chain
    Middleware,
    MiddlewareResolver,
    Next,
    RegistrationError,
};

pub use mediary_core::BoxError;

pub use mediator::Mediator;
pub use noop::{NoopPipeline, NoopPipelineCache};
pub use pipeline::{ErrorCapture, InvocationPipeline, MiddlewareItem, PipelineBuilder};
pub use registry::{PipelineKey, PipelineRegistry, RegistryBuilder};

/// Prelude module - common imports for Mediary.
///
/// # Usage
///
/// ```rust,ignore
/// use mediary::prelude::*;
/// ```
pub mod prelude {
    pub use crate::delivery::{ParallelDelivery, SequentialDelivery, SingleDelivery};
    pub use crate::{
        BoxError, Cancellation, CommandReceipt, ComponentResolver, Contract, ContractHandler,
        ContractKind, DispatchContext, DispatchError, EventReceipt, InvocationPipeline, Mediator,
        Middleware, Next, PipelineRegistry, RegistrationError,
    };
}
