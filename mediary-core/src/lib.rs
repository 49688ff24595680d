//! # mediary-core
//!
//! Core traits and types for the Mediary in-process dispatch library.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! extensions (custom middleware, context factories, handler packs) that do
//! not need the full `mediary` orchestration crate.
//!
//! # Anatomy of a dispatch
//!
//! A dispatch routes one **contract** (a plain value whose [`Contract`] impl
//! declares its response type and [`ContractKind`]) through four pieces:
//!
//! - [`DispatchContext`]: the per-call mutable carrier. Owns the request,
//!   collects the response and any captured fault. One per call, never shared.
//! - [`ComponentResolver`]: lifetime-scoped supply of handlers and middleware
//!   (fixed instance, deferred singleton, or transient per call).
//! - [`Middleware`] / [`ChainStage`] / [`Next`]: the chain of responsibility.
//!   The chain is an explicit stage list; [`Next`] is the driver that runs
//!   stage *i* with a continuation over stages *i+1..*.
//! - [`ContractHandler`]: the terminal business-logic endpoint.
//!
//! Faults never cross a stage boundary as errors: the orchestration crate's
//! guard stages fold them into the context via [`DispatchContext::add_error`],
//! which aggregates (flattening) when more than one fault occurs.
//!
//! # Error types
//!
//! - [`DispatchError`]: faults captured during a dispatch
//! - [`RegistrationError`]: configuration mistakes, surfaced fail-fast

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod cancellation;
mod context;
mod contract;
mod error;
mod handler;
mod middleware;
mod resolver;

pub use cancellation::Cancellation;
pub use context::{ContextFactory, DefaultContextFactory, DispatchContext};
pub use contract::{CommandReceipt, Contract, ContractKind, EventReceipt};
pub use error::{BoxError, DispatchError, RegistrationError};
pub use handler::{ContractHandler, DynContractHandler};
pub use middleware::{ChainStage, DynMiddleware, Middleware, Next};
pub use resolver::ComponentResolver;

/// Resolver supplying handlers for contract type `C`.
pub type HandlerResolver<C> = ComponentResolver<dyn DynContractHandler<C>>;

/// Resolver supplying middleware for contract type `C`.
pub type MiddlewareResolver<C> = ComponentResolver<dyn DynMiddleware<C>>;
