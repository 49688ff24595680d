//! Contract shapes for dispatch.
//!
//! Every value submitted to the mediator is a *contract*. Three shapes exist,
//! discriminated by [`ContractKind`] rather than by marker-type identity:
//!
//! - **Request**: expects a meaningful response value.
//! - **Command**: fire-and-confirm, response is the [`CommandReceipt`] sentinel.
//! - **Event**: fan-out to zero or more subscribers, response is [`EventReceipt`].
//!
//! The kind travels with the pipeline and the per-call context, so routing and
//! fallback behavior never rely on runtime type inspection beyond the interned
//! [`TypeId`](std::any::TypeId) tokens used as registry keys.

/// Discriminates the three contract shapes.
///
/// Carried alongside each pipeline and [`DispatchContext`](crate::DispatchContext);
/// the no-op fallback pipeline uses it to decide whether a routing miss is an
/// error (requests, commands) or a legitimate empty result (events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// A request with a meaningful response value.
    Request,
    /// A state-changing operation with no meaningful response.
    Command,
    /// A notification with zero or more independent subscribers.
    Event,
}

impl ContractKind {
    /// Whether this kind tolerates having no registered pipeline.
    pub fn is_event(self) -> bool {
        matches!(self, ContractKind::Event)
    }
}

/// A value type that can be submitted for dispatch.
///
/// The associated `Response` type and the contract kind together identify the
/// pipeline a value routes to. The default kind is [`ContractKind::Request`];
/// commands and events override it and fix their response to the matching
/// receipt sentinel.
///
/// # Example
///
/// ```rust
/// use mediary_core::{Contract, ContractKind, CommandReceipt};
///
/// struct Ping {
///     pub seq: u32,
/// }
///
/// impl Contract for Ping {
///     type Response = String;
/// }
///
/// struct Shutdown;
///
/// impl Contract for Shutdown {
///     type Response = CommandReceipt;
///     const KIND: ContractKind = ContractKind::Command;
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatchable contract",
    label = "missing `Contract` implementation",
    note = "Declare the response type (and kind, for commands/events) via `impl Contract`."
)]
pub trait Contract: Send + Sync + 'static {
    /// The response value this contract resolves to.
    type Response: Send + Sync + 'static;

    /// The contract shape. Defaults to a plain request.
    const KIND: ContractKind = ContractKind::Request;

    /// Human-readable contract name, used in routing-miss errors.
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Sentinel response for commands: the operation completed, nothing to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandReceipt;

/// Sentinel response for events: delivery finished, subscriber count unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventReceipt;
