//! Error types for Mediary.
//!
//! Two disjoint families, kept apart on purpose:
//!
//! - [`RegistrationError`]: configuration mistakes (empty handler sets,
//!   duplicate pipelines). These fail fast and synchronously at construction
//!   time and are never deferred into a dispatch context.
//! - [`DispatchError`]: faults that occur while a dispatch runs. These are
//!   captured into the [`DispatchContext`](crate::DispatchContext) by the
//!   pipeline's guard stages and only become a returned error again at the
//!   mediator facade.

use thiserror::Error;

/// A boxed error type for user-supplied failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Configuration-time errors. Always surfaced synchronously, never captured
/// into a context.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// A multi-handler delivery strategy was built with no handler resolvers.
    #[error("delivery strategy requires at least one handler resolver")]
    NoHandlerResolvers,

    /// A pipeline was built without a delivery strategy.
    #[error("pipeline for `{contract}` has no delivery strategy")]
    NoDelivery {
        /// Contract type name.
        contract: &'static str,
    },

    /// A pipeline is already registered for the contract's type pair.
    #[error("a pipeline is already registered for `{contract}`")]
    DuplicatePipeline {
        /// Contract type name.
        contract: &'static str,
    },
}

/// Faults captured during a dispatch.
///
/// Accumulates via [`DispatchError::combine`]: contexts hold at most one error,
/// and a second fault folds both into a flattened [`DispatchError::Aggregate`].
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No pipeline is registered for the contract's type pair.
    #[error("no pipeline registered for contract `{contract}`")]
    NotFound {
        /// Contract type name.
        contract: &'static str,
    },

    /// A handler or middleware failed.
    #[error(transparent)]
    Component(BoxError),

    /// The dispatch was cancelled before completion.
    #[error("dispatch was cancelled")]
    Cancelled,

    /// Multiple faults from the same dispatch. Never contains a nested
    /// aggregate; [`combine`](DispatchError::combine) flattens on entry.
    #[error("{} dispatch failures", .0.len())]
    Aggregate(Vec<DispatchError>),
}

impl DispatchError {
    /// Wrap a user error as a component fault.
    pub fn component(err: impl Into<BoxError>) -> Self {
        DispatchError::Component(err.into())
    }

    /// Fold another error into this one, flattening aggregates on both sides
    /// so an aggregate never nests inside another aggregate.
    pub fn combine(self, other: DispatchError) -> DispatchError {
        let mut members = Vec::new();
        self.push_flat(&mut members);
        other.push_flat(&mut members);
        DispatchError::Aggregate(members)
    }

    /// Collapse a batch of errors into one, preserving flattening. Returns
    /// `None` for an empty batch and the sole member unchanged for a batch of
    /// one.
    pub fn aggregate(errors: Vec<DispatchError>) -> Option<DispatchError> {
        let mut members = Vec::new();
        for err in errors {
            err.push_flat(&mut members);
        }
        match members.len() {
            0 => None,
            1 => members.pop(),
            _ => Some(DispatchError::Aggregate(members)),
        }
    }

    /// View the flattened member list: the aggregate's members, or `self` as a
    /// single-element slice view.
    pub fn flattened(&self) -> Vec<&DispatchError> {
        match self {
            DispatchError::Aggregate(members) => members.iter().collect(),
            other => vec![other],
        }
    }

    fn push_flat(self, out: &mut Vec<DispatchError>) {
        match self {
            DispatchError::Aggregate(members) => out.extend(members),
            other => out.push(other),
        }
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Component(err)
    }
}
