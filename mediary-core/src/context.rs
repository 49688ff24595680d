//! Per-dispatch state carrier.
//!
//! One [`DispatchContext`] exists per dispatch call. It is created by a
//! [`ContextFactory`] at the start of a pipeline's `handle`, mutated by
//! middleware and the delivery stage while the chain runs, and handed back to
//! the caller once the outermost stage returns. Nothing in it is shared across
//! concurrent dispatches.

use crate::contract::{Contract, ContractKind};
use crate::error::DispatchError;

/// Mutable carrier for one dispatch: the request, the eventual response, and
/// any captured fault.
///
/// All mutators are total functions over the current state; none of them
/// panics or returns an error.
///
/// # Error accumulation
///
/// The context holds at most one [`DispatchError`]. Setting a second error
/// folds both into a flattened aggregate via [`DispatchError::combine`], so a
/// fault is never silently discarded and an aggregate never nests inside
/// another aggregate.
pub struct DispatchContext<C: Contract> {
    request: C,
    kind: ContractKind,
    response: Option<C::Response>,
    error: Option<DispatchError>,
}

impl<C: Contract> DispatchContext<C> {
    /// Create a context owning `request` for the call's lifetime.
    pub fn new(request: C, kind: ContractKind) -> Self {
        Self {
            request,
            kind,
            response: None,
            error: None,
        }
    }

    /// The request being dispatched.
    pub fn request(&self) -> &C {
        &self.request
    }

    /// The contract shape this dispatch was routed as.
    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// The response, if one has been written.
    pub fn response(&self) -> Option<&C::Response> {
        self.response.as_ref()
    }

    /// The captured error, if any.
    pub fn error(&self) -> Option<&DispatchError> {
        self.error.as_ref()
    }

    /// Whether a response has been written.
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Whether a fault has been captured.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// `true` while no error is captured.
    pub fn is_success(&self) -> bool {
        !self.has_error()
    }

    /// Overwrite the response unconditionally. Passing `None` clears it.
    pub fn set_response(&mut self, response: impl Into<Option<C::Response>>) {
        self.response = response.into();
    }

    /// Capture a fault, folding into an aggregate if one is already present.
    pub fn set_error(&mut self, error: DispatchError) {
        self.error = Some(match self.error.take() {
            Some(existing) => existing.combine(error),
            None => error,
        });
    }

    /// Capture a fault without disturbing an existing response. Same
    /// accumulation as [`set_error`](DispatchContext::set_error); the separate
    /// name marks intent at guard-middleware call sites.
    pub fn add_error(&mut self, error: DispatchError) {
        self.set_error(error);
    }

    /// Explicitly discard the captured error, restoring success state.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Consume the context: the captured error if one exists, otherwise the
    /// response (which may legitimately be absent for commands and events).
    pub fn into_result(self) -> Result<Option<C::Response>, DispatchError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.response),
        }
    }
}

/// Supplies the context for each dispatch. The engine never constructs
/// contexts directly; pipelines call through this seam so hosts can substitute
/// enriched contexts.
pub trait ContextFactory<C: Contract>: Send + Sync + 'static {
    /// Create the context for one dispatch of `request`.
    fn create_context(&self, request: C) -> DispatchContext<C>;
}

/// Default factory: a plain context tagged with the contract's declared kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContextFactory;

impl<C: Contract> ContextFactory<C> for DefaultContextFactory {
    fn create_context(&self, request: C) -> DispatchContext<C> {
        DispatchContext::new(request, C::KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Contract for Probe {
        type Response = u32;
    }

    fn fault(msg: &'static str) -> DispatchError {
        DispatchError::component(std::io::Error::other(msg))
    }

    #[test]
    fn fresh_context_is_successful_and_empty() {
        let cx = DispatchContext::new(Probe, Probe::KIND);
        assert!(cx.is_success());
        assert!(!cx.has_response());
        assert!(!cx.has_error());
        assert_eq!(cx.kind(), ContractKind::Request);
    }

    #[test]
    fn set_response_overwrites_and_clears() {
        let mut cx = DispatchContext::new(Probe, Probe::KIND);
        cx.set_response(1);
        cx.set_response(2);
        assert_eq!(cx.response(), Some(&2));
        cx.set_response(None);
        assert!(!cx.has_response());
    }

    #[test]
    fn second_error_aggregates_flat() {
        let mut cx = DispatchContext::new(Probe, Probe::KIND);
        cx.set_error(fault("first"));
        cx.set_error(fault("second"));
        let members = cx.error().unwrap().flattened();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].to_string(), "first");
        assert_eq!(members[1].to_string(), "second");
    }

    #[test]
    fn aggregate_error_never_nests() {
        let mut cx = DispatchContext::new(Probe, Probe::KIND);
        cx.set_error(fault("a").combine(fault("b")));
        cx.set_error(fault("c").combine(fault("d")));
        let members = cx.error().unwrap().flattened();
        assert_eq!(members.len(), 4);
        assert!(
            members
                .iter()
                .all(|m| !matches!(m, DispatchError::Aggregate(_)))
        );
    }

    #[test]
    fn add_error_preserves_response() {
        let mut cx = DispatchContext::new(Probe, Probe::KIND);
        cx.set_response(7);
        cx.add_error(fault("late"));
        assert!(cx.has_error());
        assert_eq!(cx.response(), Some(&7));
        assert!(!cx.is_success());
    }

    #[test]
    fn clear_error_restores_success() {
        let mut cx = DispatchContext::new(Probe, Probe::KIND);
        cx.set_error(fault("oops"));
        assert!(!cx.is_success());
        cx.clear_error();
        assert!(cx.is_success());
    }

    #[test]
    fn into_result_prefers_error() {
        let mut cx = DispatchContext::new(Probe, Probe::KIND);
        cx.set_response(3);
        cx.set_error(fault("bad"));
        assert!(cx.into_result().is_err());
    }
}
