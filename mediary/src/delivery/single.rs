use mediary_core::{
    Contract, DispatchContext, DispatchError, DynContractHandler as _, HandlerResolver, Middleware,
    Next,
};

/// Delivers to exactly one handler and records its response.
///
/// The handler is resolved per dispatch, so its resolver's lifetime policy
/// (instance, deferred, transient) is honored on every call.
pub struct SingleDelivery<C: Contract> {
    resolver: HandlerResolver<C>,
}

impl<C: Contract> SingleDelivery<C> {
    /// Strategy around a single handler resolver.
    pub fn new(resolver: HandlerResolver<C>) -> Self {
        Self { resolver }
    }
}

impl<C: Contract> Middleware<C> for SingleDelivery<C> {
    async fn handle(
        &self,
        cx: &mut DispatchContext<C>,
        next: Next<'_, C>,
    ) -> Result<(), DispatchError> {
        let cancellation = next.cancellation();
        let handler = self.resolver.resolve();
        let outcome = handler.handle_dyn(cx.request(), cancellation).await;
        match outcome {
            Ok(response) => {
                cx.set_response(response);
                Ok(())
            }
            Err(err) => Err(DispatchError::Component(err)),
        }
    }
}
