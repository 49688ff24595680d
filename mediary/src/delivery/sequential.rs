use mediary_core::{
    Contract, DispatchContext, DispatchError, DynContractHandler as _, HandlerResolver, Middleware,
    Next, RegistrationError,
};

/// Delivers to an ordered set of handlers, one at a time.
///
/// Each handler is awaited before the next is resolved; each successive
/// response overwrites the previous one in the context (last writer wins). The
/// first failing handler stops the walk and its error is raised to the guard
/// stage; later handlers do not run.
pub struct SequentialDelivery<C: Contract> {
    resolvers: Vec<HandlerResolver<C>>,
}

impl<C: Contract> SequentialDelivery<C> {
    /// Strategy over `resolvers` in execution order.
    ///
    /// An empty set is a configuration error and fails here, never at
    /// dispatch time.
    pub fn new(resolvers: Vec<HandlerResolver<C>>) -> Result<Self, RegistrationError> {
        if resolvers.is_empty() {
            return Err(RegistrationError::NoHandlerResolvers);
        }
        Ok(Self { resolvers })
    }
}

impl<C: Contract> Middleware<C> for SequentialDelivery<C> {
    async fn handle(
        &self,
        cx: &mut DispatchContext<C>,
        next: Next<'_, C>,
    ) -> Result<(), DispatchError> {
        let cancellation = next.cancellation();
        for resolver in &self.resolvers {
            let handler = resolver.resolve();
            let outcome = handler.handle_dyn(cx.request(), cancellation).await;
            match outcome {
                Ok(response) => cx.set_response(response),
                Err(err) => return Err(DispatchError::Component(err)),
            }
        }
        Ok(())
    }
}
