use futures::future::join_all;
use mediary_core::{
    Contract, DispatchContext, DispatchError, DynContractHandler as _, HandlerResolver, Middleware,
    Next, RegistrationError,
};

/// Delivers to all handlers concurrently.
///
/// Every resolver is resolved before any handler starts, and every handler
/// future is launched before any is awaited, so one handler failing cannot
/// keep a sibling from being resolved or started. Failures are collected once
/// the whole set has completed and surface as a single flattened aggregate
/// (or the lone error itself when only one handler failed).
///
/// Completion order between handlers is unspecified; successful responses
/// overwrite the context in resolver order.
pub struct ParallelDelivery<C: Contract> {
    resolvers: Vec<HandlerResolver<C>>,
}

impl<C: Contract> ParallelDelivery<C> {
    /// Strategy over `resolvers`, all launched per dispatch.
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

impl<C: Contract> Middleware<C> for ParallelDelivery<C> {
    async fn handle(
        &self,
        cx: &mut DispatchContext<C>,
        next: Next<'_, C>,
    ) -> Result<(), DispatchError> {
        let cancellation = next.cancellation();
        let handlers: Vec<_> = self.resolvers.iter().map(|r| r.resolve()).collect();
        let results = {
            let request = cx.request();
            join_all(
                handlers
                    .iter()
                    .map(|handler| handler.handle_dyn(request, cancellation)),
            )
            .await
        };
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(response) => cx.set_response(response),
                Err(err) => failures.push(DispatchError::Component(err)),
            }
        }
        match DispatchError::aggregate(failures) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_resolver_set_is_rejected() {
        struct Probe;
        impl Contract for Probe {
            type Response = ();
        }

        let result = ParallelDelivery::<Probe>::new(Vec::new());
        assert!(matches!(result, Err(RegistrationError::NoHandlerResolvers)));
    }
}
