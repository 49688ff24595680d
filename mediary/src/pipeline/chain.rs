//! Stage objects for the built chain.

use mediary_core::{
    ChainStage, Contract, DispatchContext, DispatchError, DynMiddleware as _, Middleware,
    MiddlewareResolver, Next,
};
use std::sync::Arc;
use std::{future::Future, pin::Pin};

/// A registered user middleware: its resolver plus the two sort keys.
///
/// `order` is caller-chosen (lower runs closer to the caller); `sequence` is
/// the registration index, which breaks ties so equal orders keep their
/// registration ordering.
pub struct MiddlewareItem<C: Contract> {
    resolver: Arc<MiddlewareResolver<C>>,
    order: i32,
    sequence: usize,
}

impl<C: Contract> MiddlewareItem<C> {
    pub(crate) fn new(resolver: Arc<MiddlewareResolver<C>>, order: i32, sequence: usize) -> Self {
        Self {
            resolver,
            order,
            sequence,
        }
    }

    pub(crate) fn sort_key(&self) -> (i32, usize) {
        (self.order, self.sequence)
    }

    pub(crate) fn resolver(&self) -> &Arc<MiddlewareResolver<C>> {
        &self.resolver
    }
}

/// Chain slot that resolves its middleware per dispatch and runs it.
///
/// Resolution happens inside `invoke`, so transient resolvers observe one
/// factory call per dispatch while deferred resolvers still initialize once.
pub(crate) struct MiddlewareStage<C: Contract> {
    resolver: Arc<MiddlewareResolver<C>>,
}

impl<C: Contract> MiddlewareStage<C> {
    pub(crate) fn new(resolver: Arc<MiddlewareResolver<C>>) -> Self {
        Self { resolver }
    }
}

impl<C: Contract> ChainStage<C> for MiddlewareStage<C> {
    fn invoke<'a>(
        &'a self,
        cx: &'a mut DispatchContext<C>,
        next: Next<'a, C>,
    ) -> Pin<Box<dyn Future<Output = Result<(), DispatchError>> + Send + 'a>> {
        Box::pin(async move {
            let middleware = self.resolver.resolve();
            middleware.handle_dyn(cx, next).await
        })
    }
}

/// Framework guard middleware: converts an error escaping its continuation
/// into a captured context error.
///
/// A pipeline injects this at two positions. The *pre-pipeline* instance sits
/// outermost, so a fault in any user middleware is captured; the *pre-handler*
/// instance sits just inside the user chain, so a fault in the delivery stage
/// is captured before user middleware observes the context on the way back
/// out. Between the two, no error ever crosses a stage boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorCapture;

impl<C: Contract> Middleware<C> for ErrorCapture {
    async fn handle(
        &self,
        cx: &mut DispatchContext<C>,
        next: Next<'_, C>,
    ) -> Result<(), DispatchError> {
        if let Err(err) = next.invoke(cx).await {
            cx.add_error(err);
        }
        Ok(())
    }
}
