//! The invocation pipeline: one composed, cached call chain per contract type.
//!
//! A pipeline is fixed to a single (request, response) type pair through its
//! generic parameter. It owns the context factory, the two framework guard
//! resolvers, the ordered user middleware, and the delivery strategy; the
//! composed stage list is built lazily on first dispatch and reused for every
//! dispatch after that.
//!
//! Chain layout, outermost first:
//!
//! ```text
//! pre-pipeline guard → user middleware (by order, then registration) →
//! pre-handler guard → delivery strategy
//! ```
//!
//! Both guards default to [`ErrorCapture`]. Wrapping at both ends is what
//! makes the "never throws" contract hold: a fault in user middleware is
//! caught by the outer guard, a fault in the delivery stage by the inner one,
//! so `handle` always returns a well-formed context.

mod chain;

pub use chain::{ErrorCapture, MiddlewareItem};

use crate::delivery::{ParallelDelivery, SequentialDelivery, SingleDelivery};
use chain::MiddlewareStage;
use mediary_core::{
    Cancellation, ChainStage, ComponentResolver, ContextFactory, Contract, ContractHandler,
    DefaultContextFactory, DispatchContext, DispatchError, DynMiddleware, HandlerResolver,
    Middleware, MiddlewareResolver, Next, RegistrationError,
};
use std::sync::{Arc, OnceLock};

/// The composed call chain for one contract type.
///
/// Built by [`PipelineBuilder`]; immutable afterwards. Safe for concurrent
/// dispatches: every call gets a fresh context, and the only cross-call state
/// is the one-time chain construction and any deferred resolver's one-time
/// initialization.
pub struct InvocationPipeline<C: Contract> {
    context_factory: Arc<dyn ContextFactory<C>>,
    pre_pipeline: Arc<MiddlewareResolver<C>>,
    pre_handler: Arc<MiddlewareResolver<C>>,
    items: Vec<MiddlewareItem<C>>,
    delivery: Arc<dyn DynMiddleware<C>>,
    chain: OnceLock<Vec<Arc<dyn ChainStage<C>>>>,
}

impl<C: Contract> InvocationPipeline<C> {
    /// Start configuring a pipeline for contract type `C`.
    pub fn builder() -> PipelineBuilder<C> {
        PipelineBuilder::new()
    }

    /// Dispatch one request through the chain.
    ///
    /// Always returns the context, never an error: faults are captured inside
    /// it. The chain is composed on the first call and reused afterwards.
    pub async fn handle(&self, request: C, cancellation: &Cancellation) -> DispatchContext<C> {
        let chain = self.chain.get_or_init(|| self.build_chain());
        let mut cx = self.context_factory.create_context(request);
        // The outermost guard already captures; this covers a caller-supplied
        // pre-pipeline resolver that does not.
        if let Err(err) = Next::new(chain, cancellation).invoke(&mut cx).await {
            cx.add_error(err);
        }
        cx
    }

    fn build_chain(&self) -> Vec<Arc<dyn ChainStage<C>>> {
        let mut ordered: Vec<&MiddlewareItem<C>> = self.items.iter().collect();
        ordered.sort_by_key(|item| item.sort_key());

        let mut stages: Vec<Arc<dyn ChainStage<C>>> = Vec::with_capacity(ordered.len() + 3);
        stages.push(Arc::new(MiddlewareStage::new(Arc::clone(
            &self.pre_pipeline,
        ))));
        for item in ordered {
            stages.push(Arc::new(MiddlewareStage::new(Arc::clone(item.resolver()))));
        }
        stages.push(Arc::new(MiddlewareStage::new(Arc::clone(&self.pre_handler))));
        stages.push(Arc::new(MiddlewareStage::new(Arc::new(
            ComponentResolver::instance(Arc::clone(&self.delivery)),
        ))));
        stages
    }
}

/// Configuration-time assembly of an [`InvocationPipeline`].
///
/// Middleware registers with an `order` (lower runs earlier, closer to the
/// caller); equal orders keep registration sequence. Exactly one delivery
/// strategy must be supplied before [`build`](PipelineBuilder::build).
pub struct PipelineBuilder<C: Contract> {
    context_factory: Arc<dyn ContextFactory<C>>,
    pre_pipeline: Arc<MiddlewareResolver<C>>,
    pre_handler: Arc<MiddlewareResolver<C>>,
    items: Vec<MiddlewareItem<C>>,
    next_sequence: usize,
    delivery: Option<Arc<dyn DynMiddleware<C>>>,
}

impl<C: Contract> PipelineBuilder<C> {
    /// Builder with the default context factory and [`ErrorCapture`] guards.
    pub fn new() -> Self {
        Self {
            context_factory: Arc::new(DefaultContextFactory),
            pre_pipeline: Arc::new(ComponentResolver::instance(Arc::new(ErrorCapture))),
            pre_handler: Arc::new(ComponentResolver::instance(Arc::new(ErrorCapture))),
            items: Vec::new(),
            next_sequence: 0,
            delivery: None,
        }
    }

    /// Substitute the context factory.
    pub fn context_factory(mut self, factory: impl ContextFactory<C>) -> Self {
        self.context_factory = Arc::new(factory);
        self
    }

    /// Substitute the outermost framework guard's resolver.
    pub fn pre_pipeline_resolver(mut self, resolver: MiddlewareResolver<C>) -> Self {
        self.pre_pipeline = Arc::new(resolver);
        self
    }

    /// Substitute the innermost framework guard's resolver.
    pub fn pre_handler_resolver(mut self, resolver: MiddlewareResolver<C>) -> Self {
        self.pre_handler = Arc::new(resolver);
        self
    }

    /// Register middleware at order 0.
    pub fn middleware(self, middleware: impl Middleware<C>) -> Self {
        self.middleware_with_order(middleware, 0)
    }

    /// Register middleware at an explicit order.
    pub fn middleware_with_order(self, middleware: impl Middleware<C>, order: i32) -> Self {
        self.middleware_resolver(ComponentResolver::instance(Arc::new(middleware)), order)
    }

    /// Register middleware through an explicit resolver, for non-instance
    /// lifetimes.
    pub fn middleware_resolver(mut self, resolver: MiddlewareResolver<C>, order: i32) -> Self {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.items
            .push(MiddlewareItem::new(Arc::new(resolver), order, sequence));
        self
    }

    /// Single-handler delivery around a plain handler value.
    pub fn handler(self, handler: impl ContractHandler<C>) -> Self {
        self.handler_resolver(ComponentResolver::instance(Arc::new(handler)))
    }

    /// Single-handler delivery around an explicit resolver.
    pub fn handler_resolver(mut self, resolver: HandlerResolver<C>) -> Self {
        self.delivery = Some(Arc::new(SingleDelivery::new(resolver)));
        self
    }

    /// Sequential multi-handler delivery. Rejects an empty set.
    pub fn sequential_handlers(
        mut self,
        resolvers: Vec<HandlerResolver<C>>,
    ) -> Result<Self, RegistrationError> {
        self.delivery = Some(Arc::new(SequentialDelivery::new(resolvers)?));
        Ok(self)
    }

    /// Parallel multi-handler delivery. Rejects an empty set.
    pub fn parallel_handlers(
        mut self,
        resolvers: Vec<HandlerResolver<C>>,
    ) -> Result<Self, RegistrationError> {
        self.delivery = Some(Arc::new(ParallelDelivery::new(resolvers)?));
        Ok(self)
    }

    /// Supply a custom terminal stage in place of the stock strategies.
    pub fn delivery(mut self, delivery: impl Middleware<C>) -> Self {
        self.delivery = Some(Arc::new(delivery));
        self
    }

    /// Freeze the configuration. Fails fast if no delivery strategy was
    /// supplied.
    pub fn build(self) -> Result<InvocationPipeline<C>, RegistrationError> {
        let delivery = self
            .delivery
            .ok_or(RegistrationError::NoDelivery {
                contract: C::name(),
            })?;
        Ok(InvocationPipeline {
            context_factory: self.context_factory,
            pre_pipeline: self.pre_pipeline,
            pre_handler: self.pre_handler,
            items: self.items,
            delivery,
            chain: OnceLock::new(),
        })
    }
}

impl<C: Contract> Default for PipelineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
