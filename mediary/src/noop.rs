//! Fallback pipeline for contracts with no registered pipeline.
//!
//! Every dispatch returns a well-formed context, even to an unknown contract.
//! For events the miss is legitimate (zero subscribers is a valid fan-out) and
//! the context comes back clean; for requests and commands the context carries
//! a [`DispatchError::NotFound`] instead of anything being thrown.

use crate::registry::PipelineKey;
use mediary_core::{ContextFactory, Contract, DefaultContextFactory, DispatchContext,
    DispatchError};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Terminal fallback for one contract type: no middleware, no handlers.
pub struct NoopPipeline<C: Contract> {
    context_factory: Arc<dyn ContextFactory<C>>,
}

impl<C: Contract> NoopPipeline<C> {
    /// Fallback pipeline using the default context factory.
    pub fn new() -> Self {
        Self {
            context_factory: Arc::new(DefaultContextFactory),
        }
    }

    /// Produce the context for an unrouted dispatch.
    pub fn handle(&self, request: C) -> DispatchContext<C> {
        let mut cx = self.context_factory.create_context(request);
        if !cx.kind().is_event() {
            cx.set_error(DispatchError::NotFound {
                contract: C::name(),
            });
        }
        cx
    }
}

impl<C: Contract> Default for NoopPipeline<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazily synthesized, cached fallback pipelines, one per contract type pair.
///
/// The cache is written at most once per pair; afterwards lookups are
/// read-locked clones of the stored `Arc`.
#[derive(Default)]
pub struct NoopPipelineCache {
    cache: RwLock<HashMap<PipelineKey, Arc<dyn Any + Send + Sync>>>,
}

impl NoopPipelineCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fallback pipeline for `C`, synthesizing it on first request.
    pub fn resolve<C: Contract>(&self) -> Arc<NoopPipeline<C>> {
        let key = PipelineKey::of::<C>();
        if let Some(cached) = self
            .cache
            .read()
            .expect("noop pipeline cache poisoned")
            .get(&key)
        {
            return Arc::clone(cached)
                .downcast()
                .expect("noop pipeline cached under mismatched key");
        }
        let mut cache = self.cache.write().expect("noop pipeline cache poisoned");
        let entry = cache
            .entry(key)
            .or_insert_with(|| Arc::new(NoopPipeline::<C>::new()));
        Arc::clone(entry)
            .downcast()
            .expect("noop pipeline cached under mismatched key")
    }
}
