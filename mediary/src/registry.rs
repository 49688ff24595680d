//! Type-token keyed pipeline storage.
//!
//! Pipelines are keyed by the interned [`PipelineKey`], the `TypeId` pair of
//! the request type and its declared response type, and stored type-erased.
//! Lookup downcasts back to the concrete `InvocationPipeline<C>`; a key match
//! guarantees the downcast succeeds, so routing needs no runtime reflection
//! beyond the token comparison itself.
//!
//! Registration happens once, at configuration time, through
//! [`RegistryBuilder`]; the built [`PipelineRegistry`] is immutable and safe
//! to share behind an `Arc`.

use crate::pipeline::InvocationPipeline;
use mediary_core::{Contract, RegistrationError};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Interned identity of one (request type, response type) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    request: TypeId,
    response: TypeId,
}

impl PipelineKey {
    /// The key for contract type `C`.
    pub fn of<C: Contract>() -> Self {
        Self {
            request: TypeId::of::<C>(),
            response: TypeId::of::<C::Response>(),
        }
    }
}

/// Immutable lookup table from contract type pair to pipeline.
pub struct PipelineRegistry {
    pipelines: HashMap<PipelineKey, Arc<dyn Any + Send + Sync>>,
}

impl PipelineRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The pipeline registered for `C`, if any.
    pub fn lookup<C: Contract>(&self) -> Option<Arc<InvocationPipeline<C>>> {
        let entry = self.pipelines.get(&PipelineKey::of::<C>())?;
        Some(
            Arc::clone(entry)
                .downcast()
                .expect("pipeline registered under mismatched key"),
        )
    }

    /// Whether a pipeline is registered for `C`.
    pub fn contains<C: Contract>(&self) -> bool {
        self.pipelines.contains_key(&PipelineKey::of::<C>())
    }

    /// Number of registered pipelines.
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

/// Configuration-time registration surface.
///
/// Call [`register`](RegistryBuilder::register) once per contract type, then
/// [`build`](RegistryBuilder::build) to freeze the table.
#[derive(Default)]
pub struct RegistryBuilder {
    pipelines: HashMap<PipelineKey, Arc<dyn Any + Send + Sync>>,
}

impl RegistryBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the pipeline for contract type `C`.
    ///
    /// Registering the same type pair twice is a configuration error and
    /// fails fast.
    pub fn register<C: Contract>(
        mut self,
        pipeline: InvocationPipeline<C>,
    ) -> Result<Self, RegistrationError> {
        let key = PipelineKey::of::<C>();
        if self.pipelines.contains_key(&key) {
            return Err(RegistrationError::DuplicatePipeline {
                contract: C::name(),
            });
        }
        self.pipelines.insert(key, Arc::new(pipeline));
        Ok(self)
    }

    /// Freeze the lookup table.
    pub fn build(self) -> PipelineRegistry {
        PipelineRegistry {
            pipelines: self.pipelines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;
    impl Contract for Ping {
        type Response = u32;
    }

    struct One;
    impl mediary_core::ContractHandler<Ping> for One {
        async fn handle(
            &self,
            _request: &Ping,
            _cancellation: &mediary_core::Cancellation,
        ) -> Result<u32, mediary_core::BoxError> {
            Ok(1)
        }
    }

    fn pipeline() -> InvocationPipeline<Ping> {
        InvocationPipeline::builder().handler(One).build().unwrap()
    }

    #[test]
    fn lookup_finds_registered_pipeline() {
        let registry = PipelineRegistry::builder()
            .register(pipeline())
            .unwrap()
            .build();
        assert!(registry.contains::<Ping>());
        assert!(registry.lookup::<Ping>().is_some());
    }

    #[test]
    fn duplicate_registration_fails_fast() {
        let result = PipelineRegistry::builder()
            .register(pipeline())
            .unwrap()
            .register(pipeline());
        assert!(matches!(
            result,
            Err(RegistrationError::DuplicatePipeline { .. })
        ));
    }

    #[test]
    fn lookup_misses_unregistered_contract() {
        struct Unrouted;
        impl Contract for Unrouted {
            type Response = ();
        }
        let registry = PipelineRegistry::builder().build();
        assert!(registry.lookup::<Unrouted>().is_none());
    }
}
