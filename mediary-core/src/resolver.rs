//! Lifetime-scoped component supply.
//!
//! Handlers and middleware reach a pipeline wrapped in a [`ComponentResolver`],
//! which controls how often the underlying component is constructed. The
//! engine never builds components itself; it only calls
//! [`resolve`](ComponentResolver::resolve) at the point of use.

use std::sync::{Arc, OnceLock};

type Factory<T> = Box<dyn Fn() -> Arc<T> + Send + Sync>;

/// Supplies an `Arc<T>` under one of three lifetime policies.
///
/// - **instance**: a fixed `Arc`, handed out unchanged on every call.
/// - **deferred**: the factory runs at most once, on first resolution, even
///   under concurrent first access; every later call observes the cached value.
/// - **transient**: the factory runs on every resolution and is never
///   memoized.
pub struct ComponentResolver<T: ?Sized> {
    lifetime: Lifetime<T>,
}

enum Lifetime<T: ?Sized> {
    Instance(Arc<T>),
    Deferred {
        factory: Factory<T>,
        cell: OnceLock<Arc<T>>,
    },
    Transient(Factory<T>),
}

impl<T: ?Sized> ComponentResolver<T> {
    /// Resolver around a fixed instance.
    pub fn instance(component: Arc<T>) -> Self {
        Self {
            lifetime: Lifetime::Instance(component),
        }
    }

    /// Resolver that runs `factory` once, on first resolution.
    pub fn deferred(factory: impl Fn() -> Arc<T> + Send + Sync + 'static) -> Self {
        Self {
            lifetime: Lifetime::Deferred {
                factory: Box::new(factory),
                cell: OnceLock::new(),
            },
        }
    }

    /// Resolver that runs `factory` on every resolution.
    pub fn transient(factory: impl Fn() -> Arc<T> + Send + Sync + 'static) -> Self {
        Self {
            lifetime: Lifetime::Transient(Box::new(factory)),
        }
    }

    /// Produce the component under this resolver's lifetime policy.
    pub fn resolve(&self) -> Arc<T> {
        match &self.lifetime {
            Lifetime::Instance(component) => Arc::clone(component),
            Lifetime::Deferred { factory, cell } => Arc::clone(cell.get_or_init(|| factory())),
            Lifetime::Transient(factory) => factory(),
        }
    }
}
