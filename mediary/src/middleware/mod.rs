//! Standard middleware implementations.

pub mod logging;
#[cfg(feature = "tracing")]
pub mod tracing;
