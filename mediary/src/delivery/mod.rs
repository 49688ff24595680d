//! Delivery strategies: how many handlers run, and in what concurrency mode.
//!
//! A delivery strategy is the terminal stage of an invocation pipeline. All
//! three implement [`Middleware`](mediary_core::Middleware) but never invoke
//! their continuation; they resolve their handlers, execute them under the
//! strategy's policy, and write the resulting response into the context.
//!
//! - [`SingleDelivery`]: exactly one handler. The default for requests and
//!   commands.
//! - [`SequentialDelivery`]: an ordered set, one at a time, last writer wins.
//! - [`ParallelDelivery`]: all handlers launched concurrently; failures are
//!   aggregated after the whole set completes. The default for events, whose
//!   subscribers are independent of each other.
//!
//! Multi-handler strategies reject an empty resolver set at construction time
//! with [`RegistrationError::NoHandlerResolvers`](mediary_core::RegistrationError);
//! a strategy that could never deliver is a configuration mistake, not a
//! runtime fault.

mod parallel;
mod sequential;
mod single;

pub use parallel::ParallelDelivery;
pub use sequential::SequentialDelivery;
pub use single::SingleDelivery;
