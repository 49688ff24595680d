//! Advisory cancellation for in-flight dispatches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// An advisory cancellation token shared by every stage of one dispatch.
///
/// The same token flows unmodified from the original call to every middleware
/// and handler; cooperative stages check [`is_cancelled`](Cancellation::is_cancelled)
/// at their own pace. The engine never forcibly aborts in-flight work.
///
/// Cloning (or [`child`](Cancellation::child)) shares the underlying flag, so a
/// clone observed anywhere in the chain reflects a `cancel` issued anywhere
/// else.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
}

impl Cancellation {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Request cancellation. Returns `true` only for the call that first
    /// flipped the flag.
    pub fn cancel(&self) -> bool {
        self.flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Derive a token sharing the same flag, for handing to sub-tasks.
    pub fn child(&self) -> Self {
        self.clone()
    }
}
