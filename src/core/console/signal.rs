use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// One-shot session cancellation shared by the controller and both pumps.
///
/// Any clone may cancel; only the first call has an effect. Cancellation
/// never resets.
#[derive(Debug, Clone, Default)]
pub struct SessionSignal {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl SessionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this call performed the transition.
    pub fn cancel(&self) -> bool {
        let first = !self.inner.cancelled.swap(true, Ordering::AcqRel);
        if first {
            // Wake every current waiter; the permit covers one arriving late
            self.inner.notify.notify_waiters();
            self.inner.notify.notify_one();
        }
        first
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Completes once the session has been cancelled.
    pub async fn cancelled(&self) {
        while !self.is_cancelled() {
            self.inner.notify.notified().await;
        }
    }
}
