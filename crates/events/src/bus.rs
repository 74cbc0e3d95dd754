//! In-process toast bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`ToastBus`] is a [`Notifier`] that fans every toast out to any number
//! of subscribers, e.g. a UI layer rendering them and a test collecting
//! them. It is designed to be shared via `Arc<ToastBus>`.

use tokio::sync::broadcast;

use crate::notifier::Notifier;
use crate::toast::Toast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out toast bus.
///
/// # Usage
///
/// ```rust
/// use feedboard_events::{Notifier, Toast, ToastBus};
///
/// let bus = ToastBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.notify(Toast::success("Saved", "Your changes were stored."));
/// assert_eq!(rx.try_recv().unwrap().title, "Saved");
/// ```
pub struct ToastBus {
    sender: broadcast::Sender<Toast>,
}

impl ToastBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed toasts are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to all toasts published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ToastBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier for ToastBus {
    fn notify(&self, toast: Toast) {
        // A send error only means there are no receivers.
        let _ = self.sender.send(toast);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
