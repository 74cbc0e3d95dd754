//! Feedboard notification infrastructure.
//!
//! - [`Toast`] — title, description and [`Severity`] of a user-facing message.
//! - [`Notifier`] — the fire-and-forget notification capability.
//! - [`ToastBus`] — publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`LogNotifier`] — renders toasts through `tracing`.

pub mod bus;
pub mod notifier;
pub mod toast;

pub use bus::ToastBus;
pub use notifier::{LogNotifier, Notifier, SharedNotifier};
pub use toast::{Severity, Toast};
