//! User-visible failure notifications.

use tracing::error;

/// Receives the message of every failed call, once per failure.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Notifier that reports failures through `tracing` on target `beacon::notify`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        error!(target: "beacon::notify", "{message}");
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn error(&self, message: &str) {
        (**self).error(message)
    }
}
