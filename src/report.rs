//! User-facing failure channel
//!
//! The worker hands plain-text failure messages to an [`ErrorSink`]. The
//! baseline sink logs them; a shell integration can implement the trait to
//! present dialogs instead. Dispatches run sequentially on the single
//! worker, so messages arrive in dispatch-completion order.

use tracing::error;

/// Capability interface for presenting failures to the user
pub trait ErrorSink {
    fn report(&self, message: &str);
}

impl<T: ErrorSink + ?Sized> ErrorSink for std::sync::Arc<T> {
    fn report(&self, message: &str) {
        (**self).report(message)
    }
}

/// Sink that writes failures to the log
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&self, message: &str) {
        error!("{message}");
    }
}
