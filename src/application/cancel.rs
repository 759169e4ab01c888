//! Cancellation tokens for in-flight requests.
//!
//! A [`Canceller`] owns the sending half of a `watch` channel; every
//! [`CancelToken`] handed to spawned work observes the same flag.

use tokio::sync::watch;

/// Cancels every token created from it.
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    /// Create a canceller and its first token.
    #[must_use]
    pub fn new() -> (Self, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancelToken { rx })
    }

    /// Create another token observing this canceller.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Observer side of a [`Canceller`].
///
/// Dropping the canceller without calling [`Canceller::cancel`] leaves the
/// token uncancelled forever.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that is never cancelled.
    #[must_use]
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is signalled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // Canceller dropped without cancelling.
            std::future::pending::<()>().await;
        }
    }
}
