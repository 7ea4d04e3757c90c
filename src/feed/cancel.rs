//! Cooperative cancellation for in-flight feed requests.

use std::sync::Arc;

use tokio::sync::watch;

/// Liveness token shared between a view and its fetches.
///
/// Each view owns one token, clones it into every fetch it starts, and
/// revokes it on teardown. The feed client races the in-flight request
/// against [`Cancellation::cancelled`], and controllers check
/// [`Cancellation::is_cancelled`] before every state commit so a result that
/// lands after teardown is discarded, never applied.
#[derive(Debug, Clone)]
pub struct Cancellation {
    tx: Arc<watch::Sender<bool>>,
}

impl Cancellation {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Revokes the token. Idempotent; wakes every pending `cancelled` call.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the token is revoked. Resolves immediately when it
    /// already was.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so `wait_for` cannot observe a closed
        // channel here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}
