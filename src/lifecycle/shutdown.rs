//! Shutdown coordination.
//!
//! Servers subscribe before they start accepting connections; a trigger
//! stops every subscribed server, and reports how many were still running.

use tokio::sync::broadcast;

/// Broadcast handle shared by the servers of one process.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscribed server to stop. Returns the number of servers notified.
    pub fn trigger(&self) -> usize {
        let notified = self.tx.send(()).unwrap_or(0);
        if notified == 0 {
            tracing::debug!("Shutdown triggered with no running servers");
        } else {
            tracing::info!(servers = notified, "Shutdown triggered");
        }
        notified
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
