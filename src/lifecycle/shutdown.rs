//! Shutdown coordination for the item services.
//!
//! Shutdown is a one-way latch: once triggered it stays triggered, so a
//! subscriber created after the trigger still observes it.

use tokio::sync::watch;

/// Owner side of the shutdown latch.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A handle that resolves once shutdown is triggered.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Trip the latch. Repeated calls are no-ops.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber side of the shutdown latch.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Wait for the trigger. Also resolves if the `Shutdown` owner is dropped.
    pub async fn recv(&mut self) {
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}
