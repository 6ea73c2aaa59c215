//! Session lifecycle tracking.
//!
//! # Responsibilities
//! - Hand out session ids for log correlation
//! - Count open sessions and wake the shutdown path once they drain

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::observability::metrics;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    open: AtomicU64,
    drained: Notify,
}

/// Counts open sessions. Clones share the same count.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    state: Arc<TrackerState>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session; the returned guard unregisters it on drop.
    pub fn track(&self) -> ConnectionGuard {
        let open = self.state.open.fetch_add(1, Ordering::SeqCst) + 1;
        metrics::record_active_connections(open);
        ConnectionGuard {
            state: Arc::clone(&self.state),
            id: ConnectionId::new(),
        }
    }

    pub fn active_count(&self) -> u64 {
        self.state.open.load(Ordering::SeqCst)
    }

    /// Resolve once no session is open.
    pub async fn wait_for_shutdown(&self) {
        loop {
            // Register before checking so a drain between the two is not missed.
            let drained = self.state.drained.notified();
            if self.active_count() == 0 {
                return;
            }
            drained.await;
        }
    }
}

/// Keeps one session counted while alive.
#[derive(Debug)]
pub struct ConnectionGuard {
    state: Arc<TrackerState>,
    id: ConnectionId,
}

impl ConnectionGuard {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let open = self.state.open.fetch_sub(1, Ordering::SeqCst) - 1;
        metrics::record_active_connections(open);
        tracing::trace!(connection_id = %self.id, "Session closed");
        if open == 0 {
            self.state.drained.notify_waiters();
        }
    }
}
