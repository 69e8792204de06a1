//! Live-session registry
//!
//! Membership means "session is open and should receive shutdown
//! broadcasts". The registry is owned by the factory instance and passed
//! explicitly to the paths that need it; it is not a process global.

use super::{Session, SessionId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct RegistryState {
    closed: bool,
    sessions: HashMap<SessionId, Arc<Session>>,
}

/// Concurrent set of live sessions
///
/// All operations take short write/read sections; none block on I/O. Once
/// [`drain_all`](SessionRegistry::drain_all) has run the registry is
/// permanently closed and every later [`add`](SessionRegistry::add) is
/// rejected, so a session racing with shutdown cannot leak into a registry
/// that will never signal it.
pub struct SessionRegistry {
    state: RwLock<RegistryState>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState {
                closed: false,
                sessions: HashMap::new(),
            }),
        }
    }

    /// Insert a session if absent
    ///
    /// Returns whether the session was inserted. `false` means either the
    /// session is already present or the registry has been closed; callers
    /// losing the shutdown race must tear the session down themselves.
    pub async fn add(&self, session: Arc<Session>) -> bool {
        let mut state = self.state.write().await;

        if state.closed {
            debug!("registry closed, rejecting session {}", session.id());
            return false;
        }

        if state.sessions.contains_key(&session.id()) {
            return false;
        }

        debug!("registering session {}", session.id());
        state.sessions.insert(session.id(), session);
        true
    }

    /// Remove a session if present
    ///
    /// Idempotent: removing an absent session returns `false`. A session may
    /// be closed more than once (peer close racing local shutdown).
    pub async fn remove(&self, id: &SessionId) -> bool {
        let mut state = self.state.write().await;

        if state.sessions.remove(id).is_some() {
            debug!("deregistered session {}", id);
            true
        } else {
            false
        }
    }

    /// Whether a session is currently registered
    pub async fn contains(&self, id: &SessionId) -> bool {
        self.state.read().await.sessions.contains_key(id)
    }

    /// Point-in-time copy of the membership
    ///
    /// The returned vector does not reflect later mutations. No ordering is
    /// guaranteed among entries.
    pub async fn snapshot(&self) -> Vec<Arc<Session>> {
        self.state.read().await.sessions.values().cloned().collect()
    }

    /// Atomically remove and return every registered session, closing the
    /// registry permanently
    ///
    /// Every session added before this call is either in the returned set or
    /// was rejected by the closed-registry `add` contract; none are silently
    /// dropped.
    pub async fn drain_all(&self) -> Vec<Arc<Session>> {
        let mut state = self.state.write().await;
        state.closed = true;
        let drained: Vec<_> = state.sessions.drain().map(|(_, s)| s).collect();
        info!("registry drained ({} session(s))", drained.len());
        drained
    }

    /// Whether the registry has been permanently closed
    pub async fn is_closed(&self) -> bool {
        self.state.read().await.closed
    }

    /// Number of registered sessions
    pub async fn len(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
