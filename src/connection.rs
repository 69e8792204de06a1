//! Transport-facing connection
//!
//! Pairs the frame decoder with exactly one session and carries the
//! lifecycle hooks the transport drives: bytes in, opened, closed.

use crate::codec::Parser;
use crate::notify::OnceNotifier;
use crate::server::ServerSessionListener;
use crate::session::{Session, SessionRegistry};
use crate::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// One accepted connection and its decoder
///
/// Owned by the transport layer; it does not outlive its endpoint. The
/// session back-reference is set at construction and immutable thereafter.
pub struct Connection {
    parser: Mutex<Parser>,
    session: Arc<Session>,
    registry: Arc<SessionRegistry>,
    listener: Option<Arc<dyn ServerSessionListener>>,
    connected: OnceNotifier,
}

impl Connection {
    pub(crate) fn new(
        parser: Parser,
        session: Arc<Session>,
        registry: Arc<SessionRegistry>,
        listener: Option<Arc<dyn ServerSessionListener>>,
    ) -> Self {
        Self {
            parser: Mutex::new(parser),
            session,
            registry,
            listener,
            connected: OnceNotifier::new(),
        }
    }

    /// The session multiplexed over this connection
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Transport "opened" hook
    ///
    /// May be delivered more than once; the application's connect callback
    /// still fires at most once, off this thread. With no listener configured
    /// the scheduled task is a no-op.
    pub fn on_open(&self) {
        let listener = self.listener.clone();
        let session = self.session.clone();

        let scheduled = self.connected.notify(move || match listener {
            Some(listener) => listener.on_connect(session),
            None => Ok(()),
        });

        if scheduled {
            debug!("session {}: connect notification scheduled", self.session.id());
        }
    }

    /// Transport "closed" hook: deregisters this connection's session
    ///
    /// Idempotent; closing an already-deregistered session is a no-op.
    pub async fn on_close(&self) {
        if self.registry.remove(&self.session.id()).await {
            debug!("session {}: connection closed", self.session.id());
        }
    }

    /// Drive the decoder with bytes read by the transport
    ///
    /// # Errors
    ///
    /// Propagates decode errors; the transport should close on failure.
    pub async fn feed(&self, data: &[u8]) -> Result<()> {
        self.parser.lock().await.feed(data)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session", &self.session.id())
            .field("connected", &self.connected.has_fired())
            .finish()
    }
}
