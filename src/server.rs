//! Server connection factory
//!
//! The factory owns the session registry and the per-accept bootstrap path:
//! it builds the codec pair, selects the flow-control strategy for the
//! configured protocol version, constructs and registers the session, and
//! wires the connection lifecycle. On stop it broadcasts go-away to every
//! live session.

use crate::codec::{
    BufferPool, CompressionFactory, Generator, Parser, StandardCompressionFactory,
};
use crate::config::ServerConfig;
use crate::connection::Connection;
use crate::endpoint::Endpoint;
use crate::flow_control::FlowControlStrategy;
use crate::session::{Session, SessionRegistry};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Application callback surface for server sessions
///
/// `on_connect` runs on the worker pool, never on the transport's read
/// thread, and at most once per session. It must tolerate a session that is
/// already closing.
pub trait ServerSessionListener: Send + Sync {
    /// Called once a new session is established
    ///
    /// # Errors
    ///
    /// Errors are logged by the dispatch path and never abort other
    /// connections.
    fn on_connect(&self, session: Arc<Session>) -> Result<()>;
}

/// Factory bootstrapping one session per accepted connection
pub struct ServerConnectionFactory {
    config: ServerConfig,
    listener: Option<Arc<dyn ServerSessionListener>>,
    registry: Arc<SessionRegistry>,
    compression: Arc<dyn CompressionFactory>,
    pool: Arc<BufferPool>,
}

impl ServerConnectionFactory {
    /// Create a factory for the configured protocol version
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for invalid window or buffer sizes.
    /// Version validity is checked per accept, so a factory can be built for
    /// test configurations with unknown versions.
    pub fn new(
        config: ServerConfig,
        listener: Option<Arc<dyn ServerSessionListener>>,
    ) -> Result<Self> {
        config.validate()?;

        info!(
            "creating SPDY server connection factory (version {}, window {})",
            config.version, config.initial_window_size
        );

        let pool = Arc::new(BufferPool::new(config.input_buffer_size));

        Ok(Self {
            config,
            listener,
            registry: Arc::new(SessionRegistry::new()),
            compression: Arc::new(StandardCompressionFactory),
            pool,
        })
    }

    /// Replace the compression factory (embedding stacks supply the real
    /// zlib context pair here)
    pub fn with_compression(mut self, compression: Arc<dyn CompressionFactory>) -> Self {
        self.compression = compression;
        self
    }

    /// Configured protocol version
    pub fn version(&self) -> u16 {
        self.config.version
    }

    /// Configured initial flow-control window
    pub fn initial_window_size(&self) -> i32 {
        self.config.initial_window_size
    }

    /// Configured application listener
    pub fn listener(&self) -> Option<Arc<dyn ServerSessionListener>> {
        self.listener.clone()
    }

    /// The factory's session registry
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Snapshot of the currently live sessions
    pub async fn sessions(&self) -> Vec<Arc<Session>> {
        self.registry.snapshot().await
    }

    /// Accept hook: bootstrap the protocol machinery for one connection
    ///
    /// Fails before any construction or registry mutation when the version
    /// is unsupported. If registration loses the race with shutdown, the
    /// endpoint is closed locally and [`Error::RegistryClosed`] is returned;
    /// the transport sees a connection that failed to establish.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedVersion`] or [`Error::RegistryClosed`].
    pub async fn on_accept(&self, endpoint: Arc<dyn Endpoint>) -> Result<Arc<Connection>> {
        let flow_control = FlowControlStrategy::for_version(self.config.version)?;

        let mut parser = Parser::new(self.compression.new_decompressor());
        let generator = Generator::new(self.pool.clone(), self.compression.new_compressor());

        let session = Arc::new(Session::new(
            self.config.version,
            flow_control,
            self.config.initial_window_size,
            endpoint.clone(),
            generator,
        ));

        // The session receives every decoded frame
        parser.add_listener(session.clone());

        let connection = Arc::new(Connection::new(
            parser,
            session.clone(),
            self.registry.clone(),
            self.listener.clone(),
        ));

        if !self.registry.add(session.clone()).await {
            warn!(
                "session {} lost registration race with shutdown, closing",
                session.id()
            );
            endpoint.close().await;
            return Err(Error::RegistryClosed);
        }

        debug!(
            "session {} bootstrapped (remote: {:?}, flow control: {:?})",
            session.id(),
            session.remote_addr(),
            flow_control
        );

        Ok(connection)
    }

    /// Factory stop hook: broadcast go-away to every live session
    ///
    /// Drains the registry atomically, then signals each drained session. An
    /// individual go-away failure is logged and the broadcast continues; no
    /// session aborts the loop. Afterwards the registry is empty and closed.
    pub async fn stop(&self) {
        let drained = self.registry.drain_all().await;
        info!(
            "stopping SPDY factory, signaling {} live session(s)",
            drained.len()
        );

        for session in drained {
            if let Err(e) = session.go_away().await {
                warn!("go-away failed for session {}: {}", session.id(), e);
            }
        }
    }
}

impl std::fmt::Debug for ServerConnectionFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConnectionFactory")
            .field("config", &self.config)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
