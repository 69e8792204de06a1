//! SPDY session object and live-session registry

pub mod registry;

pub use registry::SessionRegistry;

use crate::codec::{go_away_frame, ControlKind, Frame, FrameListener, Generator};
use crate::endpoint::Endpoint;
use crate::flow_control::FlowControlStrategy;
use crate::Result;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, trace};
use uuid::Uuid;

/// Unique session identifier
pub type SessionId = Uuid;

/// One multiplexed SPDY conversation over one transport connection
///
/// Created once per accepted connection by the factory's bootstrap path.
/// Stream multiplexing, settings negotiation, and ping handling live with the
/// embedding session machinery; this object carries the per-session identity,
/// flow-control selection, and the going-away signal.
pub struct Session {
    id: SessionId,
    version: u16,
    flow_control: FlowControlStrategy,
    window_size: AtomicI32,
    remote_addr: Option<SocketAddr>,
    attributes: RwLock<HashMap<String, String>>,
    endpoint: Arc<dyn Endpoint>,
    generator: Mutex<Generator>,
    goaway_sent: AtomicBool,
    last_stream_id: AtomicU32,
}

impl Session {
    /// Create a session bound to its endpoint and frame generator
    pub(crate) fn new(
        version: u16,
        flow_control: FlowControlStrategy,
        initial_window_size: i32,
        endpoint: Arc<dyn Endpoint>,
        generator: Generator,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            version,
            flow_control,
            window_size: AtomicI32::new(initial_window_size),
            remote_addr: endpoint.remote_addr(),
            attributes: RwLock::new(HashMap::new()),
            endpoint,
            generator: Mutex::new(generator),
            goaway_sent: AtomicBool::new(false),
            last_stream_id: AtomicU32::new(0),
        }
    }

    /// Session identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Negotiated protocol version
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Flow-control strategy selected at bootstrap
    pub fn flow_control(&self) -> FlowControlStrategy {
        self.flow_control
    }

    /// Current flow-control window in bytes
    pub fn window_size(&self) -> i32 {
        self.window_size.load(Ordering::SeqCst)
    }

    /// Reconfigure the flow-control window
    pub fn set_window_size(&self, size: i32) {
        self.window_size.store(size, Ordering::SeqCst);
    }

    /// Remote peer address captured at bootstrap
    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    /// Stash open-ended session metadata
    pub async fn set_attribute(&self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.write().await.insert(key.into(), value.into());
    }

    /// Read session metadata
    pub async fn attribute(&self, key: &str) -> Option<String> {
        self.attributes.read().await.get(key).cloned()
    }

    /// Highest stream id observed from the peer
    pub fn last_stream_id(&self) -> u32 {
        self.last_stream_id.load(Ordering::SeqCst)
    }

    /// Whether the going-away signal has been sent
    pub fn is_going_away(&self) -> bool {
        self.goaway_sent.load(Ordering::SeqCst)
    }

    /// Send the going-away signal: no new streams will be accepted
    ///
    /// At most one frame is emitted; repeated calls are no-ops. Safe to call
    /// on a session whose connection is already closing.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint rejects the write.
    pub async fn go_away(&self) -> Result<()> {
        if self.goaway_sent.swap(true, Ordering::SeqCst) {
            trace!("session {}: go-away already sent", self.id);
            return Ok(());
        }

        debug!("session {}: sending go-away", self.id);
        let frame = go_away_frame(self.version, self.last_stream_id());
        let wire = self.generator.lock().await.generate(&frame);
        self.endpoint.send(wire).await
    }
}

impl FrameListener for Session {
    fn on_frame(&self, frame: Frame) {
        match &frame {
            Frame::Data { stream_id, .. } => {
                self.observe_stream(*stream_id);
            }
            Frame::Control { kind, payload, .. } => {
                // SYN_STREAM carries the new stream id in its first word
                if *kind == ControlKind::SynStream && payload.len() >= 4 {
                    let stream_id =
                        u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]])
                            & 0x7fff_ffff;
                    self.observe_stream(stream_id);
                }
            }
        }
        trace!(
            "session {}: frame received ({} byte payload)",
            self.id,
            frame.payload_len()
        );
    }
}

impl Session {
    fn observe_stream(&self, stream_id: u32) {
        self.last_stream_id.fetch_max(stream_id, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("flow_control", &self.flow_control)
            .field("window_size", &self.window_size())
            .field("remote_addr", &self.remote_addr)
            .finish()
    }
}
