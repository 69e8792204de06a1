//! Transport endpoint seam
//!
//! The accept loop, socket I/O, and buffer management live with the embedding
//! server. The core sees an accepted endpoint only through this trait.

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::net::SocketAddr;

/// One accepted transport endpoint
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Remote peer address, if the transport knows it
    fn remote_addr(&self) -> Option<SocketAddr>;

    /// Queue encoded frame bytes for writing
    ///
    /// # Errors
    ///
    /// Returns an error if the transport can no longer accept writes.
    async fn send(&self, data: Bytes) -> Result<()>;

    /// Close the underlying transport
    async fn close(&self);
}
