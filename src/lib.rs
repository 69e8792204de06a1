//! Server-side SPDY session bootstrap and lifecycle management
//!
//! This crate provides the per-connection bootstrap, registry, and
//! shutdown-coordination layer for a SPDY-family server: for every accepted
//! transport connection it constructs the frame codec pair, selects the
//! flow-control strategy for the negotiated protocol version, registers the
//! resulting session, and notifies the application exactly once — off the
//! transport's read path. On stop it broadcasts a going-away signal to every
//! live session.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │  Transport accept loop (embedding server)             │
//! │  ↓ on_accept(endpoint)                                │
//! │  ServerConnectionFactory                              │
//! │  ├─ FlowControlStrategy::for_version                  │
//! │  ├─ Parser / Generator (compression pair per conn)    │
//! │  ├─ SessionRegistry (add / remove / drain_all)        │
//! │  └─ Connection                                        │
//! │      ├─ OnceNotifier → listener.on_connect(session)   │
//! │      └─ on_close → SessionRegistry::remove            │
//! │  ↓ stop()                                             │
//! │  drain_all → go_away() per session                    │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use spdy_server::ServerConfig;
//!
//! let config = ServerConfig {
//!     version: 3,
//!     initial_window_size: 32768,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod flow_control;
pub mod notify;
pub mod server;
pub mod session;

pub use config::ServerConfig;
pub use connection::Connection;
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use flow_control::FlowControlStrategy;
pub use notify::OnceNotifier;
pub use server::{ServerConnectionFactory, ServerSessionListener};
pub use session::{Session, SessionId, SessionRegistry};

/// Get the version of this crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
