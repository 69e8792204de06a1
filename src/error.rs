//! Error types for the SPDY server core

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while bootstrapping or managing SPDY sessions
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration parameter
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Protocol version with no known flow-control mapping
    #[error("Unsupported SPDY version: {0}")]
    UnsupportedVersion(u16),

    /// Registration attempted after the registry was permanently closed
    #[error("Session registry closed")]
    RegistryClosed,

    /// Session not found in the registry
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Frame decoding/encoding error
    #[error("Codec error: {0}")]
    CodecError(String),

    /// Transport endpoint error
    #[error("Endpoint error: {0}")]
    EndpointError(String),

    /// Session-level error
    #[error("Session error: {0}")]
    SessionError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Check if this error is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfig(_) | Error::UnsupportedVersion(_)
        )
    }

    /// Check if this error is the non-fatal bootstrap/shutdown race outcome
    pub fn is_registry_closed(&self) -> bool {
        matches!(self, Error::RegistryClosed)
    }

    /// Check if this error is a session-related error
    pub fn is_session_error(&self) -> bool {
        matches!(self, Error::SessionNotFound(_) | Error::SessionError(_))
    }
}
