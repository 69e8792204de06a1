//! Configuration types for the SPDY server factory

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default per-session flow-control window in bytes
pub const DEFAULT_INITIAL_WINDOW_SIZE: i32 = 65536;

/// Default read buffer size handed to the frame parser
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 8192;

/// Configuration for [`ServerConnectionFactory`](crate::ServerConnectionFactory)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// SPDY protocol version negotiated for this factory (2 or 3)
    ///
    /// Validated at bootstrap time, not here: an unsupported version must
    /// surface as [`Error::UnsupportedVersion`] from the accept path.
    pub version: u16,

    /// Initial per-session flow-control window in bytes (default: 65536)
    pub initial_window_size: i32,

    /// Read buffer size for decoding, in bytes (default: 8192)
    pub input_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 3,
            initial_window_size: DEFAULT_INITIAL_WINDOW_SIZE,
            input_buffer_size: DEFAULT_INPUT_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    /// Create a configuration for the given protocol version with defaults
    pub fn for_version(version: u16) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    /// Validate configuration parameters
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the window size is not positive
    /// or the input buffer size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.initial_window_size <= 0 {
            return Err(Error::InvalidConfig(format!(
                "initial_window_size must be positive, got {}",
                self.initial_window_size
            )));
        }

        if self.input_buffer_size == 0 {
            return Err(Error::InvalidConfig(
                "input_buffer_size must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
