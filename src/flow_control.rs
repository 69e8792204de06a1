//! Flow-control strategy selection
//!
//! SPDY/2 predates window-based flow control; SPDY/3 introduced per-stream
//! window updates. The version set is small and protocol-defined, so the
//! strategies are a closed set of variants selected by a single mapping
//! function rather than an open-ended trait hierarchy.

use crate::{Error, Result};

/// Flow-control strategy applied to a session, selected once at bootstrap
/// and immutable for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControlStrategy {
    /// No flow control (SPDY/2)
    NoFlowControl,

    /// Window-based flow control with WINDOW_UPDATE crediting (SPDY/3)
    WindowBased,
}

impl FlowControlStrategy {
    /// Select the strategy for a protocol version
    ///
    /// Pure and deterministic. Unknown versions fail rather than silently
    /// defaulting, so a misconfigured factory cannot violate the protocol.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`] for versions other than 2 or 3.
    pub fn for_version(version: u16) -> Result<Self> {
        match version {
            2 => Ok(FlowControlStrategy::NoFlowControl),
            3 => Ok(FlowControlStrategy::WindowBased),
            v => Err(Error::UnsupportedVersion(v)),
        }
    }

    /// Whether this strategy performs window-based accounting
    pub fn is_window_based(&self) -> bool {
        matches!(self, FlowControlStrategy::WindowBased)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_2_has_no_flow_control() {
        let strategy = FlowControlStrategy::for_version(2).unwrap();
        assert_eq!(strategy, FlowControlStrategy::NoFlowControl);
        assert!(!strategy.is_window_based());
    }

    #[test]
    fn test_version_3_is_window_based() {
        let strategy = FlowControlStrategy::for_version(3).unwrap();
        assert_eq!(strategy, FlowControlStrategy::WindowBased);
        assert!(strategy.is_window_based());
    }

    #[test]
    fn test_unknown_version_fails() {
        let err = FlowControlStrategy::for_version(99).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(99)));

        assert!(FlowControlStrategy::for_version(0).is_err());
        assert!(FlowControlStrategy::for_version(4).is_err());
    }

    #[test]
    fn test_selection_is_deterministic() {
        for version in [2u16, 3] {
            let a = FlowControlStrategy::for_version(version).unwrap();
            let b = FlowControlStrategy::for_version(version).unwrap();
            assert_eq!(a, b);
        }
    }
}
