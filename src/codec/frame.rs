//! Decoded frame types crossing the codec boundary

use bytes::{BufMut, Bytes, BytesMut};

/// Control frame kinds defined by SPDY/2 and SPDY/3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    SynStream,
    SynReply,
    RstStream,
    Settings,
    Ping,
    GoAway,
    Headers,
    WindowUpdate,
}

impl ControlKind {
    /// Wire code for this control frame kind
    pub fn code(&self) -> u16 {
        match self {
            ControlKind::SynStream => 1,
            ControlKind::SynReply => 2,
            ControlKind::RstStream => 3,
            ControlKind::Settings => 4,
            ControlKind::Ping => 6,
            ControlKind::GoAway => 7,
            ControlKind::Headers => 8,
            ControlKind::WindowUpdate => 9,
        }
    }

    /// Map a wire code back to a kind
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(ControlKind::SynStream),
            2 => Some(ControlKind::SynReply),
            3 => Some(ControlKind::RstStream),
            4 => Some(ControlKind::Settings),
            6 => Some(ControlKind::Ping),
            7 => Some(ControlKind::GoAway),
            8 => Some(ControlKind::Headers),
            9 => Some(ControlKind::WindowUpdate),
            _ => None,
        }
    }

    /// Whether this kind carries a compressed header block in its payload
    pub fn carries_headers(&self) -> bool {
        matches!(
            self,
            ControlKind::SynStream | ControlKind::SynReply | ControlKind::Headers
        )
    }
}

/// One decoded frame, delivered to the session's frame listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Data frame bound to one stream
    Data {
        stream_id: u32,
        flags: u8,
        payload: Bytes,
    },

    /// Control frame
    Control {
        version: u16,
        kind: ControlKind,
        flags: u8,
        payload: Bytes,
    },
}

impl Frame {
    /// Payload length in bytes
    pub fn payload_len(&self) -> usize {
        match self {
            Frame::Data { payload, .. } => payload.len(),
            Frame::Control { payload, .. } => payload.len(),
        }
    }
}

/// Session-termination status carried by a SPDY/3 go-away frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Ok,
    ProtocolError,
    InternalError,
}

impl SessionStatus {
    /// Wire code for this status
    pub fn code(&self) -> u32 {
        match self {
            SessionStatus::Ok => 0,
            SessionStatus::ProtocolError => 1,
            SessionStatus::InternalError => 2,
        }
    }
}

/// Build the payload of a go-away frame for the given protocol version
///
/// SPDY/2 carries only the last-good-stream-id; SPDY/3 adds a status code.
pub fn go_away_payload(version: u16, last_stream_id: u32, status: SessionStatus) -> Bytes {
    let mut buf = BytesMut::with_capacity(8);
    buf.put_u32(last_stream_id & 0x7fff_ffff);
    if version >= 3 {
        buf.put_u32(status.code());
    }
    buf.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_kind_roundtrip() {
        for kind in [
            ControlKind::SynStream,
            ControlKind::SynReply,
            ControlKind::RstStream,
            ControlKind::Settings,
            ControlKind::Ping,
            ControlKind::GoAway,
            ControlKind::Headers,
            ControlKind::WindowUpdate,
        ] {
            assert_eq!(ControlKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ControlKind::from_code(5), None);
        assert_eq!(ControlKind::from_code(42), None);
    }

    #[test]
    fn test_header_bearing_kinds() {
        assert!(ControlKind::SynStream.carries_headers());
        assert!(ControlKind::Headers.carries_headers());
        assert!(!ControlKind::GoAway.carries_headers());
        assert!(!ControlKind::Ping.carries_headers());
    }

    #[test]
    fn test_go_away_payload_by_version() {
        let v2 = go_away_payload(2, 7, SessionStatus::Ok);
        assert_eq!(v2.as_ref(), &[0, 0, 0, 7]);

        let v3 = go_away_payload(3, 7, SessionStatus::ProtocolError);
        assert_eq!(v3.as_ref(), &[0, 0, 0, 7, 0, 0, 0, 1]);
    }

    #[test]
    fn test_go_away_masks_reserved_bit() {
        let payload = go_away_payload(2, 0xffff_ffff, SessionStatus::Ok);
        assert_eq!(payload.as_ref(), &[0x7f, 0xff, 0xff, 0xff]);
    }
}
