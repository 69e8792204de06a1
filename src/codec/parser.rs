//! Incremental frame decoding
//!
//! The parser accumulates transport bytes and delivers complete frames to
//! registered listeners. The session registers itself as a listener at
//! bootstrap, so decoded frames route straight into the session machinery.

use super::compression::Decompressor;
use super::frame::{ControlKind, Frame};
use crate::{Error, Result};
use bytes::{Bytes, BytesMut};
use std::sync::Arc;
use tracing::trace;

/// SPDY frame header length
const HEADER_LEN: usize = 8;

/// Receives decoded frames
pub trait FrameListener: Send + Sync {
    fn on_frame(&self, frame: Frame);
}

/// Incremental SPDY frame parser
///
/// One parser per connection: it owns the connection's decompression context
/// and must only be driven from that connection's read path.
pub struct Parser {
    decompressor: Box<dyn Decompressor>,
    listeners: Vec<Arc<dyn FrameListener>>,
    buffer: BytesMut,
}

impl Parser {
    /// Create a parser with the connection's decompression context
    pub fn new(decompressor: Box<dyn Decompressor>) -> Self {
        Self {
            decompressor,
            listeners: Vec::new(),
            buffer: BytesMut::new(),
        }
    }

    /// Register a listener for decoded frames
    pub fn add_listener(&mut self, listener: Arc<dyn FrameListener>) {
        self.listeners.push(listener);
    }

    /// Feed transport bytes, delivering every complete frame to listeners
    ///
    /// # Errors
    ///
    /// Returns [`Error::CodecError`] on an unknown control frame type.
    pub fn feed(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);

        while let Some(frame) = self.try_parse()? {
            trace!("decoded frame ({} byte payload)", frame.payload_len());
            for listener in &self.listeners {
                listener.on_frame(frame.clone());
            }
        }

        Ok(())
    }

    /// Attempt to parse one frame from the accumulated bytes
    fn try_parse(&mut self) -> Result<Option<Frame>> {
        if self.buffer.len() < HEADER_LEN {
            return Ok(None);
        }

        let header = &self.buffer[..HEADER_LEN];
        let length = ((header[5] as usize) << 16) | ((header[6] as usize) << 8) | header[7] as usize;
        if self.buffer.len() < HEADER_LEN + length {
            return Ok(None);
        }

        let control = header[0] & 0x80 != 0;
        let flags = header[4];

        let frame = if control {
            let version = (((header[0] & 0x7f) as u16) << 8) | header[1] as u16;
            let code = ((header[2] as u16) << 8) | header[3] as u16;
            let kind = ControlKind::from_code(code).ok_or_else(|| {
                Error::CodecError(format!("unknown control frame type: {}", code))
            })?;

            let _ = self.buffer.split_to(HEADER_LEN);
            let raw = self.buffer.split_to(length).freeze();
            let payload = if kind.carries_headers() {
                self.decompressor.decompress(&raw)
            } else {
                raw
            };

            Frame::Control {
                version,
                kind,
                flags,
                payload,
            }
        } else {
            let stream_id = u32::from_be_bytes([header[0], header[1], header[2], header[3]])
                & 0x7fff_ffff;

            let _ = self.buffer.split_to(HEADER_LEN);
            let payload: Bytes = self.buffer.split_to(length).freeze();

            Frame::Data {
                stream_id,
                flags,
                payload,
            }
        };

        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compression::StandardCompressionFactory;
    use crate::codec::CompressionFactory;
    use std::sync::Mutex;

    struct Collector {
        frames: Mutex<Vec<Frame>>,
    }

    impl Collector {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                frames: Mutex::new(Vec::new()),
            })
        }

        fn take(&self) -> Vec<Frame> {
            std::mem::take(&mut self.frames.lock().unwrap())
        }
    }

    impl FrameListener for Collector {
        fn on_frame(&self, frame: Frame) {
            self.frames.lock().unwrap().push(frame);
        }
    }

    fn new_parser() -> Parser {
        Parser::new(StandardCompressionFactory.new_decompressor())
    }

    #[test]
    fn test_parses_data_frame() {
        let collector = Collector::new();
        let mut parser = new_parser();
        parser.add_listener(collector.clone());

        // stream 5, flags 0x01, 3-byte payload
        let wire = [0x00, 0x00, 0x00, 0x05, 0x01, 0x00, 0x00, 0x03, b'a', b'b', b'c'];
        parser.feed(&wire).unwrap();

        let frames = collector.take();
        assert_eq!(frames.len(), 1);
        assert_eq!(
            frames[0],
            Frame::Data {
                stream_id: 5,
                flags: 0x01,
                payload: Bytes::from_static(b"abc"),
            }
        );
    }

    #[test]
    fn test_parses_control_frame() {
        let collector = Collector::new();
        let mut parser = new_parser();
        parser.add_listener(collector.clone());

        // version 3, GOAWAY, empty-status payload
        let wire = [
            0x80, 0x03, 0x00, 0x07, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01,
        ];
        parser.feed(&wire).unwrap();

        let frames = collector.take();
        assert_eq!(frames.len(), 1);
        match &frames[0] {
            Frame::Control {
                version,
                kind,
                payload,
                ..
            } => {
                assert_eq!(*version, 3);
                assert_eq!(*kind, ControlKind::GoAway);
                assert_eq!(payload.as_ref(), &[0, 0, 0, 1]);
            }
            other => panic!("expected control frame, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_feed_buffers_until_complete() {
        let collector = Collector::new();
        let mut parser = new_parser();
        parser.add_listener(collector.clone());

        let wire = [0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0xaa, 0xbb];
        parser.feed(&wire[..6]).unwrap();
        assert!(collector.take().is_empty());

        parser.feed(&wire[6..]).unwrap();
        assert_eq!(collector.take().len(), 1);
    }

    #[test]
    fn test_two_frames_in_one_feed() {
        let collector = Collector::new();
        let mut parser = new_parser();
        parser.add_listener(collector.clone());

        let mut wire = Vec::new();
        wire.extend_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x11]);
        wire.extend_from_slice(&[0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0x22]);
        parser.feed(&wire).unwrap();

        assert_eq!(collector.take().len(), 2);
    }

    #[test]
    fn test_unknown_control_type_errors() {
        let mut parser = new_parser();

        let wire = [0x80, 0x03, 0x00, 0x2a, 0x00, 0x00, 0x00, 0x00];
        let err = parser.feed(&wire).unwrap_err();
        assert!(matches!(err, Error::CodecError(_)));
    }
}
