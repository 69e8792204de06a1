//! Frame encoding

use super::compression::Compressor;
use super::frame::{ControlKind, Frame};
use super::pool::BufferPool;
use bytes::{BufMut, Bytes};
use std::sync::Arc;

/// SPDY frame generator
///
/// One generator per connection: it owns the connection's compression
/// context. Encoded frames are handed back as immutable [`Bytes`] ready for
/// the transport write path.
pub struct Generator {
    pool: Arc<BufferPool>,
    compressor: Box<dyn Compressor>,
}

impl Generator {
    /// Create a generator backed by the factory's buffer pool
    pub fn new(pool: Arc<BufferPool>, compressor: Box<dyn Compressor>) -> Self {
        Self { pool, compressor }
    }

    /// Encode one frame to wire bytes
    pub fn generate(&mut self, frame: &Frame) -> Bytes {
        let mut buf = self.pool.acquire();

        match frame {
            Frame::Data {
                stream_id,
                flags,
                payload,
            } => {
                buf.put_u32(stream_id & 0x7fff_ffff);
                buf.put_u8(*flags);
                put_u24(&mut buf, payload.len());
                buf.put_slice(payload);
            }
            Frame::Control {
                version,
                kind,
                flags,
                payload,
            } => {
                let payload = if kind.carries_headers() {
                    self.compressor.compress(payload)
                } else {
                    payload.clone()
                };

                buf.put_u16(0x8000 | (version & 0x7fff));
                buf.put_u16(kind.code());
                buf.put_u8(*flags);
                put_u24(&mut buf, payload.len());
                buf.put_slice(&payload);
            }
        }

        let wire = Bytes::copy_from_slice(&buf);
        self.pool.release(buf);
        wire
    }
}

fn put_u24(buf: &mut impl BufMut, len: usize) {
    debug_assert!(len <= 0x00ff_ffff);
    buf.put_u8((len >> 16) as u8);
    buf.put_u8((len >> 8) as u8);
    buf.put_u8(len as u8);
}

/// Convenience constructor for a go-away control frame
pub fn go_away_frame(version: u16, last_stream_id: u32) -> Frame {
    Frame::Control {
        version,
        kind: ControlKind::GoAway,
        flags: 0,
        payload: super::frame::go_away_payload(
            version,
            last_stream_id,
            super::frame::SessionStatus::Ok,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compression::StandardCompressionFactory;
    use crate::codec::parser::{FrameListener, Parser};
    use crate::codec::CompressionFactory;
    use std::sync::Mutex;

    struct Collector(Mutex<Vec<Frame>>);

    impl FrameListener for Collector {
        fn on_frame(&self, frame: Frame) {
            self.0.lock().unwrap().push(frame);
        }
    }

    fn new_generator() -> Generator {
        Generator::new(
            Arc::new(BufferPool::new(1024)),
            StandardCompressionFactory.new_compressor(),
        )
    }

    #[test]
    fn test_data_frame_wire_layout() {
        let mut generator = new_generator();
        let wire = generator.generate(&Frame::Data {
            stream_id: 3,
            flags: 0x01,
            payload: Bytes::from_static(b"xy"),
        });

        assert_eq!(
            wire.as_ref(),
            &[0x00, 0x00, 0x00, 0x03, 0x01, 0x00, 0x00, 0x02, b'x', b'y']
        );
    }

    #[test]
    fn test_go_away_frame_parses_back() {
        let mut generator = new_generator();
        let wire = generator.generate(&go_away_frame(3, 9));

        let collector = Arc::new(Collector(Mutex::new(Vec::new())));
        let mut parser = Parser::new(StandardCompressionFactory.new_decompressor());
        parser.add_listener(collector.clone());
        parser.feed(&wire).unwrap();

        let frames = collector.0.lock().unwrap();
        assert_eq!(frames.len(), 1);
        match &frames[0] {
            Frame::Control { version, kind, .. } => {
                assert_eq!(*version, 3);
                assert_eq!(*kind, ControlKind::GoAway);
            }
            other => panic!("expected go-away, got {:?}", other),
        }
    }

    #[test]
    fn test_control_bit_set_on_version() {
        let mut generator = new_generator();
        let wire = generator.generate(&go_away_frame(2, 0));
        assert_eq!(wire[0], 0x80);
        assert_eq!(wire[1], 0x02);
    }
}
