//! Header compression seam
//!
//! SPDY header blocks ride a shared per-direction zlib context seeded with a
//! protocol dictionary. The dictionary and arithmetic live with the embedding
//! stack; the core only needs the pair wiring, so the standard factory here
//! hands out passthrough codecs.

use bytes::Bytes;

/// Compresses header blocks for outgoing frames
pub trait Compressor: Send {
    fn compress(&mut self, input: &[u8]) -> Bytes;
}

/// Decompresses header blocks from incoming frames
pub trait Decompressor: Send {
    fn decompress(&mut self, input: &[u8]) -> Bytes;
}

/// Builds the compressor/decompressor pair for one connection
///
/// Each connection gets a fresh pair: the compression context is stateful
/// per direction and must never be shared across connections.
pub trait CompressionFactory: Send + Sync {
    fn new_compressor(&self) -> Box<dyn Compressor>;
    fn new_decompressor(&self) -> Box<dyn Decompressor>;
}

/// Default factory: identity codecs
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCompressionFactory;

struct Passthrough;

impl Compressor for Passthrough {
    fn compress(&mut self, input: &[u8]) -> Bytes {
        Bytes::copy_from_slice(input)
    }
}

impl Decompressor for Passthrough {
    fn decompress(&mut self, input: &[u8]) -> Bytes {
        Bytes::copy_from_slice(input)
    }
}

impl CompressionFactory for StandardCompressionFactory {
    fn new_compressor(&self) -> Box<dyn Compressor> {
        Box::new(Passthrough)
    }

    fn new_decompressor(&self) -> Box<dyn Decompressor> {
        Box::new(Passthrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_pair() {
        let factory = StandardCompressionFactory;
        let mut compressor = factory.new_compressor();
        let mut decompressor = factory.new_decompressor();

        let input = b"name: value";
        let compressed = compressor.compress(input);
        let restored = decompressor.decompress(&compressed);
        assert_eq!(restored.as_ref(), input);
    }
}
