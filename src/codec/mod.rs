//! Frame codec boundary: types, compression seam, parser, and generator
//!
//! The wire work lives behind narrow seams. Frames cross this boundary as
//! [`Frame`] values; header compression is pluggable through
//! [`CompressionFactory`] so embedding stacks can supply the real zlib
//! context pair while the core stays dictionary-free.

pub mod compression;
pub mod frame;
pub mod generator;
pub mod parser;
pub mod pool;

pub use compression::{CompressionFactory, Compressor, Decompressor, StandardCompressionFactory};
pub use frame::{go_away_payload, ControlKind, Frame, SessionStatus};
pub use generator::{go_away_frame, Generator};
pub use parser::{FrameListener, Parser};
pub use pool::BufferPool;
