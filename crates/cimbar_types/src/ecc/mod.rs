//! Reed-Solomon error correction, applied per fixed-size block and kept
//! aligned across repeated frames of the same payload.

pub mod aligned;
pub mod stream;

pub use aligned::AlignedStream;
pub use stream::{Chunk, RsStream};
