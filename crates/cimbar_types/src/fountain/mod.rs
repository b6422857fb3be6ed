//! Fountain coding: wraps a payload so it can be reconstructed from any
//! sufficiently large subset of transmitted chunks, tolerant of frames
//! dropped or duplicated between sender and receiver.

pub mod decoder;
pub mod encoder;
pub mod metadata;

pub use decoder::FountainDecoderSink;
pub use encoder::FountainEncoder;
pub use metadata::FountainMetadata;
