//! Wraps a payload in a RaptorQ fountain code: an unbounded sequence of
//! symbol packets, any sufficiently-sized subset of which (with at most a
//! handful of duplicates) is enough for the receiver to reconstruct the
//! whole payload.

use super::metadata::FountainMetadata;
use crate::config::Config;
use raptorq::{Encoder, EncodingPacket};

/// Fountain-encodes one payload into an endless stream of chunks, each one
/// prefixed with a [`FountainMetadata`] header so the receiver can tell
/// which logical stream (and size) a chunk belongs to without any other
/// side channel.
pub struct FountainEncoder {
    encoder: Encoder,
    metadata: FountainMetadata,
}

impl FountainEncoder {
    /// Wrap `payload` for fountain transmission as stream `encode_id`,
    /// chunking at [`Config::fountain_chunk_size`].
    #[must_use]
    pub fn new(config: &Config, encode_id: u8, payload: &[u8]) -> Self {
        let chunk_size = config.fountain_chunk_size().min(u16::MAX as usize) as u16;
        let encoder = Encoder::with_defaults(payload, chunk_size);
        let metadata = FountainMetadata::new(encode_id, payload.len() as u32);
        FountainEncoder { encoder, metadata }
    }

    /// The header every chunk from this encoder is prefixed with.
    #[must_use]
    pub fn metadata(&self) -> FountainMetadata {
        self.metadata
    }

    /// The source (non-repair) packets, each one ready to send as-is (with
    /// the header prepended).
    #[must_use]
    pub fn source_packets(&self) -> Vec<Vec<u8>> {
        self.encoder
            .get_encoded_packets(0)
            .into_iter()
            .map(|p| self.with_header(&p))
            .collect()
    }

    /// Generate `count` repair packets on top of the source packets, each
    /// prefixed with the stream header. Safe to call repeatedly; a
    /// struggling receiver just needs enough distinct repair symbols in
    /// total, not a particular call's worth.
    pub fn repair_packets(&mut self, count: u32) -> Vec<Vec<u8>> {
        self.encoder
            .get_encoded_packets(count)
            .into_iter()
            .map(|p| self.with_header(&p))
            .collect()
    }

    fn with_header(&self, packet: &EncodingPacket) -> Vec<u8> {
        let mut out = self.metadata.to_bytes().to_vec();
        out.extend_from_slice(&packet.serialize());
        out
    }
}
