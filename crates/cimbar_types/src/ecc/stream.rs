//! Reed-Solomon block codec: wraps a raw byte stream into fixed-size
//! blocks with parity, and unwraps them back, tracking which blocks
//! couldn't be corrected.

use crate::config::Config;
use reed_solomon::{Decoder, Encoder};

/// Result of decoding one Reed-Solomon block.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    /// The block decoded (and was corrected, if needed) successfully.
    Good(Vec<u8>),
    /// The block had more errors than its parity bytes could fix; this is
    /// a sentinel carrying the block's expected data length so callers can
    /// still account for stream position, not a propagated [`std::io::Error`]-style
    /// failure.
    Bad {
        /// How many data bytes this block was expected to carry.
        size: usize,
    },
}

impl Chunk {
    /// Whether this chunk decoded successfully.
    #[must_use]
    pub fn is_good(&self) -> bool {
        matches!(self, Chunk::Good(_))
    }
}

/// Encodes/decodes a byte stream as a sequence of fixed-size Reed-Solomon
/// blocks, per [`Config::ecc_block_size`] and [`Config::ecc_bytes`].
pub struct RsStream {
    data_size: usize,
    ecc_len: usize,
    encoder: Encoder,
    decoder: Decoder,
}

impl RsStream {
    /// Build a stream codec from `config`'s ecc parameters.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let ecc_len = config.ecc_bytes;
        RsStream {
            data_size: config.ecc_block_size - config.ecc_bytes,
            ecc_len,
            encoder: Encoder::new(ecc_len),
            decoder: Decoder::new(ecc_len),
        }
    }

    /// Data bytes carried per block, before parity.
    #[must_use]
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Split `data` into fixed-size blocks (zero-padding the last one) and
    /// append Reed-Solomon parity to each.
    #[must_use]
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len() + data.len() / self.data_size.max(1) * 32);
        for chunk in data.chunks(self.data_size) {
            if chunk.len() == self.data_size {
                out.extend_from_slice(&self.encoder.encode(chunk));
            } else {
                let mut padded = chunk.to_vec();
                padded.resize(self.data_size, 0);
                out.extend_from_slice(&self.encoder.encode(&padded));
            }
        }
        out
    }

    /// Split `encoded` into fixed-size blocks (data + parity) and attempt
    /// to correct each, reporting which ones failed.
    #[must_use]
    pub fn decode(&self, encoded: &[u8]) -> Vec<Chunk> {
        let block_size = self.data_size + self.ecc_len;
        encoded
            .chunks(block_size)
            .map(|block| match self.decoder.correct(block, None) {
                Ok(buffer) => Chunk::Good(buffer.data().to_vec()),
                Err(_) => Chunk::Bad { size: self.data_size },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_without_corruption_is_lossless() {
        let config = Config::baseline();
        let stream = RsStream::new(&config);
        let data = vec![7u8; stream.data_size() * 3];
        let encoded = stream.encode(&data);
        let chunks = stream.decode(&encoded);
        assert_eq!(chunks.len(), 3);
        for chunk in chunks {
            assert!(chunk.is_good());
        }
    }

    #[test]
    fn corrected_block_recovers_flipped_bytes() {
        let config = Config::baseline();
        let stream = RsStream::new(&config);
        let data = vec![42u8; stream.data_size()];
        let mut encoded = stream.encode(&data);
        for b in encoded.iter_mut().take(config.ecc_bytes / 2) {
            *b ^= 0xFF;
        }
        let chunks = stream.decode(&encoded);
        assert_eq!(chunks, vec![Chunk::Good(data)]);
    }

    #[test]
    fn overwhelmed_block_reports_bad_chunk() {
        let config = Config::baseline();
        let stream = RsStream::new(&config);
        let data = vec![1u8; stream.data_size()];
        let mut encoded = stream.encode(&data);
        for b in encoded.iter_mut() {
            *b ^= 0xFF;
        }
        let chunks = stream.decode(&encoded);
        assert_eq!(chunks, vec![Chunk::Bad { size: stream.data_size() }]);
    }
}
