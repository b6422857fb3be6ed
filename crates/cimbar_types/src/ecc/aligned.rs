//! Keeps a stream of Reed-Solomon blocks aligned to chunk boundaries across
//! repeated frames of the same payload, so a block that fails once can
//! still be recovered from a later, cleaner capture of the same frame.

use super::stream::{Chunk, RsStream};
use crate::config::Config;

/// Wraps [`RsStream`] with cross-frame memory: once a block position has
/// decoded successfully it's never re-decoded, and a position is only
/// given up on (marked permanently bad) after `max_attempts` straight
/// failures.
pub struct AlignedStream {
    rs: RsStream,
    max_attempts: u32,
    recovered: Vec<Option<Vec<u8>>>,
    attempts: Vec<u32>,
}

impl AlignedStream {
    /// Build an aligned stream over `block_count` blocks, giving up on a
    /// block after `max_attempts` consecutive unrecoverable decodes.
    #[must_use]
    pub fn new(config: &Config, block_count: usize, max_attempts: u32) -> Self {
        AlignedStream {
            rs: RsStream::new(config),
            max_attempts: max_attempts.max(1),
            recovered: vec![None; block_count],
            attempts: vec![0; block_count],
        }
    }

    /// Data bytes carried per block.
    #[must_use]
    pub fn data_size(&self) -> usize {
        self.rs.data_size()
    }

    /// How many of the stream's blocks have decoded successfully so far.
    #[must_use]
    pub fn recovered_count(&self) -> usize {
        self.recovered.iter().filter(|b| b.is_some()).count()
    }

    /// Whether every block has been recovered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.recovered.iter().all(Option::is_some)
    }

    /// Whether a block has permanently failed (hit `max_attempts` with no
    /// success), making the stream as a whole unrecoverable.
    #[must_use]
    pub fn has_permanent_failure(&self) -> bool {
        self.recovered
            .iter()
            .zip(&self.attempts)
            .any(|(slot, &attempts)| slot.is_none() && attempts >= self.max_attempts)
    }

    /// Feed one frame's worth of encoded bytes (already block-aligned with
    /// prior frames of the same payload). Blocks not yet recovered are
    /// decoded and merged in; already-recovered blocks are skipped.
    pub fn ingest(&mut self, encoded: &[u8]) {
        let chunks = self.rs.decode(encoded);
        for (i, chunk) in chunks.into_iter().enumerate() {
            if i >= self.recovered.len() || self.recovered[i].is_some() {
                continue;
            }
            match chunk {
                Chunk::Good(data) => self.recovered[i] = Some(data),
                Chunk::Bad { .. } => self.attempts[i] += 1,
            }
        }
    }

    /// Assemble the recovered payload if every block has succeeded.
    #[must_use]
    pub fn collect(&self) -> Option<Vec<u8>> {
        if !self.is_complete() {
            return None;
        }
        Some(self.recovered.iter().flatten().flatten().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_single_frame_completes_immediately() {
        let config = Config::baseline();
        let rs = RsStream::new(&config);
        let data = vec![9u8; rs.data_size() * 2];
        let encoded = rs.encode(&data);
        let mut stream = AlignedStream::new(&config, 2, 3);
        stream.ingest(&encoded);
        assert!(stream.is_complete());
        assert_eq!(stream.collect(), Some(data));
    }

    #[test]
    fn repeated_bad_block_eventually_permanently_fails() {
        let config = Config::baseline();
        let rs = RsStream::new(&config);
        let data = vec![3u8; rs.data_size()];
        let mut encoded = rs.encode(&data);
        for b in encoded.iter_mut() {
            *b ^= 0xFF;
        }
        let mut stream = AlignedStream::new(&config, 1, 2);
        stream.ingest(&encoded);
        assert!(!stream.has_permanent_failure());
        stream.ingest(&encoded);
        assert!(stream.has_permanent_failure());
    }

    #[test]
    fn block_recovered_from_second_cleaner_frame() {
        let config = Config::baseline();
        let rs = RsStream::new(&config);
        let data = vec![5u8; rs.data_size()];
        let encoded = rs.encode(&data);
        let mut corrupted = encoded.clone();
        for b in corrupted.iter_mut() {
            *b ^= 0xFF;
        }
        let mut stream = AlignedStream::new(&config, 1, 5);
        stream.ingest(&corrupted);
        assert!(!stream.is_complete());
        stream.ingest(&encoded);
        assert!(stream.is_complete());
        assert_eq!(stream.collect(), Some(data));
    }
}
