//! Receive-side fountain state: reassembles chunks from up to
//! [`SINK_SLOTS`] concurrently-seen streams, addressed by `encode_id & 0x7`.

use super::metadata::FountainMetadata;
use crate::config::Config;
use raptorq::{Decoder, EncodingPacket, ObjectTransmissionInformation};
use std::collections::HashSet;

/// Number of concurrently tracked streams, and the modulus `encode_id` is
/// addressed into a slot by.
pub const SINK_SLOTS: usize = 8;

struct Slot {
    encode_id: u8,
    payload_size: u32,
    decoder: Decoder,
    /// Distinct packet bodies seen so far, for progress reporting.
    received: HashSet<Vec<u8>>,
    blocks_required: usize,
}

impl Slot {
    fn fresh(header: FountainMetadata, chunk_size: u16) -> Self {
        let blocks_required = (header.payload_size as usize).div_ceil(chunk_size.max(1) as usize).max(1);
        Slot {
            encode_id: header.encode_id,
            payload_size: header.payload_size,
            decoder: Decoder::new(ObjectTransmissionInformation::with_defaults(
                u64::from(header.payload_size),
                chunk_size,
            )),
            received: HashSet::new(),
            blocks_required,
        }
    }

    fn identity(&self) -> (u8, u32) {
        (self.encode_id, self.payload_size)
    }
}

/// A stream's reassembly progress, as reported by [`FountainDecoderSink::progress`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamProgress {
    /// The stream's encode id.
    pub encode_id: u8,
    /// The stream's declared payload size.
    pub payload_size: u32,
    /// Fraction of distinct blocks received so far, in `[0, 1]`.
    pub fraction: f32,
}

/// Reassembles fountain-encoded payloads across however many distinct
/// streams show up interleaved in the incoming chunk sequence, keeping up
/// to [`SINK_SLOTS`] of them live at once.
pub struct FountainDecoderSink {
    chunk_size: u16,
    slots: Vec<Option<Slot>>,
    completed: HashSet<(u8, u32)>,
}

impl FountainDecoderSink {
    /// Build an empty sink sized per `config`'s fountain chunk size.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        FountainDecoderSink {
            chunk_size: config.fountain_chunk_size().min(u16::MAX as usize) as u16,
            slots: (0..SINK_SLOTS).map(|_| None).collect(),
            completed: HashSet::new(),
        }
    }

    /// Feed one header-prefixed chunk (as produced by
    /// [`super::encoder::FountainEncoder`]). Returns the completed payload
    /// the first time a stream finishes decoding.
    ///
    /// Streams already in the completion set are dropped without touching
    /// any slot. A chunk whose `encode_id & 0x7` collides with a
    /// different in-progress stream evicts that stream's slot outright,
    /// regardless of how much progress it had made.
    pub fn ingest(&mut self, chunk: &[u8]) -> Option<Vec<u8>> {
        if chunk.len() <= FountainMetadata::SIZE {
            return None;
        }
        let header = FountainMetadata::from_bytes(&chunk[..FountainMetadata::SIZE]);
        let packet_bytes = &chunk[FountainMetadata::SIZE..];
        let identity = (header.encode_id, header.payload_size);
        if self.completed.contains(&identity) {
            return None;
        }

        let index = header.encode_id as usize & 0x7;
        let needs_fresh = match &self.slots[index] {
            Some(slot) => slot.identity() != identity,
            None => true,
        };
        if needs_fresh {
            self.slots[index] = Some(Slot::fresh(header, self.chunk_size));
        }

        let slot = self.slots[index].as_mut().expect("slot just populated");
        slot.received.insert(packet_bytes.to_vec());

        let packet = EncodingPacket::deserialize(packet_bytes);
        if let Some(result) = slot.decoder.decode(packet) {
            self.slots[index] = None;
            self.completed.insert(identity);
            return Some(result);
        }
        None
    }

    /// Snapshot of every in-progress stream's reassembly fraction.
    #[must_use]
    pub fn progress(&self) -> Vec<StreamProgress> {
        self.slots
            .iter()
            .flatten()
            .map(|slot| StreamProgress {
                encode_id: slot.encode_id,
                payload_size: slot.payload_size,
                fraction: (slot.received.len() as f32 / slot.blocks_required as f32).min(1.0),
            })
            .collect()
    }

    /// Stream identities that have already been fully reassembled.
    #[must_use]
    pub fn completed_identities(&self) -> Vec<(u8, u32)> {
        self.completed.iter().copied().collect()
    }
}
