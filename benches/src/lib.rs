//! Benchmark helper utilities for cimbar-rs.
//!
//! Generates synthetic payloads at a few common sizes so the benchmark
//! suite can exercise the codec, ecc, and fountain layers without needing
//! real captured frames on disk.

/// Generates a deterministic pseudo-random payload of the given length.
///
/// Uses a small xorshift generator rather than [`rand`] so benchmark runs
/// are reproducible across machines without pulling in an RNG dependency.
pub fn generate_test_payload(len: usize) -> Vec<u8> {
	let mut state: u32 = 0x9e3779b9;
	let mut out = Vec::with_capacity(len);
	for _ in 0..len {
		state ^= state << 13;
		state ^= state >> 17;
		state ^= state << 5;
		out.push((state & 0xff) as u8);
	}
	out
}

/// Common benchmark sizes for synthetic test data, in bytes.
pub mod sizes {
	/// A handful of bytes: exercises a single reed-solomon block.
	pub const TINY: usize = 64;
	/// A few fountain chunks worth of data.
	pub const SMALL: usize = 4 * 1024;
	/// Enough to span several frames.
	pub const MEDIUM: usize = 64 * 1024;
	/// A multi-frame transfer.
	pub const LARGE: usize = 512 * 1024;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_payload_has_the_requested_length() {
		assert_eq!(generate_test_payload(sizes::TINY).len(), sizes::TINY);
		assert_eq!(generate_test_payload(0).len(), 0);
	}

	#[test]
	fn generated_payload_is_deterministic() {
		assert_eq!(generate_test_payload(256), generate_test_payload(256));
	}
}
