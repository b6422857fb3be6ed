//! Block interleaving between logical bit-stream order and physical cell
//! slots, so that a burst of adjacent cell damage (a smudge, a glare spot)
//! spreads its bit errors across many different Reed-Solomon blocks instead
//! of concentrating them in one.

/// Build the forward interleave table: `forward[logical]` is the physical
/// cell slot that should hold the `logical`-th position of the bit stream.
///
/// The `total` positions are split into `partitions` contiguous ranges.
/// Within each partition, positions are written into a conceptual matrix of
/// `blocks` columns, row-major, then read back out column-major - a
/// transpose that scatters each run of `blocks` consecutive Reed-Solomon
/// bytes across widely separated physical slots.
#[must_use]
pub fn interleave_forward(total: usize, blocks: usize, partitions: usize) -> Vec<usize> {
    let blocks = blocks.max(1);
    let partitions = partitions.max(1);
    let mut forward = Vec::with_capacity(total);

    let mut start = 0;
    for p in 0..partitions {
        let remaining_partitions = partitions - p;
        let remaining_total = total - start;
        let partition_len = remaining_total.div_ceil(remaining_partitions);
        let rows = partition_len.div_ceil(blocks);

        // Fill a `rows x blocks` matrix row-major with local indices
        // 0..partition_len, then emit them column-major. Cells past
        // partition_len (a short last row) are simply skipped.
        for col in 0..blocks {
            for row in 0..rows {
                let local = row * blocks + col;
                if local < partition_len {
                    forward.push(start + local);
                }
            }
        }
        start += partition_len;
    }

    forward
}

/// Invert a forward interleave table: `reverse[slot]` is the logical
/// position whose data was interleaved into physical `slot`.
#[must_use]
pub fn interleave_reverse(forward: &[usize]) -> Vec<usize> {
    let mut reverse = vec![0usize; forward.len()];
    for (logical, &slot) in forward.iter().enumerate() {
        reverse[slot] = logical;
    }
    reverse
}
