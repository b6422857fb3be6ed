//! Run-length state machine used to detect a ratio pattern (like 1:1:4:1:1)
//! while sweeping a thresholded scanline.

use std::collections::VecDeque;

/// One bound on the ratio between the center run and a side run, expressed
/// as `(low, high)` multipliers of the center run length.
#[derive(Debug, Clone, Copy)]
pub struct RatioLimit {
    /// Minimum acceptable ratio, or `0.0` for "unconstrained".
    pub low: f64,
    /// Maximum acceptable ratio, or `0.0` for "unconstrained".
    pub high: f64,
}

impl RatioLimit {
    const fn unconstrained() -> Self {
        RatioLimit { low: 0.0, high: 0.0 }
    }

    const fn new(low: f64, high: f64) -> Self {
        RatioLimit { low, high }
    }
}

/// A six-state run-length tally machine: feed it `true`/`false` pixel
/// activity one sample at a time via [`ScanState::process`]. Every time the
/// tally fills (5 runs recorded), [`ScanState::evaluate`] checks whether
/// the run lengths match the target ratio; the state then pops back two
/// positions so overlapping candidate patterns starting mid-scan are still
/// found, instead of requiring a full restart.
#[derive(Debug, Clone)]
pub struct ScanState {
    tally: VecDeque<i64>,
    state: u8,
    limits: [RatioLimit; 6],
}

/// The 1:1:4:1:1 ratio used for the three primary corner anchors.
pub fn primary_limits() -> [RatioLimit; 6] {
    [
        RatioLimit::unconstrained(),
        RatioLimit::new(3.0, 6.0),
        RatioLimit::new(3.0, 6.0),
        RatioLimit::unconstrained(),
        RatioLimit::new(3.0, 6.0),
        RatioLimit::new(3.0, 6.0),
    ]
}

/// The 1:2:2:1 ratio used for the fourth (bottom-right) confirmation anchor.
pub fn secondary_limits() -> [RatioLimit; 6] {
    [
        RatioLimit::unconstrained(),
        RatioLimit::new(1.0, 3.0),
        RatioLimit::new(0.5, 1.5),
        RatioLimit::unconstrained(),
        RatioLimit::new(0.5, 1.5),
        RatioLimit::new(1.0, 3.0),
    ]
}

impl ScanState {
    /// Build a fresh state machine checking for `limits`.
    #[must_use]
    pub fn new(limits: [RatioLimit; 6]) -> Self {
        ScanState {
            tally: VecDeque::new(),
            state: 0,
            limits,
        }
    }

    /// Feed one more scanline sample. Returns `Some(total_size)` of a
    /// matched pattern if this sample completed one, `None` otherwise.
    pub fn process(&mut self, active: bool) -> Option<i64> {
        let transition = (self.state % 2 == 0 && active) || (self.state % 2 == 1 && !active);
        if self.state == 0 && !transition {
            // before the first edge; nothing to tally yet
            return None;
        }
        if transition {
            self.state += 1;
            self.tally.push_back(1);
        } else if let Some(back) = self.tally.back_mut() {
            *back += 1;
        }

        if self.state < 6 {
            return None;
        }

        let result = self.evaluate();
        self.pop_state();
        result
    }

    fn evaluate(&self) -> Option<i64> {
        if self.tally.len() < 5 || self.tally.iter().take(5).any(|&v| v == 0) {
            return None;
        }
        let values: Vec<i64> = self.tally.iter().take(5).copied().collect();
        let center = values[2] as f64;

        // side runs, 1-indexed in the original 5-run tally: {1, 2, 4, 5}
        for &i in &[1usize, 2, 4, 5] {
            let limit = self.limits[i];
            if limit.low == 0.0 && limit.high == 0.0 {
                continue;
            }
            let side = values[i - 1] as f64;
            let ratio_min = center / (side + 1.0);
            let ratio_max = center / (side - 1.0).max(1.0);
            // Reject only if the [ratio_min, ratio_max] tolerance band
            // (the true ratio could be anywhere in it, +/- one pixel of
            // run-length noise) falls entirely outside the target band.
            if ratio_max < limit.low || ratio_min > limit.high {
                return None;
            }
        }
        Some(values.iter().sum())
    }

    fn pop_state(&mut self) {
        self.tally.pop_front();
        self.tally.pop_front();
        self.state = self.state.saturating_sub(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(state: &mut ScanState, pattern: &[bool]) -> Option<i64> {
        let mut last = None;
        for &active in pattern {
            if let Some(v) = state.process(active) {
                last = Some(v);
            }
        }
        last
    }

    #[test]
    fn primary_pattern_1_1_4_1_1_matches() {
        let mut state = ScanState::new(primary_limits());
        // runs: 1 white(ignored leading), 1 black, 1 white, 4 black, 1 white, 1 black
        let pattern = [
            false, // leading run (state 0, not yet counted meaningfully)
            true, // run 1 (black, len 1) -> state 1
            false, // run 2 (white, len 1) -> state 2
            true, true, true, true, // run 3 (black, len 4) -> state 3
            false, // run 4 (white, len 1) -> state 4
            true, // run 5 (black, len 1) -> state 5... one more sample needed to close state 5
            false, // closes run 5 and transitions into state 6 evaluation
        ];
        let result = feed(&mut state, &pattern);
        assert!(result.is_some(), "expected a match, got none");
    }

    #[test]
    fn mismatched_ratio_does_not_match() {
        let mut state = ScanState::new(primary_limits());
        let pattern = [false, true, false, true, false, true, false, true, false];
        let result = feed(&mut state, &pattern);
        assert!(result.is_none());
    }
}
