//! The simpler, hard-threshold alternative to DenStream (spec.md §4.7):
//! bucket consecutive samples by whether they cross a fixed latency
//! threshold, then read off a bit stream from the run lengths.

use portspam_frame::REQUEST_FRAME_SIZE;
use portspam_utils::ArrayVec;

use crate::error::DetectError;

pub const MAX_TCLUSTER: usize = 20;
const THRESHOLD: f64 = 1350.0;
const MIN_SPIKE: u32 = 2;
const MAX_SPIKE: u32 = 10;
const BIT_SIZE_0: f64 = 5.0;
const BIT_SIZE_1: f64 = 4.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ThresholdCluster {
    pub point_count: u32,
    pub bit_position: bool,
}

pub struct ThresholdResults {
    pub clusters: ArrayVec<ThresholdCluster, MAX_TCLUSTER>,
    pub threshold: f64,
    pub bit_count: usize,
    pub init_sequence_detected: bool,
    pub bit_size_0: f64,
    pub bit_size_1: f64,
    points_seen: u64,
}

impl Default for ThresholdResults {
    fn default() -> Self {
        Self::new()
    }
}

impl ThresholdResults {
    pub fn new() -> Self {
        Self {
            clusters: ArrayVec::new(),
            threshold: THRESHOLD,
            bit_count: 0,
            init_sequence_detected: false,
            bit_size_0: BIT_SIZE_0,
            bit_size_1: BIT_SIZE_1,
            points_seen: 0,
        }
    }

    fn bit_size_for(&self, bit_position: bool) -> f64 {
        if bit_position { self.bit_size_1 } else { self.bit_size_0 }
    }

    /// Feeds one latency measurement through the run-length bucketer
    /// (spec.md §4.7 `parse_new_point`).
    pub fn parse_new_point(&mut self, p: f64) -> Result<(), DetectError> {
        let b = p > self.threshold;
        self.points_seen += 1;

        if let Some(last) = self.clusters.last_mut().filter(|c| c.bit_position == b) {
            last.point_count += 1;
        } else {
            if self.clusters.is_full() {
                return Err(DetectError::ThresholdClusterCapacityExceeded(MAX_TCLUSTER));
            }
            self.clusters.push(ThresholdCluster { point_count: 1, bit_position: b });
        }

        if !self.init_sequence_detected {
            self.check_init_sequence();
        } else {
            self.smoothen();
        }
        if self.points_seen % 10 == 0 {
            self.recompute_bit_count();
        }
        Ok(())
    }

    fn check_init_sequence(&mut self) {
        let len = self.clusters.len();
        if len < 3 {
            return;
        }
        let window = &self.clusters[len - 3..len];
        let want = [true, false, true];
        let matches_positions =
            window.iter().zip(want.iter()).all(|(c, &w)| c.bit_position == w);
        let matches_spike = window.iter().all(|c| {
            c.point_count > MIN_SPIKE && c.point_count < MAX_SPIKE
        });
        if matches_positions && matches_spike {
            self.init_sequence_detected = true;
        }
    }

    /// Merges a trailing run whose middle cluster is a spurious short spike
    /// (`point_count < MIN_SPIKE`) back into its predecessor.
    fn smoothen(&mut self) {
        let len = self.clusters.len();
        if len < 3 {
            return;
        }
        let (pred, mid, last) = (len - 3, len - 2, len - 1);
        if self.clusters[mid].point_count < MIN_SPIKE {
            let absorbed = self.clusters[mid].point_count + self.clusters[last].point_count;
            self.clusters[pred].point_count += absorbed;
            self.clusters.remove(last);
            self.clusters.remove(mid);
        }
    }

    fn recompute_bit_count(&mut self) {
        self.bit_count = self.current_bit_count();
    }

    /// The running bit total computed fresh from the current cluster list,
    /// as opposed to `self.bit_count`, which is only refreshed every ten
    /// points (spec.md §4.7).
    pub fn current_bit_count(&self) -> usize {
        self.clusters
            .iter()
            .map(|c| (c.point_count as f64 / self.bit_size_for(c.bit_position)).round() as usize)
            .sum()
    }

    /// Emits `round(pointCount / bitSize)` copies of each cluster's
    /// position, truncated at `REQUEST_FRAME_SIZE` (spec.md §4.7
    /// `get_bits`).
    pub fn get_bits(&self) -> [u8; REQUEST_FRAME_SIZE] {
        let mut out = [0u8; REQUEST_FRAME_SIZE];
        let mut i = 0;
        for c in self.clusters.iter() {
            let count = (c.point_count as f64 / self.bit_size_for(c.bit_position)).round() as usize;
            for _ in 0..count {
                if i >= REQUEST_FRAME_SIZE {
                    return out;
                }
                out[i] = u8::from(c.bit_position);
                i += 1;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_spiky_clusters_with_positions_one_zero_one_trigger_init_sequence() {
        let mut r = ThresholdResults::new();
        for _ in 0..5 {
            r.parse_new_point(2000.0).unwrap();
        }
        for _ in 0..4 {
            r.parse_new_point(0.0).unwrap();
        }
        for _ in 0..4 {
            r.parse_new_point(2000.0).unwrap();
        }
        assert!(r.init_sequence_detected);
    }

    #[test]
    fn point_counts_at_or_below_min_spike_must_not_trigger_init_sequence() {
        let mut r = ThresholdResults::new();
        for _ in 0..MIN_SPIKE {
            r.parse_new_point(2000.0).unwrap();
        }
        r.parse_new_point(0.0).unwrap();
        for _ in 0..MIN_SPIKE {
            r.parse_new_point(2000.0).unwrap();
        }
        assert!(!r.init_sequence_detected);
    }

    #[test]
    fn init_sequence_detected_never_reverts() {
        let mut r = ThresholdResults::new();
        for _ in 0..5 {
            r.parse_new_point(2000.0).unwrap();
        }
        for _ in 0..4 {
            r.parse_new_point(0.0).unwrap();
        }
        for _ in 0..4 {
            r.parse_new_point(2000.0).unwrap();
        }
        assert!(r.init_sequence_detected);
        for _ in 0..50 {
            r.parse_new_point(0.0).unwrap();
            assert!(r.init_sequence_detected);
        }
    }

    #[test]
    fn scenario_worked_frame_decode() {
        let mut r = ThresholdResults::new();
        let runs: [(u32, bool); 9] = [
            (5, true),
            (4, false),
            (4, true),
            (5, false),
            (4, true),
            (4, false),
            (20, true),
            (5, false),
            (4, true),
        ];
        for (count, pos) in runs {
            let value = if pos { 2000.0 } else { 0.0 };
            for _ in 0..count {
                r.parse_new_point(value).unwrap();
            }
        }
        r.recompute_bit_count();
        let bits = r.get_bits();
        assert_eq!(&bits[0..6], &[1, 0, 1, 0, 1, 0]);
        assert_eq!(bits[6], 1);
    }

    #[test]
    fn get_bits_never_writes_past_request_frame_size() {
        let mut r = ThresholdResults::new();
        for i in 0..(MAX_TCLUSTER * 2) {
            let value = if i % 2 == 0 { 2000.0 } else { 0.0 };
            for _ in 0..8 {
                let _ = r.parse_new_point(value);
            }
        }
        assert_eq!(r.get_bits().len(), REQUEST_FRAME_SIZE);
    }
}
