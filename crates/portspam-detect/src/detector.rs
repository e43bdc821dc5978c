//! Two detectors, one pipeline (spec.md §9 design note): DenStream and the
//! threshold detector are both exposed through this trait so the receiver
//! controller can be built against either without caring which one it got.

use portspam_frame::REQUEST_FRAME_SIZE;
use portspam_timing::Sample;

use crate::denstream::DenStreamState;
use crate::error::DetectError;
use crate::results::Results;
use crate::threshold::ThresholdResults;

pub trait Detector {
    /// Resets the detector to a fresh, preamble-hunting state.
    fn init(&mut self);

    /// Feeds one smoothed latency sample into the detector.
    fn parse_new_point(&mut self, value: f64) -> Result<(), DetectError>;

    /// `true` once the init preamble has locked on.
    fn is_preamble_detected(&self) -> bool;

    /// Running count of bits decoded so far, used to decide when a
    /// listener has enough of a frame to stop sampling (spec.md §4.10).
    fn bit_count(&self) -> usize;

    /// The currently decoded bit stream, truncated at `REQUEST_FRAME_SIZE`.
    fn get_bits(&self) -> [u8; REQUEST_FRAME_SIZE];
}

/// DenStream-backed detector: a [`DenStreamState`] clusters the decayed
/// sample stream, and [`Results`] turns stabilized p-clusters into bits.
pub struct DenStreamDetector {
    state: DenStreamState,
    results: Results,
    next_index: u64,
}

impl DenStreamDetector {
    pub fn new(lambda: f64, eps: f64, beta: f64, mu: f64) -> Self {
        Self { state: DenStreamState::new(lambda, eps, beta, mu), results: Results::new(), next_index: 0 }
    }
}

impl Detector for DenStreamDetector {
    fn init(&mut self) {
        let (lambda, eps, beta, mu) = (self.state.lambda, self.state.eps, self.state.beta, self.state.mu);
        *self = Self::new(lambda, eps, beta, mu);
    }

    fn parse_new_point(&mut self, value: f64) -> Result<(), DetectError> {
        let sample = Sample { x: self.next_index as f64, y: value };
        self.next_index += 1;
        let p_changed = self.state.partial_fit(sample)?;
        if p_changed {
            self.state.p_clusters.sort_by(|a, b| a.center.0.total_cmp(&b.center.0));
            self.results.parse_new_cluster(&self.state.p_clusters);
        }
        Ok(())
    }

    fn is_preamble_detected(&self) -> bool {
        self.results.is_preamble_detected()
    }

    fn bit_count(&self) -> usize {
        self.results.bit_number
    }

    fn get_bits(&self) -> [u8; REQUEST_FRAME_SIZE] {
        self.results.get_bits()
    }
}

impl Detector for ThresholdResults {
    fn init(&mut self) {
        *self = ThresholdResults::new();
    }

    fn parse_new_point(&mut self, value: f64) -> Result<(), DetectError> {
        ThresholdResults::parse_new_point(self, value)
    }

    fn is_preamble_detected(&self) -> bool {
        self.init_sequence_detected
    }

    fn bit_count(&self) -> usize {
        self.current_bit_count()
    }

    fn get_bits(&self) -> [u8; REQUEST_FRAME_SIZE] {
        ThresholdResults::get_bits(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denstream_detector_reports_no_preamble_before_any_samples() {
        let d = DenStreamDetector::new(0.25, 50.0, 1.0, 1.0);
        assert!(!d.is_preamble_detected());
    }

    #[test]
    fn threshold_detector_and_denstream_detector_share_one_trait_object_shape() {
        let detectors: Vec<Box<dyn Detector>> =
            vec![Box::new(DenStreamDetector::new(0.25, 50.0, 1.0, 1.0)), Box::new(ThresholdResults::new())];
        assert_eq!(detectors.len(), 2);
        for d in &detectors {
            assert!(!d.is_preamble_detected());
        }
    }
}
