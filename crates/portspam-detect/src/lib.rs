//! Bit detection: the DenStream micro-cluster stream clusterer and the
//! simpler threshold detector, both turning a stream of smoothed latency
//! samples into a request-frame bit sequence (spec.md §4.4–§4.7).

mod denstream;
mod detector;
mod error;
mod micro_cluster;
mod results;
mod threshold;

pub use denstream::{DenStreamState, MAX_CLUSTER};
pub use detector::{DenStreamDetector, Detector};
pub use error::DetectError;
pub use micro_cluster::MicroCluster;
pub use results::{Calibration, Results};
pub use threshold::{MAX_TCLUSTER, ThresholdCluster, ThresholdResults};
