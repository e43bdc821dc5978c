use thiserror::Error;

/// Fatal detector failures. Unlike [`portspam_frame::FrameError`], these
/// are never routed back as "just wait for the next frame" — spec.md §7
/// requires cluster-capacity exhaustion to be treated as a hard invariant
/// violation rather than the source's undefined behavior.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("potential-cluster list is full ({0} clusters)")]
    PotentialClusterCapacityExceeded(usize),
    #[error("outlier-cluster list is full ({0} clusters)")]
    OutlierClusterCapacityExceeded(usize),
    #[error("threshold-detector cluster list is full ({0} clusters)")]
    ThresholdClusterCapacityExceeded(usize),
}
