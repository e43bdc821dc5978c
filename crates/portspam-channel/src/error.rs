use portspam_detect::DetectError;
use thiserror::Error;

/// Fatal channel-level failures (spec.md §7): detector capacity exhaustion
/// propagates up from `portspam-detect` rather than being silently
/// truncated, and a bad CLI argument is surfaced the same way the driver
/// binary reports it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    #[error("detector error: {0}")]
    Detect(#[from] DetectError),
    #[error("bad argument: {0}")]
    BadArgument(String),
}
