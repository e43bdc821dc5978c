use thiserror::Error;

/// Frame-decode failures. All of them are handled by the caller treating
/// the frame as invalid and waiting for the next one (spec.md §7) — none
/// of these propagate as process-fatal errors.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Hamming(7,4) decode found an uncorrectable single-bit error")]
    HammingSingleBitError,
    #[error("Hamming(7,4) decode found a double-bit error")]
    HammingDoubleBitError,
    #[error("Berger check failed: frame claims {claimed} zero bits, counted {counted}")]
    BergerMismatch { claimed: u8, counted: u8 },
}
