//! A single immutable configuration record assembled at startup, composing
//! the sub-configs each crate owns (spec.md §9 design note: "Global
//! tunables ... should be surfaced as a single immutable configuration
//! record constructed at startup and passed by reference").

use portspam_frame::REQUEST_FRAME_SIZE;
use portspam_timing::{Duration, PhyConfig};

/// The original's fixed 16-byte test payload (`"azertyuiopqsdfgh"`), used
/// when no `--test-sequence-file` is supplied (spec.md §4.11).
pub const DEFAULT_TEST_SEQUENCE: [u8; 16] = *b"azertyuiopqsdfgh";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeoutConfig {
    pub request_timeout: Duration,
    /// Reserved: not consulted by the current control loop (spec.md §4.11
    /// only times out the request wait, not the data phase), kept as a
    /// named constant because the original's `config.h` carries it too.
    pub data_timeout: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(50),
            data_timeout: Duration::from_millis(50),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectorBackend {
    DenStream { lambda: f64, eps: f64, beta: f64, mu: f64 },
    Threshold,
}

impl Default for DetectorBackend {
    fn default() -> Self {
        // `receiver.c` defaults to the threshold detector.
        DetectorBackend::Threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    pub backend: DetectorBackend,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { backend: DetectorBackend::default() }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub phy: PhyConfig,
    pub timeout: TimeoutConfig,
    pub detector: DetectorConfig,
    pub test_sequence: [u8; 16],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            phy: PhyConfig::default(),
            timeout: TimeoutConfig::default(),
            detector: DetectorConfig::default(),
            test_sequence: DEFAULT_TEST_SEQUENCE,
        }
    }
}

impl Config {
    pub fn byte_for_sequence(&self, seq: u8) -> u8 {
        self.test_sequence[seq as usize % self.test_sequence.len()]
    }
}

const _: () = assert!(REQUEST_FRAME_SIZE == 12);
