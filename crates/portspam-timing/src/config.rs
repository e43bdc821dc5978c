/// Compile-time tunables of the original C implementation (`config.h`),
/// surfaced as an immutable record constructed once at startup instead of
/// `#define`s (spec.md §9 Design Note).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhyConfig {
    /// Number of physical cores the sender/receiver fan out across.
    pub phy_core: usize,
    /// Wall-time budget of a single transmitted bit, in nanoseconds.
    pub bit_duration: crate::Duration,
    /// Repetitions of the timed primitive per `listen()` call.
    pub receiver_rep: usize,
    /// Repetitions of the spam primitive the sender uses per contended bit.
    pub sender_rep: usize,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self {
            phy_core: 4,
            bit_duration: crate::Duration::from_nanos(1_000_000),
            receiver_rep: 1 << 7,
            sender_rep: 1 << 8,
        }
    }
}
