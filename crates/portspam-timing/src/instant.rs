use crate::Duration;

/// A monotonic clock reading, backed by `quanta` rather than
/// `std::time::Instant` so the same clock source is reused for both the
/// bit-duration busy loops and the sampler's latency measurements (the
/// teacher workspace makes the same choice in `flux-timing::instant`, there
/// backed by `rdtscp`; we don't need socket-tagged cycles here, only a
/// cheap, monotonic nanosecond source).
#[derive(Copy, Clone, Debug)]
pub struct Instant(quanta::Instant);

impl Instant {
    #[inline]
    pub fn now() -> Self {
        Self(quanta::Instant::now())
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        Duration::from(self.0.elapsed())
    }

    #[inline]
    pub fn elapsed_since(&self, since: Instant) -> Duration {
        Duration::from(self.0.saturating_duration_since(since.0))
    }
}
