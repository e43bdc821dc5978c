//! Receiver controller: `PHY_CORE` listener threads race the same
//! contention signal, and the first one to finish claims the result
//! (spec.md §4.10).

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use portspam_detect::{DenStreamDetector, Detector, ThresholdResults};
use portspam_frame::{RequestFrame, REQUEST_FRAME_SIZE, decode_request_frame};
use portspam_timing::{Instant, MEDIAN_WINDOW, ReferencePrimitives, Sampler};
use portspam_utils::{ThreadPriority, thread_boot};
use tracing::{debug, trace};

use crate::config::{Config, DetectorBackend};

const INVALID_FRAME: RequestFrame = RequestFrame { init_seq: 0, sequence_number: 0 };

/// The outcome of one [`multi_listen`] call, distinguishing a completed
/// decode from a wall-clock timeout (spec.md §4.10 plus the supplemented
/// `ChannelOutcome` shape — see `crate::outcome`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenResult {
    pub frame: RequestFrame,
    pub timed_out: bool,
}

/// State shared by every listener thread in one [`multi_listen`] call:
/// the "first thread wins" coordination point (spec.md §4.10, §5, §9).
struct ThreadRequestInfos {
    finished: AtomicBool,
    frame: Mutex<RequestFrame>,
    timed_out: AtomicBool,
}

impl ThreadRequestInfos {
    fn new() -> Self {
        Self {
            finished: AtomicBool::new(false),
            frame: Mutex::new(INVALID_FRAME),
            timed_out: AtomicBool::new(false),
        }
    }

    /// Attempts to become the thread that publishes the result. Returns
    /// `true` exactly once, to exactly one caller.
    fn try_claim(&self) -> bool {
        self.finished.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_ok()
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    fn publish(&self, frame: RequestFrame, timed_out: bool) {
        *self.frame.lock().unwrap() = frame;
        self.timed_out.store(timed_out, Ordering::Release);
    }

    fn take(&self) -> ListenResult {
        ListenResult { frame: *self.frame.lock().unwrap(), timed_out: self.timed_out.load(Ordering::Acquire) }
    }
}

fn build_detector(backend: DetectorBackend) -> Box<dyn Detector> {
    match backend {
        DetectorBackend::DenStream { lambda, eps, beta, mu } => {
            Box::new(DenStreamDetector::new(lambda, eps, beta, mu))
        }
        DetectorBackend::Threshold => Box::new(ThresholdResults::new()),
    }
}

fn bits_to_request_frame(bits: &[u8; REQUEST_FRAME_SIZE]) -> RequestFrame {
    let wire: [bool; REQUEST_FRAME_SIZE] = std::array::from_fn(|i| bits[i] != 0);
    decode_request_frame(wire)
}

fn listener_loop(cfg: &Config, shared: &ThreadRequestInfos) {
    let mut detector = build_detector(cfg.detector.backend);
    let mut sampler = Sampler::new(ReferencePrimitives, cfg.phy.receiver_rep, MEDIAN_WINDOW);
    let start = Instant::now();
    let mut timed_out = false;

    loop {
        if shared.is_finished() {
            break;
        }
        if start.elapsed() >= cfg.timeout.request_timeout {
            timed_out = true;
            break;
        }

        let sample = sampler.next_sample();
        if let Err(err) = detector.parse_new_point(sample.y) {
            trace!(?err, "detector error, treating sample as lost");
            continue;
        }

        if detector.bit_count() >= REQUEST_FRAME_SIZE {
            break;
        }
    }

    if shared.try_claim() {
        let bits = detector.get_bits();
        let frame = bits_to_request_frame(&bits);
        debug!(?frame, timed_out, "listener claimed the result");
        shared.publish(frame, timed_out);
    }
}

/// Runs `PHY_CORE` listener threads and returns the first-claimed result,
/// or an `initSeq = 0` invalid frame if the winning thread's bits didn't
/// decode to a valid preamble (spec.md §4.10).
pub fn multi_listen(cfg: &Config) -> ListenResult {
    let shared = ThreadRequestInfos::new();

    std::thread::scope(|scope| {
        for core in 0..cfg.phy.phy_core {
            let shared = &shared;
            scope.spawn(move || {
                thread_boot(Some(core), ThreadPriority::High);
                listener_loop(cfg, shared);
            });
        }
    });

    let result = shared.take();
    if result.frame.init_seq == 10 { result } else { ListenResult { frame: INVALID_FRAME, ..result } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_listen_returns_an_invalid_frame_when_nothing_transmits() {
        let mut cfg = Config::default();
        cfg.phy.phy_core = 1;
        cfg.timeout.request_timeout = portspam_timing::Duration::from_millis(1);
        let result = multi_listen(&cfg);
        assert!(!result.frame.is_valid());
        assert!(result.timed_out);
    }

    #[test]
    fn thread_request_infos_only_lets_one_caller_claim() {
        let shared = ThreadRequestInfos::new();
        assert!(shared.try_claim());
        assert!(!shared.try_claim());
    }
}
