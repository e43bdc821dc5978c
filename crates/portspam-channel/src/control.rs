//! The half-duplex main control loop: listen for a request, then answer it
//! (spec.md §4.11).

use portspam_frame::RequestFrame;
use tracing::{info, warn};

use crate::config::Config;
use crate::outcome::ChannelOutcome;
use crate::receiver::multi_listen;
use crate::sender::multi_threaded_sender;

const HANDOFF_DELAY: std::time::Duration = std::time::Duration::from_millis(2);

/// Listens for one request frame and validates it (spec.md §4.11:
/// `initSeq == 10 ∧ seq < 16`).
pub fn wait_request_frame(cfg: &Config) -> (RequestFrame, bool) {
    let result = multi_listen(cfg);
    (result.frame, result.timed_out)
}

/// Runs one request/response round: listens, and if the request validates,
/// sleeps the handoff delay before answering with the configured byte for
/// that sequence number.
pub fn run_once(cfg: &Config) -> ChannelOutcome {
    let (frame, timed_out) = wait_request_frame(cfg);

    if !frame.is_valid() {
        return if timed_out { ChannelOutcome::Timeout } else { ChannelOutcome::InvalidFrame };
    }

    std::thread::sleep(HANDOFF_DELAY);
    let byte = cfg.byte_for_sequence(frame.sequence_number);
    multi_threaded_sender(cfg, byte, frame.sequence_number);
    ChannelOutcome::ValidAnswer { sequence_number: frame.sequence_number, byte }
}

/// Runs [`run_once`] forever, logging each outcome. The process entry
/// point's event loop (spec.md §4.11: "Repeatedly: ...").
pub fn run_forever(cfg: &Config) -> ! {
    loop {
        match run_once(cfg) {
            ChannelOutcome::ValidAnswer { sequence_number, byte } => {
                info!(sequence_number, byte, "answered request");
            }
            ChannelOutcome::InvalidFrame => {
                warn!("discarded invalid request frame");
            }
            ChannelOutcome::Timeout => {
                warn!("listener timed out waiting for a request");
            }
        }
    }
}
