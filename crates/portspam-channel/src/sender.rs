//! Sender controller: fans a `DataFrame` transmission out across
//! `PHY_CORE` pinned worker threads so every physical core contends on the
//! target port simultaneously (spec.md §4.9).

use portspam_frame::encode_data_frame;
use portspam_timing::{PortPrimitives, ReferencePrimitives, send_sequence};
use portspam_utils::{ThreadPriority, thread_boot};
use tracing::debug;

use crate::config::Config;

/// Encodes `byte`/`seq` into a 21-bit `DataFrame` and transmits it
/// concurrently from one pinned thread per physical core. Blocks until
/// every worker has finished.
pub fn multi_threaded_sender(cfg: &Config, byte: u8, seq: u8) {
    let frame = encode_data_frame(byte, seq);
    let bits: Vec<bool> = frame.to_vec();
    debug!(byte, seq, cores = cfg.phy.phy_core, "sending data frame");

    std::thread::scope(|scope| {
        for core in 0..cfg.phy.phy_core {
            let bits = &bits;
            let bit_duration = cfg.phy.bit_duration;
            scope.spawn(move || {
                thread_boot(Some(core), ThreadPriority::High);
                let prims = ReferencePrimitives;
                send_one_frame(&prims, bits, bit_duration);
            });
        }
    });
}

fn send_one_frame(prims: &impl PortPrimitives, bits: &[bool], bit_duration: portspam_timing::Duration) {
    send_sequence(prims, bits, bit_duration);
}
