use crate::{Duration, Instant, PortPrimitives};

/// Emits a single `1`-bit by busy-looping port-A saturation for
/// `bit_duration`. Returns once elapsed wall time reaches `bit_duration`.
#[inline]
pub fn send_one(prims: &impl PortPrimitives, bit_duration: Duration) {
    let start = Instant::now();
    while start.elapsed() < bit_duration {
        prims.saturate_port_a();
    }
}

/// Emits a single `0`-bit: idles for `bit_duration` without contending on
/// any port.
#[inline]
pub fn send_zero(bit_duration: Duration) {
    let start = Instant::now();
    while start.elapsed() < bit_duration {
        std::hint::spin_loop();
    }
}

/// Emits a bit sequence in order, one bit per `bit_duration`.
pub fn send_sequence(prims: &impl PortPrimitives, bits: &[bool], bit_duration: Duration) {
    for &bit in bits {
        if bit {
            send_one(prims, bit_duration);
        } else {
            send_zero(bit_duration);
        }
    }
}
