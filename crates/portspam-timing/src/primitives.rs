use crate::Instant;

/// Contract for the opaque, architecture-specific port-saturation
/// primitives (spec.md §4.1). Real implementations monopolize a distinct
/// execution port of the local CPU (e.g. hand-written assembly issuing a
/// chain of port-1-bound or port-5-bound micro-ops, in the manner of
/// `portsmash`'s `p1_spam.S`); that assembly is explicitly out of scope
/// here (spec.md §1) and is represented only by this trait.
///
/// # Contract
///
/// - `saturate_port_a`/`saturate_port_b` must each run for a fixed, small,
///   approximately equal wall-time, well under
///   `bit_duration / sender_rep`, so the busy-wait loops in
///   [`crate::physical`] remain responsive.
/// - `read_timings` must fill every slot of `buf` with a monotonically
///   increasing timestamp, one per repetition.
pub trait PortPrimitives: Send + Sync {
    fn saturate_port_a(&self);
    fn saturate_port_b(&self);
    fn read_timings(&self, buf: &mut [u64]);
}

/// Portable stand-in satisfying the [`PortPrimitives`] contract without any
/// architecture-specific assembly. It does not actually contend on a real
/// execution port; it exists so the physical layer, sampler, and detectors
/// above it have something to drive in tests and on non-x86 development
/// machines. A production deployment supplies its own
/// `PortPrimitives` backed by real port-saturating assembly.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferencePrimitives;

impl ReferencePrimitives {
    /// A short, data-dependent integer chain: cheap to keep well under a
    /// microsecond, but not trivially optimized away.
    #[inline]
    fn churn(rounds: u32) -> u64 {
        let mut acc: u64 = 0x9E37_79B9_7F4A_7C15;
        for _ in 0..rounds {
            acc = acc.wrapping_mul(6364136223846793005).wrapping_add(1);
            acc ^= acc >> 33;
        }
        std::hint::black_box(acc)
    }
}

impl PortPrimitives for ReferencePrimitives {
    #[inline]
    fn saturate_port_a(&self) {
        let _ = Self::churn(64);
    }

    #[inline]
    fn saturate_port_b(&self) {
        let _ = Self::churn(16);
    }

    #[inline]
    fn read_timings(&self, buf: &mut [u64]) {
        let start = Instant::now();
        for slot in buf.iter_mut() {
            let _ = Self::churn(8);
            *slot = start.elapsed().as_nanos();
        }
    }
}
