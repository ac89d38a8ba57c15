//! Shared helpers for matcher throughput benchmarks.

use pegfst_kernel::builder::{clear_instr, finish, outgoing, set_final_flags, set_initial_flags, set_outchar, set_outstate};
use pegfst_kernel::tape::Tape;

/// A one-state transducer that echoes every byte back and accepts
/// everywhere: the cheapest possible per-byte dispatch, useful as a floor
/// for matcher throughput.
#[must_use]
pub fn echo_tape() -> Tape {
    let mut tape = Tape::new();
    clear_instr(&mut tape, 0);
    set_initial_flags(&mut tape);
    set_final_flags(&mut tape);
    for b in 0u16..256 {
        let byte = u8::try_from(b).unwrap();
        let h = outgoing(&mut tape, byte);
        set_outstate(&mut tape, h, 0);
        set_outchar(&mut tape, h, byte);
    }
    finish(&mut tape);
    tape
}

/// Deterministic pseudo-random input of a given length (no external RNG
/// dependency), built from a fixed-seed linear congruential generator.
#[must_use]
pub fn pseudo_random_bytes(len: usize) -> Vec<u8> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            (state >> 33) as u8
        })
        .collect()
}
