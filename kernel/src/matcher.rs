//! Matcher: the deterministic walk over a finished [`Tape`].
//!
//! A pure function of `(tape, input)`: no mutable configuration of its own,
//! same shape as this workspace's other "pure transform, owned result
//! struct" boundaries (e.g. a compile step that only reads its inputs and
//! returns a single aggregate result).

use crate::entry::FINAL;
use crate::tape::Tape;

/// Output of one [`match_bytes`] call: the emitted bytes, the visited-state
/// trajectory, and whether the final state accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Emitted output bytes: the subsequence of per-step `outchar`s with
    /// zero bytes filtered out (P6).
    pub output: Vec<u8>,
    /// One destination state index per input byte consumed (P5: `|trajectory| == |input|`).
    pub trajectory: Vec<u16>,
    /// `true` iff `trajectory` is non-empty and its last state has the
    /// `FINAL` flag set (P7).
    pub accept: bool,
}

/// Walk `input` against `tape`, starting at state 0 (the conventional
/// initial state -- the matcher does not search for the `INITIAL` flag).
///
/// Deterministic, Θ(`input.len()`) time, one transition per input byte.
/// Does not consult the `VALID` flag.
///
/// # Panics
///
/// Panics if a visited `out_state` is `>= tape.length()`. An out-of-range
/// destination is undefined behavior by the wire contract (a malformed or
/// hand-corrupted tape); Rust turns that into a bounds-check panic rather
/// than silently reading garbage.
#[must_use]
pub fn match_bytes(tape: &Tape, input: &[u8]) -> MatchResult {
    let mut output = Vec::new();
    let mut trajectory = Vec::with_capacity(input.len());
    let mut state = 0u32;

    for &b in input {
        let e = tape.entry(state, b);
        if e.outchar != 0 {
            output.push(e.outchar);
        }
        trajectory.push(e.out_state);
        state = u32::from(e.out_state);
    }

    let accept = trajectory
        .last()
        .is_some_and(|&last| tape.entry(u32::from(last), 0).has_flag(FINAL));

    MatchResult {
        output,
        trajectory,
        accept,
    }
}
