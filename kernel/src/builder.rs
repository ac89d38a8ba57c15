//! Builder: state-by-state construction over a [`Tape`].
//!
//! Mirrors the source's free-function style over an explicit `&mut` state
//! (the same idiom used throughout this workspace's carrier layer: no
//! `Builder` wrapper struct, just functions taking `&mut Tape`).
//!
//! # Typical construction idiom
//!
//! ```
//! use pegfst_kernel::{builder, tape::Tape};
//!
//! let mut tape = Tape::new();
//! let dead_state = 0u16;
//! let s = builder::clear_instr(&mut tape, dead_state);
//! builder::set_initial_flags(&mut tape);
//! let h = builder::outgoing(&mut tape, b'a');
//! builder::set_outstate(&mut tape, h, 1);
//! builder::set_outchar(&mut tape, h, b'a');
//! builder::finish(&mut tape);
//! assert_eq!(s, 0);
//! assert_eq!(tape.length(), 1);
//! ```

use crate::entry::{FINAL, INITIAL};
use crate::tape::Tape;

/// A handle to one entry of the state currently under construction.
///
/// Unlike the source's raw pointer, this is a plain byte value: it cannot
/// dangle across a `grow`, because it carries no address, only the input
/// byte it addresses within the (always unique) currently staged state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHandle(u8);

/// Begin a new state: grows the tape if needed, and writes all 256 entries
/// of the new current state to `{flags=VALID, outchar=0, out_state=error_state}`
/// (P1). `error_state` is the implicit sink reached by any byte not
/// subsequently overridden -- by convention the dead state index.
pub fn clear_instr(tape: &mut Tape, error_state: u16) -> u32 {
    tape.begin_state(error_state)
}

/// OR the `INITIAL` bit into all 256 entries of the current state.
/// Idempotent (P3).
pub fn set_initial_flags(tape: &mut Tape) {
    for e in tape.staged_entries_mut() {
        e.set_flag(INITIAL);
    }
}

/// OR the `FINAL` bit into all 256 entries of the current state.
/// Idempotent (P3).
pub fn set_final_flags(tape: &mut Tape) {
    for e in tape.staged_entries_mut() {
        e.set_flag(FINAL);
    }
}

/// Return a handle to entry `b` of the current state.
#[must_use]
pub fn outgoing(tape: &mut Tape, b: u8) -> EntryHandle {
    // Touch the entry now so callers on an unstarted tape panic here,
    // not on the later set_outstate/set_outchar call.
    let _ = tape.staged_entry_mut(b);
    EntryHandle(b)
}

/// Set the destination state of the given entry.
pub fn set_outstate(tape: &mut Tape, handle: EntryHandle, n: u16) {
    tape.staged_entry_mut(handle.0).set_out_state(n);
}

/// Set the output byte of the given entry.
pub fn set_outchar(tape: &mut Tape, handle: EntryHandle, c: u8) {
    tape.staged_entry_mut(handle.0).set_outchar(c);
}

/// Close the current state. After `finish`, the state count seen by
/// inspectors and the matcher reflects the just-completed state.
pub fn finish(tape: &mut Tape) {
    tape.finish_state();
}
