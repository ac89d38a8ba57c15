//! `Tape`: the instruction tape, a growable arena of 256-entry state tables.
//!
//! This IS the in-memory FST: a sequence of states, each a contiguous run of
//! exactly [`STATE_WIDTH`] entries, indexed `entry(n, b) = n * STATE_WIDTH + b`.
//!
//! The original C source manages a raw realloc'd buffer and hands out raw
//! pointers from `outgoing()`, invalidated by any subsequent mutating call.
//! Rust's owned, moving `Vec<Entry>` makes that whole invalidation contract
//! unnecessary: [`crate::builder::EntryHandle`] is a plain byte value, never
//! a pointer, so there is nothing for `grow` to dangle.
//!
//! A tape under construction has at most one *open* state: the one most
//! recently started with [`Tape::begin_state`] and not yet closed with
//! [`Tape::finish_state`]. [`Tape::length`] counts it immediately, at
//! `begin_state` time -- matching `fse_clear_instr`'s `instrtape->length += 1`
//! in the original C source, which runs before any entry is written and long
//! before `fse_finish` (which only advances the write cursor, never touches
//! `length`). [`Tape::finish_state`] only closes the state for further
//! mutation; it leaves `length` untouched. See DESIGN.md for why this
//! crate follows the original's timing here rather than spec.md's P2
//! wording taken in isolation.

use crate::entry::Entry;

/// Number of entries per logical state: one per possible input byte.
pub const STATE_WIDTH: usize = 256;

/// Upper bound on the number of states a tape may hold (spec Non-goal:
/// automata with more than 65536 states are not supported).
pub const MAX_STATES: u32 = 1 << 16;

/// The instruction tape: a packed arena of consecutive 256-entry states.
#[derive(Debug, Clone)]
pub struct Tape {
    entries: Vec<Entry>,
    /// Number of states written so far, counted from `begin_state` (I2/I3's
    /// externally observable `length`); includes the currently open state,
    /// if any.
    length: u32,
    /// True while a state has been `begin_state`'d but not yet `finish_state`'d.
    staging: bool,
}

impl Tape {
    /// Allocate an empty tape with room for at least one state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Allocate an empty tape with room for at least `states` states.
    #[must_use]
    pub fn with_capacity(states: u32) -> Self {
        let states = states.max(1);
        Self {
            entries: Vec::with_capacity(states as usize * STATE_WIDTH),
            length: 0,
            staging: false,
        }
    }

    /// Number of states counted so far. Includes the currently open state
    /// (if any) from the moment `begin_state` is called, not just finished
    /// ones -- this matches `fse_clear_instr`'s immediate `length += 1` in
    /// the original source.
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// True while a state is mid-construction (between `begin_state` and
    /// `finish_state`).
    #[must_use]
    pub const fn is_staging(&self) -> bool {
        self.staging
    }

    /// Number of states the backing buffer can hold before the next
    /// reallocation (I1: `capacity >= length`).
    #[must_use]
    pub fn capacity_states(&self) -> u32 {
        (self.entries.capacity() / STATE_WIDTH) as u32
    }

    /// Grow the backing buffer so it can hold at least `target_states`
    /// states, reallocating when `capacity <= target_states` (note: `<=`,
    /// not `<` -- the off-by-one in the source is preserved deliberately,
    /// see SPEC_FULL.md "Capacity growth edge case").
    pub fn grow(&mut self, target_states: u32) {
        if self.capacity_states() <= target_states {
            let new_states = (self.capacity_states() * 2).max(target_states).max(1);
            let additional =
                (new_states as usize * STATE_WIDTH).saturating_sub(self.entries.capacity());
            self.entries.reserve(additional);
        }
    }

    /// Begin a new state: grow if needed, append 256 entries of
    /// `Entry::cleared(error_state)` (P1), bump `length` to count it, and
    /// open it for mutation. Returns the new state's index. Panics if a
    /// state is already open.
    pub fn begin_state(&mut self, error_state: u16) -> u32 {
        assert!(
            !self.staging,
            "begin_state called while a state is already staged"
        );
        self.grow(self.length + 1);
        let state = self.length;
        self.entries
            .extend(std::iter::repeat(Entry::cleared(error_state)).take(STATE_WIDTH));
        self.length += 1;
        self.staging = true;
        state
    }

    /// Close the currently open state for mutation. Does not change
    /// `length`, which already counted this state from `begin_state`.
    /// Panics if no state is open.
    pub fn finish_state(&mut self) {
        assert!(self.staging, "finish_state called with no staged state");
        self.staging = false;
    }

    /// Flat index of `entry(state, byte)`.
    fn index(state: u32, byte: u8) -> usize {
        state as usize * STATE_WIDTH + byte as usize
    }

    /// Immutable access to one entry of a counted state (finished, or the
    /// currently open one). Panics if `state >= length()`.
    #[must_use]
    pub fn entry(&self, state: u32, byte: u8) -> Entry {
        assert!(state < self.length, "state {state} out of range");
        self.entries[Self::index(state, byte)]
    }

    /// All 256 entries of a counted state, ascending byte order.
    #[must_use]
    pub fn state_entries(&self, state: u32) -> &[Entry] {
        assert!(state < self.length, "state {state} out of range");
        let start = state as usize * STATE_WIDTH;
        &self.entries[start..start + STATE_WIDTH]
    }

    /// Mutable access to one entry of the *currently open* state. Panics
    /// if no state is open.
    pub fn staged_entry_mut(&mut self, byte: u8) -> &mut Entry {
        assert!(self.staging, "no state is currently staged");
        let idx = Self::index(self.length - 1, byte);
        &mut self.entries[idx]
    }

    /// All 256 entries of the currently open state, mutable. Panics if no
    /// state is open.
    pub fn staged_entries_mut(&mut self) -> &mut [Entry] {
        assert!(self.staging, "no state is currently staged");
        let start = (self.length - 1) as usize * STATE_WIDTH;
        &mut self.entries[start..start + STATE_WIDTH]
    }

    /// Raw entries of the whole tape, in state-major order, finished states
    /// only. Used by the serializer.
    #[must_use]
    pub(crate) fn raw_entries(&self) -> &[Entry] {
        &self.entries[..self.length as usize * STATE_WIDTH]
    }

    /// Rebuild a finished tape directly from a flat entry buffer and a
    /// state count. Used only by [`crate::io::load`].
    pub(crate) fn from_raw_parts(entries: Vec<Entry>, length: u32) -> Self {
        debug_assert_eq!(entries.len(), length as usize * STATE_WIDTH);
        Self {
            entries,
            length,
            staging: false,
        }
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}
