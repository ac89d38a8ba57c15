//! `Entry`: the atomic transition cell.
//!
//! Ported in spirit from the packed 4-byte instruction records of the
//! original C `fst_fast` state tables.
//!
//! # Layout (4 bytes)
//!
//! | Byte | Width | Field        |
//! |------|-------|--------------|
//! | 0    | u8    | `flags`      |
//! | 1    | u8    | `outchar`    |
//! | 2-3  | u16le | `out_state`  |
//!
//! One `Entry` describes the transition taken from some state `n` on input
//! byte `b`. A logical state is 256 consecutive entries (see [`crate::tape`]).
//!
//! # Equality
//!
//! `Entry` derives `PartialEq`/`Eq` over all three fields, including
//! reserved flag bits. This matters for [`crate::io`]'s dump/load round
//! trip (P8): a byte-identical load must reproduce every bit, not just the
//! bits this crate currently interprets.

/// `flags` bit: entry was constructed by `clear_instr` and has not been
/// freed. Never consulted by the matcher; preserved for forward
/// compatibility with a future nondeterministic variant.
pub const VALID: u8 = 0x01;

/// `flags` bit: the enclosing state is an initial state.
pub const INITIAL: u8 = 0x02;

/// `flags` bit: the enclosing state is an accepting state.
pub const FINAL: u8 = 0x04;

/// A single (flags, outchar, `out_state`) transition cell.
///
/// `#[repr(C)]` fixes the field order; the struct is exactly 4 bytes wide
/// and `Copy`, so bulk operations over a state's 256 entries are plain
/// slice copies with no per-field overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Entry {
    pub flags: u8,
    pub outchar: u8,
    pub out_state: u16,
}

impl Entry {
    /// An entry as written by `clear_instr`: `VALID` set, no output byte,
    /// destination the caller-specified dead/error state.
    #[must_use]
    pub const fn cleared(error_state: u16) -> Self {
        Self {
            flags: VALID,
            outchar: 0,
            out_state: error_state,
        }
    }

    /// True if `flags` has the given bit set.
    #[must_use]
    pub const fn has_flag(self, bit: u8) -> bool {
        self.flags & bit != 0
    }

    /// OR a flag bit into this entry. Idempotent.
    pub fn set_flag(&mut self, bit: u8) {
        self.flags |= bit;
    }

    /// Unconditionally zero every flag bit.
    pub fn clear_flags(&mut self) {
        self.flags = 0;
    }

    /// Set the output byte emitted on this transition. `0` means "emit
    /// nothing" — not validated here, per the builder's documented
    /// caller-owned-invariant contract.
    pub fn set_outchar(&mut self, c: u8) {
        self.outchar = c;
    }

    /// Set the destination state index of this transition.
    pub fn set_out_state(&mut self, n: u16) {
        self.out_state = n;
    }

    /// Decode from the 4 on-disk bytes (native in-memory layout, little-endian
    /// `out_state` as specified by the wire format).
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self {
            flags: bytes[0],
            outchar: bytes[1],
            out_state: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }

    /// Encode to the 4 on-disk bytes.
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 4] {
        let out = self.out_state.to_le_bytes();
        [self.flags, self.outchar, out[0], out[1]]
    }
}
