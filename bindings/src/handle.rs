//! Opaque tape handles and the marshaling layer around `pegfst-kernel`.

use std::path::Path;

use pegfst_kernel::builder::{self, EntryHandle};
use pegfst_kernel::inspector::{self, Outgoing, OutOfRangeState};
use pegfst_kernel::io::{self, IoError};
use pegfst_kernel::matcher::{self, MatchResult};
use pegfst_kernel::tape::Tape;

/// An opaque handle to a tape owned by an [`Engine`]. A scripting host
/// never sees a Rust reference, only this index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeHandle(usize);

/// Errors a host-facing call can surface. Every variant here corresponds
/// to one of spec.md §7's surfaced error kinds, except `OutOfMemory`
/// (which this crate treats as an ordinary Rust allocator abort, per
/// DESIGN.md).
#[derive(Debug)]
pub enum BindingError {
    /// A single-byte-argument function was called with a byte string
    /// whose length is not 1.
    BadArgument { expected_len: usize, got_len: usize },
    /// `dump`/`load` could not open, read, or write the file.
    Io(IoError),
    /// An inspector query named a state index `>= length`.
    OutOfRange(OutOfRangeState),
    /// A call that mutates the currently open state (`set_initial_flags`,
    /// `set_final_flags`, `outgoing`, `set_outstate`, `set_outchar`,
    /// `finish`) was made with no state open -- i.e. before the first
    /// `clear_instr` or after a `finish` with no following `clear_instr`.
    NoOpenState,
    /// `clear_instr` was called while a previously `clear_instr`'d state had
    /// not yet been `finish`'d.
    AlreadyOpen,
    /// The given `TapeHandle` does not refer to a live tape (already
    /// destroyed, or never issued by this `Engine`).
    UnknownHandle,
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadArgument {
                expected_len,
                got_len,
            } => write!(
                f,
                "expected a {expected_len}-byte argument, got {got_len} bytes"
            ),
            Self::Io(e) => write!(f, "{e}"),
            Self::OutOfRange(e) => write!(f, "{e}"),
            Self::NoOpenState => write!(f, "no state is currently open (call clear_instr first)"),
            Self::AlreadyOpen => write!(f, "a state is already open (call finish first)"),
            Self::UnknownHandle => write!(f, "unknown tape handle"),
        }
    }
}

impl std::error::Error for BindingError {}

impl From<OutOfRangeState> for BindingError {
    fn from(e: OutOfRangeState) -> Self {
        Self::OutOfRange(e)
    }
}

impl From<IoError> for BindingError {
    fn from(e: IoError) -> Self {
        Self::Io(e)
    }
}

fn one_byte(arg: &[u8]) -> Result<u8, BindingError> {
    if arg.len() == 1 {
        Ok(arg[0])
    } else {
        Err(BindingError::BadArgument {
            expected_len: 1,
            got_len: arg.len(),
        })
    }
}

/// A row of [`Engine::outgoings`]'s result: the Rust-side stand-in for a
/// host table of `{input, output, state}`. Turning this into an actual
/// host-language table is the embedding glue this crate does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingRow {
    pub input: u8,
    pub output: u8,
    pub state: u16,
}

impl From<Outgoing> for OutgoingRow {
    fn from(o: Outgoing) -> Self {
        Self {
            input: o.input,
            output: o.output,
            state: o.to,
        }
    }
}

/// Owns a slab of tapes addressed by opaque [`TapeHandle`]s and exposes
/// every kernel operation a scripting host needs, with host-facing
/// argument validation.
#[derive(Debug, Default)]
pub struct Engine {
    tapes: Vec<Option<Tape>>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, h: TapeHandle) -> Result<&Tape, BindingError> {
        self.tapes
            .get(h.0)
            .and_then(Option::as_ref)
            .ok_or(BindingError::UnknownHandle)
    }

    fn get_mut(&mut self, h: TapeHandle) -> Result<&mut Tape, BindingError> {
        self.tapes
            .get_mut(h.0)
            .and_then(Option::as_mut)
            .ok_or(BindingError::UnknownHandle)
    }

    /// Allocate a new, empty tape. Always succeeds.
    pub fn tape_new(&mut self) -> TapeHandle {
        self.tapes.push(Some(Tape::new()));
        TapeHandle(self.tapes.len() - 1)
    }

    /// Release a tape. The handle becomes invalid for all further calls.
    pub fn tape_destroy(&mut self, h: TapeHandle) -> Result<(), BindingError> {
        let slot = self.tapes.get_mut(h.0).ok_or(BindingError::UnknownHandle)?;
        if slot.take().is_none() {
            return Err(BindingError::UnknownHandle);
        }
        Ok(())
    }

    /// Register a tape already constructed in-process (used by [`Self::load`]).
    fn register(&mut self, tape: Tape) -> TapeHandle {
        self.tapes.push(Some(tape));
        TapeHandle(self.tapes.len() - 1)
    }

    pub fn clear_instr(&mut self, h: TapeHandle, error_state: u16) -> Result<u32, BindingError> {
        let tape = self.get_mut(h)?;
        if tape.is_staging() {
            return Err(BindingError::AlreadyOpen);
        }
        Ok(builder::clear_instr(tape, error_state))
    }

    pub fn set_initial_flags(&mut self, h: TapeHandle) -> Result<(), BindingError> {
        let tape = self.get_mut(h)?;
        if !tape.is_staging() {
            return Err(BindingError::NoOpenState);
        }
        builder::set_initial_flags(tape);
        Ok(())
    }

    pub fn set_final_flags(&mut self, h: TapeHandle) -> Result<(), BindingError> {
        let tape = self.get_mut(h)?;
        if !tape.is_staging() {
            return Err(BindingError::NoOpenState);
        }
        builder::set_final_flags(tape);
        Ok(())
    }

    /// `byte` must be exactly one byte long (`BadArgument` otherwise).
    pub fn outgoing(&mut self, h: TapeHandle, byte: &[u8]) -> Result<EntryHandle, BindingError> {
        let b = one_byte(byte)?;
        let tape = self.get_mut(h)?;
        if !tape.is_staging() {
            return Err(BindingError::NoOpenState);
        }
        Ok(builder::outgoing(tape, b))
    }

    pub fn set_outstate(
        &mut self,
        h: TapeHandle,
        entry: EntryHandle,
        n: u16,
    ) -> Result<(), BindingError> {
        let tape = self.get_mut(h)?;
        if !tape.is_staging() {
            return Err(BindingError::NoOpenState);
        }
        builder::set_outstate(tape, entry, n);
        Ok(())
    }

    /// `c` must be exactly one byte long (`BadArgument` otherwise).
    pub fn set_outchar(
        &mut self,
        h: TapeHandle,
        entry: EntryHandle,
        c: &[u8],
    ) -> Result<(), BindingError> {
        let c = one_byte(c)?;
        let tape = self.get_mut(h)?;
        if !tape.is_staging() {
            return Err(BindingError::NoOpenState);
        }
        builder::set_outchar(tape, entry, c);
        Ok(())
    }

    pub fn finish(&mut self, h: TapeHandle) -> Result<(), BindingError> {
        let tape = self.get_mut(h)?;
        if !tape.is_staging() {
            return Err(BindingError::NoOpenState);
        }
        builder::finish(tape);
        Ok(())
    }

    pub fn match_bytes(&self, h: TapeHandle, input: &[u8]) -> Result<MatchResult, BindingError> {
        Ok(matcher::match_bytes(self.get(h)?, input))
    }

    pub fn length(&self, h: TapeHandle) -> Result<u32, BindingError> {
        Ok(inspector::length(self.get(h)?))
    }

    pub fn is_valid(&self, h: TapeHandle, n: u32) -> Result<bool, BindingError> {
        Ok(inspector::is_valid(self.get(h)?, n)?)
    }

    pub fn is_initial(&self, h: TapeHandle, n: u32) -> Result<bool, BindingError> {
        Ok(inspector::is_initial(self.get(h)?, n)?)
    }

    pub fn is_final(&self, h: TapeHandle, n: u32) -> Result<bool, BindingError> {
        Ok(inspector::is_final(self.get(h)?, n)?)
    }

    pub fn outgoings(&self, h: TapeHandle, n: u32) -> Result<Vec<OutgoingRow>, BindingError> {
        Ok(inspector::outgoings(self.get(h)?, n)?
            .into_iter()
            .map(OutgoingRow::from)
            .collect())
    }

    pub fn dump(&self, h: TapeHandle, path: &Path) -> Result<(), BindingError> {
        Ok(io::dump(self.get(h)?, path)?)
    }

    pub fn load(&mut self, path: &Path) -> Result<TapeHandle, BindingError> {
        let tape = io::load(path)?;
        Ok(self.register(tape))
    }
}
