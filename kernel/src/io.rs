//! Serializer: byte-exact dump/load of a [`Tape`] to/from a file.
//!
//! # Wire format
//!
//! ```text
//! offset 0 : state_count   (usize, machine width, native byte order)
//! offset W : state_count * 256 * 4 bytes of raw state entries
//! ```
//!
//! `W` is `size_of::<usize>()` on the writing machine. Within each entry,
//! `out_state` is little-endian, per [`crate::entry::Entry::to_le_bytes`] --
//! the header is native-endian, the entries are not; this matches the
//! original C source exactly (it writes a raw `size_t` header and raw
//! `struct` bytes for each entry, and the entry struct happens to pack
//! `out_state` as little-endian regardless of host order).
//!
//! No magic, no version, no checksum -- deliberately, per spec: a portable
//! header is an explicitly open, non-mandatory question this crate does
//! not resolve (see DESIGN.md).

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::entry::Entry;
use crate::tape::{Tape, STATE_WIDTH};

const STATE_BYTES: usize = STATE_WIDTH * 4;

/// Errors from [`dump`] and [`load`].
#[derive(Debug)]
pub enum IoError {
    /// The file could not be opened for reading or writing.
    Open(std::io::Error),
    /// A read failed or the file ended before the declared content did.
    Read(std::io::Error),
    /// A write failed.
    Write(std::io::Error),
    /// The file is shorter than its own header declares.
    Truncated { expected: usize, got: usize },
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(e) => write!(f, "failed to open tape file: {e}"),
            Self::Read(e) => write!(f, "failed to read tape file: {e}"),
            Self::Write(e) => write!(f, "failed to write tape file: {e}"),
            Self::Truncated { expected, got } => write!(
                f,
                "tape file truncated: header declares {expected} bytes of state data, found {got}"
            ),
        }
    }
}

impl std::error::Error for IoError {}

/// Write `tape` to `path`: header followed by each finished state's 1024
/// bytes, in state order. The file handle is opened and closed within this
/// call.
pub fn dump(tape: &Tape, path: &Path) -> Result<(), IoError> {
    let file = File::create(path).map_err(IoError::Open)?;
    let mut w = BufWriter::new(file);

    let state_count = tape.length() as usize;
    w.write_all(&state_count.to_ne_bytes()).map_err(IoError::Write)?;

    for e in tape.raw_entries() {
        w.write_all(&e.to_le_bytes()).map_err(IoError::Write)?;
    }
    w.flush().map_err(IoError::Write)?;
    Ok(())
}

/// Read a tape from `path`: allocate a tape, grow it to at least
/// `state_count` slots, load all state bytes, and return it with
/// `length() == state_count`. Any partial state built while reading a
/// truncated or malformed file is discarded -- `load` returns an error
/// instead of a partially populated tape.
pub fn load(path: &Path) -> Result<Tape, IoError> {
    let file = File::open(path).map_err(IoError::Open)?;
    let mut r = BufReader::new(file);

    let mut header = [0u8; std::mem::size_of::<usize>()];
    r.read_exact(&mut header).map_err(IoError::Read)?;
    let state_count = usize::from_ne_bytes(header);

    let expected = state_count * STATE_BYTES;
    let mut body = Vec::with_capacity(expected);
    r.read_to_end(&mut body).map_err(IoError::Read)?;
    if body.len() < expected {
        return Err(IoError::Truncated {
            expected,
            got: body.len(),
        });
    }

    let mut entries = Vec::with_capacity(state_count * STATE_WIDTH);
    for chunk in body[..expected].chunks_exact(4) {
        let bytes: [u8; 4] = chunk.try_into().expect("chunks_exact(4)");
        entries.push(Entry::from_le_bytes(bytes));
    }

    Ok(Tape::from_raw_parts(entries, state_count as u32))
}
