//! `pegfst` kernel: the deterministic core of the PEGREG FST matching engine.
//!
//! # API Surface
//!
//! The kernel exposes exactly three operations a host needs on top of a
//! [`tape::Tape`]:
//!
//! - [`builder`] -- construct a tape state-by-state
//! - [`matcher::match_bytes`] -- walk an input byte string against a finished tape
//! - [`io::dump`] / [`io::load`] -- persist a tape to/from its native-endian wire format
//!
//! [`inspector`] sits alongside the matcher as a read-only query surface for
//! the same finished tape.
//!
//! # Module Dependency Direction
//!
//! `entry` ← `tape` ← `builder` ← `{matcher, inspector, io}`
//!
//! One-way only. No cycles. Everything above `tape` borrows it read-only
//! except `builder`, which is the sole mutator.
//!
//! # Concurrency
//!
//! `Tape` holds no interior mutability, so a finished (no longer being
//! built) tape is `Sync`: concurrent calls to [`matcher::match_bytes`] or
//! [`inspector`] queries from multiple threads against a shared `&Tape` are
//! safe without any unsafe code. Mutating a tape (anything in [`builder`])
//! still requires exclusive `&mut Tape` access, enforced by the borrow
//! checker rather than by caller discipline.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod entry;
pub mod inspector;
pub mod io;
pub mod matcher;
pub mod tape;
