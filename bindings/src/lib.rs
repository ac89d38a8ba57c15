//! pegfst host bindings: the procedural surface a scripting host would call.
//!
//! This crate does NOT implement matching, construction, or serialization
//! logic -- it delegates entirely to `pegfst-kernel`. It owns exactly one
//! thing the kernel does not: marshaling. Tape handles become opaque
//! indices (never raw references), single-character host arguments are
//! validated to be exactly one byte, and every kernel panic boundary (out
//! of range state, no state open, a state already open) is checked by
//! [`Engine`] before it delegates, and turned into a typed `Result` that can
//! cross an FFI/scripting boundary instead of unwinding into a host that
//! does not speak Rust panics.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

mod handle;

pub use handle::{BindingError, Engine, TapeHandle};
