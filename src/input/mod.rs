//! Terminal input decoding.
//!
//! Raw bytes from the terminal become logical [`Key`] events through a
//! small state machine with bounded lookahead. The machine pulls bytes
//! from a [`ByteSource`] whose timed read is the only suspension point in
//! the editor, so it can be driven from tests without any terminal.

mod decoder;
mod key;

pub use decoder::{ByteSource, SliceSource, read_key};
pub use key::Key;
