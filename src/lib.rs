//! ted - a raw-terminal text editor core.
//!
//! Byte-oriented line buffer, tab-aware visual-column mapping, viewport
//! scrolling, escape-sequence key decoding, and single-write frame
//! rendering. The binary wires these to a Unix terminal; everything here
//! is testable without one.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional dimension casts
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod ansi;
pub mod document;
pub mod editor;
pub mod error;
pub mod event;
pub mod file;
pub mod input;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod viewport;

// Re-export core types at crate root
pub use document::{Document, Line};
pub use editor::{Outcome, Session, StatusMessage};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_log, set_log_callback};
pub use input::{ByteSource, Key, SliceSource, read_key};
pub use layout::{Resolve, TAB_SIZE};
pub use render::Renderer;
pub use terminal::{RawModeGuard, Terminal, enable_raw_mode, is_tty};
pub use viewport::Viewport;
