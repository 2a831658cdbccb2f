//! Edit engine and session state.
//!
//! [`Session`] is the single owner of the document, viewport, dirty flag
//! and status message, threaded by value through the control loop. Edit
//! commands are atomic: each one resolves the cursor's visual column to a
//! raw byte index first and either performs the whole mutation or snaps
//! the cursor and does nothing. Out-of-bounds attempts clamp silently;
//! they never corrupt the buffer and never surface to the operator.

use std::path::PathBuf;

use crate::document::{Document, Line};
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::file;
use crate::input::Key;
use crate::layout::{self, Resolve};
use crate::viewport::Viewport;

/// Fixed key bindings.
pub mod bindings {
    use crate::input::Key;

    /// Quit without saving.
    pub const QUIT: Key = Key::ctrl(b'q');
    /// Save to the original path.
    pub const SAVE: Key = Key::ctrl(b's');
    /// Split the current line.
    pub const ENTER: Key = Key::Literal(b'\r');
    /// Ignored (legacy backspace code).
    pub const CTRL_H: Key = Key::ctrl(b'h');
    /// Ignored (legacy refresh).
    pub const CTRL_L: Key = Key::ctrl(b'l');
}

/// What the control loop should do after a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Transient text for the status row, overwritten by operations.
#[derive(Clone, Debug, Default)]
pub struct StatusMessage {
    text: String,
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Editor session: document, cursor/viewport, and save state.
#[derive(Debug)]
pub struct Session {
    doc: Document,
    view: Viewport,
    dirty: bool,
    filename: Option<PathBuf>,
    status: StatusMessage,
}

impl Session {
    /// Create a session over a loaded document.
    #[must_use]
    pub fn new(doc: Document, filename: Option<PathBuf>, view: Viewport) -> Self {
        Self {
            doc,
            view,
            dirty: false,
            filename,
            status: StatusMessage::default(),
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.view
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.view
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn filename(&self) -> Option<&PathBuf> {
        self.filename.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    /// Whether the welcome banner should be shown instead of the document.
    #[must_use]
    pub fn show_welcome(&self) -> bool {
        self.filename.is_none() && self.doc.is_empty() && !self.dirty
    }

    /// Dispatch one decoded key.
    pub fn apply(&mut self, key: Key) -> Result<Outcome> {
        match key {
            bindings::QUIT => return Ok(Outcome::Quit),
            bindings::SAVE => self.save()?,
            bindings::ENTER => self.enter()?,
            bindings::CTRL_H | bindings::CTRL_L | Key::Esc => {}
            Key::Up => self.view.move_up(),
            Key::Down => self.view.move_down(self.doc.line_count()),
            Key::Left => self.view.move_left(),
            Key::Right => self.view.move_right(),
            Key::PageUp => self.view.page_up(),
            Key::PageDown => self.view.page_down(self.doc.line_count()),
            Key::Home => self.view.home(),
            Key::End => self.view.end(),
            Key::Backspace => self.backspace()?,
            Key::Delete => self.delete()?,
            Key::Literal(b) => self.insert_char(b)?,
        }
        Ok(Outcome::Continue)
    }

    /// Insert one byte at the cursor.
    pub fn insert_char(&mut self, byte: u8) -> Result<()> {
        if self.view.absolute_row() >= self.doc.line_count() {
            // Typing on the slack row past the last line appends a line.
            let pos = self.doc.line_count();
            self.doc.insert_line(pos, Line::new())?;
            self.view.set_absolute_row(pos);
            self.view.set_visual_col(0);
        }
        let row = self.view.absolute_row();
        let col = self.view.visual_col();
        match self.resolve_at(row, col) {
            Some(Resolve::Index(i)) => {
                if let Some(line) = self.doc.line_mut(row) {
                    line.insert_byte(i, byte)?;
                    self.view.set_visual_col(col + layout::visual_width(byte));
                    self.dirty = true;
                }
            }
            Some(Resolve::InsideTab { snap }) => self.view.set_visual_col(snap),
            Some(Resolve::PastEnd { len }) => self.view.set_visual_col(len),
            None => {}
        }
        Ok(())
    }

    /// Delete backward: the byte before the cursor, or join with the
    /// previous line at column 0.
    pub fn backspace(&mut self) -> Result<()> {
        let row = self.view.absolute_row();
        if row >= self.doc.line_count() {
            return Ok(());
        }
        let col = self.view.visual_col();
        if col == 0 {
            if row == 0 {
                return Ok(());
            }
            let removed = self.doc.delete_line(row)?;
            let Some(prev) = self.doc.line_mut(row - 1) else {
                return Ok(());
            };
            let prev_end = layout::visual_len(prev.as_bytes());
            prev.extend_from(removed.as_bytes());
            self.view.move_up();
            self.view.set_visual_col(prev_end);
            self.dirty = true;
            return Ok(());
        }
        match self.resolve_at(row, col) {
            Some(Resolve::Index(i)) => {
                // col > 0 guarantees i > 0.
                if let Some(line) = self.doc.line_mut(row) {
                    let byte = line.delete_byte(i - 1)?;
                    self.view.set_visual_col(col - layout::visual_width(byte));
                    self.dirty = true;
                }
            }
            Some(Resolve::InsideTab { snap }) => self.view.set_visual_col(snap),
            Some(Resolve::PastEnd { len }) => self.view.set_visual_col(len),
            None => {}
        }
        Ok(())
    }

    /// Delete forward: the byte under the cursor. No-op at or past the end
    /// of the line's content.
    pub fn delete(&mut self) -> Result<()> {
        let row = self.view.absolute_row();
        if row >= self.doc.line_count() {
            return Ok(());
        }
        let col = self.view.visual_col();
        let len = self.doc.line(row).map_or(0, Line::len);
        match self.resolve_at(row, col) {
            Some(Resolve::Index(i)) if i < len => {
                if let Some(line) = self.doc.line_mut(row) {
                    line.delete_byte(i)?;
                    self.dirty = true;
                }
            }
            Some(Resolve::Index(_)) | None => {}
            Some(Resolve::InsideTab { snap }) => self.view.set_visual_col(snap),
            Some(Resolve::PastEnd { len }) => self.view.set_visual_col(len),
        }
        Ok(())
    }

    /// Split the current line at the cursor.
    pub fn enter(&mut self) -> Result<()> {
        let row = self.view.absolute_row();
        if row >= self.doc.line_count() {
            return Ok(());
        }
        let col = self.view.visual_col();
        match self.resolve_at(row, col) {
            Some(Resolve::Index(i)) => {
                let Some(line) = self.doc.line_mut(row) else {
                    return Ok(());
                };
                let rest = line.split_off(i)?;
                self.doc.insert_line(row + 1, rest)?;
                self.view.move_down(self.doc.line_count());
                self.view.set_visual_col(0);
                self.dirty = true;
            }
            Some(Resolve::InsideTab { snap }) => self.view.set_visual_col(snap),
            Some(Resolve::PastEnd { len }) => self.view.set_visual_col(len),
            None => {}
        }
        Ok(())
    }

    /// Write the document to its original path and clear the dirty flag.
    ///
    /// Without a filename this is a silent no-op, as in a scratch session.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.filename.clone() else {
            return Ok(());
        };
        let written = file::save(&path, &self.doc)?;
        self.dirty = false;
        // The status counts content bytes; separators are not content.
        self.status.set(format!(
            "{}L, {}B written",
            self.doc.line_count(),
            self.doc.byte_count()
        ));
        emit_log(
            LogLevel::Info,
            &format!("saved {} ({written} bytes)", path.display()),
        );
        Ok(())
    }

    fn resolve_at(&self, row: usize, col: usize) -> Option<Resolve> {
        self.doc
            .line(row)
            .map(|line| layout::resolve(line.as_bytes(), col))
    }
}
