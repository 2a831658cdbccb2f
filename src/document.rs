//! Line store: the document and its lines.
//!
//! A document is an ordered sequence of lines; each line owns a growable
//! byte sequence with no embedded line feeds. All mutation goes through the
//! edit engine, which resolves cursor positions before calling in — a
//! bounds rejection here therefore signals a broken invariant, not a user
//! condition. Mutations never touch the dirty flag; that is session state.

use crate::error::{Error, Result};

/// A single line of text: a growable raw byte sequence.
///
/// Capacity grows geometrically on demand (amortized doubling) and never
/// shrinks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    /// Create an empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line from raw bytes. Line feeds must already be stripped.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert!(!bytes.contains(&b'\n'));
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Raw content of the line.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the line has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Insert a byte at a raw index in `[0, len]`.
    pub fn insert_byte(&mut self, index: usize, byte: u8) -> Result<()> {
        if index > self.bytes.len() {
            return Err(Error::OutOfBounds {
                index,
                len: self.bytes.len(),
            });
        }
        self.bytes.insert(index, byte);
        Ok(())
    }

    /// Delete the byte at a raw index in `[0, len-1]`. Deleting from an
    /// empty line is rejected.
    pub fn delete_byte(&mut self, index: usize) -> Result<u8> {
        if index >= self.bytes.len() {
            return Err(Error::OutOfBounds {
                index,
                len: self.bytes.len(),
            });
        }
        Ok(self.bytes.remove(index))
    }

    /// Append raw bytes to the line (used by the line-join backspace).
    pub fn extend_from(&mut self, other: &[u8]) {
        self.bytes.extend_from_slice(other);
    }

    /// Split off everything from a raw index, leaving `[0, index)` here.
    pub fn split_off(&mut self, index: usize) -> Result<Line> {
        if index > self.bytes.len() {
            return Err(Error::OutOfBounds {
                index,
                len: self.bytes.len(),
            });
        }
        Ok(Line {
            bytes: self.bytes.split_off(index),
        })
    }
}

/// Ordered sequence of lines; owns all text in the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Create an empty document (zero lines).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from raw file bytes, splitting on line feed.
    ///
    /// No terminator normalization and no encoding validation: a trailing
    /// line feed does not create an empty final line, and an empty input
    /// yields zero lines.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut lines = Vec::new();
        let mut last = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                lines.push(Line::from_bytes(&bytes[last..i]));
                last = i + 1;
            }
        }
        if last != bytes.len() {
            lines.push(Line::from_bytes(&bytes[last..]));
        }
        Self { lines }
    }

    /// Serialize the document: lines joined with line feed, no trailing
    /// terminator.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push(b'\n');
            }
            out.extend_from_slice(line.as_bytes());
        }
        out
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has zero lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total content bytes across all lines, excluding line separators.
    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    /// Borrow a line by index.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Mutably borrow a line by index.
    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    /// Insert a line at a position in `[0, line_count]`, shifting
    /// subsequent lines down.
    pub fn insert_line(&mut self, pos: usize, line: Line) -> Result<()> {
        if pos > self.lines.len() {
            return Err(Error::OutOfBounds {
                index: pos,
                len: self.lines.len(),
            });
        }
        self.lines.insert(pos, line);
        Ok(())
    }

    /// Delete the line at a position in `[0, line_count-1]`, shifting
    /// subsequent lines up. Returns the removed line.
    pub fn delete_line(&mut self, pos: usize) -> Result<Line> {
        if pos >= self.lines.len() {
            return Err(Error::OutOfBounds {
                index: pos,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(pos))
    }
}
