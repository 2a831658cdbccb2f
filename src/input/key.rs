//! Logical key events.

/// Byte value of the Backspace key in raw mode.
pub const BACKSPACE_BYTE: u8 = 127;

/// A decoded key event.
///
/// The output alphabet is every literal byte plus the extended keys the
/// decoder recognizes from escape sequences. Byte 127 is surfaced as
/// [`Key::Backspace`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A literal input byte, including control bytes.
    Literal(u8),
    /// Backspace (byte 127).
    Backspace,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Delete key.
    Delete,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Escape key (bare, or an undecodable sequence).
    Esc,
}

impl Key {
    /// The literal for Ctrl plus an ASCII letter.
    #[must_use]
    pub const fn ctrl(c: u8) -> Self {
        Self::Literal(c & 0x1f)
    }

    /// Check if this is an arrow key.
    #[must_use]
    pub fn is_arrow(&self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }

    /// Get the literal byte if this is a literal key.
    #[must_use]
    pub fn literal(&self) -> Option<u8> {
        match self {
            Self::Literal(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<u8> for Key {
    fn from(byte: u8) -> Self {
        if byte == BACKSPACE_BYTE {
            Self::Backspace
        } else {
            Self::Literal(byte)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_mapping() {
        assert_eq!(Key::ctrl(b'q'), Key::Literal(0x11));
        assert_eq!(Key::ctrl(b'Q'), Key::Literal(0x11));
        assert_eq!(Key::ctrl(b's'), Key::Literal(0x13));
    }

    #[test]
    fn test_from_byte() {
        assert_eq!(Key::from(b'a'), Key::Literal(b'a'));
        assert_eq!(Key::from(BACKSPACE_BYTE), Key::Backspace);
    }

    #[test]
    fn test_is_arrow() {
        assert!(Key::Up.is_arrow());
        assert!(Key::Left.is_arrow());
        assert!(!Key::Home.is_arrow());
        assert!(!Key::Literal(b'x').is_arrow());
    }
}
