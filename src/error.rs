//! Error types for ted.

use std::fmt;
use std::io;

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for editor operations.
///
/// Environment failures (`Io`, `InvalidDimensions`) are fatal: they unwind
/// to `main`, which restores the screen and reports. Logical edge cases
/// never become errors; the edit engine clamps them silently.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal or file operations.
    Io(io::Error),
    /// Position out of bounds within a line or the document.
    OutOfBounds { index: usize, len: usize },
    /// Terminal reported unusable dimensions.
    InvalidDimensions { width: usize, height: usize },
    /// Invalid command-line invocation.
    Usage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid terminal dimensions: {width}x{height}")
            }
            Self::Usage(msg) => write!(f, "usage error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutOfBounds { index: 10, len: 3 };
        assert!(err.to_string().contains("index 10"));

        let err = Error::InvalidDimensions {
            width: 0,
            height: 24,
        };
        assert!(err.to_string().contains("0x24"));

        let err = Error::Usage("too many arguments".to_string());
        assert!(err.to_string().contains("too many arguments"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
