//! Terminal collaborator: raw mode, timed reads, frame writes, size query.

mod raw;

pub use raw::{RawModeGuard, enable_raw_mode, ioctl_size, is_tty};

use std::io::{self, Read, Write};

use crate::ansi;
use crate::error::{Error, Result};
use crate::input::ByteSource;

/// Terminal handle holding raw mode for the lifetime of the session.
///
/// Reads are bounded by the termios VTIME timeout, writes are whole
/// frames. Dropping the handle restores the original terminal state.
#[derive(Debug)]
pub struct Terminal {
    stdin: io::Stdin,
    stdout: io::Stdout,
    _raw: RawModeGuard,
}

impl Terminal {
    /// Enter raw mode and take ownership of the standard streams.
    pub fn new() -> Result<Self> {
        let raw = enable_raw_mode()?;
        Ok(Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            _raw: raw,
        })
    }

    /// Query the terminal dimensions, in (columns, rows).
    ///
    /// The ioctl is authoritative when it works; otherwise fall back to
    /// the cursor-position escape round-trip: push the cursor to the
    /// bottom-right corner and ask where it ended up.
    pub fn size(&mut self) -> Result<(usize, usize)> {
        if let Ok((cols, rows)) = ioctl_size() {
            return Ok((usize::from(cols), usize::from(rows)));
        }
        self.stdout.write_all(ansi::CURSOR_TO_CORNER.as_bytes())?;
        self.stdout
            .write_all(ansi::CURSOR_POSITION_REPORT.as_bytes())?;
        self.stdout.flush()?;

        let mut response = Vec::with_capacity(16);
        loop {
            match self.read_byte()? {
                Some(b'R') => break,
                Some(b) => {
                    if response.len() >= 32 {
                        break;
                    }
                    response.push(b);
                }
                // Timeout mid-response: the terminal is not answering.
                None => break,
            }
        }
        parse_cursor_report(&response).ok_or(Error::InvalidDimensions {
            width: 0,
            height: 0,
        })
    }

    /// Write one complete frame and flush.
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.stdout.write_all(frame)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Clear the screen and home the cursor (used on quit).
    pub fn clear(&mut self) -> Result<()> {
        self.stdout.write_all(ansi::CLEAR_SCREEN.as_bytes())?;
        self.stdout.write_all(ansi::CURSOR_HOME.as_bytes())?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl ByteSource for Terminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            return match self.stdin.read(&mut buf) {
                Ok(0) => Ok(None), // VTIME expired with no byte
                Ok(_) => Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => Err(e),
            };
        }
    }
}

/// Parse the body of a cursor position report, `ESC [ rows ; cols` (the
/// terminating `R` already consumed). Returns (columns, rows).
fn parse_cursor_report(response: &[u8]) -> Option<(usize, usize)> {
    let body = response.strip_prefix(b"\x1b[")?;
    let body = std::str::from_utf8(body).ok()?;
    let (rows, cols) = body.split_once(';')?;
    let rows: usize = rows.parse().ok()?;
    let cols: usize = cols.parse().ok()?;
    if rows == 0 || cols == 0 {
        return None;
    }
    Some((cols, rows))
}
