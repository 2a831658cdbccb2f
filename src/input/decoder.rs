//! Escape-sequence decoding state machine.
//!
//! Decoding proceeds through explicit states: a first byte, then after an
//! escape byte the `[`/`O` introducer, then either a letter-coded key or a
//! numeric code awaiting its `~` terminator. Every read past the first is
//! timed; a timeout mid-sequence degrades the whole sequence to a bare
//! [`Key::Esc`] so the machine never blocks indefinitely on a partial
//! sequence.

use std::io;

use crate::event::{LogLevel, emit_log};
use crate::input::key::Key;

const ESC: u8 = 0x1b;

/// A source of raw input bytes with a timed read.
///
/// `Ok(None)` means the read timed out with no byte available. The
/// terminal implements this with its VTIME-bounded read; tests drive the
/// decoder from an in-memory slice.
pub trait ByteSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// In-memory byte source; exhaustion acts as a permanent timeout.
#[derive(Clone, Debug, Default)]
pub struct SliceSource {
    bytes: Vec<u8>,
    pos: usize,
}

impl SliceSource {
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            pos: 0,
        }
    }

    /// Whether every byte has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}

impl ByteSource for SliceSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.bytes.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }
}

/// Block until one logical key has been decoded.
///
/// Timeouts before the first byte simply retry; timeouts inside an escape
/// sequence resolve to [`Key::Esc`].
pub fn read_key<S: ByteSource>(src: &mut S) -> io::Result<Key> {
    loop {
        if let Some(byte) = src.read_byte()? {
            return decode(src, byte);
        }
    }
}

/// Decode one key starting from an already-read first byte.
///
/// Exposed for callers that interleave decoding with their own reads (the
/// terminal size query shares the input stream).
pub fn decode<S: ByteSource>(src: &mut S, first: u8) -> io::Result<Key> {
    if first != ESC {
        return Ok(Key::from(first));
    }
    let Some(introducer) = src.read_byte()? else {
        // No byte within the timeout: a bare Escape press.
        return Ok(Key::Esc);
    };
    match introducer {
        b'[' => decode_bracket(src),
        b'O' => decode_o(src),
        other => {
            log_unrecognized(&[ESC, other]);
            Ok(Key::Esc)
        }
    }
}

/// `ESC [` sequences: letter-coded keys and numeric `~` sequences.
fn decode_bracket<S: ByteSource>(src: &mut S) -> io::Result<Key> {
    let Some(b) = src.read_byte()? else {
        return Ok(Key::Esc);
    };
    match b {
        b'0'..=b'9' => decode_numeric(src, b),
        b'A' => Ok(Key::Up),
        b'B' => Ok(Key::Down),
        b'C' => Ok(Key::Right),
        b'D' => Ok(Key::Left),
        b'H' => Ok(Key::Home),
        b'F' => Ok(Key::End),
        other => {
            log_unrecognized(&[ESC, b'[', other]);
            Ok(Key::Esc)
        }
    }
}

/// `ESC [ <digit> ~` sequences.
fn decode_numeric<S: ByteSource>(src: &mut S, digit: u8) -> io::Result<Key> {
    let Some(terminator) = src.read_byte()? else {
        return Ok(Key::Esc);
    };
    if terminator != b'~' {
        log_unrecognized(&[ESC, b'[', digit, terminator]);
        return Ok(Key::Esc);
    }
    let key = match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => {
            log_unrecognized(&[ESC, b'[', digit, b'~']);
            Key::Esc
        }
    };
    Ok(key)
}

/// `ESC O` sequences.
fn decode_o<S: ByteSource>(src: &mut S) -> io::Result<Key> {
    let Some(b) = src.read_byte()? else {
        return Ok(Key::Esc);
    };
    match b {
        b'H' => Ok(Key::Home),
        b'F' => Ok(Key::End),
        other => {
            log_unrecognized(&[ESC, b'O', other]);
            Ok(Key::Esc)
        }
    }
}

fn log_unrecognized(seq: &[u8]) {
    emit_log(
        LogLevel::Debug,
        &format!("unrecognized input sequence: {seq:02x?}"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_of(bytes: &[u8]) -> Key {
        let mut src = SliceSource::new(bytes);
        let key = read_key(&mut src).unwrap();
        assert!(src.is_exhausted(), "decoder left bytes unconsumed");
        key
    }

    #[test]
    fn test_literal_bytes_pass_through() {
        assert_eq!(key_of(b"a"), Key::Literal(b'a'));
        assert_eq!(key_of(b"Z"), Key::Literal(b'Z'));
        assert_eq!(key_of(b" "), Key::Literal(b' '));
        assert_eq!(key_of(b"\r"), Key::Literal(b'\r'));
        assert_eq!(key_of(&[0x11]), Key::Literal(0x11)); // Ctrl-Q
        assert_eq!(key_of(&[0xfe]), Key::Literal(0xfe));
    }

    #[test]
    fn test_backspace_byte() {
        assert_eq!(key_of(&[127]), Key::Backspace);
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(key_of(b"\x1b[A"), Key::Up);
        assert_eq!(key_of(b"\x1b[B"), Key::Down);
        assert_eq!(key_of(b"\x1b[C"), Key::Right);
        assert_eq!(key_of(b"\x1b[D"), Key::Left);
    }

    #[test]
    fn test_home_end_letter_forms() {
        assert_eq!(key_of(b"\x1b[H"), Key::Home);
        assert_eq!(key_of(b"\x1b[F"), Key::End);
        assert_eq!(key_of(b"\x1bOH"), Key::Home);
        assert_eq!(key_of(b"\x1bOF"), Key::End);
    }

    #[test]
    fn test_tilde_sequences() {
        assert_eq!(key_of(b"\x1b[1~"), Key::Home);
        assert_eq!(key_of(b"\x1b[3~"), Key::Delete);
        assert_eq!(key_of(b"\x1b[4~"), Key::End);
        assert_eq!(key_of(b"\x1b[5~"), Key::PageUp);
        assert_eq!(key_of(b"\x1b[6~"), Key::PageDown);
        assert_eq!(key_of(b"\x1b[7~"), Key::Home);
        assert_eq!(key_of(b"\x1b[8~"), Key::End);
    }

    #[test]
    fn test_bare_escape_on_timeout() {
        assert_eq!(key_of(b"\x1b"), Key::Esc);
    }

    #[test]
    fn test_short_sequences_degrade_to_escape() {
        assert_eq!(key_of(b"\x1b["), Key::Esc);
        assert_eq!(key_of(b"\x1bO"), Key::Esc);
        assert_eq!(key_of(b"\x1b[5"), Key::Esc);
    }

    #[test]
    fn test_unrecognized_sequences_degrade_to_escape() {
        let _guard = crate::event::test_callback_guard();
        assert_eq!(key_of(b"\x1b[Z"), Key::Esc);
        assert_eq!(key_of(b"\x1bOx"), Key::Esc);
        assert_eq!(key_of(b"\x1b[9~"), Key::Esc);
        assert_eq!(key_of(b"\x1b[5x"), Key::Esc);
        assert_eq!(key_of(b"\x1bq"), Key::Esc);
    }

    #[test]
    fn test_read_key_skips_leading_timeouts() {
        // A source that times out twice before yielding a byte.
        struct Flaky {
            misses: usize,
        }
        impl ByteSource for Flaky {
            fn read_byte(&mut self) -> io::Result<Option<u8>> {
                if self.misses > 0 {
                    self.misses -= 1;
                    Ok(None)
                } else {
                    Ok(Some(b'x'))
                }
            }
        }
        let mut src = Flaky { misses: 2 };
        assert_eq!(read_key(&mut src).unwrap(), Key::Literal(b'x'));
    }

    #[test]
    fn test_sequential_keys_from_one_stream() {
        let mut src = SliceSource::new(b"a\x1b[Ab");
        assert_eq!(read_key(&mut src).unwrap(), Key::Literal(b'a'));
        assert_eq!(read_key(&mut src).unwrap(), Key::Up);
        assert_eq!(read_key(&mut src).unwrap(), Key::Literal(b'b'));
    }
}
