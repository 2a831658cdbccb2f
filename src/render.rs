//! Frame composition.
//!
//! The renderer assembles one complete output frame per refresh into a
//! reusable byte buffer, and the caller writes it with a single
//! `write_all`. The single batched write is a correctness requirement:
//! partial writes between rows would tear the screen on slow terminals.

use crate::ansi;
use crate::editor::Session;
use crate::layout::visual_width;

/// Program name shown on the welcome banner.
pub const NAME: &str = "ted";

/// Program version shown on the welcome banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const FILLER: &str = "~";
const SCROLLBAR_THUMB: &str = "\u{2588}"; // full block
const SCROLLBAR_TRACK: &str = " ";

/// Composes frames over a session's document and viewport state.
#[derive(Debug, Default)]
pub struct Renderer {
    buf: Vec<u8>,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the frame for the session's current state.
    ///
    /// Layout: `height` text rows each followed by clear-to-end-of-line
    /// and a scrollbar cell in the terminal's last column, then the status
    /// row, then the cursor-position escape matching the logical cursor.
    pub fn frame(&mut self, session: &Session) -> &[u8] {
        self.buf.clear();
        let view = session.viewport();
        let width = view.width();
        let height = view.height();

        self.push(ansi::CURSOR_HIDE);
        self.push(ansi::CURSOR_HOME);

        let (thumb_top, thumb_len) = scrollbar_thumb(
            view.top_row(),
            height,
            session.document().line_count(),
        );

        for y in 0..height {
            if session.show_welcome() {
                self.push_welcome_row(y, width, height);
            } else {
                self.push_text_row(session, y, width);
            }
            self.push(ansi::CLEAR_LINE_RIGHT);
            self.push(&ansi::cursor_column(width + 1));
            if (thumb_top..thumb_top + thumb_len).contains(&y) {
                self.push(SCROLLBAR_THUMB);
            } else {
                self.push(SCROLLBAR_TRACK);
            }
            self.push("\r\n");
        }

        self.push_status_row(session, width + 1);

        self.push(&ansi::cursor_position(view.cy() + 1, view.cx() + 1));
        self.push(ansi::CURSOR_SHOW);
        &self.buf
    }

    fn push(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// One document row, tab-expanded and clipped to the visible window.
    fn push_text_row(&mut self, session: &Session, y: usize, width: usize) {
        let view = session.viewport();
        let row = view.top_row() + y;
        let Some(line) = session.document().line(row) else {
            self.push(FILLER);
            return;
        };
        let window = view.left_col()..view.left_col() + width;
        let mut col = 0;
        for &b in line.as_bytes() {
            if col >= window.end {
                break;
            }
            let w = visual_width(b);
            if b == b'\t' {
                for cell in col..col + w {
                    if window.contains(&cell) {
                        self.buf.push(b' ');
                    }
                }
            } else if window.contains(&col) {
                self.buf.push(b);
            }
            col += w;
        }
    }

    fn push_welcome_row(&mut self, y: usize, width: usize, height: usize) {
        let banner = height / 3;
        let text = if y == banner {
            format!("{NAME} -- version {VERSION}")
        } else if y == banner + 1 {
            format!("Use '{NAME} <file>' to edit a file.")
        } else if y == banner + 2 {
            "Ctrl-S saves, Ctrl-Q quits.".to_string()
        } else {
            self.push(FILLER);
            return;
        };
        let padding = width.saturating_sub(text.len()) / 2;
        for _ in 0..padding {
            self.buf.push(b' ');
        }
        let visible = text.len().min(width);
        self.push(&text[..visible]);
    }

    /// Status row: mode and dirty indicators, filename and transient
    /// message on the left, `row,col percent%` right-aligned.
    fn push_status_row(&mut self, session: &Session, width: usize) {
        let view = session.viewport();
        let mut left = String::from("-- INSERT --");
        if session.is_dirty() {
            left.push_str(" (modified)");
        }
        if let Some(name) = session.filename() {
            left.push(' ');
            left.push_str(&name.display().to_string());
        }
        if !session.status().is_empty() {
            left.push(' ');
            left.push_str(session.status());
        }

        let total = session.document().line_count();
        let row = view.absolute_row() + 1;
        let percent = (row * 100 / total.max(1)).min(100);
        let right = format!("{row},{} {percent}%", view.visual_col() + 1);

        if left.len() + right.len() + 1 > width {
            left.truncate(width.saturating_sub(right.len() + 1));
        }
        self.push(&left);
        for _ in 0..width.saturating_sub(left.len() + right.len()) {
            self.buf.push(b' ');
        }
        self.push(&right);
        self.push(ansi::CLEAR_LINE_RIGHT);
    }
}

/// Thumb placement for a scrollbar over `height` visible rows of a
/// `total`-row document.
fn scrollbar_thumb(top_row: usize, height: usize, total: usize) -> (usize, usize) {
    let total = total.max(1);
    if total <= height {
        return (0, height);
    }
    let len = (height * height / total).max(1);
    let top = (top_row * height / total).min(height - len);
    (top, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::editor::Session;
    use crate::layout::TAB_SIZE;
    use crate::viewport::Viewport;

    fn frame_string(content: &[u8], width: usize, height: usize) -> String {
        let session = Session::new(
            Document::from_bytes(content),
            Some(std::path::PathBuf::from("t.txt")),
            Viewport::new(width, height),
        );
        let mut renderer = Renderer::new();
        String::from_utf8_lossy(renderer.frame(&session)).into_owned()
    }

    #[test]
    fn test_frame_brackets_cursor_visibility() {
        let s = frame_string(b"hello", 10, 3);
        assert!(s.starts_with("\x1b[?25l\x1b[H"));
        assert!(s.ends_with("\x1b[?25h"));
    }

    #[test]
    fn test_frame_has_one_row_clear_per_text_row() {
        let s = frame_string(b"a\nb", 10, 4);
        // Four text rows plus the status row each clear to end of line.
        assert_eq!(s.matches("\x1b[K").count(), 5);
        assert_eq!(s.matches("\r\n").count(), 4);
    }

    #[test]
    fn test_filler_rows_past_end_of_document() {
        let s = frame_string(b"only", 10, 4);
        assert_eq!(s.matches('~').count(), 3);
    }

    #[test]
    fn test_tab_expands_to_fixed_width() {
        let s = frame_string(b"\tx", 20, 2);
        let expected = format!("{}x", " ".repeat(TAB_SIZE));
        assert!(s.contains(&expected));
    }

    #[test]
    fn test_long_line_clipped_to_window() {
        let s = frame_string(b"abcdefghijklmnop", 8, 2);
        assert!(s.contains("abcdefgh"));
        assert!(!s.contains("abcdefghi"));
    }

    #[test]
    fn test_status_row_contents() {
        let s = frame_string(b"one\ntwo\nthree", 40, 4);
        assert!(s.contains("-- INSERT --"));
        assert!(s.contains("t.txt"));
        assert!(s.contains("1,1 33%"));
        assert!(!s.contains("(modified)"));
    }

    #[test]
    fn test_status_row_dirty_marker() {
        let mut session = Session::new(
            Document::from_bytes(b"x"),
            None,
            Viewport::new(40, 4),
        );
        session.insert_char(b'y').unwrap();
        let mut renderer = Renderer::new();
        let s = String::from_utf8_lossy(renderer.frame(&session)).into_owned();
        assert!(s.contains("(modified)"));
    }

    #[test]
    fn test_welcome_banner_when_no_file() {
        let session = Session::new(Document::new(), None, Viewport::new(60, 12));
        let mut renderer = Renderer::new();
        let s = String::from_utf8_lossy(renderer.frame(&session)).into_owned();
        assert!(s.contains(NAME));
        assert!(s.contains(VERSION));
        assert!(s.contains("Ctrl-S saves, Ctrl-Q quits."));
    }

    #[test]
    fn test_cursor_position_escape_matches_viewport() {
        let session = Session::new(
            Document::from_bytes(b"abc"),
            None,
            Viewport::new(10, 3),
        );
        let mut renderer = Renderer::new();
        let s = String::from_utf8_lossy(renderer.frame(&session)).into_owned();
        assert!(s.contains("\x1b[1;1H\x1b[?25h"));
    }

    #[test]
    fn test_scrollbar_thumb_full_when_document_fits() {
        assert_eq!(scrollbar_thumb(0, 10, 5), (0, 10));
        assert_eq!(scrollbar_thumb(0, 10, 0), (0, 10));
    }

    #[test]
    fn test_scrollbar_thumb_proportional() {
        // 100-line document in a 10-row window: one-cell thumb tracking
        // the scroll position.
        assert_eq!(scrollbar_thumb(0, 10, 100), (0, 1));
        let (top, len) = scrollbar_thumb(50, 10, 100);
        assert_eq!(len, 1);
        assert_eq!(top, 5);
        let (top, len) = scrollbar_thumb(99, 10, 100);
        assert!(top + len <= 10);
    }

    #[test]
    fn test_frame_buffer_reused_without_growth() {
        let session = Session::new(
            Document::from_bytes(b"steady"),
            None,
            Viewport::new(20, 5),
        );
        let mut renderer = Renderer::new();
        let first = renderer.frame(&session).to_vec();
        let second = renderer.frame(&session).to_vec();
        assert_eq!(first, second);
    }
}
