//! Constant ANSI escape sequences emitted by the editor.

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Clear from cursor to end of line.
pub const CLEAR_LINE_RIGHT: &str = "\x1b[K";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Request cursor position report (DSR 6); the terminal answers
/// `ESC [ rows ; cols R`.
pub const CURSOR_POSITION_REPORT: &str = "\x1b[6n";

/// Move cursor far toward the bottom-right corner; the terminal clamps to
/// its real edge, which makes a position report a size query.
pub const CURSOR_TO_CORNER: &str = "\x1b[999B\x1b[999C";

/// Generate a cursor position sequence (CUP). Row and column are 1-based.
#[must_use]
pub fn cursor_position(row: usize, col: usize) -> String {
    format!("\x1b[{row};{col}H")
}

/// Generate a cursor column sequence (CHA). Column is 1-based.
#[must_use]
pub fn cursor_column(col: usize) -> String {
    format!("\x1b[{col}G")
}
