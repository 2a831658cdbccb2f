//! Viewport and cursor state.
//!
//! Tracks the scroll offsets `(top_row, left_col)` and the cursor position
//! `(cx, cy)` inside a window of fixed `(width, height)` taken from the
//! one-time terminal size query. The absolute document row is
//! `top_row + cy`; the visual column is `left_col + cx`. The cursor may
//! rest exactly one row past the last document line, which is what lets
//! typing there append a new line.

/// Cursor and scroll state for a fixed-size window onto the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    top_row: usize,
    left_col: usize,
    cx: usize,
    cy: usize,
    width: usize,
    height: usize,
}

impl Viewport {
    /// Create a viewport for a text area of the given dimensions.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            top_row: 0,
            left_col: 0,
            cx: 0,
            cy: 0,
            width,
            height,
        }
    }

    /// Window width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Window height in rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// First visible document row.
    #[must_use]
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    /// First visible visual column.
    #[must_use]
    pub fn left_col(&self) -> usize {
        self.left_col
    }

    /// Cursor column within the window.
    #[must_use]
    pub fn cx(&self) -> usize {
        self.cx
    }

    /// Cursor row within the window.
    #[must_use]
    pub fn cy(&self) -> usize {
        self.cy
    }

    /// Absolute document row under the cursor.
    #[must_use]
    pub fn absolute_row(&self) -> usize {
        self.top_row + self.cy
    }

    /// Visual column (tab-expanded) under the cursor.
    #[must_use]
    pub fn visual_col(&self) -> usize {
        self.left_col + self.cx
    }

    /// Place the cursor at a visual column, clamped to the window.
    pub fn set_visual_col(&mut self, col: usize) {
        self.cx = col.saturating_sub(self.left_col).min(self.width - 1);
    }

    /// Place the cursor on an absolute document row, scrolling as needed.
    pub fn set_absolute_row(&mut self, row: usize) {
        if row < self.top_row {
            self.top_row = row;
            self.cy = 0;
        } else {
            let cy = row - self.top_row;
            if cy < self.height {
                self.cy = cy;
            } else {
                self.top_row += cy - (self.height - 1);
                self.cy = self.height - 1;
            }
        }
    }

    pub fn move_up(&mut self) {
        if self.cy > 0 {
            self.cy -= 1;
        } else if self.top_row > 0 {
            self.top_row -= 1;
        }
    }

    /// Move down one row; the absolute row may go at most one past the
    /// last document line.
    pub fn move_down(&mut self, line_count: usize) {
        if self.absolute_row() >= line_count {
            return;
        }
        if self.cy < self.height - 1 {
            self.cy += 1;
        } else {
            self.top_row += 1;
        }
    }

    /// Move left one column; does not wrap to the previous line.
    pub fn move_left(&mut self) {
        if self.cx > 0 {
            self.cx -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cx < self.width - 1 {
            self.cx += 1;
        }
    }

    /// One full window of upward movement.
    pub fn page_up(&mut self) {
        for _ in 0..self.height {
            self.move_up();
        }
    }

    /// One full window of downward movement.
    pub fn page_down(&mut self, line_count: usize) {
        for _ in 0..self.height {
            self.move_down(line_count);
        }
    }

    /// Jump to the left window edge (not the logical line start).
    pub fn home(&mut self) {
        self.cx = 0;
    }

    /// Jump to the right window edge (not the logical line end).
    pub fn end(&mut self) {
        self.cx = self.width - 1;
    }
}
