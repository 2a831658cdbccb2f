//! Visual-column to raw-index mapping under tab expansion.
//!
//! Tabs occupy exactly [`TAB_SIZE`] screen cells but one byte in storage,
//! so every edit must map the cursor's visual column back to a byte offset
//! before touching the line. A target that lands strictly inside a tab's
//! expansion has no raw-index equivalent; resolution reports the nearest
//! valid boundary instead, and the caller snaps the cursor there without
//! editing. A tab's visual cell is never split.

/// Fixed on-screen width of a tab, in cells.
pub const TAB_SIZE: usize = 8;

/// On-screen width of a single stored byte.
#[must_use]
pub fn visual_width(byte: u8) -> usize {
    if byte == b'\t' { TAB_SIZE } else { 1 }
}

/// Total on-screen width of a line's content.
#[must_use]
pub fn visual_len(bytes: &[u8]) -> usize {
    bytes.iter().map(|&b| visual_width(b)).sum()
}

/// Visual column of a raw byte index (the width of the prefix before it).
///
/// Indices past the end of the line clamp to the full visual length.
#[must_use]
pub fn visual_prefix(bytes: &[u8], raw: usize) -> usize {
    bytes
        .iter()
        .take(raw)
        .map(|&b| visual_width(b))
        .sum()
}

/// Outcome of mapping a visual column onto a line's bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolve {
    /// The column is an exact cell boundary: the raw index to edit at.
    Index(usize),
    /// The column lands strictly inside a tab's expansion. `snap` is the
    /// nearest valid visual boundary; the edit must be aborted.
    InsideTab { snap: usize },
    /// The column exceeds the line's visual length. `len` is the visual
    /// end-of-line to clamp to; the edit must be aborted.
    PastEnd { len: usize },
}

/// Map a visual column to the raw index whose cumulative width first
/// reaches it.
#[must_use]
pub fn resolve(bytes: &[u8], target: usize) -> Resolve {
    let mut acc = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if acc == target {
            return Resolve::Index(i);
        }
        let w = visual_width(b);
        if target < acc + w {
            // Strictly inside this byte's cell; only tabs are wider than
            // one, so snap to whichever edge of the expansion is closer.
            let snap = if target - acc <= (acc + w) - target {
                acc
            } else {
                acc + w
            };
            return Resolve::InsideTab { snap };
        }
        acc += w;
    }
    if target == acc {
        Resolve::Index(bytes.len())
    } else {
        Resolve::PastEnd { len: acc }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_width() {
        assert_eq!(visual_width(b'a'), 1);
        assert_eq!(visual_width(b' '), 1);
        assert_eq!(visual_width(b'\t'), TAB_SIZE);
    }

    #[test]
    fn test_visual_len_mixed() {
        assert_eq!(visual_len(b""), 0);
        assert_eq!(visual_len(b"abc"), 3);
        assert_eq!(visual_len(b"a\tb"), 2 + TAB_SIZE);
        assert_eq!(visual_len(b"\t\t"), 2 * TAB_SIZE);
    }

    #[test]
    fn test_resolve_plain_line() {
        let line = b"hello";
        for i in 0..=line.len() {
            assert_eq!(resolve(line, i), Resolve::Index(i));
        }
    }

    #[test]
    fn test_resolve_inverse_of_visual_prefix() {
        let line = b"a\tbc\t\td";
        for raw in 0..=line.len() {
            let col = visual_prefix(line, raw);
            assert_eq!(resolve(line, col), Resolve::Index(raw));
        }
    }

    #[test]
    fn test_resolve_inside_tab_snaps_to_nearest_edge() {
        // Line "a\tb": tab cell spans visual [1, 1 + TAB_SIZE).
        let line = b"a\tb";
        // Just inside the left edge snaps back.
        assert_eq!(resolve(line, 2), Resolve::InsideTab { snap: 1 });
        // Just inside the right edge snaps forward.
        assert_eq!(
            resolve(line, TAB_SIZE),
            Resolve::InsideTab { snap: 1 + TAB_SIZE }
        );
        // The boundaries themselves are exact indices.
        assert_eq!(resolve(line, 1), Resolve::Index(1));
        assert_eq!(resolve(line, 1 + TAB_SIZE), Resolve::Index(2));
    }

    #[test]
    fn test_resolve_midpoint_snaps_left() {
        // Equidistant targets prefer the left edge.
        let line = b"\t";
        assert_eq!(resolve(line, TAB_SIZE / 2), Resolve::InsideTab { snap: 0 });
    }

    #[test]
    fn test_resolve_past_end_clamps() {
        let line = b"ab\t";
        let len = visual_len(line);
        assert_eq!(resolve(line, len), Resolve::Index(3));
        assert_eq!(resolve(line, len + 1), Resolve::PastEnd { len });
        assert_eq!(resolve(line, len + 100), Resolve::PastEnd { len });
    }

    #[test]
    fn test_resolve_empty_line() {
        assert_eq!(resolve(b"", 0), Resolve::Index(0));
        assert_eq!(resolve(b"", 5), Resolve::PastEnd { len: 0 });
    }

    #[test]
    fn test_visual_prefix_clamps_past_end() {
        assert_eq!(visual_prefix(b"ab", 10), 2);
    }
}
