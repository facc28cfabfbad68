//! UTF-8 Safe Offset Utilities
//!
//! Offsets handed to the engine (caret positions, selection ranges, search
//! hits) are byte offsets into a Rust `String`. Hosts may pass positions
//! that land inside a multi-byte character, so every place that slices by
//! an external offset goes through these helpers first.
//!
//! # Example
//! ```ignore
//! use crate::string_utils::{floor_char_boundary, next_char_boundary};
//!
//! let text = "Hei på deg";
//! assert_eq!(floor_char_boundary(text, 6), 5); // inside 'å'
//! assert_eq!(next_char_boundary(text, 5), 7);  // skip over 'å'
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the largest index `<= index` that is on a character boundary.
///
/// Indices past the end clamp to `s.len()`.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Returns the smallest index `>= index` that is on a character boundary.
///
/// Indices past the end clamp to `s.len()`.
#[inline]
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Returns the boundary just past the character that starts at or covers `index`.
///
/// Used by scanners that must step exactly one character forward from a hit.
#[inline]
pub fn next_char_boundary(s: &str, index: usize) -> usize {
    let start = floor_char_boundary(s, index);
    s[start..]
        .chars()
        .next()
        .map(|c| start + c.len_utf8())
        .unwrap_or(s.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Range Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Normalize a host-supplied `(start, end)` range.
///
/// Swaps reversed ranges and snaps both ends to character boundaries
/// (start floors, end ceils) so the result is always sliceable.
pub fn clamp_range(s: &str, start: usize, end: usize) -> (usize, usize) {
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    (floor_char_boundary(s, lo), ceil_char_boundary(s, hi))
}

/// Byte offset of the start of the line that contains `index`.
pub fn line_start(s: &str, index: usize) -> usize {
    let index = floor_char_boundary(s, index);
    s[..index].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_ascii() {
        let s = "Hello";
        assert_eq!(floor_char_boundary(s, 0), 0);
        assert_eq!(floor_char_boundary(s, 2), 2);
        assert_eq!(floor_char_boundary(s, 10), 5);
    }

    #[test]
    fn test_floor_norwegian() {
        let s = "Hei på deg"; // 'å' at byte 5-6
        assert_eq!(floor_char_boundary(s, 5), 5);
        assert_eq!(floor_char_boundary(s, 6), 5);
        assert_eq!(floor_char_boundary(s, 7), 7);
    }

    #[test]
    fn test_ceil_chinese() {
        let s = "你好"; // 3 bytes each
        assert_eq!(ceil_char_boundary(s, 1), 3);
        assert_eq!(ceil_char_boundary(s, 3), 3);
        assert_eq!(ceil_char_boundary(s, 4), 6);
    }

    #[test]
    fn test_next_char_boundary() {
        let s = "aé🎉";
        assert_eq!(next_char_boundary(s, 0), 1);
        assert_eq!(next_char_boundary(s, 1), 3);
        assert_eq!(next_char_boundary(s, 3), 7);
        assert_eq!(next_char_boundary(s, 7), 7);
    }

    #[test]
    fn test_clamp_range_swaps_and_snaps() {
        let s = "Hei på deg";
        assert_eq!(clamp_range(s, 8, 2), (2, 8));
        assert_eq!(clamp_range(s, 6, 6), (5, 7));
        assert_eq!(clamp_range(s, 0, 100), (0, s.len()));
    }

    #[test]
    fn test_line_start() {
        let s = "one\n  two\nthree";
        assert_eq!(line_start(s, 0), 0);
        assert_eq!(line_start(s, 6), 4);
        assert_eq!(line_start(s, 4), 4);
        assert_eq!(line_start(s, s.len()), 10);
    }

    #[test]
    fn test_mixed_content_never_panics() {
        let s = "Hello 世界! 🎉 Café naïve";
        for i in 0..=s.len() + 5 {
            let f = floor_char_boundary(s, i);
            let c = ceil_char_boundary(s, i);
            let _ = &s[..f];
            let _ = &s[c..];
            let _ = next_char_boundary(s, i);
            let _ = line_start(s, i);
        }
    }
}
