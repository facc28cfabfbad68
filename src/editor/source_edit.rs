//! Keystroke helpers for the HTML source editor
//!
//! Pure functions from `(text, selection)` to a new text and selection. The
//! host calls them from its key handler and applies the result to its
//! plain-text surface. Helpers that return `Option` yield `None` when the
//! keystroke should fall through to the host's default behaviour.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::IndentUnit;
use crate::markup::tags::is_self_closing;
use crate::string_utils::{clamp_range, floor_char_boundary, line_start};

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";
const COMMENT_TEMPLATE: &str = "<!-- comment -->";

/// A selection as byte offsets; `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Ordered and snapped to character boundaries of `text`.
    fn normalized(&self, text: &str) -> (usize, usize) {
        clamp_range(text, self.start, self.end)
    }
}

/// Result of an editing helper: the whole new text plus where the
/// selection should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEdit {
    pub text: String,
    pub selection: Selection,
}

fn splice(text: &str, start: usize, end: usize, insert: &str) -> String {
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..start]);
    out.push_str(insert);
    out.push_str(&text[end..]);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Comments
// ─────────────────────────────────────────────────────────────────────────────

/// Comment or uncomment the selection.
///
/// - A selection wrapped in `<!--`/`-->` is unwrapped; the caret goes to
///   the end of the uncovered text.
/// - Any other selection is wrapped as `<!-- sel -->` and stays selected.
/// - A caret inserts `<!-- comment -->` with the caret after `<!-- `.
pub fn toggle_comment(text: &str, selection: Selection) -> SourceEdit {
    let (start, end) = selection.normalized(text);
    let selected = &text[start..end];

    if selected.is_empty() {
        return SourceEdit {
            text: splice(text, start, end, COMMENT_TEMPLATE),
            selection: Selection::caret(start + COMMENT_OPEN.len() + 1),
        };
    }

    let is_commented = selected.len() >= COMMENT_OPEN.len() + COMMENT_CLOSE.len()
        && selected.starts_with(COMMENT_OPEN)
        && selected.ends_with(COMMENT_CLOSE);

    if is_commented {
        let inner = &selected[COMMENT_OPEN.len()..selected.len() - COMMENT_CLOSE.len()];
        SourceEdit {
            text: splice(text, start, end, inner),
            selection: Selection::caret(start + inner.len()),
        }
    } else {
        let commented = format!("{} {} {}", COMMENT_OPEN, selected, COMMENT_CLOSE);
        SourceEdit {
            text: splice(text, start, end, &commented),
            selection: Selection::new(start, start + commented.len()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Indentation
// ─────────────────────────────────────────────────────────────────────────────

/// Tab: indent every selected line, or insert one indent unit at the caret
/// (replacing a single-line selection).
pub fn indent_selection(text: &str, selection: Selection, indent: IndentUnit) -> SourceEdit {
    let (start, end) = selection.normalized(text);
    let selected = &text[start..end];
    let unit = indent.unit();

    if selected.contains('\n') {
        let indented = selected
            .split('\n')
            .map(|line| format!("{}{}", unit, line))
            .collect::<Vec<_>>()
            .join("\n");
        SourceEdit {
            text: splice(text, start, end, &indented),
            selection: Selection::new(start, start + indented.len()),
        }
    } else {
        SourceEdit {
            text: splice(text, start, end, &unit),
            selection: Selection::caret(start + unit.len()),
        }
    }
}

/// Shift+Tab: remove one leading indent unit from every selected line.
///
/// With a caret, the caret's own line is outdented.
pub fn outdent_selection(text: &str, selection: Selection, indent: IndentUnit) -> SourceEdit {
    let (start, end) = selection.normalized(text);
    let unit = indent.unit();

    if start == end {
        let line = line_start(text, start);
        if !text[line..].starts_with(&unit) {
            return SourceEdit {
                text: text.to_string(),
                selection: Selection::caret(start),
            };
        }
        let caret = if start >= line + unit.len() {
            start - unit.len()
        } else {
            line
        };
        return SourceEdit {
            text: splice(text, line, line + unit.len(), ""),
            selection: Selection::caret(caret),
        };
    }

    let outdented = text[start..end]
        .split('\n')
        .map(|line| line.strip_prefix(unit.as_str()).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n");
    SourceEdit {
        text: splice(text, start, end, &outdented),
        selection: Selection::new(start, start + outdented.len()),
    }
}

/// Enter: break the line and repeat the current line's leading whitespace.
pub fn newline_with_indent(text: &str, selection: Selection) -> SourceEdit {
    let (start, end) = selection.normalized(text);
    let line = &text[line_start(text, start)..start];
    let leading: &str = &line[..line.len() - line.trim_start_matches([' ', '\t']).len()];

    let insert = format!("\n{}", leading);
    SourceEdit {
        text: splice(text, start, end, &insert),
        selection: Selection::caret(start + insert.len()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auto-closing
// ─────────────────────────────────────────────────────────────────────────────

fn open_tag_tail_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<([A-Za-z][\w-]*)(?:\s[^<>]*)?$").expect("hardcoded regex is valid")
    })
}

/// `>` typed right after `<name attrs`: insert `>` plus `</name>` and park
/// the caret between them.
///
/// Returns `None` for void elements, explicit `/` self-closing, or when the
/// caret is not at the end of an opening tag.
pub fn auto_close_tag(text: &str, selection: Selection) -> Option<SourceEdit> {
    let (start, end) = selection.normalized(text);
    let before = &text[..start];
    let caps = open_tag_tail_re().captures(before)?;
    let name = caps.get(1)?.as_str();

    if is_self_closing(name) || before.trim_end().ends_with('/') {
        return None;
    }

    let insert = format!("></{}>", name);
    Some(SourceEdit {
        text: splice(text, start, end, &insert),
        selection: Selection::caret(start + 1),
    })
}

/// A quote typed inside an open tag: insert a pair and put the caret
/// between them.
pub fn auto_close_quote(text: &str, selection: Selection, quote: char) -> Option<SourceEdit> {
    if quote != '"' && quote != '\'' {
        return None;
    }
    let (start, end) = selection.normalized(text);
    let before = &text[..floor_char_boundary(text, start)];

    let inside_tag = match (before.rfind('<'), before.rfind('>')) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    };
    if !inside_tag {
        return None;
    }

    let pair: String = [quote, quote].iter().collect();
    Some(SourceEdit {
        text: splice(text, start, end, &pair),
        selection: Selection::caret(start + quote.len_utf8()),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
