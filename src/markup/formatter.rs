//! HTML beautifier and minifier
//!
//! `beautify` re-indents markup one block element per line while keeping
//! short inline content compact (`<p>Hello <b>x</b></p>` stays on one line).
//! It never adds or drops tags, and running it on its own output changes
//! nothing. `minify` is a plain whitespace squeeze that does not look at
//! structure at all; it is lossy inside `pre` and friends, which is accepted.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::FormatSettings;
use crate::markup::tags::{is_inline, is_raw_text, parse_tag, TagInfo, TagKind};
use crate::markup::tokenizer::{tokenize, Token};

// ─────────────────────────────────────────────────────────────────────────────
// Beautify
// ─────────────────────────────────────────────────────────────────────────────

/// Re-indent `markup` using the indent unit and line ending in `settings`.
///
/// # Example
/// ```ignore
/// let out = beautify("<div><p>Hello</p></div>", &FormatSettings::default());
/// assert_eq!(out, "<div>\n  <p>Hello</p>\n</div>");
/// ```
pub fn beautify(markup: &str, settings: &FormatSettings) -> String {
    let items = collect_items(markup);
    let mut writer = Writer::new(settings, markup.len());

    let mut i = 0;
    while i < items.len() {
        let item = &items[i];
        let next_inline = items.get(i + 1).map_or(false, Item::is_inline_tag);

        match &item.tag {
            None => writer.text(item.raw, next_inline),
            Some(info) => match info.kind {
                TagKind::Special | TagKind::SelfClosing => writer.standalone(item.raw),
                TagKind::Opening if is_inline(&info.name) => writer.inline(item.raw),
                TagKind::Closing if is_inline(&info.name) => writer.inline(item.raw),
                TagKind::Opening if is_raw_text(&info.name) => {
                    // Copy everything up to the matching close tag untouched
                    let close = find_close(&items, i + 1, &info.name);
                    let end = close.map_or(markup.len(), |j| items[j].start + items[j].raw.len());
                    writer.standalone(&markup[item.start..end]);
                    i = close.unwrap_or(items.len());
                }
                TagKind::Opening => writer.open_block(item.raw),
                TagKind::Closing => writer.close_block(item.raw),
            },
        }
        i += 1;
    }

    writer.finish()
}

/// A token after merging: runs of text (including unparseable `<...>`
/// spans) collapse into one slice so whitespace decisions see the whole run.
#[derive(Debug)]
struct Item<'a> {
    start: usize,
    raw: &'a str,
    tag: Option<TagInfo>,
}

impl Item<'_> {
    fn is_inline_tag(&self) -> bool {
        self.tag.as_ref().map_or(false, |info| {
            matches!(info.kind, TagKind::Opening | TagKind::Closing) && is_inline(&info.name)
        })
    }
}

fn collect_items(markup: &str) -> Vec<Item<'_>> {
    let mut items: Vec<Item<'_>> = Vec::new();
    let mut offset = 0;

    for token in tokenize(markup) {
        let raw = token.raw();
        let tag = match token {
            Token::Tag(raw) => parse_tag(raw),
            Token::Text(_) => None,
        };

        if tag.is_none() {
            if let Some(prev) = items.last_mut() {
                if prev.tag.is_none() {
                    prev.raw = &markup[prev.start..offset + raw.len()];
                    offset += raw.len();
                    continue;
                }
            }
        }

        items.push(Item {
            start: offset,
            raw,
            tag,
        });
        offset += raw.len();
    }

    items
}

fn find_close(items: &[Item<'_>], from: usize, name: &str) -> Option<usize> {
    items[from..]
        .iter()
        .position(|item| {
            item.tag
                .as_ref()
                .map_or(false, |t| t.kind == TagKind::Closing && t.name == name)
        })
        .map(|rel| from + rel)
}

/// What the writer emitted last; drives newline placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    BlockOpen,
    /// Block close, void element, comment or raw-text block
    BlockBreak,
    Inline,
    Text,
}

struct Writer {
    out: String,
    unit: String,
    newline: &'static str,
    /// One entry per open block element (plus the root): whether it has
    /// had a block-level child yet.
    frames: Vec<bool>,
    last: Last,
}

impl Writer {
    fn new(settings: &FormatSettings, hint: usize) -> Self {
        Self {
            out: String::with_capacity(hint + hint / 4),
            unit: settings.indent.unit(),
            newline: settings.line_ending.as_str(),
            frames: vec![false],
            last: Last::Start,
        }
    }

    fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    fn break_line(&mut self) {
        self.out.push_str(self.newline);
        for _ in 0..self.depth() {
            self.out.push_str(&self.unit);
        }
    }

    fn mark_block_child(&mut self) {
        if let Some(top) = self.frames.last_mut() {
            *top = true;
        }
    }

    fn open_block(&mut self, raw: &str) {
        self.mark_block_child();
        self.break_line();
        self.out.push_str(raw);
        self.frames.push(false);
        self.last = Last::BlockOpen;
    }

    fn close_block(&mut self, raw: &str) {
        let had_block_child = if self.frames.len() > 1 {
            self.frames.pop().unwrap_or(true)
        } else {
            // Stray closer at the root
            true
        };
        if had_block_child {
            self.break_line();
        }
        self.out.push_str(raw);
        self.last = Last::BlockBreak;
    }

    fn standalone(&mut self, raw: &str) {
        self.mark_block_child();
        self.break_line();
        self.out.push_str(raw);
        self.last = Last::BlockBreak;
    }

    fn inline(&mut self, raw: &str) {
        if self.last == Last::BlockBreak {
            self.break_line();
        }
        self.out.push_str(raw);
        self.last = Last::Inline;
    }

    fn text(&mut self, raw: &str, next_inline: bool) {
        let core = raw.trim();
        if core.is_empty() {
            if self.last == Last::Inline && next_inline && !raw.is_empty() {
                self.out.push(' ');
            }
            return;
        }

        let trail = next_inline && raw.ends_with(char::is_whitespace);
        if self.last == Last::BlockBreak {
            self.break_line();
        } else if self.last == Last::Inline && raw.starts_with(char::is_whitespace) {
            self.out.push(' ');
        }
        self.out.push_str(core);
        if trail {
            self.out.push(' ');
        }
        self.last = Last::Text;
    }

    fn finish(self) -> String {
        self.out.trim().to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Minify
// ─────────────────────────────────────────────────────────────────────────────

fn between_tags_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r">\s+<").expect("hardcoded regex is valid"))
}

fn whitespace_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("hardcoded regex is valid"))
}

/// Squeeze whitespace out of `markup`.
///
/// Whitespace between adjacent tags is removed, any other run of two or
/// more whitespace characters becomes a single space, and the result is
/// trimmed.
pub fn minify(markup: &str) -> String {
    let joined = between_tags_re().replace_all(markup, "><");
    let squeezed = whitespace_run_re().replace_all(&joined, " ");
    squeezed.trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IndentUnit, LineEnding};

    fn settings(indent: IndentUnit, line_ending: LineEnding) -> FormatSettings {
        FormatSettings {
            indent,
            line_ending,
        }
    }

    fn two_spaces() -> FormatSettings {
        settings(IndentUnit::Spaces(2), LineEnding::Lf)
    }

    const SAMPLES: &[&str] = &[
        "<div><p>Hello</p></div>",
        "<ul><li>One</li><li>Two <em>2</em></li></ul><p>Para <a href='#'>link</a>.</p>",
        "<!-- keep me --><p>hi</p>",
        "<div>intro<p>x</p>tail</div>",
        "<p>Line<br>next</p>",
        "<table><tr><td>a</td><td>b</td></tr></table>",
        "<pre>  keep\n   this </pre><p>after</p>",
        "<video controls><source src=\"a.mp4\"></video>",
        "plain text only",
        "<p>a < b and c > d</p>",
        "<div><span>unclosed</div>",
        "</div>stray<p>ok</p>",
        "<b>a</b> <i>b</i>\n\n<p>  spaced   out  </p>",
    ];

    // ─────────────────────────────────────────────────────────────────────────
    // Beautify
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_beautify_nested_blocks() {
        let out = beautify("<div><p>Hello</p></div>", &two_spaces());
        assert_eq!(out, "<div>\n  <p>Hello</p>\n</div>");
    }

    #[test]
    fn test_beautify_four_spaces_and_tabs() {
        let four = settings(IndentUnit::Spaces(4), LineEnding::Lf);
        assert_eq!(
            beautify("<div><p>Hello</p></div>", &four),
            "<div>\n    <p>Hello</p>\n</div>"
        );

        let tabs = settings(IndentUnit::Tabs, LineEnding::Lf);
        assert_eq!(
            beautify("<div><p>Hello</p></div>", &tabs),
            "<div>\n\t<p>Hello</p>\n</div>"
        );
    }

    #[test]
    fn test_beautify_crlf() {
        let crlf = settings(IndentUnit::Spaces(2), LineEnding::Crlf);
        assert_eq!(
            beautify("<div><p>Hello</p></div>", &crlf),
            "<div>\r\n  <p>Hello</p>\r\n</div>"
        );
    }

    #[test]
    fn test_beautify_keeps_inline_content_compact() {
        let out = beautify("<p>Hello <b>bold</b> and <i>it</i>.</p>", &two_spaces());
        assert_eq!(out, "<p>Hello <b>bold</b> and <i>it</i>.</p>");
    }

    #[test]
    fn test_beautify_list() {
        let out = beautify("<ul><li>One</li><li>Two</li></ul>", &two_spaces());
        assert_eq!(out, "<ul>\n  <li>One</li>\n  <li>Two</li>\n</ul>");
    }

    #[test]
    fn test_beautify_comment_on_its_own_line() {
        let out = beautify("<!-- keep me --><p>hi</p>", &two_spaces());
        assert_eq!(out, "<!-- keep me -->\n<p>hi</p>");
    }

    #[test]
    fn test_beautify_void_elements() {
        let out = beautify("<div><img src=\"a.png\"><hr/></div>", &two_spaces());
        assert_eq!(out, "<div>\n  <img src=\"a.png\">\n  <hr/>\n</div>");
    }

    #[test]
    fn test_beautify_text_after_block_child() {
        let out = beautify("<div><p>a</p>tail</div>", &two_spaces());
        assert_eq!(out, "<div>\n  <p>a</p>\n  tail\n</div>");
    }

    #[test]
    fn test_beautify_preserves_pre_content() {
        let out = beautify("<div><pre>  a\n    b</pre></div>", &two_spaces());
        assert_eq!(out, "<div>\n  <pre>  a\n    b</pre>\n</div>");
    }

    #[test]
    fn test_beautify_unknown_element_is_block_like() {
        let out = beautify("<section><custom-card>x</custom-card></section>", &two_spaces());
        assert_eq!(out, "<section>\n  <custom-card>x</custom-card>\n</section>");
    }

    #[test]
    fn test_beautify_reindents_existing_whitespace() {
        let messy = "<div>\n\n        <p>Hello</p>\n   </div>";
        assert_eq!(beautify(messy, &two_spaces()), "<div>\n  <p>Hello</p>\n</div>");
    }

    #[test]
    fn test_beautify_empty_input() {
        assert_eq!(beautify("", &two_spaces()), "");
        assert_eq!(beautify("   \n ", &two_spaces()), "");
    }

    #[test]
    fn test_beautify_is_idempotent() {
        let all = [
            two_spaces(),
            settings(IndentUnit::Spaces(4), LineEnding::Crlf),
            settings(IndentUnit::Tabs, LineEnding::Lf),
        ];
        for s in &all {
            for sample in SAMPLES {
                let once = beautify(sample, s);
                let twice = beautify(&once, s);
                assert_eq!(once, twice, "not idempotent for {:?}", sample);
            }
        }
    }

    #[test]
    fn test_beautify_keeps_every_tag() {
        for sample in SAMPLES {
            let out = beautify(sample, &two_spaces());
            let tags = |s: &str| {
                tokenize(s)
                    .into_iter()
                    .filter(|t| t.is_tag())
                    .count()
            };
            assert_eq!(tags(sample), tags(&out), "tag count changed for {:?}", sample);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Minify
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_minify_basic() {
        let input = "<div>\n  <p>Hello   world</p>\n</div>\n";
        assert_eq!(minify(input), "<div><p>Hello world</p></div>");
    }

    #[test]
    fn test_minify_keeps_single_spaces() {
        assert_eq!(minify("<p>a b</p>"), "<p>a b</p>");
    }

    #[test]
    fn test_minify_never_grows_and_leaves_no_gap_between_tags() {
        let gap = Regex::new(r">\s+<").unwrap();
        for sample in SAMPLES {
            let formatted = beautify(sample, &two_spaces());
            for input in [*sample, formatted.as_str()] {
                let out = minify(input);
                assert!(out.len() <= input.len());
                assert!(!gap.is_match(&out), "gap left in {:?}", out);
            }
        }
    }

    #[test]
    fn test_minify_of_beautify_round_trip() {
        let compact = "<div><p>Hello</p><ul><li>a</li></ul></div>";
        assert_eq!(minify(&beautify(compact, &two_spaces())), compact);
    }
}
