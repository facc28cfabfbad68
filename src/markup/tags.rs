//! Element classification tables
//!
//! Fixed lists shared by the formatter, the validator and the source-edit
//! helpers. Lookups are case-insensitive on the tag name.

/// Elements laid out on their own lines by the formatter.
const BLOCK_ELEMENTS: &[&str] = &[
    "div", "p", "section", "article", "header", "footer", "main", "nav", "aside", "h1", "h2",
    "h3", "h4", "h5", "h6", "ul", "ol", "li", "dl", "dt", "dd", "table", "thead", "tbody",
    "tfoot", "tr", "th", "td", "caption", "colgroup", "form", "fieldset", "legend",
    "blockquote", "pre", "address", "figure", "figcaption",
];

/// Elements kept inline with surrounding text.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "span", "strong", "em", "b", "i", "u", "code", "small", "mark", "del", "ins", "sub",
    "sup", "abbr", "cite", "kbd", "var", "samp", "q", "time", "data",
];

/// Void elements: never have a closing tag.
const SELF_CLOSING_ELEMENTS: &[&str] = &[
    "br", "hr", "img", "input", "meta", "link", "area", "base", "col", "embed", "param",
    "source", "track", "wbr",
];

/// Elements whose content is copied verbatim by the formatter.
const RAW_TEXT_ELEMENTS: &[&str] = &["pre", "textarea", "script", "style"];

fn contains_ignore_case(table: &[&str], name: &str) -> bool {
    table.iter().any(|t| t.eq_ignore_ascii_case(name))
}

/// Whether `name` is a block-level element.
pub fn is_block(name: &str) -> bool {
    contains_ignore_case(BLOCK_ELEMENTS, name)
}

/// Whether `name` is an inline element.
pub fn is_inline(name: &str) -> bool {
    contains_ignore_case(INLINE_ELEMENTS, name)
}

/// Whether `name` is a void element.
pub fn is_self_closing(name: &str) -> bool {
    contains_ignore_case(SELF_CLOSING_ELEMENTS, name)
}

/// Whether `name` holds whitespace-significant raw text.
pub fn is_raw_text(name: &str) -> bool {
    contains_ignore_case(RAW_TEXT_ELEMENTS, name)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tag Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Shape of a single `<...>` span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Opening,
    /// `</name>`
    Closing,
    /// `<br>`, `<img ...>`, or anything ending in `/>`
    SelfClosing,
    /// `<!-- ... -->`, `<!DOCTYPE ...>`, `<?...?>`
    Special,
}

/// A parsed view of a raw tag token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Lowercased element name (empty for `Special`)
    pub name: String,
    pub kind: TagKind,
}

/// Parse a raw `<...>` span into its name and kind.
///
/// Returns `None` when the span does not look like a tag at all
/// (e.g. `< 3 >`), in which case callers should treat it as text.
pub fn parse_tag(raw: &str) -> Option<TagInfo> {
    let inner = raw.strip_prefix('<')?;
    if inner.starts_with('!') || inner.starts_with('?') {
        return Some(TagInfo {
            name: String::new(),
            kind: TagKind::Special,
        });
    }

    let (closing, rest) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };

    if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase();

    let kind = if closing {
        TagKind::Closing
    } else if is_self_closing(&name) || raw.ends_with("/>") {
        TagKind::SelfClosing
    } else {
        TagKind::Opening
    };

    Some(TagInfo { name, kind })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
