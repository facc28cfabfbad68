//! HTML source highlighting
//!
//! Turns raw markup into an HTML fragment with inline-styled `<span>`s so a
//! host can paint it behind a plain-text editing surface. Tag names are
//! coloured by category; attributes, values, brackets and comments each get
//! their own colour. Anything that is not a recognisable tag is escaped and
//! passed through uncoloured.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::HighlightTheme;
use crate::markup::tokenizer::{tokenize, Token};

// ─────────────────────────────────────────────────────────────────────────────
// Palettes
// ─────────────────────────────────────────────────────────────────────────────

/// Broad tag groups that share a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Structural,
    Heading,
    Container,
    Formatting,
    List,
    Table,
    Form,
    Media,
    Link,
    Meta,
    Other,
}

impl TagCategory {
    pub fn of(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "html" | "head" | "body" | "header" | "footer" | "main" | "nav" | "aside"
            | "section" | "article" => Self::Structural,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading,
            "div" | "span" | "p" | "blockquote" | "pre" | "code" => Self::Container,
            "strong" | "em" | "b" | "i" | "u" | "s" | "small" | "mark" | "del" | "ins" | "sub"
            | "sup" => Self::Formatting,
            "ul" | "ol" | "li" | "dl" | "dt" | "dd" => Self::List,
            "table" | "thead" | "tbody" | "tfoot" | "tr" | "th" | "td" | "caption"
            | "colgroup" | "col" => Self::Table,
            "form" | "input" | "textarea" | "select" | "option" | "button" | "label"
            | "fieldset" | "legend" => Self::Form,
            "img" | "video" | "audio" | "source" | "picture" | "figure" | "figcaption"
            | "svg" | "canvas" => Self::Media,
            "a" | "link" => Self::Link,
            "meta" | "title" | "style" | "script" | "noscript" | "base" => Self::Meta,
            _ => Self::Other,
        }
    }
}

/// Colours for one theme, as CSS hex strings.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub structural: &'static str,
    pub heading: &'static str,
    pub container: &'static str,
    pub formatting: &'static str,
    pub list: &'static str,
    pub table: &'static str,
    pub form: &'static str,
    pub media: &'static str,
    pub link: &'static str,
    pub meta: &'static str,
    pub default: &'static str,
    pub attribute: &'static str,
    pub attribute_value: &'static str,
    pub bracket: &'static str,
    pub comment: &'static str,
}

const LIGHT: Palette = Palette {
    structural: "#AF00DB",
    heading: "#CC0000",
    container: "#267F99",
    formatting: "#795E26",
    list: "#0070C1",
    table: "#A31515",
    form: "#0000FF",
    media: "#FF00FF",
    link: "#267F99",
    meta: "#808080",
    default: "#0000FF",
    attribute: "#FF0000",
    attribute_value: "#A31515",
    bracket: "#808080",
    comment: "#008000",
};

const DARK: Palette = Palette {
    structural: "#C586C0",
    heading: "#FF6B6B",
    container: "#4EC9B0",
    formatting: "#DCDCAA",
    list: "#9CDCFE",
    table: "#CE9178",
    form: "#4FC1FF",
    media: "#FF77FF",
    link: "#4EC9B0",
    meta: "#808080",
    default: "#569CD6",
    attribute: "#9CDCFE",
    attribute_value: "#CE9178",
    bracket: "#808080",
    comment: "#6A9955",
};

impl Palette {
    pub fn for_theme(theme: HighlightTheme) -> &'static Palette {
        match theme {
            HighlightTheme::Light => &LIGHT,
            HighlightTheme::Dark => &DARK,
        }
    }

    pub fn tag_color(&self, category: TagCategory) -> &'static str {
        match category {
            TagCategory::Structural => self.structural,
            TagCategory::Heading => self.heading,
            TagCategory::Container => self.container,
            TagCategory::Formatting => self.formatting,
            TagCategory::List => self.list,
            TagCategory::Table => self.table,
            TagCategory::Form => self.form,
            TagCategory::Media => self.media,
            TagCategory::Link => self.link,
            TagCategory::Meta => self.meta,
            TagCategory::Other => self.default,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Highlighting
// ─────────────────────────────────────────────────────────────────────────────

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^(</?)([A-Za-z][\w-]*)(.*?)(/?>)$").expect("hardcoded regex is valid")
    })
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([\w:-]+)(?:(=)("[^"]*"|'[^']*'|[^\s>]+)?)?"#)
            .expect("hardcoded regex is valid")
    })
}

/// Escape text for inclusion in an HTML fragment.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

fn span(out: &mut String, color: &str, bold: bool, text: &str) {
    out.push_str("<span style=\"color: ");
    out.push_str(color);
    if bold {
        out.push_str("; font-weight: 600");
    }
    out.push_str(";\">");
    out.push_str(&escape_html(text));
    out.push_str("</span>");
}

/// Render `code` as highlighted, escaped HTML.
pub fn highlight_html(code: &str, theme: HighlightTheme) -> String {
    let palette = Palette::for_theme(theme);
    let mut out = String::with_capacity(code.len() * 2);

    for token in tokenize(code) {
        match token {
            Token::Text(text) => out.push_str(&escape_html(text)),
            Token::Tag(raw) if raw.starts_with("<!--") => {
                span(&mut out, palette.comment, false, raw)
            }
            Token::Tag(raw) => highlight_tag(&mut out, raw, palette),
        }
    }

    out
}

fn highlight_tag(out: &mut String, raw: &str, palette: &Palette) {
    let Some(caps) = tag_re().captures(raw) else {
        out.push_str(&escape_html(raw));
        return;
    };
    let part = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    out.push_str(&escape_html(part(1)));
    let name = part(2);
    span(out, palette.tag_color(TagCategory::of(name)), true, name);

    let attrs = part(3);
    let mut last = 0;
    for attr in attr_re().captures_iter(attrs) {
        let Some(whole) = attr.get(0) else { continue };
        out.push_str(&escape_html(&attrs[last..whole.start()]));
        if let Some(attr_name) = attr.get(1) {
            span(out, palette.attribute, false, attr_name.as_str());
        }
        if attr.get(2).is_some() {
            out.push('=');
        }
        if let Some(value) = attr.get(3) {
            span(out, palette.attribute_value, false, value.as_str());
        }
        last = whole.end();
    }
    out.push_str(&escape_html(&attrs[last..]));

    span(out, palette.bracket, false, part(4));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
