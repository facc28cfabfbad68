//! Boundary adapters
//!
//! The controller never touches the rich-text tree or a Markdown parser
//! directly. It talks to two narrow traits:
//!
//! - [`RichTextEditor`]: the external WYSIWYG surface, seen only as HTML in
//!   and HTML out.
//! - [`MarkupConverter`]: HTML and Markdown conversions plus the small text
//!   clean-ups applied around them.
//!
//! [`DefaultConverter`] implements the conversions with comrak
//! (Markdown to HTML) and htmd (HTML to Markdown).

use std::sync::OnceLock;

use comrak::{markdown_to_html, Options};
use regex::{Captures, Regex};

use crate::error::{ConversionDirection, Error, Result};

/// Class the visual editor puts on elements that are mid-edit.
pub const EDITING_MARKER_CLASS: &str = "editing";

// ─────────────────────────────────────────────────────────────────────────────
// Rich-Text Editor Capability
// ─────────────────────────────────────────────────────────────────────────────

/// Capability handle onto the external rich-text editor.
pub trait RichTextEditor {
    /// Serialize the current tree as HTML.
    fn get_content(&self) -> String;

    /// Replace the tree with `html`. May fail on markup the tree rejects.
    fn set_content(&mut self, html: &str) -> Result<()>;

    /// Bake transient editing state (open cell editors, computed table
    /// styles) into the tree before it is read for saving.
    fn finalize_pending_edits(&mut self) -> Result<()> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Markup Converter
// ─────────────────────────────────────────────────────────────────────────────

fn editing_class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\s+class\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("hardcoded regex is valid")
    })
}

fn empty_paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<p>\s*</p>").expect("hardcoded regex is valid"))
}

fn markdown_escape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\\([\\`*_{}\[\]()#+\-.!>~|])").expect("hardcoded regex is valid")
    })
}

/// Remove the editing marker from every `class` attribute, dropping the
/// attribute when nothing else is left in it.
pub fn strip_editing_marker(html: &str) -> String {
    editing_class_re()
        .replace_all(html, |caps: &Captures| {
            let (value, quote) = match (caps.get(1), caps.get(2)) {
                (Some(v), _) => (v.as_str(), '"'),
                (None, Some(v)) => (v.as_str(), '\''),
                (None, None) => return caps[0].to_string(),
            };
            let kept: Vec<&str> = value
                .split_whitespace()
                .filter(|class| *class != EDITING_MARKER_CLASS)
                .collect();
            if kept.is_empty() {
                String::new()
            } else {
                format!(" class={q}{}{q}", kept.join(" "), q = quote)
            }
        })
        .into_owned()
}

/// HTML/Markdown conversions used on mode switches.
pub trait MarkupConverter {
    fn html_to_markdown(&self, html: &str) -> Result<String>;

    fn markdown_to_html(&self, markdown: &str) -> Result<String>;

    /// Tidy tree output before it is converted to Markdown.
    fn clean_html(&self, html: &str) -> String {
        let html = strip_editing_marker(html);
        let html = empty_paragraph_re().replace_all(&html, "");
        html.replace("&nbsp;", " ")
    }

    /// Drop backslash escapes in front of Markdown punctuation.
    fn unescape_markdown(&self, markdown: &str) -> String {
        markdown_escape_re().replace_all(markdown, "$1").into_owned()
    }
}

/// Whether `source` reads as markup rather than Markdown text.
pub fn looks_like_markup(source: &str) -> bool {
    let trimmed = source.trim();
    trimmed.starts_with('<') && trimmed.contains('>')
}

// ─────────────────────────────────────────────────────────────────────────────
// Default Converter
// ─────────────────────────────────────────────────────────────────────────────

/// comrak + htmd conversions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter;

impl DefaultConverter {
    fn comrak_options() -> Options {
        let mut options = Options::default();

        // GitHub Flavored Markdown extensions
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;

        // Posts embed raw HTML blocks
        options.render.unsafe_ = true;

        options
    }
}

impl MarkupConverter for DefaultConverter {
    fn html_to_markdown(&self, html: &str) -> Result<String> {
        htmd::convert(html).map_err(|e| Error::conversion(ConversionDirection::HtmlToMarkdown, e))
    }

    fn markdown_to_html(&self, markdown: &str) -> Result<String> {
        Ok(markdown_to_html(markdown, &Self::comrak_options()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
