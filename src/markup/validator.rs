//! Structural markup validation
//!
//! A small tag-stack state machine over a regex scan of the source. It does
//! not build a tree; it only checks that open and close tags balance and
//! reports every defect with the byte offset of the tag that exposed it.
//! Problems found here are advisory and never block saving or editing.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::markup::tags::is_self_closing;

/// How long a clean report stays visible before the host may hide it.
const CLEAN_REPORT_DISMISS_AFTER: Duration = Duration::from_secs(3);

// ─────────────────────────────────────────────────────────────────────────────
// Report Types
// ─────────────────────────────────────────────────────────────────────────────

/// What kind of structural defect was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralIssue {
    /// `</name>` with nothing open
    UnmatchedClose { name: String },
    /// `</found>` while `<expected>` is the innermost open element
    Mismatch { expected: String, found: String },
    /// `<name>` never closed
    Unclosed { name: String },
}

/// One structural defect and where it was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issue: StructuralIssue,
    /// Byte offset of the offending tag
    pub offset: usize,
}

impl ValidationError {
    /// User-facing message, e.g. `Unclosed tag <div> at position 0`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issue {
            StructuralIssue::UnmatchedClose { name } => write!(
                f,
                "Closing tag </{}> has no matching opening tag at position {}",
                name, self.offset
            ),
            StructuralIssue::Mismatch { expected, found } => write!(
                f,
                "Expected closing tag </{}> but found </{}> at position {}",
                expected, found, self.offset
            ),
            StructuralIssue::Unclosed { name } => {
                write!(f, "Unclosed tag <{}> at position {}", name, self.offset)
            }
        }
    }
}

/// Result of one validation pass. Empty `errors` means the markup balances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages in detection order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ValidationError::message).collect()
    }

    /// A clean report may be hidden after a short delay; reports with
    /// errors stay until the user dismisses them.
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        self.is_valid().then_some(CLEAN_REPORT_DISMISS_AFTER)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"</?([A-Za-z][A-Za-z0-9]*)[^>]*>").expect("hardcoded regex is valid")
    })
}

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)").expect("hardcoded regex is valid"))
}

#[derive(Debug)]
struct OpenTag {
    name: String,
    offset: usize,
}

/// Check that every opening tag in `markup` is closed in order.
///
/// Errors come back in detection order: close-tag problems as the scan
/// meets them, then one `Unclosed` per element still open at the end
/// (outermost first).
pub fn validate(markup: &str) -> ValidationReport {
    let mut errors = Vec::new();
    let mut stack: Vec<OpenTag> = Vec::new();
    let comments: Vec<_> = comment_re().find_iter(markup).map(|m| m.range()).collect();

    for caps in tag_re().captures_iter(markup) {
        let (Some(full), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if comments.iter().any(|c| c.contains(&full.start())) {
            continue;
        }
        let raw = full.as_str();
        let name = name.as_str().to_ascii_lowercase();
        let offset = full.start();

        if is_self_closing(&name) || raw.ends_with("/>") {
            continue;
        }

        if !raw.starts_with("</") {
            stack.push(OpenTag { name, offset });
            continue;
        }

        let Some(top) = stack.last() else {
            errors.push(ValidationError {
                issue: StructuralIssue::UnmatchedClose { name },
                offset,
            });
            continue;
        };

        if top.name == name {
            stack.pop();
            continue;
        }

        errors.push(ValidationError {
            issue: StructuralIssue::Mismatch {
                expected: top.name.clone(),
                found: name.clone(),
            },
            offset,
        });

        // Assume the writer meant to close the nearest open element of that
        // name; anything opened inside it stays open and is reported below.
        if let Some(pos) = stack.iter().rposition(|open| open.name == name) {
            stack.remove(pos);
        }
    }

    errors.extend(stack.into_iter().map(|open| ValidationError {
        issue: StructuralIssue::Unclosed { name: open.name },
        offset: open.offset,
    }));

    ValidationReport { errors }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_markup() {
        let report = validate("<div><p>Hello <b>there</b></p><br><img src=x/></div>");
        assert!(report.is_valid());
        assert_eq!(report.auto_dismiss_after(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_empty_and_text_only() {
        assert!(validate("").is_valid());
        assert!(validate("no tags at all").is_valid());
    }

    #[test]
    fn test_mismatch_reports_inner_unclosed() {
        let report = validate("<div><span></div>");
        assert_eq!(
            report.messages(),
            vec![
                "Expected closing tag </span> but found </div> at position 11".to_string(),
                "Unclosed tag <span> at position 5".to_string(),
            ]
        );
        assert_eq!(report.auto_dismiss_after(), None);
    }

    #[test]
    fn test_unmatched_close() {
        let report = validate("</p><p>x</p>");
        assert_eq!(
            report.messages(),
            vec!["Closing tag </p> has no matching opening tag at position 0".to_string()]
        );
    }

    #[test]
    fn test_stray_close_with_no_opener_is_skipped() {
        let report = validate("<div></span></div>");
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(
            &report.errors[0].issue,
            StructuralIssue::Mismatch { expected, found } if expected == "div" && found == "span"
        ));
    }

    #[test]
    fn test_unclosed_reported_outermost_first() {
        let report = validate("<section><div>");
        assert_eq!(
            report.messages(),
            vec![
                "Unclosed tag <section> at position 0".to_string(),
                "Unclosed tag <div> at position 9".to_string(),
            ]
        );
    }

    #[test]
    fn test_names_compare_case_insensitively() {
        assert!(validate("<DIV><P>x</p></div>").is_valid());
        assert_eq!(
            validate("<B>x").messages(),
            vec!["Unclosed tag <b> at position 0".to_string()]
        );
    }

    #[test]
    fn test_comments_are_not_tags() {
        assert!(validate("<!-- <div> --><p>x</p>").is_valid());
    }

    #[test]
    fn test_nested_pairs_are_valid() {
        let names = ["div", "p", "section", "span", "ul", "li", "em"];
        let mut markup = String::new();
        for (i, name) in names.iter().enumerate() {
            markup.push_str(&format!("<{} id=\"n{}\">text {}", name, i, i));
        }
        for name in names.iter().rev() {
            markup.push_str(&format!("</{}> between ", name));
        }
        assert!(validate(&markup).is_valid());
    }

    #[test]
    fn test_dropping_final_close_reports_single_unclosed() {
        let samples = [
            "<div><p>Hello</p></div>",
            "<article><h1>T</h1><p>a <b>b</b></p></article>",
            "<ul><li>1</li><li>2</li></ul>",
        ];
        for sample in samples {
            assert!(validate(sample).is_valid());
            let cut = sample.rfind("</").unwrap();
            let truncated = &sample[..cut];
            let report = validate(truncated);
            assert_eq!(report.errors.len(), 1, "for {:?}", truncated);
            assert_eq!(report.errors[0].offset, 0);
            assert!(matches!(report.errors[0].issue, StructuralIssue::Unclosed { .. }));
        }
    }
}
