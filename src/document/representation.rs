//! Representation and transition types for the mode controller.

use serde::{Deserialize, Serialize};

use crate::export::ContentType;

// ─────────────────────────────────────────────────────────────────────────────
// Representation
// ─────────────────────────────────────────────────────────────────────────────

/// Which surface currently holds the authoritative content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// The external rich-text tree
    #[default]
    Visual,
    /// Raw source text edited as HTML
    Html,
    /// Raw Markdown text
    Markdown,
}

impl Representation {
    /// Whether the host should present a source/code view.
    pub fn is_source_mode(&self) -> bool {
        matches!(self, Representation::Html)
    }

    /// Content type reported to the host for this representation.
    ///
    /// Visual content is always read back as HTML.
    pub fn content_type(&self) -> ContentType {
        match self {
            Representation::Visual | Representation::Html => ContentType::Html,
            Representation::Markdown => ContentType::Markdown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Representation::Visual => "Visual",
            Representation::Html => "HTML",
            Representation::Markdown => "Markdown",
        }
    }
}

/// What kind of document is being edited.
///
/// Landing pages are hand-built HTML and never open in the visual editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Post,
    Landing,
}

impl ContentKind {
    pub fn allows_visual(&self) -> bool {
        !matches!(self, ContentKind::Landing)
    }
}

/// User-facing explanation for the landing-page guard.
pub const LANDING_VISUAL_REJECTION: &str =
    "Landing pages can only be edited as HTML or Markdown; the visual editor would rewrite their layout.";

// ─────────────────────────────────────────────────────────────────────────────
// Outcomes
// ─────────────────────────────────────────────────────────────────────────────

/// Everything the host needs after a successful mode switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// Content of the new authoritative representation
    pub content: String,
    pub representation: Representation,
    /// `true` only when the new representation is `Html`
    pub is_source_mode: bool,
}

/// Result of a mode-switch request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    Switched(TransitionResult),
    /// Already in the requested representation
    Unchanged,
    /// Refused by a guard; state is untouched
    Rejected { message: String },
}

impl TransitionOutcome {
    pub fn is_switched(&self) -> bool {
        matches!(self, TransitionOutcome::Switched(_))
    }
}

/// Payload for the host's content-change callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub content: String,
    pub format: ContentType,
}

impl ContentChange {
    pub fn html(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: ContentType::Html,
        }
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: ContentType::Markdown,
        }
    }
}
