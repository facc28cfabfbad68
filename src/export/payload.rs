//! Payloads handed back to the host for saving and change notification.

use serde::{Deserialize, Serialize};

/// Which markup language a piece of content is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Html,
    Markdown,
}

impl ContentType {
    /// Wire name used in host callbacks (`"html"` / `"markdown"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "html",
            ContentType::Markdown => "markdown",
        }
    }
}

/// Result of a save: exactly what the host should persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub content: String,
    pub content_type: ContentType,
}
