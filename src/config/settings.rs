//! Editor settings and preferences for Quire
//!
//! This module defines the `EditorSettings` struct that holds the
//! user-configurable knobs of the engine, with serde support for JSON
//! persistence.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Source Formatting
// ─────────────────────────────────────────────────────────────────────────────

/// One level of indentation in beautified source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentUnit {
    /// N spaces per level
    Spaces(u8),
    /// One tab per level
    Tabs,
}

impl Default for IndentUnit {
    fn default() -> Self {
        IndentUnit::Spaces(2)
    }
}

impl IndentUnit {
    /// Supported space widths.
    pub const SPACE_WIDTHS: [u8; 2] = [2, 4];

    /// The literal text of one indent level.
    pub fn unit(&self) -> String {
        match self {
            IndentUnit::Spaces(n) => " ".repeat(*n as usize),
            IndentUnit::Tabs => "\t".to_string(),
        }
    }

    /// Display label for settings UIs.
    pub fn label(&self) -> String {
        match self {
            IndentUnit::Spaces(n) => format!("{} spaces", n),
            IndentUnit::Tabs => "Tabs".to_string(),
        }
    }
}

/// Line terminator written between beautified lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LineEnding::Lf => "LF",
            LineEnding::Crlf => "CRLF",
        }
    }
}

/// Options consumed by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormatSettings {
    pub indent: IndentUnit,
    pub line_ending: LineEnding,
}

impl FormatSettings {
    /// Snap unsupported indent widths to the nearest supported one.
    pub fn sanitize(&mut self) {
        if let IndentUnit::Spaces(n) = self.indent {
            let snapped = if n <= 2 { 2 } else { 4 };
            self.indent = IndentUnit::Spaces(snapped);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Highlighting
// ─────────────────────────────────────────────────────────────────────────────

/// Palette used by the source highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HighlightTheme {
    #[default]
    Light,
    Dark,
}

impl HighlightTheme {
    pub fn toggle(&self) -> Self {
        match self {
            HighlightTheme::Light => HighlightTheme::Dark,
            HighlightTheme::Dark => HighlightTheme::Light,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// All persisted engine preferences.
///
/// Missing fields fall back to their defaults when deserializing, so older
/// preference files keep loading as fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Indentation and line endings for beautify
    pub format: FormatSettings,

    /// Maximum number of snapshots kept by the source history
    pub history_limit: usize,

    /// Whether the host should paint highlighted source
    pub syntax_highlighting: bool,

    /// Palette for highlighted source
    pub highlight_theme: HighlightTheme,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            format: FormatSettings::default(),
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
            syntax_highlighting: true,
            highlight_theme: HighlightTheme::default(),
        }
    }
}

impl EditorSettings {
    /// Default number of history snapshots.
    pub const DEFAULT_HISTORY_LIMIT: usize = 50;
    /// Smallest allowed history capacity.
    pub const MIN_HISTORY_LIMIT: usize = 1;
    /// Largest allowed history capacity.
    pub const MAX_HISTORY_LIMIT: usize = 500;

    /// Clamp values to valid ranges.
    ///
    /// Used after loading settings that may have been edited by hand.
    pub fn sanitize(&mut self) {
        self.format.sanitize();
        self.history_limit = self
            .history_limit
            .clamp(Self::MIN_HISTORY_LIMIT, Self::MAX_HISTORY_LIMIT);
    }

    /// Deserialize and sanitize in one step.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
