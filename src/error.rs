//! Centralized error handling for Quire
//!
//! One error type covers every recoverable failure the engine can hit:
//! preference persistence, conversion adapters, and clipboard access.
//! Structural markup problems are *not* errors; they are reported as data
//! by the validator and never block editing.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Which way a failing conversion was heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionDirection {
    /// Loading HTML into the rich-text tree
    HtmlToTree,
    /// HTML source to Markdown source
    HtmlToMarkdown,
    /// Markdown source to HTML
    MarkdownToHtml,
    /// Reading or normalizing the rich-text tree
    TreeToHtml,
}

impl ConversionDirection {
    /// Short human-readable label used in messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            ConversionDirection::HtmlToTree => "HTML to visual",
            ConversionDirection::HtmlToMarkdown => "HTML to Markdown",
            ConversionDirection::MarkdownToHtml => "Markdown to HTML",
            ConversionDirection::TreeToHtml => "visual to HTML",
        }
    }
}

/// The centralized error type for the engine.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load the preference file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save the preference file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse preferences (invalid JSON or value)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Editing Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// An external conversion adapter or the rich-text editor failed
    Conversion {
        direction: ConversionDirection,
        message: String,
    },

    /// Clipboard could not be opened or written
    Clipboard(String),

    /// Generic application error with a message
    Application(String),
}

impl Error {
    /// Build a conversion error from any displayable cause.
    pub fn conversion(direction: ConversionDirection, cause: impl fmt::Display) -> Self {
        Error::Conversion {
            direction,
            message: cause.to_string(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load preferences from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save preferences to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid preference format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }

            // Editing Errors
            Error::Conversion { direction, message } => {
                write!(f, "{} conversion failed: {}", direction.label(), message)
            }
            Error::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),
            Error::Application(msg) => write!(f, "{}", msg),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::ConfigDirNotFound
            | Error::Conversion { .. }
            | Error::Clipboard(_)
            | Error::Application(_) => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_creation() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test error");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_conversion_error_display() {
        let err = Error::conversion(ConversionDirection::HtmlToMarkdown, "bad tree");
        let msg = err.to_string();
        assert_eq!(msg, "HTML to Markdown conversion failed: bad tree");
    }

    #[test]
    fn test_clipboard_error_display() {
        let err = Error::Clipboard("no display".to_string());
        assert_eq!(err.to_string(), "Clipboard error: no display");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("invalid json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_display_config_dir_not_found() {
        let err = Error::ConfigDirNotFound;
        assert_eq!(err.to_string(), "Configuration directory not found");
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as StdError;
        let err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "not found"));
        assert!(err.source().is_some());

        let err = Error::conversion(ConversionDirection::HtmlToTree, "x");
        assert!(err.source().is_none());
        assert!(Error::Clipboard("x".into()).source().is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default() {
        let ok: super::Result<i32> = Ok(42);
        assert_eq!(ok.unwrap_or_warn_default(0, "ctx"), 42);

        let err: super::Result<i32> = Err(Error::Application("test".to_string()));
        assert_eq!(err.unwrap_or_warn_default(7, "ctx"), 7);
    }
}
