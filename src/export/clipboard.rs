//! Clipboard Operations for Source Export
//!
//! This module copies the active source text to the clipboard. The
//! clipboard sits behind the `ClipboardSink` trait so the controller can be
//! driven without a display; `SystemClipboard` is the arboard-backed
//! implementation hosts use in practice.

use std::time::Duration;

use arboard::Clipboard;
use log::{debug, warn};

use crate::error::{Error, Result};

/// How long the host should show its "copied" confirmation.
pub const COPY_CONFIRMATION: Duration = Duration::from_secs(2);

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Sink
// ─────────────────────────────────────────────────────────────────────────────

/// Anything that can receive copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The platform clipboard, opened fresh for every copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| Error::Clipboard(e.to_string()))?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// What the host should show after a copy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Text is on the clipboard; show a confirmation for `confirm_for`.
    Copied { confirm_for: Duration },
    /// The clipboard refused; nothing is retried.
    Failed { message: String },
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied { .. })
    }
}

/// Copy `text` into `sink`, logging and swallowing failures.
pub fn copy_text(sink: &mut dyn ClipboardSink, text: &str) -> CopyOutcome {
    match sink.set_text(text) {
        Ok(()) => {
            debug!("Copied {} bytes to clipboard", text.len());
            CopyOutcome::Copied {
                confirm_for: COPY_CONFIRMATION,
            }
        }
        Err(e) => {
            warn!("Failed to copy: {}", e);
            CopyOutcome::Failed {
                message: e.to_string(),
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

    #[derive(Default)]
    struct RecordingSink {
        copied: Vec<String>,
    }

    impl ClipboardSink for RecordingSink {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    struct BrokenSink;

    impl ClipboardSink for BrokenSink {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            Err(Error::Clipboard("no display".to_string()))
        }
    }

    #[test]
    fn test_copy_success() {
        let mut sink = RecordingSink::default();
        let outcome = copy_text(&mut sink, "<p>x</p>");
        assert_eq!(
            outcome,
            CopyOutcome::Copied {
                confirm_for: Duration::from_secs(2)
            }
        );
        assert!(outcome.is_copied());
        assert_eq!(sink.copied, vec!["<p>x</p>".to_string()]);
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let outcome = copy_text(&mut BrokenSink, "x");
        match outcome {
            CopyOutcome::Failed { message } => assert!(message.contains("no display")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    // Note: SystemClipboard needs a display/clipboard context, which CI
    // environments usually lack, so it is not exercised here.
}
