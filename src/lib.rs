//! Quire
//!
//! Document engine for a post editor that keeps a visual rich-text tree,
//! HTML source and Markdown source in step. The host supplies the rich-text
//! widget and the UI; this crate owns mode switching, formatting,
//! validation, find/replace, undo history and the save payload.

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod export;
pub mod markup;
pub mod string_utils;

pub use config::EditorSettings;
pub use document::{
    ContentChange, ContentKind, DefaultConverter, InitialDocument, MarkupConverter,
    ModeController, Representation, RichTextEditor, TransitionOutcome, TransitionResult,
};
pub use error::{Error, Result};
pub use export::{ContentType, SavePayload};

/// Install the `env_logger` backend, honoring `RUST_LOG` and defaulting to
/// `info`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
