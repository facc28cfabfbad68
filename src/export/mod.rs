//! Source Export Module for Quire
//!
//! Getting the active source out of the engine: clipboard copies and the
//! payload handed to the host's save call.
//!
//! # Architecture
//!
//! - `clipboard.rs` - Clipboard sink trait and the platform clipboard
//! - `payload.rs` - Save payload and content type

pub mod clipboard;
pub mod payload;

pub use clipboard::{copy_text, ClipboardSink, CopyOutcome, SystemClipboard};
pub use payload::{ContentType, SavePayload};
