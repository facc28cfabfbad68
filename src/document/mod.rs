//! Document module for Quire
//!
//! One document, three representations: the visual rich-text tree, HTML
//! source and Markdown source. `ModeController` decides which one is
//! authoritative and converts between them through the adapters.

pub mod adapters;
mod controller;
pub mod representation;

pub use adapters::{DefaultConverter, MarkupConverter, RichTextEditor};
pub use controller::{InitialDocument, ModeController};
pub use representation::{
    ContentChange, ContentKind, Representation, TransitionOutcome, TransitionResult,
};
