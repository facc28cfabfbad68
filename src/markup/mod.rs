//! Markup module for Quire
//!
//! Text-level HTML processing that works on raw source strings without
//! building a DOM.
//!
//! # Architecture
//!
//! - `tags.rs` - Element classification tables and tag parsing
//! - `tokenizer.rs` - Splits markup into tag and text tokens
//! - `formatter.rs` - Beautify and minify
//! - `validator.rs` - Open/close tag balance checks
//! - `highlight.rs` - Colorized HTML rendering of source text

pub mod formatter;
pub mod highlight;
pub mod tags;
pub mod tokenizer;
pub mod validator;

pub use formatter::{beautify, minify};
pub use highlight::{escape_html, highlight_html, Palette, TagCategory};
pub use tokenizer::{tokenize, Token};
pub use validator::{validate, StructuralIssue, ValidationError, ValidationReport};
