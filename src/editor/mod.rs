//! Editor module for Quire
//!
//! Source-text editing support shared by the HTML and Markdown source
//! views: find/replace, the undo/redo ledger and keystroke helpers.

mod find_replace;
mod history;
pub mod source_edit;

pub use find_replace::{find, FindState};
pub use history::EditHistory;
pub use source_edit::{Selection, SourceEdit};
