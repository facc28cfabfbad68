//! Mode controller
//!
//! Owns one document and moves it between the visual tree, HTML source and
//! Markdown source. Exactly one representation is authoritative at a time;
//! the other two are caches. Conversions for a switch are computed before
//! any field is touched, so a failing adapter leaves the document exactly
//! as it was.
//!
//! Every mutating call returns what the host needs to fire its own
//! callbacks (`TransitionResult`, `ContentChange`, `SavePayload`); the
//! controller never calls back into the host.

use log::{debug, info, warn};

use crate::config::{EditorSettings, FormatSettings};
use crate::document::adapters::{
    looks_like_markup, strip_editing_marker, DefaultConverter, MarkupConverter, RichTextEditor,
};
use crate::document::representation::{
    ContentChange, ContentKind, Representation, TransitionOutcome, TransitionResult,
    LANDING_VISUAL_REJECTION,
};
use crate::editor::{EditHistory, FindState, SourceEdit};
use crate::error::{ConversionDirection, Error, Result};
use crate::export::{copy_text, ClipboardSink, ContentType, CopyOutcome, SavePayload};
use crate::markup::{beautify, highlight_html, minify, validate, ValidationReport};

/// How a document starts out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialDocument {
    pub content: String,
    /// Language `content` is written in
    pub content_type: ContentType,
    /// Requested starting representation
    pub representation: Representation,
    pub kind: ContentKind,
}

impl InitialDocument {
    pub fn html(content: impl Into<String>, representation: Representation) -> Self {
        Self {
            content: content.into(),
            content_type: ContentType::Html,
            representation,
            kind: ContentKind::Post,
        }
    }

    pub fn markdown(content: impl Into<String>, representation: Representation) -> Self {
        Self {
            content: content.into(),
            content_type: ContentType::Markdown,
            representation,
            kind: ContentKind::Post,
        }
    }

    pub fn landing(mut self) -> Self {
        self.kind = ContentKind::Landing;
        self
    }
}

/// Tag an adapter error with the direction it happened in, unless it
/// already carries one.
fn in_direction(direction: ConversionDirection) -> impl FnOnce(Error) -> Error {
    move |e| match e {
        e @ Error::Conversion { .. } => e,
        other => Error::conversion(direction, other),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level state machine over one document.
pub struct ModeController<E: RichTextEditor, C: MarkupConverter = DefaultConverter> {
    editor: E,
    converter: C,
    representation: Representation,
    kind: ContentKind,
    html_source: String,
    markdown_source: String,
    settings: EditorSettings,
    /// Present only while `Html` is the active representation
    history: Option<EditHistory>,
    search: FindState,
}

impl<E: RichTextEditor> ModeController<E, DefaultConverter> {
    /// Open a document with the comrak/htmd converter.
    pub fn new(editor: E, settings: EditorSettings, initial: InitialDocument) -> Result<Self> {
        Self::with_converter(editor, DefaultConverter, settings, initial)
    }
}

impl<E: RichTextEditor, C: MarkupConverter> ModeController<E, C> {
    /// Open a document with a custom converter.
    ///
    /// Markdown content is unescaped on the way in; HTML content is kept
    /// verbatim. A landing page requested in `Visual` opens in `Html`.
    pub fn with_converter(
        mut editor: E,
        converter: C,
        settings: EditorSettings,
        initial: InitialDocument,
    ) -> Result<Self> {
        let mut representation = initial.representation;
        if representation == Representation::Visual && !initial.kind.allows_visual() {
            info!("Landing page requested in visual mode, opening as HTML");
            representation = Representation::Html;
        }

        let mut html_source = String::new();
        let mut markdown_source = String::new();

        match initial.content_type {
            ContentType::Markdown => {
                let markdown = converter.unescape_markdown(&initial.content);
                match representation {
                    Representation::Visual => {
                        let html = converter.markdown_to_html(&markdown)?;
                        editor
                            .set_content(&html)
                            .map_err(in_direction(ConversionDirection::HtmlToTree))?;
                    }
                    Representation::Html => html_source = markdown.clone(),
                    Representation::Markdown => {}
                }
                markdown_source = markdown;
            }
            ContentType::Html => {
                match representation {
                    Representation::Visual => editor
                        .set_content(&initial.content)
                        .map_err(in_direction(ConversionDirection::HtmlToTree))?,
                    Representation::Markdown => {
                        markdown_source = if looks_like_markup(&initial.content) {
                            converter.html_to_markdown(&initial.content)?
                        } else {
                            converter.unescape_markdown(&initial.content)
                        };
                    }
                    Representation::Html => {}
                }
                html_source = initial.content;
            }
        }

        let history = (representation == Representation::Html)
            .then(|| EditHistory::seeded(html_source.clone(), settings.history_limit));

        debug!(
            "Document opened in {} mode ({:?})",
            representation.label(),
            initial.kind
        );

        Ok(Self {
            editor,
            converter,
            representation,
            kind: initial.kind,
            html_source,
            markdown_source,
            settings,
            history,
            search: FindState::new(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn content_kind(&self) -> ContentKind {
        self.kind
    }

    pub fn html_source(&self) -> &str {
        &self.html_source
    }

    pub fn markdown_source(&self) -> &str {
        &self.markdown_source
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn search(&self) -> &FindState {
        &self.search
    }

    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(EditHistory::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(EditHistory::can_redo)
    }

    /// Text of the active source view; `None` in `Visual`.
    pub fn active_source(&self) -> Option<&str> {
        match self.representation {
            Representation::Visual => None,
            Representation::Html => Some(&self.html_source),
            Representation::Markdown => Some(&self.markdown_source),
        }
    }

    /// Content of the authoritative representation.
    pub fn current_content(&self) -> String {
        match self.active_source() {
            Some(source) => source.to_string(),
            None => self.editor.get_content(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Switch the authoritative representation.
    ///
    /// A conversion failure aborts the switch: the error is returned and
    /// the document is left exactly as it was.
    pub fn switch_to(&mut self, target: Representation) -> Result<TransitionOutcome> {
        let from = self.representation;
        if target == from {
            return Ok(TransitionOutcome::Unchanged);
        }

        if target == Representation::Visual && !self.kind.allows_visual() {
            info!("Refused switch to visual mode for landing page");
            return Ok(TransitionOutcome::Rejected {
                message: LANDING_VISUAL_REJECTION.to_string(),
            });
        }

        if let Err(e) = self.transition(from, target) {
            warn!(
                "Switch from {} to {} aborted: {}",
                from.label(),
                target.label(),
                e
            );
            return Err(e);
        }

        info!("Switched from {} to {}", from.label(), target.label());
        Ok(TransitionOutcome::Switched(TransitionResult {
            content: self.current_content(),
            representation: target,
            is_source_mode: target.is_source_mode(),
        }))
    }

    /// `Html` goes to `Visual`; anything else goes to `Html`.
    pub fn toggle_source_view(&mut self) -> Result<TransitionOutcome> {
        let target = match self.representation {
            Representation::Html => Representation::Visual,
            _ => Representation::Html,
        };
        self.switch_to(target)
    }

    fn transition(&mut self, from: Representation, to: Representation) -> Result<()> {
        use Representation::{Html, Markdown, Visual};

        match (from, to) {
            (Visual, Html) => {
                if self.html_source.trim().is_empty() {
                    let tree_html = self.editor.get_content();
                    self.html_source = beautify(&tree_html, &self.settings.format);
                } else {
                    debug!("Keeping existing HTML source over tree output");
                }
            }
            (Visual, Markdown) => {
                let tree_html = self.editor.get_content();
                let cleaned = self.converter.clean_html(&tree_html);
                self.markdown_source = self.converter.html_to_markdown(&cleaned)?;
            }
            (Html, Visual) => {
                self.editor
                    .set_content(&self.html_source)
                    .map_err(in_direction(ConversionDirection::HtmlToTree))?;
            }
            (Html, Markdown) => {
                self.markdown_source = if looks_like_markup(&self.html_source) {
                    self.converter.html_to_markdown(&self.html_source)?
                } else {
                    self.converter.unescape_markdown(&self.html_source)
                };
            }
            (Markdown, Visual) => {
                let html = self.converter.markdown_to_html(&self.markdown_source)?;
                self.editor
                    .set_content(&html)
                    .map_err(in_direction(ConversionDirection::HtmlToTree))?;
            }
            (Markdown, Html) => {
                self.html_source = self.markdown_source.clone();
            }
            (Visual, Visual) | (Html, Html) | (Markdown, Markdown) => return Ok(()),
        }

        self.representation = to;
        self.history = (to == Html)
            .then(|| EditHistory::seeded(self.html_source.clone(), self.settings.history_limit));
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Source Edits
    // ─────────────────────────────────────────────────────────────────────────

    fn change(&self) -> Option<ContentChange> {
        match self.representation {
            Representation::Visual => None,
            Representation::Html => Some(ContentChange::html(self.html_source.clone())),
            Representation::Markdown => Some(ContentChange::markdown(self.markdown_source.clone())),
        }
    }

    /// Replace the active source text (typing, paste, host edits).
    ///
    /// Returns `None` in `Visual`, where the tree is the source of truth.
    pub fn set_source(&mut self, text: impl Into<String>) -> Option<ContentChange> {
        let text = text.into();
        match self.representation {
            Representation::Visual => {
                debug!("Ignoring source edit in visual mode");
                return None;
            }
            Representation::Html => {
                if let Some(history) = self.history.as_mut() {
                    history.push(text.as_str());
                }
                self.html_source = text;
            }
            Representation::Markdown => self.markdown_source = text,
        }
        self.change()
    }

    /// Apply the result of a keystroke helper from `editor::source_edit`.
    pub fn apply_source_edit(&mut self, edit: &SourceEdit) -> Option<ContentChange> {
        self.set_source(edit.text.clone())
    }

    /// Notify the controller that the visual tree was edited.
    pub fn tree_changed(&self) -> Option<ContentChange> {
        (self.representation == Representation::Visual)
            .then(|| ContentChange::html(self.editor.get_content()))
    }

    /// Re-indent the HTML source. Only available in `Html`.
    pub fn beautify_source(&mut self) -> Option<ContentChange> {
        if self.representation != Representation::Html {
            return None;
        }
        let formatted = beautify(&self.html_source, &self.settings.format);
        debug!("Beautified HTML source ({} bytes)", formatted.len());
        self.set_source(formatted)
    }

    /// Collapse whitespace in the HTML source. Only available in `Html`.
    pub fn minify_source(&mut self) -> Option<ContentChange> {
        if self.representation != Representation::Html {
            return None;
        }
        let minified = minify(&self.html_source);
        debug!("Minified HTML source ({} bytes)", minified.len());
        self.set_source(minified)
    }

    pub fn undo(&mut self) -> Option<ContentChange> {
        let previous = self.history.as_mut()?.undo()?.to_string();
        self.html_source = previous;
        self.change()
    }

    pub fn redo(&mut self) -> Option<ContentChange> {
        let next = self.history.as_mut()?.redo()?.to_string();
        self.html_source = next;
        self.change()
    }

    /// Change indentation and line endings for later beautify calls.
    pub fn set_format_settings(&mut self, mut format: FormatSettings) {
        format.sanitize();
        self.settings.format = format;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Find / Replace
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a search over the active source; returns the match count.
    pub fn find(&mut self, query: &str, case_sensitive: bool) -> usize {
        self.search.query = query.to_string();
        self.search.case_sensitive = case_sensitive;
        let text = self.active_source().unwrap_or_default().to_string();
        self.search.find_matches(&text)
    }

    pub fn find_next(&mut self) -> Option<(usize, usize)> {
        let text = self.active_source()?.to_string();
        self.search.next_match(&text)
    }

    pub fn find_previous(&mut self) -> Option<(usize, usize)> {
        let text = self.active_source()?.to_string();
        self.search.prev_match(&text)
    }

    pub fn replace_current(&mut self, replacement: &str) -> Option<ContentChange> {
        let text = self.active_source()?.to_string();
        self.search.replacement = replacement.to_string();
        let replaced = self.search.replace_current(&text)?;
        self.set_source(replaced)
    }

    /// Replace every hit; `None` when nothing changed.
    pub fn replace_all(&mut self, replacement: &str) -> Option<ContentChange> {
        let text = self.active_source()?.to_string();
        self.search.replacement = replacement.to_string();
        let replaced = self.search.replace_all(&text);
        if replaced == text {
            return None;
        }
        let change = self.set_source(replaced);
        let text = self.active_source().unwrap_or_default().to_string();
        self.search.find_matches(&text);
        change
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation, Highlighting, Clipboard
    // ─────────────────────────────────────────────────────────────────────────

    /// Check the structure of the authoritative content.
    pub fn validate(&self) -> ValidationReport {
        validate(&self.current_content())
    }

    /// Highlighted HTML source, when in `Html` with highlighting enabled.
    pub fn highlighted_source(&self) -> Option<String> {
        if self.representation != Representation::Html || !self.settings.syntax_highlighting {
            return None;
        }
        Some(highlight_html(&self.html_source, self.settings.highlight_theme))
    }

    /// Copy the authoritative content to `sink`.
    pub fn copy_source(&self, sink: &mut dyn ClipboardSink) -> CopyOutcome {
        copy_text(sink, &self.current_content())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Save
    // ─────────────────────────────────────────────────────────────────────────

    /// Serialize the authoritative representation for the host to persist.
    ///
    /// Source views are saved verbatim. The visual tree has its pending
    /// edits finalized, the editing marker stripped, and is then beautified.
    pub fn save(&mut self) -> Result<SavePayload> {
        let payload = match self.representation {
            Representation::Html => SavePayload {
                content: self.html_source.clone(),
                content_type: ContentType::Html,
            },
            Representation::Markdown => SavePayload {
                content: self.markdown_source.clone(),
                content_type: ContentType::Markdown,
            },
            Representation::Visual => {
                self.editor
                    .finalize_pending_edits()
                    .map_err(in_direction(ConversionDirection::TreeToHtml))?;
                let html = strip_editing_marker(&self.editor.get_content());
                SavePayload {
                    content: beautify(&html, &self.settings.format),
                    content_type: ContentType::Html,
                }
            }
        };
        info!(
            "Saving {} bytes as {}",
            payload.content.len(),
            payload.content_type.as_str()
        );
        Ok(payload)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
