//! Find and Replace over source text
//!
//! This module provides the search side of the source editors:
//! - Case-sensitive or case-insensitive substring search
//! - Next/previous navigation with wraparound
//! - Replace current and Replace All
//!
//! Hits are found by a forward scan that resumes one character past each
//! hit, so a query that overlaps itself (`aa` in `aaaa`) reports every
//! starting position. Offsets are byte offsets into the searched text.

use log::debug;
use regex::{NoExpand, Regex, RegexBuilder};

use crate::string_utils::next_char_boundary;

// ─────────────────────────────────────────────────────────────────────────────
// Matching
// ─────────────────────────────────────────────────────────────────────────────

fn insensitive_regex(query: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|e| debug!("Could not build search pattern for '{}': {}", query, e))
        .ok()
}

/// All `(start, end)` spans of `query` in `text`.
fn find_spans(text: &str, query: &str, case_sensitive: bool) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    if query.is_empty() {
        return spans;
    }

    if case_sensitive {
        let mut from = 0;
        while let Some(pos) = text[from..].find(query) {
            let start = from + pos;
            spans.push((start, start + query.len()));
            from = next_char_boundary(text, start);
        }
    } else if let Some(re) = insensitive_regex(query) {
        let mut from = 0;
        while from <= text.len() {
            let Some(m) = re.find_at(text, from) else { break };
            spans.push((m.start(), m.end()));
            if m.start() >= text.len() {
                break;
            }
            from = next_char_boundary(text, m.start());
        }
    }

    spans
}

/// Start offsets of every occurrence of `query` in `source`.
///
/// An empty query finds nothing.
pub fn find(source: &str, query: &str, case_sensitive: bool) -> Vec<usize> {
    find_spans(source, query, case_sensitive)
        .into_iter()
        .map(|(start, _)| start)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Find State
// ─────────────────────────────────────────────────────────────────────────────

/// State for find/replace over one source buffer.
///
/// The text itself is not stored; every operation that reads matches takes
/// the current text and rescans first, so offsets are never stale.
#[derive(Debug, Clone, Default)]
pub struct FindState {
    /// Current search term
    pub query: String,
    /// Current replacement text
    pub replacement: String,
    /// Whether search is case-sensitive
    pub case_sensitive: bool,
    /// Current match index (0-indexed)
    current_index: usize,
    /// All matches as (start, end) byte positions
    matches: Vec<(usize, usize)>,
}

impl FindState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find all matches in `text`, returning how many there are.
    ///
    /// An empty query clears the matches and resets the current index.
    pub fn find_matches(&mut self, text: &str) -> usize {
        self.matches = find_spans(text, &self.query, self.case_sensitive);

        if self.matches.is_empty() || self.current_index >= self.matches.len() {
            self.current_index = 0;
        }

        self.matches.len()
    }

    /// Rescan, then move to the next match (wrapping to the first).
    pub fn next_match(&mut self, text: &str) -> Option<(usize, usize)> {
        if self.find_matches(text) == 0 {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.matches.len();
        self.current_match_position()
    }

    /// Rescan, then move to the previous match (wrapping to the last).
    pub fn prev_match(&mut self, text: &str) -> Option<(usize, usize)> {
        if self.find_matches(text) == 0 {
            return None;
        }
        self.current_index = if self.current_index == 0 {
            self.matches.len() - 1
        } else {
            self.current_index - 1
        };
        self.current_match_position()
    }

    /// Replace the current match in `text`.
    ///
    /// Returns the new text, or `None` when there is nothing to replace.
    /// Afterwards the current index points at the first match at or after
    /// the end of the inserted replacement, wrapping to the first match.
    pub fn replace_current(&mut self, text: &str) -> Option<String> {
        if self.find_matches(text) == 0 {
            return None;
        }
        let (start, end) = self.current_match_position()?;

        let mut new_text = String::with_capacity(text.len() + self.replacement.len());
        new_text.push_str(&text[..start]);
        new_text.push_str(&self.replacement);
        new_text.push_str(&text[end..]);

        let resume_at = start + self.replacement.len();
        self.find_matches(&new_text);
        self.current_index = self
            .matches
            .iter()
            .position(|&(s, _)| s >= resume_at)
            .unwrap_or(0);

        debug!(
            "Replaced match at {}, {} matches remain",
            start,
            self.matches.len()
        );
        Some(new_text)
    }

    /// Replace every occurrence of the query in `text`.
    ///
    /// Scans `text` fresh rather than reusing stored offsets.
    pub fn replace_all(&self, text: &str) -> String {
        if self.query.is_empty() {
            return text.to_string();
        }

        if self.case_sensitive {
            return text.replace(&self.query, &self.replacement);
        }

        match insensitive_regex(&self.query) {
            Some(re) => re
                .replace_all(text, NoExpand(&self.replacement))
                .into_owned(),
            None => text.to_string(),
        }
    }

    /// Get the current match position as (start, end).
    pub fn current_match_position(&self) -> Option<(usize, usize)> {
        self.matches.get(self.current_index).copied()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn matches(&self) -> &[(usize, usize)] {
        &self.matches
    }

    /// Start offsets of the last scan.
    pub fn offsets(&self) -> Vec<usize> {
        self.matches.iter().map(|&(start, _)| start).collect()
    }

    /// Clear the query and all matches.
    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.current_index = 0;
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
