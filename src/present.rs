// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Display helpers for result lists.
//!
//! Rendering belongs to the caller, but every caller needs the same three things:
//! a short excerpt, whether a link leaves the site, and where to put highlight
//! marks in a title.

use crate::types::DocumentRecord;
use std::ops::Range;

/// Excerpts are cut at this many characters.
pub const EXCERPT_CHARS: usize = 60;

/// Where a result link should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// Site-relative url; open in place.
    SameSite,
    /// Absolute `http(s)` url; open in a new tab/window.
    External,
}

impl DocumentRecord {
    /// First [`EXCERPT_CHARS`] characters of `content`, with `...` if cut.
    /// `None` when there's no content at all.
    pub fn excerpt(&self) -> Option<String> {
        excerpt(&self.content, EXCERPT_CHARS)
    }

    pub fn link_target(&self) -> LinkTarget {
        if self.url.starts_with("http") {
            LinkTarget::External
        } else {
            LinkTarget::SameSite
        }
    }

    pub fn is_external(&self) -> bool {
        self.link_target() == LinkTarget::External
    }
}

/// Cut `text` to `limit` characters, appending `...` when something was dropped.
pub fn excerpt(text: &str, limit: usize) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    match text.char_indices().nth(limit) {
        Some((cut, _)) => Some(format!("{}...", &text[..cut])),
        None => Some(text.to_string()),
    }
}

/// Byte ranges of every case-insensitive occurrence of `query` in `text`.
///
/// The whole (trimmed) query is matched literally, not term by term, and matches
/// don't overlap. Ranges are always on char boundaries.
pub fn highlight_spans(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.trim().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let hay: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        let hit = needle
            .iter()
            .zip(&hay[i..])
            .all(|(&q, &(_, t))| same_letter(q, t));
        if hit {
            let start = hay[i].0;
            let end = hay
                .get(i + needle.len())
                .map_or(text.len(), |&(offset, _)| offset);
            spans.push(start..end);
            i += needle.len();
        } else {
            i += 1;
        }
    }
    spans
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
