// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query tokenization for mixed Chinese/Latin text.
//!
//! Two scripts, two rules, one output set:
//!
//! - **CJK**: every ideograph is pulled out in order (everything else dropped) and
//!   the sequence is cut into non-overlapping pairs. `日本語` becomes `日本`; the
//!   odd `語` is thrown away because the index has no single-character keys.
//! - **Latin/digits**: the input is lower-cased and every maximal `[a-z0-9]` run of
//!   two or more characters is a term. No further splitting, no stemming.
//!
//! The index builder uses the same rules, so a term that comes out of here either
//! exists as a key or doesn't. There's no partial matching to fall back on.

use std::collections::HashSet;

/// First ideograph of the CJK Unified Ideographs block.
pub const CJK_START: char = '\u{4E00}';
/// Last ideograph the index builder pairs up.
pub const CJK_END: char = '\u{9FA5}';

/// Minimum length of a Latin/digit run.
const MIN_WORD_CHARS: usize = 2;

#[inline]
pub fn is_cjk(c: char) -> bool {
    (CJK_START..=CJK_END).contains(&c)
}

/// Deduplicated query terms, in first-seen order.
///
/// Callers should treat this as a set. The order exists so that ranking ties come
/// out the same way every time for the same query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet {
    terms: Vec<String>,
}

impl TermSet {
    fn insert(&mut self, seen: &mut HashSet<String>, term: String) {
        if seen.insert(term.clone()) {
            self.terms.push(term);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.terms
    }
}

/// Split free text into index terms.
///
/// # Example
///
/// ```
/// use shiori::tokenize;
///
/// let terms = tokenize("日本語AB");
/// assert!(terms.contains("日本"));
/// assert!(terms.contains("ab"));
/// assert_eq!(terms.len(), 2);
/// ```
pub fn tokenize(text: &str) -> TermSet {
    let mut out = TermSet::default();
    let mut seen = HashSet::new();

    let ideographs: Vec<char> = text.chars().filter(|&c| is_cjk(c)).collect();
    for pair in ideographs.chunks_exact(2) {
        out.insert(&mut seen, pair.iter().collect());
    }

    let lowered = text.to_lowercase();
    let mut run = String::new();
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut seen, &mut run);
    }
    flush_run(&mut out, &mut seen, &mut run);

    out
}

fn flush_run(out: &mut TermSet, seen: &mut HashSet<String>, run: &mut String) {
    if run.len() >= MIN_WORD_CHARS {
        out.insert(seen, std::mem::take(run));
    } else {
        run.clear();
    }
}
