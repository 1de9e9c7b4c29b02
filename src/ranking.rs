// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ordering candidate documents.
//!
//! The score is plain term frequency over the query's postings: every posting of
//! every query term adds one to its document. Three matched terms, score three.
//! A document listed twice under the same term gets counted twice; the index
//! builder's posting lists are taken at face value.
//!
//! Ties are the interesting part. With [`TieBreak::FirstSeen`] the sort is
//! stable and equal scores stay in the order the documents were first hit while
//! walking the posting lists. That order comes from term order and posting order
//! and nothing else, so it's deterministic for a given query and index, but it is
//! not meaningful. [`TieBreak::DocId`] orders ties by ascending id instead.

use crate::config::TieBreak;
use crate::tokenize::TermSet;
use crate::types::{DocId, InvertedIndex};
use std::cmp::Reverse;
use std::collections::HashMap;

/// A candidate document and its accumulated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    pub id: DocId,
    pub score: u32,
}

/// Walk the posting list of every term and count hits per document.
///
/// The result is in first-hit order, unsorted. Terms with no posting list are
/// skipped.
pub fn accumulate(index: &InvertedIndex, terms: &TermSet) -> Vec<Scored> {
    let mut scored: Vec<Scored> = Vec::new();
    let mut slot: HashMap<DocId, usize> = HashMap::new();

    for term in terms.iter() {
        let Some(postings) = index.postings(term) else {
            continue;
        };
        for &id in postings {
            let pos = *slot.entry(id).or_insert_with(|| {
                scored.push(Scored { id, score: 0 });
                scored.len() - 1
            });
            scored[pos].score += 1;
        }
    }

    scored
}

/// Sort by descending score, breaking ties as configured.
pub fn rank(mut scored: Vec<Scored>, tie_break: TieBreak) -> Vec<Scored> {
    match tie_break {
        TieBreak::FirstSeen => scored.sort_by_key(|s| Reverse(s.score)),
        TieBreak::DocId => scored.sort_by_key(|s| (Reverse(s.score), s.id)),
    }
    scored
}
