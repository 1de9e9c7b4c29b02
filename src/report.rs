// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! How well the two artifacts agree with each other.
//!
//! The engine tolerates drift between index and corpus (stale ids are dropped,
//! duplicate postings just weigh more), which also means drift goes unnoticed. This
//! report makes it visible so a site build can be checked before it ships.

use crate::tokenize::is_cjk;
use crate::types::{Corpus, DocId, InvertedIndex};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Artifact statistics and consistency findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    /// Distinct terms in the index.
    pub terms: usize,
    /// Terms that are CJK pairs (the rest are Latin/digit runs or oddities).
    pub cjk_terms: usize,
    /// Postings across all terms, duplicates included.
    pub postings: usize,
    /// Postings that repeat an id already listed under the same term.
    pub duplicate_postings: usize,
    /// Records in the corpus.
    pub documents: usize,
    /// Record count per content type.
    pub by_type: BTreeMap<String, usize>,
    /// Ids referenced by the index that the corpus doesn't have, ascending.
    pub stale_ids: Vec<DocId>,
    /// Ids that appear more than once in the corpus, ascending.
    pub duplicate_record_ids: Vec<DocId>,
    /// Records no term points at. Unreachable through search.
    pub unreachable_documents: usize,
}

impl ArtifactReport {
    pub fn build(index: &InvertedIndex, corpus: &Corpus) -> Self {
        let mut report = ArtifactReport {
            terms: index.term_count(),
            postings: index.posting_count(),
            documents: corpus.len(),
            ..Self::default()
        };

        let mut referenced: BTreeSet<DocId> = BTreeSet::new();
        for (term, postings) in &index.terms {
            if term.chars().count() == 2 && term.chars().all(is_cjk) {
                report.cjk_terms += 1;
            }
            let mut seen = HashSet::with_capacity(postings.len());
            for &id in postings {
                if !seen.insert(id) {
                    report.duplicate_postings += 1;
                }
                referenced.insert(id);
            }
        }

        let mut record_ids: HashSet<DocId> = HashSet::with_capacity(corpus.len());
        let mut duplicate_ids: BTreeSet<DocId> = BTreeSet::new();
        for record in corpus.records() {
            *report
                .by_type
                .entry(record.kind.as_str().to_string())
                .or_insert(0) += 1;
            if !record_ids.insert(record.id) {
                duplicate_ids.insert(record.id);
            }
        }

        report.stale_ids = referenced
            .iter()
            .copied()
            .filter(|id| corpus.get(*id).is_none())
            .collect();
        report.duplicate_record_ids = duplicate_ids.into_iter().collect();
        report.unreachable_documents = record_ids
            .iter()
            .filter(|id| !referenced.contains(*id))
            .count();

        report
    }

    /// Nothing is stale, duplicated or unreachable.
    pub fn is_consistent(&self) -> bool {
        self.stale_ids.is_empty()
            && self.duplicate_postings == 0
            && self.duplicate_record_ids.is_empty()
            && self.unreachable_documents == 0
    }
}
