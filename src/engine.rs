// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query engine: where the pieces meet.
//!
//! ```text
//! text ─▶ tokenize ─▶ index lookup ─▶ accumulate ─▶ rank ─▶ fetch records
//!                                                              │
//!                         results ◀── truncate ◀── scope filter┘
//! ```
//!
//! Search is a nice-to-have layered over static pages, so the engine never fails
//! loudly. Too-short input, no matching terms, an unreachable index, an
//! unreachable corpus: they all come back as an empty list. Callers can't tell
//! them apart, and that's deliberate.
//!
//! Overlapping calls are fine and are not serialized. If keystrokes fire searches
//! faster than they resolve, the caller decides which answer is still current.

use crate::cache::{CacheState, SessionCache};
use crate::config::SearchConfig;
use crate::fetch::Fetch;
use crate::loader::{DocumentStore, IndexLoader};
use crate::ranking::{accumulate, rank};
use crate::scope::resolve_scope;
use crate::tokenize::tokenize;
use crate::types::{ContentScope, DocId, DocumentRecord, RankedResult};
use std::collections::HashMap;
use tracing::debug;

/// One site's search session.
///
/// Owns the fetcher and the session cache. Each artifact is fetched at most once
/// per engine (barring failures, which are retried on the next query). Dropping
/// the engine drops the cache.
pub struct SearchEngine<F> {
    fetcher: F,
    config: SearchConfig,
    cache: SessionCache,
}

impl<F: Fetch> SearchEngine<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, SearchConfig::default())
    }

    pub fn with_config(fetcher: F, config: SearchConfig) -> Self {
        Self {
            fetcher,
            config,
            cache: SessionCache::new(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn index_state(&self) -> CacheState {
        self.cache.index.state()
    }

    pub fn corpus_state(&self) -> CacheState {
        self.cache.corpus.state()
    }

    fn index_loader(&self) -> IndexLoader<'_, F> {
        IndexLoader::new(&self.fetcher, &self.cache.index, &self.config.index_path)
    }

    fn document_store(&self) -> DocumentStore<'_, F> {
        DocumentStore::new(&self.fetcher, &self.cache.corpus, &self.config.docs_path)
    }

    /// Warm the index before the first query (e.g. when a search box gains focus).
    ///
    /// Returns whether the index is available now. Never touches the corpus.
    pub async fn preload(&self) -> bool {
        self.index_loader().get().await.is_some()
    }

    /// Ranked results for `text`, at most `max_results` of them.
    pub async fn search(&self, text: &str, scope: &ContentScope) -> Vec<RankedResult> {
        if text.chars().count() < self.config.min_query_chars {
            return Vec::new();
        }

        let terms = tokenize(text);
        if terms.is_empty() {
            debug!(query = text, "no searchable terms");
            return Vec::new();
        }

        let Some(index) = self.index_loader().get().await else {
            return Vec::new();
        };

        let ranked = rank(accumulate(&index, &terms), self.config.tie_break);
        if ranked.is_empty() {
            debug!(query = text, terms = terms.len(), "no postings matched");
            return Vec::new();
        }

        let ids: Vec<DocId> = ranked.iter().map(|s| s.id).collect();
        let scores: HashMap<DocId, u32> = ranked.iter().map(|s| (s.id, s.score)).collect();
        let records = self.document_store().get(&ids).await;

        let results: Vec<RankedResult> = records
            .into_iter()
            .filter(|record| scope.admits(&record.kind))
            .take(self.config.max_results)
            .map(|document| RankedResult {
                score: scores.get(&document.id).copied().unwrap_or_default(),
                document,
            })
            .collect();

        debug!(
            query = text,
            terms = terms.len(),
            candidates = ids.len(),
            returned = results.len(),
            scope = %scope,
            "search complete"
        );
        results
    }

    /// Search scoped to the section of the site `current_path` belongs to.
    pub async fn search_at(&self, text: &str, current_path: &str) -> Vec<RankedResult> {
        self.search(text, &resolve_scope(current_path)).await
    }

    /// The best match for `text` from `current_path`, for "jump straight there"
    /// inputs that skip the result list.
    pub async fn first_hit(&self, text: &str, current_path: &str) -> Option<DocumentRecord> {
        self.search_at(text, current_path)
            .await
            .into_iter()
            .next()
            .map(|result| result.document)
    }
}
