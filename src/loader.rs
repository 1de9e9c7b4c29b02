// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy, once-per-session artifact loading.
//!
//! The index is small (a few KB) and needed by every query, so it's fetched on the
//! first query (or earlier via `SearchEngine::preload`). The corpus is much bigger
//! and only fetched once a query has actually matched something. A user who types
//! gibberish never pays for it.
//!
//! Both loaders share the same rules:
//!
//! 1. Loaded → hand out the cached value, no I/O.
//! 2. Somebody else is loading → "unavailable" right now. No waiting, no second
//!    request. The next keystroke will find it loaded.
//! 3. Fetch or parse failed → log it, report "unavailable", leave the cell empty
//!    so the next call retries.

use crate::cache::{CacheCell, Claim};
use crate::error::{LoadError, Result};
use crate::fetch::Fetch;
use crate::types::{Corpus, DocId, DocumentRecord, InvertedIndex};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Fetch `path` and parse it as JSON.
///
/// This is the uncached path. `shiori inspect` uses it directly because it wants
/// the error, not a shrug.
pub async fn fetch_json<T, F>(fetcher: &F, path: &str) -> Result<T>
where
    T: DeserializeOwned,
    F: Fetch,
{
    let bytes = fetcher.fetch(path).await?;
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Malformed {
        path: path.to_string(),
        source,
    })
}

async fn load_cached<T, F>(fetcher: &F, cell: &CacheCell<T>, path: &str) -> Option<Arc<T>>
where
    T: DeserializeOwned + Send + Sync,
    F: Fetch,
{
    let ticket = match cell.claim() {
        Claim::Ready(value) => return Some(value),
        Claim::InFlight => {
            debug!(path, "artifact fetch already in flight");
            return None;
        }
        Claim::Fetch(ticket) => ticket,
    };

    let started = Instant::now();
    match fetch_json::<T, F>(fetcher, path).await {
        Ok(value) => {
            debug!(
                path,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "artifact loaded"
            );
            Some(ticket.fulfill(value))
        }
        Err(err) => {
            warn!(path, "search artifact unavailable: {}", err.report());
            None
        }
    }
}

/// Loads the inverted index on first use.
pub struct IndexLoader<'a, F> {
    fetcher: &'a F,
    cell: &'a CacheCell<InvertedIndex>,
    path: &'a str,
}

impl<'a, F: Fetch> IndexLoader<'a, F> {
    pub fn new(fetcher: &'a F, cell: &'a CacheCell<InvertedIndex>, path: &'a str) -> Self {
        Self {
            fetcher,
            cell,
            path,
        }
    }

    /// The index, or `None` while it's loading or after a failed attempt.
    pub async fn get(&self) -> Option<Arc<InvertedIndex>> {
        load_cached(self.fetcher, self.cell, self.path).await
    }
}

/// Loads the document corpus, but only when there's something to look up.
pub struct DocumentStore<'a, F> {
    fetcher: &'a F,
    cell: &'a CacheCell<Corpus>,
    path: &'a str,
}

impl<'a, F: Fetch> DocumentStore<'a, F> {
    pub fn new(fetcher: &'a F, cell: &'a CacheCell<Corpus>, path: &'a str) -> Self {
        Self {
            fetcher,
            cell,
            path,
        }
    }

    /// Records for `ids` in the given order. Unknown ids are skipped.
    ///
    /// An empty `ids` never touches the network. If the corpus can't be loaded the
    /// answer is empty, not partial.
    pub async fn get(&self, ids: &[DocId]) -> Vec<DocumentRecord> {
        if ids.is_empty() {
            return Vec::new();
        }
        match load_cached(self.fetcher, self.cell, self.path).await {
            Some(corpus) => corpus.lookup(ids),
            None => Vec::new(),
        }
    }
}
