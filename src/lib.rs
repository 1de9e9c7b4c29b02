// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted-index search for a static site, loaded lazily.
//!
//! The site build emits two JSON artifacts: a small inverted index (term → document
//! ids) and a larger document corpus. This crate answers queries against them and
//! fetches each one only when it's actually needed: the index on the first real
//! query, the corpus on the first query that matches something.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────────┐   ┌─────────────┐
//! │ tokenize.rs │──▶│  ranking.rs │──▶│  engine.rs   │◀──│  scope.rs   │
//! │ (CJK pairs, │   │ (accumulate,│   │ (search,     │   │ (page path →│
//! │  a-z0-9)    │   │  rank)      │   │  search_at)  │   │  filter)    │
//! └─────────────┘   └─────────────┘   └──────┬───────┘   └─────────────┘
//!                                            │
//!                          ┌─────────────────┴─────────────────┐
//!                          ▼                                   ▼
//!                  ┌───────────────┐                  ┌────────────────┐
//!                  │   loader.rs   │─────────────────▶│   fetch.rs     │
//!                  │ (IndexLoader, │                  │ (HTTP, site    │
//!                  │ DocumentStore)│                  │  directory)    │
//!                  └───────┬───────┘                  └────────────────┘
//!                          ▼
//!                  ┌───────────────┐
//!                  │   cache.rs    │
//!                  │ (Empty /      │
//!                  │ Loading /     │
//!                  │ Loaded)       │
//!                  └───────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use shiori::{DirFetcher, SearchEngine};
//!
//! # async fn run() {
//! let engine = SearchEngine::new(DirFetcher::new("public"));
//! for hit in engine.search_at("rust 异步", "/posts/").await {
//!     println!("{} {}", hit.score, hit.document.title);
//! }
//! # }
//! ```

mod cache;
mod config;
mod engine;
mod error;
mod fetch;
mod loader;
mod present;
mod ranking;
mod report;
mod scope;
mod tokenize;
mod types;

pub mod testing;

// Re-exports for public API
pub use cache::{CacheCell, CacheState, Claim, LoadTicket, SessionCache};
pub use config::{
    SearchConfig, TieBreak, DEFAULT_DOCS_PATH, DEFAULT_INDEX_PATH, DEFAULT_MAX_RESULTS,
    DEFAULT_MIN_QUERY_CHARS, DEFAULT_TIMEOUT_MS,
};
pub use engine::SearchEngine;
pub use error::{LoadError, Result};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{DirFetcher, Fetch, SiteFetcher};
pub use loader::{fetch_json, DocumentStore, IndexLoader};
pub use present::{excerpt, highlight_spans, LinkTarget, EXCERPT_CHARS};
pub use ranking::{accumulate, rank, Scored};
pub use report::ArtifactReport;
pub use scope::{normalize_path, resolve_scope};
pub use tokenize::{is_cjk, tokenize, TermSet, CJK_END, CJK_START};
pub use types::{
    ContentScope, ContentType, Corpus, DocId, DocumentRecord, InvertedIndex, RankedResult,
};
