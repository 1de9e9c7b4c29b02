// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine options.
//!
//! Every field has a default that matches what the site's build step produces, so
//! an empty JSON object (or no config at all) is a working configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the inverted index lives, relative to the site root.
pub const DEFAULT_INDEX_PATH: &str = "/search-index.json";
/// Where the document corpus lives, relative to the site root.
pub const DEFAULT_DOCS_PATH: &str = "/search-docs.json";
/// Maximum results returned per query.
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Queries shorter than this (in characters) are "no query yet".
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;
/// Per-request timeout for HTTP fetches.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// How documents with equal scores are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep the order in which documents were first hit while scanning posting
    /// lists. Depends on term order and posting order, nothing else.
    #[default]
    FirstSeen,
    /// Lower document id first.
    DocId,
}

/// Search options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub index_path: String,
    pub docs_path: String,
    pub max_results: usize,
    pub min_query_chars: usize,
    pub tie_break: TieBreak,
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: DEFAULT_INDEX_PATH.to_string(),
            docs_path: DEFAULT_DOCS_PATH.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            tie_break: TieBreak::FirstSeen,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl SearchConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
