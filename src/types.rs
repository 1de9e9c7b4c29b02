// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data that flows through a query.
//!
//! Two artifacts arrive over the wire: an inverted index (term → document ids) and
//! a document corpus. Everything else here is per-query and short-lived.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **DocId** is the only join key between postings and records. Nothing else
//!   (position in the corpus array, title, url) may be used to match them up.
//!
//! - **InvertedIndex** is read-only for the session. Posting lists may contain the
//!   same id twice; that inflates the score, it does not break anything.
//!
//! - **Corpus** may be out of sync with the index in either direction. Ids missing
//!   from the corpus are dropped at lookup time, never reported.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Document identifier shared by posting lists and corpus records.
///
/// Serialized as a bare integer, so it reads straight out of the JSON artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// CONTENT TAXONOMY
// =============================================================================

/// What kind of page a record came from.
///
/// The site has a fixed set of sections, but the artifact is produced by a
/// separate build step, so unknown values are kept as `Other` instead of failing
/// the whole corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Post,
    Moment,
    Bookmark,
    Project,
    About,
    Other(String),
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Post => "post",
            ContentType::Moment => "moment",
            ContentType::Bookmark => "bookmark",
            ContentType::Project => "project",
            ContentType::About => "about",
            ContentType::Other(s) => s,
        }
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "post" => ContentType::Post,
            "moment" => ContentType::Moment,
            "bookmark" => ContentType::Bookmark,
            "project" => ContentType::Project,
            "about" => ContentType::About,
            _ => ContentType::Other(value),
        }
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        ContentType::from(value.to_string())
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for ContentType {
    /// An empty "other" type. No scope matches it.
    fn default() -> Self {
        ContentType::Other(String::new())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which content types a query is allowed to return.
///
/// Comes from the page the user is on, never from what they typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContentScope {
    /// No filter: search everything.
    #[default]
    All,
    /// Only records of this type.
    Only(ContentType),
}

impl ContentScope {
    /// Whether a record of type `kind` passes this scope.
    pub fn admits(&self, kind: &ContentType) -> bool {
        match self {
            ContentScope::All => true,
            ContentScope::Only(wanted) => wanted == kind,
        }
    }
}

impl fmt::Display for ContentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentScope::All => f.write_str("all"),
            ContentScope::Only(kind) => write!(f, "{}", kind),
        }
    }
}

// =============================================================================
// ARTIFACTS
// =============================================================================

/// One searchable unit, exactly as it appears in the document artifact.
///
/// Only `id` is required. The other fields fall back to empty so a single sloppy
/// record does not take the whole corpus down with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocId,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: ContentType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: String,
}

/// Missing and `null` both mean "empty".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Term → posting list, loaded from the index artifact.
///
/// Postings that aren't a `u32` (negative, too large, not a number) are skipped
/// on load. They could never match a record, and one bad entry shouldn't cost the
/// whole index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    pub terms: HashMap<String, Vec<DocId>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPosting {
    Id(u32),
    Invalid(IgnoredAny),
}

impl<'de> Deserialize<'de> for InvertedIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Vec<RawPosting>>::deserialize(deserializer)?;
        let mut skipped = 0usize;
        let terms: HashMap<String, Vec<DocId>> = raw
            .into_iter()
            .map(|(term, postings)| {
                let ids: Vec<DocId> = postings
                    .into_iter()
                    .filter_map(|posting| match posting {
                        RawPosting::Id(id) => Some(DocId(id)),
                        RawPosting::Invalid(_) => {
                            skipped += 1;
                            None
                        }
                    })
                    .collect();
                (term, ids)
            })
            .collect();
        if skipped > 0 {
            debug!(skipped, "index postings with invalid ids dropped");
        }
        Ok(InvertedIndex { terms })
    }
}

impl InvertedIndex {
    /// Posting list for `term`, or `None` if the term was never indexed.
    pub fn postings(&self, term: &str) -> Option<&[DocId]> {
        self.terms.get(term).map(Vec::as_slice)
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Total number of postings across all terms, duplicates included.
    pub fn posting_count(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<DocId>)> for InvertedIndex {
    fn from_iter<I: IntoIterator<Item = (String, Vec<DocId>)>>(iter: I) -> Self {
        InvertedIndex {
            terms: iter.into_iter().collect(),
        }
    }
}

/// The document artifact plus an id lookup table built once at load time.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<DocumentRecord>,
    by_id: HashMap<DocId, usize>,
}

impl Corpus {
    /// Build the lookup table. When an id repeats, the first record wins.
    pub fn new(records: Vec<DocumentRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            by_id.entry(record.id).or_insert(pos);
        }
        Corpus { records, by_id }
    }

    pub fn get(&self, id: DocId) -> Option<&DocumentRecord> {
        self.by_id.get(&id).map(|&pos| &self.records[pos])
    }

    /// Records for `ids`, in the same order, skipping ids the corpus doesn't have.
    pub fn lookup(&self, ids: &[DocId]) -> Vec<DocumentRecord> {
        ids.iter().filter_map(|&id| self.get(id)).cloned().collect()
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'de> Deserialize<'de> for Corpus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<DocumentRecord>::deserialize(deserializer).map(Corpus::new)
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// A record and the number of query-term postings that pointed at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub document: DocumentRecord,
    pub score: u32,
}
