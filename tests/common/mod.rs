//! Shared test utilities and fixtures.

#![allow(dead_code)]

use shiori::testing::{corpus_json, index_json, MemoryFetcher};
use shiori::{tokenize, ContentScope, DocId, DocumentRecord, RankedResult, SearchEngine};
use std::collections::BTreeMap;
use std::path::Path;

// Re-export canonical test utilities from shiori::testing
pub use shiori::testing::make_record;

pub const INDEX: &str = "/search-index.json";
pub const DOCS: &str = "/search-docs.json";

// ============================================================================
// FIXTURE SITE
// ============================================================================

/// A small bilingual blog with one record of every section.
pub fn blog_records() -> Vec<DocumentRecord> {
    vec![
        record(1, "post", "Rust 异步编程入门", "从 tokio 开始学习 Rust 异步编程", "/posts/rust-async/"),
        record(
            2,
            "post",
            "Writing a search engine",
            "Inverted index, tokenizer and ranking in rust",
            "/posts/search/",
        ),
        record(3, "moment", "周末读书", "读完了一本关于搜索引擎的书", "/moments/3/"),
        record(
            4,
            "bookmark",
            "The Rust Book",
            "The Rust programming language book",
            "https://doc.rust-lang.org/book/",
        ),
        record(
            5,
            "project",
            "shiori",
            "Lazy search for static sites, written in rust",
            "/projects/shiori/",
        ),
        record(6, "about", "关于我", "写代码，也写博客。喜欢 rust 和 go", "/about/"),
        record(
            7,
            "bookmark",
            "Go by Example",
            "Hands-on introduction to go",
            "https://gobyexample.com/",
        ),
    ]
}

pub fn record(id: u32, kind: &str, title: &str, content: &str, url: &str) -> DocumentRecord {
    DocumentRecord {
        content: content.to_string(),
        url: url.to_string(),
        ..make_record(id, kind, title)
    }
}

/// Build an index the way the site generator does: every term of title and
/// content, one posting per document.
pub fn build_index(records: &[DocumentRecord]) -> BTreeMap<String, Vec<u32>> {
    let mut index: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for record in records {
        let text = format!("{} {}", record.title, record.content);
        for term in tokenize(&text).iter() {
            index.entry(term.to_string()).or_default().push(record.id.get());
        }
    }
    index
}

pub fn index_bytes(index: &BTreeMap<String, Vec<u32>>) -> Vec<u8> {
    let pairs: Vec<(&str, &[u32])> = index
        .iter()
        .map(|(term, ids)| (term.as_str(), ids.as_slice()))
        .collect();
    index_json(&pairs)
}

/// In-memory fetcher serving the blog fixture.
pub fn blog_fetcher() -> MemoryFetcher {
    let records = blog_records();
    MemoryFetcher::new()
        .with_file(INDEX, index_bytes(&build_index(&records)))
        .with_file(DOCS, corpus_json(&records))
}

pub fn blog_engine() -> SearchEngine<MemoryFetcher> {
    SearchEngine::new(blog_fetcher())
}

/// Write the blog fixture into a site output directory.
pub fn write_site(dir: &Path) {
    let records = blog_records();
    std::fs::write(dir.join("search-index.json"), index_bytes(&build_index(&records)))
        .expect("write index");
    std::fs::write(dir.join("search-docs.json"), corpus_json(&records)).expect("write docs");
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub fn ids(results: &[RankedResult]) -> Vec<u32> {
    results.iter().map(|r| r.document.id.get()).collect()
}

pub fn contains_id(results: &[RankedResult], id: u32) -> bool {
    results.iter().any(|r| r.document.id == DocId(id))
}

/// Results are sorted by non-increasing score and respect the scope.
pub fn assert_well_formed(results: &[RankedResult], scope: &ContentScope) {
    assert!(results.len() <= 10, "too many results: {}", results.len());
    for pair in results.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "scores out of order: {} then {}",
            pair[0].score,
            pair[1].score
        );
    }
    for result in results {
        assert!(
            scope.admits(&result.document.kind),
            "{} ({}) outside scope {}",
            result.document.id,
            result.document.kind,
            scope
        );
        assert!(result.score >= 1);
    }
}
