//! The page a search is made from decides what it may return.

use crate::common::*;
use shiori::{resolve_scope, ContentScope, ContentType};

#[tokio::test]
async fn section_pages_filter_by_type() {
    let engine = blog_engine();
    let cases: &[(&str, &[u32])] = &[
        ("/", &[6, 1, 2, 4, 5, 7]),
        ("/index.html", &[6, 1, 2, 4, 5, 7]),
        ("/posts/", &[1, 2]),
        ("/posts/rust-async/", &[1, 2]),
        ("/tags/rust.html", &[1, 2]),
        ("/bookmarks/", &[4, 7]),
        ("/projects/shiori.html", &[5]),
        ("/about/", &[6, 1, 2, 4, 5, 7]),
        ("/about.html", &[6, 1, 2, 4, 5, 7]),
        ("/moments/", &[]),
    ];
    for (page, expected) in cases {
        let results = engine.search_at("rust go", page).await;
        assert_eq!(&ids(&results), expected, "page {}", page);
        assert_well_formed(&results, &resolve_scope(page));
    }
}

#[tokio::test]
async fn unknown_pages_search_everything() {
    let engine = blog_engine();
    let everything = engine.search("rust", &ContentScope::All).await;
    assert_eq!(engine.search_at("rust", "/archive/2024/").await, everything);
    assert_eq!(engine.search_at("rust", "").await, everything);
}

#[tokio::test]
async fn empty_section_is_empty_not_unscoped() {
    let engine = blog_engine();
    let only_projects = ContentScope::Only(ContentType::Project);
    assert!(engine.search("go", &only_projects).await.is_empty());
}

#[tokio::test]
async fn filter_applies_before_truncation() {
    use shiori::testing::{corpus_json, index_json, MemoryFetcher};
    use shiori::SearchEngine;

    // ten posts outrank the lone bookmark, which must still be found from /bookmarks/
    let mut records: Vec<_> = (1..=10).map(|i| make_record(i, "post", "Post")).collect();
    records.push(make_record(11, "bookmark", "Mark"));
    let mut ab: Vec<u32> = (1..=10).collect();
    ab.push(11);
    let cd: Vec<u32> = (1..=10).collect();
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, index_json(&[("ab", &ab), ("cd", &cd)]))
            .with_file(DOCS, corpus_json(&records)),
    );

    assert_eq!(ids(&engine.search_at("ab cd", "/bookmarks/").await), vec![11]);
    assert!(!contains_id(&engine.search_at("ab cd", "/").await, 11));
}
