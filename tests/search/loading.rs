//! When the artifacts get fetched, and what happens when they can't be.

use crate::common::*;
use shiori::testing::{corpus_json, index_json, MemoryFetcher};
use shiori::{CacheState, ContentScope, SearchEngine};
use std::time::Duration;

fn two_posts() -> Vec<u8> {
    corpus_json(&[make_record(1, "post", "One"), make_record(2, "post", "Two")])
}

#[tokio::test]
async fn artifacts_are_fetched_once_per_session() {
    let engine = blog_engine();
    for query in ["rust", "go", "search", "周末", "rust go"] {
        engine.search(query, &ContentScope::All).await;
    }
    assert_eq!(engine.fetcher().calls(INDEX), 1);
    assert_eq!(engine.fetcher().calls(DOCS), 1);
}

#[tokio::test]
async fn corpus_waits_for_first_hit() {
    let engine = blog_engine();
    engine.search("nothing", &ContentScope::All).await;
    engine.search("here", &ContentScope::All).await;
    assert_eq!(engine.index_state(), CacheState::Loaded);
    assert_eq!(engine.corpus_state(), CacheState::Empty);

    engine.search("rust", &ContentScope::All).await;
    assert_eq!(engine.corpus_state(), CacheState::Loaded);
}

#[tokio::test]
async fn unreachable_index_is_empty_and_retried() {
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_status(INDEX, 503)
            .with_file(DOCS, two_posts()),
    );
    assert!(engine.search("anything", &ContentScope::All).await.is_empty());
    assert_eq!(engine.index_state(), CacheState::Empty);

    engine
        .fetcher()
        .set_file(INDEX, index_json(&[("ab", &[1, 2]), ("cd", &[2])]));
    let results = engine.search("ab cd", &ContentScope::All).await;
    assert_eq!(ids(&results), vec![2, 1]);
    assert_eq!(engine.fetcher().calls(INDEX), 2);
}

#[tokio::test]
async fn missing_index_is_empty() {
    let engine = SearchEngine::new(MemoryFetcher::new());
    assert!(engine.search("anything", &ContentScope::All).await.is_empty());
    assert_eq!(engine.fetcher().calls(DOCS), 0);
}

#[tokio::test]
async fn malformed_index_is_not_cached() {
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, &b"{\"ab\": [1,"[..])
            .with_file(DOCS, two_posts()),
    );
    assert!(engine.search("ab", &ContentScope::All).await.is_empty());
    assert!(engine.search("ab", &ContentScope::All).await.is_empty());
    assert_eq!(engine.fetcher().calls(INDEX), 2);
    assert_eq!(engine.index_state(), CacheState::Empty);
}

#[tokio::test]
async fn unreachable_corpus_is_empty_and_retried() {
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, index_json(&[("ab", &[1])]))
            .with_status(DOCS, 500),
    );
    assert!(engine.search("ab", &ContentScope::All).await.is_empty());
    assert_eq!(engine.index_state(), CacheState::Loaded);
    assert_eq!(engine.corpus_state(), CacheState::Empty);

    engine.fetcher().set_file(DOCS, two_posts());
    assert_eq!(ids(&engine.search("ab", &ContentScope::All).await), vec![1]);
    assert_eq!(engine.fetcher().calls(INDEX), 1);
    assert_eq!(engine.fetcher().calls(DOCS), 2);
}

#[tokio::test]
async fn overlapping_searches_share_one_index_fetch() {
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, index_json(&[("ab", &[1])]))
            .with_file(DOCS, two_posts())
            .with_gate(INDEX),
    );

    let (first, second) = tokio::join!(engine.search("ab", &ContentScope::All), async {
        tokio::task::yield_now().await;
        // the first search is parked on the index fetch by now
        let overlapping = engine.search("ab", &ContentScope::All).await;
        engine.fetcher().release(INDEX);
        overlapping
    });

    assert_eq!(ids(&first), vec![1]);
    assert!(second.is_empty());
    assert_eq!(engine.fetcher().calls(INDEX), 1);
}

#[tokio::test]
async fn abandoned_search_frees_the_index_cell() {
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, index_json(&[("ab", &[1])]))
            .with_file(DOCS, two_posts())
            .with_gate(INDEX),
    );

    {
        let search = engine.search("ab", &ContentScope::All);
        tokio::pin!(search);
        let outcome = tokio::time::timeout(Duration::from_millis(20), &mut search).await;
        assert!(outcome.is_err(), "gated search should still be pending");
        assert_eq!(engine.index_state(), CacheState::Loading);
    }
    assert_eq!(engine.index_state(), CacheState::Empty);

    // the next search claims the cell again and goes through
    engine.fetcher().release(INDEX);
    assert_eq!(ids(&engine.search("ab", &ContentScope::All).await), vec![1]);
    assert_eq!(engine.fetcher().calls(INDEX), 2);
}

#[tokio::test]
async fn preload_warms_only_the_index() {
    let engine = blog_engine();
    assert!(engine.preload().await);
    assert!(engine.preload().await);
    assert_eq!(engine.fetcher().calls(INDEX), 1);
    assert_eq!(engine.corpus_state(), CacheState::Empty);
}

#[tokio::test]
async fn preload_reports_failure() {
    let engine = SearchEngine::new(MemoryFetcher::new().with_status(INDEX, 404));
    assert!(!engine.preload().await);
    assert_eq!(engine.index_state(), CacheState::Empty);
}
