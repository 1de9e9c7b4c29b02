//! Ranking and result shape.

use crate::common::*;
use shiori::testing::{corpus_json, index_json, MemoryFetcher};
use shiori::{ContentScope, SearchConfig, SearchEngine, TieBreak};

#[tokio::test]
async fn more_matched_terms_rank_first() {
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, index_json(&[("ab", &[1, 2]), ("cd", &[2])]))
            .with_file(
                DOCS,
                corpus_json(&[make_record(1, "post", "One"), make_record(2, "post", "Two")]),
            ),
    );
    let results = engine.search("ab cd", &ContentScope::All).await;
    assert_eq!(ids(&results), vec![2, 1]);
    assert_eq!(results[0].score, 2);
    assert_eq!(results[1].score, 1);
}

#[tokio::test]
async fn blog_query_across_sections() {
    let engine = blog_engine();
    let results = engine.search("rust go", &ContentScope::All).await;
    // 6 mentions both; the rest keep the order they were first hit in
    assert_eq!(ids(&results), vec![6, 1, 2, 4, 5, 7]);
    assert_eq!(results[0].score, 2);
    assert_well_formed(&results, &ContentScope::All);
}

#[tokio::test]
async fn query_is_case_insensitive() {
    let engine = blog_engine();
    let lower = engine.search("rust", &ContentScope::All).await;
    let upper = engine.search("RUST", &ContentScope::All).await;
    assert_eq!(ids(&lower), ids(&upper));
    assert_eq!(ids(&lower), vec![1, 2, 4, 5, 6]);
}

#[tokio::test]
async fn repeated_words_in_query_count_once() {
    let engine = blog_engine();
    let results = engine.search("rust rust Rust", &ContentScope::All).await;
    assert!(results.iter().all(|r| r.score == 1));
}

#[tokio::test]
async fn same_query_same_answer() {
    let engine = blog_engine();
    let first = engine.search("rust search go", &ContentScope::All).await;
    let second = engine.search("rust search go", &ContentScope::All).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn nothing_matches() {
    let engine = blog_engine();
    assert!(engine.search("haskell", &ContentScope::All).await.is_empty());
    assert_eq!(engine.fetcher().calls(DOCS), 0);
}

#[tokio::test]
async fn short_and_symbol_queries_are_empty() {
    let engine = blog_engine();
    for text in ["", "r", " ", "#", "a b c", "!!", "。。"] {
        assert!(
            engine.search(text, &ContentScope::All).await.is_empty(),
            "{:?} should find nothing",
            text
        );
    }
    assert_eq!(engine.fetcher().total_calls(), 0);
}

#[tokio::test]
async fn at_most_ten_results() {
    let records: Vec<_> = (1..=30)
        .map(|i| make_record(i, "post", &format!("Doc {}", i)))
        .collect();
    let postings: Vec<u32> = (1..=30).collect();
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, index_json(&[("doc", &postings)]))
            .with_file(DOCS, corpus_json(&records)),
    );
    let results = engine.search("doc", &ContentScope::All).await;
    assert_eq!(ids(&results), (1..=10).collect::<Vec<u32>>());
}

#[tokio::test]
async fn stale_ids_are_dropped() {
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, index_json(&[("ab", &[99, 1, 42])]))
            .with_file(DOCS, corpus_json(&[make_record(1, "post", "Only")])),
    );
    let results = engine.search("ab", &ContentScope::All).await;
    assert_eq!(ids(&results), vec![1]);
}

#[tokio::test]
async fn stale_ids_do_not_take_result_slots() {
    // 12 candidates, two of them stale: all ten real ones still come back
    let mut postings: Vec<u32> = vec![100, 101];
    postings.extend(1..=10);
    let records: Vec<_> = (1..=10).map(|i| make_record(i, "post", "Doc")).collect();
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, index_json(&[("ab", &postings)]))
            .with_file(DOCS, corpus_json(&records)),
    );
    assert_eq!(engine.search("ab", &ContentScope::All).await.len(), 10);
}

#[tokio::test]
async fn duplicate_postings_add_weight() {
    let engine = SearchEngine::new(
        MemoryFetcher::new()
            .with_file(INDEX, index_json(&[("ab", &[1, 2, 2])]))
            .with_file(
                DOCS,
                corpus_json(&[make_record(1, "post", "One"), make_record(2, "post", "Two")]),
            ),
    );
    let results = engine.search("ab", &ContentScope::All).await;
    assert_eq!(ids(&results), vec![2, 1]);
    assert_eq!(results[0].score, 2);
}

#[tokio::test]
async fn doc_id_tie_break_from_config() {
    let fetcher = MemoryFetcher::new()
        .with_file(INDEX, index_json(&[("ab", &[5, 3]), ("cd", &[4])]))
        .with_file(
            DOCS,
            corpus_json(&[
                make_record(3, "post", "c"),
                make_record(4, "post", "d"),
                make_record(5, "post", "e"),
            ]),
        );

    let config: SearchConfig = serde_json::from_str(r#"{"tie_break": "doc-id"}"#).unwrap();
    assert_eq!(config.tie_break, TieBreak::DocId);

    let engine = SearchEngine::with_config(fetcher, config);
    assert_eq!(ids(&engine.search("ab cd", &ContentScope::All).await), vec![3, 4, 5]);
}

#[tokio::test]
async fn results_carry_display_data() {
    let engine = blog_engine();
    let results = engine.search("book", &ContentScope::All).await;
    assert_eq!(ids(&results), vec![4]);

    let book = &results[0].document;
    assert!(book.is_external());
    assert_eq!(book.excerpt().as_deref(), Some("The Rust programming language book"));
    assert_eq!(shiori::highlight_spans(&book.title, "book"), vec![9..13]);
}

#[tokio::test]
async fn first_hit_follows_page_scope() {
    let engine = blog_engine();
    let hit = engine.first_hit("rust go", "/bookmarks/").await.unwrap();
    assert_eq!(hit.url, "https://doc.rust-lang.org/book/");
    assert!(engine.first_hit("rust", "/moments/").await.is_none());
}
