//! Searching a site output directory on disk.

use crate::common::*;
use shiori::{fetch_json, ContentScope, Corpus, InvertedIndex, LoadError, SearchEngine, SiteFetcher};
use std::time::Duration;
use tempfile::TempDir;

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());
    dir
}

fn open(dir: &TempDir) -> SiteFetcher {
    SiteFetcher::from_location(dir.path().to_str().unwrap(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn directory_site_end_to_end() {
    let dir = site();
    let engine = SearchEngine::new(open(&dir));

    let results = engine.search("rust go", &ContentScope::All).await;
    assert_eq!(ids(&results), vec![6, 1, 2, 4, 5, 7]);
    assert_eq!(ids(&engine.search_at("周末读书", "/moments/").await), vec![3]);
}

#[tokio::test]
async fn directory_without_artifacts_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let engine = SearchEngine::new(open(&dir));
    assert!(engine.search("rust", &ContentScope::All).await.is_empty());
}

#[tokio::test]
async fn artifacts_parse_directly() {
    let dir = site();
    let fetcher = open(&dir);
    let index: InvertedIndex = fetch_json(&fetcher, INDEX).await.unwrap();
    let corpus: Corpus = fetch_json(&fetcher, DOCS).await.unwrap();
    assert_eq!(corpus.len(), blog_records().len());
    assert!(index.postings("rust").is_some());
}

#[tokio::test]
async fn missing_artifact_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = fetch_json::<InvertedIndex, _>(&open(&dir), INDEX)
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "{:?}", err);
    assert_eq!(err.path(), Some(INDEX));
}
