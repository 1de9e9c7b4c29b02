// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use shiori::{
    fetch_json, resolve_scope, tokenize, ArtifactReport, ContentScope, Corpus, InvertedIndex,
    SearchConfig, SearchEngine, SiteFetcher,
};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{display, parse_scope, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for results and `--json`.
fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_env("SHIORI_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Tokenize { text } => {
            display::print_terms(&text, &tokenize(&text));
            Ok(())
        }
        Commands::Scope { path } => {
            println!("{}", resolve_scope(&path));
            Ok(())
        }
        Commands::Search {
            query,
            site,
            page,
            scope,
            limit,
            first,
            tie_break,
            config,
            json,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(limit) = limit {
                config.max_results = limit;
            }
            if let Some(tie_break) = tie_break {
                config.tie_break = tie_break.into();
            }
            let scope = match (scope, page) {
                (Some(scope), _) => parse_scope(&scope),
                (None, Some(page)) => resolve_scope(&page),
                (None, None) => ContentScope::All,
            };
            block_on(run_search(SearchArgs {
                query,
                site,
                scope,
                config,
                first,
                json,
            }))
        }
        Commands::Inspect { site, config, json } => {
            let config = load_config(config.as_deref())?;
            block_on(run_inspect(&site, config, json))
        }
    }
}

fn block_on<T>(future: impl std::future::Future<Output = Result<T>>) -> Result<T> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?
        .block_on(future)
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    match path {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display())),
        None => Ok(SearchConfig::default()),
    }
}

fn open_site(site: &str, config: &SearchConfig) -> Result<SiteFetcher> {
    SiteFetcher::from_location(site, Duration::from_millis(config.timeout_ms))
        .with_context(|| format!("cannot use {} as a site", site))
}

struct SearchArgs {
    query: String,
    site: String,
    scope: ContentScope,
    config: SearchConfig,
    first: bool,
    json: bool,
}

/// An unreachable site is not an error here: the engine degrades to no results
/// and the load failure shows up as a warning on stderr.
async fn run_search(args: SearchArgs) -> Result<()> {
    let fetcher = open_site(&args.site, &args.config)?;
    let engine = SearchEngine::with_config(fetcher, args.config);

    let started = Instant::now();
    let results = engine.search(&args.query, &args.scope).await;
    let took = started.elapsed();

    if args.first {
        if let Some(hit) = results.first() {
            println!("{}", hit.document.url);
        }
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        display::print_results(&args.query, &args.scope, &results, took);
    }
    Ok(())
}

async fn run_inspect(site: &str, config: SearchConfig, json: bool) -> Result<()> {
    let fetcher = open_site(site, &config)?;

    let index: InvertedIndex = fetch_json(&fetcher, &config.index_path)
        .await
        .context("failed to load search index")?;
    let corpus: Corpus = fetch_json(&fetcher, &config.docs_path)
        .await
        .context("failed to load document corpus")?;

    let report = ArtifactReport::build(&index, &corpus);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display::print_report(site, &report);
    }
    Ok(())
}
