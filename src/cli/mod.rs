// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the shiori command-line interface.
//!
//! Four subcommands: `search` to query a built site, `inspect` to check that the
//! index and corpus agree, and `tokenize`/`scope` to see what the engine does
//! with a piece of text or a page path. A site is either a base URL or a local
//! output directory.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};
use shiori::{ContentScope, ContentType, TieBreak};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shiori",
    about = "Lazy-loading full-text search over a static site's index",
    version
)]
pub struct Cli {
    /// Log filter, e.g. "debug" or "shiori=trace" (overrides SHIORI_LOG)
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a site's index and print ranked results
    Search {
        /// Search query
        query: String,

        /// Site base URL (http/https) or local output directory
        #[arg(short, long)]
        site: String,

        /// Page the search is made from; its section picks the scope
        #[arg(long, conflicts_with = "scope")]
        page: Option<String>,

        /// Explicit scope: all, post, moment, bookmark, project, about
        #[arg(long)]
        scope: Option<String>,

        /// Maximum number of results to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print only the top result's URL
        #[arg(long)]
        first: bool,

        /// How equal scores are ordered
        #[arg(long, value_enum)]
        tie_break: Option<TieBreakArg>,

        /// JSON config file (flags override it)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the terms a piece of text tokenizes to
    Tokenize {
        /// Text to tokenize
        text: String,
    },

    /// Show the content scope a page path resolves to
    Scope {
        /// Page path, e.g. /bookmarks/ or /posts/hello.html
        path: String,
    },

    /// Report statistics and drift between a site's index and corpus
    Inspect {
        /// Site base URL (http/https) or local output directory
        #[arg(short, long)]
        site: String,

        /// JSON config file for artifact paths and timeout
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TieBreakArg {
    FirstSeen,
    DocId,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::FirstSeen => TieBreak::FirstSeen,
            TieBreakArg::DocId => TieBreak::DocId,
        }
    }
}

/// `--scope` value to a scope. Anything besides "all" names a content type.
pub fn parse_scope(value: &str) -> ContentScope {
    match value.trim().to_lowercase().as_str() {
        "" | "all" => ContentScope::All,
        kind => ContentScope::Only(ContentType::from(kind)),
    }
}
