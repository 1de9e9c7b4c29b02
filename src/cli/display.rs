// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the shiori CLI.
//!
//! Pretty terminal output that respects your color scheme. OneDark for dark
//! terminals, One Light for light ones. Respects `NO_COLOR` and turns color off
//! when stdout isn't a terminal.
//!
//! # Theme detection order
//!
//! 1. `SHIORI_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. macOS appearance (via defaults read)
//! 4. Default to dark theme

use shiori::{highlight_spans, ArtifactReport, ContentScope, ContentType, RankedResult, TermSet};
use std::sync::OnceLock;
use std::time::Duration;

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SHIORI_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; 7 and up (except 8) are light backgrounds
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.contains("Dark") && output.status.success() {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const UNDERLINE: &str = "\x1b[4m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);     // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);   // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);  // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);     // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);     // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);      // #5c6370
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (255, 215, 0);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);      // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);    // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);   // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);    // #4078f2
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);     // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);   // #a0a1a7
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
    pub const BRIGHT_YELLOW: (u8, u8, u8) = (152, 104, 1);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

// ═══════════════════════════════════════════════════════════════════════════
// THEME-AWARE COLOR ACCESSORS
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);
theme_color!(BRIGHT_YELLOW);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut plain text to `max` chars, marking the cut with `…`.
pub fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let len = visible_len(content);
    let pad = BOX_WIDTH.saturating_sub(len);
    println!(
        "{}│{}{}{}{}│{}",
        border,
        RESET,
        content,
        " ".repeat(pad),
        border,
        RESET
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let border = GRAY();
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    let border = GRAY();
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), RESET);
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded content type badge
pub fn type_badge(kind: &ContentType) -> String {
    let label = format!("[{}]", kind);
    if !use_colors() {
        return label;
    }
    let color = match kind {
        ContentType::Post => BLUE(),
        ContentType::Moment => MAGENTA(),
        ContentType::Bookmark => GREEN(),
        ContentType::Project => YELLOW(),
        ContentType::About => RED(),
        ContentType::Other(_) => GRAY(),
    };
    format!("{}{}{}", color, label, RESET)
}

/// Title with every occurrence of the query underlined
pub fn highlighted(title: &str, query: &str) -> String {
    if !use_colors() {
        return title.to_string();
    }
    let mut out = String::with_capacity(title.len());
    let mut last = 0;
    for span in highlight_spans(title, query) {
        out.push_str(&title[last..span.start]);
        out.push_str(&format!(
            "{}{}{}{}",
            UNDERLINE,
            BRIGHT_YELLOW(),
            &title[span.clone()],
            RESET
        ));
        last = span.end;
    }
    out.push_str(&title[last..]);
    out
}

/// Color-coded score value
pub fn score_value(score: u32) -> String {
    if !use_colors() {
        return format!("{:>4}", score);
    }
    let color = if score >= 5 {
        BRIGHT_GREEN()
    } else if score >= 3 {
        GREEN()
    } else if score >= 2 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{:>4}{}", color, score, RESET)
}

/// Green when zero, red otherwise
pub fn issue_count(count: usize) -> String {
    if count == 0 {
        themed(GREEN, &[], &count.to_string())
    } else {
        themed(RED, &[BOLD], &count.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COMMAND OUTPUT
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_results(query: &str, scope: &ContentScope, results: &[RankedResult], took: Duration) {
    section_top(&format!("SEARCH \"{}\"", clip(query, 40)));
    row(&format!(
        " scope {}   {} result{}   {:.2} ms",
        themed(CYAN, &[], &scope.to_string()),
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        took.as_secs_f64() * 1000.0
    ));

    if results.is_empty() {
        section_mid("RESULTS");
        row(&themed(GRAY, &[DIM], " no results"));
        section_bot();
        return;
    }

    for (rank, result) in results.iter().enumerate() {
        let doc = &result.document;
        section_mid(&format!("#{}", rank + 1));

        let badge = type_badge(&doc.kind);
        let budget = BOX_WIDTH.saturating_sub(visible_len(&badge) + 12);
        let title = highlighted(&clip(&doc.title, budget), query);
        row(&format!(" {} {}  {}", score_value(result.score), badge, title));

        let marker = if doc.is_external() { " ↗" } else { "" };
        let url = format!("{}{}", clip(&doc.url, BOX_WIDTH - 10), marker);
        row(&format!("      {}", themed(BLUE, &[], &url)));

        if let Some(excerpt) = doc.excerpt() {
            let flat = excerpt.replace(['\n', '\r', '\t'], " ");
            row(&format!("      {}", themed(GRAY, &[], &clip(&flat, BOX_WIDTH - 8))));
        }
    }
    section_bot();
}

pub fn print_terms(text: &str, terms: &TermSet) {
    section_top("TOKENIZE");
    row(&format!(" input  {}", clip(text, BOX_WIDTH - 9)));
    row(&format!(" terms  {}", terms.len()));
    if !terms.is_empty() {
        section_mid("TERMS");
        let mut line = String::from(" ");
        for term in terms.iter() {
            let piece = format!("{} ", themed(CYAN, &[], term));
            if visible_len(&line) + visible_len(&piece) > BOX_WIDTH {
                row(&line);
                line = String::from(" ");
            }
            line.push_str(&piece);
        }
        if visible_len(&line) > 1 {
            row(&line);
        }
    }
    section_bot();
}

pub fn print_report(site: &str, report: &ArtifactReport) {
    section_top("INSPECT");
    row(&format!(" site   {}", clip(site, BOX_WIDTH - 9)));

    section_mid("INDEX");
    row(&format!(
        " {} {}",
        pad_right("terms", 22),
        themed(BRIGHT_CYAN, &[BOLD], &report.terms.to_string())
    ));
    row(&format!(" {} {}", pad_right("  cjk pairs", 22), report.cjk_terms));
    row(&format!(
        " {} {}",
        pad_right("  latin/digit runs", 22),
        report.terms - report.cjk_terms
    ));
    row(&format!(" {} {}", pad_right("postings", 22), report.postings));

    section_mid("CORPUS");
    row(&format!(
        " {} {}",
        pad_right("documents", 22),
        themed(BRIGHT_CYAN, &[BOLD], &report.documents.to_string())
    ));
    for (kind, count) in &report.by_type {
        let badge = type_badge(&ContentType::from(kind.as_str()));
        row(&format!(" {} {}", pad_right(&format!("  {}", badge), 22), count));
    }

    section_mid("CONSISTENCY");
    row(&format!(
        " {} {}",
        pad_right("stale ids", 22),
        issue_count(report.stale_ids.len())
    ));
    if !report.stale_ids.is_empty() {
        let listed: Vec<String> = report
            .stale_ids
            .iter()
            .take(12)
            .map(|id| id.to_string())
            .collect();
        let more = report.stale_ids.len().saturating_sub(listed.len());
        let suffix = if more > 0 {
            format!(" (+{} more)", more)
        } else {
            String::new()
        };
        row(&themed(GRAY, &[], &format!("   {}{}", listed.join(", "), suffix)));
    }
    row(&format!(
        " {} {}",
        pad_right("duplicate postings", 22),
        issue_count(report.duplicate_postings)
    ));
    row(&format!(
        " {} {}",
        pad_right("duplicate record ids", 22),
        issue_count(report.duplicate_record_ids.len())
    ));
    row(&format!(
        " {} {}",
        pad_right("unreachable records", 22),
        issue_count(report.unreachable_documents)
    ));
    section_bot();

    if report.is_consistent() {
        println!("{}", themed(GREEN, &[BOLD], "✓ index and corpus agree"));
    } else {
        println!("{}", themed(YELLOW, &[BOLD], "⚠ index and corpus have drifted"));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
