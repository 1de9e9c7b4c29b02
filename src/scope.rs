// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Which section of the site a search should stay inside.
//!
//! Someone searching from the bookmarks page wants bookmarks. Someone on a post,
//! a category listing or a tag listing wants posts. The home page and the about
//! page search everything. The scope depends only on where the user is standing,
//! never on what they typed.

use crate::types::{ContentScope, ContentType};

/// Strip `.html` and a trailing slash so `/posts/`, `/posts` and `/posts.html`
/// all look the same. An empty result means the site root.
pub fn normalize_path(path: &str) -> &str {
    let path = path.strip_suffix(".html").unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// Content scope for a page path.
///
/// ```
/// use shiori::{resolve_scope, ContentScope, ContentType};
///
/// assert_eq!(resolve_scope("/"), ContentScope::All);
/// assert_eq!(resolve_scope("/bookmarks/"), ContentScope::Only(ContentType::Bookmark));
/// assert_eq!(resolve_scope("/tags/rust.html"), ContentScope::Only(ContentType::Post));
/// ```
pub fn resolve_scope(current_path: &str) -> ContentScope {
    let path = normalize_path(current_path);
    if path == "/" || path == "/index" {
        return ContentScope::All;
    }

    if path.contains("/about") {
        ContentScope::All
    } else if path.contains("/bookmarks") {
        ContentScope::Only(ContentType::Bookmark)
    } else if path.contains("/projects") {
        ContentScope::Only(ContentType::Project)
    } else if path.contains("/moments") {
        ContentScope::Only(ContentType::Moment)
    } else if ["/posts", "/categories", "/tags"]
        .iter()
        .any(|section| path.contains(*section))
    {
        ContentScope::Only(ContentType::Post)
    } else {
        ContentScope::All
    }
}
