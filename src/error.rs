// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Why an artifact could not be loaded.
//!
//! None of these ever reach a `search` caller. The loaders log them and report
//! "unavailable", which the engine turns into an empty result. They exist as
//! values so the fetch layer can use `?` and so `shiori inspect` can tell the user
//! what actually went wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request for {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {path}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid site location: {0}")]
    InvalidSite(String),
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;

impl LoadError {
    /// The artifact path the error is about, if there is one.
    pub fn path(&self) -> Option<&str> {
        match self {
            LoadError::Transport { path, .. }
            | LoadError::Status { path, .. }
            | LoadError::Io { path, .. }
            | LoadError::Malformed { path, .. } => Some(path),
            LoadError::InvalidSite(_) => None,
        }
    }

    /// The message with every underlying cause appended, `a: b: c` style.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}
