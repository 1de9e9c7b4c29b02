// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Getting artifact bytes from wherever the site lives.
//!
//! The engine only ever asks for two site-relative paths. Where they come from is
//! this module's problem: a live site over HTTP, or a built site directory on disk
//! (handy for checking a build before deploying it).

use crate::error::{LoadError, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Fetch the raw bytes behind a site-relative path such as `/search-index.json`.
///
/// A timeout, a refused connection and a 404 are all just errors here. The
/// loaders decide what an error means.
pub trait Fetch: Send + Sync {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

impl<F: Fetch> Fetch for Arc<F> {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Vec<u8>>> + Send {
        (**self).fetch(path)
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Fetches artifacts from a live site.
///
/// Paths are joined onto the base URL the way a browser resolves an absolute
/// path: `/search-index.json` always lands at the site root, whatever path the
/// base URL has.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: reqwest::Url,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let base = reqwest::Url::parse(base)
            .map_err(|e| LoadError::InvalidSite(format!("{}: {}", base, e)))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::InvalidSite(e.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &reqwest::Url {
        &self.base
    }
}

#[cfg(feature = "http")]
impl Fetch for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = self
            .base
            .join(path)
            .map_err(|e| LoadError::InvalidSite(format!("{}: {}", path, e)))?;

        let transport = |e: reqwest::Error| LoadError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }
}

// =============================================================================
// SITE DIRECTORY
// =============================================================================

/// Fetches artifacts from a built site directory (the thing you'd deploy).
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Fetch for DirFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        tokio::fs::read(self.resolve(path))
            .await
            .map_err(|source| LoadError::Io {
                path: path.to_string(),
                source,
            })
    }
}

// =============================================================================
// EITHER
// =============================================================================

/// A site given as a string: `http(s)://...` or a directory path.
#[derive(Debug, Clone)]
pub enum SiteFetcher {
    #[cfg(feature = "http")]
    Http(HttpFetcher),
    Dir(DirFetcher),
}

impl SiteFetcher {
    pub fn from_location(location: &str, timeout: Duration) -> Result<Self> {
        if location.starts_with("http://") || location.starts_with("https://") {
            #[cfg(feature = "http")]
            {
                return HttpFetcher::new(location, timeout).map(SiteFetcher::Http);
            }

            #[cfg(not(feature = "http"))]
            {
                let _ = timeout;
                return Err(LoadError::InvalidSite(format!(
                    "{}: built without the `http` feature",
                    location
                )));
            }
        }

        let root = Path::new(location);
        if !root.is_dir() {
            return Err(LoadError::InvalidSite(format!(
                "{}: not a URL or a directory",
                location
            )));
        }
        Ok(SiteFetcher::Dir(DirFetcher::new(root)))
    }
}

impl Fetch for SiteFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        match self {
            #[cfg(feature = "http")]
            SiteFetcher::Http(http) => http.fetch(path).await,
            SiteFetcher::Dir(dir) => dir.fetch(path).await,
        }
    }
}
