// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::error::{LoadError, Result};
use crate::fetch::Fetch;
use crate::types::{ContentType, DocId, DocumentRecord};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;

/// Create a test record with a predictable url and content.
pub fn make_record(id: u32, kind: &str, title: &str) -> DocumentRecord {
    DocumentRecord {
        id: DocId(id),
        kind: ContentType::from(kind),
        title: title.to_string(),
        content: format!("Content for {}", title),
        url: format!("/{}s/{}", kind, id),
        tag: kind.to_string(),
    }
}

/// Serialize an index given as `(term, ids)` pairs.
pub fn index_json(terms: &[(&str, &[u32])]) -> Vec<u8> {
    let map: HashMap<&str, &[u32]> = terms.iter().copied().collect();
    serde_json::to_vec(&map).unwrap_or_default()
}

/// Serialize a corpus.
pub fn corpus_json(records: &[DocumentRecord]) -> Vec<u8> {
    serde_json::to_vec(records).unwrap_or_default()
}

#[derive(Clone)]
enum Response {
    Body(Vec<u8>),
    Status(u16),
}

/// In-memory site.
///
/// Unknown paths answer 404. Every call is counted per path, so tests can assert
/// exactly how many network round trips a search cost. A path can be gated: its
/// fetch then parks until [`MemoryFetcher::release`] is called, which is how the
/// tests hold a load "in flight".
#[derive(Default)]
pub struct MemoryFetcher {
    files: Mutex<HashMap<String, Response>>,
    calls: Mutex<HashMap<String, usize>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.set_file(path, body);
        self
    }

    /// Serve `path` with a non-success status.
    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.set_status(path, status);
        self
    }

    /// Park every fetch of `path` until released.
    pub fn with_gate(self, path: &str) -> Self {
        self.gates
            .lock()
            .insert(path.to_string(), Arc::new(Notify::new()));
        self
    }

    pub fn set_file(&self, path: &str, body: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .insert(path.to_string(), Response::Body(body.into()));
    }

    pub fn set_status(&self, path: &str, status: u16) {
        self.files
            .lock()
            .insert(path.to_string(), Response::Status(status));
    }

    /// Let one parked (or the next) fetch of `path` through.
    pub fn release(&self, path: &str) {
        if let Some(gate) = self.gates.lock().get(path) {
            gate.notify_one();
        }
    }

    pub fn calls(&self, path: &str) -> usize {
        self.calls.lock().get(path).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

impl Fetch for MemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        *self.calls.lock().entry(path.to_string()).or_insert(0) += 1;

        let gate = self.gates.lock().get(path).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let response = self.files.lock().get(path).cloned();
        match response {
            Some(Response::Body(body)) => Ok(body),
            Some(Response::Status(status)) => Err(LoadError::Status {
                path: path.to_string(),
                status,
            }),
            None => Err(LoadError::Status {
                path: path.to_string(),
                status: 404,
            }),
        }
    }
}
