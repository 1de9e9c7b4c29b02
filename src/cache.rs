// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Write-once session cache for the two search artifacts.
//!
//! Each artifact lives in a [`CacheCell`] with three states:
//!
//! ```text
//!            claim()                 fulfill(v)
//!   Empty ──────────────▶ Loading ──────────────▶ Loaded(v)
//!     ▲                      │
//!     └──────────────────────┘
//!        ticket dropped (fetch failed or caller went away)
//! ```
//!
//! Whoever claims an `Empty` cell gets a [`LoadTicket`] and is the only one
//! allowed to fetch. Anybody who shows up while the cell is `Loading` is told to
//! come back later; they are not queued. A failed fetch just drops its ticket,
//! which puts the cell back to `Empty` so the next keystroke retries.
//!
//! The mutex is held for state transitions only, never across an `.await`.

use crate::types::{Corpus, InvertedIndex};
use parking_lot::Mutex;
use std::sync::Arc;

/// Observable state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Loading,
    Loaded,
}

enum Slot<T> {
    Empty,
    Loading,
    Loaded(Arc<T>),
}

/// Outcome of [`CacheCell::claim`].
pub enum Claim<'a, T> {
    /// Already loaded.
    Ready(Arc<T>),
    /// Someone else is fetching right now.
    InFlight,
    /// You fetch. Fulfill the ticket on success, drop it on failure.
    Fetch(LoadTicket<'a, T>),
}

pub struct CacheCell<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for CacheCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CacheCell<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Empty),
        }
    }

    pub fn state(&self) -> CacheState {
        match &*self.slot.lock() {
            Slot::Empty => CacheState::Empty,
            Slot::Loading => CacheState::Loading,
            Slot::Loaded(_) => CacheState::Loaded,
        }
    }

    /// The cached value, without claiming anything.
    pub fn get(&self) -> Option<Arc<T>> {
        match &*self.slot.lock() {
            Slot::Loaded(value) => Some(Arc::clone(value)),
            _ => None,
        }
    }

    /// Take the right to load, or find out why you can't.
    pub fn claim(&self) -> Claim<'_, T> {
        let mut slot = self.slot.lock();
        match &*slot {
            Slot::Loaded(value) => Claim::Ready(Arc::clone(value)),
            Slot::Loading => Claim::InFlight,
            Slot::Empty => {
                *slot = Slot::Loading;
                Claim::Fetch(LoadTicket {
                    cell: self,
                    done: false,
                })
            }
        }
    }
}

/// Exclusive right to fill a cell.
pub struct LoadTicket<'a, T> {
    cell: &'a CacheCell<T>,
    done: bool,
}

impl<T> LoadTicket<'_, T> {
    /// Store the value for the rest of the session.
    pub fn fulfill(mut self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        *self.cell.slot.lock() = Slot::Loaded(Arc::clone(&value));
        self.done = true;
        value
    }
}

impl<T> Drop for LoadTicket<'_, T> {
    fn drop(&mut self) {
        if !self.done {
            *self.cell.slot.lock() = Slot::Empty;
        }
    }
}

/// Both artifacts for one engine instance.
#[derive(Default)]
pub struct SessionCache {
    pub index: CacheCell<InvertedIndex>,
    pub corpus: CacheCell<Corpus>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}
