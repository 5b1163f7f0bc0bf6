// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only image-name → URL lookup table with a freshness window.
//!
//! The catalog file is a flat JSON object. Reads inside the window serve the
//! in-memory copy; the first read after expiry (or after a failed load)
//! re-fetches from disk. A missing or malformed file degrades to an empty
//! table; image lookups are a convenience, never a hard dependency.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::warn;

pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

#[derive(Debug)]
pub struct ImageCatalog {
    path: PathBuf,
    freshness: Duration,
    state: Mutex<CatalogState>,
}

#[derive(Debug, Default)]
struct CatalogState {
    loaded_at: Option<Instant>,
    entries: BTreeMap<String, String>,
}

impl ImageCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            freshness: DEFAULT_FRESHNESS_WINDOW,
            state: Mutex::new(CatalogState::default()),
        }
    }

    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness = window;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url_for(&self, name: &str) -> Option<String> {
        self.fresh_state().entries.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.fresh_state().entries.keys().cloned().collect()
    }

    pub fn entries(&self) -> BTreeMap<String, String> {
        self.fresh_state().entries.clone()
    }

    /// Drop the cached copy; the next read re-fetches regardless of age.
    pub fn invalidate(&self) {
        let mut state = self.state.lock().expect("catalog lock poisoned");
        state.loaded_at = None;
        state.entries.clear();
    }

    fn fresh_state(&self) -> MutexGuard<'_, CatalogState> {
        let mut state = self.state.lock().expect("catalog lock poisoned");
        let fresh = state
            .loaded_at
            .map(|at| at.elapsed() < self.freshness)
            .unwrap_or(false);
        if !fresh {
            self.reload(&mut state);
        }
        state
    }

    fn reload(&self, state: &mut CatalogState) {
        state.entries.clear();
        // A failed load leaves loaded_at unset so the next read retries.
        state.loaded_at = None;

        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "image catalog unavailable");
                return;
            }
        };
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "image catalog unparseable");
                return;
            }
        };
        let Value::Object(map) = value else {
            warn!(path = %self.path.display(), "image catalog is not an object");
            return;
        };

        for (name, url) in map {
            if let Some(url) = url.as_str() {
                state.entries.insert(name, url.to_owned());
            }
        }
        state.loaded_at = Some(Instant::now());
    }
}
