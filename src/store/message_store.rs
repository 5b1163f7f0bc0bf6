// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Talaria-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Talaria and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;

use crate::model::Embed;

/// Filename prefix for current entries.
pub const STORE_PREFIX: &str = "message_";
/// Older deployments saved under this prefix; still honored on read.
pub const LEGACY_STORE_PREFIX: &str = "embed_";

/// One persisted catalog entry: `key → {key, embeds, timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub key: String,
    pub embeds: Vec<Embed>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Directory-backed key→message map, one JSON file per entry.
///
/// Save overwrites unconditionally (last write wins, no versioning), delete
/// is idempotent, and listing skips entries that fail to parse instead of
/// failing the whole scan.
#[derive(Debug, Clone)]
pub struct MessageStore {
    root: PathBuf,
}

impl MessageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{STORE_PREFIX}{key}.json"))
    }

    fn legacy_entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{LEGACY_STORE_PREFIX}{key}.json"))
    }

    pub fn save(&self, key: &str, embeds: &[Embed]) -> Result<StoredMessage, StoreError> {
        self.save_at(key, embeds, OffsetDateTime::now_utc())
    }

    pub fn save_at(
        &self,
        key: &str,
        embeds: &[Embed],
        timestamp: OffsetDateTime,
    ) -> Result<StoredMessage, StoreError> {
        validate_key(key)?;

        let entry = StoredMessage {
            key: key.to_owned(),
            embeds: embeds.to_vec(),
            timestamp,
        };

        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.entry_path(key);
        let json = serde_json::to_string_pretty(&entry).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        write_atomic(&path, format!("{json}\n").as_bytes())?;

        Ok(entry)
    }

    /// Look a key up, current prefix first, then the legacy one.
    pub fn get(&self, key: &str) -> Result<Option<StoredMessage>, StoreError> {
        validate_key(key)?;

        for path in [self.entry_path(key), self.legacy_entry_path(key)] {
            match fs::read_to_string(&path) {
                Ok(raw) => {
                    let entry = serde_json::from_str(&raw)
                        .map_err(|source| StoreError::Json { path, source })?;
                    return Ok(Some(entry));
                }
                Err(source) if source.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::Io { path, source }),
            }
        }

        Ok(None)
    }

    /// Every parseable entry under either prefix, ordered by key.
    pub fn list(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io { path: self.root.clone(), source });
            }
        };

        let mut entries = Vec::new();
        for dir_entry in dir {
            let dir_entry = dir_entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let file_name = dir_entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !is_entry_filename(name) {
                continue;
            }

            let path = dir_entry.path();
            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            match serde_json::from_str::<StoredMessage>(&raw) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unparseable entry");
                }
            }
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    /// Remove the entry under both prefixes; absent entries are fine.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;

        for path in [self.entry_path(key), self.legacy_entry_path(key)] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(source) if source.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::Io { path, source }),
            }
        }

        Ok(())
    }
}

fn is_entry_filename(name: &str) -> bool {
    name.ends_with(".json")
        && (name.starts_with(STORE_PREFIX) || name.starts_with(LEGACY_STORE_PREFIX))
}

/// Keys become filename segments; anything that could escape the store root
/// or confuse a filesystem is rejected up front.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.contains(['/', '\\'])
        && !key.chars().any(|ch| ch.is_control());
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey { key: key.to_owned() })
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);

    fs::write(&tmp_path, bytes).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug)]
pub enum StoreError {
    InvalidKey { key: String },
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey { key } => write!(f, "invalid store key {key:?}"),
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidKey { .. } => None,
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}
