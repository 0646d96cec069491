// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Key-value record store holding JSON-serialized arrays.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::RwLock;

use crate::record::{AppointmentRecord, RegisteredUser, Session};

/// Key holding the array of appointment records.
pub const APPOINTMENTS_KEY: &str = "@MedicalApp:appointments";

/// Key holding the array of registered users.
pub const REGISTERED_USERS_KEY: &str = "@MedicalApp:registeredUsers";

/// Key holding the signed-in session, `null` after logout.
pub const SESSION_KEY: &str = "@MedicalApp:session";

/// Record store errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("failed to access `{key}`: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The stored value is not the expected JSON array.
    #[error("failed to decode `{key}`: {source}")]
    Deserialize {
        /// Key being decoded.
        key: String,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The value could not be encoded as JSON.
    #[error("failed to encode `{key}`: {source}")]
    Serialize {
        /// Key being encoded.
        key: String,
        /// Underlying encoding error.
        #[source]
        source: serde_json::Error,
    },
}

/// Persistent key-value storage of serialized records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Reads the raw value of `key`, or `None` if it was never written.
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the raw value of `key`.
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value).await
    }
}

/// Reads and decodes the array under `key`; a missing key is an empty array.
pub async fn load_array<T, S>(store: &S, key: &str) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    match store.read(key).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Deserialize {
            key: key.to_string(),
            source,
        }),
        None => {
            tracing::debug!(key, "key not found, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Encodes `items` and stores them under `key`.
pub async fn save_array<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize + Sync,
    S: RecordStore + ?Sized,
{
    let raw = serde_json::to_string(items).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.write(key, &raw).await
}

/// Loads every appointment record.
pub async fn load_appointments<S: RecordStore + ?Sized>(
    store: &S,
) -> Result<Vec<AppointmentRecord>, StoreError> {
    load_array(store, APPOINTMENTS_KEY).await
}

/// Loads every registered user.
pub async fn load_registered_users<S: RecordStore + ?Sized>(
    store: &S,
) -> Result<Vec<RegisteredUser>, StoreError> {
    load_array(store, REGISTERED_USERS_KEY).await
}

/// Loads the signed-in session, if any.
pub async fn load_session<S: RecordStore + ?Sized>(
    store: &S,
) -> Result<Option<Session>, StoreError> {
    let Some(raw) = store.read(SESSION_KEY).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw).map_err(|source| StoreError::Deserialize {
        key: SESSION_KEY.to_string(),
        source,
    })
}

/// Stores the signed-in session; `None` signs out.
pub async fn save_session<S: RecordStore + ?Sized>(
    store: &S,
    session: Option<&Session>,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(&session).map_err(|source| StoreError::Serialize {
        key: SESSION_KEY.to_string(),
        source,
    })?;
    store.write(SESSION_KEY, &raw).await
}

/// Record store keeping one JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store rooted at `dir`, creating the directory if needed.
    #[tracing::instrument]
    pub async fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)
            .await
            .map_err(|source| StoreError::Io {
                key: dir.display().to_string(),
                source,
            })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Directory holding the store files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
    #[must_use]
    pub fn path_of(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
                _ => '_',
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_of(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_of(key);
        let tmp = path.with_extension("json.tmp");
        let io_err = |source: io::Error| StoreError::Io {
            key: key.to_string(),
            source,
        };

        // Write then rename so readers never observe a partial file.
        fs::write(&tmp, value).await.map_err(io_err)?;
        fs::rename(&tmp, &path).await.map_err(io_err)?;
        tracing::debug!(key, path = %path.display(), "record store updated");
        Ok(())
    }
}

/// In-memory record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given raw entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
