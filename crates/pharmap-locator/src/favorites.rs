//! Favorite pharmacies, persisted in a key-value store.
//!
//! The favorites live under [`FAVORITES_KEY`] as a JSON object mapping
//! pharmacy id to `true`. Un-favoriting removes the key from the object.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};

use pharmap_core::Pharmacy;

use crate::error::FavoritesError;

/// Storage key holding the favorites object.
pub const FAVORITES_KEY: &str = "favorite_pharmacy";

/// String key-value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, FavoritesError>> + Send;

    fn set_item(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), FavoritesError>> + Send;
}

/// Key-value store backed by one JSON object file.
///
/// A missing file reads as an empty store. Writes go to a sibling temp file
/// first and are renamed into place.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileKeyValueStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> FavoritesError {
        FavoritesError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, FavoritesError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| FavoritesError::Corrupt {
            key: self.path.display().to_string(),
            source: e,
        })
    }
}

impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, FavoritesError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), FavoritesError> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value);
        let body = serde_json::to_string_pretty(&items).map_err(|e| FavoritesError::Corrupt {
            key: key.to_string(),
            source: e,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }
}

/// In-process key-value store.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: std::sync::Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.items
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, FavoritesError> {
        Ok(self.items().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), FavoritesError> {
        self.items().insert(key.to_string(), value);
        Ok(())
    }
}

/// The user's favorite pharmacies.
#[derive(Debug)]
pub struct Favorites<S> {
    store: S,
    ids: BTreeMap<String, bool>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Read the persisted favorites. A missing entry means no favorites.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] if the store cannot be read or the entry
    /// is not a JSON object of booleans.
    pub async fn load(store: S) -> Result<Self, FavoritesError> {
        let ids = match store.get_item(FAVORITES_KEY).await? {
            Some(raw) => parse_favorites(&raw)?,
            None => BTreeMap::new(),
        };
        tracing::debug!(favorites = ids.len(), "loaded favorites");
        Ok(Self { store, ids })
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.get(id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    /// Flip `id`'s favorite status and persist. Returns the new status.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError`] if persisting fails; the in-memory state is
    /// left unchanged in that case.
    pub async fn toggle(&mut self, id: &str) -> Result<bool, FavoritesError> {
        let mut next = self.ids.clone();
        let now_favorite = if next.remove(id).is_some() {
            false
        } else {
            next.insert(id.to_string(), true);
            true
        };

        let body = serde_json::to_string(&next).map_err(|e| FavoritesError::Corrupt {
            key: FAVORITES_KEY.to_string(),
            source: e,
        })?;
        self.store.set_item(FAVORITES_KEY, body).await?;
        self.ids = next;

        tracing::info!(id, favorite = now_favorite, "toggled favorite");
        Ok(now_favorite)
    }

    /// The favorites view: pharmacies from `pharmacies` that are favorited,
    /// in their original order.
    #[must_use]
    pub fn filter<'a>(&self, pharmacies: &'a [Pharmacy]) -> Vec<&'a Pharmacy> {
        pharmacies
            .iter()
            .filter(|p| self.is_favorite(&p.id))
            .collect()
    }
}

fn parse_favorites(raw: &str) -> Result<BTreeMap<String, bool>, FavoritesError> {
    let parsed: BTreeMap<String, bool> =
        serde_json::from_str(raw).map_err(|e| FavoritesError::Corrupt {
            key: FAVORITES_KEY.to_string(),
            source: e,
        })?;
    Ok(parsed.into_iter().filter(|(_, favorite)| *favorite).collect())
}
