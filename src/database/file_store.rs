//! JSON file used as a pseudo-database.
//!
//! The file holds one object mapping decimal ID strings to users (`{}` when
//! empty). Every call reads the whole file and mutations write it back in
//! full. A single mutex serialises those read-modify-write cycles within the
//! process so concurrent requests cannot lose each other's updates.

use super::{StoreError, UserMap, UserStore};
use crate::models::User;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub struct FileUserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Opens a store at `path`, seeding it with `{}` when the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let store = Self::new(path);
        if !tokio::fs::try_exists(store.path()).await? {
            log::info!("📁 Creating user store at {}", store.path().display());
            tokio::fs::write(store.path(), b"{}").await?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<UserMap, StoreError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            log::error!("❌ Failed to read user store {}: {}", self.path.display(), e);
            e
        })?;

        super::parse_user_map(&bytes).map_err(|e| {
            log::error!("❌ User store {} is not valid JSON: {}", self.path.display(), e);
            StoreError::from(e)
        })
    }

    /// Sibling file the next version is staged in before replacing the store.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Writes the full map to the staging file, then renames it over the
    /// store. A failed write leaves the previous contents in place.
    async fn write_map(&self, users: &UserMap) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(users)?;
        let staging = self.staging_path();

        let result = match tokio::fs::write(&staging, bytes).await {
            Ok(()) => tokio::fs::rename(&staging, &self.path).await,
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            log::error!("❌ Failed to write user store {}: {}", self.path.display(), e);
            if staging.is_file() {
                let _ = std::fs::remove_file(&staging);
            }
            StoreError::from(e)
        })
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let _guard = self.lock.lock().await;
        let users = self.read_map().await?;
        Ok(super::sorted_users(users))
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        super::ensure_complete(&user)?;

        let _guard = self.lock.lock().await;
        let mut users = self.read_map().await?;
        let created = super::insert_new(&mut users, user)?;
        self.write_map(&users).await?;

        if let Ok(json) = created.to_json() {
            log::debug!("💾 Stored user {}", json);
        }
        Ok(created)
    }

    async fn edit(&self, changes: User, id: i64) -> Result<(), StoreError> {
        super::ensure_partial(&changes)?;

        let _guard = self.lock.lock().await;
        let mut users = self.read_map().await?;
        super::merge_edit(&mut users, changes, id)?;
        self.write_map(&users).await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut users = self.read_map().await?;
        super::remove(&mut users, id)?;
        self.write_map(&users).await
    }
}
