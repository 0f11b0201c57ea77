use super::{StoreError, UserMap, UserStore};
use crate::models::User;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// In-memory backend for handler tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<UserMap>,
}

impl MemoryUserStore {
    pub fn from_json(data: &str) -> Self {
        let users = super::parse_user_map(data.as_bytes()).expect("fixture must be valid JSON");
        Self { users: Mutex::new(users) }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(super::sorted_users(self.users.lock().await.clone()))
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        super::ensure_complete(&user)?;
        super::insert_new(&mut *self.users.lock().await, user)
    }

    async fn edit(&self, changes: User, id: i64) -> Result<(), StoreError> {
        super::ensure_partial(&changes)?;
        super::merge_edit(&mut *self.users.lock().await, changes, id)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        super::remove(&mut *self.users.lock().await, id)
    }
}
