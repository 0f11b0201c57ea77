//! User persistence.
//!
//! Backends implement [`UserStore`]; the map helpers below hold the rules
//! they share (ID assignment, edit merging, removal).

pub mod file_store;
#[cfg(test)]
pub mod memory_store;

pub use file_store::FileUserStore;

use crate::models::User;
use crate::validation::{self, ValidationErrors, INVALID_INPUT};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Stored users keyed by ID.
pub type UserMap = BTreeMap<i64, User>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    CreateIncomplete(ValidationErrors),

    #[error("{0}")]
    EditIncomplete(ValidationErrors),

    #[error("user {0} not found")]
    NotFound(i64),

    #[error("computed user id {0} is not valid")]
    CreateBadId(i64),

    #[error("user store unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("user store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// CRUD over the full collection of users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user, ascending by ID.
    async fn get_all(&self) -> Result<Vec<User>, StoreError>;

    /// Validates and stores a new user, returning it with its assigned ID.
    async fn create(&self, user: User) -> Result<User, StoreError>;

    /// Overwrites the stored user's fields with the non-empty fields of `changes`.
    async fn edit(&self, changes: User, id: i64) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

pub fn ensure_complete(user: &User) -> Result<(), StoreError> {
    let errors = validation::validate_complete(user);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::CreateIncomplete(ValidationErrors::new(INVALID_INPUT, errors)))
    }
}

pub fn ensure_partial(user: &User) -> Result<(), StoreError> {
    let errors = validation::validate_partial(user);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::EditIncomplete(ValidationErrors::new(INVALID_INPUT, errors)))
    }
}

pub fn parse_user_map(bytes: &[u8]) -> Result<UserMap, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Users ordered by their own `id`, not by the key they were filed under.
pub fn sorted_users(users: UserMap) -> Vec<User> {
    let mut list: Vec<User> = users.into_values().collect();
    list.sort_by_key(|u| u.id);
    list
}

/// Highest stored ID plus one; an empty store starts at 1. Freed IDs below
/// the current maximum are never handed out again.
pub fn next_id(users: &UserMap) -> Result<i64, StoreError> {
    let max = users.values().map(|u| u.id).max().unwrap_or(0);
    match max.checked_add(1) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(StoreError::CreateBadId(max.wrapping_add(1))),
    }
}

pub fn insert_new(users: &mut UserMap, mut user: User) -> Result<User, StoreError> {
    user.id = next_id(users)?;
    users.insert(user.id, user.clone());
    Ok(user)
}

pub fn merge_edit(users: &mut UserMap, changes: User, id: i64) -> Result<(), StoreError> {
    let stored = users.get_mut(&id).ok_or(StoreError::NotFound(id))?;

    let User { first_name, last_name, email, organization, .. } = changes;
    for (field, incoming) in [
        (&mut stored.first_name, first_name),
        (&mut stored.last_name, last_name),
        (&mut stored.email, email),
        (&mut stored.organization, organization),
    ] {
        if !incoming.is_empty() {
            *field = incoming;
        }
    }
    Ok(())
}

pub fn remove(users: &mut UserMap, id: i64) -> Result<(), StoreError> {
    users.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const BASE_MOCK_DATA: &str = r#"{"1":{"id":1,"firstName":"test","lastName":"testLn","organization":"marketing","email":"test@email.com"},"2":{"id":2,"firstName":"test2","lastName":"testLn","organization":"sales","email":"new@employee.com"}}"#;
}

#[cfg(test)]
mod tests {
    use super::fixtures::BASE_MOCK_DATA;
    use super::*;

    #[test]
    fn test_parse_and_sort() {
        let raw = br#"{"10":{"id":10,"firstName":"b"},"2":{"id":2,"firstName":"a"},"3":{"id":3}}"#;
        let map = parse_user_map(raw).unwrap();
        let ids: Vec<i64> = sorted_users(map).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 3, 10]);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(&UserMap::new()).unwrap(), 1);

        let map = parse_user_map(BASE_MOCK_DATA.as_bytes()).unwrap();
        assert_eq!(next_id(&map).unwrap(), 3);
    }

    #[test]
    fn test_next_id_ignores_gaps() {
        let map = parse_user_map(br#"{"1":{"id":1},"7":{"id":7}}"#).unwrap();
        assert_eq!(next_id(&map).unwrap(), 8);
    }

    #[test]
    fn test_next_id_rejects_overflow_and_non_positive() {
        let mut map = UserMap::new();
        map.insert(i64::MAX, User { id: i64::MAX, ..User::default() });
        assert!(matches!(next_id(&map), Err(StoreError::CreateBadId(_))));

        let mut map = UserMap::new();
        map.insert(-5, User { id: -5, ..User::default() });
        assert!(matches!(next_id(&map), Err(StoreError::CreateBadId(-4))));
    }

    #[test]
    fn test_merge_keeps_empty_fields() {
        let mut map = parse_user_map(BASE_MOCK_DATA.as_bytes()).unwrap();
        let changes = User {
            email: "xyz@123".into(),
            last_name: "zzzzz".into(),
            organization: "...".into(),
            ..User::default()
        };

        merge_edit(&mut map, changes, 1).unwrap();

        let edited = &map[&1];
        assert_eq!(edited.id, 1);
        assert_eq!(edited.first_name, "test");
        assert_eq!(edited.last_name, "zzzzz");
        assert_eq!(edited.email, "xyz@123");
        assert_eq!(edited.organization, "...");
    }

    #[test]
    fn test_merge_and_remove_missing() {
        let mut map = parse_user_map(BASE_MOCK_DATA.as_bytes()).unwrap();
        let before = map.clone();

        let err = merge_edit(&mut map, User::default(), 99).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(99)));
        assert!(matches!(remove(&mut map, 99), Err(StoreError::NotFound(99))));
        assert_eq!(map, before);
    }

    #[test]
    fn test_ensure_complete_wraps_errors() {
        match ensure_complete(&User::new("test", "", "", "")) {
            Err(StoreError::CreateIncomplete(errs)) => {
                assert_eq!(errs.message, INVALID_INPUT);
                assert_eq!(errs.errors.len(), 3);
            }
            other => panic!("expected CreateIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_ensure_partial_wraps_errors() {
        assert!(ensure_partial(&User { first_name: "x".into(), ..User::default() }).is_ok());
        assert!(matches!(ensure_partial(&User::default()), Err(StoreError::EditIncomplete(_))));
    }
}
