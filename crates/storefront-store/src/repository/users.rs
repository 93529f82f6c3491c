//! # Registered User Repository
//!
//! The `registeredUsers` key: every account created through registration.
//! Fixture users never live here.
//!
//! An absent key is an empty list. A corrupt list is an error for every
//! operation on this repository; callers decide how far that spreads.

use std::sync::Arc;

use storefront_core::User;
use tracing::debug;

use super::{read_json, write_json, REGISTERED_USERS_KEY};
use crate::backend::KeyValueStore;
use crate::error::StoreResult;

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn KeyValueStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        UserRepository { store }
    }

    /// All registered users in registration order.
    pub fn list(&self) -> StoreResult<Vec<User>> {
        Ok(read_json(self.store.as_ref(), REGISTERED_USERS_KEY)?.unwrap_or_default())
    }

    /// First user whose email and password both match exactly.
    pub fn find_by_credentials(&self, email: &str, password: &str) -> StoreResult<Option<User>> {
        let found = self
            .list()?
            .into_iter()
            .find(|u| u.matches_credentials(email, password));
        debug!(found = found.is_some(), "Checked registered users");
        Ok(found)
    }

    /// Appends a user to the end of the list (read-modify-write).
    pub fn append(&self, user: User) -> StoreResult<()> {
        let mut users = self.list()?;
        users.push(user);
        write_json(self.store.as_ref(), REGISTERED_USERS_KEY, &users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use storefront_core::NewUser;

    fn repo_with(store: MemoryStore) -> UserRepository {
        UserRepository::new(Arc::new(store))
    }

    #[test]
    fn test_absent_key_is_empty_list() {
        let repo = repo_with(MemoryStore::new());
        assert!(repo.list().unwrap().is_empty());
        assert_eq!(repo.find_by_credentials("a@x.com", "p").unwrap(), None);
    }

    #[test]
    fn test_append_and_find() {
        let repo = repo_with(MemoryStore::new());
        repo.append(NewUser::new("a@x.com", "p", "A").into_user(10))
            .unwrap();
        repo.append(NewUser::new("b@x.com", "q", "B").into_user(11))
            .unwrap();

        let users = repo.list().unwrap();
        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![10, 11]);

        let found = repo.find_by_credentials("b@x.com", "q").unwrap().unwrap();
        assert_eq!(found.id, 11);
        assert_eq!(repo.find_by_credentials("b@x.com", "p").unwrap(), None);
    }

    #[test]
    fn test_first_match_wins_on_duplicates() {
        let raw = r#"[
            {"id":1,"email":"dup@x.com","password":"p","name":"First"},
            {"id":2,"email":"dup@x.com","password":"p","name":"Second"}
        ]"#;
        let repo = repo_with(MemoryStore::with_entries([(REGISTERED_USERS_KEY, raw)]));

        let found = repo.find_by_credentials("dup@x.com", "p").unwrap().unwrap();
        assert_eq!(found.name, "First");
    }

    #[test]
    fn test_corrupt_list_is_reported_with_key() {
        let repo = repo_with(MemoryStore::with_entries([(REGISTERED_USERS_KEY, "{oops")]));

        let err = repo.find_by_credentials("a@x.com", "p").unwrap_err();
        assert!(err.is_corrupt());
        assert!(err.to_string().contains(REGISTERED_USERS_KEY));
    }
}
