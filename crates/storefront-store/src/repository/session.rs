//! # Session Repository
//!
//! The `currentUser` key: the password-stripped user of the active session.

use std::sync::Arc;

use storefront_core::SessionUser;

use super::{read_json, write_json, CURRENT_USER_KEY};
use crate::backend::KeyValueStore;
use crate::error::StoreResult;

#[derive(Clone)]
pub struct SessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        SessionRepository { store }
    }

    pub fn load(&self) -> StoreResult<Option<SessionUser>> {
        read_json(self.store.as_ref(), CURRENT_USER_KEY)
    }

    pub fn save(&self, user: &SessionUser) -> StoreResult<()> {
        write_json(self.store.as_ref(), CURRENT_USER_KEY, user)
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(CURRENT_USER_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;

    #[test]
    fn test_save_load_clear() {
        let store = Arc::new(MemoryStore::new());
        let repo = SessionRepository::new(store.clone());
        assert_eq!(repo.load().unwrap(), None);

        let user = SessionUser {
            id: 1,
            email: "a@x.com".to_string(),
            name: "A".to_string(),
            role: None,
        };
        repo.save(&user).unwrap();
        assert_eq!(repo.load().unwrap(), Some(user));

        let raw = store.get(CURRENT_USER_KEY).unwrap().unwrap();
        assert!(!raw.contains("password"));

        repo.clear().unwrap();
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap(), None);
    }
}
