//! # Repository Module
//!
//! Typed access to each persisted key.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SessionManager                                                         │
//! │       │  users.find_by_credentials(email, password)                     │
//! │       ▼                                                                 │
//! │  UserRepository ── read_json::<Vec<User>>("registeredUsers")            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KeyValueStore::get("registeredUsers") → "[{...}, {...}]"              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Services never see raw strings: values are decoded here, and a value
//! that fails to decode surfaces as `StoreError::Corrupt` naming its key.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::KeyValueStore;
use crate::error::{StoreError, StoreResult};

pub mod cart;
pub mod session;
pub mod users;

/// Key holding the serialized current session.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Key holding the serialized list of locally registered users.
pub const REGISTERED_USERS_KEY: &str = "registeredUsers";

/// Key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Reads and decodes the value under `key`; `None` when the key is absent.
pub(crate) fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<T>> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::corrupt(key, e)),
    }
}

/// Encodes and writes `value` under `key`.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
    store.set(key, &raw)
}
