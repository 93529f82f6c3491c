//! # storefront-store: Key-Value Storage for the Storefront
//!
//! Everything the storefront persists lives under a handful of string keys,
//! exactly like the browser's local storage it stands in for.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  SessionManager.authenticate() / CartLedger.add_to_cart()              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-store (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐    ┌──────────────────┐                   │   │
//! │  │   │  Repositories  │    │  KeyValueStore   │                   │   │
//! │  │   │                │    │  (backend.rs)    │                   │   │
//! │  │   │ UserRepository │───►│  MemoryStore     │                   │   │
//! │  │   │ SessionRepo    │    │  JsonFileStore   │                   │   │
//! │  │   │ CartRepository │    │                  │                   │   │
//! │  │   └────────────────┘    └──────────────────┘                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  currentUser │ registeredUsers │ cart                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront_core::NewUser;
//! use storefront_store::{MemoryStore, UserRepository};
//!
//! let store = Arc::new(MemoryStore::new());
//! let users = UserRepository::new(store);
//!
//! users.append(NewUser::new("a@x.com", "p", "A").into_user(1)).unwrap();
//! assert!(users.find_by_credentials("a@x.com", "p").unwrap().is_some());
//! ```

pub mod backend;
pub mod error;
pub mod repository;

pub use backend::{JsonFileStore, KeyValueStore, MemoryStore};
pub use error::{StoreError, StoreResult};
pub use repository::cart::CartRepository;
pub use repository::session::SessionRepository;
pub use repository::users::UserRepository;
pub use repository::{CART_KEY, CURRENT_USER_KEY, REGISTERED_USERS_KEY};
