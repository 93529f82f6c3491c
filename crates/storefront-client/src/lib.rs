//! # storefront-client: Storefront Services
//!
//! The logic a storefront UI runs on: who is signed in, what is for sale,
//! and what is in the cart. All of it is backed by a static JSON fixture
//! and a local key-value store; there is no server.
//!
//! ## Service Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Storefront                                     │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │ SessionManager  │  │  CatalogStore   │  │      CartLedger         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │ watch channel   │  │ RwLock cache    │  │ Mutex<Cart>             │ │
//! │  │ Option<Session> │  │ watch<String>   │  │                         │ │
//! │  └───┬─────────┬───┘  └────────┬────────┘  └────────────┬────────────┘ │
//! │      │         │               │                        │              │
//! │      │         └──────┬────────┘                        │              │
//! │      │                ▼                                 │              │
//! │      │       ┌─────────────────┐                        │              │
//! │      │       │ FixtureSource   │  users[], products[]   │              │
//! │      │       └─────────────────┘                        │              │
//! │      ▼                                                  ▼              │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │ KeyValueStore: currentUser, registeredUsers, cart                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_client::{NoOpNavigator, StaticFixture, Storefront};
//! use storefront_store::MemoryStore;
//!
//! # async fn demo() -> storefront_client::ClientResult<()> {
//! let fixture = StaticFixture::from_json(
//!     r#"{"users":[{"id":1,"email":"a@x.com","password":"p","name":"A"}],
//!         "products":[{"id":3,"title":"Lamp","price":19.99}]}"#,
//! )?;
//! let shop = Storefront::from_parts(
//!     Arc::new(fixture),
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(NoOpNavigator),
//! );
//!
//! shop.session().authenticate("a@x.com", "p").await?;
//! let totals = shop.add_product_to_cart(3).await?;
//! assert_eq!(totals.subtotal.to_string(), "$19.99");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod fixture;
pub mod ledger;
pub mod session;
pub mod storefront;

pub use catalog::{CatalogStore, ProductFilter};
pub use config::{FixtureSettings, StorageBackend, StorageSettings, StorefrontConfig};
pub use error::{ClientError, ClientResult};
pub use fixture::{FileFixture, FixtureSource, StaticFixture};
pub use ledger::CartLedger;
pub use session::{Navigator, NoOpNavigator, SessionManager};
pub use storefront::Storefront;
