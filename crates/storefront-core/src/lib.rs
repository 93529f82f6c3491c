//! # storefront-core: Pure Business Logic for the Storefront
//!
//! Domain types and rules shared by every other crate in the workspace.
//! Nothing in here touches storage, files or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (views, routing)                    │   │
//! │  │    Login ──► Product List ──► Product Details ──► Cart          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront-client                            │   │
//! │  │    SessionManager, CatalogStore, CartLedger                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │   User    │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Product  │  │           │  │ CartItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Fixture records (User, Product) and session shapes
//! - [`money`] - Integer-cent money type
//! - [`cart`] - Cart ledger math
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Fixture, User};
//!
//! let fixture = Fixture::from_json(
//!     r#"{"users":[{"id":1,"email":"a@x.com","password":"p","name":"A"}]}"#,
//! )
//! .unwrap();
//!
//! let user: &User = &fixture.users[0];
//! assert!(user.matches_credentials("a@x.com", "p"));
//! assert_eq!(user.without_password().name, "A");
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in the cart.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price a cart line may carry: $10,000,000.00.
///
/// With the line and quantity limits this keeps every cart total far from
/// `i64` overflow.
pub const MAX_UNIT_PRICE_CENTS: i64 = 1_000_000_000;

/// Maximum length of a catalog search term, in characters.
pub const MAX_SEARCH_TERM_LEN: usize = 100;
