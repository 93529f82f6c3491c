//! # Domain Types
//!
//! Records served by the static fixture and the shapes derived from them.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │   SessionUser   │   │     NewUser     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │   │  email          │       │
//! │  │  email          │   │  email          │   │  password       │       │
//! │  │  password       │   │  name           │   │  name           │       │
//! │  │  name, role?    │   │  role?          │   │  role?          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────┐   ┌─────────────────┐     │
//! │  │                Product                  │   │     Fixture     │     │
//! │  │  id, title, category, price, stock ...  │◄──│  users[]        │     │
//! │  │  rating{rate,count}, dimensions{...}    │   │  products[]     │     │
//! │  └─────────────────────────────────────────┘   └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! JSON field names follow the fixture (camelCase). Product fields other
//! than `id` default when absent so one sparse record does not take the
//! whole catalog down.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Users
// =============================================================================

/// A user account as stored in the fixture or the registered-user list.
///
/// Passwords are plaintext; this is a simulation of a backend, not one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub role: Option<String>,
}

impl User {
    /// Exact, case-sensitive credential match.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// Returns the session view of this user.
    pub fn without_password(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

/// The password-stripped user held as the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub role: Option<String>,
}

/// Registration input: a user without an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub role: Option<String>,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        NewUser {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            role: None,
        }
    }

    /// Attaches an allocated id.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            email: self.email,
            password: self.password,
            name: self.name,
            role: self.role,
        }
    }
}

/// Allocates the next user id: one past the highest id in use.
///
/// Callers pass every list an id could collide with (fixture and
/// registered users). Ids start at 1. Returns `None` once the id space is
/// exhausted.
///
/// ```rust
/// use storefront_core::{next_user_id, NewUser, User};
///
/// let existing = vec![
///     NewUser::new("a@x.com", "p", "A").into_user(4),
///     NewUser::new("b@x.com", "p", "B").into_user(17),
/// ];
/// assert_eq!(next_user_id(&existing), Some(18));
/// assert_eq!(next_user_id(&Vec::<User>::new()), Some(1));
/// ```
pub fn next_user_id<'a>(users: impl IntoIterator<Item = &'a User>) -> Option<i64> {
    match users.into_iter().map(|u| u.id).max() {
        None => Some(1),
        Some(max) => max.checked_add(1).map(|id| id.max(1)),
    }
}

// =============================================================================
// Products
// =============================================================================

/// Aggregate customer rating.
///
/// The fixture carries either `{ "rate": 4.5, "count": 120 }` or a bare
/// score such as `4.94`; both decode into this shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(from = "RatingRepr")]
#[ts(export)]
pub struct Rating {
    pub rate: f64,
    pub count: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RatingRepr {
    Detailed {
        #[serde(default)]
        rate: f64,
        #[serde(default)]
        count: i64,
    },
    Score(f64),
}

impl From<RatingRepr> for Rating {
    fn from(repr: RatingRepr) -> Self {
        match repr {
            RatingRepr::Detailed { rate, count } => Rating { rate, count },
            RatingRepr::Score(rate) => Rating { rate, count: 0 },
        }
    }
}

/// Package dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dimensions {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub depth: f64,
}

/// A catalog product. Read-only; there is no write path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub warranty_information: String,
    #[serde(default)]
    pub shipping_information: String,
    #[serde(default)]
    pub availability_status: String,
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub reviews: Vec<serde_json::Value>,
    #[serde(default)]
    pub return_policy: String,
    #[serde(default)]
    pub minimum_order_quantity: i64,
    #[serde(default)]
    #[ts(type = "unknown")]
    pub meta: serde_json::Value,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
}

impl Product {
    /// Listed price in cents.
    pub fn price(&self) -> Money {
        Money::from_fixture_price(self.price)
    }

    /// Price after `discountPercentage` is applied.
    pub fn discounted_price(&self) -> Money {
        let pct = self.discount_percentage.clamp(0.0, 100.0);
        self.price()
            .apply_percentage_discount((pct * 100.0).round() as u32)
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Image shown for the product in lists and cart lines: the thumbnail,
    /// or the legacy `image` field when no thumbnail exists.
    pub fn display_image(&self) -> Option<&str> {
        if !self.thumbnail.is_empty() {
            return Some(&self.thumbnail);
        }
        self.image.as_deref().filter(|img| !img.is_empty())
    }

    /// Case-insensitive match against title, description, brand, category
    /// and tags. `needle` must already be lowercased; empty matches all.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        [&self.title, &self.description, &self.brand, &self.category]
            .into_iter()
            .chain(self.tags.iter())
            .any(|field| field.to_lowercase().contains(needle))
    }
}

// =============================================================================
// Fixture
// =============================================================================

/// The bundled static document standing in for a backend API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Fixture {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, email: &str, password: &str) -> User {
        NewUser::new(email, password, "Tester").into_user(id)
    }

    #[test]
    fn test_credentials_are_exact() {
        let u = user(1, "a@x.com", "p");
        assert!(u.matches_credentials("a@x.com", "p"));
        assert!(!u.matches_credentials("A@x.com", "p"));
        assert!(!u.matches_credentials("a@x.com", "wrong"));
    }

    #[test]
    fn test_without_password_keeps_other_fields() {
        let mut u = user(7, "a@x.com", "secret");
        u.role = Some("admin".to_string());

        let session = u.without_password();
        assert_eq!(session.id, 7);
        assert_eq!(session.email, "a@x.com");
        assert_eq!(session.role.as_deref(), Some("admin"));

        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_next_user_id_skips_past_highest() {
        let users = vec![user(3, "a", "p"), user(9999, "b", "p"), user(12, "c", "p")];
        assert_eq!(next_user_id(&users), Some(10000));
        assert_eq!(next_user_id(users.iter().take(1)), Some(4));
    }

    #[test]
    fn test_next_user_id_handles_negative_and_max_ids() {
        assert_eq!(next_user_id(&[user(-5, "a", "p")]), Some(1));
        assert_eq!(next_user_id(&[user(i64::MAX, "a", "p")]), None);
    }

    #[test]
    fn test_rating_accepts_object_or_score() {
        let detailed: Rating = serde_json::from_str(r#"{"rate":4.5,"count":120}"#).unwrap();
        assert_eq!(detailed, Rating { rate: 4.5, count: 120 });

        let score: Rating = serde_json::from_str("4.94").unwrap();
        assert_eq!(score.rate, 4.94);
        assert_eq!(score.count, 0);
    }

    #[test]
    fn test_sparse_product_defaults() {
        let product: Product =
            serde_json::from_str(r#"{"id":5,"title":"Lamp","price":19.5}"#).unwrap();
        assert_eq!(product.id, 5);
        assert_eq!(product.price().cents(), 1950);
        assert!(product.tags.is_empty());
        assert_eq!(product.display_image(), None);
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_camel_case_fields() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"discountPercentage":10.0,"price":20.0,"minimumOrderQuantity":2,
                "availabilityStatus":"In Stock","image":"legacy.png"}"#,
        )
        .unwrap();
        assert_eq!(product.minimum_order_quantity, 2);
        assert_eq!(product.availability_status, "In Stock");
        assert_eq!(product.discounted_price().cents(), 1800);
        assert_eq!(product.display_image(), Some("legacy.png"));
    }

    #[test]
    fn test_matches_search() {
        let product = Product {
            tags: vec!["Beauty".to_string()],
            ..serde_json::from_str::<Product>(
                r#"{"id":1,"title":"Essence Mascara","brand":"Essence","category":"beauty"}"#,
            )
            .unwrap()
        };
        assert!(product.matches_search(""));
        assert!(product.matches_search("mascara"));
        assert!(product.matches_search("essence"));
        assert!(!product.matches_search("lipstick"));
    }

    #[test]
    fn test_fixture_sections_default_to_empty() {
        let fixture = Fixture::from_json("{}").unwrap();
        assert!(fixture.users.is_empty());
        assert!(fixture.products.is_empty());
    }
}
