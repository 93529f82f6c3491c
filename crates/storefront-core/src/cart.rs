//! # Cart
//!
//! The cart ledger: line items keyed by product id.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action            Ledger Call             Cart Change           │
//! │  ─────────────            ───────────             ───────────           │
//! │                                                                         │
//! │  "Add to cart" ─────────► add_item() ──────────► push or qty += n      │
//! │                                                                         │
//! │  Change Quantity ───────► update_quantity() ───► line.qty = n          │
//! │                                                                         │
//! │  Click Remove ──────────► remove_item() ───────► line removed          │
//! │                                                                         │
//! │  Checkout / Clear ──────► clear() ─────────────► lines cleared         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Authorization is not checked here. Callers gate on the session first.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_quantity, validate_unit_price};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// A line in the cart.
///
/// Name, price and image are frozen when the line is created so the cart
/// keeps rendering the same values even if the catalog changes underneath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Product id; the identity key of the line.
    pub id: i64,
    pub name: String,
    /// Unit price.
    pub price: Money,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Builds a line from a catalog product: title becomes the name, the
    /// listed (undiscounted) price is frozen, thumbnail preferred as image.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            id: product.id,
            name: product.title.clone(),
            price: product.price(),
            quantity,
            image: product.display_image().map(str::to_string),
            added_at: Utc::now(),
        }
    }

    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product `id` (adding the same product again
///   increases its quantity)
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    items: Vec<CartItem>,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a line, merging into an existing line with the same id.
    ///
    /// The cart is left untouched when this returns an error.
    pub fn add_item(&mut self, item: CartItem) -> CoreResult<()> {
        validate_quantity(item.quantity)?;
        validate_unit_price(item.price)?;

        if let Some(line) = self.items.iter_mut().find(|l| l.id == item.id) {
            let merged = line.quantity + item.quantity;
            if merged > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = merged;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Sets a line's quantity. Zero removes the line.
    pub fn update_quantity(&mut self, id: i64, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(id).map(|_| ());
        }
        validate_quantity(quantity)?;

        let line = self
            .items
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(CoreError::ItemNotInCart(id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line and returns it.
    pub fn remove_item(&mut self, id: i64) -> CoreResult<CartItem> {
        let pos = self
            .items
            .iter()
            .position(|l| l.id == id)
            .ok_or(CoreError::ItemNotInCart(id))?;
        Ok(self.items.remove(pos))
    }

    /// Checks the invariants on a cart that did not come from `add_item`,
    /// such as one decoded from storage.
    pub fn validate(&self) -> CoreResult<()> {
        if self.items.len() > MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for line in &self.items {
            validate_quantity(line.quantity)?;
            validate_unit_price(line.price)?;
            if !seen.insert(line.id) {
                return Err(ValidationError::Duplicate {
                    field: "cart line".to_string(),
                    value: line.id.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&CartItem> {
        self.items.iter().find(|l| l.id == id)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}
