//! # Cart Ledger
//!
//! The persisted shopping cart.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Caller                     Ledger                  Storage (`cart`)    │
//! │  ──────                     ──────                  ────────────────    │
//! │                                                                         │
//! │  add_to_cart(item) ───────► merge by id ──────────► rewrite             │
//! │  update_quantity(id, n) ──► set / remove on 0 ────► rewrite             │
//! │  remove(id) ──────────────► drop line ────────────► rewrite             │
//! │  clear() ─────────────────► empty ────────────────► remove key          │
//! │  items() / totals() ──────► (read only)                                 │
//! │                                                                         │
//! │  Every change is applied to a copy, written, then swapped in. A        │
//! │  failed write leaves the in-memory cart as it was.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger does not check who is signed in; that is the caller's job.

use std::sync::Arc;

use storefront_core::{Cart, CartItem, CartTotals};
use storefront_store::{CartRepository, KeyValueStore};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

pub struct CartLedger {
    cart: Mutex<Cart>,
    repo: CartRepository,
}

impl CartLedger {
    /// Opens the ledger and restores the cart persisted in `store`.
    ///
    /// An unreadable cart, or one that breaks the cart limits, is logged
    /// and replaced by an empty one.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let repo = CartRepository::new(store);

        let cart = match repo.load() {
            Ok(Some(cart)) => match cart.validate() {
                Ok(()) => {
                    debug!(lines = cart.item_count(), "Restored cart from storage");
                    cart
                }
                Err(e) => {
                    warn!(error = %e, "Stored cart breaks cart limits, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to restore cart, starting empty");
                Cart::new()
            }
        };

        CartLedger {
            cart: Mutex::new(cart),
            repo,
        }
    }

    /// Adds a line, merging quantities when the product is already present.
    pub async fn add_to_cart(&self, item: CartItem) -> ClientResult<CartTotals> {
        let product_id = item.id;
        let quantity = item.quantity;

        let totals = self.apply(|cart| cart.add_item(item)).await?;

        info!(product_id, quantity, lines = totals.item_count, "Added to cart");
        Ok(totals)
    }

    /// Sets a line's quantity; zero removes it.
    pub async fn update_quantity(&self, id: i64, quantity: i64) -> ClientResult<CartTotals> {
        let totals = self
            .apply(|cart| cart.update_quantity(id, quantity))
            .await?;
        debug!(product_id = id, quantity, "Cart quantity updated");
        Ok(totals)
    }

    /// Removes a line and returns it.
    pub async fn remove(&self, id: i64) -> ClientResult<CartItem> {
        let mut guard = self.cart.lock().await;
        let mut next = guard.clone();
        let removed = next.remove_item(id)?;

        self.repo.save(&next)?;
        *guard = next;

        debug!(product_id = id, "Removed from cart");
        Ok(removed)
    }

    pub async fn clear(&self) -> ClientResult<()> {
        let mut guard = self.cart.lock().await;
        self.repo.clear()?;
        guard.clear();

        info!("Cart cleared");
        Ok(())
    }

    /// Snapshot of the current lines.
    pub async fn items(&self) -> Vec<CartItem> {
        self.cart.lock().await.items().to_vec()
    }

    pub async fn totals(&self) -> CartTotals {
        CartTotals::from(&*self.cart.lock().await)
    }

    /// Runs a change on a copy of the cart, persists it, then commits.
    async fn apply<F, E>(&self, change: F) -> ClientResult<CartTotals>
    where
        F: FnOnce(&mut Cart) -> Result<(), E>,
        ClientError: From<E>,
    {
        let mut guard = self.cart.lock().await;
        let mut next = guard.clone();
        change(&mut next)?;

        self.repo.save(&next)?;
        *guard = next;

        Ok(CartTotals::from(&*guard))
    }
}
