//! # Cart Repository
//!
//! The `cart` key: the whole ledger, rewritten after every change.

use std::sync::Arc;

use storefront_core::Cart;

use super::{read_json, write_json, CART_KEY};
use crate::backend::KeyValueStore;
use crate::error::StoreResult;

#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CartRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        CartRepository { store }
    }

    pub fn load(&self) -> StoreResult<Option<Cart>> {
        read_json(self.store.as_ref(), CART_KEY)
    }

    pub fn save(&self, cart: &Cart) -> StoreResult<()> {
        write_json(self.store.as_ref(), CART_KEY, cart)
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(CART_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use storefront_core::{CartItem, Product};

    #[test]
    fn test_save_and_load_cart() {
        let repo = CartRepository::new(Arc::new(MemoryStore::new()));
        assert_eq!(repo.load().unwrap(), None);

        let lamp: Product =
            serde_json::from_str(r#"{"id":4,"title":"Lamp","price":19.99}"#).unwrap();
        let mut cart = Cart::new();
        cart.add_item(CartItem::from_product(&lamp, 2)).unwrap();

        repo.save(&cart).unwrap();
        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded, cart);
        assert_eq!(loaded.subtotal().cents(), 3998);

        repo.clear().unwrap();
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_cart() {
        let repo = CartRepository::new(Arc::new(MemoryStore::with_entries([(CART_KEY, "42")])));
        assert!(repo.load().unwrap_err().is_corrupt());
    }
}
