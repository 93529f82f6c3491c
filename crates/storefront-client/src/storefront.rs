//! # Storefront
//!
//! Wires the fixture, the key-value store and the three services together,
//! and owns the one flow that spans them: putting a product in the cart.
//!
//! ```text
//!   StorefrontConfig
//!         │ open
//!         ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │ Storefront                                                │
//! │                                                           │
//! │  Arc<dyn FixtureSource> ──┬──► SessionManager             │
//! │                           └──► CatalogStore               │
//! │  Arc<dyn KeyValueStore> ──┬──► SessionManager             │
//! │                           └──► CartLedger                 │
//! └───────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use storefront_core::{CartItem, CartTotals, CoreError};
use storefront_store::{JsonFileStore, KeyValueStore, MemoryStore};
use tracing::{debug, info};

use crate::catalog::CatalogStore;
use crate::config::{StorageBackend, StorefrontConfig};
use crate::error::{ClientError, ClientResult};
use crate::fixture::{FileFixture, FixtureSource};
use crate::ledger::CartLedger;
use crate::session::{Navigator, NoOpNavigator, SessionManager};

pub struct Storefront {
    session: SessionManager,
    catalog: CatalogStore,
    ledger: CartLedger,
}

impl Storefront {
    /// Builds the services described by `config`.
    pub fn open(config: &StorefrontConfig) -> ClientResult<Self> {
        config.validate()?;

        let fixture: Arc<dyn FixtureSource> = Arc::new(FileFixture::new(&config.fixture.path));
        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => Arc::new(JsonFileStore::open(&config.storage.path)?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        };

        info!(
            fixture = %fixture.describe(),
            backend = %config.storage.backend,
            "Opening storefront"
        );
        Ok(Self::from_parts(fixture, store, Arc::new(NoOpNavigator)))
    }

    pub fn from_parts(
        fixture: Arc<dyn FixtureSource>,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Storefront {
            session: SessionManager::with_navigator(fixture.clone(), store.clone(), navigator),
            catalog: CatalogStore::new(fixture),
            ledger: CartLedger::open(store),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    /// Adds one unit of a catalog product to the cart.
    ///
    /// Requires a signed-in user.
    pub async fn add_product_to_cart(&self, product_id: i64) -> ClientResult<CartTotals> {
        if !self.session.is_authenticated() {
            debug!(product_id, "Add to cart refused: not signed in");
            return Err(ClientError::NotAuthenticated);
        }

        let product = self
            .catalog
            .find_by_id(product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(product_id))?;

        self.ledger
            .add_to_cart(CartItem::from_product(&product, 1))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::StaticFixture;
    use storefront_core::MAX_UNIT_PRICE_CENTS;

    const DOC: &str = r#"{
        "users": [{"id":1,"email":"a@x.com","password":"p","name":"A"}],
        "products": [
            {"id":10,"title":"Lamp","price":19.99,"thumbnail":"lamp-thumb.png"},
            {"id":11,"title":"Chair","price":50,"image":"chair.png"}
        ]
    }"#;

    fn storefront(store: Arc<MemoryStore>) -> Storefront {
        Storefront::from_parts(
            Arc::new(StaticFixture::from_json(DOC).unwrap()),
            store,
            Arc::new(NoOpNavigator),
        )
    }

    #[tokio::test]
    async fn test_add_requires_login() {
        let shop = storefront(Arc::new(MemoryStore::new()));

        let err = shop.add_product_to_cart(10).await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
        assert!(shop.ledger().items().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_builds_line_from_product() {
        let shop = storefront(Arc::new(MemoryStore::new()));
        shop.session().authenticate("a@x.com", "p").await.unwrap();

        shop.add_product_to_cart(10).await.unwrap();
        shop.add_product_to_cart(11).await.unwrap();
        let totals = shop.add_product_to_cart(10).await.unwrap();

        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.subtotal.cents(), 19_99 * 2 + 50_00);

        let items = shop.ledger().items().await;
        assert_eq!(items[0].name, "Lamp");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].image.as_deref(), Some("lamp-thumb.png"));
        assert_eq!(items[1].image.as_deref(), Some("chair.png"));
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let shop = storefront(Arc::new(MemoryStore::new()));
        shop.session().authenticate("a@x.com", "p").await.unwrap();

        let err = shop.add_product_to_cart(404).await.unwrap_err();
        assert!(matches!(err, ClientError::Core(CoreError::ProductNotFound(404))));
    }

    #[tokio::test]
    async fn test_absurd_fixture_price_is_capped() {
        let doc = r#"{
            "users": [{"id":1,"email":"a@x.com","password":"p","name":"A"}],
            "products": [{"id":1,"title":"Yacht","price":1e300}]
        }"#;
        let shop = Storefront::from_parts(
            Arc::new(StaticFixture::from_json(doc).unwrap()),
            Arc::new(MemoryStore::new()),
            Arc::new(NoOpNavigator),
        );
        shop.session().authenticate("a@x.com", "p").await.unwrap();

        shop.add_product_to_cart(1).await.unwrap();
        let totals = shop.add_product_to_cart(1).await.unwrap();

        assert_eq!(totals.total_quantity, 2);
        assert_eq!(totals.subtotal.cents(), MAX_UNIT_PRICE_CENTS * 2);
        assert_eq!(shop.ledger().totals().await, totals);
    }

    #[tokio::test]
    async fn test_open_with_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let fixture_path = dir.path().join("db.json");
        std::fs::write(&fixture_path, DOC).unwrap();

        let mut config = StorefrontConfig::in_memory(&fixture_path);
        config.storage.backend = StorageBackend::File;
        config.storage.path = dir.path().join("state").join("storage.json");

        {
            let shop = Storefront::open(&config).unwrap();
            shop.session().authenticate("a@x.com", "p").await.unwrap();
            shop.add_product_to_cart(11).await.unwrap();
        }

        let shop = Storefront::open(&config).unwrap();
        assert_eq!(shop.session().current_session_id(), Some(1));
        assert_eq!(shop.ledger().totals().await.total_quantity, 1);
        assert_eq!(shop.catalog().list_products().await.unwrap().len(), 2);
    }
}
