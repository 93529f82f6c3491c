//! # Fixture Sources
//!
//! The static document that stands in for a backend: users for credential
//! checks, products for the catalog.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │  FileFixture         │        │  StaticFixture       │
//! │  (tokio::fs read)    │        │  (already in memory) │
//! └──────────┬───────────┘        └──────────┬───────────┘
//!            │   impl FixtureSource          │
//!            └──────────────┬────────────────┘
//!                           ▼
//!              SessionManager / CatalogStore
//! ```
//!
//! Every `load` is a fresh fetch. Callers that want replay semantics cache
//! the result themselves (see `CatalogStore`).

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use storefront_core::Fixture;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Something that can produce the fixture document.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Fetches and decodes the whole document.
    async fn load(&self) -> ClientResult<Fixture>;

    /// Short label used in logs and error messages.
    fn describe(&self) -> String;
}

// =============================================================================
// File
// =============================================================================

/// Reads the fixture from a JSON file on every load.
#[derive(Debug, Clone)]
pub struct FileFixture {
    path: PathBuf,
}

impl FileFixture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileFixture { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl FixtureSource for FileFixture {
    async fn load(&self) -> ClientResult<Fixture> {
        debug!(path = ?self.path, "Reading fixture");

        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ClientError::FixtureUnavailable {
                source_name: self.describe(),
                reason: e.to_string(),
            }
        })?;

        Fixture::from_json(&contents).map_err(|e| ClientError::FixtureMalformed {
            source_name: self.describe(),
            reason: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// A fixture held in memory. Loads hand out clones.
#[derive(Debug, Clone, Default)]
pub struct StaticFixture {
    fixture: Arc<Fixture>,
}

impl StaticFixture {
    pub fn new(fixture: Fixture) -> Self {
        StaticFixture {
            fixture: Arc::new(fixture),
        }
    }

    /// Parses a JSON document up front.
    pub fn from_json(json: &str) -> ClientResult<Self> {
        let fixture = Fixture::from_json(json).map_err(|e| ClientError::FixtureMalformed {
            source_name: "<static>".into(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(fixture))
    }
}

#[async_trait]
impl FixtureSource for StaticFixture {
    async fn load(&self) -> ClientResult<Fixture> {
        Ok(self.fixture.as_ref().clone())
    }

    fn describe(&self) -> String {
        "<static>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "users": [{"id":1,"email":"a@x.com","password":"p","name":"A"}],
        "products": [{"id":1,"title":"Mascara","category":"beauty","price":9.99}]
    }"#;

    #[tokio::test]
    async fn test_file_fixture_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, DOC).unwrap();

        let fixture = FileFixture::new(&path).load().await.unwrap();
        assert_eq!(fixture.users.len(), 1);
        assert_eq!(fixture.products[0].title, "Mascara");
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileFixture::new(dir.path().join("nope.json"));

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, ClientError::FixtureUnavailable { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[tokio::test]
    async fn test_bad_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{\"users\": [").unwrap();

        let err = FileFixture::new(&path).load().await.unwrap_err();
        assert!(matches!(err, ClientError::FixtureMalformed { .. }));
        assert!(err.is_fixture_error());
    }

    #[tokio::test]
    async fn test_static_fixture() {
        let source = StaticFixture::from_json(DOC).unwrap();
        let fixture = source.load().await.unwrap();
        assert_eq!(fixture.users[0].email, "a@x.com");

        assert!(StaticFixture::from_json("42").is_err());
    }

    #[test]
    fn test_bundled_fixture_parses() {
        let fixture = Fixture::from_json(include_str!("../../../assets/db.json")).unwrap();
        assert!(!fixture.users.is_empty());
        assert!(fixture.products.iter().all(|p| !p.title.is_empty()));
    }
}
