//! # Client Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Fixture      │  │    Storage      │  │     Domain              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Unavailable    │  │  Storage(..)    │  │  Core(..)               │ │
//! │  │  Malformed      │  │                 │  │  NotAuthenticated       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │ Configuration   │                                                   │
//! │  │                 │                                                   │
//! │  │  InvalidConfig  │                                                   │
//! │  │  ConfigLoad/Save│                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A lookup that finds nothing is never an error: operations that can miss
//! return `Ok(None)`. Errors mean the answer could not be computed.

use storefront_core::{CoreError, ValidationError};
use storefront_store::StoreError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Fixture Errors
    // =========================================================================
    /// The fixture could not be read at all.
    #[error("Fixture '{source_name}' unavailable: {reason}")]
    FixtureUnavailable { source_name: String, reason: String },

    /// The fixture was read but is not a valid catalog document.
    #[error("Fixture '{source_name}' is malformed: {reason}")]
    FixtureMalformed { source_name: String, reason: String },

    // =========================================================================
    // Storage / Domain Errors
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// The operation requires a signed-in user.
    #[error("Please login to continue")]
    NotAuthenticated,

    /// Every user id is taken.
    #[error("No user id left to allocate")]
    IdsExhausted,

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid storefront configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl ClientError {
    /// True when the static fixture, rather than local state, is at fault.
    pub fn is_fixture_error(&self) -> bool {
        matches!(
            self,
            ClientError::FixtureUnavailable { .. } | ClientError::FixtureMalformed { .. }
        )
    }

    /// True when a persisted value could not be decoded.
    pub fn is_corrupt_storage(&self) -> bool {
        matches!(self, ClientError::Storage(e) if e.is_corrupt())
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, ClientError::Core(CoreError::Validation(_)))
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let fixture = ClientError::FixtureUnavailable {
            source_name: "assets/db.json".into(),
            reason: "No such file".into(),
        };
        assert!(fixture.is_fixture_error());
        assert!(!fixture.is_config_error());

        let corrupt: ClientError = StoreError::corrupt("registeredUsers", "expected array").into();
        assert!(corrupt.is_corrupt_storage());
        assert!(!corrupt.is_fixture_error());

        let invalid: ClientError = ValidationError::required("email").into();
        assert!(invalid.is_validation_error());

        assert!(ClientError::InvalidConfig("x".into()).is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::FixtureMalformed {
            source_name: "db.json".into(),
            reason: "expected value at line 1".into(),
        };
        assert!(err.to_string().contains("db.json"));

        let err: ClientError = CoreError::ProductNotFound(9).into();
        assert_eq!(err.to_string(), "Product not found: 9");
    }
}
