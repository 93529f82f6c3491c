//! # Session Manager
//!
//! Who is signed in, and how they got there.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │      ┌─────────────┐   authenticate (match)   ┌─────────────────┐      │
//! │      │  ANONYMOUS  │ ───────────────────────► │  AUTHENTICATED  │      │
//! │      │             │ ◄─────────────────────── │                 │◄──┐  │
//! │      └──────┬──────┘          logout          └────────┬────────┘   │  │
//! │             │ ▲                                        │            │  │
//! │             └─┘ logout                                 └────────────┘  │
//! │          (clears storage,                     authenticate (match)     │
//! │           still navigates)                    replaces the user        │
//! │                                                                         │
//! │  A failed authenticate never changes state.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Credential Lookup
//! ```text
//! email + password
//!       │
//!       ▼
//! ┌───────────────┐  match   ┌──────────────────────────────────────┐
//! │ fixture users │ ───────► │ strip password, persist currentUser, │
//! └───────┬───────┘          │ publish on the watch channel         │
//!         │ no match         └──────────────────────────────────────┘
//!         ▼                                  ▲
//! ┌──────────────────┐  match                │
//! │ registeredUsers  │ ──────────────────────┘
//! └───────┬──────────┘
//!         │ no match
//!         ▼
//!     Ok(None)
//! ```
//!
//! The session lives in exactly one place in memory: the value inside the
//! `watch` channel. `current_session` reads it, `subscribe` hands out
//! receivers for it.

use std::sync::Arc;

use storefront_core::validation::validate_new_user;
use storefront_core::{next_user_id, NewUser, SessionUser, User, ValidationError};
use storefront_store::{KeyValueStore, SessionRepository, UserRepository};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::fixture::FixtureSource;

// =============================================================================
// Navigation
// =============================================================================

/// Side effects the session manager asks the surrounding UI to perform.
pub trait Navigator: Send + Sync {
    /// Leave the current view for the login screen.
    fn navigate_to_login(&self);
}

/// Navigator for headless use. Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNavigator;

impl Navigator for NoOpNavigator {
    fn navigate_to_login(&self) {}
}

// =============================================================================
// Session Manager
// =============================================================================

pub struct SessionManager {
    fixture: Arc<dyn FixtureSource>,
    users: UserRepository,
    sessions: SessionRepository,
    navigator: Arc<dyn Navigator>,
    session_tx: watch::Sender<Option<SessionUser>>,
    /// Serializes id allocation and the registered-user append.
    register_lock: Mutex<()>,
}

impl SessionManager {
    /// Creates a manager that never navigates.
    pub fn new(fixture: Arc<dyn FixtureSource>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_navigator(fixture, store, Arc::new(NoOpNavigator))
    }

    /// Creates a manager and restores any session persisted in `store`.
    pub fn with_navigator(
        fixture: Arc<dyn FixtureSource>,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let users = UserRepository::new(store.clone());
        let sessions = SessionRepository::new(store);
        let restored = Self::rehydrate(&sessions);
        let (session_tx, _) = watch::channel(restored);

        SessionManager {
            fixture,
            users,
            sessions,
            navigator,
            session_tx,
            register_lock: Mutex::new(()),
        }
    }

    fn rehydrate(sessions: &SessionRepository) -> Option<SessionUser> {
        match sessions.load() {
            Ok(Some(user)) => {
                info!(user_id = user.id, "Restored session from storage");
                Some(user)
            }
            Ok(None) => None,
            Err(e) if e.is_corrupt() => {
                warn!(error = %e, "Discarding unreadable session");
                if let Err(e) = sessions.clear() {
                    warn!(error = %e, "Failed to remove unreadable session");
                }
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read session, starting anonymous");
                None
            }
        }
    }

    // =========================================================================
    // Credential Source
    // =========================================================================

    /// Fetches the fixture's user list. No retry.
    pub async fn fetch_credential_source(&self) -> ClientResult<Vec<User>> {
        let fixture = self.fixture.load().await?;
        debug!(
            source = %self.fixture.describe(),
            users = fixture.users.len(),
            "Fetched credential source"
        );
        Ok(fixture.users)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Signs in with exact email and password.
    ///
    /// Fixture users are checked first, then registered users. Resolves to
    /// `Ok(None)` when neither list has a match; the existing session, if
    /// any, is left as it was.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> ClientResult<Option<SessionUser>> {
        let fixture_users = self.fetch_credential_source().await?;

        let found = match fixture_users
            .into_iter()
            .find(|u| u.matches_credentials(email, password))
        {
            Some(user) => Some(user),
            None => self.users.find_by_credentials(email, password)?,
        };

        let Some(user) = found else {
            info!("Authentication failed: no matching credentials");
            return Ok(None);
        };

        let session = user.without_password();
        self.sessions.save(&session)?;
        self.session_tx.send_replace(Some(session.clone()));

        info!(user_id = session.id, "User signed in");
        Ok(Some(session))
    }

    /// Creates an account in the registered-user list.
    ///
    /// Does not sign the new user in.
    pub async fn register(&self, new_user: NewUser) -> ClientResult<User> {
        validate_new_user(&new_user)?;

        let _guard = self.register_lock.lock().await;

        let fixture_users = self.fetch_credential_source().await?;
        let registered = self.users.list()?;
        let existing = || fixture_users.iter().chain(registered.iter());

        if existing().any(|u| u.email == new_user.email) {
            return Err(ValidationError::Duplicate {
                field: "email".to_string(),
                value: new_user.email,
            }
            .into());
        }

        let id = next_user_id(existing()).ok_or(ClientError::IdsExhausted)?;
        let user = new_user.into_user(id);
        self.users.append(user.clone())?;

        info!(user_id = id, "User registered");
        Ok(user)
    }

    /// Ends the session and sends the UI to the login screen.
    ///
    /// Memory is cleared and navigation happens even when removing the
    /// persisted entry fails; that failure is still returned.
    pub fn logout(&self) -> ClientResult<()> {
        let previous = self.session_tx.send_replace(None);
        let cleared = self.sessions.clear();

        match previous {
            Some(user) => info!(user_id = user.id, "User signed out"),
            None => debug!("Logout while anonymous"),
        }

        self.navigator.navigate_to_login();
        cleared.map_err(ClientError::from)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn current_session(&self) -> Option<SessionUser> {
        self.session_tx.borrow().clone()
    }

    pub fn current_session_id(&self) -> Option<i64> {
        self.session_tx.borrow().as_ref().map(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_tx.borrow().is_some()
    }

    /// Receives every session change from now on.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.session_tx.subscribe()
    }
}
