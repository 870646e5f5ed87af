//! Advisory Client
//!
//! The facade the pages drive: session-aware operations against the
//! backend with a one-way live-to-offline fallback. The runtime mode is
//! held inside the client rather than in module state, so tests can pin
//! it and callers can observe which path produced each result.
//!
//! Reads on the data-loading paths degrade silently: the first failure
//! flips the client to offline mode for the rest of its lifetime and the
//! fixed synthetic dataset is substituted from then on, without another
//! network attempt. Write-style actions (login, registration,
//! forgot-password) always try the live backend first, even after reads
//! have degraded, and fabricate a local result only when the backend is
//! unreachable; a deliberate rejection such as bad credentials always
//! propagates. Expert approval is the exception and follows the mode,
//! mutating only the caller's list once offline.

mod admin;
mod auth;
mod reads;

pub use auth::{LoginInput, RegisterInput};

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::mock::MockDataset;
use crate::session::{Session, SessionError, SessionStore};
use crate::validate::FieldError;

/// Whether the client still trusts the backend.
///
/// `Live -> Mock` happens at most once per client; there is no
/// transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Live,
    Mock,
}

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Mock,
}

/// A result tagged with the path that produced it, so callers and tests
/// can assert the source instead of inspecting hidden state.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub source: DataSource,
    pub data: T,
}

impl<T> Fetched<T> {
    fn live(data: T) -> Self {
        Self {
            source: DataSource::Live,
            data,
        }
    }

    fn mock(data: T) -> Self {
        Self {
            source: DataSource::Mock,
            data,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.source == DataSource::Mock
    }
}

/// Session-aware client over the backend with offline fallback.
pub struct AdvisoryClient {
    api: ApiClient,
    store: Arc<SessionStore>,
    dataset: MockDataset,
    mode: RwLock<RuntimeMode>,
}

impl AdvisoryClient {
    /// Create a client from configuration, opening the session store at
    /// the configured data directory.
    pub fn new(config: &Config) -> Result<Self, AdvisoryError> {
        Self::with_mode(config, RuntimeMode::Live)
    }

    /// Create a client pinned to an initial mode. Deterministic entry
    /// point for tests and for tooling that knows the backend is down.
    pub fn with_mode(config: &Config, mode: RuntimeMode) -> Result<Self, AdvisoryError> {
        let store = Arc::new(SessionStore::open(&config.storage.data_dir)?);
        Ok(Self {
            api: ApiClient::new(&config.api, Arc::clone(&store)),
            store,
            dataset: MockDataset,
            mode: RwLock::new(mode),
        })
    }

    /// Current runtime mode.
    pub async fn mode(&self) -> RuntimeMode {
        *self.mode.read().await
    }

    pub(crate) async fn is_mock(&self) -> bool {
        self.mode().await == RuntimeMode::Mock
    }

    /// Flip to offline mode after a failed read. Logs once; flipping an
    /// already-degraded client is a no-op.
    pub(crate) async fn degrade(&self, context: &'static str, error: &ApiError) {
        let mut mode = self.mode.write().await;
        if *mode == RuntimeMode::Live {
            tracing::warn!(%error, context, "backend unavailable, switching to offline dataset");
            *mode = RuntimeMode::Mock;
        }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn store(&self) -> &SessionStore {
        &self.store
    }

    pub(crate) fn dataset(&self) -> &MockDataset {
        &self.dataset
    }

    /// The stored identity, if signed in.
    pub fn current_session(&self) -> Option<Session> {
        self.store.get()
    }

    /// Destroy the stored session. The runtime mode is untouched.
    pub fn logout(&self) -> Result<(), AdvisoryError> {
        self.store.clear()?;
        Ok(())
    }
}

/// Errors surfaced by advisory operations
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    /// Client-side field checks failed; no request was made.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// The backend rejected or could not serve the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Offline duplicate registration.
    #[error("This email is already registered. Please login.")]
    DuplicateEmail,

    /// Login succeeded but the account lacks the required role.
    #[error("Access denied. Admin privileges required.")]
    AccessDenied,

    /// The durable session store failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<Vec<FieldError>> for AdvisoryError {
    fn from(errors: Vec<FieldError>) -> Self {
        AdvisoryError::Validation(errors)
    }
}
