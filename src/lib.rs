//! # Krushi Mitra Client
//!
//! Client-side core of the Krushi Mitra agricultural advisory platform:
//! session management, a bearer-token gateway over the REST backend, and
//! an offline fallback that substitutes a fixed synthetic dataset once
//! the backend has been observed to be unreachable.
//!
//! ## Modules
//!
//! - [`session`]: durable session store and the offline registration ledger
//! - [`api`]: HTTP gateway and the normalized wire schema
//! - [`advisory`]: session-aware operations with live-to-offline fallback
//! - [`pages`]: terminal renderers for the application's pages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use krushi_mitra::advisory::AdvisoryClient;
//! use krushi_mitra::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = AdvisoryClient::new(&config)?;
//!
//!     // Reads degrade to the offline dataset when the backend is down.
//!     let schemes = client.schemes().await;
//!     println!("{} schemes ({:?})", schemes.data.len(), schemes.source);
//!
//!     Ok(())
//! }
//! ```

pub mod advisory;
pub mod api;
pub mod config;
pub mod mock;
pub mod pages;
pub mod session;
pub mod validate;

// Re-export top-level types for convenience
pub use advisory::{AdvisoryClient, AdvisoryError, DataSource, Fetched, LoginInput, RegisterInput, RuntimeMode};

pub use api::{
    ApiClient, ApiError, CropFilter, CropRecommendation, GovernmentScheme, MarketPrice,
    PendingExpert, ProductListing, Question, WeatherReport,
};

pub use config::{Config, ConfigError};

pub use pages::Page;

pub use session::{Role, Session, SessionError, SessionStore, UserProfile};
