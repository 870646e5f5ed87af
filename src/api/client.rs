//! Krushi Mitra REST API Client
//!
//! The single call path for the backend. Every request reads the stored
//! session and, when one exists, attaches its bearer token; every failure
//! is normalized into [`ApiError`] so callers only ever see a status and
//! a message, never a raw transport error.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::session::{Session, SessionStore};

use super::types::{
    Answer, CropFilter, CropRecommendation, ForgotPasswordRequest, GovernmentScheme, LoginRequest,
    MarketPrice, NewAnswer, NewQuestion, PendingExpert, ProductListing, Question, RegisterRequest,
    WeatherReport,
};

/// HTTP client for the Krushi Mitra backend
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a new client against `config.base_url`.
    pub fn new(config: &ApiConfig, store: Arc<SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
        }
    }

    /// Base request for `endpoint` with defaults applied.
    ///
    /// The bearer credential is attached only when a session exists; an
    /// empty or malformed header is never sent. Caller options layered on
    /// top of the returned builder win key-by-key, including headers.
    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint.trim());
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.store.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and parse the JSON body.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Network error".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(ApiError::from_transport)
    }

    /// Send a request whose response body the caller does not use.
    async fn send_unit(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let _: serde_json::Value = self.send(builder).await?;
        Ok(())
    }

    // ============================================
    // Authentication
    // ============================================

    pub async fn login(&self, request: &LoginRequest) -> Result<Session, ApiError> {
        self.send(self.request(Method::POST, "/auth/login").json(request))
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Session, ApiError> {
        self.send(self.request(Method::POST, "/auth/register").json(request))
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.send_unit(
            self.request(Method::POST, "/auth/forgot-password")
                .json(&request),
        )
        .await
    }

    // ============================================
    // Forum
    // ============================================

    pub async fn public_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.send(self.request(Method::GET, "/questions/public")).await
    }

    pub async fn all_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.send(self.request(Method::GET, "/questions")).await
    }

    pub async fn create_question(&self, question: &NewQuestion) -> Result<(), ApiError> {
        self.send_unit(self.request(Method::POST, "/questions").json(question))
            .await
    }

    pub async fn answers_for(&self, question_id: u64) -> Result<Vec<Answer>, ApiError> {
        let endpoint = format!("/answers/question/{}", question_id);
        self.send(self.request(Method::GET, &endpoint)).await
    }

    pub async fn create_answer(&self, answer: &NewAnswer) -> Result<(), ApiError> {
        self.send_unit(self.request(Method::POST, "/answers").json(answer))
            .await
    }

    // ============================================
    // Advisory data
    // ============================================

    pub async fn crops(&self) -> Result<Vec<CropRecommendation>, ApiError> {
        self.send(self.request(Method::GET, "/crops")).await
    }

    pub async fn crop_recommendations(
        &self,
        filter: &CropFilter,
    ) -> Result<Vec<CropRecommendation>, ApiError> {
        let mut query = vec![
            ("season", filter.season.clone()),
            ("soilType", filter.soil_type.clone()),
        ];
        if let Some(climate) = &filter.climate {
            query.push(("climate", climate.clone()));
        }
        self.send(
            self.request(Method::GET, "/crops/recommendations")
                .query(&query),
        )
        .await
    }

    pub async fn market_prices(&self, commodity: Option<&str>) -> Result<Vec<MarketPrice>, ApiError> {
        let mut builder = self.request(Method::GET, "/market-prices");
        if let Some(commodity) = commodity {
            builder = builder.query(&[("commodityName", commodity)]);
        }
        self.send(builder).await
    }

    pub async fn weather(&self, city: &str) -> Result<WeatherReport, ApiError> {
        let endpoint = format!("/weather/current/{}", urlencoding::encode(city));
        self.send(self.request(Method::GET, &endpoint)).await
    }

    pub async fn public_schemes(&self) -> Result<Vec<GovernmentScheme>, ApiError> {
        self.send(self.request(Method::GET, "/government-schemes/public"))
            .await
    }

    pub async fn public_products(&self) -> Result<Vec<ProductListing>, ApiError> {
        self.send(self.request(Method::GET, "/product-listings/public"))
            .await
    }

    // ============================================
    // Expert approval
    // ============================================

    pub async fn pending_experts(&self) -> Result<Vec<PendingExpert>, ApiError> {
        self.send(self.request(Method::GET, "/users/experts/pending"))
            .await
    }

    pub async fn approve_expert(&self, id: u64) -> Result<(), ApiError> {
        let endpoint = format!("/users/experts/{}/approve", id);
        self.send_unit(self.request(Method::POST, &endpoint)).await
    }
}

/// Failure body shape used by the backend on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when calling the backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend could not be reached at all.
    #[error("Backend unreachable")]
    Unavailable,

    /// The request did not complete within the configured timeout.
    #[error("Request timeout")]
    Timeout,

    /// Transport-level failure other than connect/timeout.
    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else if error.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(error)
        }
    }

    /// Whether the failure indicates the backend is unusable rather than
    /// a deliberate rejection. Write paths fabricate local results only
    /// for degradable failures; rejections propagate to the user.
    pub fn is_degradable(&self) -> bool {
        !matches!(self, ApiError::Api { .. })
    }
}
