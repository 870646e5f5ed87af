//! Backend API Gateway
//!
//! Uniform call path against the Krushi Mitra REST backend: bearer token
//! injection, option merging, and failure normalization, plus the
//! normalized request/response schema.

mod client;
mod types;

pub use client::{ApiClient, ApiError};
pub use types::{
    Answer, CropFilter, CropRecommendation, ForgotPasswordRequest, GovernmentScheme, LoginRequest,
    MarketPrice, NewAnswer, NewQuestion, PendingExpert, PersonRef, ProductListing, Question,
    RegisterRequest, WeatherReport,
};
