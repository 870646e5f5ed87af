//! Wire Types
//!
//! Request and response shapes for the Krushi Mitra backend, normalized at
//! the API boundary. The backend grew several names for the same field
//! (`price`/`pricePerUnit`/`modalPrice`, `name`/`title`, `tempC`/
//! `temperature`, ...); each response type deserializes through a raw
//! shape that collapses the variants, so nothing past the gateway ever
//! sees an alternative field name.

use serde::{Deserialize, Deserializer, Serialize};

use crate::session::Role;

/// Accept a string or a number and keep the display form.
///
/// Price-like fields arrive as numbers from the live backend and as
/// preformatted strings ("2,250/qtl") in older payloads.
fn opt_display<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }))
}

// ============================================
// Requests
// ============================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_crops: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnswer {
    pub question_id: u64,
    pub content: String,
}

/// Filters for the crop recommendation search.
#[derive(Debug, Clone, Default)]
pub struct CropFilter {
    pub season: String,
    pub soil_type: String,
    pub climate: Option<String>,
}

// ============================================
// Responses
// ============================================

/// Abbreviated reference to a user attached to forum content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub first_name: String,
    pub last_name: String,
}

impl PersonRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A farmer's forum question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub farmer: Option<PersonRef>,
    /// ISO 8601 creation timestamp; kept as text since the backend emits
    /// both zoned and local datetimes.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// An expert's answer to a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub expert: Option<PersonRef>,
}

/// A crop recommendation card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCrop")]
pub struct CropRecommendation {
    pub name: String,
    pub description: String,
    pub season: Option<String>,
    pub soil_type: Option<String>,
    pub climate: Option<String>,
    pub growth_duration: Option<String>,
    pub yield_per_hectare: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCrop {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    season: Option<String>,
    #[serde(default)]
    soil_type: Option<String>,
    #[serde(default)]
    climate: Option<String>,
    #[serde(default, deserialize_with = "opt_display")]
    growth_duration: Option<String>,
    #[serde(default, deserialize_with = "opt_display")]
    yield_per_hectare: Option<String>,
}

impl From<RawCrop> for CropRecommendation {
    fn from(raw: RawCrop) -> Self {
        Self {
            name: raw.name.or(raw.title).unwrap_or_default(),
            description: raw
                .description
                .or(raw.desc)
                .unwrap_or_else(|| "Crop recommendation".to_string()),
            season: raw.season,
            soil_type: raw.soil_type,
            climate: raw.climate,
            growth_duration: raw.growth_duration,
            yield_per_hectare: raw.yield_per_hectare,
        }
    }
}

/// A government support scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawScheme")]
pub struct GovernmentScheme {
    pub name: String,
    pub department: Option<String>,
    pub benefit: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub eligibility: Option<String>,
    pub deadline: Option<String>,
    pub is_active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScheme {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    dept: Option<String>,
    #[serde(default)]
    benefit: Option<String>,
    #[serde(default)]
    benefits: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    eligibility: Option<String>,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
}

impl From<RawScheme> for GovernmentScheme {
    fn from(raw: RawScheme) -> Self {
        Self {
            name: raw.name.or(raw.title).unwrap_or_default(),
            department: raw.department.or(raw.dept),
            benefit: raw.benefit.or(raw.benefits),
            description: raw.description,
            category: raw.category,
            eligibility: raw.eligibility,
            deadline: raw.deadline,
            is_active: raw.is_active.unwrap_or(false),
        }
    }
}

/// A mandi price quote for a commodity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawMarketPrice")]
pub struct MarketPrice {
    pub commodity: String,
    pub price: String,
    pub market: String,
    pub unit: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMarketPrice {
    #[serde(default)]
    commodity_name: Option<String>,
    #[serde(default)]
    commodity: Option<String>,
    #[serde(default, deserialize_with = "opt_display")]
    price: Option<String>,
    #[serde(default, deserialize_with = "opt_display")]
    price_per_unit: Option<String>,
    #[serde(default, deserialize_with = "opt_display")]
    modal_price: Option<String>,
    #[serde(default, deserialize_with = "opt_display")]
    max_price: Option<String>,
    #[serde(default)]
    market_name: Option<String>,
    #[serde(default)]
    mandi: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl From<RawMarketPrice> for MarketPrice {
    fn from(raw: RawMarketPrice) -> Self {
        Self {
            commodity: raw.commodity_name.or(raw.commodity).unwrap_or_default(),
            price: raw
                .price
                .or(raw.price_per_unit)
                .or(raw.modal_price)
                .or(raw.max_price)
                .unwrap_or_else(|| "N/A".to_string()),
            market: raw
                .market_name
                .or(raw.mandi)
                .unwrap_or_else(|| "Local Market".to_string()),
            unit: raw.unit,
            district: raw.district,
            state: raw.state,
            date: raw.date,
        }
    }
}

/// Current conditions for a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawWeather")]
pub struct WeatherReport {
    pub city: String,
    pub country: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub condition: String,
}

#[derive(Deserialize)]
struct RawWeather {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default, rename = "tempC")]
    temp_c: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
    #[serde(default, alias = "windSpeed")]
    wind_speed: Option<f64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    condition: Option<String>,
}

impl From<RawWeather> for WeatherReport {
    fn from(raw: RawWeather) -> Self {
        Self {
            city: raw.city.or(raw.location).unwrap_or_default(),
            country: raw.country,
            temperature: raw.temperature.or(raw.temp_c),
            humidity: raw.humidity,
            wind_speed: raw.wind_speed,
            condition: raw.description.or(raw.condition).unwrap_or_default(),
        }
    }
}

/// A farmer's product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProduct")]
pub struct ProductListing {
    pub name: String,
    pub description: String,
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
    pub farmer: Option<PersonRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default, deserialize_with = "opt_display")]
    price: Option<String>,
    #[serde(default, deserialize_with = "opt_display")]
    price_per_unit: Option<String>,
    #[serde(default, deserialize_with = "opt_display")]
    quantity: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    contact_number: Option<String>,
    #[serde(default)]
    contact_email: Option<String>,
    #[serde(default)]
    farmer: Option<PersonRef>,
}

impl From<RawProduct> for ProductListing {
    fn from(raw: RawProduct) -> Self {
        Self {
            name: raw.product_name.or(raw.name).or(raw.title).unwrap_or_default(),
            description: raw
                .description
                .or(raw.summary)
                .unwrap_or_else(|| "Product listing".to_string()),
            price: raw.price.or(raw.price_per_unit),
            quantity: raw.quantity,
            unit: raw.unit,
            location: raw.location,
            contact_number: raw.contact_number,
            contact_email: raw.contact_email,
            farmer: raw.farmer,
        }
    }
}

/// An expert account awaiting admin approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingExpert {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub expertise: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
}
