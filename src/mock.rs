//! Offline Dataset
//!
//! Fixed synthetic snapshot substituted for live data once the backend
//! has been observed to be unreachable, plus fabrication of locally
//! plausible auth results for offline logins and registrations.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::api::{
    Answer, CropRecommendation, GovernmentScheme, MarketPrice, PendingExpert, PersonRef,
    ProductListing, Question, WeatherReport,
};
use crate::session::{Role, Session, UserProfile};

/// The read-only synthetic snapshot. Every accessor returns a fresh copy
/// so callers can mutate their view (the admin page removes approved
/// experts from its list) without touching the dataset itself.
#[derive(Debug, Default)]
pub struct MockDataset;

impl MockDataset {
    pub fn questions(&self) -> Vec<Question> {
        let now = Utc::now();
        vec![
            question(
                1,
                "Best time to sow wheat for higher yield?",
                "Rajesh",
                "Patel",
                now.to_rfc3339(),
            ),
            question(
                2,
                "How to treat leaf rust in wheat?",
                "Anita",
                "Deshmukh",
                (now - Duration::days(1)).to_rfc3339(),
            ),
            question(
                3,
                "Drip irrigation schedule for tomatoes?",
                "Vikas",
                "Yadav",
                (now - Duration::days(2)).to_rfc3339(),
            ),
        ]
    }

    pub fn answers_for(&self, question_id: u64) -> Vec<Answer> {
        match question_id {
            1 => vec![answer(11, "Sow in Nov 15 - Dec 15 for Rabi in MH.", "Priya", "Sharma")],
            2 => vec![answer(
                12,
                "Use rust-resistant varieties and balanced NPK.",
                "Amit",
                "Kulkarni",
            )],
            3 => vec![answer(
                13,
                "1-1.5 L/hr emitters, 45-60 mins alternate days.",
                "Neha",
                "Joshi",
            )],
            _ => Vec::new(),
        }
    }

    pub fn recommendations(&self) -> Vec<CropRecommendation> {
        vec![
            crop("Wheat (HD-2967)", "High yield; sow in Nov-Dec; spacing 20 cm."),
            crop(
                "Paddy (IR-64)",
                "Suitable for irrigated areas; transplant after 25-30 days.",
            ),
        ]
    }

    pub fn schemes(&self) -> Vec<GovernmentScheme> {
        vec![
            scheme("PM-KISAN", "GoI", "₹6,000/year"),
            scheme("Soil Health Card", "GoI", "Free soil testing"),
        ]
    }

    pub fn market_prices(&self) -> Vec<MarketPrice> {
        vec![
            price("Wheat", "2,250/qtl", "Nagpur"),
            price("Soybean", "4,450/qtl", "Akola"),
            price("Mustard", "5,200/qtl", "Jaipur"),
        ]
    }

    pub fn weather(&self) -> WeatherReport {
        WeatherReport {
            city: "Nagpur, MH".to_string(),
            country: Some("India".to_string()),
            temperature: Some(30.0),
            humidity: None,
            wind_speed: None,
            condition: "Partly Cloudy".to_string(),
        }
    }

    pub fn products(&self) -> Vec<ProductListing> {
        vec![
            product("Bio-fertilizer A", "499", "Improves soil health, eco-friendly."),
            product("Organic Pesticide B", "299", "Targets common pests safely."),
            product("Seed Kit C", "199", "High-germination seasonal seeds."),
        ]
    }

    pub fn pending_experts(&self) -> Vec<PendingExpert> {
        vec![
            expert(101, "Dr. Kavita", "Rao", "kavita@example.com", "kavita.rao"),
            expert(102, "Dr. Ramesh", "Iyer", "ramesh@example.com", "ramesh.iyer"),
        ]
    }
}

/// Fabricate a locally plausible session for an offline login or
/// registration. The token is recognizably synthetic.
pub fn mock_session(email: &str, first_name: &str, last_name: &str, role: Role) -> Session {
    Session {
        token: format!("mock-jwt-token-{}", Uuid::new_v4().simple()),
        user: UserProfile {
            id: Utc::now().timestamp_millis() as u64,
            username: email.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role,
        },
    }
}

fn question(id: u64, title: &str, first: &str, last: &str, created_at: String) -> Question {
    Question {
        id,
        title: title.to_string(),
        content: None,
        category: Some("General".to_string()),
        farmer: Some(PersonRef {
            first_name: first.to_string(),
            last_name: last.to_string(),
        }),
        created_at: Some(created_at),
    }
}

fn answer(id: u64, content: &str, first: &str, last: &str) -> Answer {
    Answer {
        id,
        content: content.to_string(),
        expert: Some(PersonRef {
            first_name: first.to_string(),
            last_name: last.to_string(),
        }),
    }
}

fn crop(name: &str, description: &str) -> CropRecommendation {
    CropRecommendation {
        name: name.to_string(),
        description: description.to_string(),
        season: None,
        soil_type: None,
        climate: None,
        growth_duration: None,
        yield_per_hectare: None,
    }
}

fn scheme(name: &str, department: &str, benefit: &str) -> GovernmentScheme {
    GovernmentScheme {
        name: name.to_string(),
        department: Some(department.to_string()),
        benefit: Some(benefit.to_string()),
        description: None,
        category: None,
        eligibility: None,
        deadline: None,
        is_active: true,
    }
}

fn price(commodity: &str, amount: &str, market: &str) -> MarketPrice {
    MarketPrice {
        commodity: commodity.to_string(),
        price: amount.to_string(),
        market: market.to_string(),
        unit: Some("quintal".to_string()),
        district: None,
        state: None,
        date: None,
    }
}

fn product(name: &str, amount: &str, description: &str) -> ProductListing {
    ProductListing {
        name: name.to_string(),
        description: description.to_string(),
        price: Some(amount.to_string()),
        quantity: None,
        unit: None,
        location: None,
        contact_number: None,
        contact_email: None,
        farmer: None,
    }
}

fn expert(id: u64, first: &str, last: &str, email: &str, username: &str) -> PendingExpert {
    PendingExpert {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        username: username.to_string(),
        expertise: None,
        qualifications: None,
    }
}
