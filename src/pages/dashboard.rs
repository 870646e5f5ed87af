//! Dashboard Page
//!
//! Recent questions, crop recommendation cards, and active schemes.

use crate::advisory::{AdvisoryClient, AdvisoryError};

use super::{heading, short_date};

pub async fn render(client: &AdvisoryClient) -> Result<(), AdvisoryError> {
    let questions = client.recent_questions().await;
    heading("Recent Questions");
    if questions.data.is_empty() {
        println!("No questions yet.");
    }
    for q in &questions.data {
        let farmer = q
            .farmer
            .as_ref()
            .map(|f| f.full_name())
            .unwrap_or_else(|| "Anonymous".to_string());
        println!(
            "#{:<4} {:<45} {:<20} {}",
            q.id,
            q.title,
            farmer,
            short_date(q.created_at.as_deref())
        );
    }

    let mut crops = client.crop_recommendations().await;
    crops.data.truncate(6);
    heading("Crop Recommendations");
    for crop in &crops.data {
        println!("{:<20} {}", crop.name, crop.description);
    }

    let schemes = client.schemes().await;
    heading("Government Schemes");
    for scheme in &schemes.data {
        println!(
            "{:<20} {:<12} {:<25} {}",
            scheme.name,
            scheme.department.as_deref().unwrap_or("Government"),
            scheme
                .benefit
                .as_deref()
                .or(scheme.description.as_deref())
                .unwrap_or("See details"),
            if scheme.is_active { "Active" } else { "Inactive" }
        );
    }

    Ok(())
}
