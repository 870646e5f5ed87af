//! Q&A Forum Page
//!
//! Public questions with their answer threads.

use crate::advisory::{AdvisoryClient, AdvisoryError};

use super::{heading, short_date};

pub async fn render(client: &AdvisoryClient) -> Result<(), AdvisoryError> {
    let questions = client.public_questions().await;
    heading("Questions & Answers");

    if questions.data.is_empty() {
        println!("No questions yet. Ask the first one with `krushi ask`.");
        return Ok(());
    }

    for q in &questions.data {
        let farmer = q
            .farmer
            .as_ref()
            .map(|f| f.full_name())
            .unwrap_or_else(|| "Anonymous".to_string());
        println!();
        println!("#{} {} ({}, {})", q.id, q.title, farmer, short_date(q.created_at.as_deref()));

        let answers = client.answers_for(q.id).await;
        if answers.data.is_empty() {
            println!("    (no answers yet)");
        }
        for answer in &answers.data {
            let expert = answer
                .expert
                .as_ref()
                .map(|e| e.full_name())
                .unwrap_or_else(|| "Expert".to_string());
            println!("    {}: {}", expert, answer.content);
        }
    }

    Ok(())
}
