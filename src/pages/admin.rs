//! Admin Page
//!
//! Moderation queue and the pending-expert approval list. The question
//! list is live-only; a load failure is reported inline and the rest of
//! the page still renders.

use crate::advisory::{AdvisoryClient, AdvisoryError};

use super::{heading, short_date};

pub async fn render(client: &AdvisoryClient) -> Result<(), AdvisoryError> {
    heading("All Questions");
    match client.all_questions().await {
        Ok(questions) => {
            for q in &questions.data {
                let farmer = q
                    .farmer
                    .as_ref()
                    .map(|f| f.first_name.clone())
                    .unwrap_or_else(|| "Anonymous".to_string());
                let title: String = q.title.chars().take(60).collect();
                println!(
                    "Q#{:<4} {:<62} ({}, {})",
                    q.id,
                    title,
                    farmer,
                    short_date(q.created_at.as_deref())
                );
            }
        }
        Err(err) => println!("Failed to load questions: {}", err),
    }

    let experts = client.pending_experts().await;
    heading("Pending Experts");
    if experts.data.is_empty() {
        println!("No pending experts");
    }
    for expert in &experts.data {
        println!(
            "#{:<4} {:<22} {} • {}",
            expert.id,
            format!("{} {}", expert.first_name, expert.last_name),
            expert.email,
            expert.username
        );
    }
    if !experts.data.is_empty() {
        println!();
        println!("Approve with: krushi approve-expert <id>");
    }

    Ok(())
}
