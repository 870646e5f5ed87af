//! Schemes Page
//!
//! Government schemes and public product listings.

use crate::advisory::{AdvisoryClient, AdvisoryError};

use super::heading;

pub async fn render(client: &AdvisoryClient) -> Result<(), AdvisoryError> {
    let schemes = client.schemes().await;
    heading("Government Schemes");
    println!(
        "{:<20} {:<12} {:<25} {}",
        "Scheme", "Department", "Benefit", "Status"
    );
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

    let products = client.products().await;
    heading("Products");
    for product in &products.data {
        let seller = product
            .farmer
            .as_ref()
            .map(|f| f.full_name())
            .unwrap_or_else(|| "Farmer".to_string());
        println!(
            "{:<22} ₹{:<10} {:<40} By: {}",
            product.name,
            product.price.as_deref().unwrap_or("Contact for price"),
            product.description,
            seller
        );
    }

    Ok(())
}
