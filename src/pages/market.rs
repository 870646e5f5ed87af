//! Market Page
//!
//! Weather card for the configured city plus current mandi prices.

use crate::advisory::{AdvisoryClient, AdvisoryError};

use super::heading;

pub async fn render(client: &AdvisoryClient, city: &str) -> Result<(), AdvisoryError> {
    let weather = client.weather(city).await;
    heading("Weather");
    let report = &weather.data;
    let temp = report
        .temperature
        .map(|t| format!("{:.0}°C", t))
        .unwrap_or_else(|| "-".to_string());
    println!("{} • {} • {}", report.city, temp, report.condition);
    if let Some(humidity) = report.humidity {
        println!("Humidity: {:.0}%", humidity);
    }
    if let Some(wind) = report.wind_speed {
        println!("Wind: {:.1} m/s", wind);
    }

    let prices = client.market_prices(None).await;
    heading("Market Prices");
    println!("{:<16} {:<14} {}", "Commodity", "Price", "Mandi");
    for price in &prices.data {
        println!("{:<16} ₹{:<13} {}", price.commodity, price.price, price.market);
    }

    Ok(())
}
