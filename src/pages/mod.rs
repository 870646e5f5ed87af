//! Page Binders
//!
//! Terminal renderers for the application's pages. Each binder runs
//! once, pulls its collections through the advisory client, and renders
//! them; binders never distinguish live data from the offline dataset.

mod admin;
mod dashboard;
mod market;
mod qa;
mod schemes;

use crate::advisory::{AdvisoryClient, AdvisoryError};
use crate::config::Config;
use crate::session::Role;

/// A renderable page, selected by its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Qa,
    Market,
    Schemes,
    Admin,
}

impl Page {
    /// Resolve a page identifier. Unrecognized identifiers bind nothing.
    pub fn parse(s: &str) -> Option<Page> {
        match s.to_ascii_lowercase().as_str() {
            "dashboard" => Some(Page::Dashboard),
            "qa" => Some(Page::Qa),
            "market" => Some(Page::Market),
            "schemes" => Some(Page::Schemes),
            "admin" => Some(Page::Admin),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Qa => "qa",
            Page::Market => "market",
            Page::Schemes => "schemes",
            Page::Admin => "admin",
        }
    }

    /// Landing page for a freshly signed-in role.
    pub fn for_role(role: Role) -> Page {
        match role {
            Role::Admin => Page::Admin,
            Role::Expert => Page::Qa,
            Role::Farmer | Role::Visitor => Page::Dashboard,
        }
    }
}

/// Run the binder for `page`.
pub async fn run(page: Page, client: &AdvisoryClient, config: &Config) -> Result<(), AdvisoryError> {
    match page {
        Page::Dashboard => dashboard::render(client).await,
        Page::Qa => qa::render(client).await,
        Page::Market => market::render(client, &config.api.default_city).await,
        Page::Schemes => schemes::render(client).await,
        Page::Admin => admin::render(client).await,
    }
}

/// Section header used by all binders.
fn heading(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "-".repeat(title.len()));
}

/// Date part of an ISO 8601 timestamp, for compact listings.
fn short_date(timestamp: Option<&str>) -> String {
    timestamp
        .map(|t| t.split('T').next().unwrap_or(t).to_string())
        .unwrap_or_else(|| "-".to_string())
}
