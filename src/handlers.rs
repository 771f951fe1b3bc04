//! Web handlers: the dashboard page and the liveness probe.

use askama::Template;
use axum::{extract::State, response::Html};
use chrono::{Duration, Utc};

use crate::charts::{self, Chart};
use crate::database::{business::BusinessDay, emails::EmailEvent, traffic::TrafficDay};
use crate::error::Result;
use crate::kpis;
use crate::server::AppState;
use crate::templates::DashboardTemplate;

/// Days of history shown on the dashboard.
const WINDOW_DAYS: i64 = 30;

/// Read → aggregate → render, once per request. The pool connection acquired
/// here is the only store handle the aggregation functions see; it goes back
/// to the pool when it drops at the end of the request, error or not.
pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>> {
    let mut conn = state.pool.acquire().await?;

    let today = Utc::now().date_naive();
    let since = today - Duration::days(WINDOW_DAYS);

    let email_counts = EmailEvent::counts_by_category(&mut conn, since).await?;
    let traffic = TrafficDay::range_from(&mut conn, since).await?;
    let business = BusinessDay::range_from(&mut conn, since).await?;
    let kpis = kpis::for_today(&mut conn, today).await?;

    let charts: Vec<Chart> = [
        charts::email_volume(&email_counts),
        charts::website_traffic(&traffic),
        charts::revenue(&business),
    ]
    .into_iter()
    .flatten()
    .collect();
    let charts_json = serde_json::to_string(&charts)?;

    let template = DashboardTemplate {
        business: &state.config,
        kpis,
        charts: &charts,
        charts_json,
        now: Utc::now().format("%Y-%m-%d %H:%M").to_string(),
    };

    Ok(Html(template.render()?))
}

/// Liveness probe; answers without touching the store.
pub async fn ok() -> &'static str {
    "✅ Humbu Store dashboard is operational!"
}
