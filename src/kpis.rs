//! Today's headline numbers for the dashboard.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqliteConnection;

use crate::database::{business::BusinessDay, emails::EmailEvent, traffic::TrafficDay};

// Fixed placeholder figures; the page has never computed growth from the
// store.
pub const REVENUE_GROWTH_PLACEHOLDER: &str = "+12.5%";
pub const VISITOR_GROWTH_PLACEHOLDER: &str = "+8.3%";

#[derive(Debug, Clone, Serialize)]
pub struct BusinessKpis {
    pub total_emails: i64,
    pub today_visitors: i64,
    /// Conversion rate as a percentage, rounded to two decimals.
    pub today_conversion: f64,
    /// Revenue preformatted as a currency string, e.g. "R1,234.50".
    pub today_revenue: String,
    pub today_customers: i64,
    pub revenue_growth: &'static str,
    pub visitor_growth: &'static str,
}

/// Missing rows for `today` yield zero/default values, never errors.
pub async fn for_today(conn: &mut SqliteConnection, today: NaiveDate) -> Result<BusinessKpis> {
    let total_emails = EmailEvent::count_for_date(&mut *conn, today).await?;
    let traffic = TrafficDay::find_by_date(&mut *conn, today).await?;
    let business = BusinessDay::find_by_date(&mut *conn, today).await?;

    let (today_visitors, today_conversion) = match traffic {
        Some(day) => (day.visitors, round_percent(day.conversion_rate)),
        None => (0, 0.0),
    };
    let (today_revenue, today_customers) = match business {
        Some(day) => (format_currency(day.revenue), day.new_customers),
        None => (format_currency(0.0), 0),
    };

    Ok(BusinessKpis {
        total_emails,
        today_visitors,
        today_conversion,
        today_revenue,
        today_customers,
        revenue_growth: REVENUE_GROWTH_PLACEHOLDER,
        visitor_growth: VISITOR_GROWTH_PLACEHOLDER,
    })
}

/// Stored fraction to display percentage, two-decimal rounding.
pub fn round_percent(rate: f64) -> f64 {
    (rate * 10_000.0).round() / 100.0
}

/// "R" prefix, thousands separators, two decimal places.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let units = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}R{grouped}.{frac:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::test_pool;

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(1234.5), "R1,234.50");
        assert_eq!(format_currency(0.0), "R0.00");
        assert_eq!(format_currency(999.994), "R999.99");
        assert_eq!(format_currency(1_234_567.891), "R1,234,567.89");
        assert_eq!(format_currency(-42.1), "-R42.10");
    }

    #[test]
    fn percent_rounding() {
        assert_eq!(round_percent(0.0532), 5.32);
        assert_eq!(round_percent(0.0), 0.0);
        assert_eq!(round_percent(0.056789), 5.68);
    }

    #[tokio::test]
    async fn empty_store_yields_defaults() {
        let (pool, _dir) = test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire");
        let today: NaiveDate = "2026-08-06".parse().expect("valid date");

        let kpis = for_today(&mut conn, today).await.expect("kpis");
        assert_eq!(kpis.total_emails, 0);
        assert_eq!(kpis.today_visitors, 0);
        assert_eq!(kpis.today_conversion, 0.0);
        assert_eq!(kpis.today_revenue, "R0.00");
        assert_eq!(kpis.today_customers, 0);
        assert_eq!(kpis.revenue_growth, REVENUE_GROWTH_PLACEHOLDER);
    }

    #[tokio::test]
    async fn populated_day_flows_through() {
        let (pool, _dir) = test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire");
        let today: NaiveDate = "2026-08-06".parse().expect("valid date");

        let mut traffic = TrafficDay::random(today);
        traffic.visitors = 321;
        traffic.conversion_rate = 0.0532;
        TrafficDay::upsert(&mut conn, &traffic).await.expect("traffic");

        let mut business = BusinessDay::random(today);
        business.revenue = 1234.5;
        business.new_customers = 7;
        BusinessDay::upsert(&mut conn, &business).await.expect("business");

        let kpis = for_today(&mut conn, today).await.expect("kpis");
        assert_eq!(kpis.today_visitors, 321);
        assert_eq!(kpis.today_conversion, 5.32);
        assert_eq!(kpis.today_revenue, "R1,234.50");
        assert_eq!(kpis.today_customers, 7);
    }
}
