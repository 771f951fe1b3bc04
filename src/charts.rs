//! Chart payload construction. The page renders these with Chart.js; this
//! module only decides what the series contain.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::database::{business::BusinessDay, emails::CategoryCount, traffic::TrafficDay};

/// Line colors cycled across series, brand blue first.
pub const SERIES_COLORS: [&str; 4] = ["#2563eb", "#dc2626", "#16a34a", "#ea580c"];

/// Pageviews are divided by this to share a y-scale with visitors.
pub const PAGEVIEW_SCALE: f64 = 5.0;
/// New customers are multiplied by this to share a y-scale with revenue.
pub const CUSTOMER_SCALE: f64 = 200.0;

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    /// Canvas element id.
    pub id: &'static str,
    pub title: String,
    pub labels: Vec<NaiveDate>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub kind: SeriesKind,
    /// One entry per chart label; `None` where the date has no value.
    pub data: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
}

/// One line per category seen in the window; categories with no rows at all
/// get no series. `None` when the window itself is empty.
pub fn email_volume(counts: &[CategoryCount]) -> Option<Chart> {
    if counts.is_empty() {
        return None;
    }

    let mut labels: Vec<NaiveDate> = counts.iter().map(|c| c.date).collect();
    labels.sort_unstable();
    labels.dedup();

    let mut series = Vec::new();
    for count in counts {
        let slot = series
            .iter()
            .position(|s: &Series| s.label == count.category.label());
        if slot.is_none() {
            let color = SERIES_COLORS[series.len() % SERIES_COLORS.len()];
            series.push(Series {
                label: count.category.label().to_string(),
                color: color.to_string(),
                kind: SeriesKind::Line,
                data: vec![None; labels.len()],
            });
        }
    }

    let index_of: HashMap<NaiveDate, usize> =
        labels.iter().enumerate().map(|(i, d)| (*d, i)).collect();
    for count in counts {
        let series_slot = series
            .iter_mut()
            .find(|s| s.label == count.category.label())
            .expect("series was created above");
        series_slot.data[index_of[&count.date]] = Some(count.count as f64);
    }

    Some(Chart {
        id: "email-volume",
        title: "📧 Daily Email Volume by Category".to_string(),
        labels,
        series,
    })
}

/// Visitors and pageviews÷5 as two lines on one scale.
pub fn website_traffic(days: &[TrafficDay]) -> Option<Chart> {
    if days.is_empty() {
        return None;
    }

    let labels: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    let visitors = Series {
        label: "Visitors".to_string(),
        color: SERIES_COLORS[0].to_string(),
        kind: SeriesKind::Line,
        data: days.iter().map(|d| Some(d.visitors as f64)).collect(),
    };
    let pageviews = Series {
        label: "Pageviews ÷ 5".to_string(),
        color: SERIES_COLORS[1].to_string(),
        kind: SeriesKind::Line,
        data: days
            .iter()
            .map(|d| Some(d.pageviews as f64 / PAGEVIEW_SCALE))
            .collect(),
    };

    Some(Chart {
        id: "website-traffic",
        title: "🌐 Website Traffic".to_string(),
        labels,
        series: vec![visitors, pageviews],
    })
}

/// Revenue as bars with new-customers×200 overlaid as a line.
pub fn revenue(days: &[BusinessDay]) -> Option<Chart> {
    if days.is_empty() {
        return None;
    }

    let labels: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    let revenue = Series {
        label: "Revenue".to_string(),
        color: SERIES_COLORS[0].to_string(),
        kind: SeriesKind::Bar,
        data: days.iter().map(|d| Some(d.revenue)).collect(),
    };
    let customers = Series {
        label: "New Customers × 200".to_string(),
        color: SERIES_COLORS[1].to_string(),
        kind: SeriesKind::Line,
        data: days
            .iter()
            .map(|d| Some(d.new_customers as f64 * CUSTOMER_SCALE))
            .collect(),
    };

    Some(Chart {
        id: "revenue-customers",
        title: "💰 Revenue & Customers".to_string(),
        labels,
        series: vec![revenue, customers],
    })
}
