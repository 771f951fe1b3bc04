//! Askama templates for the dashboard page.

use askama::Template;

use crate::charts::Chart;
use crate::config::BusinessConfig;
use crate::kpis::BusinessKpis;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub business: &'a BusinessConfig,
    pub kpis: BusinessKpis,
    pub charts: &'a [Chart],
    /// The chart payload again, serialized for the inline render script.
    pub charts_json: String,
    pub now: String,
}
