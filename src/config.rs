use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::database::emails::EmailCategory;

/// Static business configuration consumed read-only by the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    pub name: String,
    pub contact_email: String,
    pub website_url: String,
    /// Hex color used as the page accent.
    pub brand_color: String,
    /// IANA timezone identifier.
    pub timezone: String,
    /// Keyword lists per category, reserved for a classification step that
    /// does not exist yet. Nothing in the write path consults these.
    pub email_categories: BTreeMap<EmailCategory, Vec<String>>,
}

impl BusinessConfig {
    pub fn keywords(&self, category: EmailCategory) -> Option<&[String]> {
        self.email_categories.get(&category).map(Vec::as_slice)
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        let email_categories = BTreeMap::from([
            (
                EmailCategory::Sales,
                keywords(&["order", "purchase", "buy", "payment", "invoice"]),
            ),
            (
                EmailCategory::Inquiry,
                keywords(&["question", "help", "information", "query", "interested"]),
            ),
            (
                EmailCategory::Support,
                keywords(&["problem", "issue", "help", "refund", "complaint"]),
            ),
            (
                EmailCategory::Partnership,
                keywords(&["collaboration", "partnership", "business", "opportunity"]),
            ),
        ]);

        Self {
            name: "Humbu Store".to_string(),
            contact_email: "humbulani@humbu.store".to_string(),
            website_url: "https://humbu.store".to_string(),
            brand_color: "#2563eb".to_string(),
            timezone: "Africa/Johannesburg".to_string(),
            email_categories,
        }
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
