use anyhow::{bail, Error, Result};
use chrono::NaiveDate;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};
use std::fmt;
use std::str::FromStr;

/// Closed set of email categories. Writes only ever bind a variant's
/// canonical string, so anything else in the `category` column is a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailCategory {
    Sales,
    Inquiry,
    Support,
    Partnership,
}

impl EmailCategory {
    pub const ALL: [EmailCategory; 4] = [
        EmailCategory::Sales,
        EmailCategory::Inquiry,
        EmailCategory::Support,
        EmailCategory::Partnership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailCategory::Sales => "sales",
            EmailCategory::Inquiry => "inquiry",
            EmailCategory::Support => "support",
            EmailCategory::Partnership => "partnership",
        }
    }

    /// Capitalized form used in chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            EmailCategory::Sales => "Sales",
            EmailCategory::Inquiry => "Inquiry",
            EmailCategory::Support => "Support",
            EmailCategory::Partnership => "Partnership",
        }
    }
}

impl fmt::Display for EmailCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sales" => Ok(EmailCategory::Sales),
            "inquiry" => Ok(EmailCategory::Inquiry),
            "support" => Ok(EmailCategory::Support),
            "partnership" => Ok(EmailCategory::Partnership),
            other => bail!("unknown email category: {other}"),
        }
    }
}

/// One received email, as stored. Rows are append-only; there is no
/// uniqueness constraint, so repeated inserts for a date accumulate.
#[derive(Debug, Clone, Serialize)]
pub struct EmailEvent {
    pub id: i64,
    pub date: NaiveDate,
    pub sender_email: String,
    pub sender_name: String,
    pub subject: String,
    pub category: EmailCategory,
    pub priority: i64,
    pub response_required: bool,
    pub response_time_hours: f64,
    pub sentiment_score: f64,
}

#[derive(Debug, Clone)]
pub struct NewEmailEvent {
    pub date: NaiveDate,
    pub sender_email: String,
    pub sender_name: String,
    pub subject: String,
    pub category: EmailCategory,
    pub priority: i64,
    pub response_required: bool,
    pub response_time_hours: f64,
    pub sentiment_score: f64,
}

const SENDERS: [(&str, &str); 3] = [
    ("customer@gmail.com", "Thandi Mokoena"),
    ("client@company.co.za", "Pieter van Wyk"),
    ("partner@business.com", "Naledi Dlamini"),
];

const SUBJECT_KINDS: [&str; 3] = ["Inquiry", "Order", "Support"];

impl NewEmailEvent {
    /// Synthetic email with uniformly random attributes.
    pub fn random(date: NaiveDate, max_response_hours: f64) -> Self {
        let mut rng = rand::thread_rng();
        let (sender_email, sender_name) = *SENDERS.choose(&mut rng).expect("sender pool is non-empty");
        let category = *EmailCategory::ALL.choose(&mut rng).expect("category set is non-empty");
        let kind = SUBJECT_KINDS.choose(&mut rng).expect("subject pool is non-empty");

        Self {
            date,
            sender_email: sender_email.to_string(),
            sender_name: sender_name.to_string(),
            subject: format!("Business {kind}"),
            category,
            priority: rng.gen_range(1..=3),
            response_required: rng.gen_bool(0.5),
            response_time_hours: rng.gen_range(1.0..max_response_hours),
            sentiment_score: rng.gen_range(-1.0..1.0),
        }
    }
}

/// Per-date, per-category email count over a window.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub date: NaiveDate,
    pub category: EmailCategory,
    pub count: i64,
}

#[derive(FromRow)]
struct CategoryCountRow {
    date: NaiveDate,
    category: String,
    count: i64,
}

#[derive(FromRow)]
struct EmailEventRow {
    id: i64,
    date: NaiveDate,
    sender_email: String,
    sender_name: String,
    subject: String,
    category: String,
    priority: i64,
    response_required: bool,
    response_time_hours: f64,
    sentiment_score: f64,
}

impl EmailEvent {
    pub async fn insert(conn: &mut SqliteConnection, event: &NewEmailEvent) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO email_analytics
                (date, sender_email, sender_name, subject, category, priority,
                 response_required, response_time_hours, sentiment_score)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        )
        .bind(event.date)
        .bind(&event.sender_email)
        .bind(&event.sender_name)
        .bind(&event.subject)
        .bind(event.category.as_str())
        .bind(event.priority)
        .bind(event.response_required)
        .bind(event.response_time_hours)
        .bind(event.sentiment_score)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Per-date, per-category counts from `since` onward, ordered by date.
    pub async fn counts_by_category(
        conn: &mut SqliteConnection,
        since: NaiveDate,
    ) -> Result<Vec<CategoryCount>> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            r#"
            SELECT date, category, COUNT(*) as count
            FROM email_analytics
            WHERE date >= ?1
            GROUP BY date, category
            ORDER BY date
        "#,
        )
        .bind(since)
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(CategoryCount {
                    date: row.date,
                    category: row.category.parse()?,
                    count: row.count,
                })
            })
            .collect()
    }

    pub async fn count_for_date(conn: &mut SqliteConnection, date: NaiveDate) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM email_analytics WHERE date = ?1",
        )
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;

        Ok(count)
    }

    pub async fn list_for_date(
        conn: &mut SqliteConnection,
        date: NaiveDate,
    ) -> Result<Vec<EmailEvent>> {
        let rows = sqlx::query_as::<_, EmailEventRow>(
            r#"
            SELECT id, date, sender_email, sender_name, subject, category, priority,
                   response_required, response_time_hours, sentiment_score
            FROM email_analytics
            WHERE date = ?1
            ORDER BY id
        "#,
        )
        .bind(date)
        .fetch_all(&mut *conn)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(EmailEvent {
                    id: row.id,
                    date: row.date,
                    sender_email: row.sender_email,
                    sender_name: row.sender_name,
                    subject: row.subject,
                    category: row.category.parse()?,
                    priority: row.priority,
                    response_required: row.response_required,
                    response_time_hours: row.response_time_hours,
                    sentiment_score: row.sentiment_score,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::test_pool;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    #[test]
    fn category_roundtrips_through_storage_form() {
        for category in EmailCategory::ALL {
            let parsed: EmailCategory = category.as_str().parse().expect("parse back");
            assert_eq!(parsed, category);
        }
        assert!("marketing".parse::<EmailCategory>().is_err());
    }

    #[tokio::test]
    async fn insert_and_count_for_date() {
        let (pool, _dir) = test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire");
        let day = date("2026-08-01");

        for _ in 0..4 {
            let event = NewEmailEvent::random(day, 48.0);
            EmailEvent::insert(&mut conn, &event).await.expect("insert");
        }

        let count = EmailEvent::count_for_date(&mut conn, day).await.expect("count");
        assert_eq!(count, 4);

        let other = EmailEvent::count_for_date(&mut conn, date("2026-08-02"))
            .await
            .expect("count");
        assert_eq!(other, 0);

        let events = EmailEvent::list_for_date(&mut conn, day).await.expect("list");
        assert_eq!(events.len(), 4);
        for event in &events {
            assert!((1..=3).contains(&event.priority));
            assert!(event.response_time_hours >= 1.0 && event.response_time_hours < 48.0);
        }
    }

    #[tokio::test]
    async fn counts_group_by_date_and_category() {
        let (pool, _dir) = test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire");

        let mut event = NewEmailEvent::random(date("2026-08-01"), 48.0);
        event.category = EmailCategory::Sales;
        EmailEvent::insert(&mut conn, &event).await.expect("insert");
        EmailEvent::insert(&mut conn, &event).await.expect("insert");
        event.category = EmailCategory::Support;
        EmailEvent::insert(&mut conn, &event).await.expect("insert");
        event.date = date("2026-08-02");
        EmailEvent::insert(&mut conn, &event).await.expect("insert");

        let counts = EmailEvent::counts_by_category(&mut conn, date("2026-08-01"))
            .await
            .expect("counts");
        assert_eq!(counts.len(), 3);

        let sales = counts
            .iter()
            .find(|c| c.date == date("2026-08-01") && c.category == EmailCategory::Sales)
            .expect("sales bucket");
        assert_eq!(sales.count, 2);

        // Window excludes earlier dates.
        let later = EmailEvent::counts_by_category(&mut conn, date("2026-08-02"))
            .await
            .expect("counts");
        assert_eq!(later.len(), 1);
    }
}
