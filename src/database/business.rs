use anyhow::Result;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

/// One day of business metrics. `date` is the primary key; writes replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BusinessDay {
    pub date: NaiveDate,
    pub revenue: f64,
    pub new_customers: i64,
    pub support_tickets: i64,
    pub social_mentions: i64,
    pub customer_satisfaction: f64,
}

impl BusinessDay {
    /// Synthetic metrics drawn from the fixed uniform ranges.
    pub fn random(date: NaiveDate) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            date,
            revenue: rng.gen_range(800.0..3000.0),
            new_customers: rng.gen_range(2..=8),
            support_tickets: rng.gen_range(1..=5),
            social_mentions: rng.gen_range(3..=15),
            customer_satisfaction: rng.gen_range(4.0..5.0),
        }
    }

    pub async fn upsert(conn: &mut SqliteConnection, day: &BusinessDay) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO business_metrics
                (date, revenue, new_customers, support_tickets, social_mentions, customer_satisfaction)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        )
        .bind(day.date)
        .bind(day.revenue)
        .bind(day.new_customers)
        .bind(day.support_tickets)
        .bind(day.social_mentions)
        .bind(day.customer_satisfaction)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    pub async fn range_from(
        conn: &mut SqliteConnection,
        since: NaiveDate,
    ) -> Result<Vec<BusinessDay>> {
        let days = sqlx::query_as::<_, BusinessDay>(
            r#"
            SELECT date, revenue, new_customers, support_tickets, social_mentions, customer_satisfaction
            FROM business_metrics
            WHERE date >= ?1
            ORDER BY date
        "#,
        )
        .bind(since)
        .fetch_all(&mut *conn)
        .await?;

        Ok(days)
    }

    pub async fn find_by_date(
        conn: &mut SqliteConnection,
        date: NaiveDate,
    ) -> Result<Option<BusinessDay>> {
        let day = sqlx::query_as::<_, BusinessDay>(
            r#"
            SELECT date, revenue, new_customers, support_tickets, social_mentions, customer_satisfaction
            FROM business_metrics
            WHERE date = ?1
        "#,
        )
        .bind(date)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(day)
    }
}
