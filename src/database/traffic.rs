use anyhow::Result;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

/// One day of website traffic. `date` is the primary key; writes replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TrafficDay {
    pub date: NaiveDate,
    pub visitors: i64,
    pub pageviews: i64,
    pub bounce_rate: f64,
    pub avg_session_duration: f64,
    pub conversion_rate: f64,
}

impl TrafficDay {
    /// Synthetic traffic drawn from the fixed uniform ranges.
    pub fn random(date: NaiveDate) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            date,
            visitors: rng.gen_range(150..=400),
            pageviews: rng.gen_range(300..=1200),
            bounce_rate: rng.gen_range(0.3..0.6),
            avg_session_duration: rng.gen_range(120.0..480.0),
            conversion_rate: rng.gen_range(0.02..0.08),
        }
    }

    /// Insert-or-replace keyed on date; running twice for one date keeps a
    /// single row with the newer values.
    pub async fn upsert(conn: &mut SqliteConnection, day: &TrafficDay) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO website_traffic
                (date, visitors, pageviews, bounce_rate, avg_session_duration, conversion_rate)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        )
        .bind(day.date)
        .bind(day.visitors)
        .bind(day.pageviews)
        .bind(day.bounce_rate)
        .bind(day.avg_session_duration)
        .bind(day.conversion_rate)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    pub async fn range_from(
        conn: &mut SqliteConnection,
        since: NaiveDate,
    ) -> Result<Vec<TrafficDay>> {
        let days = sqlx::query_as::<_, TrafficDay>(
            r#"
            SELECT date, visitors, pageviews, bounce_rate, avg_session_duration, conversion_rate
            FROM website_traffic
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
    ) -> Result<Option<TrafficDay>> {
        let day = sqlx::query_as::<_, TrafficDay>(
            r#"
            SELECT date, visitors, pageviews, bounce_rate, avg_session_duration, conversion_rate
            FROM website_traffic
            WHERE date = ?1
        "#,
        )
        .bind(date)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::test_pool;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    #[tokio::test]
    async fn upsert_replaces_instead_of_duplicating() {
        let (pool, _dir) = test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire");
        let day = date("2026-08-01");

        let first = TrafficDay {
            date: day,
            visitors: 200,
            pageviews: 800,
            bounce_rate: 0.4,
            avg_session_duration: 300.0,
            conversion_rate: 0.05,
        };
        TrafficDay::upsert(&mut conn, &first).await.expect("upsert");

        let mut second = first.clone();
        second.visitors = 350;
        TrafficDay::upsert(&mut conn, &second).await.expect("upsert");

        let rows = TrafficDay::range_from(&mut conn, day).await.expect("range");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].visitors, 350);
    }

    #[tokio::test]
    async fn range_is_ordered_and_window_bounded() {
        let (pool, _dir) = test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire");

        for d in ["2026-07-01", "2026-08-03", "2026-08-01"] {
            TrafficDay::upsert(&mut conn, &TrafficDay::random(date(d)))
                .await
                .expect("upsert");
        }

        let rows = TrafficDay::range_from(&mut conn, date("2026-08-01"))
            .await
            .expect("range");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, date("2026-08-01"));
        assert_eq!(rows[1].date, date("2026-08-03"));

        let missing = TrafficDay::find_by_date(&mut conn, date("2026-08-02"))
            .await
            .expect("find");
        assert!(missing.is_none());
    }
}
