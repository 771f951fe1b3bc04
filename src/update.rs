//! Daily updater: appends one day of synthetic data without touching prior
//! days.

use anyhow::Result;
use chrono::NaiveDate;
use rand::Rng;
use tracing::{error, info};

use crate::database::{
    business::BusinessDay,
    emails::{EmailEvent, NewEmailEvent},
    traffic::TrafficDay,
    DbPool,
};

const EMAILS_PER_UPDATE: std::ops::RangeInclusive<i64> = 3..=8;
const MAX_RESPONSE_HOURS: f64 = 48.0;

/// Writes one day of synthetic records. Emails are additive (no uniqueness
/// constraint, so a second run adds more rows); traffic and business metrics
/// are replaced atomically inside one transaction.
pub async fn append_day(pool: &DbPool, date: NaiveDate) -> Result<()> {
    info!("Appending synthetic data for {date}");

    let mut conn = pool.acquire().await?;
    let email_count = rand::thread_rng().gen_range(EMAILS_PER_UPDATE);
    for _ in 0..email_count {
        let event = NewEmailEvent::random(date, MAX_RESPONSE_HOURS);
        EmailEvent::insert(&mut conn, &event).await?;
    }
    drop(conn);

    let mut tx = pool.begin().await?;
    TrafficDay::upsert(&mut tx, &TrafficDay::random(date)).await?;
    BusinessDay::upsert(&mut tx, &BusinessDay::random(date)).await?;
    tx.commit().await?;

    info!("Successfully wrote data for {date}");
    Ok(())
}

/// CLI entry point: failures are logged rather than propagated, leaving
/// whatever committed in place.
pub async fn run(pool: &DbPool, date: NaiveDate) {
    if let Err(e) = append_day(pool, date).await {
        error!("daily update for {date} failed: {e:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::test_pool;

    #[tokio::test]
    async fn second_run_replaces_metrics_but_adds_emails() {
        let (pool, _dir) = test_pool().await;
        let date: NaiveDate = "2026-08-05".parse().expect("valid date");

        append_day(&pool, date).await.expect("first run");

        let emails_after_first =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM email_analytics WHERE date = ?1")
                .bind(date)
                .fetch_one(&pool)
                .await
                .expect("count emails");
        assert!((3..=8).contains(&emails_after_first));

        append_day(&pool, date).await.expect("second run");

        let emails_after_second =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM email_analytics WHERE date = ?1")
                .bind(date)
                .fetch_one(&pool)
                .await
                .expect("count emails");
        assert!(emails_after_second > emails_after_first, "emails accumulate");

        let traffic_rows =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM website_traffic WHERE date = ?1")
                .bind(date)
                .fetch_one(&pool)
                .await
                .expect("count traffic");
        assert_eq!(traffic_rows, 1, "upsert keeps a single traffic row");

        let business_rows =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM business_metrics WHERE date = ?1")
                .bind(date)
                .fetch_one(&pool)
                .await
                .expect("count business");
        assert_eq!(business_rows, 1, "upsert keeps a single business row");
    }

    #[tokio::test]
    async fn leaves_other_days_untouched() {
        let (pool, _dir) = test_pool().await;
        let earlier: NaiveDate = "2026-08-01".parse().expect("valid date");
        let today: NaiveDate = "2026-08-05".parse().expect("valid date");

        append_day(&pool, earlier).await.expect("earlier day");
        let earlier_emails =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM email_analytics WHERE date = ?1")
                .bind(earlier)
                .fetch_one(&pool)
                .await
                .expect("count");

        append_day(&pool, today).await.expect("today");

        let earlier_emails_after =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM email_analytics WHERE date = ?1")
                .bind(earlier)
                .fetch_one(&pool)
                .await
                .expect("count");
        assert_eq!(earlier_emails, earlier_emails_after);
    }
}
