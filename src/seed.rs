//! Destructive reseed: drops the store and regenerates a synthetic history.

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::Rng;
use tracing::info;

use crate::database::{
    business::BusinessDay,
    emails::{EmailEvent, NewEmailEvent},
    schema,
    traffic::TrafficDay,
    DbPool,
};

/// Emails generated per seeded day.
const EMAILS_PER_DAY: std::ops::RangeInclusive<i64> = 5..=15;
const MAX_RESPONSE_HOURS: f64 = 72.0;

/// Drops all existing data and writes `days` consecutive days of synthetic
/// records ending yesterday. Only ever run on demand; callers are expected to
/// have confirmed the destruction.
pub async fn rebuild_store(pool: &DbPool, days: u32) -> Result<()> {
    info!("Rebuilding store with {days} days of synthetic history");

    schema::reset(pool).await?;

    let mut conn = pool.acquire().await?;
    let base = Utc::now().date_naive() - Duration::days(days as i64);

    for offset in 0..days {
        let date = base + Duration::days(offset as i64);

        let email_count = rand::thread_rng().gen_range(EMAILS_PER_DAY);
        for _ in 0..email_count {
            let event = NewEmailEvent::random(date, MAX_RESPONSE_HOURS);
            EmailEvent::insert(&mut conn, &event).await?;
        }

        TrafficDay::upsert(&mut conn, &TrafficDay::random(date)).await?;
        BusinessDay::upsert(&mut conn, &BusinessDay::random(date)).await?;
    }

    info!(
        "Store rebuilt: {days} days ending {}",
        base + Duration::days(days as i64 - 1)
    );
    Ok(())
}
