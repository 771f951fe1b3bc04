use anyhow::Result;
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info};

const TABLES: [&str; 3] = ["email_analytics", "website_traffic", "business_metrics"];

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations");

    create_email_analytics_table(pool).await?;
    create_website_traffic_table(pool).await?;
    create_business_metrics_table(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Destructive reset: drops all three tables and recreates them empty.
pub async fn reset(pool: &SqlitePool) -> Result<()> {
    info!("Dropping all metric tables");
    for table in TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(pool)
            .await?;
    }
    run_migrations(pool).await
}

async fn create_email_analytics_table(pool: &SqlitePool) -> Result<()> {
    debug!("Creating email_analytics table");
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS email_analytics (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            sender_email TEXT NOT NULL,
            sender_name TEXT NOT NULL,
            subject TEXT NOT NULL,
            category TEXT NOT NULL,
            priority INTEGER NOT NULL DEFAULT 1,
            response_required INTEGER NOT NULL DEFAULT 0,
            response_time_hours REAL NOT NULL DEFAULT 0,
            sentiment_score REAL NOT NULL DEFAULT 0
        )
    "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_email_analytics_date ON email_analytics(date)",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_website_traffic_table(pool: &SqlitePool) -> Result<()> {
    debug!("Creating website_traffic table");
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS website_traffic (
            date TEXT PRIMARY KEY,
            visitors INTEGER NOT NULL DEFAULT 0,
            pageviews INTEGER NOT NULL DEFAULT 0,
            bounce_rate REAL NOT NULL DEFAULT 0,
            avg_session_duration REAL NOT NULL DEFAULT 0,
            conversion_rate REAL NOT NULL DEFAULT 0
        )
    "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_business_metrics_table(pool: &SqlitePool) -> Result<()> {
    debug!("Creating business_metrics table");
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS business_metrics (
            date TEXT PRIMARY KEY,
            revenue REAL NOT NULL DEFAULT 0,
            new_customers INTEGER NOT NULL DEFAULT 0,
            support_tickets INTEGER NOT NULL DEFAULT 0,
            social_mentions INTEGER NOT NULL DEFAULT 0,
            customer_satisfaction REAL NOT NULL DEFAULT 0
        )
    "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
