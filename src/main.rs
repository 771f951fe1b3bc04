use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use humbu_dashboard::config::BusinessConfig;
use humbu_dashboard::server::{run_server, AppState};
use humbu_dashboard::{database, seed, update};

#[derive(Parser)]
#[command(name = "humbu-dashboard")]
#[command(about = "Business-metrics dashboard for Humbu Store")]
struct Args {
    /// SQLite database file path
    #[arg(long, default_value = "./business.db", global = true)]
    database_path: String,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dashboard web server
    Serve {
        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(long, default_value = "5000")]
        port: u16,
    },
    /// Destroy the store and rebuild it with synthetic history
    Seed {
        /// Days of history to generate, ending yesterday
        #[arg(long, default_value = "90")]
        days: u32,

        /// Confirm the destructive rebuild
        #[arg(long)]
        yes: bool,
    },
    /// Append or refresh one day of synthetic data
    Update {
        /// Date to write (defaults to today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!("Starting Humbu Store dashboard tooling");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", args.database_path);

    let database_url = format!("sqlite:{}?mode=rwc", args.database_path);

    match args.command {
        Command::Serve { host, port } => {
            let pool = database::create_pool(&database_url).await?;
            let state = AppState {
                pool,
                config: Arc::new(BusinessConfig::default()),
            };
            run_server(&format!("{host}:{port}"), state).await?;
        }
        Command::Seed { days, yes } => {
            if !yes {
                anyhow::bail!(
                    "refusing to rebuild the store without --yes; this discards all existing data"
                );
            }
            let pool = database::create_pool(&database_url).await?;
            seed::rebuild_store(&pool, days).await?;
            database::close_pool(pool).await;
        }
        Command::Update { date } => {
            let pool = database::create_pool(&database_url).await?;
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            update::run(&pool, date).await;
            database::close_pool(pool).await;
        }
    }

    Ok(())
}
