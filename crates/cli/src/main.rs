//! `pizza-billing` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the API server.
//! - `migrate` — run pending database migrations.

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pizza-billing",
    about = "REST backend for pizza shop billing",
    version
)]
struct Cli {
    /// Database URL. Falls back to DB_USER/DB_PASSWORD/DB_HOST/DB_PORT/DB_NAME.
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,

        #[arg(long, default_value_t = 10)]
        max_connections: u32,

        /// Apply pending migrations before serving.
        #[arg(long)]
        migrate: bool,
    },
    /// Run pending database migrations.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let database_url = config::database_url_from_env(cli.database_url)?;

    match cli.command {
        Command::Serve {
            bind,
            max_connections,
            migrate,
        } => {
            let pool = db::pool::create_pool(&database_url, max_connections)
                .await
                .context("failed to connect to database")?;
            info!("Application connected to the database");

            if migrate {
                db::pool::run_migrations(&pool)
                    .await
                    .context("migration failed")?;
            }

            info!("Starting API server on {bind}");
            let served = api::serve(&bind, pool.clone()).await;
            pool.close().await;
            served.context("server failed")?;
        }
        Command::Migrate => {
            let pool = db::pool::create_pool(&database_url, 2)
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;
            pool.close().await;
            info!("Migrations applied successfully");
        }
    }

    Ok(())
}
