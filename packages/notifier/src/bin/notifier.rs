use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mastodon::{MastodonOptions, MastodonService};
use notifier_core::domains::severance::{notify_affected_accounts, SeveranceContext, RETRY_DELAY};
use notifier_core::kernel::{MastodonAdapter, PgRelationSource};
use notifier_core::{Config, ConfigOverrides};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Notify local accounts affected by an upcoming remote instance suspension.
#[derive(Parser, Debug)]
#[command(name = "notifier")]
struct Args {
    /// Remote instance that will be suspended
    #[arg(long)]
    remote_instance: Option<String>,

    /// Reason for the suspension, used in the DM (do not end it with a period)
    #[arg(long)]
    reason: Option<String>,

    /// Suspension date in ISO 8601 format
    #[arg(long)]
    suspension_date: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,notifier_core=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::resolve(ConfigOverrides {
        remote_instance: args.remote_instance,
        reason: args.reason,
        suspension_date: args.suspension_date,
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let relation_source = PgRelationSource::new(pool);
    let service = Arc::new(MastodonService::new(MastodonOptions {
        base_url: format!("https://{}", config.local_instance),
        access_token: config.access_token.clone(),
    }));
    let messenger = MastodonAdapter::new(service);

    let ctx = SeveranceContext {
        remote_instance: config.remote_instance,
        reason: config.reason,
        suspension_date: config.suspension_date,
    };

    notify_affected_accounts(&relation_source, &messenger, &ctx, RETRY_DELAY).await
}
