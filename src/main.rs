use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use evento::prelude::*;
use skillshelf::AppState;
use skillshelf::queries::{entitlement::subscribe_entitlement_query, user::subscribe_user_query};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions};
use tower_http::trace::TraceLayer;

/// skillshelf - focused video modules for engineering leads
#[derive(Parser)]
#[command(name = "skillshelf")]
#[command(about = "Storefront and member area for the skillshelf module catalog", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = skillshelf::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    skillshelf::observability::init_observability("skillshelf", &config.observability.log_level)?;
    config.warn_if_incomplete();

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate_command(config).await,
        Commands::Reset => reset_command(config).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: skillshelf::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting skillshelf server...");

    let host = host_override.unwrap_or(config.server.host);
    let port = port_override.unwrap_or(config.server.port);

    let query_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    let evento: evento::Sqlite = query_pool.clone().into();

    // Read model projections
    subscribe_user_query(query_pool.clone()).run(&evento).await?;
    tracing::info!("Evento subscription 'user-query' started");

    subscribe_entitlement_query(query_pool.clone())
        .run(&evento)
        .await?;
    tracing::info!("Evento subscription 'entitlement-query' started");

    let email_config = skillshelf::email::EmailConfig {
        smtp_host: config.email.smtp_host,
        smtp_port: config.email.smtp_port,
        smtp_username: config.email.smtp_username,
        smtp_password: config.email.smtp_password,
        from_email: config.email.from_email,
        from_name: config.email.from_name,
    };

    let state = AppState {
        evento,
        query_pool,
        jwt_secret: config.jwt.secret,
        jwt_expiration_days: config.jwt.expiration_days,
        email_config,
        base_url: config.email.base_url,
        gateway: Arc::new(skillshelf_access::SimulatedGateway::new(
            Duration::from_millis(config.checkout.payment_delay_ms),
        )),
    };

    let app = skillshelf::routes::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: skillshelf::config::Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    run_migrations(&pool).await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: skillshelf::config::Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate_command(config).await?;

    tracing::info!("Database reset completed");

    Ok(())
}

#[tracing::instrument(skip(pool))]
async fn run_migrations(pool: &sqlx::SqlitePool) -> Result<()> {
    // 1. Read model tables
    sqlx::migrate!("./migrations").run(pool).await?;

    // 2. Event store tables
    let mut conn = pool.acquire().await?;
    evento::sql_migrator::new_migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    Ok(())
}
