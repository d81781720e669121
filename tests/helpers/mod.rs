//! Test helper functions for database and app setup

#![allow(dead_code)]

use evento::migrator::{Migrate, Plan};
use sqlx::SqlitePool;

/// Test database pair: one pool backing both the event store and the read
/// model, matching how the server runs.
pub struct TestDatabases {
    pub evento: evento::Sqlite,
    pub pool: SqlitePool,
}

/// Set up an in-memory SQLite database with the event store schema and the
/// read model migrations applied.
pub async fn setup_test_databases() -> anyhow::Result<TestDatabases> {
    let pool = SqlitePool::connect("sqlite::memory:").await?;

    setup_evento_schema(&pool).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let evento: evento::Sqlite = pool.clone().into();

    Ok(TestDatabases { evento, pool })
}

/// Create all evento tables using evento::sql_migrator.
async fn setup_evento_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    let migrator = evento::sql_migrator::new_migrator::<sqlx::Sqlite>()?;
    let mut conn = pool.acquire().await?;
    migrator.run(&mut conn, &Plan::apply_all()).await?;

    Ok(())
}

/// Run both read model projections once, draining pending events.
pub async fn run_projections(dbs: &TestDatabases) -> anyhow::Result<()> {
    skillshelf::queries::user::subscribe_user_query(dbs.pool.clone())
        .unsafe_oneshot(&dbs.evento)
        .await?;
    skillshelf::queries::entitlement::subscribe_entitlement_query(dbs.pool.clone())
        .unsafe_oneshot(&dbs.evento)
        .await?;
    Ok(())
}

/// Register a user through the sign-in command and project it, returning the
/// user id.
pub async fn register_user(dbs: &TestDatabases, email: &str) -> anyhow::Result<String> {
    use skillshelf_user::command::{Command, RequestSignInInput, normalize_email};
    use skillshelf_user::event::EventMetadata;

    let command = Command::new(dbs.evento.clone());
    let user_id = command
        .request_sign_in(
            RequestSignInInput {
                email: normalize_email(email),
            },
            None,
            EventMetadata::new(None),
        )
        .await?;

    run_projections(dbs).await?;

    Ok(user_id)
}
