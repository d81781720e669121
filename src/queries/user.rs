//! User query handlers and projections

use evento::{Context, EventDetails, Executor};
use skillshelf_user::aggregate::User;
use skillshelf_user::event::{EventMetadata, SignInLinkRequested, UserLoggedIn, UserRegistered};
use sqlx::SqlitePool;
use tracing::info;

/// User row from projection table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub created_at: i64,
    pub last_login_at: Option<i64>,
}

/// Handler for UserRegistered event
#[evento::handler(User)]
async fn on_user_registered<E: Executor>(
    context: &Context<'_, E>,
    event: EventDetails<UserRegistered, EventMetadata>,
) -> anyhow::Result<()> {
    let pool = context.extract::<SqlitePool>();

    info!(
        user_id = %event.aggregator_id,
        email = %event.data.email,
        "Processing UserRegistered event"
    );

    sqlx::query("INSERT INTO users (id, email, created_at) VALUES (?, ?, ?)")
        .bind(&event.aggregator_id)
        .bind(&event.data.email)
        .bind(event.timestamp)
        .execute(&pool)
        .await?;

    Ok(())
}

/// Handler for UserLoggedIn event
#[evento::handler(User)]
async fn on_user_logged_in<E: Executor>(
    context: &Context<'_, E>,
    event: EventDetails<UserLoggedIn, EventMetadata>,
) -> anyhow::Result<()> {
    let pool = context.extract::<SqlitePool>();

    sqlx::query("UPDATE users SET last_login_at = ? WHERE id = ?")
        .bind(event.timestamp)
        .bind(&event.aggregator_id)
        .execute(&pool)
        .await?;

    Ok(())
}

/// Create subscription builder for user query handlers
pub fn subscribe_user_query<E: Executor + Clone>(pool: SqlitePool) -> evento::SubscribeBuilder<E> {
    evento::subscribe::<E>("user-query")
        .data(pool)
        .handler(on_user_registered())
        .handler(on_user_logged_in())
        .skip::<User, SignInLinkRequested>()
}

/// Get user by ID
pub async fn get_user(pool: &SqlitePool, user_id: &str) -> anyhow::Result<Option<UserRow>> {
    let user = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, created_at, last_login_at FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> anyhow::Result<Option<UserRow>> {
    let user = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, created_at, last_login_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
