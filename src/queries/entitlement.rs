//! Entitlement query handlers and projections.
//!
//! Entitlements are the server-side record of what a user may access. Pages
//! always read this table fresh; nothing access-related is cached in the
//! session.

use evento::{Context, EventDetails, Executor};
use skillshelf_access::aggregate::Access;
use skillshelf_access::event::{EventMetadata, ModulePurchased, SubscriptionActivated};
use skillshelf_access::{Entitlement, EntitlementKind};
use sqlx::SqlitePool;
use tracing::info;

/// Handler for ModulePurchased event
#[evento::handler(Access)]
async fn on_module_purchased<E: Executor>(
    context: &Context<'_, E>,
    event: EventDetails<ModulePurchased, EventMetadata>,
) -> anyhow::Result<()> {
    let pool = context.extract::<SqlitePool>();

    info!(
        user_id = %event.aggregator_id,
        module_id = %event.data.module_id,
        "Processing ModulePurchased event"
    );

    // Replays and duplicate grants resolve to the one existing row
    sqlx::query(
        "INSERT OR IGNORE INTO entitlements (id, user_id, module_id, kind, expires_at, created_at)
         VALUES (?, ?, ?, ?, NULL, ?)",
    )
    .bind(&event.data.entitlement_id)
    .bind(&event.aggregator_id)
    .bind(&event.data.module_id)
    .bind(EntitlementKind::Single)
    .bind(event.timestamp)
    .execute(&pool)
    .await?;

    Ok(())
}

/// Handler for SubscriptionActivated event
#[evento::handler(Access)]
async fn on_subscription_activated<E: Executor>(
    context: &Context<'_, E>,
    event: EventDetails<SubscriptionActivated, EventMetadata>,
) -> anyhow::Result<()> {
    let pool = context.extract::<SqlitePool>();

    info!(
        user_id = %event.aggregator_id,
        plan = %event.data.plan,
        "Processing SubscriptionActivated event"
    );

    sqlx::query(
        "INSERT OR IGNORE INTO entitlements (id, user_id, module_id, kind, expires_at, created_at)
         VALUES (?, ?, NULL, ?, ?, ?)",
    )
    .bind(&event.data.entitlement_id)
    .bind(&event.aggregator_id)
    .bind(EntitlementKind::Subscription)
    .bind(event.data.expires_at)
    .bind(event.timestamp)
    .execute(&pool)
    .await?;

    Ok(())
}

/// Create subscription builder for entitlement query handlers
pub fn subscribe_entitlement_query<E: Executor + Clone>(
    pool: SqlitePool,
) -> evento::SubscribeBuilder<E> {
    evento::subscribe::<E>("entitlement-query")
        .data(pool)
        .handler(on_module_purchased())
        .handler(on_subscription_activated())
}

/// All entitlements for a user, newest first.
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> anyhow::Result<Vec<Entitlement>> {
    let rows = sqlx::query_as::<_, Entitlement>(
        "SELECT id, user_id, module_id, kind, expires_at, created_at
         FROM entitlements WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Module ids the user holds an unexpired single-purchase entitlement for.
/// Expired or subscription rows do not count; checkout may grant those
/// modules again.
pub async fn owned_module_ids(
    pool: &SqlitePool,
    user_id: &str,
    now: i64,
) -> anyhow::Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT module_id FROM entitlements
         WHERE user_id = ? AND module_id IS NOT NULL AND kind = ?
           AND (expires_at IS NULL OR expires_at > ?)",
    )
    .bind(user_id)
    .bind(EntitlementKind::Single)
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}
