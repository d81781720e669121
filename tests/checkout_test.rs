//! Checkout integration tests: granting, pricing, payment failure, dedupe.

mod helpers;

use std::time::Duration;

use async_trait::async_trait;
use skillshelf::queries::entitlement::{list_for_user, owned_module_ids};
use skillshelf_access::{
    AccessError, Command, EventMetadata, PaymentError, PaymentGateway, PaymentReceipt,
    SimulatedGateway, can_access,
};
use skillshelf_cart::PricedItem;

struct FailingGateway;

#[async_trait]
impl PaymentGateway for FailingGateway {
    async fn charge(&self, _user_id: &str, _amount: u64) -> Result<PaymentReceipt, PaymentError> {
        Err(PaymentError::Declined("card declined".to_string()))
    }
}

fn item(id: &str, price: u64) -> PricedItem {
    PricedItem {
        module_id: id.to_string(),
        price,
        quantity: 1,
    }
}

fn instant_gateway() -> SimulatedGateway {
    SimulatedGateway::new(Duration::from_millis(0))
}

#[tokio::test]
async fn checkout_grants_every_cart_item() {
    let dbs = helpers::setup_test_databases().await.unwrap();
    let user_id = helpers::register_user(&dbs, "buyer@example.com").await.unwrap();

    let command = Command::new(dbs.evento.clone());
    let items = [item("one-on-ones", 2900), item("feedback-loops", 3400)];

    let outcome = command
        .complete_checkout(
            &user_id,
            &items,
            "",
            &[],
            &instant_gateway(),
            EventMetadata::new(Some(user_id.clone())),
        )
        .await
        .unwrap();

    assert_eq!(outcome.granted.len(), 2);
    assert_eq!(outcome.totals.total, 6300);
    assert!(outcome.receipt.is_some());

    helpers::run_projections(&dbs).await.unwrap();

    let entitlements = list_for_user(&dbs.pool, &user_id).await.unwrap();
    assert_eq!(entitlements.len(), 2);
    assert!(can_access(&entitlements, "one-on-ones", 0));
    assert!(can_access(&entitlements, "feedback-loops", 0));
    assert!(!can_access(&entitlements, "delegation-ladder", 0));
}

#[tokio::test]
async fn welcome10_reduces_the_charged_total() {
    let dbs = helpers::setup_test_databases().await.unwrap();
    let user_id = helpers::register_user(&dbs, "promo@example.com").await.unwrap();

    let command = Command::new(dbs.evento.clone());
    let items = [item("a", 6000), item("b", 4000)];

    let outcome = command
        .complete_checkout(
            &user_id,
            &items,
            "WELCOME10",
            &[],
            &instant_gateway(),
            EventMetadata::new(Some(user_id.clone())),
        )
        .await
        .unwrap();

    assert_eq!(outcome.totals.subtotal, 10000);
    assert_eq!(outcome.totals.discount, 1000);
    assert_eq!(outcome.totals.total, 9000);
    assert_eq!(outcome.receipt.unwrap().amount, 9000);
}

#[tokio::test]
async fn payment_failure_grants_nothing() {
    let dbs = helpers::setup_test_databases().await.unwrap();
    let user_id = helpers::register_user(&dbs, "declined@example.com").await.unwrap();

    let command = Command::new(dbs.evento.clone());
    let items = [item("one-on-ones", 2900)];

    let err = command
        .complete_checkout(
            &user_id,
            &items,
            "",
            &[],
            &FailingGateway,
            EventMetadata::new(Some(user_id.clone())),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AccessError::Payment(PaymentError::Declined(_))));

    helpers::run_projections(&dbs).await.unwrap();

    let entitlements = list_for_user(&dbs.pool, &user_id).await.unwrap();
    assert!(entitlements.is_empty());
}

#[tokio::test]
async fn already_owned_modules_are_not_granted_twice() {
    let dbs = helpers::setup_test_databases().await.unwrap();
    let user_id = helpers::register_user(&dbs, "repeat@example.com").await.unwrap();

    let command = Command::new(dbs.evento.clone());
    let items = [item("one-on-ones", 2900)];
    let metadata = || EventMetadata::new(Some(user_id.clone()));

    command
        .complete_checkout(&user_id, &items, "", &[], &instant_gateway(), metadata())
        .await
        .unwrap();
    helpers::run_projections(&dbs).await.unwrap();

    let owned = owned_module_ids(&dbs.pool, &user_id, 0).await.unwrap();
    assert_eq!(owned, vec!["one-on-ones".to_string()]);

    // Re-checkout of an owned module grants nothing and, with nothing left
    // to grant, charges nothing: a declined gateway is never reached.
    let outcome = command
        .complete_checkout(&user_id, &items, "", &owned, &FailingGateway, metadata())
        .await
        .unwrap();
    assert!(outcome.granted.is_empty());
    assert_eq!(outcome.totals.total, 0);
    assert!(outcome.receipt.is_none());

    helpers::run_projections(&dbs).await.unwrap();

    let entitlements = list_for_user(&dbs.pool, &user_id).await.unwrap();
    assert_eq!(entitlements.len(), 1);
}

#[tokio::test]
async fn mixed_cart_charges_only_the_unowned_modules() {
    let dbs = helpers::setup_test_databases().await.unwrap();
    let user_id = helpers::register_user(&dbs, "mixed@example.com").await.unwrap();

    let command = Command::new(dbs.evento.clone());
    let metadata = || EventMetadata::new(Some(user_id.clone()));

    command
        .complete_checkout(
            &user_id,
            &[item("one-on-ones", 2900)],
            "",
            &[],
            &instant_gateway(),
            metadata(),
        )
        .await
        .unwrap();
    helpers::run_projections(&dbs).await.unwrap();
    let owned = owned_module_ids(&dbs.pool, &user_id, 0).await.unwrap();

    let outcome = command
        .complete_checkout(
            &user_id,
            &[item("one-on-ones", 2900), item("feedback-loops", 3400)],
            "",
            &owned,
            &instant_gateway(),
            metadata(),
        )
        .await
        .unwrap();

    // Only the new module is priced and charged
    assert_eq!(outcome.granted, vec!["feedback-loops".to_string()]);
    assert_eq!(outcome.totals.subtotal, 3400);
    assert_eq!(outcome.totals.total, 3400);
    assert_eq!(outcome.receipt.unwrap().amount, 3400);
}

#[tokio::test]
async fn expired_single_grant_does_not_block_regranting() {
    let dbs = helpers::setup_test_databases().await.unwrap();
    let user_id = helpers::register_user(&dbs, "lapsed-owner@example.com").await.unwrap();

    let now: i64 = 1_000_000;

    sqlx::query(
        "INSERT INTO entitlements (id, user_id, module_id, kind, expires_at, created_at)
         VALUES ('ent-expired', ?, 'one-on-ones', 'single', ?, ?)",
    )
    .bind(&user_id)
    .bind(now - 3600)
    .bind(now - 86_400)
    .execute(&dbs.pool)
    .await
    .unwrap();

    // The expired grant no longer counts as owned, so checkout may sell the
    // module again; an unexpired one still does.
    let owned = owned_module_ids(&dbs.pool, &user_id, now).await.unwrap();
    assert!(owned.is_empty());

    let owned_before_expiry = owned_module_ids(&dbs.pool, &user_id, now - 7200)
        .await
        .unwrap();
    assert_eq!(owned_before_expiry, vec!["one-on-ones".to_string()]);
}

#[tokio::test]
async fn free_only_cart_skips_the_gateway() {
    let dbs = helpers::setup_test_databases().await.unwrap();
    let user_id = helpers::register_user(&dbs, "free@example.com").await.unwrap();

    let command = Command::new(dbs.evento.clone());
    let items = [item("meeting-diet", 0)];

    // FailingGateway would error if charged; a zero total never reaches it
    let outcome = command
        .complete_checkout(
            &user_id,
            &items,
            "",
            &[],
            &FailingGateway,
            EventMetadata::new(Some(user_id.clone())),
        )
        .await
        .unwrap();

    assert_eq!(outcome.totals.total, 0);
    assert!(outcome.receipt.is_none());
    assert_eq!(outcome.granted, vec!["meeting-diet".to_string()]);
}
