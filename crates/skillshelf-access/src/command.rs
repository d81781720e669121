//! Access commands: checkout and subscription.

use crate::aggregate::Access;
use crate::event::{EventMetadata, ModulePurchased, Plan, SubscriptionActivated};
use crate::payment::{PaymentError, PaymentGateway, PaymentReceipt};
use evento::Executor;
use skillshelf_cart::{OrderTotals, PricedItem, price_order};
use time::OffsetDateTime;
use tracing::info;
use ulid::Ulid;

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Outcome of a completed checkout.
#[derive(Debug)]
pub struct CheckoutOutcome {
    /// Module ids granted by this checkout. Already-owned modules are
    /// skipped, never double-granted.
    pub granted: Vec<String>,
    pub totals: OrderTotals,
    pub receipt: Option<PaymentReceipt>,
}

/// Access command handlers.
pub struct Command<E: Executor> {
    evento: E,
}

impl<E: Executor> Command<E> {
    pub fn new(evento: E) -> Self {
        Self { evento }
    }

    /// Convert a priced cart into single-purchase entitlements.
    ///
    /// Modules the user already owns are dropped before pricing, so they are
    /// neither charged nor re-granted. The gateway is charged for the
    /// discounted total of what remains before any event is written: a
    /// payment failure grants nothing and the caller keeps the cart
    /// untouched. `already_owned` comes from the read model.
    pub async fn complete_checkout(
        &self,
        user_id: &str,
        items: &[PricedItem],
        promo_code: &str,
        already_owned: &[String],
        gateway: &dyn PaymentGateway,
        metadata: EventMetadata,
    ) -> Result<CheckoutOutcome, AccessError> {
        let to_grant: Vec<&PricedItem> = items
            .iter()
            .filter(|item| {
                let owned = already_owned.contains(&item.module_id);
                if owned {
                    info!(
                        user_id = %user_id,
                        module_id = %item.module_id,
                        "Skipping already-owned module"
                    );
                }
                !owned
            })
            .collect();

        let priced: Vec<PricedItem> = to_grant.iter().map(|item| (*item).clone()).collect();
        let totals = price_order(&priced, promo_code);

        info!(
            user_id = %user_id,
            items = items.len(),
            to_grant = to_grant.len(),
            subtotal = totals.subtotal,
            discount = totals.discount,
            total = totals.total,
            request_id = %metadata.request_id,
            "Processing checkout"
        );

        let receipt = if totals.total > 0 {
            Some(gateway.charge(user_id, totals.total).await?)
        } else {
            None
        };
        let reference = receipt
            .as_ref()
            .map(|r| r.reference.clone())
            .unwrap_or_default();

        let mut granted = Vec::new();
        for item in to_grant {
            evento::save::<Access>(user_id)
                .data(&ModulePurchased {
                    entitlement_id: Ulid::new().to_string(),
                    module_id: item.module_id.clone(),
                    price: item.price,
                    payment_reference: reference.clone(),
                })?
                .metadata(&metadata)?
                .commit(&self.evento)
                .await?;

            granted.push(item.module_id.clone());
        }

        info!(
            user_id = %user_id,
            granted = granted.len(),
            "Checkout complete"
        );

        Ok(CheckoutOutcome {
            granted,
            totals,
            receipt,
        })
    }

    /// Capture a subscription and grant a plan-length subscription
    /// entitlement.
    pub async fn activate_subscription(
        &self,
        user_id: &str,
        plan: Plan,
        gateway: &dyn PaymentGateway,
        metadata: EventMetadata,
    ) -> Result<i64, AccessError> {
        let receipt = gateway.charge(user_id, plan.price()).await?;

        let expires_at =
            OffsetDateTime::now_utc().unix_timestamp() + plan.duration_days() * 86_400;

        evento::save::<Access>(user_id)
            .data(&SubscriptionActivated {
                entitlement_id: Ulid::new().to_string(),
                plan,
                expires_at: Some(expires_at),
                payment_reference: receipt.reference,
            })?
            .metadata(&metadata)?
            .commit(&self.evento)
            .await?;

        info!(user_id = %user_id, plan = %plan, expires_at, "Subscription activated");

        Ok(expires_at)
    }
}
