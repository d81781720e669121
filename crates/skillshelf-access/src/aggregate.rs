//! Access aggregate: one stream per user holding every grant.

use crate::event::{EventMetadata, ModulePurchased, SubscriptionActivated};
use bincode::{Decode, Encode};
use evento::EventDetails;

#[derive(Default, Encode, Decode, Clone, Debug)]
pub struct Access {
    /// Module ids with a single-purchase grant. Deduplicated on write.
    pub purchased: Vec<String>,
    /// Latest subscription expiry, unix seconds.
    pub subscription_expires_at: Option<i64>,
}

#[evento::aggregator]
impl Access {
    async fn module_purchased(
        &mut self,
        event: EventDetails<ModulePurchased, EventMetadata>,
    ) -> anyhow::Result<()> {
        if !self.purchased.contains(&event.data.module_id) {
            self.purchased.push(event.data.module_id);
        }
        Ok(())
    }

    async fn subscription_activated(
        &mut self,
        event: EventDetails<SubscriptionActivated, EventMetadata>,
    ) -> anyhow::Result<()> {
        self.subscription_expires_at = event.data.expires_at;
        Ok(())
    }
}
