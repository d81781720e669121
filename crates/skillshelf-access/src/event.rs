//! Access events.

use bincode::{Decode, Encode};
use strum::{Display, EnumString};

pub use skillshelf_shared::EventMetadata;

/// Subscription plan, as sold on the subscription page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Plan {
    Monthly,
    Yearly,
    Team,
}

impl Plan {
    /// Price per month in minor currency units.
    pub fn price(&self) -> u64 {
        match self {
            Plan::Monthly => 4990,
            Plan::Yearly => 3990,
            Plan::Team => 14990,
        }
    }

    /// Days of access granted by one capture.
    pub fn duration_days(&self) -> i64 {
        match self {
            Plan::Monthly | Plan::Team => 30,
            Plan::Yearly => 365,
        }
    }
}

/// A single-module purchase was captured.
#[derive(evento::AggregatorName, Encode, Decode)]
pub struct ModulePurchased {
    pub entitlement_id: String,
    pub module_id: String,
    pub price: u64,
    pub payment_reference: String,
}

/// A subscription was captured.
#[derive(evento::AggregatorName, Encode, Decode)]
pub struct SubscriptionActivated {
    pub entitlement_id: String,
    pub plan: Plan,
    /// Unix seconds; None would mean a lifetime grant (not sold today).
    pub expires_at: Option<i64>,
    pub payment_reference: String,
}
