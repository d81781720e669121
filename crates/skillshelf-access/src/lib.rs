//! Access bounded context: entitlements, the access rule, and the commands
//! that grant access (checkout, subscription).

pub mod aggregate;
pub mod command;
pub mod entitlement;
pub mod event;
pub mod payment;

pub use aggregate::Access;
pub use command::{AccessError, CheckoutOutcome, Command};
pub use entitlement::{
    Entitlement, EntitlementKind, can_access, has_purchased, has_subscription, is_expired,
};
pub use event::{EventMetadata, Plan};
pub use payment::{PaymentError, PaymentGateway, PaymentReceipt, SimulatedGateway};
