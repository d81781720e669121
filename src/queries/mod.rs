pub mod entitlement;
pub mod user;
