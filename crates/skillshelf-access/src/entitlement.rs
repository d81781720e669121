//! Entitlement records and the access rule.
//!
//! The rules are pure functions over a fetched slice of entitlements so they
//! can be tested without a database. A "single" entitlement always names a
//! module; a "subscription" entitlement never does.

use strum::{Display, EnumString};

/// Kind of access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, sqlx::Type)]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EntitlementKind {
    Single,
    Subscription,
}

/// An access grant, read from the `entitlements` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Entitlement {
    pub id: String,
    pub user_id: String,
    /// Present for single-module grants, NULL for subscription-wide grants.
    pub module_id: Option<String>,
    pub kind: EntitlementKind,
    /// Unix seconds. NULL means the grant never expires.
    pub expires_at: Option<i64>,
    pub created_at: i64,
}

/// An entitlement with no expiry never expires; otherwise it is expired once
/// the expiry is at or before `now`.
pub fn is_expired(expires_at: Option<i64>, now: i64) -> bool {
    matches!(expires_at, Some(t) if t <= now)
}

/// True iff some unexpired single entitlement names this module.
pub fn has_purchased(entitlements: &[Entitlement], module_id: &str, now: i64) -> bool {
    entitlements.iter().any(|e| {
        e.kind == EntitlementKind::Single
            && e.module_id.as_deref() == Some(module_id)
            && !is_expired(e.expires_at, now)
    })
}

/// True iff some unexpired subscription entitlement exists.
pub fn has_subscription(entitlements: &[Entitlement], now: i64) -> bool {
    entitlements
        .iter()
        .any(|e| e.kind == EntitlementKind::Subscription && !is_expired(e.expires_at, now))
}

/// The access rule: a purchased single item OR an active subscription grants
/// playback and downloads, for every module regardless of price.
pub fn can_access(entitlements: &[Entitlement], module_id: &str, now: i64) -> bool {
    has_purchased(entitlements, module_id, now) || has_subscription(entitlements, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(module_id: &str, expires_at: Option<i64>) -> Entitlement {
        Entitlement {
            id: format!("ent-{module_id}"),
            user_id: "u1".into(),
            module_id: Some(module_id.into()),
            kind: EntitlementKind::Single,
            expires_at,
            created_at: 0,
        }
    }

    fn subscription(expires_at: Option<i64>) -> Entitlement {
        Entitlement {
            id: "ent-sub".into(),
            user_id: "u1".into(),
            module_id: None,
            kind: EntitlementKind::Subscription,
            expires_at,
            created_at: 0,
        }
    }

    const NOW: i64 = 1_000_000;

    #[test]
    fn no_expiry_never_expires() {
        assert!(!is_expired(None, NOW));
        assert!(!is_expired(Some(NOW + 1), NOW));
    }

    #[test]
    fn expiry_at_or_before_now_expires() {
        assert!(is_expired(Some(NOW), NOW));
        assert!(is_expired(Some(NOW - 1), NOW));
    }

    #[test]
    fn purchased_module_grants_access() {
        let ents = [single("m1", None)];
        assert!(has_purchased(&ents, "m1", NOW));
        assert!(!has_purchased(&ents, "m2", NOW));
        assert!(can_access(&ents, "m1", NOW));
        assert!(!can_access(&ents, "m2", NOW));
    }

    #[test]
    fn expired_purchase_does_not_grant() {
        let ents = [single("m1", Some(NOW - 10))];
        assert!(!has_purchased(&ents, "m1", NOW));
        assert!(!can_access(&ents, "m1", NOW));
    }

    #[test]
    fn active_subscription_grants_every_module() {
        let ents = [subscription(Some(NOW + 86_400))];
        assert!(has_subscription(&ents, NOW));
        assert!(can_access(&ents, "m1", NOW));
        assert!(can_access(&ents, "anything", NOW));
    }

    #[test]
    fn expired_subscription_does_not_grant() {
        let ents = [subscription(Some(NOW - 1))];
        assert!(!has_subscription(&ents, NOW));
        assert!(!can_access(&ents, "m1", NOW));
    }

    #[test]
    fn purchase_or_subscription_is_the_only_condition() {
        assert!(!can_access(&[], "m1", NOW));
        let both = [single("m1", None), subscription(None)];
        assert!(can_access(&both, "m1", NOW));
        assert!(can_access(&both, "m2", NOW));
    }
}
