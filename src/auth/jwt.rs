//! JWT minting and validation for sessions and emailed sign-in links.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Name of the session cookie.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// How long an emailed sign-in link stays valid.
const MAGIC_LINK_TTL_MINUTES: i64 = 15;

/// What a token is allowed to do. A sign-in link token must never pass as a
/// session, and the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Session,
    Magic,
}

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub purpose: TokenPurpose,
    /// Expiration timestamp (unix seconds)
    pub exp: i64,
    /// Issued-at timestamp (unix seconds)
    pub iat: i64,
}

/// Issue a session token for a signed-in user.
pub fn generate_session_token(
    user_id: &str,
    secret: &str,
    expiration_days: i64,
) -> anyhow::Result<String> {
    generate_token(
        user_id,
        secret,
        TokenPurpose::Session,
        Duration::days(expiration_days),
    )
}

/// Issue a short-lived token for an emailed sign-in link.
pub fn generate_magic_token(user_id: &str, secret: &str) -> anyhow::Result<String> {
    generate_token(
        user_id,
        secret,
        TokenPurpose::Magic,
        Duration::minutes(MAGIC_LINK_TTL_MINUTES),
    )
}

fn generate_token(
    user_id: &str,
    secret: &str,
    purpose: TokenPurpose,
    ttl: Duration,
) -> anyhow::Result<String> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.to_string(),
        purpose,
        exp: (now + ttl).unix_timestamp(),
        iat: now.unix_timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Validate a token and check it was minted for the expected purpose.
pub fn validate_token(token: &str, secret: &str, expected: TokenPurpose) -> anyhow::Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    if data.claims.purpose != expected {
        anyhow::bail!("token purpose mismatch");
    }

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_minimum_32_characters_long";

    #[test]
    fn session_token_round_trips() {
        let token = generate_session_token("user-1", SECRET, 7).unwrap();
        let claims = validate_token(&token, SECRET, TokenPurpose::Session).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn magic_token_is_not_a_session() {
        let token = generate_magic_token("user-1", SECRET).unwrap();
        assert!(validate_token(&token, SECRET, TokenPurpose::Session).is_err());
        assert!(validate_token(&token, SECRET, TokenPurpose::Magic).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_session_token("user-1", SECRET, 7).unwrap();
        let other = "another_secret_also_32_characters_x";
        assert!(validate_token(&token, other, TokenPurpose::Session).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(validate_token("not-a-jwt", SECRET, TokenPurpose::Session).is_err());
    }
}
