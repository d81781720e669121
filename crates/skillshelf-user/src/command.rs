//! User commands.

use crate::aggregate::User;
use crate::event::{EventMetadata, SignInLinkRequested, UserLoggedIn, UserRegistered};
use evento::Executor;
use tracing::info;
use validator::Validate;

/// Input for requesting a magic sign-in link.
#[derive(Validate)]
pub struct RequestSignInInput {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
}

/// Normalize an email the way the sign-in form accepts it: trimmed and
/// lowercased. An empty result is rejected by the caller before any command
/// runs.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Display name for a user: the email's local part, or a fixed fallback when
/// the email is unusable.
pub fn display_name(email: &str) -> String {
    match email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => "there".to_string(),
    }
}

/// User command handlers.
pub struct Command<E: Executor> {
    evento: E,
}

impl<E: Executor> Command<E> {
    pub fn new(evento: E) -> Self {
        Self { evento }
    }

    /// Request a sign-in link for a normalized email.
    ///
    /// `existing_user_id` is the read-model lookup result: when present the
    /// request is recorded against that account, otherwise a new account is
    /// registered first. Returns the user id the emailed token must name.
    pub async fn request_sign_in(
        &self,
        input: RequestSignInInput,
        existing_user_id: Option<String>,
        metadata: EventMetadata,
    ) -> anyhow::Result<String> {
        input.validate()?;

        let user_id = match existing_user_id {
            Some(id) => {
                evento::save::<User>(&id)
                    .data(&SignInLinkRequested {
                        email: input.email.clone(),
                    })?
                    .metadata(&metadata)?
                    .commit(&self.evento)
                    .await?;
                id
            }
            None => {
                let id = evento::create::<User>()
                    .data(&UserRegistered {
                        email: input.email.clone(),
                    })?
                    .metadata(&metadata)?
                    .commit(&self.evento)
                    .await?;

                info!(user_id = %id, email = %input.email, "Registered new user on sign-in request");

                evento::save::<User>(&id)
                    .data(&SignInLinkRequested {
                        email: input.email.clone(),
                    })?
                    .metadata(&metadata)?
                    .commit(&self.evento)
                    .await?;
                id
            }
        };

        info!(user_id = %user_id, "Sign-in link requested");

        Ok(user_id)
    }

    /// Confirm an emailed sign-in link and record the login.
    pub async fn confirm_sign_in(
        &self,
        user_id: &str,
        metadata: EventMetadata,
    ) -> anyhow::Result<()> {
        let loaded = evento::load::<User, _>(&self.evento, user_id).await?;
        if !loaded.item.registered {
            anyhow::bail!("unknown user");
        }

        evento::save::<User>(user_id)
            .data(&UserLoggedIn {})?
            .metadata(&metadata)?
            .commit(&self.evento)
            .await?;

        info!(user_id = %user_id, "User logged in");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  Lena@Example.COM "), "lena@example.com");
        assert_eq!(normalize_email("   "), "");
    }

    #[test]
    fn display_name_uses_local_part() {
        assert_eq!(display_name("lena@example.com"), "lena");
        assert_eq!(display_name(""), "there");
    }

    #[test]
    fn request_input_rejects_invalid_email() {
        let input = RequestSignInInput {
            email: "not-an-email".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn request_input_accepts_normalized_email() {
        let input = RequestSignInInput {
            email: normalize_email(" Someone@Example.com"),
        };
        assert!(input.validate().is_ok());
    }
}
