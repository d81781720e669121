//! User aggregate.

use crate::event::{EventMetadata, SignInLinkRequested, UserLoggedIn, UserRegistered};
use bincode::{Decode, Encode};
use evento::EventDetails;

/// A visitor account. Created on first sign-in request; there is no separate
/// registration form and no password.
#[derive(Default, Encode, Decode, Clone, Debug)]
pub struct User {
    pub email: String,
    pub registered: bool,
}

#[evento::aggregator]
impl User {
    async fn user_registered(
        &mut self,
        event: EventDetails<UserRegistered, EventMetadata>,
    ) -> anyhow::Result<()> {
        self.email = event.data.email;
        self.registered = true;
        Ok(())
    }

    async fn sign_in_link_requested(
        &mut self,
        _event: EventDetails<SignInLinkRequested, EventMetadata>,
    ) -> anyhow::Result<()> {
        // Link requests carry no state; the web layer mints the token.
        Ok(())
    }

    async fn user_logged_in(
        &mut self,
        _event: EventDetails<UserLoggedIn, EventMetadata>,
    ) -> anyhow::Result<()> {
        // Login timestamps live in the read model projection.
        Ok(())
    }
}
