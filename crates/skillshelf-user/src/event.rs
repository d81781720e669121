//! User events.

use bincode::{Decode, Encode};

pub use skillshelf_shared::EventMetadata;

/// A new visitor registered through the sign-in form.
#[derive(evento::AggregatorName, Encode, Decode)]
pub struct UserRegistered {
    pub email: String,
}

/// A sign-in link was requested for an existing account.
#[derive(evento::AggregatorName, Encode, Decode)]
pub struct SignInLinkRequested {
    pub email: String,
}

/// The emailed link was confirmed and a session was established.
#[derive(evento::AggregatorName, Encode, Decode)]
pub struct UserLoggedIn {}
