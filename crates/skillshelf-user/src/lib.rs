//! User bounded context: accounts created through magic-link sign-in.

pub mod aggregate;
pub mod command;
pub mod event;

pub use aggregate::User;
pub use command::{Command, RequestSignInInput, display_name, normalize_email};
pub use event::EventMetadata;
