//! Types shared by the skillshelf domain crates.

use bincode::{Decode, Encode};
use ulid::Ulid;

/// Event metadata carrying user context and request tracing.
#[derive(Encode, Decode, Clone, Debug)]
pub struct EventMetadata {
    /// User who triggered the event, when known.
    pub user_id: Option<String>,
    /// Unique request ID (ULID) for tracing event chains.
    pub request_id: String,
}

impl EventMetadata {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id,
            request_id: Ulid::new().to_string(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new(None)
    }
}
