//! Collaborators the submission controllers talk to.
//!
//! Each boundary is a trait so controllers receive their capabilities
//! explicitly instead of reaching for globals.

mod http;

pub use http::*;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::models::{LobbyDraft, UserDraft};

/// Remote store for lobbies and users.
///
/// Each call yields exactly one outcome: the new id, or a failure.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Create a lobby and return its id.
    async fn add_lobby(&self, draft: &LobbyDraft) -> Result<String, ServiceError>;

    /// Register a user and return its id.
    async fn add_user(&self, draft: &UserDraft) -> Result<String, ServiceError>;
}

/// Transient on-screen notifications. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn show(&self, text: &str, action: Option<&str>, duration_ms: u64);
}

/// Page navigation. Fire-and-forget.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

