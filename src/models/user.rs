//! User model sent when joining a lobby.

use serde::{Deserialize, Serialize};

/// Number of cards a player brings into a lobby.
pub const HAND_SIZE: usize = 5;

/// Request body for joining as a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub age: u32,
    pub company: String,
    pub email: String,
    pub role: String,
    pub cards: [String; HAND_SIZE],
}
