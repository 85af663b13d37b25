//! Data models for the lobby client.
//!
//! These models match the server's JSON documents exactly for seamless interoperability.

mod lobby;
mod user;

pub use lobby::*;
pub use user::*;
