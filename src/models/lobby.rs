//! Lobby model matching the server's lobby document.

use serde::{Deserialize, Serialize};

/// A game lobby as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lobby {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userIDs", default)]
    pub user_ids: Vec<String>,
    #[serde(rename = "lobbyName")]
    pub lobby_name: String,
}

/// Request body for creating a new lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyDraft {
    pub lobby_name: String,
}

/// Body returned by the server when a resource was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIdResponse {
    pub id: String,
}

/// Query filters for listing lobbies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LobbyFilter {
    pub lobby_name: Option<String>,
}

impl LobbyFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            lobby_name: Some(name.into()),
        }
    }
}

/// Keep the lobbies whose name contains the filter, ignoring case.
///
/// Matching is partial since it runs locally and can be repeated on every keystroke.
pub fn filter_lobbies(lobbies: &[Lobby], filter: &LobbyFilter) -> Vec<Lobby> {
    match filter.lobby_name.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => {
            let needle = name.to_lowercase();
            lobbies
                .iter()
                .filter(|lobby| lobby.lobby_name.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
        None => lobbies.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobbies() -> Vec<Lobby> {
        vec![
            Lobby {
                id: "lobby1_id".to_string(),
                user_ids: vec!["Bruh".to_string()],
                lobby_name: "Cards Against Humanity".to_string(),
            },
            Lobby {
                id: "lobby2_id".to_string(),
                user_ids: vec!["Bruh".to_string()],
                lobby_name: "Apples to Apples".to_string(),
            },
        ]
    }

    #[test]
    fn test_filter_by_partial_name_ignores_case() {
        let filtered = filter_lobbies(&lobbies(), &LobbyFilter::by_name("APPLES"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "lobby2_id");
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert_eq!(filter_lobbies(&lobbies(), &LobbyFilter::default()).len(), 2);
        assert_eq!(filter_lobbies(&lobbies(), &LobbyFilter::by_name("")).len(), 2);
    }

    #[test]
    fn test_lobby_wire_format() {
        let json = serde_json::json!({
            "_id": "abc",
            "userIDs": ["u1"],
            "lobbyName": "Test Lobby"
        });
        let lobby: Lobby = serde_json::from_value(json).unwrap();
        assert_eq!(lobby.lobby_name, "Test Lobby");
        assert_eq!(lobby.user_ids, vec!["u1".to_string()]);

        let draft = LobbyDraft {
            lobby_name: "Test Lobby".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({ "lobbyName": "Test Lobby" })
        );
    }
}
