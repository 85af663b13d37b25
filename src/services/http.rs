//! Data service backed by the lobby REST API.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::DataService;
use crate::config::Config;
use crate::errors::ServiceError;
use crate::models::{Lobby, LobbyDraft, LobbyFilter, NewIdResponse, UserDraft};

/// Query parameter used to filter lobbies by name.
pub const LOBBY_NAME_KEY: &str = "lobbyName";

/// HTTP client for the `lobbies` and `users` endpoints.
#[derive(Debug, Clone)]
pub struct HttpDataService {
    client: Client,
    api_url: String,
}

impl HttpDataService {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ServiceError::new(0, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    pub fn lobby_url(&self) -> String {
        format!("{}lobbies", self.api_url)
    }

    pub fn user_url(&self) -> String {
        format!("{}users", self.api_url)
    }

    /// URL of a single lobby; `id` is escaped as one path segment.
    pub fn lobby_by_id_url(&self, id: &str) -> Result<Url, ServiceError> {
        let base = self.lobby_url();
        let mut url = Url::parse(&base).map_err(|e| {
            tracing::debug!("Invalid lobby URL {}: {}", base, e);
            ServiceError::unreachable(&base)
        })?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::unreachable(&base))?
            .push(id);
        Ok(url)
    }

    /// GET /api/lobbies - List lobbies, optionally filtered by name on the server.
    pub async fn get_lobbies(&self, filter: &LobbyFilter) -> Result<Vec<Lobby>, ServiceError> {
        let url = self.lobby_url();
        let mut request = self.client.get(&url);
        if let Some(name) = filter.lobby_name.as_deref().filter(|name| !name.is_empty()) {
            request = request.query(&[(LOBBY_NAME_KEY, name)]);
        }
        self.send(&url, request).await
    }

    /// GET /api/lobbies/:id - Get a single lobby.
    pub async fn get_lobby_by_id(&self, id: &str) -> Result<Lobby, ServiceError> {
        let url = self.lobby_by_id_url(id)?;
        let request = self.client.get(url.clone());
        self.send(url.as_str(), request).await
    }

    async fn post_for_id<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<String, ServiceError> {
        let request = self.client.post(url).json(body);
        let response: NewIdResponse = self.send(url, request).await?;
        Ok(response.id)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ServiceError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!("Request to {} failed: {}", url, e);
            ServiceError::unreachable(url)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::from_status(url, status));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::debug!("Undecodable body from {}: {}", url, e);
            ServiceError::parsing(url, status)
        })
    }
}

#[async_trait]
impl DataService for HttpDataService {
    /// POST /api/lobbies - Create a new lobby.
    async fn add_lobby(&self, draft: &LobbyDraft) -> Result<String, ServiceError> {
        self.post_for_id(&self.lobby_url(), draft).await
    }

    /// POST /api/users - Register a new user.
    async fn add_user(&self, draft: &UserDraft) -> Result<String, ServiceError> {
        self.post_for_id(&self.user_url(), draft).await
    }
}
