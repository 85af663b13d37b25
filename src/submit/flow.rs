//! What each form submits, and where it goes afterwards.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::forms::{Form, FormField, JoinField, LobbyField};
use crate::models::{LobbyDraft, UserDraft, HAND_SIZE};
use crate::services::DataService;

/// Route shown after joining.
pub const JOINED_ROUTE: &str = "/lobby";

/// Route of a single lobby.
pub fn lobby_route(id: &str) -> String {
    format!("/lobbies/{}", id)
}

/// The two submit flows of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    AddLobby,
    Join,
}

impl FlowKind {
    /// What gets created, as used in failure text.
    pub fn noun(&self) -> &'static str {
        match self {
            FlowKind::AddLobby => "lobby",
            FlowKind::Join => "user",
        }
    }

    /// What the user asked for, as used in failure text.
    pub fn verb(&self) -> &'static str {
        match self {
            FlowKind::AddLobby => "add a new lobby",
            FlowKind::Join => "join",
        }
    }

    pub fn success_text(&self, name: &str) -> String {
        match self {
            FlowKind::AddLobby => format!("Added lobby {}", name),
            FlowKind::Join => format!("Joined as user {}", name),
        }
    }
}

/// A form-to-service binding driven by a submission controller.
#[async_trait]
pub trait Flow: Send + Sync + 'static {
    type Field: FormField;
    type Draft: Debug + Send + Sync + 'static;

    fn kind(&self) -> FlowKind;

    /// Snapshot the form into a draft; `None` if the values do not convert.
    fn draft(&self, form: &Form<Self::Field>) -> Option<Self::Draft>;

    /// Name echoed back in the success notification.
    fn subject<'a>(&self, draft: &'a Self::Draft) -> &'a str;

    async fn send(
        &self,
        service: &dyn DataService,
        draft: &Self::Draft,
    ) -> Result<String, ServiceError>;

    /// Route to open once the server assigned `id`.
    fn destination(&self, id: &str) -> String;
}

/// Hosting a new lobby.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddLobbyFlow;

#[async_trait]
impl Flow for AddLobbyFlow {
    type Field = LobbyField;
    type Draft = LobbyDraft;

    fn kind(&self) -> FlowKind {
        FlowKind::AddLobby
    }

    fn draft(&self, form: &Form<LobbyField>) -> Option<LobbyDraft> {
        Some(LobbyDraft {
            lobby_name: form.value(LobbyField::LobbyName).to_string(),
        })
    }

    fn subject<'a>(&self, draft: &'a LobbyDraft) -> &'a str {
        &draft.lobby_name
    }

    async fn send(
        &self,
        service: &dyn DataService,
        draft: &LobbyDraft,
    ) -> Result<String, ServiceError> {
        service.add_lobby(draft).await
    }

    fn destination(&self, id: &str) -> String {
        lobby_route(id)
    }
}

/// Joining as a new player.
#[derive(Debug, Clone, Copy, Default)]
pub struct JoinFlow;

#[async_trait]
impl Flow for JoinFlow {
    type Field = JoinField;
    type Draft = UserDraft;

    fn kind(&self) -> FlowKind {
        FlowKind::Join
    }

    fn draft(&self, form: &Form<JoinField>) -> Option<UserDraft> {
        let age = form.value(JoinField::Age).trim().parse::<u32>().ok()?;
        let cards: [String; HAND_SIZE] =
            JoinField::CARDS.map(|card| form.value(card).to_string());

        Some(UserDraft {
            name: form.value(JoinField::Name).to_string(),
            age,
            company: form.value(JoinField::Company).to_string(),
            email: form.value(JoinField::Email).to_string(),
            role: form.value(JoinField::Role).to_string(),
            cards,
        })
    }

    fn subject<'a>(&self, draft: &'a UserDraft) -> &'a str {
        &draft.name
    }

    async fn send(
        &self,
        service: &dyn DataService,
        draft: &UserDraft,
    ) -> Result<String, ServiceError> {
        service.add_user(draft).await
    }

    fn destination(&self, _id: &str) -> String {
        JOINED_ROUTE.to_string()
    }
}
