//! Lobby client
//!
//! Headless front end of the card-game lobby: validates the host and join
//! forms, submits them to the lobby REST API, and reports the outcome through
//! notification and navigation sinks.

pub mod config;
pub mod errors;
pub mod forms;
pub mod models;
pub mod services;
pub mod submit;
pub mod view;

pub use config::Config;
pub use errors::{classify, Classified, FailureKind, ServiceError};
pub use forms::{ErrorKind, Form, FormField, JoinField, LobbyField};
pub use services::{DataService, HttpDataService, Navigator, Notifier};
pub use submit::{
    AddLobbyController, AddLobbyFlow, FlowKind, JoinController, JoinFlow, SubmissionController,
    SubmissionOutcome, SubmissionState, SubmitResult,
};
