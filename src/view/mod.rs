//! Headless rendering of the forms.
//!
//! Produces the markers automated UI tests key on: the submit control,
//! one error element per visibly-invalid field, and the notification.

use parking_lot::Mutex;
use serde::Serialize;

use crate::forms::{Form, FormField};
use crate::services::{Navigator, Notifier};

/// Test id of the add-lobby confirm button.
pub const ADD_LOBBY_BUTTON: &str = "confirmAddLobbyButton";
/// Test id of the join confirm button.
pub const JOIN_BUTTON: &str = "confirmJoinButton";

/// Test id of a field's error element.
pub fn error_marker(field: impl FormField) -> String {
    format!("{}Error", field.key())
}

/// The submit control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonView {
    pub test_id: &'static str,
    pub enabled: bool,
}

/// A visible field error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrorView {
    pub test_id: String,
    pub message: &'static str,
}

/// Everything a form currently renders that tests can observe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub submit: ButtonView,
    pub errors: Vec<FieldErrorView>,
}

impl FormView {
    pub fn render<F: FormField>(form: &Form<F>, button: &'static str) -> Self {
        let errors = form
            .schema()
            .fields()
            .filter(|spec| form.has_visible_error(spec.field))
            .filter_map(|spec| {
                form.error_message(spec.field).map(|message| FieldErrorView {
                    test_id: error_marker(spec.field),
                    message,
                })
            })
            .collect();

        Self {
            submit: ButtonView {
                test_id: button,
                enabled: form.is_valid(),
            },
            errors,
        }
    }

    pub fn error(&self, test_id: &str) -> Option<&FieldErrorView> {
        self.errors.iter().find(|error| error.test_id == test_id)
    }
}

/// A shown notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub text: String,
    pub action: Option<String>,
    pub duration_ms: u64,
}

/// Notification area; a new notification replaces the visible one.
#[derive(Debug, Default)]
pub struct SnackBar {
    history: Mutex<Vec<Notification>>,
}

impl SnackBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The notification currently on screen.
    pub fn current(&self) -> Option<Notification> {
        self.history.lock().last().cloned()
    }

    /// Every notification shown so far, oldest first.
    pub fn history(&self) -> Vec<Notification> {
        self.history.lock().clone()
    }
}

impl Notifier for SnackBar {
    fn show(&self, text: &str, action: Option<&str>, duration_ms: u64) {
        tracing::info!(action = ?action, duration_ms, "Notification: {}", text);
        self.history.lock().push(Notification {
            text: text.to_string(),
            action: action.map(str::to_string),
            duration_ms,
        });
    }
}

/// Navigation history, starting at the page the form lives on.
#[derive(Debug)]
pub struct Router {
    visited: Mutex<Vec<String>>,
    start: String,
}

impl Router {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            visited: Mutex::new(Vec::new()),
            start: start.into(),
        }
    }

    pub fn current_path(&self) -> String {
        self.visited
            .lock()
            .last()
            .cloned()
            .unwrap_or_else(|| self.start.clone())
    }

    /// Paths navigated to, excluding the start page.
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().clone()
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        tracing::info!("Navigating to {}", path);
        self.visited.lock().push(path.to_string());
    }
}
