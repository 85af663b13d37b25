//! Form validation.
//!
//! A [`Form`] owns a [`FieldSchema`] and the current [`FormState`]. Every
//! mutation recomputes all errors synchronously, so [`Form::is_valid`] is
//! never stale with respect to the values it holds.

mod rules;
mod schema;

pub use rules::*;
pub use schema::*;

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// Shown when a field fails but none of its declared messages match.
pub const UNKNOWN_ERROR: &str = "Unknown error";

static NO_ERRORS: BTreeSet<ErrorKind> = BTreeSet::new();

/// A closed set of field names for one form.
pub trait FormField: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Stable name of the field, as used in rendered markers.
    fn key(self) -> &'static str;
}

/// Kind of a failing validator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    ExistingName,
    Email,
    Min,
    Max,
    /// Error set from outside the schema's validators
    Other(String),
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::MinLength => "minlength",
            ErrorKind::MaxLength => "maxlength",
            ErrorKind::Pattern => "pattern",
            ErrorKind::ExistingName => "existingName",
            ErrorKind::Email => "email",
            ErrorKind::Min => "min",
            ErrorKind::Max => "max",
            ErrorKind::Other(kind) => kind.as_str(),
        }
    }
}

/// Interaction and validation state of one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    pub value: String,
    /// The user has left the field at least once
    pub touched: bool,
    /// The user has changed the value at least once
    pub dirty: bool,
    pub errors: BTreeSet<ErrorKind>,
}

/// State of every field of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F: FormField> {
    fields: HashMap<F, FieldState>,
}

impl<F: FormField> FormState<F> {
    /// Fresh state holding each field's initial value, not yet validated.
    pub fn initial(schema: &FieldSchema<F>) -> Self {
        let fields = schema
            .fields()
            .map(|spec| {
                (
                    spec.field,
                    FieldState {
                        value: spec.initial.clone(),
                        ..FieldState::default()
                    },
                )
            })
            .collect();
        Self { fields }
    }

    pub fn field(&self, field: F) -> Option<&FieldState> {
        self.fields.get(&field)
    }

    fn field_mut(&mut self, field: F) -> &mut FieldState {
        self.fields.entry(field).or_default()
    }

    /// Whether every field has an empty error set.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|state| state.errors.is_empty())
    }
}

/// Recompute every field's error set from its current value.
pub fn validate<F: FormField>(schema: &FieldSchema<F>, state: &FormState<F>) -> FormState<F> {
    let mut next = state.clone();
    for spec in schema.fields() {
        let field = next.field_mut(spec.field);
        field.errors = spec
            .rules
            .iter()
            .filter(|rule| !rule.passes(&field.value))
            .map(Rule::kind)
            .collect();
    }
    next
}

/// Message to display for a field, if it has any error.
///
/// Returns the first declared message whose kind is failing, or
/// [`UNKNOWN_ERROR`] when the field fails without a matching message.
pub fn error_message<F: FormField>(
    schema: &FieldSchema<F>,
    state: &FormState<F>,
    field: F,
) -> Option<&'static str> {
    let errors = &state.field(field)?.errors;
    if errors.is_empty() {
        return None;
    }

    let declared = schema
        .spec(field)
        .and_then(|spec| {
            spec.messages
                .iter()
                .find(|(kind, _)| errors.contains(kind))
                .map(|(_, message)| *message)
        })
        .unwrap_or(UNKNOWN_ERROR);
    Some(declared)
}

/// A schema together with its live state.
#[derive(Debug, Clone)]
pub struct Form<F: FormField> {
    schema: FieldSchema<F>,
    state: FormState<F>,
}

impl<F: FormField> Form<F> {
    pub fn new(schema: FieldSchema<F>) -> Self {
        let state = validate(&schema, &FormState::initial(&schema));
        Self { schema, state }
    }

    pub fn schema(&self) -> &FieldSchema<F> {
        &self.schema
    }

    pub fn state(&self) -> &FormState<F> {
        &self.state
    }

    /// Value typed by the user; marks the field dirty.
    pub fn set_value(&mut self, field: F, value: impl Into<String>) {
        let state = self.state.field_mut(field);
        state.value = value.into();
        state.dirty = true;
        self.revalidate();
    }

    /// Value set by code; leaves interaction flags alone.
    pub fn patch_value(&mut self, field: F, value: impl Into<String>) {
        self.state.field_mut(field).value = value.into();
        self.revalidate();
    }

    /// The user left the field.
    pub fn blur(&mut self, field: F) {
        self.state.field_mut(field).touched = true;
        self.revalidate();
    }

    pub fn mark_all_touched(&mut self) {
        let fields: Vec<F> = self.schema.fields().map(|spec| spec.field).collect();
        for field in fields {
            self.state.field_mut(field).touched = true;
        }
    }

    /// Replace a field's errors until the next recomputation.
    pub fn set_errors(&mut self, field: F, errors: impl IntoIterator<Item = ErrorKind>) {
        self.state.field_mut(field).errors = errors.into_iter().collect();
    }

    /// Back to initial values, untouched and pristine.
    pub fn reset(&mut self) {
        self.state = validate(&self.schema, &FormState::initial(&self.schema));
    }

    pub fn value(&self, field: F) -> &str {
        self.state.field(field).map_or("", |state| state.value.as_str())
    }

    pub fn errors(&self, field: F) -> &BTreeSet<ErrorKind> {
        self.state.field(field).map_or(&NO_ERRORS, |state| &state.errors)
    }

    pub fn has_error(&self, field: F, kind: &ErrorKind) -> bool {
        self.errors(field).contains(kind)
    }

    /// Whether the confirm action is enabled.
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// Invalid and already interacted with, so its error should be shown.
    pub fn has_visible_error(&self, field: F) -> bool {
        self.state.field(field).is_some_and(|state| {
            !state.errors.is_empty() && (state.dirty || state.touched)
        })
    }

    pub fn error_message(&self, field: F) -> Option<&'static str> {
        error_message(&self.schema, &self.state, field)
    }

    fn revalidate(&mut self) {
        self.state = validate(&self.schema, &self.state);
        tracing::debug!(valid = self.state.is_valid(), "Form revalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby_form() -> Form<LobbyField> {
        Form::new(lobby_schema())
    }

    fn filled_join_form() -> Form<JoinField> {
        let mut form = Form::new(join_schema());
        form.set_value(JoinField::Name, "Chris Smith");
        form.set_value(JoinField::Age, "27");
        form.set_value(JoinField::Email, "chris@example.com");
        form.set_value(JoinField::Role, "viewer");
        for (i, card) in JoinField::CARDS.into_iter().enumerate() {
            form.set_value(card, format!("card-{}", i));
        }
        form
    }

    #[test]
    fn test_empty_form_is_invalid() {
        let form = lobby_form();
        assert!(!form.is_valid());
        assert!(form.has_error(LobbyField::LobbyName, &ErrorKind::Required));
        assert_eq!(
            form.error_message(LobbyField::LobbyName),
            Some("Lobby Name is required")
        );
    }

    #[test]
    fn test_errors_hidden_until_interaction() {
        let mut form = lobby_form();
        assert!(!form.has_visible_error(LobbyField::LobbyName));

        form.blur(LobbyField::LobbyName);
        assert!(form.has_visible_error(LobbyField::LobbyName));

        form.set_value(LobbyField::LobbyName, "John Smith");
        assert!(!form.has_visible_error(LobbyField::LobbyName));
    }

    #[test]
    fn test_patch_value_does_not_mark_dirty() {
        let mut form = lobby_form();
        form.patch_value(LobbyField::LobbyName, "x");
        assert!(!form.is_valid());
        assert!(!form.has_visible_error(LobbyField::LobbyName));
        assert!(!form.state().field(LobbyField::LobbyName).unwrap().dirty);
    }

    #[test]
    fn test_valid_names() {
        let mut form = lobby_form();
        let longest = "x".repeat(50);
        for name in ["Chris Smith", "Bad2Th3B0ne", "xy", longest.as_str()] {
            form.set_value(LobbyField::LobbyName, name);
            assert!(form.is_valid(), "{:?} should be valid", name);
            assert_eq!(form.error_message(LobbyField::LobbyName), None);
        }
    }

    #[test]
    fn test_single_character_shows_minlength() {
        let mut form = lobby_form();
        form.set_value(LobbyField::LobbyName, "x");
        assert!(form.has_error(LobbyField::LobbyName, &ErrorKind::MinLength));
        assert_eq!(
            form.error_message(LobbyField::LobbyName),
            Some("Name must be at least 2 characters long")
        );
    }

    #[test]
    fn test_long_name_shows_maxlength() {
        let mut form = lobby_form();
        form.set_value(LobbyField::LobbyName, "x".repeat(100));
        assert_eq!(
            form.error_message(LobbyField::LobbyName),
            Some("Name cannot be more than 50 characters long")
        );
    }

    #[test]
    fn test_existing_names_rejected() {
        let mut form = lobby_form();
        for name in ["abc123", "123abc", "ABC123"] {
            form.set_value(LobbyField::LobbyName, name);
            assert!(!form.is_valid());
            assert_eq!(
                form.error_message(LobbyField::LobbyName),
                Some("Name has already been taken")
            );
        }
    }

    #[test]
    fn test_validity_tracks_every_edit() {
        let mut form = lobby_form();
        form.set_value(LobbyField::LobbyName, "t");
        assert!(!form.is_valid());
        form.set_value(LobbyField::LobbyName, "te");
        assert!(form.is_valid());
        form.set_value(LobbyField::LobbyName, "");
        assert!(!form.is_valid());
    }

    #[test]
    fn test_set_errors_resolves_declared_message() {
        let mut form = lobby_form();
        form.set_value(LobbyField::LobbyName, "Chris");
        form.set_errors(LobbyField::LobbyName, [ErrorKind::Required]);
        assert_eq!(
            form.error_message(LobbyField::LobbyName),
            Some("Lobby Name is required")
        );
    }

    #[test]
    fn test_unmatched_error_is_unknown() {
        let mut form = lobby_form();
        form.set_errors(
            LobbyField::LobbyName,
            [ErrorKind::Other("unknown".to_string())],
        );
        assert_eq!(form.error_message(LobbyField::LobbyName), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn test_missing_card_is_unknown_error() {
        let mut form = filled_join_form();
        assert!(form.is_valid());

        form.set_value(JoinField::Card4, "");
        assert!(!form.is_valid());
        assert_eq!(form.error_message(JoinField::Card4), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn test_join_role_starts_invalid() {
        let form = Form::new(join_schema());
        assert_eq!(form.value(JoinField::Role), "player");
        assert_eq!(
            form.error_message(JoinField::Role),
            Some("Role must be Admin, Editor, or Viewer")
        );
    }

    #[test]
    fn test_age_messages() {
        let mut form = filled_join_form();
        let cases = [
            ("", Some("Age is required")),
            ("14", Some("Age must be at least 15")),
            ("201", Some("Age may not be greater than 200")),
            ("abc", Some("Age must be a whole number")),
            ("15", None),
            ("200", None),
        ];
        for (age, expected) in cases {
            form.set_value(JoinField::Age, age);
            assert_eq!(form.error_message(JoinField::Age), expected, "age {:?}", age);
        }
    }

    #[test]
    fn test_email_messages() {
        let mut form = filled_join_form();
        form.set_value(JoinField::Email, "");
        assert_eq!(form.error_message(JoinField::Email), Some("Email is required"));
        form.set_value(JoinField::Email, "not-an-email");
        assert_eq!(
            form.error_message(JoinField::Email),
            Some("Email must be formatted properly")
        );
    }

    #[test]
    fn test_company_is_optional() {
        let form = filled_join_form();
        assert_eq!(form.value(JoinField::Company), "");
        assert!(form.errors(JoinField::Company).is_empty());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut form = filled_join_form();
        form.mark_all_touched();
        form.reset();
        assert_eq!(form.value(JoinField::Name), "");
        assert_eq!(form.value(JoinField::Role), "player");
        assert!(!form.has_visible_error(JoinField::Name));
        assert!(!form.is_valid());
    }

    #[test]
    fn test_validate_is_pure() {
        let schema = lobby_schema();
        let state = FormState::initial(&schema);
        let first = validate(&schema, &state);
        let second = validate(&schema, &state);
        assert_eq!(first, second);
        assert!(state.field(LobbyField::LobbyName).unwrap().errors.is_empty());
        assert!(!first.is_valid());
    }
}
