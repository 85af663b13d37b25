//! Field schemas for the add-lobby and join forms.

use once_cell::sync::Lazy;

use super::rules::Rule;
use super::{ErrorKind, FormField};

static WHOLE_NUMBER: Lazy<Rule> =
    Lazy::new(|| Rule::pattern("^[0-9]+$").expect("whole number pattern compiles"));
static ROLE: Lazy<Rule> =
    Lazy::new(|| Rule::pattern("^(admin|editor|viewer)$").expect("role pattern compiles"));

/// Rules and messages of one field.
///
/// `messages` order is display priority: the first entry whose kind is
/// currently failing is the one shown.
#[derive(Debug, Clone)]
pub struct FieldSpec<F> {
    pub field: F,
    pub initial: String,
    pub rules: Vec<Rule>,
    pub messages: Vec<(ErrorKind, &'static str)>,
}

impl<F: FormField> FieldSpec<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            initial: String::new(),
            rules: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = value.into();
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn message(mut self, kind: ErrorKind, message: &'static str) -> Self {
        self.messages.push((kind, message));
        self
    }
}

/// Ordered field specs of a form.
#[derive(Debug, Clone)]
pub struct FieldSchema<F> {
    fields: Vec<FieldSpec<F>>,
}

impl<F: FormField> FieldSchema<F> {
    pub fn new(fields: Vec<FieldSpec<F>>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec<F>> {
        self.fields.iter()
    }

    pub fn spec(&self, field: F) -> Option<&FieldSpec<F>> {
        self.fields.iter().find(|spec| spec.field == field)
    }
}

/// Fields of the add-lobby form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LobbyField {
    LobbyName,
}

impl FormField for LobbyField {
    fn key(self) -> &'static str {
        match self {
            LobbyField::LobbyName => "lobbyName",
        }
    }
}

/// Fields of the join form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinField {
    Name,
    Age,
    Company,
    Email,
    Role,
    Card1,
    Card2,
    Card3,
    Card4,
    Card5,
}

impl JoinField {
    pub const CARDS: [JoinField; 5] = [
        JoinField::Card1,
        JoinField::Card2,
        JoinField::Card3,
        JoinField::Card4,
        JoinField::Card5,
    ];
}

impl FormField for JoinField {
    fn key(self) -> &'static str {
        match self {
            JoinField::Name => "name",
            JoinField::Age => "age",
            JoinField::Company => "company",
            JoinField::Email => "email",
            JoinField::Role => "role",
            JoinField::Card1 => "card1",
            JoinField::Card2 => "card2",
            JoinField::Card3 => "card3",
            JoinField::Card4 => "card4",
            JoinField::Card5 => "card5",
        }
    }
}

fn player_name<F: FormField>(field: F, required: &'static str) -> FieldSpec<F> {
    // An upper bound on names can exclude real people; 50 is generous enough here.
    FieldSpec::new(field)
        .rule(Rule::Required)
        .rule(Rule::MinLength(2))
        .rule(Rule::MaxLength(50))
        .rule(Rule::ExistingName)
        .message(ErrorKind::Required, required)
        .message(ErrorKind::MinLength, "Name must be at least 2 characters long")
        .message(
            ErrorKind::MaxLength,
            "Name cannot be more than 50 characters long",
        )
        .message(ErrorKind::ExistingName, "Name has already been taken")
}

/// Schema of the add-lobby form.
pub fn lobby_schema() -> FieldSchema<LobbyField> {
    FieldSchema::new(vec![player_name(
        LobbyField::LobbyName,
        "Lobby Name is required",
    )])
}

/// Schema of the join form.
pub fn join_schema() -> FieldSchema<JoinField> {
    let mut fields = vec![
        player_name(JoinField::Name, "Name is required"),
        FieldSpec::new(JoinField::Age)
            .rule(Rule::Required)
            .rule(Rule::Min(15.0))
            .rule(Rule::Max(200.0))
            .rule(WHOLE_NUMBER.clone())
            .message(ErrorKind::Required, "Age is required")
            .message(ErrorKind::Min, "Age must be at least 15")
            .message(ErrorKind::Max, "Age may not be greater than 200")
            .message(ErrorKind::Pattern, "Age must be a whole number"),
        FieldSpec::new(JoinField::Company),
        FieldSpec::new(JoinField::Email)
            .rule(Rule::Required)
            .rule(Rule::Email)
            .message(ErrorKind::Email, "Email must be formatted properly")
            .message(ErrorKind::Required, "Email is required"),
        FieldSpec::new(JoinField::Role)
            .initial("player")
            .rule(Rule::Required)
            .rule(ROLE.clone())
            .message(ErrorKind::Required, "Role is required")
            .message(ErrorKind::Pattern, "Role must be Admin, Editor, or Viewer"),
    ];

    // Cards declare no messages of their own.
    fields.extend(
        JoinField::CARDS
            .iter()
            .map(|&card| FieldSpec::new(card).rule(Rule::Required)),
    );

    FieldSchema::new(fields)
}
