//! Validator rules.
//!
//! Every rule except [`Rule::Required`] passes on an empty value, so an
//! untouched optional field never reports anything but `required`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ErrorKind;

/// Names treated as already taken.
///
/// Stand-in for a server-side uniqueness check; not authoritative.
pub const EXISTING_NAMES: [&str; 2] = ["abc123", "123abc"];

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"#,
    )
    .expect("email pattern compiles")
});

/// A pure predicate over a field value, tagged with the error it reports.
#[derive(Debug, Clone)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// Whole-value match; the regex is anchored on construction
    Pattern(Regex),
    ExistingName,
    Email,
    Min(f64),
    Max(f64),
}

impl Rule {
    /// Build a pattern rule that must match the whole value.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Rule::Pattern(Regex::new(&format!("^(?:{})$", pattern))?))
    }

    /// The error kind reported when this rule fails.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Rule::Required => ErrorKind::Required,
            Rule::MinLength(_) => ErrorKind::MinLength,
            Rule::MaxLength(_) => ErrorKind::MaxLength,
            Rule::Pattern(_) => ErrorKind::Pattern,
            Rule::ExistingName => ErrorKind::ExistingName,
            Rule::Email => ErrorKind::Email,
            Rule::Min(_) => ErrorKind::Min,
            Rule::Max(_) => ErrorKind::Max,
        }
    }

    /// Whether `value` satisfies this rule.
    pub fn passes(&self, value: &str) -> bool {
        if value.is_empty() {
            return !matches!(self, Rule::Required);
        }

        match self {
            Rule::Required => true,
            Rule::MinLength(min) => value.chars().count() >= *min,
            Rule::MaxLength(max) => value.chars().count() <= *max,
            Rule::Pattern(regex) => regex.is_match(value),
            Rule::ExistingName => {
                let candidate = value.trim().to_lowercase();
                !EXISTING_NAMES.contains(&candidate.as_str())
            }
            Rule::Email => is_email(value),
            // Values that are not numbers are left to the pattern rule.
            Rule::Min(min) => numeric(value).map_or(true, |n| n >= *min),
            Rule::Max(max) => numeric(value).map_or(true, |n| n <= *max),
        }
    }
}

fn numeric(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn is_email(value: &str) -> bool {
    let local_len = value.split('@').next().map_or(0, str::len);
    value.len() <= EMAIL_MAX_LEN && local_len <= EMAIL_LOCAL_MAX_LEN && EMAIL.is_match(value)
}
