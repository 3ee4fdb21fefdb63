//! Shape rules for login input.
//!
//! Rules are a static table of field name to constraints, evaluated in
//! table order. Evaluation stops at the first failing constraint of a
//! field but always visits every field, so the caller gets the full
//! list of violations.

use validator::ValidateLength;

/// Length of the client-side password digest, in hex characters.
pub const CLIENT_DIGEST_LENGTH: u64 = 32;

/// Credentials submitted to the login endpoint.
#[derive(Clone, Default)]
pub struct LoginInput {
    /// Account name.
    pub name: String,
    /// Client-side digest of the password (32 hex characters).
    pub password: String,
    /// Captcha answer.
    pub captcha: String,
    /// Correlation id of the captcha being answered.
    pub captcha_id: String,
}

impl std::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInput")
            .field("name", &self.name)
            .field("captcha_id", &self.captcha_id)
            .finish_non_exhaustive()
    }
}

/// A single constraint on a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value must be non-empty.
    Required,
    /// Value must have exactly this many characters.
    ExactLength(u64),
    /// Value must consist of ASCII hex digits only.
    HexDigits,
}

impl Constraint {
    fn holds(self, value: &str) -> bool {
        match self {
            Self::Required => !value.is_empty(),
            Self::ExactLength(n) => value.validate_length(None, None, Some(n)),
            Self::HexDigits => value.chars().all(|c| c.is_ascii_hexdigit()),
        }
    }

    fn message(self, label: &str) -> String {
        match self {
            Self::Required => format!("{label} is required"),
            Self::ExactLength(n) => format!("{label} must be {n} characters"),
            Self::HexDigits => format!("{label} must be hexadecimal"),
        }
    }
}

/// A failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field the constraint applies to.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Password,
    Captcha,
    CaptchaId,
}

impl Field {
    fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Password => "password",
            Self::Captcha => "captcha",
            Self::CaptchaId => "captcha_id",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Account name",
            Self::Password => "Password",
            Self::Captcha => "Captcha",
            Self::CaptchaId => "Captcha id",
        }
    }

    fn value(self, input: &LoginInput) -> &str {
        match self {
            Self::Name => &input.name,
            Self::Password => &input.password,
            Self::Captcha => &input.captcha,
            Self::CaptchaId => &input.captcha_id,
        }
    }
}

/// Rule table for [`LoginInput`].
#[derive(Debug, Clone)]
pub struct LoginRules {
    table: Vec<(Field, Vec<Constraint>)>,
}

impl LoginRules {
    /// Builds the table for captcha codes of `captcha_length` characters.
    pub fn new(captcha_length: usize) -> Self {
        Self {
            table: vec![
                (Field::Name, vec![Constraint::Required]),
                (
                    Field::Password,
                    vec![
                        Constraint::Required,
                        Constraint::ExactLength(CLIENT_DIGEST_LENGTH),
                        Constraint::HexDigits,
                    ],
                ),
                (
                    Field::Captcha,
                    vec![
                        Constraint::Required,
                        Constraint::ExactLength(captcha_length as u64),
                    ],
                ),
                (Field::CaptchaId, vec![Constraint::Required]),
            ],
        }
    }

    /// Evaluates every rule against `input`.
    pub fn check(&self, input: &LoginInput) -> Vec<Violation> {
        self.table
            .iter()
            .filter_map(|(field, constraints)| {
                let value = field.value(input);
                constraints
                    .iter()
                    .find(|c| !c.holds(value))
                    .map(|c| Violation {
                        field: field.key(),
                        message: c.message(field.label()),
                    })
            })
            .collect()
    }
}
