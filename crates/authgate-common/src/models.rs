//! Wire and form types for the authentication API.
//!
//! These mirror the JSON bodies exchanged with the backend's `/login`,
//! `/register` and `/private` endpoints, plus the form-side types that
//! never leave the browser.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Session token ───────────────────────────────────────────────────

/// Opaque credential issued by the server on a successful login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

// ── User ────────────────────────────────────────────────────────────

/// User identifier. The backend emits integer ids, but string ids are
/// accepted so a stored record written by another client still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// The server's canonical representation of a user.
///
/// `/login` only returns `id` and `email`; `/private` returns the full
/// serialized row. Fields this client does not know about are kept in
/// `extra` so the stored copy matches what the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

// ── Login ───────────────────────────────────────────────────────────

/// Email/password pair held by the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of a successful `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "Token")]
    pub token: SessionToken,
    pub user: UserRecord,
    #[serde(default)]
    pub msg: Option<String>,
}

// ── Registration ────────────────────────────────────────────────────

/// Everything the registration form collects. Only [`RegisterBody`]
/// is ever sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegistrationRequest {
    /// Check the confirmation locally and build the wire body.
    pub fn validate(&self) -> Result<RegisterBody, RegistrationError> {
        if self.password != self.password_confirmation {
            return Err(RegistrationError::PasswordMismatch);
        }
        Ok(RegisterBody {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Local validation failures for the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ── Protected resource ──────────────────────────────────────────────

/// Body of a successful `GET /private`.
#[derive(Debug, Clone, Deserialize)]
pub struct PrivateResponse {
    pub user: UserRecord,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub msg: Option<String>,
}
