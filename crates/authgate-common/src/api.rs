//! The backend API seam.
//!
//! Controllers talk to the server only through [`AuthApi`]; the web crate
//! implements it over gloo-net, tests implement it with scripted replies.

use thiserror::Error;

use crate::models::{
    ApiErrorResponse, Credentials, LoginResponse, RegisterBody, SessionToken, UserRecord,
};

pub const LOGIN_ENDPOINT: &str = "/login";
pub const REGISTER_ENDPOINT: &str = "/register";
pub const PRIVATE_ENDPOINT: &str = "/private";

/// Ergonomic result alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("request rejected with HTTP {status}")]
    Rejected { status: u16, message: Option<String> },
    /// The request never completed or the body could not be decoded.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Classify the body of a non-2xx reply.
    ///
    /// A JSON error object is a rejection, with or without `msg`. Anything
    /// else (an HTML error page from a proxy, an empty body) means the
    /// server never gave a verdict, so it is a transport failure.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(parsed) => ApiError::rejected(status, parsed.msg),
            Err(e) => ApiError::Transport(format!("HTTP {status} with unreadable body: {e}")),
        }
    }

    /// Server-provided message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            ApiError::Transport(_) => None,
        }
    }
}

/// Join a base URL and an endpoint path without doubling the slash.
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint)
}

/// Calls the three endpoints the pages need.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /login` with session cookies included.
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse>;
    /// `POST /register` without credentials.
    async fn register(&self, body: &RegisterBody) -> ApiResult<()>;
    /// `GET /private` with a bearer token. Returns the server's user record.
    async fn fetch_private(&self, token: &SessionToken) -> ApiResult<UserRecord>;
}
