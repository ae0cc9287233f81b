//! HTTP client for the authentication backend.
//!
//! Implements [`AuthApi`] over gloo-net. JSON bodies, bearer auth on
//! `/private`, cookies included on `/login`. The base URL comes from
//! [`AppConfig`](authgate_common::config::AppConfig).

use authgate_common::api::{
    endpoint_url, ApiError, ApiResult, AuthApi, LOGIN_ENDPOINT, PRIVATE_ENDPOINT,
    REGISTER_ENDPOINT,
};
use authgate_common::models::{
    Credentials, LoginResponse, PrivateResponse, RegisterBody, SessionToken, UserRecord,
};
use gloo_net::http::{Request, Response};
use web_sys::RequestCredentials;

#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        endpoint_url(&self.base_url, endpoint)
    }
}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Classify a non-2xx response. Only a JSON error body counts as a rejection.
async fn parse_error(resp: Response) -> ApiError {
    let status = resp.status();
    match resp.text().await {
        Ok(body) => ApiError::from_error_body(status, &body),
        Err(e) => transport(e),
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let resp = Request::post(&self.url(LOGIN_ENDPOINT))
            .credentials(RequestCredentials::Include)
            .json(credentials)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;

        if resp.ok() {
            resp.json().await.map_err(transport)
        } else {
            Err(parse_error(resp).await)
        }
    }

    async fn register(&self, body: &RegisterBody) -> ApiResult<()> {
        let resp = Request::post(&self.url(REGISTER_ENDPOINT))
            .json(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;

        if resp.ok() {
            Ok(())
        } else {
            Err(parse_error(resp).await)
        }
    }

    async fn fetch_private(&self, token: &SessionToken) -> ApiResult<UserRecord> {
        let resp = Request::get(&self.url(PRIVATE_ENDPOINT))
            .header("Authorization", &token.bearer())
            .send()
            .await
            .map_err(transport)?;

        if resp.ok() {
            let body: PrivateResponse = resp.json().await.map_err(transport)?;
            Ok(body.user)
        } else {
            Err(parse_error(resp).await)
        }
    }
}
