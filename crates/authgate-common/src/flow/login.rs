//! Login form submission.

use crate::alert::{self, Alert};
use crate::api::{ApiError, AuthApi};
use crate::flow::{Delay, Liveness, Navigator, StateSink};
use crate::models::Credentials;
use crate::routes::Route;
use crate::session::{Session, SessionStore};

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session stored and navigation to the protected page issued.
    LoggedIn,
    /// Server rejected the credentials.
    Rejected,
    /// Request failed or the reply was unreadable.
    TransportFailed,
    /// Login succeeded but the session could not be stored.
    StorageFailed,
    /// The page went away before the flow finished.
    Cancelled,
}

pub struct LoginController<A, S, N, D> {
    pub api: A,
    pub sessions: S,
    pub navigator: N,
    pub delay: D,
    pub redirect_delay_ms: u32,
}

impl<A, S, N, D> LoginController<A, S, N, D>
where
    A: AuthApi,
    S: SessionStore,
    N: Navigator,
    D: Delay,
{
    /// Submit `credentials`, reporting progress through `alerts`.
    pub async fn submit(
        &self,
        credentials: &Credentials,
        alerts: &impl StateSink<Option<Alert>>,
        liveness: &Liveness,
    ) -> LoginOutcome {
        alerts.set(None);

        let result = self.api.login(credentials).await;
        if !liveness.is_alive() {
            log::debug!("Login reply arrived after the page closed; ignoring");
            return LoginOutcome::Cancelled;
        }

        match result {
            Ok(resp) => {
                let session = Session::from(resp);
                if let Err(e) = self.sessions.save(&session) {
                    log::error!("Error saving session: {e}");
                    alerts.set(Some(Alert::danger(alert::LOGIN_SERVER_ERROR)));
                    return LoginOutcome::StorageFailed;
                }
                log::info!("Logged in as user {}", session.user_id.as_deref().unwrap_or("?"));
                alerts.set(Some(Alert::success(alert::LOGIN_SUCCESS)));

                self.delay.sleep(self.redirect_delay_ms).await;
                if !liveness.is_alive() {
                    log::debug!("Login page closed before redirect");
                    return LoginOutcome::Cancelled;
                }
                self.navigator.navigate(&Route::Private);
                LoginOutcome::LoggedIn
            }
            Err(err @ ApiError::Rejected { .. }) => {
                log::warn!("Login rejected: {err}");
                let message = err.server_message().unwrap_or(alert::LOGIN_REJECTED);
                alerts.set(Some(Alert::danger(message)));
                LoginOutcome::Rejected
            }
            Err(ApiError::Transport(e)) => {
                log::error!("Error during login: {e}");
                alerts.set(Some(Alert::danger(alert::LOGIN_SERVER_ERROR)));
                LoginOutcome::TransportFailed
            }
        }
    }
}
