//! Protected page mount.
//!
//! The page moves through an explicit state machine:
//! `Loading` -> `Authenticated` or `Loading` -> `Redirecting`.
//! `Redirecting` is terminal; nothing renders user data after it.

use crate::api::{ApiError, AuthApi};
use crate::flow::{Liveness, Navigator, StateSink};
use crate::models::UserRecord;
use crate::routes::Route;
use crate::session::SessionStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProtectedState {
    #[default]
    Loading,
    /// The server's copy of the user.
    Authenticated(UserRecord),
    Redirecting,
}

impl ProtectedState {
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            ProtectedState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

pub struct ProtectedController<A, S, N> {
    pub api: A,
    pub sessions: S,
    pub navigator: N,
    pub clear_session_on_rejection: bool,
}

impl<A, S, N> ProtectedController<A, S, N>
where
    A: AuthApi,
    S: SessionStore,
    N: Navigator,
{
    /// Run once per mount. Returns the final state (also pushed to `state`).
    pub async fn mount(
        &self,
        state: &impl StateSink<ProtectedState>,
        liveness: &Liveness,
    ) -> ProtectedState {
        let Some(session) = self.sessions.load() else {
            log::debug!("No session stored; redirecting to login");
            return self.redirect(state);
        };

        let result = self.api.fetch_private(&session.token).await;
        if !liveness.is_alive() {
            log::debug!("Protected reply arrived after the page closed; ignoring");
            return ProtectedState::Loading;
        }

        match result {
            Ok(user) => {
                let next = ProtectedState::Authenticated(user);
                state.set(next.clone());
                next
            }
            Err(err @ ApiError::Rejected { .. }) => {
                log::warn!("Session rejected by server: {err}");
                if self.clear_session_on_rejection {
                    self.sessions.clear();
                }
                self.redirect(state)
            }
            Err(ApiError::Transport(e)) => {
                log::error!("Error loading protected page: {e}");
                self.redirect(state)
            }
        }
    }

    /// Drop the session and go back to the login page.
    pub fn logout(&self, state: &impl StateSink<ProtectedState>) {
        log::info!("Logging out");
        self.sessions.clear();
        self.redirect(state);
    }

    fn redirect(&self, state: &impl StateSink<ProtectedState>) -> ProtectedState {
        state.set(ProtectedState::Redirecting);
        self.navigator.navigate(&Route::LOGIN);
        ProtectedState::Redirecting
    }
}
