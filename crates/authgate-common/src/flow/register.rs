//! Registration form submission.

use crate::alert::{self, Alert};
use crate::api::{ApiError, AuthApi};
use crate::flow::{Delay, Liveness, Navigator, StateSink};
use crate::models::RegistrationRequest;
use crate::routes::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Account created, form cleared, sent to the login page.
    Registered,
    /// Password and confirmation differ; nothing was sent.
    PasswordMismatch,
    Rejected,
    TransportFailed,
    Cancelled,
}

pub struct RegisterController<A, N, D> {
    pub api: A,
    pub navigator: N,
    pub delay: D,
    pub redirect_delay_ms: u32,
}

impl<A, N, D> RegisterController<A, N, D>
where
    A: AuthApi,
    N: Navigator,
    D: Delay,
{
    /// Validate and submit `form`. `reset_form` runs once, right before
    /// the redirect to the login page.
    pub async fn submit(
        &self,
        form: &RegistrationRequest,
        message: &impl StateSink<Option<Alert>>,
        reset_form: impl FnOnce(),
        liveness: &Liveness,
    ) -> RegisterOutcome {
        message.set(None);

        let body = match form.validate() {
            Ok(body) => body,
            Err(_) => {
                message.set(Some(Alert::danger(alert::PASSWORD_MISMATCH)));
                return RegisterOutcome::PasswordMismatch;
            }
        };

        let result = self.api.register(&body).await;
        if !liveness.is_alive() {
            log::debug!("Register reply arrived after the page closed; ignoring");
            return RegisterOutcome::Cancelled;
        }

        match result {
            Ok(()) => {
                log::info!("Registered {}", body.email);
                message.set(Some(Alert::success(alert::REGISTER_SUCCESS)));

                self.delay.sleep(self.redirect_delay_ms).await;
                if !liveness.is_alive() {
                    return RegisterOutcome::Cancelled;
                }
                reset_form();
                self.navigator.navigate(&Route::LOGIN);
                RegisterOutcome::Registered
            }
            Err(err @ ApiError::Rejected { .. }) => {
                log::warn!("Registration rejected: {err}");
                let text = err.server_message().unwrap_or(alert::REGISTER_REJECTED);
                message.set(Some(Alert::danger(text)));
                RegisterOutcome::Rejected
            }
            Err(ApiError::Transport(e)) => {
                log::error!("Error during registration: {e}");
                message.set(Some(Alert::danger(alert::REGISTER_UNREACHABLE)));
                RegisterOutcome::TransportFailed
            }
        }
    }
}
