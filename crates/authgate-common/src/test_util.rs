//! In-memory fakes for driving the page controllers without a browser.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::{Future, ready};
use std::rc::Rc;

use crate::alert::Alert;
use crate::api::{ApiError, ApiResult, AuthApi};
use crate::flow::{Delay, Liveness, Navigator};
use crate::models::{Credentials, LoginResponse, RegisterBody, SessionToken, UserId, UserRecord};
use crate::routes::Route;

/// Build a user record.
pub fn user(id: i64, email: &str, is_active: bool) -> UserRecord {
    UserRecord {
        id: UserId::Number(id),
        email: email.to_string(),
        is_active,
        extra: Default::default(),
    }
}

/// Build a successful login reply.
pub fn login_ok(token: &str, id: i64) -> LoginResponse {
    LoginResponse {
        token: SessionToken::new(token),
        user: user(id, "ada@example.com", true),
        msg: Some("OK".into()),
    }
}

// ── API ─────────────────────────────────────────────────────────────

/// [`AuthApi`] that replays queued replies and records every call.
/// An empty queue answers with a transport error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedApi {
    inner: Rc<RefCell<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    login: VecDeque<ApiResult<LoginResponse>>,
    register: VecDeque<ApiResult<()>>,
    private: VecDeque<ApiResult<UserRecord>>,
    login_calls: Vec<Credentials>,
    register_calls: Vec<RegisterBody>,
    private_calls: Vec<String>,
}

fn unscripted<T>() -> ApiResult<T> {
    Err(ApiError::Transport("no scripted reply".into()))
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login(self, reply: ApiResult<LoginResponse>) -> Self {
        self.inner.borrow_mut().login.push_back(reply);
        self
    }

    pub fn with_register(self, reply: ApiResult<()>) -> Self {
        self.inner.borrow_mut().register.push_back(reply);
        self
    }

    pub fn with_private(self, reply: ApiResult<UserRecord>) -> Self {
        self.inner.borrow_mut().private.push_back(reply);
        self
    }

    pub fn login_calls(&self) -> Vec<Credentials> {
        self.inner.borrow().login_calls.clone()
    }

    pub fn register_calls(&self) -> Vec<RegisterBody> {
        self.inner.borrow().register_calls.clone()
    }

    /// Raw tokens presented to `/private`.
    pub fn private_calls(&self) -> Vec<String> {
        self.inner.borrow().private_calls.clone()
    }

    /// Total requests of any kind.
    pub fn request_count(&self) -> usize {
        let inner = self.inner.borrow();
        inner.login_calls.len() + inner.register_calls.len() + inner.private_calls.len()
    }
}

impl AuthApi for ScriptedApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let mut inner = self.inner.borrow_mut();
        inner.login_calls.push(credentials.clone());
        inner.login.pop_front().unwrap_or_else(unscripted)
    }

    async fn register(&self, body: &RegisterBody) -> ApiResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.register_calls.push(body.clone());
        inner.register.pop_front().unwrap_or_else(unscripted)
    }

    async fn fetch_private(&self, token: &SessionToken) -> ApiResult<UserRecord> {
        let mut inner = self.inner.borrow_mut();
        inner.private_calls.push(token.as_str().to_string());
        inner.private.pop_front().unwrap_or_else(unscripted)
    }
}

// ── Navigation ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    routes: Rc<RefCell<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        self.routes.borrow_mut().push(*route);
    }
}

// ── Delay ───────────────────────────────────────────────────────────

/// Resolves immediately, remembering each requested wait. A cancelling
/// delay simulates the page closing while the timer runs.
#[derive(Debug, Clone, Default)]
pub struct InstantDelay {
    waits: Rc<RefCell<Vec<u32>>>,
    cancel: Option<Liveness>,
}

impl InstantDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancelling(liveness: Liveness) -> Self {
        Self {
            cancel: Some(liveness),
            ..Self::default()
        }
    }

    pub fn waits(&self) -> Vec<u32> {
        self.waits.borrow().clone()
    }
}

impl Delay for InstantDelay {
    fn sleep(&self, ms: u32) -> impl Future<Output = ()> {
        self.waits.borrow_mut().push(ms);
        if let Some(live) = &self.cancel {
            live.cancel();
        }
        ready(())
    }
}

// ── View state ──────────────────────────────────────────────────────

/// Records every value a controller pushes to the view.
#[derive(Debug, Clone)]
pub struct StateLog<T> {
    history: Rc<RefCell<Vec<T>>>,
}

impl<T> Default for StateLog<T> {
    fn default() -> Self {
        Self {
            history: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: Clone> StateLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(&self) -> impl Fn(T) + '_ {
        move |value| self.history.borrow_mut().push(value)
    }

    pub fn history(&self) -> Vec<T> {
        self.history.borrow().clone()
    }

    pub fn latest(&self) -> Option<T> {
        self.history.borrow().last().cloned()
    }
}

pub type AlertLog = StateLog<Option<Alert>>;

impl StateLog<Option<Alert>> {
    /// Alert currently on screen.
    pub fn last(&self) -> Option<Alert> {
        self.latest().flatten()
    }
}
