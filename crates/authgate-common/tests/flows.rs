//! End-to-end page flows through the public API.
//!
//! Drives the three controllers against in-memory storage and a scripted
//! backend, following a user from registration to the protected page.

use authgate_common::alert::{self, Alert, AlertKind};
use authgate_common::api::ApiError;
use authgate_common::flow::{
    Liveness, LoginController, LoginOutcome, ProtectedController, ProtectedState,
    RegisterController, RegisterOutcome,
};
use authgate_common::locale::Locale;
use authgate_common::models::{Credentials, RegistrationRequest};
use authgate_common::routes::Route;
use authgate_common::session::{MemoryStorage, SessionRepository, TOKEN_KEY, USER_ID_KEY, USER_KEY};
use authgate_common::test_util::{
    AlertLog, InstantDelay, RecordingNavigator, ScriptedApi, StateLog, login_ok, user,
};

fn credentials() -> Credentials {
    Credentials {
        email: "ada@example.com".into(),
        password: "hunter2".into(),
    }
}

async fn log_in(
    api: ScriptedApi,
    storage: &MemoryStorage,
    nav: &RecordingNavigator,
) -> LoginOutcome {
    LoginController {
        api,
        sessions: SessionRepository::new(storage.clone()),
        navigator: nav.clone(),
        delay: InstantDelay::new(),
        redirect_delay_ms: 200,
    }
    .submit(&credentials(), &AlertLog::new().sink(), &Liveness::new())
    .await
}

async fn open_private(
    api: ScriptedApi,
    storage: &MemoryStorage,
    nav: &RecordingNavigator,
) -> ProtectedState {
    ProtectedController {
        api,
        sessions: SessionRepository::new(storage.clone()),
        navigator: nav.clone(),
        clear_session_on_rejection: true,
    }
    .mount(&StateLog::<ProtectedState>::new().sink(), &Liveness::new())
    .await
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn accepted_login_writes_session_once_and_navigates_once() {
    let storage = MemoryStorage::new();
    let nav = RecordingNavigator::new();
    let api = ScriptedApi::new().with_login(Ok(login_ok("tok-1", 9)));

    let outcome = log_in(api, &storage, &nav).await;

    assert_eq!(outcome, LoginOutcome::LoggedIn);
    // token + user_id + user
    assert_eq!(storage.writes(), 3);
    let snap = storage.snapshot();
    assert_eq!(snap[TOKEN_KEY], "tok-1");
    assert_eq!(snap[USER_ID_KEY], "9");
    assert!(snap[USER_KEY].contains("ada@example.com"));
    assert_eq!(nav.routes(), vec![Route::Private]);
}

#[tokio::test]
async fn rejected_login_leaves_storage_and_route_alone() {
    let storage = MemoryStorage::new();
    let nav = RecordingNavigator::new();
    let api = ScriptedApi::new().with_login(Err(ApiError::rejected(400, None)));
    let alerts = AlertLog::new();

    let outcome = LoginController {
        api,
        sessions: SessionRepository::new(storage.clone()),
        navigator: nav.clone(),
        delay: InstantDelay::new(),
        redirect_delay_ms: 200,
    }
    .submit(&credentials(), &alerts.sink(), &Liveness::new())
    .await;

    assert_eq!(outcome, LoginOutcome::Rejected);
    assert_eq!(alerts.last().map(|a| a.kind), Some(AlertKind::Danger));
    assert_eq!(storage.writes(), 0);
    assert!(nav.routes().is_empty());
}

#[tokio::test]
async fn repeated_login_overwrites_instead_of_accumulating() {
    let storage = MemoryStorage::new();
    let nav = RecordingNavigator::new();

    log_in(ScriptedApi::new().with_login(Ok(login_ok("tok", 9))), &storage, &nav).await;
    let first = storage.snapshot();
    log_in(ScriptedApi::new().with_login(Ok(login_ok("tok", 9))), &storage, &nav).await;

    assert_eq!(storage.snapshot(), first);
    assert_eq!(first.len(), 3);
}

#[tokio::test]
async fn unreachable_backend_on_login_is_logged() {
    testing_logger::setup();
    let api = ScriptedApi::new().with_login(Err(ApiError::Transport("connection refused".into())));

    let outcome = log_in(api, &MemoryStorage::new(), &RecordingNavigator::new()).await;

    assert_eq!(outcome, LoginOutcome::TransportFailed);
    testing_logger::validate(|logs| {
        assert!(
            logs.iter()
                .any(|l| l.level == log::Level::Error && l.body.contains("connection refused"))
        );
    });
}

// ── Registration ────────────────────────────────────────────────────

#[tokio::test]
async fn mismatched_registration_sends_nothing() {
    let api = ScriptedApi::new().with_register(Ok(()));
    let alerts = AlertLog::new();
    let form = RegistrationRequest {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "one".into(),
        password_confirmation: "two".into(),
    };

    let outcome = RegisterController {
        api: api.clone(),
        navigator: RecordingNavigator::new(),
        delay: InstantDelay::new(),
        redirect_delay_ms: 1_500,
    }
    .submit(&form, &alerts.sink(), || {}, &Liveness::new())
    .await;

    assert_eq!(outcome, RegisterOutcome::PasswordMismatch);
    assert_eq!(api.request_count(), 0);
    assert_eq!(alerts.last(), Some(Alert::danger(alert::PASSWORD_MISMATCH)));
}

#[tokio::test]
async fn accepted_registration_clears_form_and_returns_to_login() {
    let nav = RecordingNavigator::new();
    let alerts = AlertLog::new();
    let form = std::cell::RefCell::new(RegistrationRequest {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "pw".into(),
        password_confirmation: "pw".into(),
    });
    let snapshot = form.borrow().clone();

    let outcome = RegisterController {
        api: ScriptedApi::new().with_register(Ok(())),
        navigator: nav.clone(),
        delay: InstantDelay::new(),
        redirect_delay_ms: 1_500,
    }
    .submit(
        &snapshot,
        &alerts.sink(),
        || *form.borrow_mut() = RegistrationRequest::default(),
        &Liveness::new(),
    )
    .await;

    assert_eq!(outcome, RegisterOutcome::Registered);
    assert_eq!(alerts.last(), Some(Alert::success(alert::REGISTER_SUCCESS)));
    assert_eq!(*form.borrow(), RegistrationRequest::default());
    assert_eq!(nav.routes(), vec![Route::LOGIN]);
}

// ── Protected page ──────────────────────────────────────────────────

#[tokio::test]
async fn protected_without_token_redirects_without_request() {
    let api = ScriptedApi::new();
    let nav = RecordingNavigator::new();

    let end = open_private(api.clone(), &MemoryStorage::new(), &nav).await;

    assert_eq!(end, ProtectedState::Redirecting);
    assert_eq!(api.request_count(), 0);
    assert_eq!(nav.routes(), vec![Route::LOGIN]);
}

#[tokio::test]
async fn protected_with_rejected_token_redirects() {
    let storage = MemoryStorage::new();
    let nav = RecordingNavigator::new();
    log_in(ScriptedApi::new().with_login(Ok(login_ok("tok", 9))), &storage, &nav).await;

    let api = ScriptedApi::new().with_private(Err(ApiError::rejected(401, None)));
    let end = open_private(api, &storage, &nav).await;

    assert_eq!(end, ProtectedState::Redirecting);
    assert_eq!(nav.routes(), vec![Route::Private, Route::LOGIN]);
    // A second mount no longer hits the server with the stale token.
    let again = ScriptedApi::new();
    open_private(again.clone(), &storage, &nav).await;
    assert_eq!(again.request_count(), 0);
}

#[tokio::test]
async fn rejected_token_is_logged_as_warning() {
    testing_logger::setup();
    let storage = MemoryStorage::new();
    let nav = RecordingNavigator::new();
    log_in(ScriptedApi::new().with_login(Ok(login_ok("tok", 9))), &storage, &nav).await;

    let api = ScriptedApi::new().with_private(Err(ApiError::rejected(403, None)));
    open_private(api, &storage, &nav).await;

    testing_logger::validate(|logs| {
        assert!(
            logs.iter()
                .any(|l| l.level == log::Level::Warn && l.body.contains("HTTP 403")),
            "no warning in {:?}",
            logs.iter().map(|l| &l.body).collect::<Vec<_>>()
        );
    });
}

#[tokio::test]
async fn unreachable_backend_on_protected_page_logs_error_and_keeps_session() {
    testing_logger::setup();
    let storage = MemoryStorage::new();
    let nav = RecordingNavigator::new();
    log_in(ScriptedApi::new().with_login(Ok(login_ok("tok", 9))), &storage, &nav).await;

    let api = ScriptedApi::new().with_private(Err(ApiError::Transport("offline".into())));
    let end = open_private(api, &storage, &nav).await;

    assert_eq!(end, ProtectedState::Redirecting);
    assert_eq!(storage.snapshot()[TOKEN_KEY], "tok");
    testing_logger::validate(|logs| {
        assert!(
            logs.iter()
                .any(|l| l.level == log::Level::Error && l.body.contains("offline"))
        );
    });
}

#[tokio::test]
async fn protected_with_accepted_token_renders_server_user() {
    let storage = MemoryStorage::new();
    let nav = RecordingNavigator::new();
    log_in(ScriptedApi::new().with_login(Ok(login_ok("tok", 9))), &storage, &nav).await;

    let api = ScriptedApi::new().with_private(Ok(user(9, "ada@example.com", true)));
    let end = open_private(api.clone(), &storage, &nav).await;

    let shown = end.user().expect("authenticated");
    assert_eq!(api.private_calls(), vec!["tok".to_string()]);
    assert_eq!(shown.email, "ada@example.com");
    assert_eq!(shown.id.to_string(), "9");
    assert_eq!(Locale::Es.yes_no(shown.is_active), "Sí");
    assert_eq!(Locale::En.yes_no(shown.is_active), "Yes");
}

// ── Full journey ────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_login_then_view_private() {
    let storage = MemoryStorage::new();
    let nav = RecordingNavigator::new();

    RegisterController {
        api: ScriptedApi::new().with_register(Ok(())),
        navigator: nav.clone(),
        delay: InstantDelay::new(),
        redirect_delay_ms: 1_500,
    }
    .submit(
        &RegistrationRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
            password_confirmation: "pw".into(),
        },
        &AlertLog::new().sink(),
        || {},
        &Liveness::new(),
    )
    .await;
    // Registration never establishes a session.
    assert_eq!(storage.writes(), 0);

    log_in(ScriptedApi::new().with_login(Ok(login_ok("tok", 1))), &storage, &nav).await;
    let end = open_private(
        ScriptedApi::new().with_private(Ok(user(1, "ada@example.com", true))),
        &storage,
        &nav,
    )
    .await;

    assert!(matches!(end, ProtectedState::Authenticated(_)));
    assert_eq!(nav.routes(), vec![Route::LOGIN, Route::Private]);
}
