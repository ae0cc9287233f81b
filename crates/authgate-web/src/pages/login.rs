//! Login page component.

use authgate_common::alert::{Alert, PASSWORD_RESET_BANNER};
use authgate_common::config::AppConfig;
use authgate_common::flow::{Liveness, LoginController};
use authgate_common::models::Credentials;
use authgate_common::routes::{reset_requested, Route, RESET_QUERY_KEY};
use leptos::ev;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::api::HttpAuthApi;
use crate::pages::AlertBox;
use crate::platform::{browser_sessions, router_navigator, TimerDelay};

/// Login page with the email/password form.
#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let navigate = use_navigate();
    let query = use_query_map();
    let show_reset = move || query.with(|q| reset_requested(q.get(RESET_QUERY_KEY).as_deref()));

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (alert, set_alert) = signal(Option::<Alert>::None);
    let (loading, set_loading) = signal(false);

    let liveness = Liveness::new();
    let on_teardown = liveness.clone();
    on_cleanup(move || on_teardown.cancel());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let controller = LoginController {
            api: HttpAuthApi::new(config.backend_url.clone()),
            sessions: browser_sessions(),
            navigator: router_navigator(navigate.clone()),
            delay: TimerDelay,
            redirect_delay_ms: config.login_redirect_delay_ms,
        };
        let liveness = liveness.clone();

        set_loading.set(true);
        leptos::task::spawn_local(async move {
            let show = move |a: Option<Alert>| set_alert.set(a);
            controller.submit(&credentials, &show, &liveness).await;
            if liveness.is_alive() {
                set_loading.set(false);
            }
        });
    };

    view! {
        <div class="d-flex align-items-center justify-content-center vh-100">
            <form on:submit=on_submit class="p-4 border rounded" style="max-width: 400px; width: 100%;">
                <h3 class="mb-3">"Login"</h3>

                {move || show_reset().then(|| view! {
                    <div class="alert alert-success p-2">{PASSWORD_RESET_BANNER}</div>
                })}

                <AlertBox alert=alert />

                <div class="mb-3">
                    <input
                        class="form-control"
                        type="email"
                        placeholder="Email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="mb-3">
                    <input
                        class="form-control"
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>

                <button class="btn btn-primary w-100" type="submit" disabled=move || loading.get()>
                    {move || if loading.get() { "Logging in…" } else { "Log in" }}
                </button>

                <div class="mt-3">
                    <p class="mb-1">"Don't have an account?"</p>
                    <A href=Route::Register.href()>"Register here"</A>
                </div>
                <div class="mt-2">
                    <A href=Route::RequestResetPassword.href()>"Forgot your password?"</A>
                </div>
            </form>
        </div>
    }
}
