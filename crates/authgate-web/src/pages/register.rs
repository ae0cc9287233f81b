//! Registration page component.

use authgate_common::alert::Alert;
use authgate_common::config::AppConfig;
use authgate_common::flow::{Liveness, RegisterController};
use authgate_common::models::RegistrationRequest;
use authgate_common::routes::Route;
use leptos::ev;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api::HttpAuthApi;
use crate::pages::AlertBox;
use crate::platform::{router_navigator, TimerDelay};

/// Account creation form. Password confirmation is checked locally and
/// never sent.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (message, set_message) = signal(Option::<Alert>::None);

    let liveness = Liveness::new();
    let on_teardown = liveness.clone();
    on_cleanup(move || on_teardown.cancel());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = RegistrationRequest {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            password_confirmation: confirm.get_untracked(),
        };
        let controller = RegisterController {
            api: HttpAuthApi::new(config.backend_url.clone()),
            navigator: router_navigator(navigate.clone()),
            delay: TimerDelay,
            redirect_delay_ms: config.register_redirect_delay_ms,
        };
        let liveness = liveness.clone();

        leptos::task::spawn_local(async move {
            let show = move |m: Option<Alert>| set_message.set(m);
            let reset_form = move || {
                set_email.set(String::new());
                set_name.set(String::new());
                set_password.set(String::new());
                set_confirm.set(String::new());
            };
            controller.submit(&form, &show, reset_form, &liveness).await;
        });
    };

    view! {
        <div class="d-flex align-items-center justify-content-center vh-100">
            <form on:submit=on_submit class="p-4 border rounded" style="width: 100%; max-width: 420px;">
                <h3 class="mb-3 fw-bold text-center">"Create an Account"</h3>

                <AlertBox alert=message />

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
                        type="text"
                        placeholder="Full Name"
                        required
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
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
                <div class="mb-3">
                    <input
                        class="form-control"
                        type="password"
                        placeholder="Repeat Password"
                        required
                        prop:value=move || confirm.get()
                        on:input=move |ev| set_confirm.set(event_target_value(&ev))
                    />
                </div>

                <button class="btn btn-primary w-100 fw-bold" type="submit">"Register"</button>

                <div class="mt-3 text-center">
                    <A href=Route::LOGIN.href()>"Already have an account? Log in"</A>
                </div>
            </form>
        </div>
    }
}
