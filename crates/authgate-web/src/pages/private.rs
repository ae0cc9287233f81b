//! Protected page.
//!
//! Fetches the authoritative user record with the stored token on mount
//! and bounces to the login page when there is no usable session.

use authgate_common::config::AppConfig;
use authgate_common::flow::{Liveness, ProtectedController, ProtectedState};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::api::HttpAuthApi;
use crate::platform::{browser_sessions, router_navigator};

#[component]
pub fn PrivatePage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let locale = config.locale;
    let navigate = use_navigate();
    let (state, set_state) = signal(ProtectedState::Loading);

    let liveness = Liveness::new();
    let on_teardown = liveness.clone();
    on_cleanup(move || on_teardown.cancel());

    let controller = move || ProtectedController {
        api: HttpAuthApi::new(config.backend_url.clone()),
        sessions: browser_sessions(),
        navigator: router_navigator(navigate.clone()),
        clear_session_on_rejection: config.clear_session_on_rejection,
    };

    // Reads no signals, so this runs once per mount.
    let mount_controller = controller.clone();
    Effect::new(move || {
        let controller = mount_controller();
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            let show = move |s: ProtectedState| set_state.set(s);
            controller.mount(&show, &liveness).await;
        });
    });

    let on_logout = move |_| {
        let show = move |s: ProtectedState| set_state.set(s);
        controller().logout(&show);
    };

    view! {
        {move || match state.get() {
            ProtectedState::Loading => view! {
                <p class="text-center mt-5">{locale.loading()}</p>
            }
            .into_any(),
            ProtectedState::Redirecting => ().into_any(),
            ProtectedState::Authenticated(user) => view! {
                <div class="container mt-5">
                    <h2>{locale.welcome(&user.email)}</h2>
                    <p><strong>{locale.id_label()}</strong>" "{user.id.to_string()}</p>
                    <p><strong>{locale.active_label()}</strong>" "{locale.yes_no(user.is_active)}</p>
                    <button class="btn btn-outline-secondary" on:click=on_logout.clone()>
                        {locale.logout()}
                    </button>
                </div>
            }
            .into_any(),
        }}
    }
}
