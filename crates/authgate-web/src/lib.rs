//! authgate web client: Leptos CSR WASM application.
//!
//! Login, registration and a protected page talking to the auth backend.
//! Page logic lives in `authgate-common`; this crate wires it to the
//! browser (localStorage, fetch, timers, router).

pub mod api;
pub mod pages;
pub mod platform;

use authgate_common::config::{
    AppConfig, BACKEND_URL_VAR, CLEAR_ON_REJECTION_VAR, LOCALE_VAR, LOGIN_DELAY_VAR,
    REGISTER_DELAY_VAR,
};
use authgate_common::routes::LOGIN_PATH;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use pages::login::LoginPage;
use pages::private::PrivatePage;
use pages::register::RegisterPage;
use pages::NotFoundPage;

// ── Config ──────────────────────────────────────────────────────────

/// Settings baked in by the build (`BACKEND_URL=... trunk build`).
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        BACKEND_URL_VAR => option_env!("BACKEND_URL"),
        LOGIN_DELAY_VAR => option_env!("LOGIN_REDIRECT_DELAY_MS"),
        REGISTER_DELAY_VAR => option_env!("REGISTER_REDIRECT_DELAY_MS"),
        CLEAR_ON_REJECTION_VAR => option_env!("CLEAR_SESSION_ON_REJECTION"),
        LOCALE_VAR => option_env!("LOCALE"),
        _ => None,
    };
    value.map(String::from)
}

pub fn load_config() -> AppConfig {
    AppConfig::from_lookup(build_env).unwrap_or_else(|e| {
        log::warn!("Invalid build configuration ({e}); using defaults");
        AppConfig::default()
    })
}

// ── App Root ────────────────────────────────────────────────────────

/// Leptos application root.
#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    log::debug!("Backend at {:?}", config.backend_url);
    provide_context(config);

    view! {
        <Router>
            <main>
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=path!("/") view=|| view! { <Redirect path=LOGIN_PATH /> } />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route path=path!("/private") view=PrivatePage />
                </Routes>
            </main>
        </Router>
    }
}

// ── WASM entry point ────────────────────────────────────────────────

/// Called by trunk to mount the app.
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("authgate client starting");
    leptos::mount::mount_to_body(App);
}
