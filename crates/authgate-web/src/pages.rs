//! Page components.

pub mod login;
pub mod private;
pub mod register;

use authgate_common::alert::Alert;
use authgate_common::routes::LOGIN_PATH;
use leptos::prelude::*;
use leptos_router::components::A;

/// Renders the page's current alert, if any.
#[component]
pub fn AlertBox(alert: ReadSignal<Option<Alert>>) -> impl IntoView {
    move || {
        alert.get().map(|a| {
            view! {
                <div class=format!("{} p-2", a.kind.class()) role="alert">
                    {a.message}
                </div>
            }
        })
    }
}

/// Fallback for unknown paths.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="container mt-5 text-center">
            <h3>"Page not found"</h3>
            <A href=LOGIN_PATH>"Back to login"</A>
        </div>
    }
}
