//! Page controllers.
//!
//! Each page's submit/mount logic lives here as an async workflow over
//! small seams (API, session store, navigator, delay, state sink), so the
//! Leptos components only wire signals to it.

pub mod login;
pub mod protected;
pub mod register;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::routes::Route;

pub use login::{LoginController, LoginOutcome};
pub use protected::{ProtectedController, ProtectedState};
pub use register::{RegisterController, RegisterOutcome};

/// Moves the app to another page.
pub trait Navigator {
    fn navigate(&self, route: &Route);
}

impl<F: Fn(&Route)> Navigator for F {
    fn navigate(&self, route: &Route) {
        self(route)
    }
}

/// Waits before a post-success navigation.
pub trait Delay {
    fn sleep(&self, ms: u32) -> impl Future<Output = ()>;
}

/// Receives view-state updates (an alert, a page state).
pub trait StateSink<T> {
    fn set(&self, value: T);
}

impl<T, F: Fn(T)> StateSink<T> for F {
    fn set(&self, value: T) {
        self(value)
    }
}

/// Ties an async completion to a mounted view.
///
/// The page cancels it on teardown; a controller that resumes afterwards
/// skips every state update, storage write and navigation.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn cancel(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
