//! Browser implementations of the controller seams.

use std::future::Future;

use authgate_common::flow::Delay;
use authgate_common::routes::Route;
use authgate_common::session::{KeyValueStorage, SessionError, SessionRepository};
use gloo_storage::{LocalStorage, Storage};
use leptos_router::NavigateOptions;

/// `localStorage`, read and written as raw strings.
///
/// gloo-storage's typed accessors JSON-encode every value; the session
/// keys are plain strings, so this goes through the raw handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &'static str, value: &str) -> Result<(), SessionError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| SessionError::Write {
                key,
                reason: format!("{e:?}"),
            })
    }

    fn delete(&self, key: &str) {
        let _ = LocalStorage::raw().remove_item(key);
    }
}

pub type BrowserSessions = SessionRepository<BrowserStorage>;

pub fn browser_sessions() -> BrowserSessions {
    SessionRepository::new(BrowserStorage)
}

/// Timer-backed delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerDelay;

impl Delay for TimerDelay {
    fn sleep(&self, ms: u32) -> impl Future<Output = ()> {
        gloo_timers::future::TimeoutFuture::new(ms)
    }
}

/// Adapt leptos_router's navigate function to a route navigator.
pub fn router_navigator<F>(navigate: F) -> impl Fn(&Route) + Clone
where
    F: Fn(&str, NavigateOptions) + Clone,
{
    move |route: &Route| navigate(&route.href(), NavigateOptions::default())
}
