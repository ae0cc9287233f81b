//! Client-side route table.

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const PRIVATE_PATH: &str = "/private";
pub const REQUEST_RESET_PATH: &str = "/request-reset-password";

/// Query flag set by the password-reset page when it sends the user back.
pub const RESET_QUERY_KEY: &str = "reset";

/// Every page this app navigates to or links at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login { reset: bool },
    Register,
    Private,
    /// Served elsewhere; only ever linked.
    RequestResetPassword,
}

impl Route {
    pub const LOGIN: Route = Route::Login { reset: false };

    /// Path plus query string, ready for the router.
    pub fn href(&self) -> String {
        match self {
            Route::Login { reset: true } => format!("{LOGIN_PATH}?{RESET_QUERY_KEY}=true"),
            Route::Login { reset: false } => LOGIN_PATH.to_string(),
            Route::Register => REGISTER_PATH.to_string(),
            Route::Private => PRIVATE_PATH.to_string(),
            Route::RequestResetPassword => REQUEST_RESET_PATH.to_string(),
        }
    }
}

/// Whether the login page should show the password-reset banner.
/// Only the exact value `true` counts.
pub fn reset_requested(flag: Option<&str>) -> bool {
    flag == Some("true")
}
