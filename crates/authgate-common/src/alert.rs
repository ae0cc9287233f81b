//! Transient feedback shown above a form.

/// Bootstrap-style alert flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

impl AlertKind {
    /// CSS class for the alert box.
    pub fn class(self) -> &'static str {
        match self {
            AlertKind::Success => "alert alert-success",
            AlertKind::Danger => "alert alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Danger,
            message: message.into(),
        }
    }

    pub fn is_danger(&self) -> bool {
        self.kind == AlertKind::Danger
    }
}

// ── Messages ────────────────────────────────────────────────────────

pub const LOGIN_SUCCESS: &str = "Login successful! Redirecting...";
pub const LOGIN_REJECTED: &str = "Incorrect credentials";
pub const LOGIN_SERVER_ERROR: &str = "Server error. Please try again later.";
pub const PASSWORD_RESET_BANNER: &str = "Password reset successfully. Please log in.";

pub const PASSWORD_MISMATCH: &str = "Passwords do not match. Please verify both fields.";
pub const REGISTER_SUCCESS: &str = "User registered successfully! Redirecting...";
pub const REGISTER_REJECTED: &str = "Registration failed.";
pub const REGISTER_UNREACHABLE: &str = "Could not connect to the server.";
