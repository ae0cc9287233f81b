//! Shared core for the authgate web client.
//!
//! This crate contains:
//! - **Wire types**: login, registration and protected-resource bodies
//! - **Session repository**: the token/user slot over key-value storage
//! - **Page controllers**: login, register and protected-page workflows
//!   written against small seams so they run natively in tests
//! - **Configuration**: backend URL, redirect delays, locale

pub mod alert;
pub mod api;
pub mod config;
pub mod flow;
pub mod locale;
pub mod models;
pub mod routes;
pub mod session;
pub mod test_util;
