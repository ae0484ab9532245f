//! Use cases, one module per user-facing flow.

pub mod auth;
pub mod dashboard;
pub mod profile_setup;
pub mod theme;
