//! Request-scoped and configuration models of the web layer.

pub mod auth;
pub mod config;
