//! # Link Token Service Library
//!
//! Issues short-lived account-linking tokens from a financial data
//! aggregation vendor and exposes them over HTTP.
//!
//! Modules:
//! - `config` — YAML service configuration, defaults and validation
//! - `issuer` — vendor request shaping, credentials and error mapping
//! - `server` — axum facade: `/api/create_link_token` and `/health`
//! - `observability` — prometheus metrics and their route

pub mod config;
pub mod issuer;
pub mod observability;
pub mod server;
pub mod tests;
pub mod utils;


pub use crate::config::service::ServiceConfig;
pub use crate::issuer::{IssuanceError, IssueLinkToken, LinkTokenIssuer};
