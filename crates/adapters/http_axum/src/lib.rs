//! # crm-automations-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API under `/api` (automations, runs, dashboard stats)
//! - Serve the liveness banner at `/` and the connectivity report at `/test`
//! - Validate request bodies and path identifiers before any store access
//! - Map application results and [`CrmError`](crm_automations_domain::error::CrmError)
//!   into JSON responses
//!
//! ## Dependency rule
//! Depends on `crm-automations-app` (for services and the store port) and
//! `crm-automations-domain` (for record types). Never leaks axum types into
//! the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
