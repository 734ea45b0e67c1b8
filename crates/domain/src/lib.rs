//! # crm-automations-domain
//!
//! Pure domain model for the CRM automations backend.
//!
//! ## Responsibilities
//! - Foundational types: store-generated identifiers, error conventions, timestamps
//! - Define **Automations** (configured CRM rules with a trigger type and status)
//! - Define **Runs** (logged execution attempts of an automation)
//! - Define the static mapping from record kind to collection name
//! - Define the dashboard **stats** shape
//! - Contain all invariant enforcement (non-empty names, identifier format)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod record;
pub mod run;
pub mod stats;
