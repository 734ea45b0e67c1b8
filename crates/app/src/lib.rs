//! # crm-automations-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters implement:
//!   - `DocumentStore`: insert, find, count, and list schemaless collections
//! - Hold the process-wide `StoreHandle`, including its degraded state
//! - Provide the generic `Repository` data access helpers
//! - Define **use-case services**:
//!   - `AutomationService`: create, list, get automations
//!   - `RunService`: start, list, get runs
//!   - `StatsService`: dashboard aggregates
//!   - `DiagnosticsService`: connectivity report that never fails
//!
//! ## Dependency rule
//! Depends on `crm-automations-domain` only (plus `tokio::time` for timeouts).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod repository;
pub mod services;
pub mod store;

#[cfg(test)]
mod test_support;
