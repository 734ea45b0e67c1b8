//! Application services: use-case implementations.
//!
//! Each service struct is generic over the [`DocumentStore`](crate::ports::DocumentStore)
//! and receives the shared [`StoreHandle`](crate::store::StoreHandle) through its
//! constructor, keeping this layer decoupled from concrete adapters.

pub mod automation_service;
pub mod diagnostics_service;
pub mod run_service;
pub mod stats_service;
