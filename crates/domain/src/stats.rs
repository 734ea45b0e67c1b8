//! Aggregate counts served to the dashboard.

use serde::{Deserialize, Serialize};

use crate::record::Stored;
use crate::run::AutomationRun;

/// Number of runs included in [`DashboardStats::recent_runs`].
pub const RECENT_RUNS_LIMIT: usize = 5;

/// Dashboard summary of automations and their latest runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_automations: u64,
    pub active_automations: u64,
    pub paused_automations: u64,
    /// Newest first by `started_at`, at most [`RECENT_RUNS_LIMIT`] entries.
    pub recent_runs: Vec<Stored<AutomationRun>>,
}
