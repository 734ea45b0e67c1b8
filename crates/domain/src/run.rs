//! Automation runs: logged execution attempts of an automation.
//!
//! Runs are created in the [`RunStatus::Running`] state and nothing in this
//! system moves them out of it; `finished_at` stays unset.

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordKind};
use crate::time::{self, Timestamp};

/// Outcome of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Running,
    Success,
    Failed,
}

/// A recorded execution of an automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRun {
    /// Identifier of the automation, as a string. Never checked for existence.
    pub automation_id: String,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default, with = "time::option_rfc3339")]
    pub started_at: Option<Timestamp>,
    #[serde(default, with = "time::option_rfc3339")]
    pub finished_at: Option<Timestamp>,
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for AutomationRun {
    const KIND: RecordKind = RecordKind::AutomationRun;
}

impl AutomationRun {
    /// A run that starts now, with zeroed counters.
    #[must_use]
    pub fn started(automation_id: impl Into<String>, notes: Option<String>) -> Self {
        Self {
            automation_id: automation_id.into(),
            status: RunStatus::Running,
            started_at: Some(time::now()),
            finished_at: None,
            processed: 0,
            errors: 0,
            notes,
        }
    }
}
