//! Stats service: aggregate counts for the dashboard.

use std::sync::Arc;
use std::time::Duration;

use crm_automations_domain::automation::{Automation, AutomationStatus};
use crm_automations_domain::error::CrmError;
use crm_automations_domain::run::AutomationRun;
use crm_automations_domain::stats::{DashboardStats, RECENT_RUNS_LIMIT};

use crate::ports::{DocumentStore, Filter, FindOptions, Sort};
use crate::repository::Repository;
use crate::store::StoreHandle;

/// Application service computing [`DashboardStats`].
pub struct StatsService<S> {
    automations: Repository<S, Automation>,
    runs: Repository<S, AutomationRun>,
}

impl<S: DocumentStore + Send + Sync> StatsService<S> {
    /// Create a new service backed by the shared store handle.
    pub fn new(store: Arc<StoreHandle<S>>, timeout: Duration) -> Self {
        Self {
            automations: Repository::new(Arc::clone(&store), timeout),
            runs: Repository::new(store, timeout),
        }
    }

    /// Count automations by status and fetch the most recent runs.
    ///
    /// # Errors
    ///
    /// Fails as soon as any of the underlying queries fails.
    #[tracing::instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, CrmError> {
        let by_status = |status: AutomationStatus| Filter::all().eq("status", status.as_str());
        let recent = FindOptions::new()
            .sort(Sort::descending("started_at"))
            .limit(RECENT_RUNS_LIMIT);

        let (total_automations, active_automations, paused_automations, recent_runs) = tokio::try_join!(
            self.automations.count_documents(Filter::all()),
            self.automations
                .count_documents(by_status(AutomationStatus::Active)),
            self.automations
                .count_documents(by_status(AutomationStatus::Paused)),
            self.runs.find_documents(recent),
        )?;

        Ok(DashboardStats {
            total_automations,
            active_automations,
            paused_automations,
            recent_runs,
        })
    }
}
