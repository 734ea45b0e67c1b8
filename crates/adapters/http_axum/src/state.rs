//! Shared application state for axum handlers.

use std::sync::Arc;
use std::time::Duration;

use crm_automations_app::ports::DocumentStore;
use crm_automations_app::services::automation_service::AutomationService;
use crm_automations_app::services::diagnostics_service::DiagnosticsService;
use crm_automations_app::services::run_service::RunService;
use crm_automations_app::services::stats_service::StatsService;
use crm_automations_app::store::StoreHandle;

/// Application state shared across all axum handlers.
///
/// Generic over the document store to avoid dynamic dispatch.
/// `Clone` is implemented manually so the store itself does not need to be
/// `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S> {
    /// Automation definitions.
    pub automation_service: Arc<AutomationService<S>>,
    /// Automation runs.
    pub run_service: Arc<RunService<S>>,
    /// Dashboard aggregates.
    pub stats_service: Arc<StatsService<S>>,
    /// Store connectivity report.
    pub diagnostics_service: Arc<DiagnosticsService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            automation_service: Arc::clone(&self.automation_service),
            run_service: Arc::clone(&self.run_service),
            stats_service: Arc::clone(&self.stats_service),
            diagnostics_service: Arc::clone(&self.diagnostics_service),
        }
    }
}

impl<S> AppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    /// Build every service on top of one shared store handle.
    ///
    /// `timeout` bounds each individual store operation.
    pub fn new(store: Arc<StoreHandle<S>>, timeout: Duration) -> Self {
        Self {
            automation_service: Arc::new(AutomationService::new(Arc::clone(&store), timeout)),
            run_service: Arc::new(RunService::new(Arc::clone(&store), timeout)),
            stats_service: Arc::new(StatsService::new(Arc::clone(&store), timeout)),
            diagnostics_service: Arc::new(DiagnosticsService::new(store, timeout)),
        }
    }
}
