//! Run service: use-cases for recording automation runs.
//!
//! Runs are only ever started here. No use-case completes a run, so
//! `status` stays `running` and `finished_at` stays unset.

use std::sync::Arc;
use std::time::Duration;

use crm_automations_domain::error::{CrmError, NotFoundError};
use crm_automations_domain::id::DocumentId;
use crm_automations_domain::record::{Record, Stored};
use crm_automations_domain::run::AutomationRun;

use crate::ports::{DocumentStore, Filter, FindOptions};
use crate::repository::Repository;
use crate::store::StoreHandle;

/// Application service for automation runs.
pub struct RunService<S> {
    repo: Repository<S, AutomationRun>,
}

impl<S: DocumentStore + Send + Sync> RunService<S> {
    /// Create a new service backed by the shared store handle.
    pub fn new(store: Arc<StoreHandle<S>>, timeout: Duration) -> Self {
        Self {
            repo: Repository::new(store, timeout),
        }
    }

    /// Record a run that starts now.
    ///
    /// The status is forced to `running`. `automation_id` is stored as given
    /// and is not checked against existing automations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, notes))]
    pub async fn start_run(
        &self,
        automation_id: String,
        notes: Option<String>,
    ) -> Result<DocumentId, CrmError> {
        let run = AutomationRun::started(automation_id, notes);
        let id = self.repo.create_document(&run).await?;
        tracing::debug!(%id, "run started");
        Ok(id)
    }

    /// List all runs.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_runs(&self) -> Result<Vec<Stored<AutomationRun>>, CrmError> {
        self.repo.get_documents().await
    }

    /// Look up a run by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::NotFound`] when no run with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_run(&self, id: DocumentId) -> Result<Stored<AutomationRun>, CrmError> {
        self.repo.get_document(id).await?.ok_or_else(|| {
            NotFoundError {
                kind: AutomationRun::KIND.label(),
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Runs whose `automation_id` equals `automation_id` rendered as a string.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_runs_for_automation(
        &self,
        automation_id: DocumentId,
    ) -> Result<Vec<Stored<AutomationRun>>, CrmError> {
        let filter = Filter::all().eq("automation_id", automation_id.to_string());
        self.repo
            .find_documents(FindOptions::new().filter(filter))
            .await
    }
}
