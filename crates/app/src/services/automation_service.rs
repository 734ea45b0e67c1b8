//! Automation service: use-cases for managing automations.

use std::sync::Arc;
use std::time::Duration;

use crm_automations_domain::automation::Automation;
use crm_automations_domain::error::{CrmError, NotFoundError};
use crm_automations_domain::id::DocumentId;
use crm_automations_domain::record::{Record, Stored};

use crate::ports::DocumentStore;
use crate::repository::Repository;
use crate::store::StoreHandle;

/// Application service for automation definitions.
pub struct AutomationService<S> {
    repo: Repository<S, Automation>,
}

impl<S: DocumentStore + Send + Sync> AutomationService<S> {
    /// Create a new service backed by the shared store handle.
    pub fn new(store: Arc<StoreHandle<S>>, timeout: Duration) -> Self {
        Self {
            repo: Repository::new(store, timeout),
        }
    }

    /// Store a new automation after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Validation`] if invariants fail, before any store
    /// access, or a storage error propagated from the repository.
    #[tracing::instrument(skip(self, automation), fields(automation_name = %automation.name))]
    pub async fn create_automation(&self, automation: Automation) -> Result<DocumentId, CrmError> {
        automation.validate()?;
        let id = self.repo.create_document(&automation).await?;
        tracing::debug!(%id, "automation created");
        Ok(id)
    }

    /// List all automations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_automations(&self) -> Result<Vec<Stored<Automation>>, CrmError> {
        self.repo.get_documents().await
    }

    /// Look up an automation by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::NotFound`] when no automation with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_automation(&self, id: DocumentId) -> Result<Stored<Automation>, CrmError> {
        self.repo.get_document(id).await?.ok_or_else(|| {
            NotFoundError {
                kind: Automation::KIND.label(),
                id: id.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryStore;
    use crm_automations_domain::automation::{AutomationStatus, Trigger};
    use crm_automations_domain::error::ValidationError;

    fn make_service() -> (Arc<StoreHandle<InMemoryStore>>, AutomationService<InMemoryStore>) {
        let store = Arc::new(StoreHandle::connected(InMemoryStore::default()));
        let svc = AutomationService::new(Arc::clone(&store), Duration::from_secs(5));
        (store, svc)
    }

    fn nightly_sync() -> Automation {
        Automation::builder()
            .name("Nightly Sync")
            .trigger(Trigger::Schedule)
            .frequency("daily 9am")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_automation_when_valid() {
        let (_, svc) = make_service();
        let id = svc.create_automation(nightly_sync()).await.unwrap();

        let fetched = svc.get_automation(id).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.record.name, "Nightly Sync");
        assert_eq!(fetched.record.status, AutomationStatus::Active);
    }

    #[tokio::test]
    async fn should_reject_create_without_insert_when_name_is_empty() {
        let (store, svc) = make_service();
        let mut automation = nightly_sync();
        automation.name = String::new();

        let result = svc.create_automation(automation).await;
        assert!(matches!(
            result,
            Err(CrmError::Validation(ValidationError::EmptyName))
        ));
        assert!(store.get().unwrap().documents("automation").is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_automation_missing() {
        let (_, svc) = make_service();
        let result = svc.get_automation(DocumentId::generate()).await;
        assert!(matches!(result, Err(CrmError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_automations() {
        let (_, svc) = make_service();
        svc.create_automation(nightly_sync()).await.unwrap();
        svc.create_automation(
            Automation::builder()
                .name("Lead webhook")
                .trigger(Trigger::Webhook)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        let all = svc.list_automations().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_fail_when_store_unavailable() {
        let store = Arc::new(StoreHandle::<InMemoryStore>::unconfigured());
        let svc = AutomationService::new(store, Duration::from_secs(5));

        let result = svc.create_automation(nightly_sync()).await;
        assert!(matches!(result, Err(CrmError::Unavailable(_))));
    }
}
