//! In-memory [`DocumentStore`] fakes shared by the unit tests of this crate.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use crm_automations_domain::error::CrmError;
use crm_automations_domain::id::DocumentId;

use crate::ports::{
    Document, DocumentStore, Filter, FindOptions, ID_FIELD, SortOrder, StoredDocument,
};

#[derive(Default)]
pub(crate) struct InMemoryStore {
    collections: Mutex<BTreeMap<String, Vec<StoredDocument>>>,
}

impl InMemoryStore {
    /// Snapshot of a collection, in insertion order.
    pub(crate) fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        let collections = self.collections.lock().unwrap();
        collections.get(collection).cloned().unwrap_or_default()
    }

    /// Insert a raw document, bypassing record encoding.
    pub(crate) fn seed(&self, collection: &str, body: Value) -> DocumentId {
        let Value::Object(body) = body else {
            panic!("seed documents must be JSON objects");
        };
        let id = DocumentId::generate();
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { id, body });
        id
    }

    fn select(&self, collection: &str, options: &FindOptions) -> Vec<StoredDocument> {
        let mut matching: Vec<StoredDocument> = self
            .documents(collection)
            .into_iter()
            .filter(|doc| options.filter.matches(doc))
            .collect();
        if let Some(sort) = &options.sort {
            if sort.order == SortOrder::Descending {
                matching.reverse();
            }
            matching.sort_by(|a, b| {
                let ordering = compare(field(a, &sort.field), field(b, &sort.field));
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        if let Some(limit) = options.limit {
            matching.truncate(limit);
        }
        matching
    }
}

fn field(doc: &StoredDocument, name: &str) -> Option<Value> {
    if name == ID_FIELD {
        return Some(Value::String(doc.id.to_string()));
    }
    doc.body.get(name).cloned()
}

fn compare(a: Option<Value>, b: Option<Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(&b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

impl DocumentStore for InMemoryStore {
    fn database_name(&self) -> &str {
        "memory"
    }

    fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> impl Future<Output = Result<DocumentId, CrmError>> + Send {
        document.remove(ID_FIELD);
        let id = DocumentId::generate();
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { id, body: document });
        async move { Ok(id) }
    }

    fn find(
        &self,
        collection: &str,
        options: FindOptions,
    ) -> impl Future<Output = Result<Vec<StoredDocument>, CrmError>> + Send {
        let result = self.select(collection, &options);
        async move { Ok(result) }
    }

    fn count_documents(
        &self,
        collection: &str,
        filter: Filter,
    ) -> impl Future<Output = Result<u64, CrmError>> + Send {
        let options = FindOptions::new().filter(filter);
        let count = self.select(collection, &options).len() as u64;
        async move { Ok(count) }
    }

    fn list_collection_names(&self) -> impl Future<Output = Result<Vec<String>, CrmError>> + Send {
        let collections = self.collections.lock().unwrap();
        let names: Vec<String> = collections.keys().cloned().collect();
        async move { Ok(names) }
    }
}

/// A store whose every call sleeps before answering.
pub(crate) struct SlowStore {
    delay: Duration,
}

impl SlowStore {
    pub(crate) fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl DocumentStore for SlowStore {
    fn database_name(&self) -> &str {
        "slow"
    }

    async fn insert_one(
        &self,
        _collection: &str,
        _document: Document,
    ) -> Result<DocumentId, CrmError> {
        tokio::time::sleep(self.delay).await;
        Ok(DocumentId::generate())
    }

    async fn find(
        &self,
        _collection: &str,
        _options: FindOptions,
    ) -> Result<Vec<StoredDocument>, CrmError> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![])
    }

    async fn count_documents(&self, _collection: &str, _filter: Filter) -> Result<u64, CrmError> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, CrmError> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![])
    }
}

/// A store whose every call fails.
pub(crate) struct BrokenStore;

#[derive(Debug, thiserror::Error)]
#[error("disk I/O error")]
pub(crate) struct DiskError;

impl DocumentStore for BrokenStore {
    fn database_name(&self) -> &str {
        "broken"
    }

    async fn insert_one(
        &self,
        _collection: &str,
        _document: Document,
    ) -> Result<DocumentId, CrmError> {
        Err(CrmError::Storage(Box::new(DiskError)))
    }

    async fn find(
        &self,
        _collection: &str,
        _options: FindOptions,
    ) -> Result<Vec<StoredDocument>, CrmError> {
        Err(CrmError::Storage(Box::new(DiskError)))
    }

    async fn count_documents(&self, _collection: &str, _filter: Filter) -> Result<u64, CrmError> {
        Err(CrmError::Storage(Box::new(DiskError)))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, CrmError> {
        Err(CrmError::Storage(Box::new(DiskError)))
    }
}
