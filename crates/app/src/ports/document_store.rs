//! Document store port: schemaless collections of JSON documents.
//!
//! Collections are addressed by name. Documents are JSON objects; the store
//! assigns each inserted document a [`DocumentId`] and keeps it apart from
//! the body. Reading a collection that was never written yields no documents.

use std::future::Future;

use serde_json::{Map, Value};

use crm_automations_domain::error::CrmError;
use crm_automations_domain::id::DocumentId;

/// A document body.
pub type Document = Map<String, Value>;

/// Field name that addresses the store-assigned identifier in filters and sorts.
pub const ID_FIELD: &str = "_id";

/// A document as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub body: Document,
}

/// Conjunction of field equality matches. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Match every document.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Match the document with the given identifier.
    #[must_use]
    pub fn by_id(id: DocumentId) -> Self {
        Self::all().eq(ID_FIELD, id.to_string())
    }

    /// Additionally require `field` to equal `value`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    #[must_use]
    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    /// Whether `document` satisfies every condition.
    ///
    /// A `null` condition also matches a missing field.
    #[must_use]
    pub fn matches(&self, document: &StoredDocument) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            if field == ID_FIELD {
                return expected.as_str() == Some(document.id.to_string().as_str());
            }
            match document.body.get(field) {
                Some(actual) => actual == expected,
                None => expected.is_null(),
            }
        })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Single-field sort. Missing or `null` values sort lowest; ties keep
/// insertion order in the sort direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }
}

/// Options for [`DocumentStore::find`]. The default finds everything in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub filter: Filter,
    pub sort: Option<Sort>,
    pub limit: Option<usize>,
}

impl FindOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A connected document database.
pub trait DocumentStore {
    /// Name of the database this store is bound to.
    fn database_name(&self) -> &str;

    /// Insert a document and return its newly assigned identifier.
    ///
    /// Any `_id` key in `document` is ignored.
    fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> impl Future<Output = Result<DocumentId, CrmError>> + Send;

    /// Find documents matching `options`.
    fn find(
        &self,
        collection: &str,
        options: FindOptions,
    ) -> impl Future<Output = Result<Vec<StoredDocument>, CrmError>> + Send;

    /// Count documents matching `filter`.
    fn count_documents(
        &self,
        collection: &str,
        filter: Filter,
    ) -> impl Future<Output = Result<u64, CrmError>> + Send;

    /// Names of the collections that currently exist, sorted.
    fn list_collection_names(&self) -> impl Future<Output = Result<Vec<String>, CrmError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(body: Value) -> StoredDocument {
        let Value::Object(body) = body else {
            panic!("expected object");
        };
        StoredDocument {
            id: DocumentId::generate(),
            body,
        }
    }

    #[test]
    fn should_match_everything_when_filter_is_empty() {
        assert!(Filter::all().matches(&doc(json!({"status": "paused"}))));
    }

    #[test]
    fn should_match_on_field_equality() {
        let filter = Filter::all().eq("status", "active");
        assert!(filter.matches(&doc(json!({"status": "active"}))));
        assert!(!filter.matches(&doc(json!({"status": "paused"}))));
        assert!(!filter.matches(&doc(json!({}))));
    }

    #[test]
    fn should_require_all_conditions() {
        let filter = Filter::all().eq("status", "active").eq("trigger", "webhook");
        assert!(filter.matches(&doc(json!({"status": "active", "trigger": "webhook"}))));
        assert!(!filter.matches(&doc(json!({"status": "active", "trigger": "event"}))));
    }

    #[test]
    fn should_match_by_id() {
        let document = doc(json!({}));
        assert!(Filter::by_id(document.id).matches(&document));
        assert!(!Filter::by_id(DocumentId::generate()).matches(&document));
    }

    #[test]
    fn should_treat_missing_field_as_null() {
        let filter = Filter::all().eq("notes", Value::Null);
        assert!(filter.matches(&doc(json!({}))));
    }
}
