//! Generic data access over a [`DocumentStore`].
//!
//! A [`Repository`] is parameterized by record type; the collection comes
//! from the record's [`RecordKind`](crm_automations_domain::record::RecordKind).
//! It only converts between records and documents and bounds every store
//! call by a timeout. There is no business logic here.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crm_automations_domain::error::CrmError;
use crm_automations_domain::id::DocumentId;
use crm_automations_domain::record::{Record, Stored};

use crate::ports::{Document, DocumentStore, Filter, FindOptions, StoredDocument};
use crate::store::StoreHandle;

/// Errors converting between records and documents.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode {collection} record")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{collection} record did not encode to a JSON object")]
    NotAnObject { collection: &'static str },

    #[error("failed to decode {collection} document {id}")]
    Decode {
        collection: &'static str,
        id: DocumentId,
        #[source]
        source: serde_json::Error,
    },
}

impl From<CodecError> for CrmError {
    fn from(err: CodecError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Run a store call, failing with [`CrmError::Timeout`] once `limit` elapses.
pub(crate) async fn bounded<F, R>(limit: Duration, call: F) -> Result<R, CrmError>
where
    F: Future<Output = Result<R, CrmError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| CrmError::Timeout(limit))?
}

/// Typed access to the collection holding records of type `T`.
pub struct Repository<S, T> {
    store: Arc<StoreHandle<S>>,
    timeout: Duration,
    record: PhantomData<fn() -> T>,
}

impl<S, T> Clone for Repository<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            timeout: self.timeout,
            record: PhantomData,
        }
    }
}

impl<S, T> Repository<S, T>
where
    S: DocumentStore + Send + Sync,
    T: Record,
{
    const COLLECTION: &'static str = T::KIND.collection();

    /// Create a repository over `store`, bounding each call by `timeout`.
    pub fn new(store: Arc<StoreHandle<S>>, timeout: Duration) -> Self {
        Self {
            store,
            timeout,
            record: PhantomData,
        }
    }

    /// Serialize `record` and insert it, returning the new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::Unavailable`] when the store is degraded,
    /// [`CrmError::Timeout`] when the call takes too long, or the store's error.
    pub async fn create_document(&self, record: &T) -> Result<DocumentId, CrmError> {
        let document = to_document(record)?;
        let store = self.store.get()?;
        bounded(self.timeout, store.insert_one(Self::COLLECTION, document)).await
    }

    /// Every document in the collection, in store order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_document`], plus a storage error when a stored
    /// document does not decode into `T`.
    pub async fn get_documents(&self) -> Result<Vec<Stored<T>>, CrmError> {
        self.find_documents(FindOptions::new()).await
    }

    /// The document with identifier `id`, if any.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_documents`].
    pub async fn get_document(&self, id: DocumentId) -> Result<Option<Stored<T>>, CrmError> {
        let options = FindOptions::new().filter(Filter::by_id(id)).limit(1);
        Ok(self.find_documents(options).await?.into_iter().next())
    }

    /// Documents matching `options`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_documents`].
    pub async fn find_documents(&self, options: FindOptions) -> Result<Vec<Stored<T>>, CrmError> {
        let store = self.store.get()?;
        let documents = bounded(self.timeout, store.find(Self::COLLECTION, options)).await?;
        documents
            .into_iter()
            .map(|document| from_document(document).map_err(CrmError::from))
            .collect()
    }

    /// Number of documents matching `filter`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_document`].
    pub async fn count_documents(&self, filter: Filter) -> Result<u64, CrmError> {
        let store = self.store.get()?;
        bounded(self.timeout, store.count_documents(Self::COLLECTION, filter)).await
    }
}

fn to_document<T: Record>(record: &T) -> Result<Document, CodecError> {
    let collection = T::KIND.collection();
    let value = serde_json::to_value(record)
        .map_err(|source| CodecError::Encode { collection, source })?;
    match value {
        Value::Object(document) => Ok(document),
        _ => Err(CodecError::NotAnObject { collection }),
    }
}

fn from_document<T: Record>(document: StoredDocument) -> Result<Stored<T>, CodecError> {
    let StoredDocument { id, body } = document;
    let record =
        serde_json::from_value(Value::Object(body)).map_err(|source| CodecError::Decode {
            collection: T::KIND.collection(),
            id,
            source,
        })?;
    Ok(Stored::new(id, record))
}
