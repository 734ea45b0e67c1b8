//! `SQLite` implementation of [`DocumentStore`].
//!
//! Each collection is a table holding one JSON document per row:
//!
//! ```sql
//! CREATE TABLE "<collection>" (
//!     seq  INTEGER PRIMARY KEY,          -- insertion order
//!     id   TEXT NOT NULL UNIQUE,         -- 24-hex document id
//!     body TEXT NOT NULL                 -- JSON object, without `_id`
//! )
//! ```
//!
//! Tables are created on first insert. Filters and sorts reach into the body
//! with `json_extract`.

use std::str::FromStr;

use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crm_automations_app::ports::{
    Document, DocumentStore, Filter, FindOptions, ID_FIELD, Sort, SortOrder, StoredDocument,
};
use crm_automations_domain::error::CrmError;
use crm_automations_domain::id::DocumentId;

use crate::error::StorageError;

const TABLE_EXISTS: &str =
    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)";
const LIST_TABLES: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

/// `SQLite`-backed document store.
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    name: String,
}

impl SqliteDocumentStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }

    async fn collection_exists(&self, table: &str) -> Result<bool, StorageError> {
        let exists: i64 = sqlx::query_scalar(TABLE_EXISTS)
            .bind(table)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists != 0)
    }

    async fn ensure_collection(&self, table: &str) -> Result<(), StorageError> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS \"{table}\" (\
                seq INTEGER PRIMARY KEY, \
                id TEXT NOT NULL UNIQUE, \
                body TEXT NOT NULL\
            )"
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<DocumentId, StorageError> {
        let table = checked_name(collection)?;
        self.ensure_collection(table).await?;

        document.remove(ID_FIELD);
        let id = DocumentId::generate();
        let body = serde_json::to_string(&document)?;

        sqlx::query(&format!("INSERT INTO \"{table}\" (id, body) VALUES (?, ?)"))
            .bind(id.to_string())
            .bind(body)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn select(
        &self,
        collection: &str,
        options: FindOptions,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        let table = checked_name(collection)?;
        if !self.collection_exists(table).await? {
            return Ok(Vec::new());
        }

        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT id, body FROM \"{table}\""));
        push_filter(&mut builder, &options.filter)?;
        push_sort(&mut builder, options.sort.as_ref())?;
        if let Some(limit) = options.limit {
            builder
                .push(" LIMIT ")
                .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows: Vec<(String, String)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(decode_row).collect()
    }

    async fn count(&self, collection: &str, filter: Filter) -> Result<u64, StorageError> {
        let table = checked_name(collection)?;
        if !self.collection_exists(table).await? {
            return Ok(0);
        }

        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM \"{table}\""));
        push_filter(&mut builder, &filter)?;
        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StorageError> {
        let names: Vec<String> = sqlx::query_scalar(LIST_TABLES)
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn database_name(&self) -> &str {
        &self.name
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, CrmError> {
        Ok(self.insert(collection, document).await?)
    }

    async fn find(
        &self,
        collection: &str,
        options: FindOptions,
    ) -> Result<Vec<StoredDocument>, CrmError> {
        Ok(self.select(collection, options).await?)
    }

    async fn count_documents(&self, collection: &str, filter: Filter) -> Result<u64, CrmError> {
        Ok(self.count(collection, filter).await?)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, CrmError> {
        Ok(self.collection_names().await?)
    }
}

/// Accept only names that are safe to splice into SQL as quoted identifiers.
fn checked_name(name: &str) -> Result<&str, StorageError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

fn json_path(field: &str) -> Result<String, StorageError> {
    Ok(format!("$.{}", checked_name(field)?))
}

fn push_filter(
    builder: &mut QueryBuilder<'_, Sqlite>,
    filter: &Filter,
) -> Result<(), StorageError> {
    for (idx, (field, value)) in filter.conditions().iter().enumerate() {
        builder.push(if idx == 0 { " WHERE " } else { " AND " });
        push_condition(builder, field, value)?;
    }
    Ok(())
}

fn push_condition(
    builder: &mut QueryBuilder<'_, Sqlite>,
    field: &str,
    value: &Value,
) -> Result<(), StorageError> {
    if field == ID_FIELD {
        match value.as_str() {
            Some(id) => builder.push("id = ").push_bind(id.to_string()),
            None => builder.push("1 = 0"),
        };
        return Ok(());
    }

    builder
        .push("json_extract(body, ")
        .push_bind(json_path(field)?)
        .push(")");
    match value {
        Value::Null => builder.push(" IS NULL"),
        Value::Bool(flag) => builder.push(" = ").push_bind(i64::from(*flag)),
        Value::Number(number) => match number.as_i64() {
            Some(int) => builder.push(" = ").push_bind(int),
            None => builder
                .push(" = ")
                .push_bind(number.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(text) => builder.push(" = ").push_bind(text.clone()),
        Value::Array(_) | Value::Object(_) => builder
            .push(" = json(")
            .push_bind(value.to_string())
            .push(")"),
    };
    Ok(())
}

/// Order by the sort field (nulls lowest), then by insertion order.
fn push_sort(
    builder: &mut QueryBuilder<'_, Sqlite>,
    sort: Option<&Sort>,
) -> Result<(), StorageError> {
    let Some(sort) = sort else {
        builder.push(" ORDER BY seq");
        return Ok(());
    };
    let direction = match sort.order {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    };
    if sort.field == ID_FIELD {
        builder.push(format!(" ORDER BY id {direction}"));
    } else {
        builder
            .push(" ORDER BY json_extract(body, ")
            .push_bind(json_path(&sort.field)?)
            .push(format!(") {direction}, seq {direction}"));
    }
    Ok(())
}

fn decode_row((id, body): (String, String)) -> Result<StoredDocument, StorageError> {
    let document_id =
        DocumentId::from_str(&id).map_err(|_| StorageError::CorruptId(id.clone()))?;
    match serde_json::from_str(&body)? {
        Value::Object(body) => Ok(StoredDocument {
            id: document_id,
            body,
        }),
        _ => Err(StorageError::NotAnObject(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use serde_json::json;

    async fn setup() -> SqliteDocumentStore {
        Config {
            database_url: "sqlite::memory:".to_string(),
            database_name: None,
        }
        .build()
        .await
        .unwrap()
        .into_store()
    }

    fn document(value: Value) -> Document {
        let Value::Object(map) = value else {
            panic!("expected a JSON object");
        };
        map
    }

    #[tokio::test]
    async fn should_insert_and_find_document() {
        let store = setup().await;
        let id = store
            .insert_one("automation", document(json!({"name": "Nightly Sync"})))
            .await
            .unwrap();

        let docs = store
            .find("automation", FindOptions::new())
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].body["name"], "Nightly Sync");
    }

    #[tokio::test]
    async fn should_ignore_client_supplied_id() {
        let store = setup().await;
        let id = store
            .insert_one(
                "automation",
                document(json!({"_id": "65a1b2c3d4e5f60718293a4b", "name": "x"})),
            )
            .await
            .unwrap();

        assert_ne!(id.to_string(), "65a1b2c3d4e5f60718293a4b");
        let docs = store.find("automation", FindOptions::new()).await.unwrap();
        assert!(!docs[0].body.contains_key("_id"));
    }

    #[tokio::test]
    async fn should_return_empty_when_collection_missing() {
        let store = setup().await;
        let docs = store.find("nothing_here", FindOptions::new()).await.unwrap();
        assert!(docs.is_empty());
        let count = store
            .count_documents("nothing_here", Filter::all())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn should_keep_insertion_order_by_default() {
        let store = setup().await;
        for name in ["c", "a", "b"] {
            store
                .insert_one("automation", document(json!({"name": name})))
                .await
                .unwrap();
        }
        let names: Vec<Value> = store
            .find("automation", FindOptions::new())
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.body["name"].clone())
            .collect();
        assert_eq!(names, vec![json!("c"), json!("a"), json!("b")]);
    }

    #[tokio::test]
    async fn should_filter_by_string_field_and_by_id() {
        let store = setup().await;
        let active = store
            .insert_one("automation", document(json!({"name": "a", "status": "active"})))
            .await
            .unwrap();
        store
            .insert_one("automation", document(json!({"name": "p", "status": "paused"})))
            .await
            .unwrap();

        let paused = store
            .count_documents("automation", Filter::all().eq("status", "paused"))
            .await
            .unwrap();
        assert_eq!(paused, 1);

        let by_id = store
            .find("automation", FindOptions::new().filter(Filter::by_id(active)))
            .await
            .unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].body["name"], "a");
    }

    #[tokio::test]
    async fn should_filter_by_number_bool_and_null() {
        let store = setup().await;
        store
            .insert_one(
                "automationrun",
                document(json!({"processed": 3, "flag": true, "notes": null})),
            )
            .await
            .unwrap();
        store
            .insert_one(
                "automationrun",
                document(json!({"processed": 4, "flag": false, "notes": "n"})),
            )
            .await
            .unwrap();

        let count = |filter| store.count_documents("automationrun", filter);
        assert_eq!(count(Filter::all().eq("processed", 3)).await.unwrap(), 1);
        assert_eq!(count(Filter::all().eq("flag", true)).await.unwrap(), 1);
        assert_eq!(count(Filter::all().eq("notes", Value::Null)).await.unwrap(), 1);
        assert_eq!(count(Filter::all().eq("missing", Value::Null)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn should_sort_descending_with_nulls_last_and_limit() {
        let store = setup().await;
        for (label, started) in [
            ("old", json!("2024-03-01T09:00:00.000000Z")),
            ("none", Value::Null),
            ("new", json!("2024-03-02T09:00:00.000000Z")),
            ("mid", json!("2024-03-01T12:00:00.000000Z")),
        ] {
            store
                .insert_one(
                    "automationrun",
                    document(json!({"automation_id": label, "started_at": started})),
                )
                .await
                .unwrap();
        }

        let options = FindOptions::new()
            .sort(Sort::descending("started_at"))
            .limit(3);
        let labels: Vec<Value> = store
            .find("automationrun", options)
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.body["automation_id"].clone())
            .collect();
        assert_eq!(labels, vec![json!("new"), json!("mid"), json!("old")]);
    }

    #[tokio::test]
    async fn should_reject_unsafe_collection_name() {
        let store = setup().await;
        let result = store
            .insert_one("bad\"; DROP TABLE x; --", Document::new())
            .await;
        assert!(matches!(result, Err(CrmError::Storage(_))));
    }

    #[tokio::test]
    async fn should_reject_unsafe_field_name() {
        let store = setup().await;
        store
            .insert_one("automation", document(json!({"name": "a"})))
            .await
            .unwrap();
        let result = store
            .count_documents("automation", Filter::all().eq("name') OR 1=1 --", "a"))
            .await;
        assert!(matches!(result, Err(CrmError::Storage(_))));
    }

    #[tokio::test]
    async fn should_list_collections_sorted() {
        let store = setup().await;
        assert!(store.list_collection_names().await.unwrap().is_empty());
        store
            .insert_one("automationrun", Document::new())
            .await
            .unwrap();
        store.insert_one("automation", Document::new()).await.unwrap();

        let names = store.list_collection_names().await.unwrap();
        assert_eq!(names, vec!["automation", "automationrun"]);
        assert_eq!(store.database_name(), "memory");
    }
}
