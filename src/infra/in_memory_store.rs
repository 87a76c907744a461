use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::app::ports::{Document, DocumentStore, Query, SortDirection};
use crate::error::{ResolverError, Result};
use crate::normalize::coerce;

/// In-memory document store for development/testing
///
/// Collections can be switched into a failing mode to simulate transport
/// errors, and every call is counted per collection.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, Vec<Document>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from `{ "<collection>": [ { "id": "...", ... }, ... ], ... }`.
    /// Documents without a string or numeric `id` are rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        let store = Self::new();
        let collections = value
            .as_object()
            .ok_or_else(|| ResolverError::Config("store fixture must be a JSON object".into()))?;
        for (collection, docs) in collections {
            let docs = docs.as_array().ok_or_else(|| {
                ResolverError::Config(format!("collection '{collection}' must be an array"))
            })?;
            for doc in docs {
                let id = match doc.get("id") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => {
                        return Err(ResolverError::Config(format!(
                            "document in '{collection}' is missing an id"
                        )))
                    }
                };
                let mut data = doc.as_object().cloned().unwrap_or_else(Map::new);
                data.remove("id");
                store.insert(collection, Document::new(id, Value::Object(data)));
            }
        }
        Ok(store)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        Self::from_json(&value)
    }

    /// Insert or replace a document by id
    pub fn insert(&self, collection: &str, document: Document) {
        let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        let docs = collections.entry(collection.to_string()).or_default();
        docs.retain(|d| d.id != document.id);
        debug!("Inserted document {} into {}", document.id, collection);
        docs.push(document);
    }

    /// Every subsequent call touching `collection` fails with a transport error
    pub fn fail_collection(&self, collection: &str) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(collection.to_string());
    }

    pub fn restore_collection(&self, collection: &str) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(collection);
    }

    pub fn call_count(&self, collection: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(collection)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).values().sum()
    }

    fn record_call(&self, collection: &str) -> Result<()> {
        *self
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(collection.to_string())
            .or_insert(0) += 1;
        if self.failing.lock().unwrap_or_else(|e| e.into_inner()).contains(collection) {
            return Err(ResolverError::transport(collection, "simulated transport failure"));
        }
        Ok(())
    }
}

/// Sort key for one field value. Keys order by rank first, so any mix of
/// shapes sorts totally: missing/null, booleans, numbers and instants, then
/// plain text, then anything else.
#[derive(Debug)]
enum SortKey {
    Missing,
    Bool(bool),
    /// Numbers, with timestamps folded in as epoch milliseconds
    Numeric(f64),
    Text(String),
    Other,
}

impl SortKey {
    fn of(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => SortKey::Missing,
            Some(Value::Bool(b)) => SortKey::Bool(*b),
            Some(Value::Number(n)) => SortKey::Numeric(n.as_f64().unwrap_or(0.0)),
            Some(v @ (Value::String(_) | Value::Object(_))) => match coerce::timestamp(Some(v)) {
                Some(instant) => SortKey::Numeric(instant.timestamp_millis() as f64),
                None => match v {
                    Value::String(s) => SortKey::Text(s.clone()),
                    _ => SortKey::Other,
                },
            },
            Some(Value::Array(_)) => SortKey::Other,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Bool(_) => 1,
            SortKey::Numeric(_) => 2,
            SortKey::Text(_) => 3,
            SortKey::Other => 4,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(x), SortKey::Bool(y)) => x.cmp(y),
            (SortKey::Numeric(x), SortKey::Numeric(y)) => x.total_cmp(y),
            (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    SortKey::of(a).compare(&SortKey::of(b))
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.record_call(collection)?;
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        let doc = collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned();
        Ok(doc)
    }

    async fn query(&self, query: &Query) -> Result<Vec<Document>> {
        self.record_call(&query.collection)?;
        let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        let mut docs: Vec<Document> = collections
            .get(&query.collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| {
                        query
                            .filters
                            .iter()
                            .all(|(field, expected)| d.field(field) == Some(expected))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, direction)) = &query.order_by {
            docs.sort_by(|a, b| {
                let ord = compare_values(a.field(field), b.field(field));
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded() -> InMemoryDocumentStore {
        InMemoryDocumentStore::from_json(&json!({
            "hotel_images": [
                { "id": "b", "hotel_id": "h1", "image_url": "b.jpg", "sort_order": 2 },
                { "id": "a", "hotel_id": "h1", "image_url": "a.jpg", "sort_order": 1 },
                { "id": "c", "hotel_id": "h2", "image_url": "c.jpg", "sort_order": 0 },
                { "id": "d", "hotel_id": "h1", "image_url": "d.jpg", "sort_order": 3 }
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_query_filters_orders_and_limits() {
        let store = seeded();
        let q = Query::collection("hotel_images")
            .where_eq("hotel_id", "h1")
            .order_by("sort_order", SortDirection::Descending)
            .limit(2);
        let docs = store.query(&q).await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b"]);
    }

    #[tokio::test]
    async fn test_get_miss_is_none_not_error() {
        let store = seeded();
        assert!(store.get("hotel_images", "zzz").await.unwrap().is_none());
        assert!(store.get("no_such_collection", "a").await.unwrap().is_none());
        assert_eq!(store.query(&Query::collection("empty")).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_failure_injection_and_call_counts() {
        let store = seeded();
        store.fail_collection("hotel_images");
        let err = store.get("hotel_images", "a").await.unwrap_err();
        assert!(matches!(err, ResolverError::Transport { .. }));
        assert_eq!(store.call_count("hotel_images"), 1);

        store.restore_collection("hotel_images");
        assert!(store.get("hotel_images", "a").await.unwrap().is_some());
        assert_eq!(store.total_calls(), 2);
    }

    #[test]
    fn test_timestamps_compare_by_instant_across_shapes() {
        let rfc = json!("2020-03-01T00:00:00Z");
        let millis = json!(1_735_689_600_000i64); // 2025-01-01
        let seconds = json!({ "_seconds": 1_600_000_000 }); // 2020-09-13
        assert_eq!(compare_values(Some(&rfc), Some(&millis)), Ordering::Less);
        assert_eq!(compare_values(Some(&seconds), Some(&rfc)), Ordering::Greater);
        assert_eq!(compare_values(Some(&millis), Some(&seconds)), Ordering::Greater);
        assert_eq!(
            compare_values(Some(&json!({ "_seconds": 5 })), Some(&json!({ "seconds": 9 }))),
            Ordering::Less
        );
    }

    #[test]
    fn test_mixed_shapes_fall_back_to_a_fixed_rank() {
        let missing = None;
        let flag = json!(true);
        let num = json!(3);
        let word = json!("pending");
        let list = json!([1]);
        let ordered = [missing, Some(&flag), Some(&num), Some(&word), Some(&list)];
        for (i, a) in ordered.iter().enumerate() {
            for (j, b) in ordered.iter().enumerate() {
                assert_eq!(compare_values(*a, *b), i.cmp(&j), "{a:?} vs {b:?}");
            }
        }
        assert_eq!(compare_values(Some(&json!(null)), None), Ordering::Equal);
    }

    #[test]
    fn test_fixture_requires_ids() {
        let result = InMemoryDocumentStore::from_json(&json!({ "hotels": [ { "name": "x" } ] }));
        assert!(matches!(result, Err(ResolverError::Config(_))));
    }

    #[test]
    fn test_numeric_ids_are_stringified() {
        let store = InMemoryDocumentStore::from_json(&json!({ "tours": [ { "id": 7, "title": "t" } ] })).unwrap();
        let docs = store.collections.lock().unwrap();
        assert_eq!(docs["tours"][0].id, "7");
        assert!(docs["tours"][0].data.get("id").is_none());
    }
}
