use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A raw document as the store hands it back: key plus untyped body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self { id: id.into(), data }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Filter + order + limit query against one collection
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<(String, SortDirection)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read primitives the resolver needs from the durable document store.
///
/// Absence is never an error: `get` yields `Ok(None)` and `query` yields an
/// empty vector. `Err` is reserved for transport failures.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;
    async fn query(&self, query: &Query) -> Result<Vec<Document>>;
}
