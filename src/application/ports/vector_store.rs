use async_trait::async_trait;
use serde_json::{Map, Value};

#[derive(Debug)]
pub enum VectorStoreError {
    NetworkError(String),
    ApiError(String),
}

impl std::fmt::Display for VectorStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorStoreError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            VectorStoreError::ApiError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for VectorStoreError {}

/// One persisted (vector, payload) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub id: u64,
    pub vector: Vec<f32>,
    pub payload: Map<String, Value>,
}

/// A similarity-search match, highest similarity first.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: u64,
    pub score: f32,
    pub payload: Map<String, Value>,
}

/// Vector database collaborator. `ensure_collection` must be idempotent;
/// write and search failures are surfaced to the caller, which decides how
/// critical they are.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn ensure_collection(
        &self,
        collection: &str,
        vector_size: usize,
    ) -> Result<(), VectorStoreError>;

    async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<PointRecord>,
    ) -> Result<(), VectorStoreError>;

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, VectorStoreError>;
}
