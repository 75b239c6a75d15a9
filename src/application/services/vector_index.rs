use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{PointRecord, SearchHit, VectorStore, VectorStoreError};
use crate::domain::table::Table;

pub const COLLECTION_NAME: &str = "charts";
pub const VECTOR_SIZE: usize = 768;
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Persists dataset rows alongside the request-level embedding and serves
/// advisory similarity search. One point is written per row, all rows
/// sharing the single embedding computed for the request.
pub struct VectorIndexService {
    store: Arc<dyn VectorStore>,
}

impl VectorIndexService {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Creates the charts collection if needed. A failure here is fatal at
    /// startup; the service cannot run without its collection.
    pub async fn ensure_ready(&self) -> Result<(), VectorStoreError> {
        self.store
            .ensure_collection(COLLECTION_NAME, VECTOR_SIZE)
            .await
    }

    /// Point ids derive only from the row index and the filename, so two
    /// uploads sharing a (row-index, filename) pair overwrite each other's
    /// points. Known collision, kept for compatibility with existing data.
    pub fn point_id(row_index: usize, filename: Option<&str>) -> u64 {
        let mut hasher = DefaultHasher::new();
        (row_index, filename).hash(&mut hasher);
        hasher.finish()
    }

    pub async fn save_rows(
        &self,
        table: &Table,
        vector: &[f32],
        filename: Option<&str>,
    ) -> Result<(), VectorStoreError> {
        let points: Vec<PointRecord> = (0..table.row_count())
            .map(|i| {
                let mut payload = table.row_object(i);
                if let Some(name) = filename {
                    payload.insert("filename".to_string(), Value::from(name));
                }
                PointRecord {
                    id: Self::point_id(i, filename),
                    vector: vector.to_vec(),
                    payload,
                }
            })
            .collect();

        let count = points.len();
        self.store.upsert_points(COLLECTION_NAME, points).await?;
        tracing::info!(count, collection = COLLECTION_NAME, "saved embeddings");
        Ok(())
    }

    /// Similarity search is advisory: every failure is logged and swallowed
    /// into an empty result list.
    pub async fn find_similar(&self, vector: &[f32], limit: usize) -> Vec<SearchHit> {
        match self.store.search(COLLECTION_NAME, vector, limit).await {
            Ok(hits) => {
                tracing::info!(results = hits.len(), "retrieved similar charts");
                hits
            }
            Err(e) => {
                tracing::error!(error = %e, "error retrieving similar charts");
                Vec::new()
            }
        }
    }
}
