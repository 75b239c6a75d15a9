use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::application::ports::{PointRecord, SearchHit, VectorStore, VectorStoreError};

#[derive(Serialize)]
struct UpsertBody {
    points: Vec<PointBody>,
}

#[derive(Serialize)]
struct PointBody {
    id: u64,
    vector: Vec<f32>,
    payload: Map<String, Value>,
}

#[derive(Serialize)]
struct SearchBody {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    id: u64,
    score: f32,
    #[serde(default)]
    payload: Map<String, Value>,
}

/// Qdrant REST gateway. Collections are created with cosine distance; point
/// writes wait for the operation to be applied before returning.
#[derive(Debug, Clone)]
pub struct QdrantStore {
    client: Client,
    base_url: String,
}

impl QdrantStore {
    pub fn new(host: &str, port: u16) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("http://{}:{}", host, port),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{}", self.base_url, collection)
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn ensure_collection(
        &self,
        collection: &str,
        vector_size: usize,
    ) -> Result<(), VectorStoreError> {
        let exists = self
            .client
            .get(self.collection_url(collection))
            .send()
            .await
            .map(|response| response.status().is_success())
            .unwrap_or(false);

        if exists {
            tracing::info!(collection, "collection already exists");
            return Ok(());
        }

        tracing::info!(collection, vector_size, "creating collection");

        let response = self
            .client
            .put(self.collection_url(collection))
            .json(&json!({
                "vectors": { "size": vector_size, "distance": "Cosine" }
            }))
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::ApiError(format!(
                "collection creation failed with status {}: {}",
                status, body
            )));
        }

        tracing::info!(collection, "collection created");
        Ok(())
    }

    async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<PointRecord>,
    ) -> Result<(), VectorStoreError> {
        let body = UpsertBody {
            points: points
                .into_iter()
                .map(|point| PointBody {
                    id: point.id,
                    vector: point.vector,
                    payload: point.payload,
                })
                .collect(),
        };

        let response = self
            .client
            .put(format!("{}/points", self.collection_url(collection)))
            .query(&[("wait", "true")])
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::ApiError(format!(
                "upsert failed with status {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, VectorStoreError> {
        let body = SearchBody {
            vector: vector.to_vec(),
            limit,
            with_payload: true,
        };

        let response = self
            .client
            .post(format!("{}/points/search", self.collection_url(collection)))
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorStoreError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::ApiError(format!(
                "search failed with status {}: {}",
                status, text
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| VectorStoreError::ApiError(e.without_url().to_string()))?;

        Ok(parsed
            .result
            .into_iter()
            .map(|point| SearchHit {
                id: point.id,
                score: point.score,
                payload: point.payload,
            })
            .collect())
    }
}
