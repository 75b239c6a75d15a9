pub mod gemini_client;
pub mod qdrant_store;

pub use gemini_client::{GeminiClient, GeminiClientConfig};
pub use qdrant_store::QdrantStore;
