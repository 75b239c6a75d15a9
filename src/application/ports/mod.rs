pub mod language_model;
pub mod vector_store;

pub use language_model::{EmbedRequest, LanguageModel, LanguageModelError};
pub use vector_store::{PointRecord, SearchHit, VectorStore, VectorStoreError};
