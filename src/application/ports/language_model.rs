use async_trait::async_trait;

#[derive(Debug)]
pub enum LanguageModelError {
    NetworkError(String),
    ApiError(String),
    InvalidResponse(String),
}

impl std::fmt::Display for LanguageModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageModelError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            LanguageModelError::ApiError(msg) => write!(f, "API error: {}", msg),
            LanguageModelError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for LanguageModelError {}

#[derive(Debug, Clone)]
pub struct EmbedRequest {
    pub text: String,
    pub task_type: String,
    pub title: Option<String>,
}

/// Hosted language-model collaborator: free-text generation for chart
/// inference and trend analysis, plus text embeddings. Implementations must
/// be safe to share across concurrent requests.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, LanguageModelError>;

    async fn embed_text(&self, request: EmbedRequest) -> Result<Vec<f32>, LanguageModelError>;
}
