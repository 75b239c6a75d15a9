use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};

use crate::application::ports::{EmbedRequest, LanguageModel, LanguageModelError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GENERATION_MODEL: &str = "gemini-pro";

#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    pub api_key: String,
    pub generation_model: String,
    pub embedding_model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiClientConfig {
    pub fn new(api_key: String, embedding_model: String) -> Self {
        Self {
            api_key,
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            embedding_model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    model: String,
    content: Content,
    task_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// Client for the Generative Language REST API, covering text generation
/// and text embedding. Built once at startup and shared across requests.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    async fn post_json<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        request: &Req,
    ) -> Result<Resp, LanguageModelError> {
        let response = self
            .client
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| LanguageModelError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LanguageModelError::ApiError(format!(
                "status {}: {}",
                status, body
            )));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| LanguageModelError::InvalidResponse(e.without_url().to_string()))
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, LanguageModelError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.generation_model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response: GenerateContentResponse = self.post_json(&url, &request).await?;

        response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                LanguageModelError::InvalidResponse("response carried no candidates".to_string())
            })
    }

    async fn embed_text(&self, request: EmbedRequest) -> Result<Vec<f32>, LanguageModelError> {
        // The embedding model id already carries its "models/" prefix.
        let url = format!(
            "{}/{}:embedContent",
            self.config.base_url, self.config.embedding_model
        );

        let body = EmbedContentRequest {
            model: self.config.embedding_model.clone(),
            content: Content {
                parts: vec![Part { text: request.text }],
            },
            task_type: request.task_type,
            title: request.title,
        };

        let response: EmbedContentResponse = self.post_json(&url, &body).await?;
        Ok(response.embedding.values)
    }
}
