use crate::domain::error::RetrievalError;
use crate::domain::ports::embedder::{Embedder, InputType};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiEmbedder {
    client: Client,
    api_key: String,
    model: String,
    dimension: usize,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest {
    content: Content,
    task_type: String,
    output_dimensionality: usize,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

impl GeminiEmbedder {
    pub fn new(
        api_key: String,
        model: Option<String>,
        dimension: Option<usize>,
        base_url: Option<String>,
    ) -> Result<Self, RetrievalError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RetrievalError::Embedding(format!("HTTP client error: {e}")))?;
        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| "text-embedding-005".to_string()),
            dimension: dimension.unwrap_or(768),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

#[async_trait::async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str, input_type: InputType) -> Result<Vec<f32>, RetrievalError> {
        let task_type = match input_type {
            InputType::Document => "RETRIEVAL_DOCUMENT",
            InputType::Query => "RETRIEVAL_QUERY",
        };

        let url = format!("{}/v1beta/models/{}:embedContent", self.base_url, self.model);

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&EmbedRequest {
                content: Content {
                    parts: vec![Part { text: text.to_string() }],
                },
                task_type: task_type.to_string(),
                output_dimensionality: self.dimension,
            })
            .send()
            .await
            .map_err(|e| RetrievalError::Embedding(format!("Gemini API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(RetrievalError::Embedding(format!(
                "Gemini API {status}: {body}"
            )));
        }

        let result: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| RetrievalError::Embedding(format!("Parse error: {e}")))?;

        let vector = result.embedding.values;
        if vector.len() != self.dimension {
            return Err(RetrievalError::Embedding(format!(
                "Gemini returned {} dims, expected {}",
                vector.len(),
                self.dimension
            )));
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_tags() {
        let req = EmbedRequest {
            content: Content {
                parts: vec![Part { text: "Fire Drake".into() }],
            },
            task_type: "RETRIEVAL_DOCUMENT".into(),
            output_dimensionality: 768,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["taskType"], "RETRIEVAL_DOCUMENT");
        assert_eq!(json["outputDimensionality"], 768);
        assert_eq!(json["content"]["parts"][0]["text"], "Fire Drake");
    }

    #[test]
    fn response_parses_embedding_values() {
        let raw = r#"{"embedding":{"values":[0.1,0.2,0.3]}}"#;
        let resp: EmbedResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.embedding.values, vec![0.1, 0.2, 0.3]);
    }
}
