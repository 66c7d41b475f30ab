//! Gemini client for answer generation via the Generative Language REST API

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::llm::{LlmProvider, TextStream};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Failure of one request attempt, tagged by whether a retry can help
enum AttemptError {
    Transient(Error),
    Fatal(Error),
}

impl AttemptError {
    fn for_status(status: StatusCode, message: String) -> Self {
        let error = Error::generation(message);
        if is_transient(status) {
            Self::Transient(error)
        } else {
            Self::Fatal(error)
        }
    }
}

/// Rate limits and server-side failures are worth retrying
fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Gemini API client with automatic retry
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Deserialize, Default)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate with all parts concatenated; `None` without candidates
    fn text(self) -> Result<Option<String>> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::generation(format!("Prompt blocked by Gemini: {}", reason)));
        }

        Ok(self.candidates.into_iter().next().map(|c| {
            c.content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        }))
    }
}

/// Decode one SSE `data:` payload into a text piece. Empty pieces are skipped.
fn parse_stream_event(data: &str) -> Option<Result<String>> {
    match serde_json::from_str::<GenerateResponse>(data) {
        // stream tails may carry only finish metadata
        Ok(response) => match response.text() {
            Ok(Some(text)) if !text.is_empty() => Some(Ok(text)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        },
        Err(e) => Some(Err(Error::generation(format!(
            "Failed to parse Gemini stream event: {}",
            e
        )))),
    }
}

impl GeminiClient {
    /// Create a new Gemini client with retry support
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
        })
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, method)
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::generation("GEMINI_API_KEY is not set"))
    }

    fn request<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }

    /// Retry transient failures with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, AttemptError>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Transient(e)) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        let delay = Duration::from_secs(2u64.saturating_pow(attempt));
                        tracing::warn!(
                            "Gemini request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::generation("Unknown error")))
    }

    async fn generate_once(
        &self,
        url: &str,
        key: &str,
        prompt: &str,
    ) -> std::result::Result<String, AttemptError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, key)
            .json(&self.request(prompt))
            .send()
            .await
            .map_err(|e| {
                AttemptError::Transient(Error::generation(format!("Gemini request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::for_status(
                status,
                format!("Gemini generation failed ({}): {}", status, body),
            ));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            AttemptError::Fatal(Error::generation(format!(
                "Failed to parse Gemini response: {}",
                e
            )))
        })?;

        parsed
            .text()
            .and_then(|text| text.ok_or_else(|| Error::generation("No text in Gemini response")))
            .map_err(AttemptError::Fatal)
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let key = self.api_key()?;
        let url = self.endpoint("generateContent");

        tracing::debug!("Gemini request: {} prompt chars", prompt.chars().count());
        self.retry_request(|| self.generate_once(&url, key, prompt)).await
    }

    async fn complete_stream(&self, prompt: &str) -> Result<TextStream> {
        let key = self.api_key()?;
        let url = format!("{}?alt=sse", self.endpoint("streamGenerateContent"));

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, key)
            .json(&self.request(prompt))
            .send()
            .await
            .map_err(|e| Error::generation(format!("Gemini stream request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::generation(format!(
                "Gemini stream failed ({}): {}",
                status, body
            )));
        }

        let stream = response
            .bytes_stream()
            .eventsource()
            .filter_map(|event| async move {
                match event {
                    Ok(event) => parse_stream_event(&event.data),
                    Err(e) => Some(Err(Error::generation(format!("Gemini stream error: {}", e)))),
                }
            });

        Ok(stream.boxed())
    }

    async fn health_check(&self) -> Result<bool> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(false);
        };
        let url = format!("{}/models/{}", self.base_url, self.model);

        match self.client.get(&url).header(API_KEY_HEADER, key).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
