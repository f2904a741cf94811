//! HTTP client for the studio service REST API
//!
//! Read endpoints retry transient failures with exponential backoff; command
//! endpoints (create, delete, select) run exactly once.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::types::{Conversation, GenerationRecord, SourceDocument, Workflow};

/// HTTP client for the studio service
pub struct StudioClient {
    config: ServerConfig,
    http_client: reqwest::Client,
    base_url: String,
}

impl StudioClient {
    /// Create a new client from configuration
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ServerConfig) -> Result<Self> {
        config.validate()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &config.api_key {
            let auth_value = format!("Bearer {}", api_key);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Config(format!("invalid api_key: {}", e)))?,
            );
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            base_url,
        })
    }

    // ============================================
    // Read endpoints
    // ============================================

    /// List all conversations, newest activity first as the service orders them.
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        self.get_with_retry("/conversations").await
    }

    /// List the generation history.
    pub async fn list_generations(&self) -> Result<Vec<GenerationRecord>> {
        self.get_with_retry("/generations").await
    }

    /// List the uploaded documents.
    pub async fn list_documents(&self) -> Result<Vec<SourceDocument>> {
        self.get_with_retry("/documents").await
    }

    /// Fetch the pipeline state of the generation currently in flight.
    ///
    /// Returns None when no workflow is running.
    pub async fn current_workflow(&self) -> Result<Option<Workflow>> {
        let url = format!("{}/workflow/current", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Api(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            let workflow: Workflow = response
                .json()
                .await
                .map_err(|e| Error::Api(format!("failed to parse response: {}", e)))?;
            Ok(Some(workflow))
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Ok(None)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            Err(Error::Api(format!("API error ({}): {}", status, error_text)))
        }
    }

    /// Check if the client can reach the service
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        match self.http_client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    // ============================================
    // Command endpoints
    // ============================================

    /// Create a new empty conversation and return it.
    pub async fn create_conversation(&self) -> Result<Conversation> {
        let url = format!("{}/conversations", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::Api(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| Error::Api(format!("failed to parse response: {}", e)))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            Err(Error::Api(format!("API error ({}): {}", status, error_text)))
        }
    }

    /// Delete a conversation.
    ///
    /// Returns true on success, false if the conversation did not exist.
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<bool> {
        let url = format!(
            "{}/conversations/{}",
            self.base_url,
            urlencoding::encode(conversation_id)
        );

        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Error::Api(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            Ok(true)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            Err(Error::Api(format!("API error ({}): {}", status, error_text)))
        }
    }

    /// Mark a document for reuse in the active conversation.
    pub async fn select_document(&self, document_name: &str) -> Result<()> {
        let url = format!(
            "{}/documents/{}/select",
            self.base_url,
            urlencoding::encode(document_name)
        );

        let response = self
            .http_client
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::Api(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            Err(Error::Api(format!("API error ({}): {}", status, error_text)))
        }
    }

    // ============================================
    // Internals
    // ============================================

    /// GET a JSON payload once.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Api(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| Error::Api(format!("failed to parse response: {}", e)))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            Err(Error::Api(format!("API error ({}): {}", status, error_text)))
        }
    }

    /// GET with retry for transient failures (5xx, timeouts)
    ///
    /// Backs off exponentially, capped at 30 seconds.
    async fn get_with_retry<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let mut last_error = None;
        let mut delay = Duration::from_millis(500);

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(
                    "Retrying GET {} (attempt {}/{}), waiting {:?}",
                    path,
                    attempt + 1,
                    self.config.max_retries + 1,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, Duration::from_secs(30));
            }

            match self.get_json(path).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if is_retryable_error(&e) {
                        tracing::warn!("Transient error fetching {}: {}", path, e);
                        last_error = Some(e);
                        continue;
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Api("max retries exceeded".to_string())))
    }
}

/// Check if an error is retryable (transient)
fn is_retryable_error(error: &Error) -> bool {
    match error {
        Error::Api(msg) => {
            // Retry on 5xx errors
            msg.contains("50") && (msg.contains("API error") || msg.contains("HTTP"))
                // Retry on network/timeout errors
                || msg.contains("timeout")
                || msg.contains("connection")
                || msg.contains("request failed")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ServerConfig {
            base_url: "".to_string(),
            ..Default::default()
        };
        assert!(StudioClient::new(config).is_err());
    }

    #[test]
    fn test_client_with_valid_config() {
        let config = ServerConfig {
            base_url: "https://studio.example.com/".to_string(),
            api_key: Some("dk_live_test".to_string()),
            ..Default::default()
        };
        let client = StudioClient::new(config).unwrap();
        assert_eq!(client.base_url, "https://studio.example.com");
    }

    #[test]
    fn test_is_retryable_error() {
        assert!(is_retryable_error(&Error::Api(
            "API error (500): internal error".to_string()
        )));
        assert!(is_retryable_error(&Error::Api(
            "HTTP request failed: timeout".to_string()
        )));
        assert!(!is_retryable_error(&Error::Api(
            "API error (400): bad request".to_string()
        )));
        assert!(!is_retryable_error(&Error::Api(
            "API error (401): unauthorized".to_string()
        )));
        assert!(!is_retryable_error(&Error::Config("bad".to_string())));
    }
}
