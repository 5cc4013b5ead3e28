//! HTTP client for the Gemini `generateContent` REST API.
//!
//! One call per request: no retry and no backoff. The API key is checked
//! before every call, so a gateway can be built without one and still serve
//! commands that never reach the network.

use std::time::Duration;

use audiencelab_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::GatewayError;
use crate::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse, WebChunk};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Raw output of one grounded generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    /// Unfiltered web citations in response order.
    pub citations: Vec<WebChunk>,
}

/// Client for Gemini grounded text generation.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ClientBuild`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        model: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, GatewayError> {
        Self::with_base_url(api_key, model, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`GeminiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        Self::with_base_url(
            config.gemini_api_key.as_deref(),
            &config.gemini_model,
            config.request_timeout_secs,
            &config.user_agent,
            &config.gemini_base_url,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// `timeout_secs` of `None` sets no overall request timeout; the connect
    /// timeout is always 10 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ClientBuild`] if the `reqwest::Client` cannot be
    /// built, or [`GatewayError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        model: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GatewayError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(GatewayError::ClientBuild)?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GatewayError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            model: model.to_owned(),
            base_url,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Runs one grounded generation with `instruction` as the system prompt.
    ///
    /// `context` names the request in error messages and logs.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::MissingApiKey`] when no key is configured; nothing is sent.
    /// - [`GatewayError::Transport`] on network failure.
    /// - [`GatewayError::Api`] on a non-2xx status.
    /// - [`GatewayError::Envelope`] if the body is not a `generateContent` response.
    pub async fn generate(
        &self,
        context: &'static str,
        instruction: &str,
        prompt: &str,
    ) -> Result<Generation, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingApiKey)?;
        let url = self.endpoint(context)?;
        let body = GenerateContentRequest::grounded(instruction, prompt);

        tracing::debug!(context, model = %self.model, "sending Gemini request");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| GatewayError::Transport { context, source })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| GatewayError::Transport { context, source })?;

        if !status.is_success() {
            let message = Self::api_error_message(&text);
            tracing::warn!(context, status = status.as_u16(), %message, "Gemini request failed");
            return Err(GatewayError::Api {
                context,
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|source| GatewayError::Envelope { context, source })?;

        let generation = Generation {
            text: parsed.text(),
            citations: parsed.web_chunks(),
        };
        tracing::debug!(
            context,
            chars = generation.text.len(),
            citations = generation.citations.len(),
            "Gemini response received"
        );
        Ok(generation)
    }

    fn endpoint(&self, context: &'static str) -> Result<Url, GatewayError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        self.base_url
            .join(&path)
            .map_err(|e| GatewayError::InvalidBaseUrl {
                url: format!("{}{path} ({context})", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Pulls `error.message` out of a Google error body, falling back to the raw text.
    fn api_error_message(body: &str) -> String {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
            _ if body.trim().is_empty() => "empty response body".to_string(),
            _ => body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::with_base_url(Some("test-key"), "test-model", Some(5), "test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_appends_model_path() {
        let client = test_client("https://generativelanguage.googleapis.com");
        let url = client.endpoint("test").unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = test_client("http://localhost:9000/proxy/");
        let url = client.endpoint("test").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/proxy/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = GeminiClient::with_base_url(None, "m", None, "ua", "not a url");
        assert!(matches!(result, Err(GatewayError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let client =
            GeminiClient::with_base_url(Some("  "), "m", None, "ua", "http://localhost").unwrap();
        assert!(!client.has_api_key());
    }

    #[test]
    fn api_error_message_prefers_google_envelope() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(GeminiClient::api_error_message(body), "API key not valid.");
        assert_eq!(GeminiClient::api_error_message("upstream down"), "upstream down");
        assert_eq!(GeminiClient::api_error_message(""), "empty response body");
    }
}
