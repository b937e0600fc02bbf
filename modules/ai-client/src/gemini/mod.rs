mod client;
pub(crate) mod types;

pub use types::Citation;

use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::schema::StructuredOutput;
use crate::util::strip_code_blocks;

use client::GeminiClient;
use types::{GenerateRequest, GenerationConfig};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Gemini Agent
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    model: String,
    base_url: Option<String>,
    timeout: Duration,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow!("GEMINI_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Cap each outbound call; a hung provider resolves to an error instead
    /// of pending forever.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> GeminiClient {
        let client = GeminiClient::new(&self.api_key, self.timeout);
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    /// Type-safe structured output extraction.
    pub async fn extract<T: StructuredOutput>(
        &self,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<T> {
        let (value, _) = self
            .generate_structured(system_prompt.into(), user_prompt.into(), false)
            .await?;
        Ok(value)
    }

    /// Structured output extraction with the provider's web-search grounding.
    /// Returns the parsed value plus any citations from the grounding side
    /// channel (empty when the provider attached none).
    pub async fn extract_grounded<T: StructuredOutput>(
        &self,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<(T, Vec<Citation>)> {
        self.generate_structured(system_prompt.into(), user_prompt.into(), true)
            .await
    }

    async fn generate_structured<T: StructuredOutput>(
        &self,
        system_prompt: String,
        user_prompt: String,
        grounded: bool,
    ) -> Result<(T, Vec<Citation>)> {
        let schema = T::gemini_schema();

        debug!(
            type_name = T::type_name(),
            grounded, "Gemini structured output extraction"
        );

        let mut request = GenerateRequest::new()
            .system(system_prompt)
            .user(user_prompt)
            .config(GenerationConfig {
                temperature: Some(0.0),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
            });

        if grounded {
            request = request.google_search();
        }

        let response = self.client().generate(&self.model, &request).await?;

        let citations = response.citations();
        let text = response
            .text()
            .ok_or_else(|| anyhow!("No response from Gemini"))?;

        let value = serde_json::from_str(strip_code_blocks(&text))
            .map_err(|e| anyhow!("Failed to deserialize response: {}", e))?;

        Ok((value, citations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_new() {
        let ai = Gemini::new("test-key", "gemini-2.5-flash");
        assert_eq!(ai.model(), "gemini-2.5-flash");
        assert_eq!(ai.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_gemini_with_base_url() {
        let ai = Gemini::new("test-key", "gemini-2.5-flash").with_base_url("https://custom.api.com");
        assert_eq!(ai.base_url, Some("https://custom.api.com".to_string()));
    }

    #[test]
    fn test_gemini_with_timeout() {
        let ai = Gemini::new("test-key", "gemini-2.5-flash")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(ai.timeout, Duration::from_secs(5));
    }
}
