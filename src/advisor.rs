//! Optional LLM-backed advice on top of the computed metrics.
//!
//! The [`Advisor`] trait is the seam: callers hand over a compact metrics
//! digest and get back at most [`MAX_SUGGESTIONS`] short suggestions. The
//! default [`NoopAdvisor`] keeps the pipeline fully offline; the
//! [`OpenAiAdvisor`] (behind the `llm` feature) talks to an OpenAI-compatible
//! chat completions endpoint. Advisor failures are advisory by contract:
//! they surface as [`ChatpulseError::Advisory`] and must never abort the
//! deterministic report.

use crate::error::Result;

#[cfg(feature = "llm")]
use crate::error::ChatpulseError;

/// Upper bound on suggestions returned by any advisor.
pub const MAX_SUGGESTIONS: usize = 5;

/// A source of conversational advice derived from a metrics digest.
pub trait Advisor {
    /// Returns up to [`MAX_SUGGESTIONS`] suggestions for the given digest.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::Advisory`] when the backing service is
    /// unavailable or replies with something unusable.
    fn advise(&self, digest: &str) -> Result<Vec<String>>;
}

/// Advisor that never suggests anything. The offline default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAdvisor;

impl Advisor for NoopAdvisor {
    fn advise(&self, _digest: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Configuration for the hosted advisor.
#[cfg(feature = "llm")]
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Model identifier sent to the endpoint.
    pub model: String,
    /// Chat completions URL.
    pub endpoint: String,
    /// Bearer token. Falls back to `OPENAI_API_KEY` when empty.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

#[cfg(feature = "llm")]
impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[cfg(feature = "llm")]
impl AdvisorConfig {
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        std::env::var("OPENAI_API_KEY").map_err(|_| {
            ChatpulseError::advisory(
                "no API key: pass one explicitly or set OPENAI_API_KEY",
            )
        })
    }
}

/// Advisor backed by an OpenAI-compatible chat completions endpoint.
#[cfg(feature = "llm")]
pub struct OpenAiAdvisor {
    config: AdvisorConfig,
    client: reqwest::Client,
}

#[cfg(feature = "llm")]
impl OpenAiAdvisor {
    /// Builds an advisor from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::Advisory`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatpulseError::advisory(format!("http client: {e}")))?;
        Ok(Self { config, client })
    }

    fn request_body(&self, digest: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a relationship communication coach. Given metrics \
                                about a two-person chat, reply with at most five short, \
                                concrete suggestions, one per line, no numbering."
                },
                { "role": "user", "content": digest }
            ],
            "temperature": 0.4,
            "max_tokens": 400,
        })
    }

    async fn advise_inner(&self, digest: &str) -> Result<Vec<String>> {
        let api_key = self.config.resolve_api_key()?;
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&self.request_body(digest))
            .send()
            .await
            .map_err(|e| ChatpulseError::advisory(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatpulseError::advisory(format!(
                "endpoint returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatpulseError::advisory(format!("invalid JSON reply: {e}")))?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ChatpulseError::advisory("reply missing message content"))?;

        Ok(parse_suggestions(content))
    }
}

#[cfg(feature = "llm")]
impl Advisor for OpenAiAdvisor {
    fn advise(&self, digest: &str) -> Result<Vec<String>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ChatpulseError::advisory(format!("tokio runtime: {e}")))?;
        runtime.block_on(self.advise_inner(digest))
    }
}

/// Splits a model reply into suggestion lines, stripping list markers and
/// capping at [`MAX_SUGGESTIONS`].
#[cfg(feature = "llm")]
fn parse_suggestions(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start_matches(['.', ')'])
                .trim()
        })
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}
