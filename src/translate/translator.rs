//! Core `Translator` trait and `ApiTranslator` implementation.
//!
//! `ApiTranslator` calls any LibreTranslate-compatible `/translate` endpoint
//! — a self-hosted LibreTranslate instance, the hosted libretranslate.com
//! service, or anything that speaks the same JSON wire format.  All
//! connection details come from [`TranslatorConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TranslatorConfig;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur during translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The provider rejected the input (bad language pair, rate limit, …).
    #[error("provider rejected the request: {0}")]
    Rejected(String),

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse translation response: {0}")]
    Parse(String),

    /// The provider returned a response with no usable text.
    #[error("provider returned an empty translation")]
    EmptyResponse,
}

impl TranslateError {
    /// Transient failures are worth a single retry; rejections and parse
    /// failures are not — they will fail again identically.
    pub fn is_transient(&self) -> bool {
        matches!(self, TranslateError::Request(_) | TranslateError::Timeout)
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for text translation backends.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn Translator>`).  The source and target languages
/// are fixed per instance (from config); `translate` takes only the text.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
}

// ---------------------------------------------------------------------------
// ApiTranslator
// ---------------------------------------------------------------------------

/// Calls a LibreTranslate-compatible `POST /translate` endpoint.
///
/// Request body: `{ "q": text, "source": "es", "target": "en",
/// "format": "text" }` with an `"api_key"` field attached only when one is
/// configured.  Response body: `{ "translatedText": "…" }`.
///
/// # No hardcoded URLs
/// All connection details (`base_url`, `api_key`, languages, timeout) come
/// exclusively from the [`TranslatorConfig`] passed to
/// [`ApiTranslator::from_config`].
pub struct ApiTranslator {
    client: reqwest::Client,
    config: TranslatorConfig,
}

impl ApiTranslator {
    /// Build an `ApiTranslator` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &TranslatorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl Translator for ApiTranslator {
    /// Send `text` to the configured endpoint for translation.
    ///
    /// The `api_key` field is attached **only** when `config.api_key` is
    /// `Some(key)` and `key` is non-empty — safe for self-hosted instances
    /// that require no authentication.
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let url = format!("{}/translate", self.config.base_url);

        let mut body = serde_json::json!({
            "q":      text,
            "source": self.config.source_lang,
            "target": self.config.target_lang,
            "format": "text"
        });

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            body["api_key"] = serde_json::Value::String(key.to_string());
        }

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            // LibreTranslate reports errors as { "error": "…" }.
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v["error"].as_str().map(str::to_string))
                .unwrap_or_else(|| status.to_string());
            return Err(TranslateError::Rejected(detail));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        let translated = json["translatedText"]
            .as_str()
            .ok_or(TranslateError::EmptyResponse)?
            .trim()
            .to_string();

        if translated.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }

        Ok(translated)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(api_key: Option<&str>) -> TranslatorConfig {
        TranslatorConfig {
            base_url: "http://localhost:5000".into(),
            api_key: api_key.map(|s| s.to_string()),
            source_lang: "es".into(),
            target_lang: "en".into(),
            timeout_secs: 10,
            retry: true,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let config = make_config(None);
        let _translator = ApiTranslator::from_config(&config);
    }

    #[test]
    fn from_config_accepts_empty_api_key() {
        let config = make_config(Some(""));
        let _translator = ApiTranslator::from_config(&config);
    }

    #[test]
    fn from_config_accepts_real_api_key() {
        let config = make_config(Some("lt-test-1234"));
        let _translator = ApiTranslator::from_config(&config);
    }

    /// Verify that `ApiTranslator` is object-safe (usable as `dyn Translator`).
    #[test]
    fn translator_is_object_safe() {
        let config = make_config(None);
        let translator: Box<dyn Translator> = Box::new(ApiTranslator::from_config(&config));
        // Just holding the trait object is sufficient to verify object-safety.
        drop(translator);
    }

    // --- TranslateError ---

    #[test]
    fn request_and_timeout_are_transient() {
        assert!(TranslateError::Request("connection refused".into()).is_transient());
        assert!(TranslateError::Timeout.is_transient());
    }

    #[test]
    fn rejection_parse_and_empty_are_not_transient() {
        assert!(!TranslateError::Rejected("rate limited".into()).is_transient());
        assert!(!TranslateError::Parse("bad json".into()).is_transient());
        assert!(!TranslateError::EmptyResponse.is_transient());
    }
}
