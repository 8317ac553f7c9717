//! Retry wrapper — wraps any [`Translator`] and retries once on transient
//! failure.
//!
//! [`RetryTranslator`] is the minimum hardening on top of the client
//! timeout: a single second attempt when the first fails with a connection
//! error or timeout.  Rejections and parse failures are never retried —
//! they would fail again identically.

use async_trait::async_trait;

use crate::translate::translator::{TranslateError, Translator};

// ---------------------------------------------------------------------------
// RetryTranslator
// ---------------------------------------------------------------------------

/// A transparent wrapper around any [`Translator`] that retries transient
/// failures exactly once.
///
/// # Example
/// ```rust
/// use voice_sentiment::translate::{ApiTranslator, RetryTranslator};
/// use voice_sentiment::config::TranslatorConfig;
///
/// let inner = ApiTranslator::from_config(&TranslatorConfig::default());
/// let translator = RetryTranslator::new(inner, true);
/// // `translator` implements Translator; a blip on the first request no
/// // longer surfaces to the user.
/// ```
pub struct RetryTranslator<T: Translator> {
    inner: T,
    /// When `false` the wrapper is a pass-through (single attempt).
    enabled: bool,
}

impl<T: Translator> RetryTranslator<T> {
    /// Wrap `inner`; `enabled` comes from `TranslatorConfig::retry`.
    pub fn new(inner: T, enabled: bool) -> Self {
        Self { inner, enabled }
    }

    /// Return a reference to the wrapped translator.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Translator + Send + Sync> Translator for RetryTranslator<T> {
    /// Attempt translation; on a transient error, try once more.
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        match self.inner.translate(text).await {
            Ok(translated) => Ok(translated),
            Err(e) if self.enabled && e.is_transient() => {
                log::warn!("translation attempt failed ({e}); retrying once");
                self.inner.translate(text).await
            }
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
