//! Translation step — Spanish in, English out.
//!
//! This module provides:
//! * [`Translator`] — async trait implemented by all translation backends.
//! * [`ApiTranslator`] — LibreTranslate-compatible REST API backend.
//! * [`RetryTranslator`] — wraps any backend; retries transient failures once.
//! * [`TranslateError`] — error variants for translation operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voice_sentiment::config::AppConfig;
//! use voice_sentiment::translate::{ApiTranslator, RetryTranslator, Translator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!
//!     let translator = RetryTranslator::new(
//!         ApiTranslator::from_config(&config.translator),
//!         config.translator.retry,
//!     );
//!
//!     let english = translator
//!         .translate("Me encanta este día")
//!         .await
//!         .unwrap();
//!     println!("{english}");
//! }
//! ```

pub mod retry;
pub mod translator;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use retry::RetryTranslator;
pub use translator::{ApiTranslator, TranslateError, Translator};
