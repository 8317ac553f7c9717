//! Sentiment scoring and classification.
//!
//! This module provides:
//! * [`SentimentModel`] — object-safe trait for scorers.
//! * [`VaderModel`] — pretrained lexicon scorer (`vader_sentiment`).
//! * [`Sentiment`] — the `(polarity, subjectivity)` score pair.
//! * [`PolarityLabel`] / [`SubjectivityLabel`] — threshold classifiers.
//! * [`polarity_fill`] — `(p + 1) / 2` progress-bar normalisation.
//!
//! # Quick start
//!
//! ```rust
//! use voice_sentiment::sentiment::{SentimentModel, VaderModel};
//!
//! let model = VaderModel::new();
//! let scores = model.score("I love this wonderful day").unwrap();
//! assert!(scores.polarity > 0.1);
//! println!("{}", scores.polarity_label().label()); // "Positive" or better
//! ```

pub mod classify;
pub mod score;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use classify::{polarity_fill, PolarityLabel, SubjectivityLabel};
pub use score::{ScoreError, Sentiment, SentimentModel, VaderModel};

// test-only re-export so the pipeline test module can import the mock
// without the full path.
#[cfg(test)]
pub use score::MockSentimentModel;
