//! Core `SentimentModel` trait and the VADER-backed implementation.
//!
//! Scoring is delegated to the `vader_sentiment` crate, a pretrained
//! lexicon-based analyzer for English text.  Nothing in this module
//! interprets the scores — that is [`crate::sentiment::classify`]'s job.

use thiserror::Error;
use vader_sentiment::SentimentIntensityAnalyzer;

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// The two scores produced for a piece of English text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    /// Overall affect in `[-1.0, 1.0]`: negative = negative sentiment,
    /// positive = positive sentiment, 0 = neutral.
    pub polarity: f32,
    /// Opinion content in `[0.0, 1.0]`: 0 = fully factual, 1 = fully
    /// opinion-laden.
    pub subjectivity: f32,
}

// ---------------------------------------------------------------------------
// ScoreError
// ---------------------------------------------------------------------------

/// Errors that can arise from the scoring subsystem.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoreError {
    /// Empty or whitespace-only input was submitted.
    #[error("cannot score empty text")]
    EmptyInput,

    /// The underlying model produced an unusable result.
    #[error("sentiment model error: {0}")]
    Model(String),
}

// ---------------------------------------------------------------------------
// SentimentModel trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for sentiment scorers.
///
/// Implementations must be `Send + Sync` so that they can be held behind an
/// `Arc<dyn SentimentModel>` and called from any thread.
///
/// # Contract
///
/// - `text` is English prose (the pipeline scores the *translated* text).
/// - Returns `Err(ScoreError::EmptyInput)` for empty/whitespace input.
/// - Output is deterministic for a given input and model version.
pub trait SentimentModel: Send + Sync {
    /// Score `text` and return its polarity and subjectivity.
    fn score(&self, text: &str) -> Result<Sentiment, ScoreError>;
}

// Compile-time assertion: Box<dyn SentimentModel> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SentimentModel>) {}
};

// ---------------------------------------------------------------------------
// VaderModel
// ---------------------------------------------------------------------------

/// Production scorer backed by `vader_sentiment`.
///
/// VADER reports four values per text: `pos`, `neu`, `neg` (token-mass
/// proportions summing to ~1.0) and `compound` (a normalised aggregate in
/// `[-1, 1]`).  The mapping onto this crate's scores:
///
/// * polarity = `compound`
/// * subjectivity = `pos + neg` — the non-neutral share of the text.  A
///   factual sentence scores near 0, an opinion-laden one near 1.
pub struct VaderModel {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderModel {
    /// Build a scorer with the bundled VADER lexicon.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentModel for VaderModel {
    fn score(&self, text: &str) -> Result<Sentiment, ScoreError> {
        if text.trim().is_empty() {
            return Err(ScoreError::EmptyInput);
        }

        let scores = self.analyzer.polarity_scores(text);

        let compound = scores
            .get("compound")
            .copied()
            .ok_or_else(|| ScoreError::Model("missing compound score".into()))?;
        let pos = scores.get("pos").copied().unwrap_or(0.0);
        let neg = scores.get("neg").copied().unwrap_or(0.0);

        Ok(Sentiment {
            polarity: (compound as f32).clamp(-1.0, 1.0),
            subjectivity: ((pos + neg) as f32).clamp(0.0, 1.0),
        })
    }
}

// ---------------------------------------------------------------------------
// MockSentimentModel  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response.
#[cfg(test)]
pub struct MockSentimentModel {
    response: Result<Sentiment, ScoreError>,
}

#[cfg(test)]
impl MockSentimentModel {
    /// Create a mock that always returns the given scores.
    pub fn ok(polarity: f32, subjectivity: f32) -> Self {
        Self {
            response: Ok(Sentiment {
                polarity,
                subjectivity,
            }),
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: ScoreError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
impl SentimentModel for MockSentimentModel {
    fn score(&self, text: &str) -> Result<Sentiment, ScoreError> {
        // Enforce the empty-input contract even in the mock.
        if text.trim().is_empty() {
            return Err(ScoreError::EmptyInput);
        }
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- VaderModel (real lexicon) ---

    #[test]
    fn positive_text_scores_positive() {
        let model = VaderModel::new();
        let s = model.score("I love this wonderful day").unwrap();
        assert!(s.polarity > 0.1, "polarity = {}", s.polarity);
    }

    #[test]
    fn negative_text_scores_negative() {
        let model = VaderModel::new();
        let s = model.score("I hate this place").unwrap();
        assert!(s.polarity < -0.1, "polarity = {}", s.polarity);
    }

    #[test]
    fn factual_text_scores_low_subjectivity() {
        let model = VaderModel::new();
        let s = model.score("The sky is blue.").unwrap();
        assert!(s.subjectivity < 0.4, "subjectivity = {}", s.subjectivity);
    }

    #[test]
    fn scores_stay_in_range() {
        let model = VaderModel::new();
        for text in [
            "I love love love this amazing fantastic wonderful day!!!",
            "horrible terrible awful disgusting worst",
            "The train departs at noon.",
        ] {
            let s = model.score(text).unwrap();
            assert!((-1.0..=1.0).contains(&s.polarity), "{text}: {}", s.polarity);
            assert!(
                (0.0..=1.0).contains(&s.subjectivity),
                "{text}: {}",
                s.subjectivity
            );
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let model = VaderModel::new();
        let a = model.score("I love this wonderful day").unwrap();
        let b = model.score("I love this wonderful day").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_is_rejected() {
        let model = VaderModel::new();
        assert_eq!(model.score("").unwrap_err(), ScoreError::EmptyInput);
        assert_eq!(model.score("   ").unwrap_err(), ScoreError::EmptyInput);
    }

    // --- object safety ---

    #[test]
    fn box_dyn_sentiment_model_compiles() {
        let model: Box<dyn SentimentModel> = Box::new(VaderModel::new());
        let _ = model.score("fine");
    }

    // --- MockSentimentModel ---

    #[test]
    fn mock_returns_configured_scores() {
        let model = MockSentimentModel::ok(0.5, 0.8);
        let s = model.score("anything").unwrap();
        assert_eq!(s.polarity, 0.5);
        assert_eq!(s.subjectivity, 0.8);
    }

    #[test]
    fn mock_enforces_empty_input_contract() {
        let model = MockSentimentModel::ok(0.5, 0.8);
        assert_eq!(model.score("").unwrap_err(), ScoreError::EmptyInput);
    }
}
