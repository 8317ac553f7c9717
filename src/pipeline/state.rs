//! Pipeline state machine and the per-analysis result record.
//!
//! [`PipelineState`] is the UI-side view of what the orchestrator is doing.
//! [`AnalysisReport`] is the completed record of one analysis — created
//! fresh per Analyze action, delivered over the result channel, and
//! discarded when the next analysis starts.  Nothing is persisted.

use crate::sentiment::{PolarityLabel, Sentiment, SubjectivityLabel};

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// States of the analysis pipeline.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──record click──▶ Recording ──stop click──▶ Transcribing ──▶ Idle
///                                                   (text area pre-filled)
/// Idle ──analyze click──▶ Translating ──▶ Scoring ──▶ Result
/// any state ──error──▶ Error
/// Error / Result ──next action──▶ Idle
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// Waiting for user input.
    Idle,

    /// Microphone is active; audio is accumulating in the shared buffer.
    Recording,

    /// Whisper is running on the blocking thread pool.
    Transcribing,

    /// The translation request is in flight.
    Translating,

    /// The sentiment model is scoring the translated text.
    Scoring,

    /// A completed [`AnalysisReport`] is on display.
    Result,

    /// A recoverable error occurred.  The pipeline returns to `Idle` on the
    /// next user action.
    Error,
}

impl PipelineState {
    /// Returns `true` while the pipeline is actively processing.
    ///
    /// The UI uses this to disable the Analyze and record controls while a
    /// run is in flight — at most one analysis is ever in progress.
    ///
    /// ```
    /// use voice_sentiment::pipeline::PipelineState;
    ///
    /// assert!(!PipelineState::Idle.is_busy());
    /// assert!(PipelineState::Recording.is_busy());
    /// assert!(PipelineState::Transcribing.is_busy());
    /// assert!(PipelineState::Translating.is_busy());
    /// assert!(PipelineState::Scoring.is_busy());
    /// assert!(!PipelineState::Result.is_busy());
    /// assert!(!PipelineState::Error.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineState::Recording
                | PipelineState::Transcribing
                | PipelineState::Translating
                | PipelineState::Scoring
        )
    }

    /// A short human-readable label suitable for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Recording => "Recording",
            PipelineState::Transcribing => "Transcribing",
            PipelineState::Translating => "Translating",
            PipelineState::Scoring => "Scoring",
            PipelineState::Result => "Done",
            PipelineState::Error => "Error",
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState::Idle
    }
}

// ---------------------------------------------------------------------------
// AnalysisReport
// ---------------------------------------------------------------------------

/// The completed record of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// The Spanish text as submitted (post-editing, pre-translation).
    pub source_text: String,
    /// The English translation the scores were computed from.
    pub translated_text: String,
    /// Scores produced by the sentiment model.
    pub sentiment: Sentiment,
}

impl AnalysisReport {
    /// Polarity tier of this report.
    pub fn polarity_label(&self) -> PolarityLabel {
        self.sentiment.polarity_label()
    }

    /// Subjectivity tier of this report.
    pub fn subjectivity_label(&self) -> SubjectivityLabel {
        self.sentiment.subjectivity_label()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
