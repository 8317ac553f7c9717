//! Threshold mapping from raw scores to display labels.
//!
//! Two small, total classifiers: one over polarity in `[-1, 1]`, one over
//! subjectivity in `[0, 1]`.  All comparisons are strict, so a value exactly
//! on a threshold falls into the lower tier (`p = 0.3` is Positive, not Very
//! Positive).
//!
//! | polarity | label |
//! |----------|-------|
//! | p > 0.3  | Very Positive |
//! | p > 0.1  | Positive |
//! | p < -0.3 | Very Negative |
//! | p < -0.1 | Negative |
//! | else     | Neutral |
//!
//! | subjectivity | label |
//! |--------------|-------|
//! | s > 0.7 | Very Subjective |
//! | s > 0.4 | Subjective |
//! | else    | Objective |

use crate::sentiment::score::Sentiment;

// ---------------------------------------------------------------------------
// PolarityLabel
// ---------------------------------------------------------------------------

/// Five-tier polarity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarityLabel {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl PolarityLabel {
    /// Classify a polarity value.  Total over all of `[-1, 1]` (and beyond —
    /// out-of-range values land in the nearest extreme tier).
    pub fn classify(p: f32) -> Self {
        if p > 0.3 {
            PolarityLabel::VeryPositive
        } else if p > 0.1 {
            PolarityLabel::Positive
        } else if p < -0.3 {
            PolarityLabel::VeryNegative
        } else if p < -0.1 {
            PolarityLabel::Negative
        } else {
            PolarityLabel::Neutral
        }
    }

    /// Human-readable label for the results panel.
    pub fn label(&self) -> &'static str {
        match self {
            PolarityLabel::VeryPositive => "Very Positive",
            PolarityLabel::Positive => "Positive",
            PolarityLabel::Neutral => "Neutral",
            PolarityLabel::Negative => "Negative",
            PolarityLabel::VeryNegative => "Very Negative",
        }
    }

    /// One-line interpretation shown under the score bars.
    pub fn interpretation(&self) -> &'static str {
        match self {
            PolarityLabel::VeryPositive | PolarityLabel::Positive => {
                "The text carries positive emotion — joy, satisfaction or enthusiasm."
            }
            PolarityLabel::Neutral => {
                "The text is mostly factual or balanced, without strong emotion."
            }
            PolarityLabel::Negative | PolarityLabel::VeryNegative => {
                "The text carries negative emotion — sadness, anger or frustration."
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SubjectivityLabel
// ---------------------------------------------------------------------------

/// Three-tier subjectivity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectivityLabel {
    VerySubjective,
    Subjective,
    Objective,
}

impl SubjectivityLabel {
    /// Classify a subjectivity value.  Total over all of `[0, 1]`.
    pub fn classify(s: f32) -> Self {
        if s > 0.7 {
            SubjectivityLabel::VerySubjective
        } else if s > 0.4 {
            SubjectivityLabel::Subjective
        } else {
            SubjectivityLabel::Objective
        }
    }

    /// Human-readable label for the results panel.
    pub fn label(&self) -> &'static str {
        match self {
            SubjectivityLabel::VerySubjective => "Very Subjective",
            SubjectivityLabel::Subjective => "Subjective",
            SubjectivityLabel::Objective => "Objective",
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience
// ---------------------------------------------------------------------------

impl Sentiment {
    /// Polarity tier for this score pair.
    pub fn polarity_label(&self) -> PolarityLabel {
        PolarityLabel::classify(self.polarity)
    }

    /// Subjectivity tier for this score pair.
    pub fn subjectivity_label(&self) -> SubjectivityLabel {
        SubjectivityLabel::classify(self.subjectivity)
    }
}

/// Normalise polarity from `[-1, 1]` to a progress-bar fill in `[0, 1]`.
///
/// `-1 → 0.0`, `0 → 0.5`, `1 → 1.0`; out-of-range inputs clamp.
/// Subjectivity needs no normalisation — it is already a fill value.
pub fn polarity_fill(p: f32) -> f32 {
    ((p + 1.0) / 2.0).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- polarity tiers ----------------------------------------------------

    #[test]
    fn strongly_positive_is_very_positive() {
        assert_eq!(PolarityLabel::classify(0.8), PolarityLabel::VeryPositive);
        assert_eq!(PolarityLabel::classify(1.0), PolarityLabel::VeryPositive);
    }

    #[test]
    fn mildly_positive_is_positive() {
        assert_eq!(PolarityLabel::classify(0.2), PolarityLabel::Positive);
    }

    #[test]
    fn strongly_negative_is_very_negative() {
        assert_eq!(PolarityLabel::classify(-0.8), PolarityLabel::VeryNegative);
        assert_eq!(PolarityLabel::classify(-1.0), PolarityLabel::VeryNegative);
    }

    #[test]
    fn mildly_negative_is_negative() {
        assert_eq!(PolarityLabel::classify(-0.2), PolarityLabel::Negative);
    }

    #[test]
    fn zero_is_neutral() {
        assert_eq!(PolarityLabel::classify(0.0), PolarityLabel::Neutral);
    }

    // ---- polarity boundaries (strict comparisons → lower tier) ------------

    #[test]
    fn boundary_p_0_3_is_positive_not_very_positive() {
        assert_eq!(PolarityLabel::classify(0.3), PolarityLabel::Positive);
    }

    #[test]
    fn boundary_p_0_1_is_neutral_not_positive() {
        assert_eq!(PolarityLabel::classify(0.1), PolarityLabel::Neutral);
    }

    #[test]
    fn boundary_p_minus_0_3_is_negative_not_very_negative() {
        assert_eq!(PolarityLabel::classify(-0.3), PolarityLabel::Negative);
    }

    #[test]
    fn boundary_p_minus_0_1_is_neutral_not_negative() {
        assert_eq!(PolarityLabel::classify(-0.1), PolarityLabel::Neutral);
    }

    #[test]
    fn just_past_each_boundary_moves_up_a_tier() {
        assert_eq!(PolarityLabel::classify(0.300_1), PolarityLabel::VeryPositive);
        assert_eq!(PolarityLabel::classify(0.100_1), PolarityLabel::Positive);
        assert_eq!(
            PolarityLabel::classify(-0.300_1),
            PolarityLabel::VeryNegative
        );
        assert_eq!(PolarityLabel::classify(-0.100_1), PolarityLabel::Negative);
    }

    /// Every value in [-1, 1] maps to exactly one label — a dense sweep must
    /// never panic and must hit only the five variants.
    #[test]
    fn polarity_classifier_is_total() {
        for i in -1000..=1000 {
            let p = i as f32 / 1000.0;
            let _ = PolarityLabel::classify(p).label();
        }
    }

    // ---- subjectivity tiers ------------------------------------------------

    #[test]
    fn high_subjectivity_is_very_subjective() {
        assert_eq!(
            SubjectivityLabel::classify(0.9),
            SubjectivityLabel::VerySubjective
        );
    }

    #[test]
    fn mid_subjectivity_is_subjective() {
        assert_eq!(SubjectivityLabel::classify(0.5), SubjectivityLabel::Subjective);
    }

    #[test]
    fn low_subjectivity_is_objective() {
        assert_eq!(SubjectivityLabel::classify(0.1), SubjectivityLabel::Objective);
        assert_eq!(SubjectivityLabel::classify(0.0), SubjectivityLabel::Objective);
    }

    #[test]
    fn boundary_s_0_7_is_subjective_not_very_subjective() {
        assert_eq!(SubjectivityLabel::classify(0.7), SubjectivityLabel::Subjective);
    }

    #[test]
    fn boundary_s_0_4_is_objective_not_subjective() {
        assert_eq!(SubjectivityLabel::classify(0.4), SubjectivityLabel::Objective);
    }

    #[test]
    fn subjectivity_classifier_is_total() {
        for i in 0..=1000 {
            let s = i as f32 / 1000.0;
            let _ = SubjectivityLabel::classify(s).label();
        }
    }

    // ---- polarity_fill -----------------------------------------------------

    #[test]
    fn fill_maps_extremes_and_midpoint() {
        assert_eq!(polarity_fill(-1.0), 0.0);
        assert_eq!(polarity_fill(0.0), 0.5);
        assert_eq!(polarity_fill(1.0), 1.0);
    }

    #[test]
    fn fill_clamps_out_of_range() {
        assert_eq!(polarity_fill(-2.0), 0.0);
        assert_eq!(polarity_fill(2.0), 1.0);
    }

    // ---- Sentiment convenience ---------------------------------------------

    #[test]
    fn sentiment_labels_match_classifiers() {
        let s = Sentiment {
            polarity: 0.5,
            subjectivity: 0.8,
        };
        assert_eq!(s.polarity_label(), PolarityLabel::VeryPositive);
        assert_eq!(s.subjectivity_label(), SubjectivityLabel::VerySubjective);
    }

    #[test]
    fn labels_render_expected_text() {
        assert_eq!(PolarityLabel::VeryPositive.label(), "Very Positive");
        assert_eq!(PolarityLabel::Neutral.label(), "Neutral");
        assert_eq!(SubjectivityLabel::Objective.label(), "Objective");
    }
}
