//! Pre-transcription clip validation.
//!
//! [`ClipValidator`] checks a 16 kHz mono `f32` clip before it is handed to
//! the STT engine, so that obviously unusable recordings are rejected with a
//! message the user can act on instead of producing a garbage transcript:
//!
//! | Check | Rejection |
//! |-------|-----------|
//! | Duration | clip outside `[min_secs, max_secs]` |
//! | Silence | no sample exceeds the amplitude floor — "no speech detected" |
//! | Clipping | too many samples at full scale — unintelligible audio |
//!
//! # Example
//!
//! ```rust
//! use voice_sentiment::audio::{ClipError, ClipValidator};
//!
//! let validator = ClipValidator::new(0.5, 30.0);
//!
//! // 8000 samples @ 16 kHz = 0.5 s (just at the minimum)
//! let clip = vec![0.1_f32; 8_000];
//! assert!(validator.validate(&clip).is_ok());
//!
//! let short = vec![0.1_f32; 100];
//! assert!(matches!(validator.validate(&short), Err(ClipError::TooShort { .. })));
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// ClipError
// ---------------------------------------------------------------------------

/// Reason a recorded clip was rejected before transcription.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClipError {
    /// Recording is shorter than the configured minimum.
    #[error("recording too short: {got_secs:.2}s (minimum {min_secs:.2}s)")]
    TooShort { min_secs: f32, got_secs: f32 },

    /// Recording is longer than the configured maximum.
    #[error("recording too long: {got_secs:.2}s (maximum {max_secs:.2}s)")]
    TooLong { max_secs: f32, got_secs: f32 },

    /// All samples are below the silence floor — no speech was picked up.
    #[error("no speech detected: peak amplitude {amplitude:.4} (floor {threshold:.4})")]
    Silent { amplitude: f32, threshold: f32 },

    /// Too many samples at full scale — the microphone overloaded.
    #[error("audio clipping: {clipped_pct:.1}% of samples clipped (max {max_pct:.1}%)")]
    Clipped { clipped_pct: f32, max_pct: f32 },
}

// ---------------------------------------------------------------------------
// ClipValidator
// ---------------------------------------------------------------------------

/// Validates an audio clip before STT transcription.
///
/// All thresholds can be adjusted; `Default` matches the values in
/// [`crate::config::AudioConfig`].
pub struct ClipValidator {
    /// Minimum allowed duration in seconds (default: `0.5`).
    pub min_recording_secs: f32,
    /// Maximum allowed duration in seconds (default: `30.0`).
    pub max_recording_secs: f32,
    /// Minimum peak amplitude for the clip to count as speech
    /// (default: `0.01`).
    pub silence_threshold: f32,
    /// Amplitude above which a sample is considered clipped (default: `0.99`).
    pub clipping_threshold: f32,
    /// Maximum fraction of clipped samples (0.0–100.0 %) before the clip is
    /// rejected (default: `10.0` %).
    pub clipping_max_pct: f32,
}

impl Default for ClipValidator {
    fn default() -> Self {
        Self {
            min_recording_secs: 0.5,
            max_recording_secs: 30.0,
            silence_threshold: 0.01,
            clipping_threshold: 0.99,
            clipping_max_pct: 10.0,
        }
    }
}

impl ClipValidator {
    /// Create a validator with the given duration limits and default thresholds.
    pub fn new(min_secs: f32, max_secs: f32) -> Self {
        Self {
            min_recording_secs: min_secs,
            max_recording_secs: max_secs,
            ..Default::default()
        }
    }

    /// Validate `clip` (16 kHz mono `f32`).
    ///
    /// Returns `Ok(())` when all checks pass, or the first [`ClipError`]
    /// encountered otherwise.
    ///
    /// Checks run in this order:
    /// 1. Duration (too short → too long)
    /// 2. Silence
    /// 3. Clipping
    pub fn validate(&self, clip: &[f32]) -> Result<(), ClipError> {
        const SAMPLE_RATE: f32 = 16_000.0;

        // 1. Duration checks
        let duration_secs = clip.len() as f32 / SAMPLE_RATE;

        if duration_secs < self.min_recording_secs {
            return Err(ClipError::TooShort {
                min_secs: self.min_recording_secs,
                got_secs: duration_secs,
            });
        }

        if duration_secs > self.max_recording_secs {
            return Err(ClipError::TooLong {
                max_secs: self.max_recording_secs,
                got_secs: duration_secs,
            });
        }

        // 2. Silence check
        let max_amplitude = clip.iter().map(|s| s.abs()).fold(0.0_f32, f32::max);

        if max_amplitude < self.silence_threshold {
            return Err(ClipError::Silent {
                amplitude: max_amplitude,
                threshold: self.silence_threshold,
            });
        }

        // 3. Clipping check
        if !clip.is_empty() {
            let clipped = clip
                .iter()
                .filter(|&&s| s.abs() > self.clipping_threshold)
                .count();
            let clipped_pct = clipped as f32 / clip.len() as f32 * 100.0;

            if clipped_pct > self.clipping_max_pct {
                return Err(ClipError::Clipped {
                    clipped_pct,
                    max_pct: self.clipping_max_pct,
                });
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_clip(secs: f32, amplitude: f32) -> Vec<f32> {
        let n = (secs * 16_000.0) as usize;
        vec![amplitude; n]
    }

    #[test]
    fn valid_clip_passes() {
        let validator = ClipValidator::default();
        let clip = make_clip(1.0, 0.3);
        assert!(validator.validate(&clip).is_ok());
    }

    #[test]
    fn too_short_rejected() {
        let validator = ClipValidator::new(0.5, 30.0);
        let clip = make_clip(0.1, 0.3); // 0.1 s < 0.5 s minimum
        let err = validator.validate(&clip).unwrap_err();
        assert!(matches!(err, ClipError::TooShort { .. }), "{err}");
    }

    #[test]
    fn too_long_rejected() {
        let validator = ClipValidator::new(0.5, 10.0);
        let clip = make_clip(11.0, 0.3); // 11 s > 10 s maximum
        let err = validator.validate(&clip).unwrap_err();
        assert!(matches!(err, ClipError::TooLong { .. }), "{err}");
    }

    #[test]
    fn silent_clip_rejected_as_no_speech() {
        let validator = ClipValidator::default();
        let clip = make_clip(1.0, 0.0); // all zeros
        let err = validator.validate(&clip).unwrap_err();
        assert!(matches!(err, ClipError::Silent { .. }), "{err}");
        assert!(err.to_string().contains("no speech"));
    }

    #[test]
    fn amplitude_just_below_floor_rejected() {
        let mut validator = ClipValidator::default();
        validator.silence_threshold = 0.05;
        let clip = make_clip(1.0, 0.04); // 0.04 < 0.05
        assert!(matches!(
            validator.validate(&clip).unwrap_err(),
            ClipError::Silent { .. }
        ));
    }

    #[test]
    fn heavy_clipping_rejected() {
        let mut validator = ClipValidator::default();
        validator.clipping_max_pct = 5.0;

        // all samples at full scale
        let clip = make_clip(1.0, 1.0);
        let err = validator.validate(&clip).unwrap_err();
        assert!(matches!(err, ClipError::Clipped { .. }), "{err}");
    }

    #[test]
    fn minor_clipping_within_limit_passes() {
        let validator = ClipValidator::default(); // 10% max
        // 95% quiet + 5% clipped (< 10% limit)
        let total = 16_000usize;
        let clipped_count = total * 5 / 100;
        let mut clip = vec![0.3_f32; total - clipped_count];
        clip.extend(vec![1.0_f32; clipped_count]);
        assert!(validator.validate(&clip).is_ok());
    }

    #[test]
    fn at_minimum_duration_passes() {
        let validator = ClipValidator::new(0.5, 30.0);
        // Exactly 0.5 s (8000 samples @ 16 kHz)
        let clip = make_clip(0.5, 0.2);
        assert!(validator.validate(&clip).is_ok());
    }

    #[test]
    fn error_display_is_informative() {
        let err = ClipError::TooShort {
            min_secs: 0.5,
            got_secs: 0.1,
        };
        let msg = err.to_string();
        assert!(msg.contains("0.10"), "message: {msg}");
        assert!(msg.contains("0.50"), "message: {msg}");
    }
}
