//! Amplitude bars for the recording animation.
//!
//! While the microphone is live the UI shows a small bar chart of the input
//! level; [`LevelBars::compute`] turns the latest audio into that chart.
//!
//! # Example
//!
//! ```rust
//! use voice_sentiment::audio::LevelBars;
//!
//! // Simulate 1 second of audio at 16 kHz
//! let audio: Vec<f32> = (0..16_000)
//!     .map(|i| (i as f32 * 0.001).sin() * 0.5)
//!     .collect();
//!
//! let level = LevelBars::compute(&audio, 20);
//! assert_eq!(level.bars.len(), 20);
//! for &bar in &level.bars {
//!     assert!(bar >= 0.0 && bar <= 1.0);
//! }
//! ```

// ---------------------------------------------------------------------------
// LevelBars
// ---------------------------------------------------------------------------

/// Amplitude snapshot for the recording-level bar chart.
///
/// Each element of `bars` is an RMS amplitude value in `[0.0, 1.0]`
/// representing an equal-width chunk of the input audio.
#[derive(Debug, Clone)]
pub struct LevelBars {
    /// RMS amplitude per bar, clamped to `[0.0, 1.0]`.
    pub bars: Vec<f32>,
}

impl LevelBars {
    /// Compute `num_bars` RMS amplitude values from `audio`.
    ///
    /// The audio is divided into `num_bars` equal-sized chunks; the RMS of
    /// each chunk becomes one bar value.  If `audio` is shorter than
    /// `num_bars` the remaining bars are padded with `0.0`.
    ///
    /// # Arguments
    ///
    /// * `audio` — 16 kHz mono `f32` samples.
    /// * `num_bars` — number of bars to produce.  If `0`, an empty
    ///   `LevelBars` is returned.
    pub fn compute(audio: &[f32], num_bars: usize) -> Self {
        if num_bars == 0 {
            return Self { bars: Vec::new() };
        }

        if audio.is_empty() {
            return Self {
                bars: vec![0.0; num_bars],
            };
        }

        let chunk_size = (audio.len() / num_bars).max(1);

        let mut bars: Vec<f32> = audio
            .chunks(chunk_size)
            .take(num_bars)
            .map(|chunk| {
                let mean_sq: f32 =
                    chunk.iter().map(|s| s * s).sum::<f32>() / chunk.len() as f32;
                mean_sq.sqrt().min(1.0) // clamp to [0.0, 1.0]
            })
            .collect();

        // Pad any remaining bars with 0.0
        bars.resize(num_bars, 0.0);

        Self { bars }
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns `true` when there are no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Peak bar value (useful for normalisation).
    pub fn peak(&self) -> f32 {
        self.bars.iter().cloned().fold(0.0_f32, f32::max)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_number_of_bars() {
        let audio = vec![0.3_f32; 16_000];
        let level = LevelBars::compute(&audio, 20);
        assert_eq!(level.bars.len(), 20);
    }

    #[test]
    fn bars_clamped_to_unit_range() {
        let audio = vec![1.0_f32; 1_600];
        let level = LevelBars::compute(&audio, 10);
        for &b in &level.bars {
            assert!(b >= 0.0 && b <= 1.0, "bar out of range: {b}");
        }
    }

    #[test]
    fn silent_audio_all_zero_bars() {
        let audio = vec![0.0_f32; 1_600];
        let level = LevelBars::compute(&audio, 10);
        for &b in &level.bars {
            assert_eq!(b, 0.0);
        }
    }

    #[test]
    fn empty_audio_returns_zero_bars() {
        let level = LevelBars::compute(&[], 10);
        assert_eq!(level.bars.len(), 10);
        for &b in &level.bars {
            assert_eq!(b, 0.0);
        }
    }

    #[test]
    fn zero_num_bars_returns_empty() {
        let audio = vec![0.5_f32; 1_000];
        let level = LevelBars::compute(&audio, 0);
        assert!(level.is_empty());
    }

    #[test]
    fn peak_reflects_max_bar() {
        let audio = vec![0.5_f32; 1_600]; // constant 0.5 → RMS = 0.5
        let level = LevelBars::compute(&audio, 10);
        let peak = level.peak();
        assert!((peak - 0.5).abs() < 1e-4, "peak = {peak}");
    }

    #[test]
    fn short_audio_padded_with_zeros() {
        let audio = vec![0.5_f32; 1];
        let level = LevelBars::compute(&audio, 10);
        assert_eq!(level.bars.len(), 10);
        assert!(level.bars.iter().skip(1).all(|&b| b == 0.0));
    }
}
