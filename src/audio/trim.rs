//! Energy-based silence trimming.
//!
//! [`SilenceTrimmer`] removes leading and trailing silence from a 16 kHz mono
//! clip before it is sent to the STT engine.  Trimming:
//!
//! * reduces Whisper processing time, and
//! * prevents Whisper from hallucinating text during quiet periods.
//!
//! A fully-silent clip trims to an empty slice, which the pipeline reports as
//! "no speech detected".
//!
//! ## Algorithm
//!
//! Audio is split into 30 ms frames (480 samples @ 16 kHz).  A frame counts
//! as speech when its RMS amplitude exceeds the configured threshold.  The
//! output slice spans the first through the last speech frame.

// ---------------------------------------------------------------------------
// SilenceTrimmer
// ---------------------------------------------------------------------------

/// Energy-based silence trimmer.
///
/// # Example
///
/// ```rust
/// use voice_sentiment::audio::SilenceTrimmer;
///
/// // 0.01 RMS threshold — typical for a quiet room
/// let trimmer = SilenceTrimmer::new(0.01);
///
/// // 480 silent samples, then 480 loud samples, then 480 silent
/// let mut clip = vec![0.0_f32; 480];
/// clip.extend(vec![0.5_f32; 480]);
/// clip.extend(vec![0.0_f32; 480]);
///
/// let trimmed = trimmer.trim(&clip);
/// assert_eq!(trimmed.len(), 480); // only the loud middle section
/// ```
pub struct SilenceTrimmer {
    /// RMS amplitude threshold; frames below this are considered silence.
    rms_threshold: f32,
    /// Frame size in samples.  Default: 480 samples = 30 ms at 16 kHz.
    frame_size: usize,
}

impl SilenceTrimmer {
    /// Create a [`SilenceTrimmer`] with the given RMS threshold.
    ///
    /// `rms_threshold` should be in `[0.0, 1.0]`.  A typical value is
    /// `0.01` for quiet microphones; use `0.02`–`0.05` in noisy environments.
    pub fn new(rms_threshold: f32) -> Self {
        Self {
            rms_threshold,
            frame_size: 480, // 30 ms at 16 kHz
        }
    }

    /// Create a [`SilenceTrimmer`] with a custom frame size.
    ///
    /// Useful for sample rates other than 16 kHz.  Prefer
    /// [`SilenceTrimmer::new`] for standard 16 kHz audio.
    pub fn with_frame_size(rms_threshold: f32, frame_size: usize) -> Self {
        assert!(frame_size > 0, "frame_size must be > 0");
        Self {
            rms_threshold,
            frame_size,
        }
    }

    /// RMS threshold currently in use.
    pub fn threshold(&self) -> f32 {
        self.rms_threshold
    }

    /// Returns `true` when the frame contains speech energy.
    fn is_speech_frame(&self, frame: &[f32]) -> bool {
        if frame.is_empty() {
            return false;
        }
        let mean_sq: f32 = frame.iter().map(|s| s * s).sum::<f32>() / frame.len() as f32;
        mean_sq.sqrt() > self.rms_threshold
    }

    /// Trim leading and trailing silence from `clip`.
    ///
    /// Returns a sub-slice of the original buffer — no allocation.
    /// If the entire signal is silent, a zero-length slice is returned.
    ///
    /// # Arguments
    ///
    /// * `clip` — 16 kHz mono `f32` samples (pre-processed with
    ///   [`crate::audio::resample_to_16k`] and
    ///   [`crate::audio::downmix_to_mono`]).
    pub fn trim<'a>(&self, clip: &'a [f32]) -> &'a [f32] {
        if clip.is_empty() {
            return clip;
        }

        let frame_size = self.frame_size;
        let total_frames = (clip.len() + frame_size - 1) / frame_size;

        // First speech frame (left trim boundary)
        let start_frame = match (0..total_frames).find(|&i| {
            let s = i * frame_size;
            let e = ((i + 1) * frame_size).min(clip.len());
            self.is_speech_frame(&clip[s..e])
        }) {
            Some(f) => f,
            None => return &clip[0..0], // entire signal is silence
        };

        // Last speech frame (right trim boundary)
        let end_frame = (0..total_frames)
            .rfind(|&i| {
                let s = i * frame_size;
                let e = ((i + 1) * frame_size).min(clip.len());
                self.is_speech_frame(&clip[s..e])
            })
            .unwrap_or(start_frame);

        let start = start_frame * frame_size;
        let end = ((end_frame + 1) * frame_size).min(clip.len());

        &clip[start..end]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
