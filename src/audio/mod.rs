//! Audio path for the voice input: microphone capture → resampling →
//! clip validation → silence trimming.
//!
//! ```text
//! Microphone → cpal callback → AudioChunk (mpsc) → downmix_to_mono
//!           → resample_to_16k → ClipValidator → SilenceTrimmer → Whisper
//! ```
//!
//! [`LevelBars`] feeds the recording animation in the UI; everything else
//! prepares a clip for [`crate::stt`].

pub mod capture;
pub mod level;
pub mod resample;
pub mod trim;
pub mod validate;

pub use capture::{AudioCapture, AudioChunk, CaptureError, StreamHandle};
pub use level::LevelBars;
pub use resample::{downmix_to_mono, resample_to_16k};
pub use trim::SilenceTrimmer;
pub use validate::{ClipError, ClipValidator};
