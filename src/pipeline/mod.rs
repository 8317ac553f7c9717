//! Pipeline orchestration.
//!
//! This module wires the voice path (audio → STT → text area) and the
//! analysis path (text → translation → sentiment → report) behind a single
//! command channel.
//!
//! # Architecture
//!
//! ```text
//! PipelineCommand (mpsc, from the UI)
//!        │
//!        ▼
//! PipelineOrchestrator::run()  ← async tokio task
//!        │
//!        ├─ StartRecording → clear shared buffer, open gate
//!        ├─ StopRecording  → validate → trim → spawn_blocking(transcribe)
//!        │                     └─▶ TranscriptionComplete
//!        └─ Analyze{text}  → input check → translate (async) → score
//!                              └─▶ AnalysisComplete { AnalysisReport }
//!
//! PipelineResult (mpsc) ──▶ polled by the egui update() loop each frame
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{
    new_shared_audio_buffer, AnalyzeError, PipelineCommand, PipelineOrchestrator, PipelineResult,
    SharedAudioBuffer,
};
pub use state::{AnalysisReport, PipelineState};
