//! Spanish voice/text sentiment analyzer.
//!
//! # Pipeline
//!
//! ```text
//! Microphone → cpal → resample → quality check → VAD trim → Whisper (es)
//!                                                              │
//!                                          pre-fills the text area
//!                                                              │
//! Analyze ─▶ Translator (es→en, HTTP) ─▶ SentimentModel ─▶ classify ─▶ UI
//! ```
//!
//! The UI (egui) and the pipeline orchestrator (tokio task) communicate over
//! bounded mpsc channels; see [`pipeline::PipelineOrchestrator`].

pub mod app;
pub mod audio;
pub mod config;
pub mod pipeline;
pub mod sentiment;
pub mod stt;
pub mod translate;
