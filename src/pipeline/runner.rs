//! Pipeline orchestrator — drives the voice and analysis paths.
//!
//! [`PipelineOrchestrator`] runs inside the tokio runtime, receives
//! [`PipelineCommand`]s from the UI over an mpsc channel, and emits
//! [`PipelineResult`]s back.
//!
//! # Pipeline flow
//!
//! ```text
//! PipelineCommand::StartRecording
//!   └─▶ clear shared buffer, set recording flag
//!
//! PipelineCommand::StopRecording
//!   └─▶ drain buffer → ClipValidator → SilenceTrimmer
//!         └─▶ spawn_blocking(stt.transcribe)
//!               └─▶ TranscriptionComplete (pre-fills the text area)
//!
//! PipelineCommand::Analyze { text }
//!   └─▶ empty check ──▶ translator.translate (async, es→en)
//!         └─▶ model.score ──▶ classify ──▶ AnalysisComplete
//! ```
//!
//! Commands are processed strictly in sequence, which is what enforces the
//! "at most one analysis in flight" invariant.  On any failure an
//! [`AnalyzeError`] is rendered into a single user-facing message; no partial
//! results are emitted.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::audio::{ClipValidator, SilenceTrimmer};
use crate::pipeline::state::AnalysisReport;
use crate::sentiment::SentimentModel;
use crate::stt::SttEngine;
use crate::translate::Translator;

// ---------------------------------------------------------------------------
// Commands & results
// ---------------------------------------------------------------------------

/// Commands sent from the UI to the pipeline orchestrator.
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    /// Start capturing audio.
    StartRecording,
    /// Stop capturing audio and transcribe the clip.
    StopRecording,
    /// Run the translate → score pipeline on the submitted text.
    Analyze { text: String },
    /// Abort the current recording and return to idle.
    Cancel,
}

/// Results / progress events delivered from the pipeline to the UI.
#[derive(Debug, Clone)]
pub enum PipelineResult {
    /// The pipeline acknowledged the start-recording command.
    RecordingStarted,
    /// Recording has stopped; `duration_secs` is the captured length.
    RecordingStopped { duration_secs: f32 },
    /// Transcription completed; `text` pre-fills the input area.
    TranscriptionComplete { text: String },
    /// Translation completed; scoring is next.
    TranslationComplete { translated_text: String },
    /// The full analysis completed.
    AnalysisComplete { report: AnalysisReport },
    /// An input-level snapshot for the recording animation.
    LevelUpdate { bars: Vec<f32> },
    /// An error occurred at any pipeline stage.
    Error { message: String },
}

// ---------------------------------------------------------------------------
// AnalyzeError
// ---------------------------------------------------------------------------

/// Errors that can surface inside the pipeline.
///
/// All variants carry a human-readable description so the UI can display
/// them without knowing the internal cause.
#[derive(Debug)]
pub enum AnalyzeError {
    /// Empty or whitespace-only text was submitted.
    EmptyInput,
    /// Voice capture produced no usable clip, or transcription failed.
    VoiceCapture(String),
    /// The translation provider failed or rejected the request.
    Translation(String),
    /// The sentiment model failed.
    Scoring(String),
    /// Internal / unexpected error (e.g. tokio join failure).
    Internal(String),
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeError::EmptyInput => {
                write!(f, "Please type some text or use the microphone first")
            }
            AnalyzeError::VoiceCapture(msg) => write!(f, "Voice capture failed: {msg}"),
            AnalyzeError::Translation(msg) => write!(f, "Translation failed: {msg}"),
            AnalyzeError::Scoring(msg) => write!(f, "Sentiment scoring failed: {msg}"),
            AnalyzeError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SharedAudioBuffer
// ---------------------------------------------------------------------------

/// Thread-shared buffer that accumulates 16 kHz mono samples while recording
/// is active.  The audio feeder thread pushes; the orchestrator drains on
/// `StopRecording`.  The bool is the recording gate.
pub type SharedAudioBuffer = Arc<Mutex<(Vec<f32>, bool)>>;
//                                      ^^^^^^^  ^^^^
//                                      samples  is_recording

/// Construct an empty, non-recording [`SharedAudioBuffer`].
pub fn new_shared_audio_buffer() -> SharedAudioBuffer {
    Arc::new(Mutex::new((Vec::new(), false)))
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives both the voice path and the analysis path.
///
/// Create with [`PipelineOrchestrator::new`], then spawn
/// [`run`](Self::run) as a tokio task from `main()`.
pub struct PipelineOrchestrator {
    audio_buf: SharedAudioBuffer,
    stt: Arc<dyn SttEngine>,
    translator: Arc<dyn Translator>,
    model: Arc<dyn SentimentModel>,
    validator: ClipValidator,
    trimmer: SilenceTrimmer,
    result_tx: mpsc::Sender<PipelineResult>,
}

impl PipelineOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `audio_buf`  — sample buffer filled by the audio feeder thread.
    /// * `stt`        — STT engine (e.g. `WhisperEngine`).
    /// * `translator` — translation backend (e.g. `RetryTranslator<ApiTranslator>`).
    /// * `model`      — sentiment scorer (e.g. `VaderModel`).
    /// * `validator` / `trimmer` — pre-transcription clip processing.
    /// * `result_tx`  — channel the UI reads results from.
    pub fn new(
        audio_buf: SharedAudioBuffer,
        stt: Arc<dyn SttEngine>,
        translator: Arc<dyn Translator>,
        model: Arc<dyn SentimentModel>,
        validator: ClipValidator,
        trimmer: SilenceTrimmer,
        result_tx: mpsc::Sender<PipelineResult>,
    ) -> Self {
        Self {
            audio_buf,
            stt,
            translator,
            model,
            validator,
            trimmer,
            result_tx,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until `command_rx` is closed.
    ///
    /// Commands are handled one at a time — a second Analyze cannot start
    /// while the first is still running.
    pub async fn run(self, mut command_rx: mpsc::Receiver<PipelineCommand>) {
        while let Some(cmd) = command_rx.recv().await {
            match cmd {
                PipelineCommand::StartRecording => {
                    self.handle_start_recording().await;
                }
                PipelineCommand::StopRecording => {
                    self.handle_stop_recording().await;
                }
                PipelineCommand::Analyze { text } => {
                    self.handle_analyze(text).await;
                }
                PipelineCommand::Cancel => {
                    let mut buf = self.audio_buf.lock().unwrap();
                    buf.1 = false;
                    buf.0.clear();
                }
            }
        }

        log::info!("pipeline: command channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Voice path
    // -----------------------------------------------------------------------

    /// Clear any leftover audio and open the recording gate.
    async fn handle_start_recording(&self) {
        log::debug!("pipeline: StartRecording");
        {
            let mut buf = self.audio_buf.lock().unwrap();
            buf.0.clear();
            buf.1 = true;
        }
        let _ = self.result_tx.send(PipelineResult::RecordingStarted).await;
    }

    /// Close the gate, drain the clip, validate, trim, and transcribe.
    async fn handle_stop_recording(&self) {
        log::debug!("pipeline: StopRecording → draining clip");

        let clip: Vec<f32> = {
            let mut buf = self.audio_buf.lock().unwrap();
            buf.1 = false;
            std::mem::take(&mut buf.0)
        };

        let duration_secs = clip.len() as f32 / 16_000.0;
        let _ = self
            .result_tx
            .send(PipelineResult::RecordingStopped { duration_secs })
            .await;

        // ── 1. Clip validation ───────────────────────────────────────────
        if let Err(e) = self.validator.validate(&clip) {
            self.send_error(AnalyzeError::VoiceCapture(e.to_string())).await;
            return;
        }

        // ── 2. Silence trim ──────────────────────────────────────────────
        let trimmed = self.trimmer.trim(&clip).to_vec();
        if trimmed.is_empty() {
            self.send_error(AnalyzeError::VoiceCapture(
                "no speech detected in the recording".into(),
            ))
            .await;
            return;
        }

        // ── 3. STT (blocking → thread pool) ──────────────────────────────
        let stt = Arc::clone(&self.stt);
        let stt_result = tokio::task::spawn_blocking(move || stt.transcribe(&trimmed)).await;

        let text = match stt_result {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                self.send_error(AnalyzeError::VoiceCapture(e.to_string())).await;
                return;
            }
            Err(e) => {
                self.send_error(AnalyzeError::Internal(e.to_string())).await;
                return;
            }
        };

        log::debug!("pipeline: transcript = {text:?}");
        let _ = self
            .result_tx
            .send(PipelineResult::TranscriptionComplete { text })
            .await;
    }

    // -----------------------------------------------------------------------
    // Analysis path
    // -----------------------------------------------------------------------

    /// Validate input, translate, score, classify.
    ///
    /// On any failure no partial results are emitted — the UI only ever sees
    /// either a complete [`AnalysisReport`] or an error message.
    async fn handle_analyze(&self, text: String) {
        let source_text = text.trim().to_string();

        // ── 1. Input check — nothing downstream runs for empty input ─────
        if source_text.is_empty() {
            self.send_error(AnalyzeError::EmptyInput).await;
            return;
        }

        // ── 2. Translation (es → en) ─────────────────────────────────────
        let translated_text = match self.translator.translate(&source_text).await {
            Ok(t) => t,
            Err(e) => {
                self.send_error(AnalyzeError::Translation(e.to_string())).await;
                return;
            }
        };

        log::debug!("pipeline: translated = {translated_text:?}");
        let _ = self
            .result_tx
            .send(PipelineResult::TranslationComplete {
                translated_text: translated_text.clone(),
            })
            .await;

        // ── 3. Sentiment scoring ─────────────────────────────────────────
        let sentiment = match self.model.score(&translated_text) {
            Ok(s) => s,
            Err(e) => {
                self.send_error(AnalyzeError::Scoring(e.to_string())).await;
                return;
            }
        };

        log::debug!(
            "pipeline: polarity = {:.2}, subjectivity = {:.2}",
            sentiment.polarity,
            sentiment.subjectivity
        );

        // ── 4. Deliver the completed report ──────────────────────────────
        let report = AnalysisReport {
            source_text,
            translated_text,
            sentiment,
        };
        let _ = self
            .result_tx
            .send(PipelineResult::AnalysisComplete { report })
            .await;
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn send_error(&self, error: AnalyzeError) {
        let message = error.to_string();
        log::error!("pipeline error: {message}");
        let _ = self.result_tx.send(PipelineResult::Error { message }).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::sentiment::{MockSentimentModel, ScoreError, Sentiment};
    use crate::stt::{MockSttEngine, SttError};
    use crate::translate::TranslateError;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Translator that succeeds with a fixed string and counts calls.
    struct OkTranslator {
        response: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Translator for OkTranslator {
        async fn translate(&self, _text: &str) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    /// Translator that always fails and counts calls.
    struct FailTranslator {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Translator for FailTranslator {
        async fn translate(&self, _text: &str) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TranslateError::Request("connection refused".into()))
        }
    }

    /// Scorer wrapper that counts calls.
    struct CountingModel {
        inner: MockSentimentModel,
        calls: Arc<AtomicUsize>,
    }

    impl SentimentModel for CountingModel {
        fn score(&self, text: &str) -> Result<Sentiment, ScoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.score(text)
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    struct Harness {
        result_rx: mpsc::Receiver<PipelineResult>,
        audio_buf: SharedAudioBuffer,
        translator_calls: Arc<AtomicUsize>,
        scorer_calls: Arc<AtomicUsize>,
    }

    fn make_harness(
        stt: Arc<dyn SttEngine>,
        translator_ok: bool,
        scorer: MockSentimentModel,
    ) -> (PipelineOrchestrator, Harness) {
        let (result_tx, result_rx) = mpsc::channel(32);

        let translator_calls = Arc::new(AtomicUsize::new(0));
        let translator: Arc<dyn Translator> = if translator_ok {
            Arc::new(OkTranslator {
                response: "I love this day".into(),
                calls: Arc::clone(&translator_calls),
            })
        } else {
            Arc::new(FailTranslator {
                calls: Arc::clone(&translator_calls),
            })
        };

        let scorer_calls = Arc::new(AtomicUsize::new(0));
        let model: Arc<dyn SentimentModel> = Arc::new(CountingModel {
            inner: scorer,
            calls: Arc::clone(&scorer_calls),
        });

        let audio_buf = new_shared_audio_buffer();

        let orchestrator = PipelineOrchestrator::new(
            Arc::clone(&audio_buf),
            stt,
            translator,
            model,
            ClipValidator::default(),
            SilenceTrimmer::new(0.01),
            result_tx,
        );

        let harness = Harness {
            result_rx,
            audio_buf,
            translator_calls,
            scorer_calls,
        };
        (orchestrator, harness)
    }

    /// Send `commands`, close the channel, run to completion, drain results.
    async fn run_commands(
        orchestrator: PipelineOrchestrator,
        harness: &mut Harness,
        commands: Vec<PipelineCommand>,
    ) -> Vec<PipelineResult> {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        for cmd in commands {
            cmd_tx.send(cmd).await.unwrap();
        }
        drop(cmd_tx); // close channel so run() returns

        orchestrator.run(cmd_rx).await;

        let mut out = Vec::new();
        while let Ok(result) = harness.result_rx.try_recv() {
            out.push(result);
        }
        out
    }

    fn last_error_message(results: &[PipelineResult]) -> Option<String> {
        results.iter().rev().find_map(|r| match r {
            PipelineResult::Error { message } => Some(message.clone()),
            _ => None,
        })
    }

    /// 1 second of audible signal at 16 kHz — passes clip validation.
    fn one_second_of_speech() -> Vec<f32> {
        vec![0.3f32; 16_000]
    }

    // -----------------------------------------------------------------------
    // Analysis path
    // -----------------------------------------------------------------------

    /// Empty input must short-circuit: no translator call, no scorer call.
    #[tokio::test]
    async fn empty_input_emits_input_error_without_downstream_calls() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::ok("unused")),
            true,
            MockSentimentModel::ok(0.5, 0.5),
        );

        let results = run_commands(orc, &mut h, vec![PipelineCommand::Analyze { text: "   ".into() }])
            .await;

        let msg = last_error_message(&results).expect("expected an error result");
        assert!(msg.contains("type some text"), "message: {msg}");
        assert_eq!(h.translator_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.scorer_calls.load(Ordering::SeqCst), 0);
    }

    /// Happy path: translation then scoring then a complete report.
    #[tokio::test]
    async fn analyze_produces_complete_report() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::ok("unused")),
            true,
            MockSentimentModel::ok(0.6, 0.8),
        );

        let results = run_commands(
            orc,
            &mut h,
            vec![PipelineCommand::Analyze {
                text: "Me encanta este día".into(),
            }],
        )
        .await;

        let report = results
            .iter()
            .find_map(|r| match r {
                PipelineResult::AnalysisComplete { report } => Some(report.clone()),
                _ => None,
            })
            .expect("expected a completed report");

        assert_eq!(report.source_text, "Me encanta este día");
        assert_eq!(report.translated_text, "I love this day");
        assert_eq!(report.sentiment.polarity, 0.6);
        assert_eq!(
            report.polarity_label(),
            crate::sentiment::PolarityLabel::VeryPositive
        );
        assert_eq!(h.translator_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.scorer_calls.load(Ordering::SeqCst), 1);

        // Translation progress event precedes the report.
        assert!(results.iter().any(|r| matches!(
            r,
            PipelineResult::TranslationComplete { translated_text } if translated_text == "I love this day"
        )));
    }

    /// A translator failure must not invoke the scorer and must surface as a
    /// pipeline error with no partial results.
    #[tokio::test]
    async fn translator_failure_skips_scoring() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::ok("unused")),
            false,
            MockSentimentModel::ok(0.5, 0.5),
        );

        let results = run_commands(
            orc,
            &mut h,
            vec![PipelineCommand::Analyze {
                text: "Odio este lugar".into(),
            }],
        )
        .await;

        let msg = last_error_message(&results).expect("expected an error result");
        assert!(msg.contains("Translation failed"), "message: {msg}");
        assert_eq!(h.scorer_calls.load(Ordering::SeqCst), 0);
        assert!(!results
            .iter()
            .any(|r| matches!(r, PipelineResult::AnalysisComplete { .. })));
        assert!(!results
            .iter()
            .any(|r| matches!(r, PipelineResult::TranslationComplete { .. })));
    }

    /// A scoring failure surfaces as a pipeline error with no report.
    #[tokio::test]
    async fn scoring_failure_emits_error() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::ok("unused")),
            true,
            MockSentimentModel::err(ScoreError::Model("lexicon unavailable".into())),
        );

        let results = run_commands(
            orc,
            &mut h,
            vec![PipelineCommand::Analyze {
                text: "El cielo es azul".into(),
            }],
        )
        .await;

        let msg = last_error_message(&results).expect("expected an error result");
        assert!(msg.contains("scoring failed"), "message: {msg}");
        assert!(!results
            .iter()
            .any(|r| matches!(r, PipelineResult::AnalysisComplete { .. })));
    }

    // -----------------------------------------------------------------------
    // Voice path
    // -----------------------------------------------------------------------

    /// Start + stop with speech in the buffer produces a transcript.
    #[tokio::test]
    async fn recording_produces_transcript() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::ok("Me encanta este día")),
            true,
            MockSentimentModel::ok(0.5, 0.5),
        );

        h.audio_buf.lock().unwrap().0 = one_second_of_speech();

        let results = run_commands(orc, &mut h, vec![PipelineCommand::StopRecording]).await;

        assert!(results.iter().any(|r| matches!(
            r,
            PipelineResult::TranscriptionComplete { text } if text == "Me encanta este día"
        )));
        // Transcription alone must not trigger translation or scoring.
        assert_eq!(h.translator_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.scorer_calls.load(Ordering::SeqCst), 0);
    }

    /// StartRecording opens the gate and clears stale samples.
    #[tokio::test]
    async fn start_recording_clears_buffer_and_sets_gate() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::ok("unused")),
            true,
            MockSentimentModel::ok(0.5, 0.5),
        );

        h.audio_buf.lock().unwrap().0 = vec![0.5; 100];
        let audio_buf = Arc::clone(&h.audio_buf);

        let results = run_commands(orc, &mut h, vec![PipelineCommand::StartRecording]).await;

        assert!(results
            .iter()
            .any(|r| matches!(r, PipelineResult::RecordingStarted)));
        let buf = audio_buf.lock().unwrap();
        assert!(buf.0.is_empty());
        assert!(buf.1, "recording gate should be open");
    }

    /// A silent clip is rejected as "no speech" and never reaches Whisper.
    #[tokio::test]
    async fn silent_clip_reports_no_speech() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::err(SttError::Transcription(
                "should not be called".into(),
            ))),
            true,
            MockSentimentModel::ok(0.5, 0.5),
        );

        h.audio_buf.lock().unwrap().0 = vec![0.0f32; 16_000];

        let results = run_commands(orc, &mut h, vec![PipelineCommand::StopRecording]).await;

        let msg = last_error_message(&results).expect("expected an error result");
        assert!(msg.contains("Voice capture failed"), "message: {msg}");
        assert!(msg.contains("no speech"), "message: {msg}");
    }

    /// A too-short clip is rejected before transcription.
    #[tokio::test]
    async fn short_clip_reports_voice_capture_error() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::ok("unused")),
            true,
            MockSentimentModel::ok(0.5, 0.5),
        );

        h.audio_buf.lock().unwrap().0 = vec![0.3f32; 1_000]; // ~0.06 s

        let results = run_commands(orc, &mut h, vec![PipelineCommand::StopRecording]).await;

        let msg = last_error_message(&results).expect("expected an error result");
        assert!(msg.contains("too short"), "message: {msg}");
    }

    /// A Whisper failure surfaces as a voice-capture error.
    #[tokio::test]
    async fn stt_failure_reports_voice_capture_error() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::err(SttError::Transcription("boom".into()))),
            true,
            MockSentimentModel::ok(0.5, 0.5),
        );

        h.audio_buf.lock().unwrap().0 = one_second_of_speech();

        let results = run_commands(orc, &mut h, vec![PipelineCommand::StopRecording]).await;

        let msg = last_error_message(&results).expect("expected an error result");
        assert!(msg.contains("Voice capture failed"), "message: {msg}");
    }

    /// Cancel closes the gate and discards buffered samples.
    #[tokio::test]
    async fn cancel_discards_recording() {
        let (orc, mut h) = make_harness(
            Arc::new(MockSttEngine::ok("unused")),
            true,
            MockSentimentModel::ok(0.5, 0.5),
        );

        {
            let mut buf = h.audio_buf.lock().unwrap();
            buf.0 = vec![0.5; 100];
            buf.1 = true;
        }
        let audio_buf = Arc::clone(&h.audio_buf);

        let _ = run_commands(orc, &mut h, vec![PipelineCommand::Cancel]).await;

        let buf = audio_buf.lock().unwrap();
        assert!(buf.0.is_empty());
        assert!(!buf.1, "recording gate should be closed");
    }
}
