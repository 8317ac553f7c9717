//! Sentiment analyzer window — egui/eframe application.
//!
//! # Architecture
//!
//! [`SentimentApp`] is the top-level [`eframe::App`] that owns the UI state
//! and two channel endpoints:
//!
//! * `command_tx` — sends [`PipelineCommand`] to the pipeline orchestrator.
//! * `result_rx`  — receives [`PipelineResult`] from the orchestrator.
//!
//! The window is a single page: a voice-capture control, a multi-line text
//! area pre-filled with the default string or the last transcription, an
//! Analyze button, and a results area with one colored bar per score.
//!
//! # Page states
//!
//! | State | Results area |
//! |-------|--------------|
//! | `Idle` | hint text |
//! | `Recording` | level bars + elapsed timer — red indicator |
//! | `Transcribing` | spinner + "Transcribing…" |
//! | `Translating` | spinner + "Translating…" |
//! | `Scoring` | translation + spinner |
//! | `Result` | polarity / subjectivity bars + interpretation |
//! | `Error` | message — orange, with a dismiss button |

use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::pipeline::{
    AnalysisReport, PipelineCommand, PipelineResult, PipelineState,
};
use crate::sentiment::{polarity_fill, PolarityLabel, SubjectivityLabel};

// ---------------------------------------------------------------------------
// SentimentApp
// ---------------------------------------------------------------------------

/// eframe application — the analyzer page.
pub struct SentimentApp {
    // ── Pipeline state ───────────────────────────────────────────────────
    /// Current logical state of the processing pipeline.
    pub pipeline_state: PipelineState,
    /// The input area contents — also the "last recognized text" slot,
    /// overwritten by each successful transcription.
    pub input_text: String,
    /// Translation shown while the scorer runs and in the results panel.
    pub translated_text: Option<String>,
    /// The completed report, shown in the Result state.
    pub report: Option<AnalysisReport>,
    /// Human-readable error message for the Error state.
    pub error_message: Option<String>,

    // ── Timing ───────────────────────────────────────────────────────────
    /// When the current recording started (elapsed-time display and the
    /// automatic stop at `audio.max_recording_secs`).
    recording_start: Option<Instant>,

    // ── Recording animation ──────────────────────────────────────────────
    /// Amplitude bars for the level display during recording.
    level_bars: Vec<f32>,
    /// Spinner animation phase (increases each frame).
    spinner_phase: f32,

    // ── Channels ─────────────────────────────────────────────────────────
    /// Send commands to the background pipeline orchestrator.
    pub command_tx: mpsc::Sender<PipelineCommand>,
    /// Receive results / progress from the background pipeline orchestrator.
    pub result_rx: mpsc::Receiver<PipelineResult>,

    // ── Configuration ────────────────────────────────────────────────────
    /// Application configuration (read-only after startup).
    pub config: AppConfig,
}

impl SentimentApp {
    /// Create a new [`SentimentApp`].
    ///
    /// The text area starts out holding `config.ui.default_text`.
    pub fn new(
        command_tx: mpsc::Sender<PipelineCommand>,
        result_rx: mpsc::Receiver<PipelineResult>,
        config: AppConfig,
    ) -> Self {
        Self {
            pipeline_state: PipelineState::Idle,
            input_text: config.ui.default_text.clone(),
            translated_text: None,
            report: None,
            error_message: None,
            recording_start: None,
            level_bars: vec![0.0; 30],
            spinner_phase: 0.0,
            command_tx,
            result_rx,
            config,
        }
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending pipeline results (non-blocking).
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                PipelineResult::RecordingStarted => {
                    // State was already set on button click; confirmation only.
                }
                PipelineResult::RecordingStopped { duration_secs } => {
                    log::debug!("recording stopped after {duration_secs:.1}s");
                    self.pipeline_state = PipelineState::Transcribing;
                }
                PipelineResult::LevelUpdate { bars } => {
                    self.level_bars = bars;
                }
                PipelineResult::TranscriptionComplete { text } => {
                    // Pre-fill the input area; the user may edit before Analyze.
                    self.input_text = text;
                    self.recording_start = None;
                    self.pipeline_state = PipelineState::Idle;
                }
                PipelineResult::TranslationComplete { translated_text } => {
                    self.translated_text = Some(translated_text);
                    self.pipeline_state = PipelineState::Scoring;
                }
                PipelineResult::AnalysisComplete { report } => {
                    self.translated_text = Some(report.translated_text.clone());
                    self.report = Some(report);
                    self.pipeline_state = PipelineState::Result;
                }
                PipelineResult::Error { message } => {
                    self.error_message = Some(message);
                    self.recording_start = None;
                    self.pipeline_state = PipelineState::Error;
                }
            }
        }
    }

    /// Stop recording automatically at `audio.max_recording_secs`.
    fn check_recording_limit(&mut self) {
        if self.pipeline_state != PipelineState::Recording {
            return;
        }
        let limit = Duration::from_secs_f32(self.config.audio.max_recording_secs);
        if self.recording_start.is_some_and(|t| t.elapsed() >= limit) {
            log::info!("recording limit reached, stopping automatically");
            self.stop_recording();
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────

    fn start_recording(&mut self) {
        self.error_message = None;
        self.report = None;
        self.translated_text = None;
        self.level_bars = vec![0.0; 30];
        self.recording_start = Some(Instant::now());
        self.pipeline_state = PipelineState::Recording;
        let _ = self.command_tx.try_send(PipelineCommand::StartRecording);
    }

    fn stop_recording(&mut self) {
        self.pipeline_state = PipelineState::Transcribing;
        let _ = self.command_tx.try_send(PipelineCommand::StopRecording);
    }

    fn start_analysis(&mut self) {
        self.error_message = None;
        self.report = None;
        self.translated_text = None;
        self.pipeline_state = PipelineState::Translating;
        let _ = self.command_tx.try_send(PipelineCommand::Analyze {
            text: self.input_text.clone(),
        });
    }

    /// Reset transient state and return to Idle.  The input text stays — it
    /// is session state, not result state.
    fn reset_to_idle(&mut self) {
        self.pipeline_state = PipelineState::Idle;
        self.translated_text = None;
        self.report = None;
        self.error_message = None;
        self.recording_start = None;
        self.level_bars = vec![0.0; 30];
    }

    // ── Section renderers ────────────────────────────────────────────────

    /// Voice section: record / stop button, and the live level display.
    fn draw_voice_section(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("Voice input")
                    .color(egui::Color32::from_rgb(180, 180, 180))
                    .size(13.0),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.pipeline_state == PipelineState::Recording {
                    if ui
                        .add(egui::Button::new(
                            egui::RichText::new("■ Stop")
                                .color(egui::Color32::from_rgb(255, 80, 80)),
                        ))
                        .clicked()
                    {
                        self.stop_recording();
                    }
                } else {
                    let can_record = !self.pipeline_state.is_busy();
                    if ui
                        .add_enabled(can_record, egui::Button::new("● Record"))
                        .clicked()
                    {
                        self.start_recording();
                    }
                }
            });
        });

        if self.pipeline_state == PipelineState::Recording {
            let elapsed = self
                .recording_start
                .map(|t| t.elapsed().as_secs_f32())
                .unwrap_or(0.0);

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Listening — speak in Spanish")
                        .color(egui::Color32::from_rgb(255, 80, 80))
                        .size(12.0),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{:.1}s / {:.0}s",
                            elapsed, self.config.audio.max_recording_secs
                        ))
                        .color(egui::Color32::from_rgb(255, 140, 140))
                        .size(12.0),
                    );
                });
            });
            ui.add_space(4.0);
            self.draw_level_bars(ui);
        }
    }

    /// Text section: the editable input area.
    fn draw_text_section(&mut self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new("Spanish text")
                .color(egui::Color32::from_rgb(180, 180, 180))
                .size(13.0),
        );
        ui.add_space(2.0);
        ui.add(
            egui::TextEdit::multiline(&mut self.input_text)
                .desired_rows(4)
                .desired_width(f32::INFINITY)
                .hint_text("Escribe o pega tu texto aquí…"),
        );
    }

    /// The Analyze button row.
    fn draw_analyze_button(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let enabled = !self.pipeline_state.is_busy();
            if ui
                .add_enabled(
                    enabled,
                    egui::Button::new(egui::RichText::new("Analyze sentiment").size(14.0))
                        .min_size(egui::vec2(180.0, 28.0)),
                )
                .clicked()
            {
                self.start_analysis();
            }
        });
    }

    /// Results area, rendered according to the current state.
    fn draw_results_section(&mut self, ui: &mut egui::Ui) {
        match self.pipeline_state.clone() {
            PipelineState::Idle => {
                ui.add_space(6.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("Record or type Spanish text, then press Analyze")
                            .color(egui::Color32::from_rgb(120, 120, 120))
                            .size(12.0),
                    );
                });
            }
            PipelineState::Recording => {
                // The voice section already shows the live display.
            }
            PipelineState::Transcribing => {
                self.draw_spinner_line(ui, "Transcribing…");
            }
            PipelineState::Translating => {
                self.draw_spinner_line(ui, "Translating…");
            }
            PipelineState::Scoring => {
                if let Some(ref translated) = self.translated_text {
                    ui.label(
                        egui::RichText::new(translated.as_str())
                            .color(egui::Color32::from_rgb(130, 130, 130))
                            .italics()
                            .size(12.0),
                    );
                    ui.add_space(2.0);
                }
                self.draw_spinner_line(ui, "Scoring sentiment…");
            }
            PipelineState::Result => {
                if let Some(report) = self.report.clone() {
                    self.draw_report(ui, &report);
                }
            }
            PipelineState::Error => {
                self.draw_error(ui);
            }
        }
    }

    /// Render a completed [`AnalysisReport`].
    fn draw_report(&mut self, ui: &mut egui::Ui, report: &AnalysisReport) {
        if self.config.ui.show_translation {
            ui.label(
                egui::RichText::new(format!("“{}”", report.translated_text))
                    .color(egui::Color32::from_rgb(150, 150, 150))
                    .italics()
                    .size(12.0),
            );
            ui.add_space(6.0);
        }

        let polarity = report.sentiment.polarity;
        let p_label = report.polarity_label();
        ui.label(
            egui::RichText::new("Polarity")
                .color(egui::Color32::from_rgb(180, 180, 180))
                .size(12.0),
        );
        ui.add(
            egui::ProgressBar::new(polarity_fill(polarity))
                .fill(polarity_color(p_label))
                .text(
                    egui::RichText::new(format!("{} ({polarity:+.2})", p_label.label()))
                        .size(12.0),
                ),
        );

        ui.add_space(6.0);

        let subjectivity = report.sentiment.subjectivity;
        let s_label = report.subjectivity_label();
        ui.label(
            egui::RichText::new("Subjectivity")
                .color(egui::Color32::from_rgb(180, 180, 180))
                .size(12.0),
        );
        ui.add(
            egui::ProgressBar::new(subjectivity)
                .fill(subjectivity_color(s_label))
                .text(
                    egui::RichText::new(format!("{} ({subjectivity:.2})", s_label.label()))
                        .size(12.0),
                ),
        );

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(p_label.interpretation())
                .color(egui::Color32::from_rgb(160, 160, 160))
                .size(12.0),
        );
    }

    /// Render the Error state panel: message + dismiss button.
    fn draw_error(&mut self, ui: &mut egui::Ui) {
        let msg = self
            .error_message
            .clone()
            .unwrap_or_else(|| "Unknown error".into());

        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(msg.as_str())
                .color(egui::Color32::from_rgb(255, 136, 68))
                .size(12.0),
        );

        ui.add_space(4.0);
        if ui
            .add(egui::Button::new(egui::RichText::new("Dismiss").size(11.0)))
            .clicked()
        {
            let _ = self.command_tx.try_send(PipelineCommand::Cancel);
            self.reset_to_idle();
        }
    }

    // ── Small helpers ────────────────────────────────────────────────────

    /// Spinner + label line used by the busy states.
    fn draw_spinner_line(&self, ui: &mut egui::Ui, label: &str) {
        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(format!("{} {label}", self.spinner_char()))
                    .color(egui::Color32::from_rgb(68, 136, 255))
                    .size(13.0),
            );
        });
    }

    /// Draw the amplitude bar chart used in the Recording state.
    fn draw_level_bars(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 28.0),
            egui::Sense::hover(),
        );

        let painter = ui.painter();
        let num_bars = self.level_bars.len().max(1);
        let bar_width = rect.width() / num_bars as f32;

        for (i, &amplitude) in self.level_bars.iter().enumerate() {
            let x = rect.left() + i as f32 * bar_width;
            let bar_height = (amplitude * rect.height()).max(2.0);
            let center_y = rect.center().y;

            painter.rect_filled(
                egui::Rect::from_center_size(
                    egui::pos2(x + bar_width / 2.0, center_y),
                    egui::vec2((bar_width * 0.65).max(1.0), bar_height),
                ),
                1.0,
                egui::Color32::from_rgb(255, 100, 100),
            );
        }
    }

    /// A simple rotating ASCII spinner character driven by `spinner_phase`.
    fn spinner_char(&self) -> char {
        let chars = ['|', '/', '-', '\\'];
        let idx = (self.spinner_phase as usize) % chars.len();
        chars[idx]
    }

    /// Accent colour for the status label.
    fn state_color(&self) -> egui::Color32 {
        match &self.pipeline_state {
            PipelineState::Idle => egui::Color32::from_rgb(100, 100, 100),
            PipelineState::Recording => egui::Color32::from_rgb(255, 68, 68),
            PipelineState::Transcribing
            | PipelineState::Translating
            | PipelineState::Scoring => egui::Color32::from_rgb(68, 136, 255),
            PipelineState::Result => egui::Color32::from_rgb(80, 200, 120),
            PipelineState::Error => egui::Color32::from_rgb(255, 136, 68),
        }
    }
}

// ---------------------------------------------------------------------------
// Label colors
// ---------------------------------------------------------------------------

/// Bar colour for a polarity tier.
fn polarity_color(label: PolarityLabel) -> egui::Color32 {
    match label {
        PolarityLabel::VeryPositive => egui::Color32::from_rgb(0, 160, 80),
        PolarityLabel::Positive => egui::Color32::from_rgb(120, 200, 120),
        PolarityLabel::Neutral => egui::Color32::from_rgb(140, 140, 140),
        PolarityLabel::Negative => egui::Color32::from_rgb(240, 140, 60),
        PolarityLabel::VeryNegative => egui::Color32::from_rgb(220, 60, 60),
    }
}

/// Bar colour for a subjectivity tier.
fn subjectivity_color(label: SubjectivityLabel) -> egui::Color32 {
    match label {
        SubjectivityLabel::VerySubjective => egui::Color32::from_rgb(70, 130, 230),
        SubjectivityLabel::Subjective => egui::Color32::from_rgb(130, 175, 230),
        SubjectivityLabel::Objective => egui::Color32::from_rgb(140, 140, 140),
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for SentimentApp {
    /// Called every frame by eframe.  Polls channels, advances timers, then
    /// renders the page.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- Poll non-blocking channels ------------------------------------
        self.poll_results();
        self.check_recording_limit();

        // --- Advance spinner animation -------------------------------------
        self.spinner_phase += 0.08;
        if self.spinner_phase >= 4.0 {
            self.spinner_phase = 0.0;
        }

        // --- Schedule repaints while animated states are active -----------
        match &self.pipeline_state {
            PipelineState::Recording => {
                // ~30 fps for the level bars
                ctx.request_repaint_after(Duration::from_millis(33));
            }
            PipelineState::Transcribing
            | PipelineState::Translating
            | PipelineState::Scoring => {
                // ~15 fps for the spinner
                ctx.request_repaint_after(Duration::from_millis(66));
            }
            _ => {}
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            // Heading + status
            ui.horizontal(|ui| {
                ui.heading("Spanish Sentiment Analyzer");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(self.pipeline_state.label())
                            .color(self.state_color())
                            .size(12.0),
                    );
                });
            });
            ui.separator();

            self.draw_voice_section(ui);
            ui.add_space(6.0);
            ui.separator();

            self.draw_text_section(ui);
            ui.add_space(8.0);
            self.draw_analyze_button(ui);

            ui.add_space(6.0);
            ui.separator();
            self.draw_results_section(ui);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("sentiment analyzer closing");
    }
}
