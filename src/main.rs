//! Application entry point — Spanish Sentiment Analyzer.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the translator ([`ApiTranslator`] + retry) and the sentiment
//!    model ([`VaderModel`]) from config.
//! 5. Create pipeline channels (`command`, `result`).
//! 6. Build the STT engine (degrades gracefully when no model file exists).
//! 7. Spawn the pipeline orchestrator on the tokio runtime.
//! 8. Start the cpal audio capture stream and its feeder thread.
//! 9. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use tokio::sync::mpsc;
use voice_sentiment::{
    app::SentimentApp,
    audio::{downmix_to_mono, resample_to_16k, AudioCapture, AudioChunk, ClipValidator,
        LevelBars, SilenceTrimmer},
    config::{AppConfig, AppPaths},
    pipeline::{
        new_shared_audio_buffer, PipelineCommand, PipelineOrchestrator, PipelineResult,
    },
    sentiment::{SentimentModel, VaderModel},
    stt::{ModelPaths, SttEngine, TranscribeParams, WhisperEngine},
    translate::{ApiTranslator, RetryTranslator, Translator},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let mut vp = egui::ViewportBuilder::default()
        .with_inner_size([480.0, 620.0])
        .with_min_inner_size([420.0, 480.0]);

    if config.ui.always_on_top {
        vp = vp.with_always_on_top();
    }

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Spanish Sentiment Analyzer starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (2 worker threads — Whisper + the HTTP call each take one)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Translator (HTTP, with timeout + single-retry hardening)
    let translator: Arc<dyn Translator> = Arc::new(RetryTranslator::new(
        ApiTranslator::from_config(&config.translator),
        config.translator.retry,
    ));

    // Sentiment model (bundled lexicon — always available)
    let model: Arc<dyn SentimentModel> = Arc::new(VaderModel::new());

    // 5. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<PipelineCommand>(16);
    let (result_tx, result_rx) = mpsc::channel::<PipelineResult>(32);

    // 6. Shared audio buffer
    let audio_buf = new_shared_audio_buffer();

    // Build STT engine (may fail if model not present — degrade gracefully)
    let stt_model_path = ModelPaths::new(&AppPaths::new()).resolve(&config.stt.model);

    let stt_params = TranscribeParams {
        language: config.stt.language.clone(),
        ..TranscribeParams::default()
    };

    let stt: Arc<dyn SttEngine> = match WhisperEngine::load(&stt_model_path, stt_params) {
        Ok(engine) => {
            log::info!("Whisper model loaded: {}", stt_model_path.display());
            Arc::new(engine)
        }
        Err(e) => {
            log::warn!(
                "Could not load Whisper model ({}): {e}. Voice input will return an error; \
                 typed analysis still works.",
                stt_model_path.display()
            );
            // Use a stub that always returns an explanatory error so the app
            // still launches without a model file present.
            Arc::new(NoModelStt {
                path: stt_model_path.display().to_string(),
            })
        }
    };

    // 7. Spawn pipeline orchestrator onto the tokio runtime
    {
        let validator = ClipValidator {
            min_recording_secs: config.audio.min_recording_secs,
            max_recording_secs: config.audio.max_recording_secs,
            silence_threshold: config.audio.silence_threshold,
            ..ClipValidator::default()
        };
        let trimmer = SilenceTrimmer::new(config.audio.silence_threshold);

        let orchestrator = PipelineOrchestrator::new(
            Arc::clone(&audio_buf),
            Arc::clone(&stt),
            Arc::clone(&translator),
            Arc::clone(&model),
            validator,
            trimmer,
            result_tx.clone(),
        );
        rt.spawn(orchestrator.run(command_rx));
    }

    // 8. cpal audio capture — pushes resampled mono samples into audio_buf
    //    while the recording gate is open, and emits level updates for the UI.
    let audio_buf_feeder = Arc::clone(&audio_buf);
    let level_tx = result_tx.clone();

    let _stream_handle: Option<voice_sentiment::audio::StreamHandle> =
        match AudioCapture::new(config.stt.audio_device.as_deref()) {
            Ok(capture) => {
                let native_sample_rate = capture.sample_rate();
                let channels = capture.channels();
                let (chunk_tx, chunk_rx) = std::sync::mpsc::channel::<AudioChunk>();

                // Spawn a thread that drains cpal chunks → resamples → feeds
                // the shared audio buffer (only while the gate is open).
                std::thread::Builder::new()
                    .name("audio-feeder".into())
                    .spawn(move || {
                        while let Ok(chunk) = chunk_rx.recv() {
                            // Check the gate under a brief lock
                            let is_rec = audio_buf_feeder.lock().unwrap().1;
                            if !is_rec {
                                continue;
                            }

                            // Downmix to mono
                            let mono = if channels > 1 {
                                downmix_to_mono(&chunk.samples, channels)
                            } else {
                                chunk.samples.clone()
                            };

                            // Resample to 16 kHz
                            let resampled = if chunk.sample_rate != 16_000 {
                                resample_to_16k(&mono, chunk.sample_rate)
                            } else {
                                mono
                            };

                            let bars = {
                                let mut buf = audio_buf_feeder.lock().unwrap();
                                buf.0.extend_from_slice(&resampled);

                                // Level display over the last second of audio
                                let tail_start = buf.0.len().saturating_sub(16_000);
                                LevelBars::compute(&buf.0[tail_start..], 30).bars
                            };

                            // Best-effort; dropped frames only cost animation
                            // smoothness.
                            let _ = level_tx.try_send(PipelineResult::LevelUpdate { bars });
                        }
                    })
                    .expect("failed to spawn audio-feeder thread");

                match capture.start(chunk_tx) {
                    Ok(handle) => {
                        log::info!(
                            "Audio capture started ({} Hz, {} ch)",
                            native_sample_rate,
                            channels
                        );
                        Some(handle)
                    }
                    Err(e) => {
                        log::warn!("Failed to start audio stream: {e}");
                        None
                    }
                }
            }
            Err(e) => {
                log::warn!("Audio capture unavailable: {e}");
                None
            }
        };

    // 9. Build the egui app and run it (blocks until the window is closed)
    let app = SentimentApp::new(command_tx, result_rx, config.clone());
    let options = native_options(&config);

    eframe::run_native(
        "Spanish Sentiment Analyzer",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}

// ---------------------------------------------------------------------------
// NoModelStt — fallback SttEngine when the model file is not present
// ---------------------------------------------------------------------------

struct NoModelStt {
    path: String,
}

impl SttEngine for NoModelStt {
    fn transcribe(&self, _audio: &[f32]) -> Result<String, voice_sentiment::stt::SttError> {
        Err(voice_sentiment::stt::SttError::ModelNotFound(
            self.path.clone(),
        ))
    }
}
