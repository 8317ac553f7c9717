//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// TranslatorConfig
// ---------------------------------------------------------------------------

/// Settings for the external translation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Base URL of a LibreTranslate-compatible endpoint.
    ///
    /// - Self-hosted default: `http://localhost:5000`
    /// - Hosted: `https://libretranslate.com` (requires an API key)
    pub base_url: String,
    /// API key — `None` for self-hosted instances that require no auth.
    pub api_key: Option<String>,
    /// Source language sent with every request (ISO-639-1).
    pub source_lang: String,
    /// Target language sent with every request (ISO-639-1).
    pub target_lang: String,
    /// Maximum seconds to wait for a translation response before timing out.
    pub timeout_secs: u64,
    /// Retry once on a transient failure (connection error or timeout).
    pub retry: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            api_key: None,
            source_lang: "es".into(),
            target_lang: "en".into(),
            timeout_secs: 10,
            retry: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SttConfig
// ---------------------------------------------------------------------------

/// Settings for the Whisper STT engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    /// GGML model id (e.g. `"whisper-small"`), resolved via the model
    /// registry in [`crate::stt`].
    pub model: String,
    /// Speech language as an ISO-639-1 code, or `"auto"` for Whisper's
    /// built-in language detection.
    pub language: String,
    /// Audio input device name — `None` means the system default.
    pub audio_device: Option<String>,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: "whisper-small".into(),
            language: "es".into(),
            audio_device: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AudioConfig
// ---------------------------------------------------------------------------

/// Settings for audio capture and clip validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Target sample rate in Hz passed to Whisper (must be 16 000).
    pub sample_rate: u32,
    /// RMS threshold below which a frame counts as silence (0.0 – 1.0).
    pub silence_threshold: f32,
    /// Minimum recording length in seconds before transcription is attempted.
    pub min_recording_secs: f32,
    /// Maximum recording length in seconds; recording stops automatically.
    pub max_recording_secs: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            silence_threshold: 0.01,
            min_recording_secs: 0.5,
            max_recording_secs: 30.0,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// egui window appearance and input defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Spanish text pre-filled into the input area on startup.
    pub default_text: String,
    /// Last saved window position `(x, y)` in screen pixels.  `None` means
    /// let the OS / window manager pick a position on first launch.
    pub window_position: Option<(f32, f32)>,
    /// Keep the window floating above all other windows.
    pub always_on_top: bool,
    /// Display the English translation alongside the scores.
    pub show_translation: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_text: "¡Estoy muy feliz de aprender inteligencia artificial!".into(),
            window_position: None,
            always_on_top: false,
            show_translation: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_sentiment::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Translation provider settings.
    pub translator: TranslatorConfig,
    /// STT engine settings.
    pub stt: SttConfig,
    /// Audio capture / validation settings.
    pub audio: AudioConfig,
    /// UI settings.
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            stt: SttConfig::default(),
            audio: AudioConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
