//! Model registry, metadata and path resolution.
//!
//! Spanish is well covered by the standard multilingual Whisper models, so a
//! single [`WHISPER_MODELS`] table is provided.  [`ModelPaths`] resolves the
//! on-disk location of a model given an [`crate::config::AppPaths`] instance.

use std::path::PathBuf;

use crate::config::AppPaths;

// ---------------------------------------------------------------------------
// ModelSize
// ---------------------------------------------------------------------------

/// Approximate capacity tier of a Whisper GGML model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelSize {
    /// ~142 MB file — fastest, lowest accuracy.
    Base,
    /// ~466 MB file — balanced (recommended).
    Small,
    /// ~1.5 GB file — highest accuracy, slowest.
    Medium,
}

// ---------------------------------------------------------------------------
// ModelInfo
// ---------------------------------------------------------------------------

/// Static metadata for a single GGML model file.
#[derive(Debug)]
pub struct ModelInfo {
    /// Unique identifier used in `SttConfig::model` (e.g. `"whisper-small"`).
    pub id: &'static str,
    /// Human-readable display name shown in the UI.
    pub display_name: &'static str,
    /// Model capacity tier.
    pub size: ModelSize,
    /// File name under the models directory (e.g. `"ggml-small.bin"`).
    pub file_name: &'static str,
    /// Approximate file size in megabytes.
    pub file_size_mb: u64,
    /// Source URL for downloading the GGML file.
    pub source_url: &'static str,
}

// ---------------------------------------------------------------------------
// Standard Whisper models (multilingual)
// ---------------------------------------------------------------------------

/// Standard OpenAI Whisper models (99-language multilingual, Spanish
/// included).
pub const WHISPER_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "whisper-base",
        display_name: "Whisper Base (Multilingual)",
        size: ModelSize::Base,
        file_name: "ggml-base.bin",
        file_size_mb: 142,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin",
    },
    ModelInfo {
        id: "whisper-small",
        display_name: "Whisper Small (Multilingual) [Recommended]",
        size: ModelSize::Small,
        file_name: "ggml-small.bin",
        file_size_mb: 466,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin",
    },
    ModelInfo {
        id: "whisper-medium",
        display_name: "Whisper Medium (Multilingual)",
        size: ModelSize::Medium,
        file_name: "ggml-medium.bin",
        file_size_mb: 1_500,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-medium.bin",
    },
];

/// Look up a model by its config id.
pub fn find_model_by_id(id: &str) -> Option<&'static ModelInfo> {
    WHISPER_MODELS.iter().find(|m| m.id == id)
}

// ---------------------------------------------------------------------------
// ModelPaths
// ---------------------------------------------------------------------------

/// Resolves model ids to on-disk file paths.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    models_dir: PathBuf,
}

impl ModelPaths {
    /// Create a resolver rooted at the app's models directory.
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            models_dir: paths.models_dir.clone(),
        }
    }

    /// Full path for a model id.
    ///
    /// Unknown ids fall back to `ggml-{id}.bin` so users can drop in custom
    /// GGML files without registry changes.
    pub fn resolve(&self, id: &str) -> PathBuf {
        match find_model_by_id(id) {
            Some(info) => self.models_dir.join(info.file_name),
            None => self.models_dir.join(format!("ggml-{id}.bin")),
        }
    }

    /// Returns `true` when the model file for `id` exists on disk.
    pub fn exists(&self, id: &str) -> bool {
        self.resolve(id).exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
