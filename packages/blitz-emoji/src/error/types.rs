use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the fallible edges of the emoji pipeline.
///
/// The substitution core (table, rewriter, codec) never fails. These variants
/// only come from manifest I/O, configuration and atlas bootstrap.
#[derive(Error, Debug, Clone)]
pub enum EmojiError {
    /// I/O error when reading or writing atlas files
    #[error("I/O error: {0}")]
    Io(String),

    /// Manifest JSON could not be parsed
    #[error("Manifest parse error: {0}")]
    ManifestParse(String),

    /// A code-point sequence could not be parsed
    #[error("Invalid code-point sequence '{sequence}': {reason}")]
    InvalidSequence { sequence: String, reason: String },

    /// No atlas manifest or image was found after bootstrap
    #[error("Atlas files not found in {}", .0.display())]
    AtlasUnavailable(PathBuf),

    /// The atlas image header could not be read
    #[error("Invalid atlas image: {0}")]
    InvalidImage(String),

    /// The atlas provider reported a failure
    #[error("Atlas generation failed: {0}")]
    AtlasGenerationFailed(String),

    /// Every code point of the private-use range has been handed out
    #[error("Private use area exhausted after {allocated} code points")]
    PrivateUseExhausted { allocated: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for emoji operations
pub type EmojiResult<T> = Result<T, EmojiError>;

impl EmojiError {
    /// Get error category as string
    pub fn category(&self) -> &'static str {
        match self {
            EmojiError::Io(_) => "io",
            EmojiError::ManifestParse(_) => "manifest",
            EmojiError::InvalidSequence { .. } => "sequence",
            EmojiError::AtlasUnavailable(_) => "atlas_unavailable",
            EmojiError::InvalidImage(_) => "image",
            EmojiError::AtlasGenerationFailed(_) => "atlas_generation",
            EmojiError::PrivateUseExhausted { .. } => "private_use",
            EmojiError::ConfigError(_) => "config",
        }
    }

    /// Check if retrying the bootstrap could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            EmojiError::Io(_) => true,
            EmojiError::AtlasUnavailable(_) => true,
            EmojiError::AtlasGenerationFailed(_) => true,
            EmojiError::ManifestParse(_) => false,
            EmojiError::InvalidImage(_) => false,
            EmojiError::InvalidSequence { .. } => false,
            EmojiError::PrivateUseExhausted { .. } => false,
            EmojiError::ConfigError(_) => false,
        }
    }
}
