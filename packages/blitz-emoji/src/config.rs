use std::path::PathBuf;

use crate::codepoint::{self, CodePoint, PRIVATE_USE_BASE};
use crate::error::{EmojiError, EmojiResult};
use crate::rewriter::DEFAULT_MAX_SPAN;

/// Directory name used under the platform data directory
pub const ATLAS_DIRECTORY_NAME: &str = "EmojiAtlas";

/// Session configuration with fluent setters
#[derive(Debug, Clone)]
pub struct EmojiConfig {
    /// Where the emoji list, atlas image and manifest are cached
    pub atlas_directory: PathBuf,
    /// File stem of the emoji list written for the provider
    pub emoji_list_name: String,
    /// Longest sequence the rewriter tries to match
    pub max_span: usize,
    /// First private-use code point handed out
    pub private_use_base: CodePoint,
    /// Run the provider even when cached atlas files exist
    pub force_regenerate: bool,
}

impl EmojiConfig {
    /// Defaults: platform data directory, spans of up to 8 tokens, U+F0000 upward
    pub fn new() -> Self {
        Self {
            atlas_directory: default_atlas_directory(),
            emoji_list_name: "emoji_list".to_string(),
            max_span: DEFAULT_MAX_SPAN,
            private_use_base: PRIVATE_USE_BASE,
            force_regenerate: false,
        }
    }

    #[inline]
    pub fn with_atlas_directory<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.atlas_directory = path.into();
        self
    }

    #[inline]
    pub fn with_emoji_list_name(mut self, name: impl Into<String>) -> Self {
        self.emoji_list_name = name.into();
        self
    }

    #[inline]
    pub fn with_max_span(mut self, max_span: usize) -> Self {
        self.max_span = max_span;
        self
    }

    #[inline]
    pub fn with_private_use_base(mut self, base: CodePoint) -> Self {
        self.private_use_base = base;
        self
    }

    /// Run the provider even when a cached atlas exists. The cached files are
    /// only replaced once the provider succeeds.
    #[inline]
    pub fn force_regenerate(mut self) -> Self {
        self.force_regenerate = true;
        self
    }

    /// Validate configuration before use
    pub fn validate(&self) -> EmojiResult<()> {
        if self.max_span == 0 {
            return Err(EmojiError::ConfigError(
                "max_span must be at least 1".to_string(),
            ));
        }

        if !codepoint::is_supplementary_private_use(self.private_use_base) {
            return Err(EmojiError::ConfigError(format!(
                "private_use_base U+{:04X} is outside the supplementary private use areas",
                self.private_use_base
            )));
        }

        let name = self.emoji_list_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(EmojiError::ConfigError(format!(
                "invalid emoji list name '{}'",
                self.emoji_list_name
            )));
        }

        if self.atlas_directory.exists() && !self.atlas_directory.is_dir() {
            return Err(EmojiError::ConfigError(format!(
                "atlas path is not a directory: {}",
                self.atlas_directory.display()
            )));
        }

        Ok(())
    }
}

impl Default for EmojiConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_atlas_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(ATLAS_DIRECTORY_NAME)
}
