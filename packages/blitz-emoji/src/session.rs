//! Emoji session
//!
//! Built once at startup and handed to every text component that needs emoji
//! substitution. It owns the lookup table and sprite data; dropping the
//! session releases everything it built.

use crate::atlas::{AtlasCache, AtlasFiles, AtlasProvider};
use crate::codepoint::CodePoint;
use crate::config::EmojiConfig;
use crate::error::EmojiResult;
use crate::manifest::{AtlasManifest, register_manifest};
use crate::rewriter::TextRewriter;
use crate::sprite::SpriteTable;
use crate::table::SequenceTable;

/// Read-only emoji substitution context
#[derive(Debug, Clone)]
pub struct EmojiSession {
    config: EmojiConfig,
    table: SequenceTable,
    sprites: SpriteTable,
    rewriter: TextRewriter,
    atlas: Option<AtlasFiles>,
}

impl EmojiSession {
    /// Build a session from an already loaded manifest
    pub fn from_manifest(manifest: &AtlasManifest, config: &EmojiConfig) -> EmojiResult<Self> {
        Self::build(manifest, config, None, None)
    }

    /// Build a session from atlas files on disk
    pub fn load(files: AtlasFiles, config: &EmojiConfig) -> EmojiResult<Self> {
        let manifest = files.load_manifest()?;
        let atlas_height = match files.image_height() {
            Ok(height) => Some(height as f32),
            Err(err) => {
                log::warn!("Falling back to frame extents for atlas height: {}", err);
                None
            }
        };
        Self::build(&manifest, config, atlas_height, Some(files))
    }

    /// Locate or generate the atlas described by `config`, then load it.
    ///
    /// `emoji_list` is the list text written for the provider; it is only
    /// used when no cached atlas exists.
    pub fn bootstrap<P>(config: &EmojiConfig, provider: &P, emoji_list: &str) -> EmojiResult<Self>
    where
        P: AtlasProvider + ?Sized,
    {
        config.validate()?;
        let files = AtlasCache::from_config(config).ensure(provider, emoji_list)?;
        Self::load(files, config)
    }

    fn build(
        manifest: &AtlasManifest,
        config: &EmojiConfig,
        atlas_height: Option<f32>,
        atlas: Option<AtlasFiles>,
    ) -> EmojiResult<Self> {
        config.validate()?;

        let mut table = SequenceTable::new();
        let report = register_manifest(&mut table, manifest, config.private_use_base)?;
        if report.longest_sequence > config.max_span {
            log::warn!(
                "Manifest holds sequences of {} code points but max_span is {}; they will never match",
                report.longest_sequence,
                config.max_span
            );
        }

        let sprites = SpriteTable::from_manifest(manifest, config.private_use_base, atlas_height)?;

        log::info!(
            "Emoji session ready: {} sequences registered, {} skipped",
            report.registered,
            report.skipped
        );

        Ok(Self {
            config: config.clone(),
            table,
            sprites,
            rewriter: TextRewriter::new(config.max_span),
            atlas,
        })
    }

    /// Replace every registered emoji sequence in `text` with its sprite code point
    #[inline]
    pub fn rewrite(&self, text: &str) -> String {
        self.rewriter.rewrite_str(text, &self.table)
    }

    #[inline]
    pub fn rewrite_utf16(&self, units: &[u16]) -> Vec<u16> {
        self.rewriter.rewrite_utf16(units, &self.table)
    }

    #[inline]
    pub fn rewrite_tokens(&self, tokens: &[CodePoint]) -> Vec<CodePoint> {
        self.rewriter.rewrite_tokens(tokens, &self.table)
    }

    #[inline]
    pub fn table(&self) -> &SequenceTable {
        &self.table
    }

    #[inline]
    pub fn sprites(&self) -> &SpriteTable {
        &self.sprites
    }

    #[inline]
    pub fn rewriter(&self) -> &TextRewriter {
        &self.rewriter
    }

    #[inline]
    pub fn config(&self) -> &EmojiConfig {
        &self.config
    }

    /// Atlas files the session was loaded from, if any
    #[inline]
    pub fn atlas_files(&self) -> Option<&AtlasFiles> {
        self.atlas.as_ref()
    }
}
