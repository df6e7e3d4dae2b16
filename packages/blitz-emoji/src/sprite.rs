//! Sprite table for renderers
//!
//! Pure data describing where each private-use glyph lives in the atlas. A
//! renderer binds these entries into its own glyph tables; nothing here touches
//! textures or GPU state.

use ahash::AHashMap;

use crate::codepoint::{CodePoint, PrivateUseAllocator};
use crate::error::EmojiResult;
use crate::manifest::{AtlasManifest, FrameRect};

/// Glyph metrics for an inline sprite, in atlas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteMetrics {
    pub width: f32,
    pub height: f32,
    pub bearing_x: f32,
    pub bearing_y: f32,
    pub advance: f32,
}

impl SpriteMetrics {
    fn for_frame(rect: &FrameRect) -> Self {
        Self {
            width: rect.w,
            height: rect.h,
            bearing_x: 0.0,
            bearing_y: rect.h,
            advance: rect.w,
        }
    }
}

/// One sprite of the atlas
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteGlyph {
    /// Position in manifest order
    pub index: u32,
    /// Private-use code point the rewriter emits for this sprite
    pub code_point: CodePoint,
    pub name: String,
    /// Source sequence as written in the manifest
    pub sequence: String,
    /// Frame with a top-left origin, as the generator wrote it
    pub rect: FrameRect,
    /// Frame with a bottom-left origin
    pub flipped_rect: FrameRect,
    pub metrics: SpriteMetrics,
}

/// All sprites of one atlas, indexed by glyph index and by code point
#[derive(Debug, Clone, Default)]
pub struct SpriteTable {
    image_name: String,
    atlas_height: f32,
    glyphs: Vec<SpriteGlyph>,
    by_code_point: AHashMap<CodePoint, usize>,
}

impl SpriteTable {
    /// Build the sprite table for `manifest`.
    ///
    /// `atlas_height` is the pixel height of the atlas image; when it is not
    /// known the lowest frame edge is used instead.
    pub fn from_manifest(
        manifest: &AtlasManifest,
        base: CodePoint,
        atlas_height: Option<f32>,
    ) -> EmojiResult<Self> {
        let atlas_height = atlas_height.unwrap_or_else(|| manifest.content_height());
        let mut allocator = PrivateUseAllocator::new(base);
        let mut glyphs = Vec::with_capacity(manifest.len());
        let mut by_code_point = AHashMap::with_capacity(manifest.len());

        for (index, frame) in manifest.frames.iter().enumerate() {
            let code_point = allocator.allocate()?;
            by_code_point.insert(code_point, index);
            glyphs.push(SpriteGlyph {
                index: index as u32,
                code_point,
                name: frame.name.clone(),
                sequence: frame.code_point.clone(),
                rect: frame.frame,
                flipped_rect: frame.frame.flipped(atlas_height),
                metrics: SpriteMetrics::for_frame(&frame.frame),
            });
        }

        Ok(Self {
            image_name: manifest.image_name.clone(),
            atlas_height,
            glyphs,
            by_code_point,
        })
    }

    /// Sprite at glyph `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<&SpriteGlyph> {
        self.glyphs.get(index)
    }

    /// Sprite drawn for the private-use `code_point`
    pub fn glyph_for_code_point(&self, code_point: CodePoint) -> Option<&SpriteGlyph> {
        self.by_code_point
            .get(&code_point)
            .and_then(|&index| self.glyphs.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpriteGlyph> {
        self.glyphs.iter()
    }

    #[inline]
    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    #[inline]
    pub fn atlas_height(&self) -> f32 {
        self.atlas_height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
