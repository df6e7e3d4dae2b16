use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codepoint::{self, CodePoint};
use crate::error::EmojiResult;

/// Pixel rectangle of one sprite inside the atlas image, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl FrameRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Same rectangle measured from the bottom edge of an atlas `atlas_height` tall
    #[inline]
    pub fn flipped(&self, atlas_height: f32) -> Self {
        Self {
            y: atlas_height - self.y - self.h,
            ..*self
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// One emoji entry of the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiFrame {
    /// Display form of the emoji
    pub name: String,
    /// Space separated hex scalar values, e.g. `1F469 200D 1F4BB`
    pub code_point: String,
    pub frame: FrameRect,
}

impl EmojiFrame {
    pub fn new(name: impl Into<String>, code_point: impl Into<String>, frame: FrameRect) -> Self {
        Self {
            name: name.into(),
            code_point: code_point.into(),
            frame,
        }
    }

    /// Parsed scalar values; malformed tokens are dropped
    pub fn sequence(&self) -> Vec<CodePoint> {
        codepoint::parse_sequence(&self.code_point)
    }
}

/// Frame layout written next to the atlas image
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasManifest {
    #[serde(default)]
    pub image_name: String,
    #[serde(default)]
    pub frames: Vec<EmojiFrame>,
}

impl AtlasManifest {
    pub fn new(image_name: impl Into<String>, frames: Vec<EmojiFrame>) -> Self {
        Self {
            image_name: image_name.into(),
            frames,
        }
    }

    /// Parse a manifest from its JSON text
    pub fn from_json(json: &str) -> EmojiResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file
    pub fn from_path(path: &Path) -> EmojiResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let manifest = Self::from_json(&json)?;
        log::debug!(
            "Read atlas manifest {} with {} frames",
            path.display(),
            manifest.frames.len()
        );
        Ok(manifest)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> EmojiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest as pretty-printed JSON
    pub fn write_to(&self, path: &Path) -> EmojiResult<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Height covered by the frames, used when the image height is unknown
    pub fn content_height(&self) -> f32 {
        self.frames
            .iter()
            .map(|f| f.frame.bottom())
            .fold(0.0, f32::max)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
