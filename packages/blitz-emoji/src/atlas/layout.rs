//! Square grid placement shared by the atlas providers

use crate::manifest::{AtlasManifest, EmojiFrame, EmojiListEntry, FrameRect};

use super::provider::ATLAS_IMAGE_NAME;

/// Edge length of one atlas tile in pixels
pub const TILE_SIZE: f32 = 34.0;

/// Places entries on a near-square grid, left to right, top to bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    tile_size: f32,
}

impl GridLayout {
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Columns and rows for `count` tiles: `ceil(sqrt(count))` columns
    pub fn grid_size(count: usize) -> (usize, usize) {
        if count == 0 {
            return (0, 0);
        }
        let mut columns = (count as f64).sqrt() as usize;
        while columns * columns < count {
            columns += 1;
        }
        (columns, count.div_ceil(columns))
    }

    /// Pixel size of the atlas image for `count` tiles
    pub fn atlas_size(&self, count: usize) -> (f32, f32) {
        let (columns, rows) = Self::grid_size(count);
        (columns as f32 * self.tile_size, rows as f32 * self.tile_size)
    }

    /// Lay out `entries`, leaving out those `fits` rejects.
    ///
    /// The grid is sized for every entry; rejected entries do not leave gaps.
    pub fn layout<F>(&self, entries: &[EmojiListEntry], mut fits: F) -> AtlasManifest
    where
        F: FnMut(&EmojiListEntry) -> bool,
    {
        let (columns, _) = Self::grid_size(entries.len());
        let mut frames = Vec::with_capacity(entries.len());

        for entry in entries {
            if !fits(entry) {
                log::debug!("Emoji {} does not fit a {} px tile", entry.code_point, self.tile_size);
                continue;
            }
            let slot = frames.len();
            let x = (slot % columns) as f32 * self.tile_size;
            let y = (slot / columns) as f32 * self.tile_size;
            frames.push(EmojiFrame::new(
                entry.text(),
                entry.code_point.clone(),
                FrameRect::new(x, y, self.tile_size, self.tile_size),
            ));
        }

        AtlasManifest::new(ATLAS_IMAGE_NAME, frames)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(TILE_SIZE)
    }
}
