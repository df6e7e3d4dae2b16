use std::path::Path;

use crate::error::EmojiResult;

/// File name providers give the atlas image
pub const ATLAS_IMAGE_NAME: &str = "emoji_atlas.png";

/// File name providers give the frame manifest
pub const ATLAS_MANIFEST_NAME: &str = "emoji_atlas.json";

/// Platform capability that renders an emoji list into an atlas.
///
/// Implementations read the list at `emoji_list`, and write an image and a
/// JSON [`AtlasManifest`](crate::AtlasManifest) into `output_dir`, normally
/// named [`ATLAS_IMAGE_NAME`] and [`ATLAS_MANIFEST_NAME`]. One implementation
/// exists per target platform and is injected by the host.
pub trait AtlasProvider {
    fn create_atlas(&self, emoji_list: &Path, output_dir: &Path) -> EmojiResult<()>;
}

impl<F> AtlasProvider for F
where
    F: Fn(&Path, &Path) -> EmojiResult<()>,
{
    fn create_atlas(&self, emoji_list: &Path, output_dir: &Path) -> EmojiResult<()> {
        self(emoji_list, output_dir)
    }
}
