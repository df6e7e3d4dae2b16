//! On-disk atlas cache
//!
//! An atlas directory holds the emoji list handed to the provider plus the
//! image and manifest it produced. Providers are slow, so they only run when
//! the directory has no usable atlas yet. Generation writes into a staging
//! subdirectory; the directory's atlas files are only replaced once the
//! provider has produced a complete atlas.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::EmojiConfig;
use crate::error::{EmojiError, EmojiResult};
use crate::manifest::AtlasManifest;

use super::provider::AtlasProvider;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Signature, IHDR length and tag, width, height
const PNG_HEADER_LEN: usize = 24;

const STAGING_DIR_NAME: &str = ".staging";

/// Manifest and image of a generated atlas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasFiles {
    pub manifest: PathBuf,
    pub image: PathBuf,
}

impl AtlasFiles {
    pub fn load_manifest(&self) -> EmojiResult<AtlasManifest> {
        AtlasManifest::from_path(&self.manifest)
    }

    /// Pixel height of the atlas image, read from its PNG header
    pub fn image_height(&self) -> EmojiResult<u32> {
        let not_png = || {
            EmojiError::InvalidImage(format!("{} is not a PNG image", self.image.display()))
        };

        let mut header = [0u8; PNG_HEADER_LEN];
        match File::open(&self.image)?.read_exact(&mut header) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Err(not_png()),
            Err(err) => return Err(err.into()),
        }
        if header[..8] != PNG_SIGNATURE || &header[12..16] != b"IHDR" {
            return Err(not_png());
        }

        let mut height = [0u8; 4];
        height.copy_from_slice(&header[20..24]);
        Ok(u32::from_be_bytes(height))
    }
}

/// Atlas directory with lazy regeneration
#[derive(Debug, Clone)]
pub struct AtlasCache {
    directory: PathBuf,
    list_name: String,
    force_regenerate: bool,
}

impl AtlasCache {
    pub fn new<P: Into<PathBuf>>(directory: P, list_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            list_name: list_name.into(),
            force_regenerate: false,
        }
    }

    pub fn from_config(config: &EmojiConfig) -> Self {
        Self {
            directory: config.atlas_directory.clone(),
            list_name: config.emoji_list_name.clone(),
            force_regenerate: config.force_regenerate,
        }
    }

    #[inline]
    pub fn with_force_regenerate(mut self, force: bool) -> Self {
        self.force_regenerate = force;
        self
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path the emoji list is written to before the provider runs
    pub fn emoji_list_path(&self) -> PathBuf {
        self.directory.join(format!("{}.txt", self.list_name))
    }

    /// First manifest and first image in the directory, by file name
    pub fn locate(&self) -> EmojiResult<Option<AtlasFiles>> {
        locate_in(&self.directory)
    }

    /// Return cached atlas files, running `provider` on `emoji_list` first if
    /// none exist (or regeneration is forced).
    ///
    /// A failed generation leaves the existing atlas in place.
    pub fn ensure<P>(&self, provider: &P, emoji_list: &str) -> EmojiResult<AtlasFiles>
    where
        P: AtlasProvider + ?Sized,
    {
        if let Some(files) = self.locate()? {
            if !self.force_regenerate {
                log::info!("Using cached emoji atlas {}", files.manifest.display());
                return Ok(files);
            }
            log::info!("Regenerating emoji atlas over {}", files.manifest.display());
        }

        fs::create_dir_all(&self.directory)?;
        let list_path = self.emoji_list_path();
        fs::write(&list_path, emoji_list)?;

        let staging = self.directory.join(STAGING_DIR_NAME);
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir(&staging)?;

        log::info!("Generating emoji atlas in {}", self.directory.display());
        let generated = provider
            .create_atlas(&list_path, &staging)
            .and_then(|()| locate_in(&staging));
        match generated {
            Ok(Some(_)) => {}
            Ok(None) => {
                discard_staging(&staging);
                return Err(EmojiError::AtlasUnavailable(self.directory.clone()));
            }
            Err(err) => {
                discard_staging(&staging);
                return Err(err);
            }
        }

        self.replace_with_staged(&staging)?;
        self.locate()?
            .ok_or_else(|| EmojiError::AtlasUnavailable(self.directory.clone()))
    }

    /// Drop every manifest and image in the directory, then move the staged
    /// output in
    fn replace_with_staged(&self, staging: &Path) -> EmojiResult<()> {
        let (manifests, images) = atlas_candidates(&self.directory)?;
        for stale in manifests.iter().chain(&images) {
            log::debug!("Removing stale atlas file {}", stale.display());
            fs::remove_file(stale)?;
        }

        for entry in fs::read_dir(staging)? {
            let path = entry?.path();
            if let Some(name) = path.file_name() {
                fs::rename(&path, self.directory.join(name))?;
            }
        }
        fs::remove_dir_all(staging)?;
        Ok(())
    }
}

fn locate_in(directory: &Path) -> EmojiResult<Option<AtlasFiles>> {
    if !directory.is_dir() {
        return Ok(None);
    }
    let (manifests, images) = atlas_candidates(directory)?;
    Ok(manifests
        .into_iter()
        .next()
        .zip(images.into_iter().next())
        .map(|(manifest, image)| AtlasFiles { manifest, image }))
}

/// Sorted `*.json` and `*.png` files directly inside `directory`
fn atlas_candidates(directory: &Path) -> EmojiResult<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut manifests = Vec::new();
    let mut images = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match extension_lowercase(&path).as_deref() {
            Some("json") => manifests.push(path),
            Some("png") => images.push(path),
            _ => {}
        }
    }
    manifests.sort();
    images.sort();
    Ok((manifests, images))
}

fn discard_staging(staging: &Path) {
    if let Err(err) = fs::remove_dir_all(staging) {
        log::warn!(
            "Failed to remove atlas staging directory {}: {}",
            staging.display(),
            err
        );
    }
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
