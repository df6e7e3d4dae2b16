//! Session bootstrap against an atlas directory
//!
//! A fake provider lays out the emoji list with [`GridLayout`] and writes the
//! manifest plus a PNG header, standing in for the platform rasterizer.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use blitz_emoji::atlas::{ATLAS_IMAGE_NAME, ATLAS_MANIFEST_NAME};
use blitz_emoji::{
    AtlasCache, EmojiConfig, EmojiError, EmojiResult, EmojiSession, GridLayout, parse_emoji_list,
};

const EMOJI_LIST: &str = "\
# sample list
1F600                 ; fully-qualified     # 😀 grinning face
1F469 200D 1F4BB      ; fully-qualified     # 👩‍💻 woman technologist
1F469                 ; fully-qualified     # 👩 woman
1F1EF 1F1F5           ; fully-qualified     # 🇯🇵 flag: Japan
";

/// Minimal PNG: signature and IHDR chunk header
fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

struct GridProvider {
    runs: Cell<usize>,
}

impl GridProvider {
    fn new() -> Self {
        Self { runs: Cell::new(0) }
    }
}

impl blitz_emoji::AtlasProvider for GridProvider {
    fn create_atlas(&self, emoji_list: &Path, output_dir: &Path) -> EmojiResult<()> {
        self.runs.set(self.runs.get() + 1);
        let entries = parse_emoji_list(&fs::read_to_string(emoji_list)?);
        let layout = GridLayout::default();
        let manifest = layout.layout(&entries, |_| true);
        let (width, height) = layout.atlas_size(entries.len());

        manifest.write_to(&output_dir.join(ATLAS_MANIFEST_NAME))?;
        fs::write(
            output_dir.join(ATLAS_IMAGE_NAME),
            png_header(width as u32, height as u32),
        )?;
        Ok(())
    }
}

fn config_in(dir: &Path) -> EmojiConfig {
    EmojiConfig::new().with_atlas_directory(dir.join("EmojiAtlas"))
}

#[cfg(test)]
mod session_bootstrap_tests {
    use super::*;

    #[test]
    fn test_bootstrap_generates_and_loads_atlas() {
        let _ = env_logger::builder().is_test(true).try_init();
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());
        let provider = GridProvider::new();

        let session = EmojiSession::bootstrap(&config, &provider, EMOJI_LIST).unwrap();

        assert_eq!(provider.runs.get(), 1);
        assert!(config.atlas_directory.join("emoji_list.txt").is_file());
        assert_eq!(session.table().len(), 4);
        assert_eq!(session.sprites().len(), 4);

        // woman technologist is the second list entry
        assert_eq!(
            session.rewrite("\u{1F469}\u{200D}\u{1F4BB}\u{1F469}\u{1F1EF}\u{1F1F5}"),
            "\u{F0001}\u{F0002}\u{F0003}"
        );

        let files = session.atlas_files().unwrap();
        assert!(files.manifest.ends_with(ATLAS_MANIFEST_NAME));
        assert_eq!(files.image_height().unwrap(), 68);
    }

    #[test]
    fn test_cached_atlas_skips_provider() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());
        let provider = GridProvider::new();

        let first = EmojiSession::bootstrap(&config, &provider, EMOJI_LIST).unwrap();
        let second = EmojiSession::bootstrap(&config, &provider, "").unwrap();

        assert_eq!(provider.runs.get(), 1);
        assert_eq!(first.table().len(), second.table().len());
        assert_eq!(second.rewrite("\u{1F600}"), "\u{F0000}");
    }

    #[test]
    fn test_force_regenerate_runs_provider_again() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = GridProvider::new();

        EmojiSession::bootstrap(&config_in(tmp.path()), &provider, EMOJI_LIST).unwrap();
        let forced = config_in(tmp.path()).force_regenerate();
        let session = EmojiSession::bootstrap(&forced, &provider, "1F9E0\n").unwrap();

        assert_eq!(provider.runs.get(), 2);
        assert_eq!(session.table().len(), 1);
        assert_eq!(session.rewrite("\u{1F9E0}\u{1F600}"), "\u{F0000}\u{1F600}");
    }

    #[test]
    fn test_provider_without_output_is_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());
        let silent = |_list: &Path, _dir: &Path| -> EmojiResult<()> { Ok(()) };

        let err = EmojiSession::bootstrap(&config, &silent, EMOJI_LIST).unwrap_err();
        assert!(matches!(err, EmojiError::AtlasUnavailable(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_provider_error_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        let failing = |_list: &Path, _dir: &Path| -> EmojiResult<()> {
            Err(EmojiError::AtlasGenerationFailed("no emoji font".into()))
        };

        let err = EmojiSession::bootstrap(&config_in(tmp.path()), &failing, EMOJI_LIST).unwrap_err();
        assert_eq!(err.category(), "atlas_generation");
    }

    #[test]
    fn test_invalid_config_is_rejected_before_provider_runs() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = GridProvider::new();
        let config = config_in(tmp.path()).with_max_span(0);

        let err = EmojiSession::bootstrap(&config, &provider, EMOJI_LIST).unwrap_err();
        assert!(matches!(err, EmojiError::ConfigError(_)));
        assert_eq!(provider.runs.get(), 0);
    }

    #[test]
    fn test_locate_picks_first_files_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = AtlasCache::new(tmp.path(), "emoji_list");
        assert!(cache.locate().unwrap().is_none());

        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        assert!(cache.locate().unwrap().is_none());

        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("atlas.PNG"), png_header(1, 1)).unwrap();
        let files = cache.locate().unwrap().unwrap();
        assert!(files.manifest.ends_with("a.json"));
        assert!(files.image.ends_with("atlas.PNG"));
    }

    /// Leftover manifests from earlier generators are all replaced
    #[test]
    fn test_forced_regeneration_replaces_every_stale_file() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(tmp.path().join("a.png"), png_header(1, 1)).unwrap();

        let files = AtlasCache::new(tmp.path(), "emoji_list")
            .with_force_regenerate(true)
            .ensure(&GridProvider::new(), EMOJI_LIST)
            .unwrap();

        assert!(files.manifest.ends_with(ATLAS_MANIFEST_NAME));
        assert!(files.image.ends_with(ATLAS_IMAGE_NAME));
        for stale in ["a.json", "b.json", "a.png"] {
            assert!(!tmp.path().join(stale).exists(), "{stale} was left behind");
        }
        assert!(!tmp.path().join(".staging").exists());
        assert_eq!(files.load_manifest().unwrap().len(), 4);
    }

    #[test]
    fn test_failed_regeneration_keeps_cached_atlas() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = GridProvider::new();
        let cached = AtlasCache::new(tmp.path(), "emoji_list")
            .ensure(&provider, EMOJI_LIST)
            .unwrap();

        let forced = AtlasCache::new(tmp.path(), "emoji_list").with_force_regenerate(true);
        let failing = |_list: &Path, _dir: &Path| -> EmojiResult<()> {
            Err(EmojiError::AtlasGenerationFailed("rasterizer crashed".into()))
        };
        assert!(forced.ensure(&failing, EMOJI_LIST).is_err());
        let silent = |_list: &Path, _dir: &Path| -> EmojiResult<()> { Ok(()) };
        assert!(matches!(
            forced.ensure(&silent, EMOJI_LIST),
            Err(EmojiError::AtlasUnavailable(_))
        ));

        assert_eq!(forced.locate().unwrap(), Some(cached.clone()));
        assert!(!tmp.path().join(".staging").exists());
        assert_eq!(cached.load_manifest().unwrap().len(), 4);
        assert_eq!(provider.runs.get(), 1);
    }

    #[test]
    fn test_image_height_reads_header_only() {
        let tmp = tempfile::tempdir().unwrap();
        let image = tmp.path().join("atlas.png");
        let manifest = tmp.path().join("atlas.json");

        let mut bytes = png_header(340, 306);
        bytes.resize(bytes.len() + 4096, 0xAB);
        fs::write(&image, &bytes).unwrap();
        let files = blitz_emoji::AtlasFiles { manifest, image };
        assert_eq!(files.image_height().unwrap(), 306);

        fs::write(&files.image, &png_header(340, 306)[..16]).unwrap();
        assert_eq!(files.image_height().unwrap_err().category(), "image");
    }

    #[test]
    fn test_load_with_unreadable_image_uses_frame_extent() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = GridProvider::new();
        let config = config_in(tmp.path());
        let files = AtlasCache::from_config(&config)
            .ensure(&provider, EMOJI_LIST)
            .unwrap();
        fs::write(&files.image, b"not a png").unwrap();

        assert_eq!(files.image_height().unwrap_err().category(), "image");
        let session = EmojiSession::load(files, &config).unwrap();
        // four tiles on a 2x2 grid
        assert_eq!(session.sprites().atlas_height(), 68.0);
        assert_eq!(session.sprites().get(0).unwrap().flipped_rect.y, 34.0);
    }

    #[test]
    fn test_session_is_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EmojiSession>();

        let tmp = tempfile::tempdir().unwrap();
        let session =
            EmojiSession::bootstrap(&config_in(tmp.path()), &GridProvider::new(), EMOJI_LIST)
                .unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| session.rewrite("\u{1F600} \u{1F469}")))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), "\u{F0000} \u{F0002}");
            }
        });
    }
}
