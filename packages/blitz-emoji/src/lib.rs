//! Emoji sequence substitution for sprite-atlas text rendering
//!
//! Text renderers that draw emoji from a sprite atlas need one glyph per
//! emoji, but a single emoji is often several code points (ZWJ sequences,
//! flags, keycaps, skin-tone modifiers). This crate maps each registered
//! sequence to a single private-use code point that indexes the atlas:
//!
//! - [`SequenceTable`]: prefix tree from code-point sequences to replacements
//! - [`TextRewriter`]: greedy longest-match rewriting of strings and UTF-16 buffers
//! - [`AtlasManifest`] / [`SpriteTable`]: the generator's frame layout and the
//!   per-glyph data a renderer binds
//! - [`EmojiSession`]: owns all of the above, built once and shared read-only
//!
//! # Example
//!
//! ```rust
//! use blitz_emoji::{AtlasManifest, EmojiFrame, FrameRect, build_table, rewrite};
//!
//! let manifest = AtlasManifest::new(
//!     "emoji_atlas.png",
//!     vec![EmojiFrame::new("😀", "1F600", FrameRect::new(0.0, 0.0, 34.0, 34.0))],
//! );
//! let table = build_table(&manifest);
//! assert_eq!(rewrite("hi 😀", &table), "hi \u{F0000}");
//! ```

pub mod atlas;
pub mod codepoint;
pub mod config;
pub mod error;
pub mod manifest;
pub mod rewriter;
pub mod session;
pub mod sprite;
pub mod table;

pub use atlas::{AtlasCache, AtlasFiles, AtlasProvider, GridLayout};
pub use codepoint::{CodePoint, PRIVATE_USE_BASE};
pub use config::EmojiConfig;
pub use error::{EmojiError, EmojiResult};
pub use manifest::{
    AtlasManifest, EmojiFrame, EmojiListEntry, FrameRect, RegistrationReport, parse_emoji_list,
};
pub use rewriter::{DEFAULT_MAX_SPAN, TextRewriter};
pub use session::EmojiSession;
pub use sprite::{SpriteGlyph, SpriteMetrics, SpriteTable};
pub use table::SequenceTable;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a lookup table from `manifest`, assigning U+F0000 upward in manifest order.
///
/// Malformed entries are skipped. If the manifest outgrows the private-use
/// area the entries registered so far are kept.
pub fn build_table(manifest: &AtlasManifest) -> SequenceTable {
    let mut table = SequenceTable::new();
    if let Err(err) = manifest::register_manifest(&mut table, manifest, PRIVATE_USE_BASE) {
        log::error!("Emoji table truncated at {} entries: {}", table.len(), err);
    }
    table
}

/// Rewrite `text` against `table` with the default span of
/// [`DEFAULT_MAX_SPAN`] code points
pub fn rewrite(text: &str, table: &SequenceTable) -> String {
    TextRewriter::default().rewrite_str(text, table)
}
