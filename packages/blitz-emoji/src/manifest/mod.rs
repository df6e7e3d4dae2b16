//! Atlas manifest handling
//!
//! The atlas generator writes a JSON manifest describing one frame per emoji.
//! This module parses that manifest, registers its sequences into a
//! [`SequenceTable`](crate::SequenceTable), and reads the plain-text emoji list
//! the generator consumes.

pub mod emoji_list;
pub mod registration;
pub mod types;

pub use emoji_list::{EmojiListEntry, parse_emoji_list};
pub use registration::{RegistrationReport, register_manifest};
pub use types::{AtlasManifest, EmojiFrame, FrameRect};
