//! Plain-text emoji list consumed by atlas generators
//!
//! One entry per line. `#` starts a comment line, the sequence is everything
//! before the first `;` and whatever follows is free text, as in the Unicode
//! `emoji-test.txt` layout:
//!
//! ```text
//! # group: Smileys & Emotion
//! 1F600                                  ; fully-qualified     # 😀 grinning face
//! 1F469 200D 1F4BB                       ; fully-qualified     # 👩‍💻 woman technologist
//! ```

use crate::codepoint::{self, CodePoint};

/// One usable line of an emoji list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiListEntry {
    /// The sequence column exactly as written (trimmed)
    pub code_point: String,
    /// Parsed scalar values
    pub sequence: Vec<CodePoint>,
    /// Text after the first `;`, trimmed
    pub annotation: String,
}

impl EmojiListEntry {
    /// The emoji itself, built from its scalar values
    pub fn text(&self) -> String {
        codepoint::encode(&self.sequence)
    }
}

/// Parse an emoji list, skipping comments, blank lines and lines without a
/// single valid scalar value
pub fn parse_emoji_list(text: &str) -> Vec<EmojiListEntry> {
    let mut entries = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (sequence_part, annotation) = match trimmed.split_once(';') {
            Some((head, tail)) => (head.trim(), tail.trim()),
            None => (trimmed, ""),
        };

        let sequence = codepoint::parse_sequence(sequence_part);
        if sequence.is_empty() {
            log::warn!("Skipping emoji list line {}: no valid code point", line_no + 1);
            continue;
        }

        entries.push(EmojiListEntry {
            code_point: sequence_part.to_string(),
            sequence,
            annotation: annotation.to_string(),
        });
    }

    entries
}
