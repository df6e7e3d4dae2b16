//! Populating a sequence table from a manifest

use crate::codepoint::{self, CodePoint, PrivateUseAllocator};
use crate::error::EmojiResult;
use crate::manifest::types::AtlasManifest;
use crate::table::SequenceTable;

/// Outcome of registering a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationReport {
    /// Entries that now resolve to a private-use code point
    pub registered: usize,
    /// Entries without a single valid scalar value
    pub skipped: usize,
    /// Length of the longest registered sequence
    pub longest_sequence: usize,
}

/// Register every frame of `manifest`, assigning private-use code points from
/// `base` upward in manifest order.
///
/// A frame whose sequence is malformed is skipped but still consumes its code
/// point, so code points stay aligned with sprite indices. Frames registered
/// before the private-use range runs out remain in the table.
pub fn register_manifest(
    table: &mut SequenceTable,
    manifest: &AtlasManifest,
    base: CodePoint,
) -> EmojiResult<RegistrationReport> {
    let mut allocator = PrivateUseAllocator::new(base);
    let mut report = RegistrationReport::default();

    for frame in &manifest.frames {
        let replacement = allocator.allocate()?;
        let sequence = frame.sequence();

        if sequence.is_empty() {
            log::warn!(
                "Skipping emoji '{}': no valid code point in '{}'",
                frame.name,
                frame.code_point
            );
            report.skipped += 1;
            continue;
        }

        log::debug!(
            "U+{:04X} <- {}",
            replacement,
            codepoint::format_sequence(&sequence)
        );
        table.add_entry(&sequence, replacement);
        report.registered += 1;
        report.longest_sequence = report.longest_sequence.max(sequence.len());
    }

    Ok(report)
}
