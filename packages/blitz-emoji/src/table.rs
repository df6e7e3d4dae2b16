//! Sequence table
//!
//! A prefix tree keyed on code points. Each edge consumes one token and a node
//! carries a replacement when a registered sequence ends there. The table is
//! append-only: it is filled once from the atlas manifest and then only read.

use std::num::NonZeroU32;

use ahash::AHashMap;

use crate::codepoint::{CodePoint, format_sequence};

/// Index of the root node in the arena
const ROOT: usize = 0;

#[derive(Debug, Default, Clone)]
struct Node {
    replacement: Option<NonZeroU32>,
    children: AHashMap<CodePoint, usize>,
}

/// Trie mapping code-point sequences to single replacement code points
#[derive(Debug, Clone)]
pub struct SequenceTable {
    nodes: Vec<Node>,
    entries: usize,
    longest: usize,
}

impl SequenceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            entries: 0,
            longest: 0,
        }
    }

    /// Register `sequence` so that it resolves to `replacement`.
    ///
    /// A later registration of the same sequence overwrites the earlier one.
    /// Replacement zero means "no mapping", so registering it clears any
    /// previous value for the sequence. Empty sequences are ignored.
    pub fn add_entry(&mut self, sequence: &[CodePoint], replacement: CodePoint) {
        if sequence.is_empty() {
            log::debug!("Ignoring empty sequence for replacement U+{replacement:04X}");
            return;
        }
        if replacement == 0 {
            log::debug!("Clearing replacement for {}", format_sequence(sequence));
        }

        let mut current = ROOT;
        for &token in sequence {
            let existing = self.nodes[current].children.get(&token).copied();
            current = match existing {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[current].children.insert(token, child);
                    child
                }
            };
        }

        let node = &mut self.nodes[current];
        let previous = node.replacement;
        node.replacement = NonZeroU32::new(replacement);

        match (previous, node.replacement) {
            (None, Some(_)) => {
                self.entries += 1;
                self.longest = self.longest.max(sequence.len());
            }
            (Some(_), None) => self.entries -= 1,
            _ => {}
        }
    }

    /// Look up the replacement registered for exactly `sequence`
    pub fn try_get_replacement(&self, sequence: &[CodePoint]) -> Option<CodePoint> {
        let mut current = ROOT;
        for token in sequence {
            current = *self.nodes[current].children.get(token)?;
        }
        self.nodes[current].replacement.map(NonZeroU32::get)
    }

    /// Whether some registered sequence continues past `prefix`
    pub fn has_prefix(&self, prefix: &[CodePoint]) -> bool {
        let mut current = ROOT;
        for token in prefix {
            match self.nodes[current].children.get(token) {
                Some(&child) => current = child,
                None => return false,
            }
        }
        !self.nodes[current].children.is_empty()
    }

    /// Number of sequences that currently resolve to a replacement
    #[inline]
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Returns `true` if no sequence resolves to a replacement
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Length of the longest sequence ever registered with a replacement
    #[inline]
    pub fn max_sequence_len(&self) -> usize {
        self.longest
    }

    /// Number of trie nodes, including the root
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for SequenceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<(Vec<CodePoint>, CodePoint)> for SequenceTable {
    fn extend<I: IntoIterator<Item = (Vec<CodePoint>, CodePoint)>>(&mut self, iter: I) {
        for (sequence, replacement) in iter {
            self.add_entry(&sequence, replacement);
        }
    }
}

impl FromIterator<(Vec<CodePoint>, CodePoint)> for SequenceTable {
    fn from_iter<I: IntoIterator<Item = (Vec<CodePoint>, CodePoint)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
