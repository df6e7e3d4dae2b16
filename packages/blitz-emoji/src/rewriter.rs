//! Greedy longest-match rewriting of code-point streams

use crate::codepoint::{self, CodePoint};
use crate::table::SequenceTable;

/// Longest composed emoji sequence the default configuration looks for
pub const DEFAULT_MAX_SPAN: usize = 8;

/// Replaces registered emoji sequences with their single-code-point stand-ins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRewriter {
    max_span: usize,
}

impl TextRewriter {
    /// Create a rewriter that tries at most `max_span` tokens per match.
    /// A span of zero is treated as one.
    pub fn new(max_span: usize) -> Self {
        Self {
            max_span: max_span.max(1),
        }
    }

    #[inline]
    pub fn max_span(&self) -> usize {
        self.max_span
    }

    /// Rewrite a token stream.
    ///
    /// At every position the longest registered sequence (up to `max_span`
    /// tokens) wins; a position with no match emits its token unchanged.
    pub fn rewrite_tokens(&self, tokens: &[CodePoint], table: &SequenceTable) -> Vec<CodePoint> {
        let mut output = Vec::with_capacity(tokens.len());
        if table.is_empty() {
            output.extend_from_slice(tokens);
            return output;
        }

        let mut i = 0;
        while i < tokens.len() {
            let longest = self.max_span.min(tokens.len() - i);
            let matched = (1..=longest).rev().find_map(|len| {
                table
                    .try_get_replacement(&tokens[i..i + len])
                    .map(|replacement| (replacement, len))
            });

            match matched {
                Some((replacement, len)) => {
                    output.push(replacement);
                    i += len;
                }
                None => {
                    output.push(tokens[i]);
                    i += 1;
                }
            }
        }
        output
    }

    /// Rewrite a UTF-8 string
    pub fn rewrite_str(&self, text: &str, table: &SequenceTable) -> String {
        if text.is_empty() {
            return String::new();
        }
        let tokens = codepoint::decode(text);
        codepoint::encode(&self.rewrite_tokens(&tokens, table))
    }

    /// Rewrite UTF-16 code units, as handed over by UTF-16 based text stacks
    pub fn rewrite_utf16(&self, units: &[u16], table: &SequenceTable) -> Vec<u16> {
        let tokens = codepoint::decode_utf16(units);
        codepoint::encode_utf16(&self.rewrite_tokens(&tokens, table))
    }
}

impl Default for TextRewriter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SPAN)
    }
}
