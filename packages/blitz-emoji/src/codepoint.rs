//! Code-point codec and hex helpers
//!
//! Text is handled as a flat sequence of Unicode scalar values so that
//! multi-scalar emoji (ZWJ sequences, flags, skin-tone modifiers) can be matched
//! token by token. UTF-8 input maps one `char` to one token; UTF-16 input
//! combines surrogate pairs before tokenizing.

use crate::error::{EmojiError, EmojiResult};

/// A single Unicode code point, stored as its integer value
pub type CodePoint = u32;

/// First code point of Supplementary Private Use Area-A
pub const PRIVATE_USE_BASE: CodePoint = 0xF0000;

/// Last assignable code point of Supplementary Private Use Area-A
pub const PRIVATE_USE_END: CodePoint = 0xFFFFD;

/// Supplementary Private Use Area-B
pub const PRIVATE_USE_B: std::ops::RangeInclusive<CodePoint> = 0x100000..=0x10FFFD;

const SURROGATES: std::ops::RangeInclusive<CodePoint> = 0xD800..=0xDFFF;

/// Whether `code_point` lies in one of the three private-use areas
#[inline]
pub fn is_private_use(code_point: CodePoint) -> bool {
    (0xE000..=0xF8FF).contains(&code_point)
        || (PRIVATE_USE_BASE..=PRIVATE_USE_END).contains(&code_point)
        || PRIVATE_USE_B.contains(&code_point)
}

/// Whether `code_point` lies in one of the supplementary private-use planes
#[inline]
pub fn is_supplementary_private_use(code_point: CodePoint) -> bool {
    (PRIVATE_USE_BASE..=PRIVATE_USE_END).contains(&code_point)
        || PRIVATE_USE_B.contains(&code_point)
}

/// Decode a string into one token per scalar value
#[inline]
pub fn decode(text: &str) -> Vec<CodePoint> {
    text.chars().map(CodePoint::from).collect()
}

/// Decode UTF-16 code units into one token per scalar value.
///
/// Unpaired surrogates are kept as their raw unit value so that
/// [`encode_utf16`] reproduces the input exactly.
pub fn decode_utf16(units: &[u16]) -> Vec<CodePoint> {
    char::decode_utf16(units.iter().copied())
        .map(|unit| match unit {
            Ok(ch) => CodePoint::from(ch),
            Err(err) => CodePoint::from(err.unpaired_surrogate()),
        })
        .collect()
}

/// Encode tokens back into a string.
///
/// Tokens that are not scalar values (surrogates, values past U+10FFFF) are
/// written as U+FFFD.
pub fn encode(tokens: &[CodePoint]) -> String {
    let mut out = String::with_capacity(tokens.len());
    out.extend(
        tokens
            .iter()
            .map(|&cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
    out
}

/// Encode tokens into UTF-16 code units, splitting astral values into surrogate pairs
pub fn encode_utf16(tokens: &[CodePoint]) -> Vec<u16> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut buf = [0u16; 2];
    for &cp in tokens {
        match char::from_u32(cp) {
            Some(ch) => out.extend_from_slice(ch.encode_utf16(&mut buf)),
            None if SURROGATES.contains(&cp) => out.push(cp as u16),
            None => out.push(0xFFFD),
        }
    }
    out
}

/// Parse one hexadecimal token such as `1F600` into a scalar value
pub fn parse_code_point(token: &str) -> EmojiResult<CodePoint> {
    let value = u32::from_str_radix(token, 16).map_err(|err| EmojiError::InvalidSequence {
        sequence: token.to_string(),
        reason: err.to_string(),
    })?;

    if char::from_u32(value).is_none() {
        return Err(EmojiError::InvalidSequence {
            sequence: token.to_string(),
            reason: format!("U+{value:04X} is not a Unicode scalar value"),
        });
    }

    Ok(value)
}

/// Parse a whitespace separated hex sequence, dropping malformed tokens.
///
/// Every dropped token is logged; the caller decides what an empty result means.
pub fn parse_sequence(raw: &str) -> Vec<CodePoint> {
    raw.split_whitespace()
        .filter_map(|token| match parse_code_point(token) {
            Ok(cp) => Some(cp),
            Err(err) => {
                log::warn!("Dropping malformed code point in '{}': {}", raw, err);
                None
            }
        })
        .collect()
}

/// Format tokens in the canonical manifest form, e.g. `1F469 200D 1F4BB`
pub fn format_sequence(tokens: &[CodePoint]) -> String {
    tokens
        .iter()
        .map(|cp| format!("{cp:04X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hands out consecutive private-use code points in manifest order
#[derive(Debug, Clone)]
pub struct PrivateUseAllocator {
    next: CodePoint,
    end: CodePoint,
    allocated: usize,
}

impl PrivateUseAllocator {
    /// Start allocating at `base`, staying inside the plane that contains it
    pub fn new(base: CodePoint) -> Self {
        let end = if PRIVATE_USE_B.contains(&base) {
            *PRIVATE_USE_B.end()
        } else {
            PRIVATE_USE_END
        };
        Self {
            next: base,
            end,
            allocated: 0,
        }
    }

    /// Take the next code point
    pub fn allocate(&mut self) -> EmojiResult<CodePoint> {
        if self.next > self.end || self.next == 0 {
            return Err(EmojiError::PrivateUseExhausted {
                allocated: self.allocated,
            });
        }
        let cp = self.next;
        self.next += 1;
        self.allocated += 1;
        Ok(cp)
    }

    /// Number of code points handed out so far
    #[inline]
    pub fn allocated(&self) -> usize {
        self.allocated
    }
}

impl Default for PrivateUseAllocator {
    fn default() -> Self {
        Self::new(PRIVATE_USE_BASE)
    }
}
