//! Size measurement for chunks.
//!
//! Every splitting level and the minimum-size filter measure text through
//! [`SizeMode`], so switching between characters and estimated tokens never
//! touches the splitting logic.

use serde::{Deserialize, Serialize};

/// Fixed characters-per-token ratio used for token estimates.
pub const CHARS_PER_TOKEN: usize = 4;

/// Unit in which chunk sizes are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    /// Unicode scalar values
    Chars,

    /// Estimated language-model tokens
    Tokens,
}

impl SizeMode {
    /// Measure `text` in this mode's unit.
    pub fn measure(&self, text: &str) -> usize {
        match self {
            SizeMode::Chars => char_count(text),
            SizeMode::Tokens => estimate_tokens(text),
        }
    }

    /// Human-readable unit label used in reports and the debug dump.
    pub fn unit_label(&self) -> &'static str {
        match self {
            SizeMode::Chars => "characters",
            SizeMode::Tokens => "tokens (est.)",
        }
    }
}

/// Number of characters (code points) in `text`.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Estimate the token count of `text` as `ceil(chars / 4)`.
pub fn estimate_tokens(text: &str) -> usize {
    char_count(text).div_ceil(CHARS_PER_TOKEN)
}
