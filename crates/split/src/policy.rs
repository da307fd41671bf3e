//! Boundary heuristics used by the splitter.
//!
//! Delimiters and the abbreviation list live in one value that is passed
//! into the splitter explicitly, so a different locale only needs a
//! different [`SplitPolicy`].

/// Abbreviations whose trailing period never ends a sentence.
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Sr.", "Jr.", "St.", "Mt.", "vs.", "e.g.", "i.e.",
];

/// Boundary rules for sections, paragraphs and sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPolicy {
    /// Minimum run of consecutive newlines that separates sections
    pub section_break_newlines: usize,

    /// Separator between paragraphs; also used to join packed paragraphs
    pub paragraph_delimiter: String,

    /// Tokens (including the trailing period) that do not end a sentence
    pub abbreviations: Vec<String>,

    /// Treat a single letter followed by a period ("A.") as an initial
    pub single_letter_initials: bool,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            section_break_newlines: 3,
            paragraph_delimiter: "\n\n".to_string(),
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
            single_letter_initials: true,
        }
    }
}

impl SplitPolicy {
    /// Check whether `token` (a whitespace-delimited word ending in a
    /// period) is an abbreviation rather than the end of a sentence.
    ///
    /// Leading opening punctuation such as `(` or `"` is ignored; the rest
    /// must match exactly, case-sensitive.
    pub fn is_abbreviation(&self, token: &str) -> bool {
        let word = token.trim_start_matches(|c: char| !c.is_alphanumeric());

        if self.abbreviations.iter().any(|a| a == word) {
            return true;
        }

        if self.single_letter_initials {
            let mut chars = word.chars();
            if let (Some(letter), Some('.'), None) = (chars.next(), chars.next(), chars.next()) {
                return letter.is_alphabetic();
            }
        }

        false
    }
}
