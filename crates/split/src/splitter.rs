//! Hierarchical splitter: section → paragraph → sentence → line.
//!
//! Each level only runs on units the level above could not fit under the
//! size limit. Content is never reordered; the splitter only decides where
//! to cut.

use serde::{Deserialize, Serialize};

use crate::measure::SizeMode;
use crate::packing::{pack_units, Packed};
use crate::policy::SplitPolicy;
use crate::sentence::split_sentences;

/// Joiner for packed sentences.
const SENTENCE_JOINER: &str = " ";

/// Joiner for packed lines.
const LINE_JOINER: &str = "\n";

/// Cascade level that produced a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitLevel {
    Paragraph,
    Sentence,
    Line,
}

/// A chunk as produced by the splitter, before post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk {
    pub text: String,
    pub level: SplitLevel,
    /// A single line that exceeds the limit and could not be split further
    pub oversized: bool,
}

impl RawChunk {
    fn packed(text: String, level: SplitLevel) -> Self {
        Self {
            text,
            level,
            oversized: false,
        }
    }
}

/// Size-bounded hierarchical splitter.
#[derive(Debug, Clone)]
pub struct Splitter {
    limit: usize,
    mode: SizeMode,
    policy: SplitPolicy,
}

impl Splitter {
    pub fn new(limit: usize, mode: SizeMode, policy: SplitPolicy) -> Self {
        Self {
            limit,
            mode,
            policy,
        }
    }

    /// Split a whole document into raw chunks, in document order.
    ///
    /// `\r\n` line endings are normalized first. An empty or
    /// whitespace-only document yields no chunks.
    pub fn split(&self, document: &str) -> Vec<RawChunk> {
        let normalized = document.replace("\r\n", "\n");
        let mut chunks = Vec::new();

        for section in split_sections(normalized.trim(), self.policy.section_break_newlines) {
            self.split_section(section, &mut chunks);
        }

        tracing::debug!(
            "Split {} bytes into {} raw chunks (limit: {} {})",
            document.len(),
            chunks.len(),
            self.limit,
            self.mode.unit_label()
        );

        chunks
    }

    /// Pack the paragraphs of one section.
    fn split_section(&self, section: &str, out: &mut Vec<RawChunk>) {
        let delimiter = self.policy.paragraph_delimiter.as_str();
        let paragraphs = non_empty_trimmed(section.split(delimiter));

        for packed in pack_units(paragraphs, delimiter, self.limit, self.mode) {
            match packed {
                Packed::Fits(text) => out.push(RawChunk::packed(text, SplitLevel::Paragraph)),
                Packed::Oversized(paragraph) => self.split_paragraph(paragraph, out),
            }
        }
    }

    /// Pack the sentences of a paragraph that did not fit on its own.
    fn split_paragraph(&self, paragraph: &str, out: &mut Vec<RawChunk>) {
        let sentences = split_sentences(paragraph, &self.policy);

        for packed in pack_units(sentences, SENTENCE_JOINER, self.limit, self.mode) {
            match packed {
                Packed::Fits(text) => out.push(RawChunk::packed(text, SplitLevel::Sentence)),
                Packed::Oversized(sentence) => self.split_lines(sentence, out),
            }
        }
    }

    /// Pack the lines of a sentence that did not fit on its own.
    ///
    /// A line that still exceeds the limit is emitted whole.
    fn split_lines(&self, sentence: &str, out: &mut Vec<RawChunk>) {
        let lines = non_empty_trimmed(sentence.split('\n'));

        for packed in pack_units(lines, LINE_JOINER, self.limit, self.mode) {
            match packed {
                Packed::Fits(text) => out.push(RawChunk::packed(text, SplitLevel::Line)),
                Packed::Oversized(line) => {
                    tracing::warn!(
                        "Emitting oversized line of {} {} (limit: {})",
                        self.mode.measure(line),
                        self.mode.unit_label(),
                        self.limit
                    );
                    out.push(RawChunk {
                        text: line.to_string(),
                        level: SplitLevel::Line,
                        oversized: true,
                    });
                }
            }
        }
    }
}

/// Split on runs of at least `min_newlines` consecutive newlines.
///
/// Sections are trimmed and empty ones dropped.
pub fn split_sections(text: &str, min_newlines: usize) -> Vec<&str> {
    let min_newlines = min_newlines.max(1);
    let mut sections = Vec::new();
    let mut start = 0;
    let mut run_start = 0;
    let mut run_len = 0;

    for (idx, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            if run_len == 0 {
                run_start = idx;
            }
            run_len += 1;
            continue;
        }

        if run_len >= min_newlines {
            sections.push(&text[start..run_start]);
            start = idx;
        }
        run_len = 0;
    }
    sections.push(&text[start..]);

    non_empty_trimmed(sections).collect()
}

fn non_empty_trimmed<'a, I>(pieces: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}
