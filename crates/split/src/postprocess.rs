//! Per-chunk cleanup after splitting.
//!
//! Steps run in a fixed order on every raw chunk: prefixed-line removal,
//! title removal, then the minimum-size filter. Chunks emptied by the first
//! two steps are dropped outright; chunks below the minimum stay in the
//! sequence marked as discarded.

use serde::{Deserialize, Serialize};

use crate::measure::{estimate_tokens, SizeMode};
use crate::splitter::{RawChunk, SplitLevel};

/// Why a chunk was excluded from the kept output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    TooSmall,
}

/// A post-processed chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Final chunk text
    pub text: String,

    /// Size of `text` in the configured unit
    pub size: usize,

    /// Whether the chunk survives into the output
    pub kept: bool,

    /// Set when `kept` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discard_reason: Option<DiscardReason>,

    /// Cascade level that produced the chunk
    pub level: SplitLevel,

    /// The chunk is a single line over the size limit
    pub oversized: bool,
}

/// Result of post-processing a raw chunk sequence.
#[derive(Debug, Clone, Default)]
pub struct Processed {
    /// Kept and discarded chunks in document order
    pub chunks: Vec<Chunk>,

    /// Chunks dropped because nothing was left after line/title removal
    pub emptied: usize,
}

/// Cleanup settings, all optional.
#[derive(Debug, Clone)]
pub struct PostProcessor {
    pub mode: SizeMode,
    pub min_size: Option<usize>,
    pub remove_title_max_tokens: Option<usize>,
    pub remove_line_prefix: Option<String>,
}

impl PostProcessor {
    /// A post-processor that only measures chunks.
    pub fn new(mode: SizeMode) -> Self {
        Self {
            mode,
            min_size: None,
            remove_title_max_tokens: None,
            remove_line_prefix: None,
        }
    }

    /// Run every cleanup step over `raw`, preserving order.
    pub fn process(&self, raw: Vec<RawChunk>) -> Processed {
        let mut processed = Processed::default();

        for chunk in raw {
            match self.process_one(chunk) {
                Some(chunk) => processed.chunks.push(chunk),
                None => processed.emptied += 1,
            }
        }

        processed
    }

    fn process_one(&self, raw: RawChunk) -> Option<Chunk> {
        let mut text = raw.text;

        if let Some(ref prefix) = self.remove_line_prefix {
            text = remove_prefixed_lines(&text, prefix);
        }

        if let Some(max_tokens) = self.remove_title_max_tokens {
            if let Some(rest) = strip_leading_title(&text, max_tokens) {
                tracing::trace!("Removed leading title from chunk");
                text = rest.to_string();
            }
        }

        if text.is_empty() {
            return None;
        }

        let size = self.mode.measure(&text);
        let too_small = self.min_size.is_some_and(|min| size < min);

        Some(Chunk {
            text,
            size,
            kept: !too_small,
            discard_reason: too_small.then_some(DiscardReason::TooSmall),
            level: raw.level,
            oversized: raw.oversized,
        })
    }
}

/// Drop every line whose left-trimmed text starts with `prefix`.
///
/// Remaining lines are joined with `\n`. Only the newlines left at either
/// end are trimmed, so indentation on the first kept line survives. Blank
/// lines around a removed line stay, which can leave three newlines in a
/// row inside the chunk.
pub fn remove_prefixed_lines(text: &str, prefix: &str) -> String {
    let kept: Vec<&str> = text
        .split('\n')
        .filter(|line| !line.trim_start().starts_with(prefix))
        .collect();

    let joined = kept.join("\n");
    let joined = joined.trim_matches('\n');
    if joined.trim().is_empty() {
        return String::new();
    }
    joined.to_string()
}

/// Return the text after a leading title, if there is one.
///
/// A title is a non-empty first line followed by a blank line whose
/// estimated token count is at most `max_tokens`.
pub fn strip_leading_title(text: &str, max_tokens: usize) -> Option<&str> {
    let (first_line, rest) = text.split_once('\n')?;
    let after_blank = rest.strip_prefix('\n')?;

    let title = first_line.trim();
    if title.is_empty() || estimate_tokens(title) > max_tokens {
        return None;
    }

    Some(after_blank.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> RawChunk {
        RawChunk {
            text: text.to_string(),
            level: SplitLevel::Paragraph,
            oversized: false,
        }
    }

    #[test]
    fn test_remove_prefixed_lines() {
        let text = "[note] skip me\nKeep this line\n[other] skip too";
        assert_eq!(remove_prefixed_lines(text, "["), "Keep this line");
    }

    #[test]
    fn test_remove_prefixed_lines_left_trims() {
        let text = "keep\n    # indented comment\nalso keep";
        assert_eq!(remove_prefixed_lines(text, "#"), "keep\nalso keep");
    }

    #[test]
    fn test_remove_prefixed_lines_keeps_indentation() {
        assert_eq!(remove_prefixed_lines("[x]\n    code", "["), "    code");
        assert_eq!(remove_prefixed_lines("  first\n[x]", "["), "  first");
    }

    #[test]
    fn test_remove_prefixed_lines_keeps_surrounding_blank_lines() {
        assert_eq!(remove_prefixed_lines("A\n\n[x]\n\nB", "["), "A\n\n\nB");
    }

    #[test]
    fn test_remove_prefixed_lines_whitespace_only_is_empty() {
        assert_eq!(remove_prefixed_lines("[a]\n   \n[b]", "["), "");
    }

    #[test]
    fn test_remove_prefixed_lines_all_removed() {
        assert_eq!(remove_prefixed_lines("[a]\n[b]", "["), "");
    }

    #[test]
    fn test_strip_leading_title() {
        let text = "CHAPTER 1\n\nThe rest of the text...";
        assert_eq!(strip_leading_title(text, 5), Some("The rest of the text..."));
    }

    #[test]
    fn test_strip_leading_title_too_long() {
        // 28 chars = 7 estimated tokens
        let text = "A Much Longer Chapter Header\n\nBody.";
        assert_eq!(strip_leading_title(text, 5), None);
        assert_eq!(strip_leading_title(text, 7), Some("Body."));
    }

    #[test]
    fn test_strip_leading_title_needs_blank_line() {
        assert_eq!(strip_leading_title("CHAPTER 1\nThe rest", 5), None);
        assert_eq!(strip_leading_title("CHAPTER 1", 5), None);
    }

    #[test]
    fn test_title_measured_in_tokens_in_char_mode() {
        let processor = PostProcessor {
            remove_title_max_tokens: Some(5),
            ..PostProcessor::new(SizeMode::Chars)
        };
        let processed = processor.process(vec![raw("CHAPTER 1\n\nThe rest of the text...")]);
        assert_eq!(processed.chunks[0].text, "The rest of the text...");
        assert_eq!(processed.chunks[0].size, 23);
    }

    #[test]
    fn test_min_size_discard() {
        let processor = PostProcessor {
            min_size: Some(50),
            ..PostProcessor::new(SizeMode::Chars)
        };
        let long = "y".repeat(60);
        let processed = processor.process(vec![raw("ten chars!"), raw(&long)]);

        assert_eq!(processed.chunks.len(), 2);
        assert!(!processed.chunks[0].kept);
        assert_eq!(processed.chunks[0].discard_reason, Some(DiscardReason::TooSmall));
        assert_eq!(processed.chunks[0].size, 10);
        assert!(processed.chunks[1].kept);
        assert_eq!(processed.chunks[1].discard_reason, None);
    }

    #[test]
    fn test_min_size_measured_after_title_removal() {
        let processor = PostProcessor {
            min_size: Some(10),
            remove_title_max_tokens: Some(5),
            ..PostProcessor::new(SizeMode::Chars)
        };
        let processed = processor.process(vec![raw("CHAPTER 1\n\nShort.")]);
        assert_eq!(processed.chunks[0].text, "Short.");
        assert!(!processed.chunks[0].kept);
    }

    #[test]
    fn test_prefix_removal_runs_before_title_removal() {
        let processor = PostProcessor {
            remove_line_prefix: Some("[".to_string()),
            remove_title_max_tokens: Some(5),
            ..PostProcessor::new(SizeMode::Chars)
        };
        let processed = processor.process(vec![raw("[page 3]\nPART II\n\nThe body text.")]);
        assert_eq!(processed.chunks[0].text, "The body text.");
    }

    #[test]
    fn test_emptied_chunks_are_dropped() {
        let processor = PostProcessor {
            remove_line_prefix: Some("[".to_string()),
            ..PostProcessor::new(SizeMode::Chars)
        };
        let processed = processor.process(vec![raw("[only]\n[prefixed]"), raw("body")]);
        assert_eq!(processed.emptied, 1);
        assert_eq!(processed.chunks.len(), 1);
        assert_eq!(processed.chunks[0].text, "body");
    }

    #[test]
    fn test_chunk_metadata_carried_over() {
        let processor = PostProcessor::new(SizeMode::Tokens);
        let processed = processor.process(vec![RawChunk {
            text: "x".repeat(9),
            level: SplitLevel::Line,
            oversized: true,
        }]);
        let chunk = &processed.chunks[0];
        assert_eq!(chunk.size, 3);
        assert_eq!(chunk.level, SplitLevel::Line);
        assert!(chunk.oversized);
        assert!(chunk.kept);
    }
}
