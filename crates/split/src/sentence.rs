//! Sentence boundary detection.

use crate::policy::SplitPolicy;

/// Split `text` into trimmed, non-empty sentences.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace. A period that
/// closes a token listed as an abbreviation in `policy` is not a boundary.
/// Terminal punctuation stays with its sentence.
pub fn split_sentences<'a>(text: &'a str, policy: &SplitPolicy) -> Vec<&'a str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }

        let followed_by_space = matches!(chars.peek(), Some((_, next)) if next.is_whitespace());
        if !followed_by_space {
            continue;
        }

        let end = idx + c.len_utf8();
        if c == '.' && policy.is_abbreviation(last_token(&text[start..end])) {
            continue;
        }

        push_trimmed(&mut sentences, &text[start..end]);
        start = end;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

/// The whitespace-delimited word at the end of `text`.
fn last_token(text: &str) -> &str {
    text.rsplit(char::is_whitespace).next().unwrap_or(text)
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
