//! Greedy packing of units under a size ceiling.
//!
//! Paragraphs, sentences and lines are all packed by the same routine:
//! accumulate whole units while the joined text still fits, emit, restart.
//! A unit that cannot fit even on its own is handed back untouched so the
//! caller can descend to the next level.

use crate::measure::SizeMode;

/// One output of [`pack_units`], in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packed<'a> {
    /// Consecutive units joined with the joiner; measures at most the limit
    Fits(String),

    /// A single unit whose own size exceeds the limit
    Oversized(&'a str),
}

/// Pack `units` into chunks no larger than `limit` under `mode`.
///
/// The limit is inclusive. Units are never reordered, and an oversized unit
/// first flushes whatever was accumulated before it.
pub fn pack_units<'a, I>(units: I, joiner: &str, limit: usize, mode: SizeMode) -> Vec<Packed<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut packed = Vec::new();
    let mut current = String::new();

    for unit in units {
        let prospective = if current.is_empty() {
            unit.to_string()
        } else {
            format!("{}{}{}", current, joiner, unit)
        };

        if mode.measure(&prospective) <= limit {
            current = prospective;
            continue;
        }

        if !current.is_empty() {
            packed.push(Packed::Fits(std::mem::take(&mut current)));
        }

        if mode.measure(unit) > limit {
            packed.push(Packed::Oversized(unit));
        } else {
            current = unit.to_string();
        }
    }

    if !current.is_empty() {
        packed.push(Packed::Fits(current));
    }

    packed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fits(text: &str) -> Packed<'static> {
        Packed::Fits(text.to_string())
    }

    #[test]
    fn test_pack_everything_fits() {
        let packed = pack_units(["a", "b", "c"], " ", 100, SizeMode::Chars);
        assert_eq!(packed, vec![fits("a b c")]);
    }

    #[test]
    fn test_pack_limit_is_inclusive() {
        // "aaaa bbbb" is exactly 9 characters
        let packed = pack_units(["aaaa", "bbbb"], " ", 9, SizeMode::Chars);
        assert_eq!(packed, vec![fits("aaaa bbbb")]);

        let packed = pack_units(["aaaa", "bbbb"], " ", 8, SizeMode::Chars);
        assert_eq!(packed, vec![fits("aaaa"), fits("bbbb")]);
    }

    #[test]
    fn test_pack_oversized_unit_flushes_and_passes_through() {
        let units = ["one", "two", "this unit is far too long", "six"];
        let packed = pack_units(units, "\n", 8, SizeMode::Chars);
        assert_eq!(
            packed,
            vec![
                fits("one\ntwo"),
                Packed::Oversized("this unit is far too long"),
                fits("six"),
            ]
        );
    }

    #[test]
    fn test_pack_oversized_first_unit() {
        let packed = pack_units(["xxxxxxxxxx", "y"], " ", 5, SizeMode::Chars);
        assert_eq!(packed, vec![Packed::Oversized("xxxxxxxxxx"), fits("y")]);
    }

    #[test]
    fn test_pack_joiner_counts_toward_size() {
        // Each unit is 4 chars; the blank-line joiner adds 2
        let packed = pack_units(["aaaa", "bbbb", "cccc"], "\n\n", 10, SizeMode::Chars);
        assert_eq!(packed, vec![fits("aaaa\n\nbbbb"), fits("cccc")]);
    }

    #[test]
    fn test_pack_token_mode() {
        // 16 chars = 4 tokens; joined with a space = 33 chars = 9 tokens
        let a = "a".repeat(16);
        let b = "b".repeat(16);
        let packed = pack_units([a.as_str(), b.as_str()], " ", 8, SizeMode::Tokens);
        assert_eq!(packed, vec![Packed::Fits(a.clone()), Packed::Fits(b.clone())]);

        let packed = pack_units([a.as_str(), b.as_str()], " ", 9, SizeMode::Tokens);
        assert_eq!(packed, vec![Packed::Fits(format!("{} {}", a, b))]);
    }

    #[test]
    fn test_pack_empty_input() {
        let packed = pack_units(std::iter::empty(), " ", 10, SizeMode::Chars);
        assert!(packed.is_empty());
    }
}
