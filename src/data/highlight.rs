use regex::Regex;

use super::filter::word_tokens;

/// A piece of cell text, tagged with whether it matched a query token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub is_match: bool,
}

impl<'a> Span<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            is_match: false,
        }
    }

    fn hit(text: &'a str) -> Self {
        Self {
            text,
            is_match: true,
        }
    }
}

/// Compiled highlight pattern for one query.
///
/// Tokens always come from the word-split form of the query, also when
/// rows are filtered by exact phrase, so individual word hits stay visible.
///
/// Matching runs on the cell lowercased exactly as the filter lowercases it,
/// so every row the filter keeps shows its hits even where lowercasing
/// changes the text's length (`İ` becomes `i̇`).
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(query: &str) -> Self {
        let mut tokens = word_tokens(query);
        // Longer tokens first so "ab" wins over "a" at the same position.
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        tokens.dedup();

        let pattern = if tokens.is_empty() {
            None
        } else {
            let alternation = tokens
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            match Regex::new(&alternation) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("Highlight pattern rejected, showing plain text: {e}");
                    None
                }
            }
        };

        Self { pattern }
    }

    /// Whether any token is active.
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Split `text` into spans; concatenating them yields `text` exactly.
    pub fn spans<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        let Some(re) = &self.pattern else {
            return vec![Span::plain(text)];
        };

        let (lowered, origin) = fold(text);
        let mut spans = Vec::new();
        let mut last = 0;
        for m in re.find_iter(&lowered) {
            if m.is_empty() {
                continue;
            }
            // Widen to whole characters of the original text.
            let start = origin[m.start()].max(last);
            let tail = origin[m.end() - 1];
            let end = tail + text[tail..].chars().next().map_or(0, char::len_utf8);
            if start >= end {
                continue;
            }
            if start > last {
                spans.push(Span::plain(&text[last..start]));
            }
            spans.push(Span::hit(&text[start..end]));
            last = end;
        }
        if last < text.len() || spans.is_empty() {
            spans.push(Span::plain(&text[last..]));
        }
        spans
    }
}

/// Lowercase `text` and record, for each byte of the result, the byte offset
/// in `text` of the character it came from.
fn fold(text: &str) -> (String, Vec<usize>) {
    let lowered = text.to_lowercase();
    let mut origin = Vec::with_capacity(lowered.len());
    let mut folded = lowered.chars();
    for (at, c) in text.char_indices() {
        for l in folded.by_ref().take(c.to_lowercase().count()) {
            origin.extend(std::iter::repeat(at).take(l.len_utf8()));
        }
    }
    (lowered, origin)
}

/// One-shot form of [`Highlighter::spans`].
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Span<'a>> {
    Highlighter::new(query).spans(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_empty_query_is_single_plain_span() {
        let spans = highlight("Alice", "");
        assert_eq!(spans, vec![Span::plain("Alice")]);

        let spans = highlight("", "   ");
        assert_eq!(spans, vec![Span::plain("")]);
    }

    #[test]
    fn test_matches_keep_original_case() {
        let spans = highlight("Alice Smith", "smith ali");
        assert_eq!(
            spans,
            vec![Span::hit("Ali"), Span::plain("ce "), Span::hit("Smith")]
        );
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let text = "cost (USD) $5.00 [est] a+b*c";
        for query in ["(", "$5.00", "[est]", "a+b*c", "\\", "|", ".*"] {
            let spans = highlight(text, query);
            assert_eq!(joined(&spans), text, "query {query:?}");
        }
        let spans = highlight(text, "$5.00");
        assert!(spans.contains(&Span::hit("$5.00")));
        // "." must not match arbitrary characters.
        assert!(highlight("abc", ".").iter().all(|s| !s.is_match));
    }

    #[test]
    fn test_spans_reconstruct_text() {
        let cases = [
            ("Bob Jones", "o"),
            ("Straße München", "STRASSE ü"),
            ("aaaa", "a aa"),
            ("no hit here", "zzz"),
            ("", "x"),
        ];
        for (text, query) in cases {
            assert_eq!(joined(&highlight(text, query)), text);
        }
    }

    #[test]
    fn test_hits_where_lowercase_changes_length() {
        let spans = highlight("İzmir", "İ");
        assert_eq!(spans, vec![Span::hit("İ"), Span::plain("zmir")]);

        let spans = highlight("İzmir", "i");
        assert_eq!(
            spans,
            vec![Span::hit("İ"), Span::plain("zm"), Span::hit("i"), Span::plain("r")]
        );

        let spans = highlight("KELVIN \u{212A}", "k");
        assert_eq!(joined(&spans), "KELVIN \u{212A}");
        assert_eq!(spans.iter().filter(|s| s.is_match).count(), 2);
    }

    #[test]
    fn test_every_filtered_cell_shows_a_hit() {
        use crate::data::filter::row_matches;

        for (cell, query) in [
            ("İzmir", "i\u{307}zmir"),
            ("ΟΔΟΣ", "οδο\u{3C2}"),
            ("Straße", "STRASSE"),
            ("\u{1C5}emal", "\u{1C6}"),
            ("Alice", "LICE"),
        ] {
            let row = vec![cell.to_string()];
            let tokens = word_tokens(query);
            let spans = highlight(cell, query);
            assert_eq!(joined(&spans), cell);
            assert_eq!(
                row_matches(&row, &tokens),
                spans.iter().any(|s| s.is_match),
                "cell {cell:?} query {query:?}"
            );
        }
    }

    #[test]
    fn test_longer_token_preferred() {
        let spans = highlight("abc", "a ab");
        assert_eq!(spans, vec![Span::hit("ab"), Span::plain("c")]);
    }

    #[test]
    fn test_word_tokens_even_for_phrase_queries() {
        let h = Highlighter::new("new york");
        assert!(h.is_active());
        let spans = h.spans("York, New");
        assert_eq!(
            spans.iter().filter(|s| s.is_match).count(),
            2,
            "each word highlights independently"
        );
    }

    mod property_tests {
        use super::*;
        use crate::data::filter::row_matches;
        use proptest::prelude::*;

        /// Mixed-case text including letters whose lowercase form is longer.
        fn text_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                "\\PC{0,16}",
                "[aAiIİßẞΣσςK\u{212A} .$]{0,16}",
            ]
        }

        fn query_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                "\\PC{0,6}",
                "[aAiIİßΣσK .$]{0,4}",
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(300))]

            #[test]
            fn prop_spans_rebuild_text(text in text_strategy(), query in query_strategy()) {
                let spans = highlight(&text, &query);
                prop_assert_eq!(joined(&spans), text.clone());
                if spans.len() > 1 {
                    prop_assert!(spans.iter().all(|s| !s.text.is_empty()));
                }
                prop_assert!(spans.windows(2).all(|w| w[0].is_match || w[1].is_match));
            }

            #[test]
            fn prop_filtered_cell_has_a_hit(text in text_strategy(), query in query_strategy()) {
                let tokens = word_tokens(&query);
                let row = vec![text.clone()];
                if !tokens.is_empty() && row_matches(&row, &tokens) {
                    prop_assert!(highlight(&text, &query).iter().any(|s| s.is_match));
                }
            }
        }
    }
}
