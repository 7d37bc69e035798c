//! Width-aware truncation and wrapping.
//!
//! Both operations scan words greedily: a line is the longest prefix that
//! fits the budget and ends at whitespace or at the end of the text. Widths
//! are counted in `char`s. Lines never cross a newline in the input.

/// Appended when [`truncate`] drops text. Not counted against the budget.
pub const ELLIPSIS: &str = "...";

/// Shorten `text` to fit `columns - reserved` characters, cutting at a word
/// boundary and appending [`ELLIPSIS`] when anything was dropped.
///
/// If not even the first word fits, the result is just the ellipsis. The
/// ellipsis itself may take the line up to three characters past the budget.
pub fn truncate(text: &str, reserved: usize, columns: usize) -> String {
    let limit = columns.saturating_sub(reserved);
    let (head, rest) = text.split_at(fit_prefix(text, limit));

    let mut result = head.trim_end().to_string();
    if !rest.trim().is_empty() {
        result.push_str(ELLIPSIS);
    }
    result
}

/// Wrap `text` to `columns - level - 1` characters per line, prefixing each
/// line with `level` spaces.
///
/// Runs of blank lines collapse to a single blank line. A word longer than
/// the budget gets a line of its own and overflows it rather than being split.
pub fn indent(text: &str, level: usize, columns: usize) -> String {
    let text = collapse_blank_lines(text);
    let width = columns.saturating_sub(level + 1);
    let pad = " ".repeat(level);

    let mut lines = Vec::new();
    let mut rest = text.as_str();
    while !rest.is_empty() {
        let end = match fit_prefix(rest, width) {
            0 if !rest.starts_with(char::is_whitespace) => {
                rest.find(char::is_whitespace).unwrap_or(rest.len())
            }
            end => end,
        };
        let (line, tail) = rest.split_at(end);
        lines.push(format!("{}{}", pad, line.trim_end()));
        rest = skip_one_whitespace(tail);
    }

    if lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Byte offset of the longest prefix of at most `limit` chars that ends at
/// whitespace or end of text without crossing a newline. Zero when only the
/// empty prefix qualifies.
fn fit_prefix(text: &str, limit: usize) -> usize {
    let mut best = 0;
    let mut count = 0;
    for (idx, ch) in text.char_indices() {
        if count > limit {
            return best;
        }
        if ch.is_whitespace() {
            best = idx;
        }
        if ch == '\n' {
            return best;
        }
        count += 1;
    }
    if count <= limit {
        text.len()
    } else {
        best
    }
}

fn skip_one_whitespace(text: &str) -> &str {
    let mut chars = text.chars();
    match chars.next() {
        Some(ch) if ch.is_whitespace() => chars.as_str(),
        _ => text,
    }
}

/// Collapse three or more consecutive newlines to exactly two.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("Fix the build", 0, 80), "Fix the build");
    }

    #[test]
    fn test_truncate_exact_fit_unchanged() {
        // 20 chars into a 20-char budget
        assert_eq!(truncate("Exactly twenty chars", 60, 80), "Exactly twenty chars");
    }

    #[test]
    fn test_truncate_cuts_at_word_boundary() {
        let result = truncate("the quick brown fox jumps", 0, 15);
        assert_eq!(result, "the quick brown...");
    }

    #[test]
    fn test_truncate_boundary_space_just_past_limit() {
        // "the quick" is 9 chars and the space follows at index 9
        assert_eq!(truncate("the quick brown", 71, 80), "the quick...");
    }

    #[test]
    fn test_truncate_ellipsis_not_counted_against_budget() {
        let result = truncate("aaaa bbbb cccc", 0, 9);
        assert_eq!(result, "aaaa bbbb...");
        assert!(result.chars().count() <= 9 + ELLIPSIS.len());
    }

    #[test]
    fn test_truncate_zero_budget_is_ellipsis_only() {
        assert_eq!(truncate("something long", 80, 80), "...");
        assert_eq!(truncate("something long", 200, 80), "...");
    }

    #[test]
    fn test_truncate_overlong_first_word_is_ellipsis_only() {
        assert_eq!(truncate("Supercalifragilistic word", 0, 5), "...");
    }

    #[test]
    fn test_truncate_empty_input() {
        assert_eq!(truncate("", 0, 80), "");
        assert_eq!(truncate("", 100, 80), "");
    }

    #[test]
    fn test_truncate_trailing_whitespace_is_not_a_cut() {
        assert_eq!(truncate("done   ", 0, 80), "done");
    }

    #[test]
    fn test_truncate_stops_at_newline() {
        assert_eq!(truncate("first line\nsecond", 0, 80), "first line...");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // Multi-byte chars count once each
        assert_eq!(truncate("日本語 日本語 日本語", 0, 7), "日本語 日本語...");
    }

    #[test]
    fn test_truncate_never_exceeds_budget_plus_ellipsis() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod";
        for columns in 0..80 {
            for reserved in 0..20 {
                let out = truncate(text, reserved, columns);
                let limit = columns.saturating_sub(reserved);
                assert!(
                    out.chars().count() <= limit + ELLIPSIS.len(),
                    "columns={} reserved={} out={:?}",
                    columns,
                    reserved,
                    out
                );
            }
        }
    }

    #[test]
    fn test_indent_wraps_and_prefixes() {
        let out = indent("one two three four", 2, 12);
        // width = 12 - 2 - 1 = 9
        assert_eq!(out, "  one two\n  three\n  four");
    }

    #[test]
    fn test_indent_default_level() {
        assert_eq!(indent("hello", 4, 80), "    hello");
    }

    #[test]
    fn test_indent_keeps_single_blank_line() {
        assert_eq!(indent("a\n\nb", 0, 80), "a\n\nb");
    }

    #[test]
    fn test_indent_collapses_blank_line_runs() {
        assert_eq!(indent("a\n\n\n\n\nb", 0, 80), "a\n\nb");
    }

    #[test]
    fn test_indent_blank_lines_still_prefixed() {
        assert_eq!(indent("a\n\nb", 2, 80), "  a\n  \n  b");
    }

    #[test]
    fn test_indent_drops_trailing_blank_line() {
        assert_eq!(indent("a\n\n", 4, 80), "    a");
        assert_eq!(indent("a\n", 4, 80), "    a");
    }

    #[test]
    fn test_indent_overlong_word_gets_own_line() {
        let out = indent("hi extraordinarily ok", 0, 6);
        assert_eq!(out, "hi\nextraordinarily\nok");
    }

    #[test]
    fn test_indent_empty_input() {
        assert_eq!(indent("", 4, 80), "");
    }

    #[test]
    fn test_indent_is_idempotent_on_collapsed_text() {
        let text = "para one\n\n\n\npara two\n\npara three";
        let once = indent(text, 0, 80);
        let twice = indent(&once, 0, 80);
        assert_eq!(once, twice);
        assert_eq!(once.matches("\n\n").count(), 2);
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\nb\n\nc\nd"), "a\n\nb\n\nc\nd");
    }
}
