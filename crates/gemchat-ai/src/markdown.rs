//! Cleanup applied to model answers before they are shown or recorded.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("static regex pattern must compile"));

/// Remove markdown bold markers (`**x**` becomes `x`) and trim.
///
/// Matching is non-greedy and does not cross line breaks.
pub fn strip_bold(text: &str) -> String {
    BOLD_RE.replace_all(text, "$1").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_bold() {
        assert_eq!(strip_bold("**Hi** there"), "Hi there");
    }

    #[test]
    fn strips_every_pair() {
        assert_eq!(strip_bold("**a** and **b**"), "a and b");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(strip_bold("\n  **Note:** done \n"), "Note: done");
    }

    #[test]
    fn leaves_single_asterisks() {
        assert_eq!(strip_bold("*italic* and 2 * 3"), "*italic* and 2 * 3");
    }

    #[test]
    fn does_not_span_lines() {
        assert_eq!(strip_bold("**open\nclose**"), "**open\nclose**");
    }

    #[test]
    fn unpaired_marker_is_kept() {
        assert_eq!(strip_bold("**a** b **c"), "a b **c");
    }
}
