//! Title and description derivation for entries created without them.

/// Fallback title when content has no usable first line.
pub const DEFAULT_TITLE: &str = "Untitled Entry";
/// Fallback description when content has nothing after the title line.
pub const DEFAULT_DESCRIPTION: &str = "Entry content";
/// Maximum description length, in chars.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

const MAX_TITLE_CHARS: usize = 100;
const SUMMARY_LINES: usize = 3;

/// Derive a title from the first line of `content`.
///
/// Leading `#` heading markers are stripped. Titles over 100 chars are cut to
/// 100 chars plus `...`.
#[must_use]
pub fn derive_title(content: &str) -> String {
    let first_line = content.trim().lines().next().unwrap_or("").trim();
    let heading = strip_heading_markers(first_line);

    let title = if heading.chars().count() > MAX_TITLE_CHARS {
        format!("{}...", take_chars(heading, MAX_TITLE_CHARS))
    } else {
        heading.to_string()
    };

    let title = title.trim();
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Derive a short description from the lines following the title line.
///
/// HTML tags are removed, up to three non-empty lines are joined, and runs of
/// whitespace collapse to a single space.
#[must_use]
pub fn derive_description(content: &str) -> String {
    let clean = strip_tags(content);
    let lines: Vec<&str> = clean
        .trim()
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .take(SUMMARY_LINES)
        .collect();

    if lines.is_empty() {
        return DEFAULT_DESCRIPTION.to_string();
    }

    let summary = collapse_whitespace(&lines.join(" "));
    truncate_description(&summary)
}

/// Cut `text` to 197 chars plus `...` when it exceeds 200 chars.
#[must_use]
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        format!("{}...", take_chars(text, MAX_DESCRIPTION_CHARS - 3))
    } else {
        text.to_string()
    }
}

/// Remove anything between `<` and `>`, tags included.
#[must_use]
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn strip_heading_markers(line: &str) -> &str {
    let without_hashes = line.trim_start_matches('#');
    if without_hashes.len() == line.len() {
        line
    } else {
        without_hashes.trim_start()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn take_chars(text: &str, n: usize) -> &str {
    text.char_indices().nth(n).map_or(text, |(idx, _)| &text[..idx])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("# Hello World\n\nBody", "Hello World")]
    #[case("### Deep heading", "Deep heading")]
    #[case("\n\n  Plain first line\nsecond", "Plain first line")]
    #[case("", "Untitled Entry")]
    #[case("###", "Untitled Entry")]
    fn titles(#[case] content: &str, #[case] expected: &str) {
        assert_eq!(derive_title(content), expected);
    }

    #[test]
    fn long_title_is_truncated_with_ellipsis() {
        let content = "a".repeat(150);
        let title = derive_title(&content);
        assert_eq!(title.chars().count(), 103);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn description_skips_title_and_takes_three_lines() {
        let content = "# Title\n\nline one\n\nline   two\nline three\nline four";
        assert_eq!(derive_description(content), "line one line two line three");
    }

    #[test]
    fn description_strips_tags() {
        let content = "Title\n<p>Some <b>bold</b> text</p>";
        assert_eq!(derive_description(content), "Some bold text");
    }

    #[test]
    fn description_defaults_when_only_title() {
        assert_eq!(derive_description("# Only a title"), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn long_description_is_cut_to_200_chars() {
        let content = format!("Title\n{}", "word ".repeat(100));
        let description = derive_description(&content);
        assert_eq!(description.chars().count(), 200);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let text = "é".repeat(250);
        let cut = truncate_description(&text);
        assert_eq!(cut.chars().count(), 200);
    }
}
