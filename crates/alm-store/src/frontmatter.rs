//! YAML frontmatter codec for markdown files.
//!
//! A file with frontmatter starts with a `---` line, followed by a YAML
//! mapping, followed by a second `---` line. Everything after the second
//! delimiter is the markdown body. Only the first block is recognized; later
//! `---` lines are ordinary body text. A block that is never closed runs to
//! the end of the file and leaves the body empty.

use serde_yaml::{Mapping, Value};

use crate::error::StoreError;

const DELIMITER: &str = "---";

/// Split `content` into its frontmatter mapping and trimmed body.
///
/// Content that does not open with a `---` line has no frontmatter: the whole
/// trimmed content is the body. An unclosed block takes every remaining line.
///
/// # Errors
///
/// Returns `StoreError::Frontmatter` if the YAML between the delimiters is
/// malformed or is not a mapping.
pub fn parse(content: &str) -> Result<(Mapping, String), StoreError> {
    let content = content.trim();
    let lines: Vec<&str> = content.lines().collect();

    if lines.first().is_none_or(|first| *first != DELIMITER) {
        return Ok((Mapping::new(), content.to_string()));
    }

    let Some(close) = lines.iter().skip(1).position(|line| *line == DELIMITER) else {
        return Ok((parse_mapping(&lines[1..].join("\n"))?, String::new()));
    };
    let close = close + 1;

    let yaml = lines[1..close].join("\n");
    let body = lines[close + 1..].join("\n");

    Ok((parse_mapping(&yaml)?, body.trim().to_string()))
}

/// Render `frontmatter` and `body` as file content.
///
/// An empty mapping yields the body unchanged.
///
/// # Errors
///
/// Returns `StoreError::Frontmatter` if the mapping cannot be serialized.
pub fn combine(frontmatter: &Mapping, body: &str) -> Result<String, StoreError> {
    if frontmatter.is_empty() {
        return Ok(body.to_string());
    }
    let yaml =
        serde_yaml::to_string(frontmatter).map_err(|e| StoreError::Frontmatter(e.to_string()))?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}

/// The frontmatter part of [`parse`].
///
/// # Errors
///
/// Same as [`parse`].
pub fn extract_frontmatter(content: &str) -> Result<Mapping, StoreError> {
    parse(content).map(|(frontmatter, _)| frontmatter)
}

fn parse_mapping(yaml: &str) -> Result<Mapping, StoreError> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(StoreError::Frontmatter(
            "frontmatter is not a YAML mapping".to_string(),
        )),
        Err(e) => Err(StoreError::Frontmatter(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mapping(pairs: &[(&str, Value)]) -> Mapping {
        pairs
            .iter()
            .map(|(k, v)| (Value::from(*k), v.clone()))
            .collect()
    }

    #[test]
    fn parses_frontmatter_and_body() {
        let content = "---\ntitle: Hello\ntags:\n  - a\n---\n\n# Heading\n\nBody\n";
        let (fm, body) = parse(content).unwrap();
        assert_eq!(fm.get("title"), Some(&Value::from("Hello")));
        assert_eq!(body, "# Heading\n\nBody");
    }

    #[test]
    fn content_without_delimiter_is_all_body() {
        let (fm, body) = parse("\n  # Just markdown\n\nText  \n").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "# Just markdown\n\nText");
    }

    #[test]
    fn unclosed_block_runs_to_end_of_file() {
        let (fm, body) = parse("---\ntitle: x\ntags: [a]").unwrap();
        assert_eq!(fm.len(), 2);
        assert_eq!(fm.get("title"), Some(&Value::from("x")));
        assert_eq!(body, "");

        let err = parse("---\ntitle: x\nno closing").unwrap_err();
        assert!(matches!(err, StoreError::Frontmatter(_)));
    }

    #[test]
    fn later_delimiters_belong_to_body() {
        let (fm, body) = parse("---\na: 1\n---\nabove\n---\nbelow").unwrap();
        assert_eq!(fm.len(), 1);
        assert_eq!(body, "above\n---\nbelow");
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let (fm, body) = parse("---\r\na: 1\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(fm.get("a"), Some(&Value::from(1)));
        assert_eq!(body, "body");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = parse("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, StoreError::Frontmatter(_)));
    }

    #[test]
    fn non_mapping_yaml_is_an_error() {
        let err = parse("---\n- a\n- b\n---\nbody").unwrap_err();
        assert!(matches!(err, StoreError::Frontmatter(_)));
    }

    #[test]
    fn combine_without_frontmatter_returns_body() {
        assert_eq!(combine(&Mapping::new(), "just body").unwrap(), "just body");
    }

    #[test]
    fn combine_then_parse_roundtrips() {
        let fm = mapping(&[
            ("entry_id", Value::from("entry_abc")),
            ("title", Value::from("A: tricky # title")),
            ("description", Value::from("line one\nline two")),
            (
                "tags",
                Value::Sequence(vec![Value::from("x"), Value::from("y")]),
            ),
        ]);
        let body = "# Heading\n\n---\n\nAfter a rule.";

        let rendered = combine(&fm, body).unwrap();
        assert!(rendered.starts_with("---\n"));

        let (parsed_fm, parsed_body) = parse(&rendered).unwrap();
        assert_eq!(parsed_fm, fm);
        assert_eq!(parsed_body, body);
        assert_eq!(extract_frontmatter(&rendered).unwrap(), fm);
    }
}
