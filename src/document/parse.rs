use crate::aliases::{AliasMap, expand};

/// One parsed line of the edited document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditLine {
    /// Path as written in the document, possibly relative
    pub display_path: String,
    /// Tag tokens after alias expansion, in document order
    pub raw_tags: Vec<String>,
    /// 1-based line number in the document
    pub line_no: usize,
}

/// Split a record line into its path and bracket contents.
///
/// The line must start with a non-whitespace character and end (ignoring
/// trailing whitespace) with `]`. The path runs up to the last `[`.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with(char::is_whitespace) {
        return None;
    }
    let body = line.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let contents = &body[open + 1..];
    if contents.contains(']') {
        return None;
    }
    let path = body[..open].trim_end();
    if path.is_empty() {
        return None;
    }
    Some((path, contents))
}

/// Parse the edited document.
///
/// Lines that do not look like `PATH [TAGS]` are skipped, never reported:
/// blank lines, notes and stray headers are all fine. Tags are split on
/// commas, trimmed, empty ones dropped, then run through `aliases`.
#[must_use]
pub fn parse(text: &str, aliases: &AliasMap) -> Vec<EditLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let Some((path, contents)) = split_line(line) else {
                if !line.trim().is_empty() {
                    tracing::debug!(line_no = i + 1, "skipping unmatched line");
                }
                return None;
            };
            let raw_tags = contents
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .flat_map(|t| expand(t, aliases))
                .collect();
            Some(EditLine {
                display_path: path.to_string(),
                raw_tags,
                line_no: i + 1,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_aliases() -> AliasMap {
        AliasMap::new()
    }

    #[test]
    fn test_parse_basic_line() {
        let lines = parse("docs/a.txt [Red,  work , ]\n", &no_aliases());
        assert_eq!(
            lines,
            vec![EditLine {
                display_path: "docs/a.txt".into(),
                raw_tags: vec!["Red".into(), "work".into()],
                line_no: 1,
            }]
        );
    }

    #[test]
    fn test_parse_skips_unmatched_lines() {
        let text = "\n# my notes\n   indented [x]\nno brackets here\na [b]\ntrailing [x] junk\n";
        let lines = parse(text, &no_aliases());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].display_path, "a");
        assert_eq!(lines[0].line_no, 5);
    }

    #[test]
    fn test_parse_path_with_spaces_and_brackets() {
        let lines = parse("My Files/a [1].txt   [x, y]  \n", &no_aliases());
        assert_eq!(lines[0].display_path, "My Files/a [1].txt");
        assert_eq!(lines[0].raw_tags, vec!["x", "y"]);
    }

    #[test]
    fn test_parse_empty_brackets() {
        let lines = parse("file []", &no_aliases());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].raw_tags.is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_path() {
        assert!(parse("[a, b]", &no_aliases()).is_empty());
    }

    #[test]
    fn test_parse_expands_aliases_in_place() {
        let mut aliases = AliasMap::new();
        aliases.insert("p", ["project", "urgent"]);
        let lines = parse("f [first, p, last]", &aliases);
        assert_eq!(lines[0].raw_tags, vec!["first", "project", "urgent", "last"]);
    }

    #[test]
    fn test_parse_crlf_lines() {
        let lines = parse("a [x]\r\nb [y]\r\n", &no_aliases());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].raw_tags, vec!["y"]);
    }
}
