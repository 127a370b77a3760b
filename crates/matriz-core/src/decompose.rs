//! Splitting multi-line answers into list items.

/// Split on newlines, trim every line and drop blanks
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Join items one per line, skipping blank items
pub fn join_lines(items: &[String]) -> String {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split and keep at most `max` items
pub fn split_capped(raw: &str, max: Option<usize>) -> Vec<String> {
    let mut lines = split_lines(raw);
    if let Some(max) = max {
        lines.truncate(max);
    }
    lines
}

/// Split a `Concepto - Autores` line at its first ` - ` separator.
/// Later separators stay in the authors part. Both sides must be non-empty.
pub fn parse_concept_authors(line: &str) -> Option<(String, String)> {
    let (concept, authors) = line.split_once(" - ")?;
    let (concept, authors) = (concept.trim(), authors.trim());
    if concept.is_empty() || authors.is_empty() {
        return None;
    }
    Some((concept.to_string(), authors.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_concept_authors() {
        assert_eq!(
            parse_concept_authors("Clima escolar - Moos - Trickett (1974)"),
            Some((
                "Clima escolar".to_string(),
                "Moos - Trickett (1974)".to_string()
            ))
        );
        assert_eq!(parse_concept_authors("Clima escolar"), None);
        assert_eq!(parse_concept_authors(" - Moos"), None);
        assert_eq!(parse_concept_authors("Clima-escolar"), None);
    }

    #[test]
    fn test_split_drops_blank_lines() {
        let lines = split_lines("Identificar X.\nDeterminar Y.\n");
        assert_eq!(lines, vec!["Identificar X.", "Determinar Y."]);

        let lines = split_lines("  a  \n\n   \n\tb\r\n");
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_split_capped_truncates() {
        let lines = split_capped("uno\ndos\ntres\ncuatro", Some(3));
        assert_eq!(lines, vec!["uno", "dos", "tres"]);
        assert_eq!(split_capped("uno\ndos", None).len(), 2);
    }

    proptest! {
        #[test]
        fn prop_decomposition_is_idempotent(raw in "[a-zA-Záé .\\-\n\t]{0,120}", cap in 1usize..5) {
            let once = split_capped(&raw, Some(cap));
            let twice = split_capped(&join_lines(&once), Some(cap));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_split_never_yields_blank_items(raw in "[ a-z\n]{0,80}") {
            for line in split_lines(&raw) {
                prop_assert!(!line.trim().is_empty());
                prop_assert_eq!(line.trim(), line.as_str());
            }
        }
    }
}
