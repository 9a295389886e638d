/// Heading that opens the efficient approach section of an insight document.
pub const APPROACH_MARKER: &str = "## Efficient Approach Overview";

/// An insight document split at the approach marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sections {
    /// Everything before the marker, trimmed.
    pub primary: String,
    /// The marker and everything after it, verbatim. `None` when the marker is absent.
    pub secondary: Option<String>,
}

/// Splits `document` at the first [`APPROACH_MARKER`].
///
/// Later occurrences of the marker stay inside `secondary` untouched.
pub fn split_sections(document: &str) -> Sections {
    match document.find(APPROACH_MARKER) {
        Some(idx) => Sections {
            primary: document[..idx].trim().to_string(),
            secondary: Some(document[idx..].to_string()),
        },
        None => Sections {
            primary: document.trim().to_string(),
            secondary: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{split_sections, APPROACH_MARKER};

    #[test]
    fn missing_marker_keeps_whole_trimmed_document() {
        let sections = split_sections("  \n# Two Sum\nUse a map.\n\n");
        assert_eq!(sections.primary, "# Two Sum\nUse a map.");
        assert_eq!(sections.secondary, None);
    }

    #[test]
    fn marker_starts_secondary_and_keeps_tail_verbatim() {
        let doc = format!("intro\n\n{APPROACH_MARKER}\nbody  \n");
        let sections = split_sections(&doc);
        assert_eq!(sections.primary, "intro");
        assert_eq!(
            sections.secondary.as_deref(),
            Some("## Efficient Approach Overview\nbody  \n")
        );
    }

    #[test]
    fn only_first_marker_is_a_boundary() {
        let doc = format!("a {APPROACH_MARKER} b {APPROACH_MARKER} c");
        let sections = split_sections(&doc);
        assert_eq!(sections.primary, "a");
        assert_eq!(
            sections.secondary.as_deref(),
            Some("## Efficient Approach Overview b ## Efficient Approach Overview c")
        );
    }

    #[test]
    fn document_opening_with_marker_has_empty_primary() {
        let sections = split_sections(APPROACH_MARKER);
        assert_eq!(sections.primary, "");
        assert_eq!(sections.secondary.as_deref(), Some(APPROACH_MARKER));
    }

    #[test]
    fn marker_must_match_case() {
        let sections = split_sections("## efficient approach overview\nx");
        assert_eq!(sections.secondary, None);
    }
}
