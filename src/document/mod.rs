//! Layout of the monitored file.
//!
//! ```text
//! LANGUAGE: german
//!
//! <WRITE IN BETWEEN THESE TAGS>
//! text to translate
//! <WRITE IN BETWEEN THESE TAGS>
//!
//! TRANSLATION: zu übersetzender Text
//! ```
//!
//! The same marker opens and closes the editable region, so the payload is
//! whatever sits between its first and second occurrence.

mod rewrite;

pub use rewrite::{apply_translation, write_translation};

/// Delimiter around the editable payload. Used for both ends.
pub const MARKER: &str = "<WRITE IN BETWEEN THESE TAGS>";

/// Prefix of the first line naming the target language.
pub const LANGUAGE_PREFIX: &str = "LANGUAGE:";

/// Prefix of the line holding the latest translation.
pub const TRANSLATION_PREFIX: &str = "TRANSLATION:";

/// Contents the file is reset to on startup: a language directive and an
/// empty region between the markers.
pub fn initial_contents(language: &str) -> String {
    format!("{LANGUAGE_PREFIX} {language}\n\n{MARKER}\n{MARKER}")
}

/// Reads the target language from the first line.
///
/// Returns the lower-cased value after `LANGUAGE:`, or `None` when the first
/// line is not a directive or names nothing.
pub fn detect_language(contents: &str) -> Option<String> {
    let first_line = contents.lines().next()?.trim();
    let language = first_line.strip_prefix(LANGUAGE_PREFIX)?.trim();

    if language.is_empty() {
        tracing::debug!(line = first_line, "language directive has no value");
        return None;
    }

    Some(language.to_lowercase())
}

/// Returns the trimmed text between the first two occurrences of
/// [`MARKER`], or an empty string if there are fewer than two.
pub fn extract_payload(contents: &str) -> &str {
    let Some(start) = contents.find(MARKER) else {
        return "";
    };
    let body = &contents[start + MARKER.len()..];

    body.find(MARKER).map_or("", |end| body[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language() {
        assert_eq!(
            detect_language("LANGUAGE: german\n\nbody"),
            Some("german".to_string())
        );
    }

    #[test]
    fn test_detect_language_is_case_insensitive() {
        assert_eq!(
            detect_language("LANGUAGE:   FRENCH  \n"),
            Some("french".to_string())
        );
        assert_eq!(
            detect_language("LANGUAGE: Brazilian Portuguese"),
            Some("brazilian portuguese".to_string())
        );
    }

    #[test]
    fn test_detect_language_only_reads_first_line() {
        assert_eq!(detect_language("hello\nLANGUAGE: german"), None);
    }

    #[test]
    fn test_detect_language_missing_or_empty() {
        assert_eq!(detect_language(""), None);
        assert_eq!(detect_language("LANGUAGE:"), None);
        assert_eq!(detect_language("LANGUAGE:   \nrest"), None);
        assert_eq!(detect_language("language: german"), None);
    }

    #[test]
    fn test_extract_payload_between_markers() {
        let contents = format!("LANGUAGE: german\n\n{MARKER}\n  hello world \n{MARKER}\n");
        assert_eq!(extract_payload(&contents), "hello world");
    }

    #[test]
    fn test_extract_payload_same_line() {
        let contents = format!("LANGUAGE: german\n\n{MARKER}hello{MARKER}");
        assert_eq!(extract_payload(&contents), "hello");
    }

    #[test]
    fn test_extract_payload_keeps_inner_newlines() {
        let contents = format!("{MARKER}\nline one\n\nline two\n{MARKER}");
        assert_eq!(extract_payload(&contents), "line one\n\nline two");
    }

    #[test]
    fn test_extract_payload_ignores_third_marker() {
        let contents = format!("{MARKER}a{MARKER}b{MARKER}");
        assert_eq!(extract_payload(&contents), "a");
    }

    #[test]
    fn test_extract_payload_missing_markers() {
        assert_eq!(extract_payload("no markers here"), "");
        assert_eq!(extract_payload(&format!("{MARKER} only one")), "");
    }

    #[test]
    fn test_extract_payload_adjacent_markers() {
        assert_eq!(extract_payload(&format!("{MARKER}{MARKER}")), "");
    }

    #[test]
    fn test_initial_contents_round_trip() {
        let contents = initial_contents("german");
        assert_eq!(detect_language(&contents), Some("german".to_string()));
        assert_eq!(extract_payload(&contents), "");
    }
}
