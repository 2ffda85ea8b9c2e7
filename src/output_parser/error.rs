//! Error types for model output parsers.

/// Errors returned by output parsers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The model response was empty or whitespace-only.
    #[error("empty LLM response")]
    EmptyResponse,

    /// A required labeled line (`Title:`, `Message:`, `Tags:`) was absent.
    #[error("missing field: {field}")]
    MissingField {
        /// The label without its colon.
        field: &'static str,
    },

    /// A labeled line was present but its value was empty after trimming.
    #[error("empty field: {field}")]
    EmptyField {
        /// The label without its colon.
        field: &'static str,
    },
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            ParseError::MissingField { field: "Tags" }.to_string(),
            "missing field: Tags"
        );
        assert_eq!(
            ParseError::EmptyField { field: "Title" }.to_string(),
            "empty field: Title"
        );
    }
}
