//! Plain-text cleanup for free-form model answers.
//!
//! Used on the visual-prompt enhancement output, where the model tends to
//! wrap the useful text in pleasantries, a `Prompt:` label, or quotes.

use crate::output_parser::error::ParseError;
use crate::output_parser::extract::preprocess;

/// Pleasantries removed from the start of a response.
const COURTESY_PREFIXES: &[&str] = &[
    "Sure! ",
    "Sure, ",
    "Of course! ",
    "Of course, ",
    "Certainly! ",
    "Certainly, ",
    "Absolutely! ",
    "Absolutely, ",
];

/// Lead-ins that introduce the answer; everything up to the first newline
/// (or colon) is dropped.
const LEAD_INS: &[&str] = &["Here's ", "Here is "];

/// Labels some models put in front of the generated prompt.
const PROMPT_LABELS: &[&str] = &["Visual prompt:", "Prompt:"];

/// Clean a model response for use as plain text.
///
/// Strips `<think>` blocks, courtesy prefixes ("Sure! ...") or a lead-in
/// line ("Here's a prompt:"), a leading `Prompt:` label, and matching
/// surrounding quotes. Returns [`ParseError::EmptyResponse`] when nothing
/// is left.
///
/// # Examples
///
/// ```
/// use promo_pipeline::output_parser::parse_text;
///
/// let cleaned = parse_text("Here's your prompt:\n\"A frosted steel bottle at dawn\"").unwrap();
/// assert_eq!(cleaned, "A frosted steel bottle at dawn");
/// ```
pub fn parse_text(response: &str) -> Result<String, ParseError> {
    let cleaned = preprocess(response);
    let mut text = cleaned.as_str();

    if let Some(rest) = COURTESY_PREFIXES.iter().find_map(|p| text.strip_prefix(p)) {
        text = rest.trim_start();
    } else if let Some(rest) = LEAD_INS.iter().find_map(|p| text.strip_prefix(p)) {
        let cut = rest.find('\n').or_else(|| rest.find(':'));
        if let Some(pos) = cut {
            text = rest[pos + 1..].trim_start();
        }
    }

    if let Some(rest) = PROMPT_LABELS.iter().find_map(|p| text.strip_prefix(p)) {
        text = rest.trim_start();
    }

    let text = strip_quotes(text.trim());
    if text.is_empty() {
        return Err(ParseError::EmptyResponse);
    }
    Ok(text.to_string())
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return text[1..text.len() - 1].trim();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text() {
        assert_eq!(parse_text("A red bottle.").unwrap(), "A red bottle.");
    }

    #[test]
    fn with_think() {
        assert_eq!(parse_text("<think>plan</think>A red bottle.").unwrap(), "A red bottle.");
    }

    #[test]
    fn courtesy_prefix() {
        assert_eq!(parse_text("Sure! A red bottle.").unwrap(), "A red bottle.");
    }

    #[test]
    fn lead_in_line() {
        assert_eq!(
            parse_text("Here's the visual prompt:\nA red bottle.").unwrap(),
            "A red bottle."
        );
    }

    #[test]
    fn prompt_label_and_quotes() {
        assert_eq!(
            parse_text("Prompt: \"A red bottle on a rock\"").unwrap(),
            "A red bottle on a rock"
        );
    }

    #[test]
    fn empty_after_strip() {
        assert_eq!(parse_text("<think>only thinking</think>"), Err(ParseError::EmptyResponse));
        assert_eq!(parse_text("\"\""), Err(ParseError::EmptyResponse));
    }
}
