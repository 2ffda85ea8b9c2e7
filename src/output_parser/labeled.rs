//! Labeled-line extraction of promotional content.
//!
//! The content model is instructed to answer in a fixed three-line shape:
//!
//! ```text
//! Title: Stay Hydrated in Style
//! Message: Keep cool all day.
//! Tags: #Hydration, #Fitness
//! ```
//!
//! [`parse_content_record`] turns that text into a [`ContentRecord`]. Lines
//! may appear in any order and may be surrounded by chatter; only the first
//! line anchored by each label is used.

use crate::output_parser::error::ParseError;
use crate::output_parser::extract::non_empty_lines;
use crate::types::ContentRecord;

pub const TITLE_LABEL: &str = "Title:";
pub const MESSAGE_LABEL: &str = "Message:";
pub const TAGS_LABEL: &str = "Tags:";

/// Parse labeled model output into a [`ContentRecord`].
///
/// Labels are case-sensitive and must start the (trimmed) line. A missing
/// label is reported before any empty value, so text lacking `Tags:` is
/// always a [`ParseError::MissingField`] regardless of the other fields.
///
/// # Examples
///
/// ```
/// use promo_pipeline::output_parser::parse_content_record;
///
/// let record = parse_content_record("Title: T\nMessage: M\nTags: a, b, c").unwrap();
/// assert_eq!(record.title(), "T");
/// assert_eq!(record.tags(), ["a", "b", "c"]);
/// ```
pub fn parse_content_record(text: &str) -> Result<ContentRecord, ParseError> {
    let lines = non_empty_lines(text);

    let title = find_labeled(&lines, TITLE_LABEL).ok_or(ParseError::MissingField { field: "Title" })?;
    let message =
        find_labeled(&lines, MESSAGE_LABEL).ok_or(ParseError::MissingField { field: "Message" })?;
    let tags = find_labeled(&lines, TAGS_LABEL).ok_or(ParseError::MissingField { field: "Tags" })?;

    if title.is_empty() {
        return Err(ParseError::EmptyField { field: "Title" });
    }
    if message.is_empty() {
        return Err(ParseError::EmptyField { field: "Message" });
    }

    ContentRecord::new(title, message, split_tags(tags)?)
}

/// Value of the first line starting with `label`, trimmed.
fn find_labeled<'a>(lines: &[&'a str], label: &str) -> Option<&'a str> {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(label))
        .map(str::trim)
}

fn split_tags(value: &str) -> Result<Vec<String>, ParseError> {
    if value.is_empty() {
        return Err(ParseError::EmptyField { field: "Tags" });
    }
    let tags: Vec<String> = value.split(',').map(|t| t.trim().to_string()).collect();
    if tags.iter().any(String::is_empty) {
        return Err(ParseError::EmptyField { field: "Tags" });
    }
    Ok(tags)
}
