//! Shared preprocessing for model output.
//!
//! Every parser goes through these helpers first: reasoning blocks are
//! removed and text is normalized into trimmed, non-empty lines.

/// Strip `<think>` blocks and surrounding whitespace.
pub fn preprocess(text: &str) -> String {
    strip_think_tags(text).trim().to_string()
}

/// Remove `<think>...</think>` and `<thinking>...</thinking>` blocks.
///
/// An unclosed block swallows the rest of the text.
///
/// # Examples
///
/// ```
/// use promo_pipeline::output_parser::strip_think_tags;
///
/// assert_eq!(strip_think_tags("<think>hmm</think>Title: Hi"), "Title: Hi");
/// assert_eq!(strip_think_tags("kept<thinking>never closed"), "kept");
/// ```
pub fn strip_think_tags(text: &str) -> String {
    let once = strip_block(text, "<think>", "</think>");
    strip_block(&once, "<thinking>", "</thinking>")
}

fn strip_block(text: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + open.len()..];
        match after_open.find(close) {
            Some(end) => rest = &after_open[end + close.len()..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Split text into trimmed lines, dropping blank ones.
pub fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
