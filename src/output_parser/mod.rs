//! # Model Output Parsers
//!
//! Deterministic extraction of structured data from free-form model text.
//! Nothing here calls a model; a malformed answer is reported as a
//! [`ParseError`] and never retried at this layer.
//!
//! | Parser | Use Case |
//! |--------|----------|
//! | [`parse_content_record`] | `Title:` / `Message:` / `Tags:` promotional copy |
//! | [`parse_text`] | Clean prose (enhanced visual prompts) |
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`strip_think_tags`] | Remove `<think>` blocks from text |
//! | [`preprocess`] | Strip think blocks and trim |

pub mod error;
pub mod extract;
pub mod labeled;
pub mod text;

pub use error::ParseError;
pub use extract::{preprocess, strip_think_tags};
pub use labeled::parse_content_record;
pub use text::parse_text;
