//! Reflow of hard-wrapped plaintext.
//!
//! Project Gutenberg sources break every line near column 76, which reads
//! badly once the text is rewrapped on a narrower or wider screen. Paragraphs
//! are separated by a blank line (three or more terminators in a row), so we
//! split on those, join each paragraph's lines with spaces and glue the
//! paragraphs back together with a single blank line.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n]{3,}").expect("paragraph break pattern"));
static RE_LEADING_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\r\n]").expect("leading break pattern"));
static RE_LINE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n]+").expect("line break pattern"));

/// Separator placed between paragraph blocks in the output.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Remove hard wraps inside paragraphs while keeping paragraph boundaries.
///
/// Blocks that open with a space (verse, tables, indented quotes) are left
/// exactly as they are.
pub fn normalize(text: &str) -> String {
    RE_PARAGRAPH_BREAK
        .split(text)
        .map(unwrap_block)
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

fn unwrap_block(block: &str) -> String {
    if block.starts_with(' ') {
        return block.to_string();
    }
    // Only the final block can end in terminators; drop them instead of
    // turning them into a dangling space.
    let block = block.trim_end_matches(['\r', '\n']);
    let block = RE_LEADING_BREAK.replace(block, "");
    RE_LINE_BREAKS.replace_all(&block, " ").into_owned()
}
