use crate::models::{Block, Property};

use super::classify::{PROPERTY_DELIMITER, is_property_line};

/// Width of the `- ` bullet marker, in characters.
pub const MARKER_WIDTH: usize = 2;

/// Parses a block header line into a [`Block`].
///
/// The line is trimmed and the bullet marker dropped. The level is left at 0;
/// the assembler sets it from the classifier result.
pub fn parse_block_header(line: &str) -> Block {
    Block::new(skip_chars(line.trim(), MARKER_WIDTH), 0)
}

/// Parses a `name:: value` line.
///
/// Returns `None` for anything [`is_property_line`] rejects. The value is
/// everything after the delimiter, including further `::` sequences, with
/// trailing whitespace removed. `key:: ` yields an empty value.
pub fn parse_property(line: &str) -> Option<Property> {
    if !is_property_line(line) {
        return None;
    }
    let (name, value) = line.trim_start().split_once(PROPERTY_DELIMITER)?;
    Some(Property::new(name, value.trim_end()))
}

/// Extracts the text of a continuation line for a block opened at `level`.
///
/// Strips at most `level` leading tabs, then the width of the bullet marker.
pub fn continuation_text(line: &str, level: usize) -> &str {
    let tabs = line
        .bytes()
        .take(level)
        .take_while(|b| *b == b'\t')
        .count();
    skip_chars(&line[tabs..], MARKER_WIDTH)
}

/// Drops the first `n` characters, yielding "" when the text is shorter.
fn skip_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}
