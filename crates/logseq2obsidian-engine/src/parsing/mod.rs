//! # Page Parsing
//!
//! Single forward pass over the lines of a Logseq page.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified on its own
//!    as blank, property, block start (with its tab level) or continuation
//! 2. **Extraction** (`extract`): block headers, properties and continuation
//!    text are cut out of the line
//! 3. **Page Assembly** (`builder`): a `PageBuilder` routes properties to the
//!    page or the open block and grows block content
//!
//! The title comes from the file name (`title`), never from a `title::`
//! property.

pub mod builder;
pub mod classify;
pub mod extract;
pub mod title;

use std::path::Path;

use crate::io::{self, IoError};
use crate::models::Page;

pub use builder::PageBuilder;
pub use classify::{LineClass, LogseqLineClassifier, block_level, is_property_line};
pub use extract::{continuation_text, parse_block_header, parse_property};
pub use title::{TitleError, decode_title, resolve_title};

/// Assembles a page from already split lines.
pub fn parse_page<I, S>(title: impl Into<String>, lines: I) -> Page
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = PageBuilder::new(title);
    for line in lines {
        builder.push(line.as_ref());
    }
    builder.finish()
}

/// Reads and parses one page file, titling it from its file name.
pub fn parse_page_file(path: &Path) -> Result<Page, IoError> {
    let lines = io::read_lines(path)?;
    Ok(parse_page(resolve_title(path), lines))
}
