pub mod convert;
pub mod export;
pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use convert::{ConversionReport, ConvertOptions, Converter, DuplicateTitles};
pub use export::{ExportError, render_page, write_page};
pub use io::IoError;
pub use models::{Block, Page, Property};
pub use parsing::{parse_page, parse_page_file, resolve_title};
