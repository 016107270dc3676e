//! Obsidian export.
//!
//! Flattens a [`Page`] into paragraphs: each block's content followed by a
//! blank line, in source order. Levels and all properties are dropped.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::Page;

/// Written after every block's content.
pub const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Refusing to write page with unsafe title {0:?}")]
    UnsafeTitle(String),
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Flush {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Render the flattened page as a string
pub fn render_page(page: &Page) -> String {
    let mut out = String::new();
    for block in page.blocks() {
        out.push_str(&block.content);
        out.push_str(BLOCK_SEPARATOR);
    }
    out
}

/// Streams the flattened form of a page into any writer.
pub struct ObsidianWriter<W: Write> {
    out: W,
}

impl<W: Write> ObsidianWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes every block of `page` and returns how many could not be written.
    ///
    /// A failed block is logged and the remaining blocks are still attempted.
    pub fn write_blocks(&mut self, page: &Page) -> usize {
        let mut failed = 0;
        for (i, block) in page.blocks().iter().enumerate() {
            let result = self
                .out
                .write_all(block.content.as_bytes())
                .and_then(|()| self.out.write_all(BLOCK_SEPARATOR.as_bytes()));
            if let Err(e) = result {
                log::error!("{}: failed to write block {}: {e}", page.title(), i + 1);
                failed += 1;
            }
        }
        failed
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Map a page title to its file below `output_root`.
///
/// `/` in the title becomes a directory separator. Empty and `.` segments are
/// ignored; `..` or a title with nothing left is rejected so output can never
/// land outside the root.
pub fn output_path(output_root: &Path, title: &str) -> Result<PathBuf, ExportError> {
    let mut path = output_root.to_path_buf();
    let mut has_name = false;
    for segment in title.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(ExportError::UnsafeTitle(title.to_string())),
            segment => {
                path.push(segment);
                has_name = true;
            }
        }
    }

    if has_name {
        Ok(path)
    } else {
        Err(ExportError::UnsafeTitle(title.to_string()))
    }
}

/// Write a page below `output_root`, creating parent directories.
///
/// Existing files are truncated. Returns the path written.
pub fn write_page(page: &Page, output_root: &Path) -> Result<PathBuf, ExportError> {
    let path = output_path(output_root, page.title())?;
    write_page_to(page, &path)?;
    Ok(path)
}

/// Write a page to an exact file path, creating parent directories.
pub fn write_page_to(page: &Page, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| ExportError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = ObsidianWriter::new(BufWriter::new(file));
    let failed = writer.write_blocks(page);
    writer.flush().map_err(|source| ExportError::Flush {
        path: path.to_path_buf(),
        source,
    })?;

    if failed > 0 {
        log::warn!(
            "{}: {failed} of {} blocks were not written",
            path.display(),
            page.blocks().len()
        );
    }
    Ok(())
}
