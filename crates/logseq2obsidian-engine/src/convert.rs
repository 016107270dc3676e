//! Directory-to-directory conversion.
//!
//! Parses every page below the source root first, then prepares the output
//! root and writes the pages. A page that cannot be read or written is logged
//! and counted; the run carries on with the rest.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::export;
use crate::io::{self, IoError};
use crate::models::Page;
use crate::parsing::parse_page_file;

/// What to do when two pages resolve to the same output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateTitles {
    /// The page converted last wins.
    #[default]
    Overwrite,
    /// Keep the first page and skip later ones.
    Skip,
    /// Write later pages as `<stem> (N).<ext>`.
    Suffix,
}

impl FromStr for DuplicateTitles {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(Self::Overwrite),
            "skip" => Ok(Self::Skip),
            "suffix" => Ok(Self::Suffix),
            other => Err(format!(
                "unknown duplicate title policy '{other}' (expected overwrite, skip or suffix)"
            )),
        }
    }
}

impl fmt::Display for DuplicateTitles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Overwrite => "overwrite",
            Self::Skip => "skip",
            Self::Suffix => "suffix",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Remove the output root before writing.
    pub clean_output: bool,
    pub duplicate_titles: DuplicateTitles,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            clean_output: true,
            duplicate_titles: DuplicateTitles::default(),
        }
    }
}

/// Counts from a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub parsed: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub dropped_lines: usize,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} parsed, {} written, {} skipped, {} failed",
            self.parsed, self.written, self.skipped, self.failed
        )?;
        if self.dropped_lines > 0 {
            write!(f, " ({} orphan lines dropped)", self.dropped_lines)?;
        }
        Ok(())
    }
}

pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert every page under `pages_root` into `output_root`.
    ///
    /// Only an invalid source root or an output root that cannot be prepared
    /// fails the run.
    pub fn run(&self, pages_root: &Path, output_root: &Path) -> Result<ConversionReport, IoError> {
        let files = io::scan_pages_excluding(pages_root, Some(output_root))?;
        if self.options.clean_output {
            ensure_disjoint(pages_root, output_root)?;
        }

        let mut report = ConversionReport::default();
        let pages = self.parse_all(&files, &mut report);

        io::prepare_output_dir(output_root, self.options.clean_output)?;
        self.write_all(&pages, output_root, &mut report);

        Ok(report)
    }

    fn parse_all(&self, files: &[PathBuf], report: &mut ConversionReport) -> Vec<Page> {
        let mut pages = Vec::with_capacity(files.len());
        for file in files {
            match parse_page_file(file) {
                Ok(page) => {
                    log::info!("Parsed page: {}", file.display());
                    report.parsed += 1;
                    report.dropped_lines += page.dropped_lines();
                    pages.push(page);
                }
                Err(e) => {
                    log::error!("Skipping {}: {e}", file.display());
                    report.failed += 1;
                }
            }
        }
        pages
    }

    fn write_all(&self, pages: &[Page], output_root: &Path, report: &mut ConversionReport) {
        let mut used = HashSet::new();
        for page in pages {
            let path = match export::output_path(output_root, page.title()) {
                Ok(path) => path,
                Err(e) => {
                    log::error!("{e}");
                    report.failed += 1;
                    continue;
                }
            };

            let Some(path) = self.resolve_duplicate(path, &used) else {
                report.skipped += 1;
                continue;
            };

            match export::write_page_to(page, &path) {
                Ok(()) => {
                    log::info!("Converted {}", page.title());
                    report.written += 1;
                    used.insert(path);
                }
                Err(e) => {
                    log::error!("{e}");
                    report.failed += 1;
                }
            }
        }
    }

    fn resolve_duplicate(&self, path: PathBuf, used: &HashSet<PathBuf>) -> Option<PathBuf> {
        if !used.contains(&path) {
            return Some(path);
        }

        match self.options.duplicate_titles {
            DuplicateTitles::Overwrite => {
                log::warn!(
                    "{} is produced by more than one page; keeping the last",
                    path.display()
                );
                Some(path)
            }
            DuplicateTitles::Skip => {
                log::warn!("Skipping page, {} was already written", path.display());
                None
            }
            DuplicateTitles::Suffix => {
                let renamed = (1..)
                    .map(|n| suffixed_path(&path, n))
                    .find(|candidate| !used.contains(candidate))?;
                log::warn!(
                    "{} already written, using {}",
                    path.display(),
                    renamed.display()
                );
                Some(renamed)
            }
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

/// `dir/Page.md` -> `dir/Page (n).md`
fn suffixed_path(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem} ({n}).{}", ext.to_string_lossy()),
        None => format!("{stem} ({n})"),
    };
    path.with_file_name(name)
}

/// Cleaning an output root that contains the pages would delete them.
fn ensure_disjoint(pages_root: &Path, output_root: &Path) -> Result<(), IoError> {
    let Ok(output) = output_root.canonicalize() else {
        // does not exist yet, nothing to delete
        return Ok(());
    };
    let pages = pages_root.canonicalize()?;
    if pages.starts_with(&output) {
        return Err(IoError::OverlappingDirs {
            pages: pages_root.to_path_buf(),
            output: output_root.to_path_buf(),
        });
    }
    Ok(())
}
