use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid pages directory: {0}")]
    InvalidSourceDir(String),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to walk pages directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Failed to prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Output directory {output} contains the pages directory {pages}")]
    OverlappingDirs { pages: PathBuf, output: PathBuf },
}

/// Read a text file into lines, keeping leading whitespace intact
pub fn read_lines(path: &Path) -> Result<Vec<String>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_owned).collect())
}

/// Collect every file below the pages directory, sorted by path.
///
/// Directories are descended into but never returned. Entries that cannot be
/// read are logged and skipped.
pub fn scan_pages(pages_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    scan_pages_excluding(pages_root, None)
}

/// Like [`scan_pages`], but never descends into `excluded`.
///
/// Used to keep an output root that lives inside the pages directory from
/// being read back as pages on the next run.
pub fn scan_pages_excluding(
    pages_root: &Path,
    excluded: Option<&Path>,
) -> Result<Vec<PathBuf>, IoError> {
    validate_source_dir(pages_root)?;

    // a root that does not exist yet cannot contain anything to skip
    let excluded = excluded.and_then(|path| path.canonicalize().ok());
    let is_excluded = |entry: &walkdir::DirEntry| {
        entry.file_type().is_dir()
            && excluded.as_ref().is_some_and(|excluded| {
                entry
                    .path()
                    .canonicalize()
                    .is_ok_and(|path| &path == excluded)
            })
    };

    let mut files = Vec::new();
    let walker = WalkDir::new(pages_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if is_excluded(entry) {
                log::debug!("Skipping output directory: {}", entry.path().display());
                return false;
            }
            true
        });
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("{}", IoError::Walk(e));
                continue;
            }
        };

        if entry.file_type().is_dir() {
            log::debug!("This is a directory: {}", entry.path().display());
            continue;
        }
        files.push(entry.into_path());
    }

    files.sort();
    Ok(files)
}

pub fn validate_source_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidSourceDir(format!(
            "pages directory does not exist: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create the output root, removing whatever was there first when `clean` is set
pub fn prepare_output_dir(path: &Path, clean: bool) -> Result<(), IoError> {
    let output_err = |source| IoError::OutputDir {
        path: path.to_path_buf(),
        source,
    };

    if clean && path.exists() {
        fs::remove_dir_all(path).map_err(output_err)?;
    }
    fs::create_dir_all(path).map_err(output_err)
}
