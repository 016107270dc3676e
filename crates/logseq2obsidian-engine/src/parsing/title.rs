use std::borrow::Cow;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    #[error("Malformed percent escape at byte {position} in {name:?}")]
    Malformed { name: String, position: usize },
    #[error("Decoded title is not valid UTF-8: {name:?}")]
    InvalidUtf8 { name: String },
}

/// Derives a page title from a page file path.
///
/// Logseq stores `/` in page names as `%2F`, so the basename is
/// percent-decoded. Directory components are dropped, not decoded. When the
/// name cannot be decoded the raw basename is used.
pub fn resolve_title(path: &Path) -> String {
    let name = base_name(path);
    match decode_title(&name) {
        Ok(title) => title,
        Err(e) => {
            log::warn!("Using undecoded title for {}: {e}", path.display());
            name
        }
    }
}

/// Percent-decodes a file name.
///
/// Only `%XX` escapes are decoded; `+` is kept as a literal plus sign.
pub fn decode_title(name: &str) -> Result<String, TitleError> {
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let is_escape = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !is_escape {
            return Err(TitleError::Malformed {
                name: name.to_string(),
                position: i,
            });
        }
        i += 3;
    }

    urlencoding::decode(name)
        .map(Cow::into_owned)
        .map_err(|_| TitleError::InvalidUtf8 {
            name: name.to_string(),
        })
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
