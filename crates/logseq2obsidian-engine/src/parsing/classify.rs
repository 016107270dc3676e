/// Delimiter between a property name and its value.
pub const PROPERTY_DELIMITER: &str = ":: ";

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of page parsing: each line is classified independently
/// without reference to the block that is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Empty or whitespace only. Never reaches the page model.
    Blank,
    /// A `name:: value` line.
    Property,
    /// A bullet header opening a new block at the given tab depth.
    BlockStart { level: usize },
    /// Text belonging to the currently open block.
    Continuation,
}

/// Classifies individual lines of a Logseq page.
pub struct LogseqLineClassifier;

impl LogseqLineClassifier {
    /// Classifies a line into a [`LineClass`].
    ///
    /// Property detection wins over block detection, so `- key:: value` is
    /// never a property but `key:: value - x` is.
    pub fn classify(&self, line: &str) -> LineClass {
        if line.trim().is_empty() {
            LineClass::Blank
        } else if is_property_line(line) {
            LineClass::Property
        } else if let Some(level) = block_level(line) {
            LineClass::BlockStart { level }
        } else {
            LineClass::Continuation
        }
    }
}

/// Returns the block level if the line opens a block.
///
/// Scans left to right counting tabs and stops at the first `-` followed by a
/// space. The marker is not anchored to the start of the line: any earlier
/// text is tolerated.
pub fn block_level(line: &str) -> Option<usize> {
    // '\t', '-' and ' ' are ASCII so they never occur inside a multi-byte char
    let bytes = line.as_bytes();
    let mut level = 0;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\t' => level += 1,
            b'-' if bytes.get(i + 1) == Some(&b' ') => return Some(level),
            _ => {}
        }
    }
    None
}

/// True when a run of non-whitespace is immediately followed by `":: "`.
///
/// Leading whitespace is allowed. Whitespace after the name has started
/// disqualifies the line, so names never contain spaces.
pub fn is_property_line(line: &str) -> bool {
    let mut in_name = false;
    for (i, ch) in line.char_indices() {
        if ch == ':' && in_name && line[i..].starts_with(PROPERTY_DELIMITER) {
            return true;
        }
        if ch.is_whitespace() {
            if in_name {
                return false;
            }
        } else {
            in_name = true;
        }
    }
    false
}
