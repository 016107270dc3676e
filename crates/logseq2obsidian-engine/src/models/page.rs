use serde::Serialize;

/// A `name:: value` pair attached to a page or a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One bulleted outline item with its continuation lines and properties.
///
/// `level` is the tab depth of the header line when the block was opened.
/// It is stored as metadata only; blocks carry no parent or child links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub level: usize,
    pub content: String,
    pub properties: Vec<Property>,
}

impl Block {
    pub fn new(content: impl Into<String>, level: usize) -> Self {
        Self {
            level,
            content: content.into(),
            properties: Vec::new(),
        }
    }

    /// Append a continuation line, separated from existing content by a newline
    pub fn append_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
    }
}

/// A parsed Logseq page.
///
/// Built in a single pass by [`crate::parsing::PageBuilder`] and read-only
/// afterwards. Ownership runs strictly downward: page -> blocks -> properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    title: String,
    properties: Vec<Property>,
    blocks: Vec<Block>,
    #[serde(skip)]
    dropped_lines: usize,
}

impl Page {
    pub(crate) fn new(
        title: String,
        properties: Vec<Property>,
        blocks: Vec<Block>,
        dropped_lines: usize,
    ) -> Self {
        Self {
            title,
            properties,
            blocks,
            dropped_lines,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Properties that appeared before the first block header
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of continuation lines discarded because no block was open yet
    pub fn dropped_lines(&self) -> usize {
        self.dropped_lines
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
