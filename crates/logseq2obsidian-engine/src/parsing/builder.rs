use crate::models::{Block, Page, Property};

use super::{
    classify::{LineClass, LogseqLineClassifier},
    extract::{continuation_text, parse_block_header, parse_property},
};

/// State machine assembling a [`Page`] from classified lines.
///
/// The open block is the last entry of `blocks`; `open` records whether one
/// has been opened yet. Properties seen while no block is open belong to the
/// page.
pub struct PageBuilder {
    classifier: LogseqLineClassifier,
    title: String,
    properties: Vec<Property>,
    blocks: Vec<Block>,
    line_no: usize,
    dropped_lines: usize,
}

impl PageBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            classifier: LogseqLineClassifier,
            title: title.into(),
            properties: Vec::new(),
            blocks: Vec::new(),
            line_no: 0,
            dropped_lines: 0,
        }
    }

    pub fn push(&mut self, line: &str) {
        self.line_no += 1;

        match self.classifier.classify(line) {
            LineClass::Blank => {}
            LineClass::Property => {
                let Some(property) = parse_property(line) else {
                    log::warn!(
                        "{}: unreadable property on line {}: {line:?}",
                        self.title,
                        self.line_no
                    );
                    self.dropped_lines += 1;
                    return;
                };
                match self.blocks.last_mut() {
                    Some(block) => block.properties.push(property),
                    None => self.properties.push(property),
                }
            }
            LineClass::BlockStart { level } => {
                let mut block = parse_block_header(line);
                block.level = level;
                self.blocks.push(block);
            }
            LineClass::Continuation => match self.blocks.last_mut() {
                Some(block) => {
                    let text = continuation_text(line, block.level);
                    block.append_line(text);
                }
                None => {
                    log::warn!(
                        "{}: dropping line {} before the first block: {line:?}",
                        self.title,
                        self.line_no
                    );
                    self.dropped_lines += 1;
                }
            },
        }
    }

    pub fn finish(self) -> Page {
        Page::new(
            self.title,
            self.properties,
            self.blocks,
            self.dropped_lines,
        )
    }
}
