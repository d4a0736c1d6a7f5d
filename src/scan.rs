// rbsort/src/scan.rs
//! Single forward pass over a file's lines, building zero or more import
//! blocks. The transition state lives in an explicit record so the rules
//! stay testable without touching the filesystem.

use tracing::debug;

use crate::block::ImportBlock;
use crate::classify::{
    classify_line,
    ends_embedded_doc,
    ends_heredoc,
    heredoc_opener,
    opens_embedded_doc,
    LineKind,
};
use crate::statement::ImportStatement;

/// Multi-line literal regions whose lines pass through unclassified.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Suppression {
    None,
    /// Inside a heredoc, waiting for this terminator.
    Heredoc(String),
    /// Inside a `=begin` .. `=end` region.
    EmbeddedDoc,
}

/// Accumulator threaded through the fold.
struct ScanState {
    block: Option<ImportBlock>,
    /// Comment lines that may attach to the next import.
    pending_comments: Vec<String>,
    /// Line index of the first queued comment; anchors a new block's span.
    pending_start: Option<usize>,
    /// Consecutive blank lines; any non-blank line resets the run.
    pending_blanks: usize,
    /// A blank sits between the open block's last statement and here; the
    /// next joining import swallows it as a normalized single gap.
    gap_pending: bool,
    suppression: Suppression,
}

impl ScanState {
    fn new() -> Self {
        ScanState {
            block: None,
            pending_comments: Vec::new(),
            pending_start: None,
            pending_blanks: 0,
            gap_pending: false,
            suppression: Suppression::None,
        }
    }

    fn drop_pending_comments(&mut self) {
        self.pending_comments.clear();
        self.pending_start = None;
    }

    /// Close the open block, if any. Pending comments float back into the
    /// surrounding text (they sit outside the block's line span).
    fn close_block(&mut self, done: &mut Vec<ImportBlock>) {
        if let Some(block) = self.block.take() {
            done.push(block);
        }
        self.drop_pending_comments();
        self.pending_blanks = 0;
        self.gap_pending = false;
    }
}

/// Split file text into lines for scanning and reconstruction. A trailing
/// newline contributes no extra line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Scan all lines and return the import blocks found, in file order.
pub fn scan_blocks(lines: &[&str]) -> Vec<ImportBlock> {
    let mut blocks: Vec<ImportBlock> = Vec::new();
    let mut state = ScanState::new();

    for (idx, line) in lines.iter().enumerate() {
        // Rule 1: suppressed regions pass through unclassified.
        match &state.suppression {
            Suppression::Heredoc(marker) => {
                if ends_heredoc(line, marker) {
                    state.suppression = Suppression::None;
                }
                continue;
            }
            Suppression::EmbeddedDoc => {
                if ends_embedded_doc(line) {
                    state.suppression = Suppression::None;
                }
                continue;
            }
            Suppression::None => {}
        }

        match classify_line(line, idx + 1, false) {
            // Rule 2: hard separators close the block and drop pendings.
            LineKind::Shebang | LineKind::MagicComment => {
                state.close_block(&mut blocks);
            }
            LineKind::Code => {
                state.close_block(&mut blocks);
                if opens_embedded_doc(line) {
                    state.suppression = Suppression::EmbeddedDoc;
                } else if let Some(marker) = heredoc_opener(line) {
                    state.suppression = Suppression::Heredoc(marker);
                }
            }
            // Rule 3: comments queue up; a blank since the last comment
            // floats the old queue and starts a fresh one.
            LineKind::Comment => {
                if state.pending_blanks > 0 {
                    state.drop_pending_comments();
                }
                state.pending_blanks = 0;
                if state.pending_comments.is_empty() {
                    state.pending_start = Some(idx);
                }
                state.pending_comments.push((*line).to_string());
            }
            // Rule 4: one blank is a within-block gap, two consecutive
            // blanks close the block.
            LineKind::Blank => {
                state.pending_blanks += 1;
                if state.block.is_some() {
                    state.gap_pending = true;
                    if state.pending_blanks >= 2 {
                        state.close_block(&mut blocks);
                    }
                } else {
                    state.drop_pending_comments();
                }
            }
            // Rule 5: imports join the open block or start a new one.
            LineKind::Import(import) => {
                let joins = state
                    .block
                    .as_ref()
                    .map(|b| b.indent == import.indent)
                    .unwrap_or(false);

                if joins {
                    let mut leading = Vec::new();
                    if state.gap_pending {
                        leading.push(String::new());
                    }
                    leading.append(&mut state.pending_comments);
                    let block = state.block.as_mut().expect("open block");
                    block.statements.push(ImportStatement::new(line, import, leading));
                    block.end_line = idx;
                } else {
                    if let Some(prev) = state.block.take() {
                        blocks.push(prev);
                    }
                    // Attached comments pull the block start up with them.
                    let start = state.pending_start.unwrap_or(idx);
                    let leading: Vec<String> = state.pending_comments.drain(..).collect();
                    let indent = import.indent.clone();
                    let mut block = ImportBlock::new(indent, start);
                    block.end_line = idx;
                    block.statements.push(ImportStatement::new(line, import, leading));
                    state.block = Some(block);
                }
                state.pending_start = None;
                state.pending_blanks = 0;
                state.gap_pending = false;
            }
        }
    }

    state.close_block(&mut blocks);
    debug!(blocks = blocks.len(), "scan complete");
    blocks
}

/* ================================ Tests ================================ */
