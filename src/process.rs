// rbsort/src/process.rs
//! The per-file pipeline: read → encoding gate → skip-file directive →
//! scan → sort → reconstruct → compare → (optional syntax check) → write.
//! Fully synchronous; whole-file read and whole-file replacement.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::diff::unified_diff;
use crate::error::SortError;
use crate::rebuild::reconstruct;
use crate::scan::{scan_blocks, split_lines};
use crate::statement::file_skip_marker;
use crate::syntax;
use crate::util::looks_binary;

/// How many leading lines are searched for the file-level skip directive.
const SKIP_FILE_WINDOW: usize = 50;

/// Result of processing one file. `Skipped` is not an error and not a
/// change; callers must keep the three apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
    Skipped,
}

/// Result of the pure text transform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortOutcome {
    /// File-level skip directive present; nothing was computed.
    Skipped,
    /// The candidate output text (possibly identical to the input).
    Done(String),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Syntax-check with `ruby -c` before and after; never write a rewrite
    /// that breaks previously-valid input.
    pub safe: bool,
}

/// The pure core: sort a whole source text. No I/O, no validation.
pub fn sort_source(text: &str) -> SortOutcome {
    if text.lines().take(SKIP_FILE_WINDOW).any(file_skip_marker) {
        return SortOutcome::Skipped;
    }
    let lines = split_lines(text);
    let mut blocks = scan_blocks(&lines);
    for block in &mut blocks {
        block.sort_and_dedupe();
    }
    SortOutcome::Done(reconstruct(&lines, &blocks))
}

/// Sort a file in place. Returns `Changed` after a successful write,
/// `Unchanged` when the output is byte-identical, `Skipped` on the
/// file-level directive. Every error path leaves the file untouched.
pub fn process_file(path: &Path, opts: &Options) -> Result<Outcome, SortError> {
    let text = read_text(path)?;
    let sorted = match sort_source(&text) {
        SortOutcome::Skipped => {
            debug!(path = %path.display(), "skip_file directive");
            return Ok(Outcome::Skipped);
        }
        SortOutcome::Done(s) => s,
    };

    if sorted == text {
        return Ok(Outcome::Unchanged);
    }

    if opts.safe {
        if let Some(message) = syntax::check_syntax(&text) {
            return Err(SortError::PreexistingSyntax { path: path.to_path_buf(), message });
        }
        if let Some(message) = syntax::check_syntax(&sorted) {
            return Err(SortError::IntroducedSyntax { path: path.to_path_buf(), message });
        }
    }

    fs::write(path, &sorted).map_err(|e| SortError::io(path, e))?;
    debug!(path = %path.display(), "rewrote");
    Ok(Outcome::Changed)
}

/// Would `process_file` change this file? Never mutates.
pub fn check_only(path: &Path) -> Result<bool, SortError> {
    let text = read_text(path)?;
    match sort_source(&text) {
        SortOutcome::Skipped => Ok(false),
        SortOutcome::Done(sorted) => Ok(sorted != text),
    }
}

/// Unified diff of the pending rewrite, or None when nothing would change
/// (including skipped files). Never mutates.
pub fn diff_preview(path: &Path) -> Result<Option<String>, SortError> {
    let text = read_text(path)?;
    match sort_source(&text) {
        SortOutcome::Skipped => Ok(None),
        SortOutcome::Done(sorted) if sorted == text => Ok(None),
        SortOutcome::Done(sorted) => {
            let name = path.to_string_lossy();
            Ok(Some(unified_diff(&text, &sorted, &name)))
        }
    }
}

fn read_text(path: &Path) -> Result<String, SortError> {
    let bytes = fs::read(path).map_err(|e| SortError::io(path, e))?;
    if looks_binary(&bytes) {
        return Err(SortError::Encoding {
            path: path.to_path_buf(),
            detail: "NUL bytes present".to_string(),
        });
    }
    String::from_utf8(bytes).map_err(|e| SortError::Encoding {
        path: path.to_path_buf(),
        detail: e.utf8_error().to_string(),
    })
}

/* ================================ Tests ================================ */
