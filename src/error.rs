// rbsort/src/error.rs
//! Failure taxonomy for the sorting pipeline. Every variant leaves the
//! target file untouched; "skipped" is an outcome, not an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    /// Input path does not exist. Propagated, never swallowed.
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    /// Input bytes are not text we can safely rewrite (invalid UTF-8 or
    /// NUL bytes). Detected before any scanning.
    #[error("{}: not valid UTF-8 text ({detail})", path.display())]
    Encoding { path: PathBuf, detail: String },

    /// Safety mode: the input already fails `ruby -c`; nothing is rewritten.
    #[error("{}: syntax error before sorting: {message}", path.display())]
    PreexistingSyntax { path: PathBuf, message: String },

    /// Safety mode: the rewrite of valid input would fail `ruby -c`; the
    /// write is suppressed.
    #[error("{}: sorted output failed the syntax check, write suppressed: {message}", path.display())]
    IntroducedSyntax { path: PathBuf, message: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SortError {
    pub fn io(path: &std::path::Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            SortError::NotFound(path.to_path_buf())
        } else {
            SortError::Io { path: path.to_path_buf(), source }
        }
    }
}

/* ================================ Tests ================================ */
