// rbsort/src/statement.rs
//! Normalized view of one import line: kind, section, sort key, dedup key,
//! attached comments, skip flag. Statements are built fresh per scan and
//! only ever mutated by the block-level sort/dedupe step.

use std::sync::LazyLock;

use regex::Regex;

use crate::classify::ImportLine;
use crate::sections::{classify_section, Section};

/// The six recognized statement forms. The derived `Ord` is the fixed
/// within-section ordering: Require < RequireRelative < Include < Extend <
/// Autoload < Using.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportKind {
    Require,
    RequireRelative,
    Include,
    Extend,
    Autoload,
    Using,
}

impl ImportKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ImportKind::Require => "require",
            ImportKind::RequireRelative => "require_relative",
            ImportKind::Include => "include",
            ImportKind::Extend => "extend",
            ImportKind::Autoload => "autoload",
            ImportKind::Using => "using",
        }
    }
}

/// One import line, plus everything the sorter needs to rank, dedupe, and
/// re-emit it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportStatement {
    /// Exact original text, inline comment included.
    pub raw: String,
    pub kind: ImportKind,
    /// Attached comment lines preceding the statement; an empty-string
    /// entry stands for one swallowed blank line.
    pub leading: Vec<String>,
    /// Literal whitespace prefix.
    pub indent: String,
    pub section: Section,
    /// Statement text with the keyword stripped; alphabetic tiebreak.
    pub sort_key: String,
    /// Exempt from alphabetic placement (trailing `isort:skip` marker).
    pub skip: bool,
    /// Dedup identity: keyword + extracted target.
    pub normalized_key: String,
}

impl ImportStatement {
    /// Build from a classified line. `raw` is the untrimmed original line.
    pub fn new(raw: &str, import: ImportLine, leading: Vec<String>) -> Self {
        let section = classify_section(import.kind, &import.target);
        let sort_key = strip_keyword(raw, import.kind);
        let skip = line_skip_marker(raw);
        let normalized_key = format!("{}:{}", import.kind.keyword(), import.target);
        ImportStatement {
            raw: raw.to_string(),
            kind: import.kind,
            leading,
            indent: import.indent,
            section,
            sort_key,
            skip,
            normalized_key,
        }
    }
}

/// Statement text after the keyword, trimmed; what alphabetic ordering
/// actually compares.
fn strip_keyword(raw: &str, kind: ImportKind) -> String {
    let t = raw.trim_start();
    t.strip_prefix(kind.keyword()).unwrap_or(t).trim_start().to_string()
}

/* ============================== Directives ============================= */

static SKIP_FILE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#.*isort\s*:\s*skip_file").unwrap());

static SKIP_LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#.*isort\s*:\s*skip").unwrap());

/// Trailing `# isort:skip` on a statement line (the file-level form does
/// not count). Case-insensitive, whitespace-tolerant around the colon.
pub fn line_skip_marker(line: &str) -> bool {
    SKIP_LINE_MARKER.is_match(line) && !SKIP_FILE_MARKER.is_match(line)
}

/// File-level `# isort:skip_file` directive.
pub fn file_skip_marker(line: &str) -> bool {
    SKIP_FILE_MARKER.is_match(line)
}

/* ================================ Tests ================================ */
