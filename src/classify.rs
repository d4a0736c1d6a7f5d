// rbsort/src/classify.rs
//! Line classification: one source line (+ position + suppression context)
//! → a `LineKind`. Import detection is line-start-anchored regex matching,
//! guarded against keywords that merely appear inside string literals.
//! This is a heuristic skim, not a Ruby tokenizer.

use std::sync::LazyLock;

use regex::Regex;

use crate::statement::ImportKind;

/// What a single line is, as far as block scanning cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// `#!...` on line 1 only.
    Shebang,
    /// `# frozen_string_literal: true` and friends, at line start.
    MagicComment,
    /// A recognized import statement with its parsed pieces.
    Import(ImportLine),
    Comment,
    Blank,
    Code,
}

/// Parsed pieces of an import line needed downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportLine {
    pub kind: ImportKind,
    /// Literal whitespace prefix.
    pub indent: String,
    /// Quoted path, constant name, or autoload symbol.
    pub target: String,
}

/* ============================ Pattern tables ============================ */

// One anchored pattern per import form. Each accepts the plain and the
// parenthesized-call spelling. Group 1 is the indentation; the target is
// the first non-empty remaining group.
static IMPORT_PATTERNS: LazyLock<Vec<(ImportKind, Regex)>> = LazyLock::new(|| {
    vec![
        (
            ImportKind::RequireRelative,
            Regex::new(r#"^(\s*)require_relative(?:\s+|\s*\(\s*)(?:'([^']+)'|"([^"]+)")"#).unwrap(),
        ),
        (
            ImportKind::Require,
            Regex::new(r#"^(\s*)require(?:\s+|\s*\(\s*)(?:'([^']+)'|"([^"]+)")"#).unwrap(),
        ),
        (
            ImportKind::Include,
            Regex::new(r"^(\s*)include(?:\s+|\s*\(\s*)([A-Z][A-Za-z0-9_]*(?:::[A-Z][A-Za-z0-9_]*)*)").unwrap(),
        ),
        (
            ImportKind::Extend,
            Regex::new(r"^(\s*)extend(?:\s+|\s*\(\s*)([A-Z][A-Za-z0-9_]*(?:::[A-Z][A-Za-z0-9_]*)*)").unwrap(),
        ),
        (
            ImportKind::Autoload,
            Regex::new(r"^(\s*)autoload(?:\s+|\s*\(\s*):([A-Za-z_][A-Za-z0-9_]*)").unwrap(),
        ),
        (
            ImportKind::Using,
            Regex::new(r"^(\s*)using(?:\s+|\s*\(\s*)([A-Z][A-Za-z0-9_]*(?:::[A-Z][A-Za-z0-9_]*)*)").unwrap(),
        ),
    ]
});

// Ruby magic/build directives at line start: frozen_string_literal,
// encoding/coding, warn_indent, shareable_constant_value, and the emacs
// `-*- ... -*-` form.
static MAGIC_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^#\s*(?:-\*-.*-\*-|(?:frozen_string_literal|encoding|coding|warn_indent|shareable_constant_value)\s*:)",
    )
    .unwrap()
});

// Heredoc opener: `<<MARKER`, `<<-MARKER`, `<<~MARKER`, marker optionally
// quoted. Unquoted markers are restricted to the uppercase convention so
// `queue << value` style shifts don't open a region.
static HEREDOC_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<<[~-]?(?:"([A-Za-z_][A-Za-z0-9_]*)"|'([A-Za-z_][A-Za-z0-9_]*)'|`([A-Za-z_][A-Za-z0-9_]*)`|([A-Z_][A-Z0-9_]*))"#)
        .unwrap()
});

/* ============================ Classification ============================ */

/// Classify one line. `pos` is 1-based; `suppressed` is the scanner's
/// heredoc/embedded-doc context (suppressed lines are plain pass-through).
pub fn classify_line(line: &str, pos: usize, suppressed: bool) -> LineKind {
    if suppressed {
        return LineKind::Code;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if pos == 1 && line.starts_with("#!") {
        return LineKind::Shebang;
    }
    if MAGIC_COMMENT.is_match(line) {
        return LineKind::MagicComment;
    }

    if let Some(import) = match_import(line) {
        return LineKind::Import(import);
    }

    if trimmed.starts_with('#') {
        return LineKind::Comment;
    }
    LineKind::Code
}

fn match_import(line: &str) -> Option<ImportLine> {
    for (kind, re) in IMPORT_PATTERNS.iter() {
        let caps = match re.captures(line) {
            Some(c) => c,
            None => continue,
        };
        let whole = caps.get(0).expect("group 0");
        let indent = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        // The keyword starts right after the indentation; reject it if a
        // string quote opened earlier on the line.
        if quote_opens_before(line, whole.start() + indent.len()) {
            return None;
        }
        let target = caps
            .iter()
            .skip(2)
            .flatten()
            .map(|m| m.as_str())
            .find(|s| !s.is_empty())?;
        return Some(ImportLine {
            kind: *kind,
            indent: indent.to_string(),
            target: target.to_string(),
        });
    }
    None
}

/// Guard against import keywords that sit inside a string literal: true
/// when a `'` or `"` appears before byte `idx`. Heuristic, not a tokenizer;
/// interpolated expressions can still fool it.
pub fn quote_opens_before(line: &str, idx: usize) -> bool {
    line.as_bytes()[..idx.min(line.len())]
        .iter()
        .any(|&b| b == b'\'' || b == b'"')
}

/* ======================= Multi-line suppression ======================== */

/// Heredoc marker opened by this line, if any. Only the first opener on a
/// line is tracked; stacked heredocs on one line are out of scope.
pub fn heredoc_opener(line: &str) -> Option<String> {
    let caps = HEREDOC_OPEN.captures(line)?;
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str().to_string())
        .next()
}

/// True when `line` terminates the heredoc opened with `marker`. Leading
/// whitespace is tolerated for every heredoc style.
pub fn ends_heredoc(line: &str, marker: &str) -> bool {
    line.trim() == marker
}

/// `=begin` embedded-doc opener (column 0 only, per Ruby).
pub fn opens_embedded_doc(line: &str) -> bool {
    line.starts_with("=begin")
}

/// `=end` embedded-doc terminator (column 0 only).
pub fn ends_embedded_doc(line: &str) -> bool {
    line.starts_with("=end")
}

/* ================================ Tests ================================ */

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> LineKind {
        classify_line(line, 2, false)
    }

    fn import(line: &str) -> ImportLine {
        match classify(line) {
            LineKind::Import(i) => i,
            other => panic!("expected import for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn shebang_only_on_line_one() {
        assert_eq!(classify_line("#!/usr/bin/env ruby", 1, false), LineKind::Shebang);
        assert_eq!(classify_line("#!/usr/bin/env ruby", 2, false), LineKind::Comment);
    }

    #[test]
    fn magic_comments() {
        assert_eq!(classify("# frozen_string_literal: true"), LineKind::MagicComment);
        assert_eq!(classify("#encoding: utf-8"), LineKind::MagicComment);
        assert_eq!(classify("# -*- coding: utf-8 -*-"), LineKind::MagicComment);
        assert_eq!(classify("# plain comment"), LineKind::Comment);
    }

    #[test]
    fn require_forms() {
        let i = import("require 'yaml'");
        assert_eq!(i.kind, ImportKind::Require);
        assert_eq!(i.target, "yaml");
        assert_eq!(i.indent, "");

        let i = import("  require \"json\"");
        assert_eq!(i.indent, "  ");
        assert_eq!(i.target, "json");

        let i = import("require('set')");
        assert_eq!(i.kind, ImportKind::Require);
        assert_eq!(i.target, "set");
    }

    #[test]
    fn require_relative_wins_over_require() {
        let i = import("require_relative 'helper'");
        assert_eq!(i.kind, ImportKind::RequireRelative);
        assert_eq!(i.target, "helper");
    }

    #[test]
    fn mixin_and_refinement_forms() {
        assert_eq!(import("include Comparable").kind, ImportKind::Include);
        assert_eq!(import("  extend Forwardable").target, "Forwardable");
        assert_eq!(import("include Foo::Bar").target, "Foo::Bar");
        assert_eq!(import("using StringRefinements").kind, ImportKind::Using);
        assert_eq!(import("extend(ActiveSupport::Concern)").target, "ActiveSupport::Concern");
    }

    #[test]
    fn autoload_symbol() {
        let i = import("autoload :Parser, 'myapp/parser'");
        assert_eq!(i.kind, ImportKind::Autoload);
        assert_eq!(i.target, "Parser");
    }

    #[test]
    fn lowercase_constants_are_not_mixins() {
        assert_eq!(classify("include foo"), LineKind::Code);
        assert_eq!(classify("extend bar_helper"), LineKind::Code);
    }

    #[test]
    fn keyword_prefixes_do_not_match() {
        assert_eq!(classify("includes_tax = true"), LineKind::Code);
        assert_eq!(classify("required = []"), LineKind::Code);
    }

    #[test]
    fn keyword_inside_string_is_code() {
        assert_eq!(classify("puts \"please include Foo\""), LineKind::Code);
        assert_eq!(classify("  \"require 'yaml'\""), LineKind::Code);
        assert!(quote_opens_before("x = \"include Foo\"", 7));
        assert!(!quote_opens_before("  include Foo", 2));
    }

    #[test]
    fn heredoc_openers() {
        assert_eq!(heredoc_opener("text = <<~EOS").as_deref(), Some("EOS"));
        assert_eq!(heredoc_opener("text = <<-SQL"), Some("SQL".into()));
        assert_eq!(heredoc_opener("text = <<'RAW'"), Some("RAW".into()));
        assert_eq!(heredoc_opener("queue << value"), None);
        assert_eq!(heredoc_opener("mask <<= 2"), None);
        assert!(ends_heredoc("  EOS", "EOS"));
        assert!(!ends_heredoc("EOS trailing", "EOS"));
    }

    #[test]
    fn embedded_doc_markers() {
        assert!(opens_embedded_doc("=begin"));
        assert!(ends_embedded_doc("=end"));
        assert!(!opens_embedded_doc("  =begin"));
    }

    #[test]
    fn suppressed_lines_are_code() {
        assert_eq!(classify_line("require 'yaml'", 5, true), LineKind::Code);
    }
}
