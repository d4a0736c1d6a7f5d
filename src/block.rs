// rbsort/src/block.rs
//! A block is a maximal contiguous run of import statements at one
//! indentation level. The block owns the sort/dedupe algorithm and its own
//! rendering; where the block sits in the file is the scanner's business.

use std::collections::HashSet;

use crate::statement::ImportStatement;

#[derive(Clone, Debug)]
pub struct ImportBlock {
    pub statements: Vec<ImportStatement>,
    /// Indentation shared by every statement in the block.
    pub indent: String,
    /// Original line span, 0-based inclusive. Covers attached leading
    /// comments of the first statement.
    pub start_line: usize,
    pub end_line: usize,
    /// Pass-through lines preceding the first statement that attach to no
    /// statement; emitted verbatim before the sorted statements.
    pub leading: Vec<String>,
}

impl ImportBlock {
    pub fn new(indent: String, start_line: usize) -> Self {
        ImportBlock {
            statements: Vec::new(),
            indent,
            start_line,
            end_line: start_line,
            leading: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Sort by (section, kind, sort key), dedupe by normalized key, then
    /// put skip-marked statements back near their original positions.
    ///
    /// Reinsertion scales each skip's original index into the current
    /// result: `round(idx / max(1, n - 1) * result_len)`, clamped, applied
    /// in ascending original order with the result growing between
    /// insertions. Best-effort relative placement, not an exact guarantee.
    pub fn sort_and_dedupe(&mut self) {
        let original_count = self.statements.len();
        let mut skips: Vec<(usize, ImportStatement)> = Vec::new();
        let mut sortable: Vec<ImportStatement> = Vec::new();
        for (idx, stmt) in self.statements.drain(..).enumerate() {
            if stmt.skip {
                skips.push((idx, stmt));
            } else {
                sortable.push(stmt);
            }
        }

        sortable.sort_by(|a, b| {
            (a.section, a.kind)
                .cmp(&(b.section, b.kind))
                .then_with(|| a.sort_key.cmp(&b.sort_key))
        });

        let mut seen: HashSet<String> = HashSet::with_capacity(sortable.len());
        sortable.retain(|s| seen.insert(s.normalized_key.clone()));

        let denom = original_count.saturating_sub(1).max(1) as f64;
        let mut result = sortable;
        for (orig_idx, stmt) in skips {
            let pos = (orig_idx as f64 / denom * result.len() as f64).round() as usize;
            let pos = pos.min(result.len());
            result.insert(pos, stmt);
        }
        self.statements = result;
    }

    /// Emit the block's final lines: pass-through leading content, then each
    /// statement preceded by its attached comments. One blank separator line
    /// (carrying the block's indentation) goes in front of a statement when
    /// its section or kind differs from the previous statement, or when it
    /// swallowed a blank on scan; never when the previous emitted line is
    /// already blank, and never before the first statement.
    pub fn render(&self) -> Vec<String> {
        let mut out: Vec<String> = self.leading.clone();
        let mut prev: Option<&ImportStatement> = None;

        for stmt in &self.statements {
            let had_gap = stmt.leading.iter().any(String::is_empty);
            let boundary = prev
                .map(|p| p.section != stmt.section || p.kind != stmt.kind)
                .unwrap_or(false);
            let last_is_blank = out.last().map(|l| l.trim().is_empty()).unwrap_or(true);
            if (boundary || (prev.is_some() && had_gap)) && !last_is_blank {
                out.push(self.indent.clone());
            }
            for comment in stmt.leading.iter().filter(|l| !l.is_empty()) {
                out.push(comment.clone());
            }
            out.push(stmt.raw.clone());
            prev = Some(stmt);
        }
        out
    }
}

/* ================================ Tests ================================ */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify_line, LineKind};

    fn stmt(raw: &str) -> ImportStatement {
        stmt_with(raw, Vec::new())
    }

    fn stmt_with(raw: &str, leading: Vec<String>) -> ImportStatement {
        match classify_line(raw, 2, false) {
            LineKind::Import(i) => ImportStatement::new(raw, i, leading),
            other => panic!("not an import: {other:?}"),
        }
    }

    fn block_of(raws: &[&str]) -> ImportBlock {
        let mut b = ImportBlock::new(String::new(), 0);
        for r in raws {
            b.statements.push(stmt(r));
        }
        b.end_line = raws.len().saturating_sub(1);
        b
    }

    fn raws(b: &ImportBlock) -> Vec<&str> {
        b.statements.iter().map(|s| s.raw.as_str()).collect()
    }

    #[test]
    fn sorts_alphabetically_within_one_kind() {
        let mut b = block_of(&["require 'yaml'", "require 'json'"]);
        b.sort_and_dedupe();
        assert_eq!(raws(&b), vec!["require 'json'", "require 'yaml'"]);
    }

    #[test]
    fn section_then_kind_then_alpha() {
        let mut b = block_of(&[
            "require_relative 'helper'",
            "include Foo",
            "require 'rails'",
            "require 'json'",
        ]);
        b.sort_and_dedupe();
        assert_eq!(
            raws(&b),
            vec![
                "require 'json'",          // stdlib
                "require 'rails'",         // thirdparty
                "include Foo",             // firstparty
                "require_relative 'helper'" // localfolder
            ]
        );
    }

    #[test]
    fn kind_order_within_a_section() {
        let mut b = block_of(&[
            "using MyRefinement",
            "autoload :Parser, 'myapp/parser'",
            "extend MyExt",
            "include MyMixin",
        ]);
        b.sort_and_dedupe();
        assert_eq!(
            raws(&b),
            vec![
                "include MyMixin",
                "extend MyExt",
                "autoload :Parser, 'myapp/parser'",
                "using MyRefinement"
            ]
        );
    }

    #[test]
    fn dedup_keeps_first_in_sorted_order_and_drops_comments() {
        let mut b = ImportBlock::new(String::new(), 0);
        b.statements.push(stmt("require \"json\""));
        b.statements.push(stmt_with("require 'json'", vec!["# dup comment".into()]));
        b.statements.push(stmt("require 'yaml'"));
        b.sort_and_dedupe();
        // Double-quoted sorts first, so it is the survivor.
        assert_eq!(raws(&b), vec!["require \"json\"", "require 'yaml'"]);
        assert!(b.statements[0].leading.is_empty());
    }

    #[test]
    fn skip_statements_hold_their_relative_slots() {
        // Spec example: skips at original indices 0 and 2.
        let mut b = block_of(&[
            "require 'z_lib' # isort:skip",
            "require 'yaml'",
            "require 'a_lib' # isort:skip",
            "require 'json'",
        ]);
        b.sort_and_dedupe();
        assert_eq!(
            raws(&b),
            vec![
                "require 'z_lib' # isort:skip",
                "require 'json'",
                "require 'a_lib' # isort:skip",
                "require 'yaml'",
            ]
        );
    }

    #[test]
    fn skip_edge_single_statement() {
        let mut b = block_of(&["require 'only' # isort:skip"]);
        b.sort_and_dedupe();
        assert_eq!(raws(&b), vec!["require 'only' # isort:skip"]);
    }

    #[test]
    fn skip_edge_all_skipped_preserves_original_order() {
        let mut b = block_of(&[
            "require 'c' # isort:skip",
            "require 'b' # isort:skip",
            "require 'a' # isort:skip",
        ]);
        b.sort_and_dedupe();
        assert_eq!(
            raws(&b),
            vec![
                "require 'c' # isort:skip",
                "require 'b' # isort:skip",
                "require 'a' # isort:skip",
            ]
        );
    }

    #[test]
    fn skip_edge_first_and_last() {
        let mut b = block_of(&[
            "require 'zz' # isort:skip",
            "require 'b'",
            "require 'a'",
            "require 'aa' # isort:skip",
        ]);
        b.sort_and_dedupe();
        assert_eq!(
            raws(&b),
            vec![
                "require 'zz' # isort:skip",
                "require 'a'",
                "require 'b'",
                "require 'aa' # isort:skip",
            ]
        );
    }

    #[test]
    fn render_inserts_blank_between_sections_and_kinds() {
        let mut b = block_of(&[
            "require 'json'",
            "require 'rails'",
            "include Foo",
            "require_relative 'helper'",
        ]);
        b.sort_and_dedupe();
        assert_eq!(
            b.render(),
            vec![
                "require 'json'",
                "",
                "require 'rails'",
                "",
                "include Foo",
                "",
                "require_relative 'helper'",
            ]
        );
    }

    #[test]
    fn render_uses_block_indentation_for_separators() {
        let mut b = ImportBlock::new("  ".to_string(), 0);
        b.statements.push(stmt("  require 'json'"));
        b.statements.push(stmt("  include Foo"));
        b.sort_and_dedupe();
        assert_eq!(b.render(), vec!["  require 'json'", "  ", "  include Foo"]);
    }

    #[test]
    fn render_emits_attached_comments_and_swallowed_gap() {
        let mut b = ImportBlock::new(String::new(), 0);
        b.statements.push(stmt("require 'json'"));
        b.statements
            .push(stmt_with("require 'yaml'", vec![String::new(), "# attached".into()]));
        assert_eq!(
            b.render(),
            vec!["require 'json'", "", "# attached", "require 'yaml'"]
        );
    }

    #[test]
    fn render_never_doubles_blank_lines() {
        let mut b = ImportBlock::new(String::new(), 0);
        b.statements
            .push(stmt_with("require 'json'", Vec::new()));
        // Gap entry and a section boundary at once: still a single blank.
        b.statements
            .push(stmt_with("include Foo", vec![String::new()]));
        assert_eq!(b.render(), vec!["require 'json'", "", "include Foo"]);
    }

    #[test]
    fn render_passes_leading_content_through() {
        let mut b = ImportBlock::new(String::new(), 0);
        b.leading.push("# floating header".into());
        b.statements.push(stmt("require 'json'"));
        assert_eq!(b.render(), vec!["# floating header", "require 'json'"]);
    }
}
