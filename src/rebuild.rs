// rbsort/src/rebuild.rs
//! Stitches sorted blocks back into the untouched surrounding text.
//! Everything outside a block's line span is copied verbatim, except that
//! an all-blank gap between two blocks collapses to a single blank line.

use crate::block::ImportBlock;

/// Merge the original lines with the rendered blocks and normalize the
/// tail: trailing whitespace/newlines trimmed, exactly one final newline,
/// empty input stays empty.
pub fn reconstruct(lines: &[&str], blocks: &[ImportBlock]) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut cursor = 0usize;

    for (i, block) in blocks.iter().enumerate() {
        let gap = &lines[cursor..block.start_line];
        let all_blank = !gap.is_empty() && gap.iter().all(|l| l.trim().is_empty());
        if i > 0 && all_blank {
            out.push(String::new());
        } else {
            out.extend(gap.iter().map(|l| (*l).to_string()));
        }
        out.extend(block.render());
        cursor = block.end_line + 1;
    }
    out.extend(lines[cursor..].iter().map(|l| (*l).to_string()));

    if out.is_empty() {
        return String::new();
    }
    let joined = out.join("\n");
    let body = joined.trim_end();
    if body.is_empty() {
        // Whitespace-only input still gets the single-newline treatment.
        return "\n".to_string();
    }
    format!("{body}\n")
}

/* ================================ Tests ================================ */
