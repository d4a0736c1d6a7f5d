// rbsort/src/diff.rs

/// Generate a unified diff between two whole-file texts.
///
/// Trims the common prefix and suffix and emits a single hunk with up to
/// three lines of context on each side. Enough for previewing one file's
/// rewrite; not a general diff engine.
pub fn unified_diff(before: &str, after: &str, path: &str) -> String {
    if before == after {
        return String::new();
    }

    let old: Vec<&str> = before.lines().collect();
    let new: Vec<&str> = after.lines().collect();

    let mut prefix = 0usize;
    while prefix < old.len() && prefix < new.len() && old[prefix] == new[prefix] {
        prefix += 1;
    }
    let mut suffix = 0usize;
    while suffix < old.len().saturating_sub(prefix)
        && suffix < new.len().saturating_sub(prefix)
        && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let ctx_before = prefix.min(3);
    let ctx_after = suffix.min(3);
    let start = prefix - ctx_before;
    let old_end = old.len() - suffix;
    let new_end = new.len() - suffix;

    let old_count = (old_end - start) + ctx_after;
    let new_count = (new_end - start) + ctx_after;

    let mut diff = String::new();
    diff.push_str(&format!("--- a/{path}\n"));
    diff.push_str(&format!("+++ b/{path}\n"));
    diff.push_str(&format!(
        "@@ -{},{} +{},{} @@\n",
        start + 1,
        old_count,
        start + 1,
        new_count
    ));
    for line in &old[start..prefix] {
        diff.push_str(&format!(" {line}\n"));
    }
    for line in &old[prefix..old_end] {
        diff.push_str(&format!("-{line}\n"));
    }
    for line in &new[prefix..new_end] {
        diff.push_str(&format!("+{line}\n"));
    }
    for line in &old[old_end..old_end + ctx_after] {
        diff.push_str(&format!(" {line}\n"));
    }
    diff
}

/* ================================ Tests ================================ */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_produce_empty_diff() {
        assert!(unified_diff("a\nb\n", "a\nb\n", "x.rb").is_empty());
    }

    #[test]
    fn swap_shows_minus_and_plus() {
        let d = unified_diff("require 'b'\nrequire 'a'\n", "require 'a'\nrequire 'b'\n", "x.rb");
        assert!(d.contains("--- a/x.rb"));
        assert!(d.contains("+++ b/x.rb"));
        assert!(d.contains("-require 'b'"));
        assert!(d.contains("+require 'a'"));
    }

    #[test]
    fn context_is_capped_at_three_lines() {
        let before = "1\n2\n3\n4\n5\nold\n6\n7\n8\n9\n";
        let after = "1\n2\n3\n4\n5\nnew\n6\n7\n8\n9\n";
        let d = unified_diff(before, after, "x.rb");
        assert!(d.contains("@@ -3,7 +3,7 @@"));
        assert!(!d.contains(" 1\n"));
        assert!(d.contains(" 3\n"));
        assert!(d.contains("-old\n"));
        assert!(d.contains("+new\n"));
    }

    #[test]
    fn pure_insertion_has_plus_only_body() {
        let d = unified_diff("a\nc\n", "a\nb\nc\n", "x.rb");
        assert!(d.contains("+b\n"));
        assert!(!d.contains("\n-"));
    }
}
