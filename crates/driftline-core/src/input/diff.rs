//! Line diffing between content snapshots

use similar::{ChangeTag, TextDiff};

/// Compute a unified-style line diff between two content snapshots.
///
/// Each returned line is prefixed with `-` (only in `old`), `+` (only in
/// `new`) or two spaces (unchanged), without hunk headers.
pub fn line_diff(old: &str, new: &str) -> Vec<String> {
    let diff = TextDiff::from_lines(old, new);
    diff.iter_all_changes()
        .map(|change| {
            let prefix = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            format!("{} {}", prefix, change.value().trim_end_matches('\n'))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_content() {
        let lines = line_diff("a\nb\n", "a\nb\n");
        assert!(lines.iter().all(|l| l.starts_with(' ')));
    }

    #[test]
    fn test_added_line() {
        let lines = line_diff("a\n", "a\nb\n");
        assert!(lines.contains(&"+ b".to_string()));
    }

    #[test]
    fn test_removed_line() {
        let lines = line_diff("a\nb\n", "a\n");
        assert!(lines.contains(&"- b".to_string()));
    }

    #[test]
    fn test_changed_line() {
        let lines = line_diff("hello\n", "world\n");
        assert!(lines.contains(&"- hello".to_string()));
        assert!(lines.contains(&"+ world".to_string()));
    }
}
