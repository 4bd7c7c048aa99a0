//! Intra-line change analysis for aligned line pairs.

/// How a single line was edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// The old line is a strict prefix of the new line; `text` is purely
    /// appended at the end.
    AppendChars,
    /// The lines diverge before the old line ends; `text` replaces
    /// everything from `col` onward.
    Modification,
}

/// The edit applied to one line, expressed as a column and the new material
/// from that column onward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharChange {
    pub kind: ChangeKind,
    /// 0-indexed character column at which the new content begins.
    pub col: u32,
    /// New text from `col` to the end of the line.
    pub text: String,
}

/// One edited line within a modification hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineChange {
    /// 1-indexed position within the hunk.
    pub index: u32,
    pub change: CharChange,
}

/// Classifies the edit between one old line and its aligned new line.
///
/// Columns count characters, not bytes. Callers only invoke this on pairs
/// that actually differ; equal lines are aligned away by the differ.
pub fn analyze(old_line: &str, new_line: &str) -> CharChange {
    let mut prefix_chars = 0usize;
    let mut split = 0usize;
    let mut new_chars = new_line.char_indices();
    for old_ch in old_line.chars() {
        match new_chars.next() {
            Some((at, new_ch)) if new_ch == old_ch => {
                prefix_chars += 1;
                split = at + new_ch.len_utf8();
            }
            _ => break,
        }
    }

    let old_len = old_line.chars().count();
    let kind = if prefix_chars == old_len && new_line.chars().count() > old_len {
        ChangeKind::AppendChars
    } else {
        ChangeKind::Modification
    };

    CharChange {
        kind,
        col: prefix_chars as u32,
        text: new_line[split..].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_prefix_is_append() {
        let change = analyze("local ", "local api = vim.api");
        assert_eq!(change.kind, ChangeKind::AppendChars);
        assert_eq!(change.col, 6);
        assert_eq!(change.text, "api = vim.api");
    }

    #[test]
    fn divergence_is_modification_at_common_prefix() {
        let change = analyze("hello x", "hello world");
        assert_eq!(change.kind, ChangeKind::Modification);
        assert_eq!(change.col, 6);
        assert_eq!(change.text, "world");
    }

    #[test]
    fn divergence_at_first_char_has_col_zero() {
        let change = analyze("foo", "bar");
        assert_eq!(change.kind, ChangeKind::Modification);
        assert_eq!(change.col, 0);
        assert_eq!(change.text, "bar");
    }

    #[test]
    fn shortened_line_is_modification() {
        let change = analyze("abcdef", "abc");
        assert_eq!(change.kind, ChangeKind::Modification);
        assert_eq!(change.col, 3);
        assert_eq!(change.text, "");
    }

    #[test]
    fn emptied_line_is_modification_at_col_zero() {
        let change = analyze("abc", "");
        assert_eq!(change.kind, ChangeKind::Modification);
        assert_eq!(change.col, 0);
        assert_eq!(change.text, "");
    }

    #[test]
    fn append_to_empty_line() {
        let change = analyze("", "let x = 1;");
        assert_eq!(change.kind, ChangeKind::AppendChars);
        assert_eq!(change.col, 0);
        assert_eq!(change.text, "let x = 1;");
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let change = analyze("你好", "你好吗");
        assert_eq!(change.kind, ChangeKind::AppendChars);
        assert_eq!(change.col, 2);
        assert_eq!(change.text, "吗");

        let change = analyze("你x", "你好");
        assert_eq!(change.kind, ChangeKind::Modification);
        assert_eq!(change.col, 1);
        assert_eq!(change.text, "好");
    }
}
