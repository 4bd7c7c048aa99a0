//! Cursor-relative hunk filtering: next-edit semantics.

use crate::diff::DiffHunk;
use crate::diff::DiffResult;

/// Outcome of filtering a diff against the cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Hunks to surface, in document order. The first entry anchors the
    /// jump indicator.
    pub visible: Vec<DiffHunk>,
    /// True when nothing sat at or after the cursor and the first change in
    /// the window was promoted instead.
    pub used_fallback: bool,
}

/// Keeps the hunks starting at or after `cursor_offset` (the cursor's
/// 1-indexed line relative to the window start).
///
/// Changes strictly above the cursor are suppressed: the system only ever
/// proposes forward edits. When nothing qualifies and `allow_fallback` is
/// set, the first hunk in document order becomes the sole visible hunk and
/// `used_fallback` is reported. Malformed hunks are skipped, never surfaced.
pub fn select(diff: &DiffResult, cursor_offset: u32, allow_fallback: bool) -> Selection {
    let cursor_offset = cursor_offset.max(1);

    let mut visible: Vec<DiffHunk> = Vec::new();
    for hunk in &diff.hunks {
        if !hunk.is_well_formed() {
            log::warn!(
                "dropping malformed hunk at old line {} ({}x{})",
                hunk.start_old,
                hunk.count_old,
                hunk.count_new
            );
            continue;
        }
        if hunk.start_old >= cursor_offset {
            visible.push(hunk.clone());
        }
    }

    if visible.is_empty()
        && allow_fallback
        && diff.has_changes
        && let Some(first) = diff.hunks.iter().find(|h| h.is_well_formed())
    {
        return Selection {
            visible: vec![first.clone()],
            used_fallback: true,
        };
    }

    Selection {
        visible,
        used_fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::HunkKind;
    use crate::diff::compute;

    fn two_hunk_diff() -> DiffResult {
        // Changes at old lines 2 and 4.
        compute(&["a", "b", "c", "d"], &["a", "B", "c", "D"])
    }

    #[test]
    fn keeps_hunks_at_or_after_the_cursor() {
        let diff = two_hunk_diff();
        let selection = select(&diff, 2, false);
        assert_eq!(selection.visible.len(), 2);
        assert!(!selection.used_fallback);

        let selection = select(&diff, 3, false);
        assert_eq!(selection.visible.len(), 1);
        assert_eq!(selection.visible[0].start_old, 4);
    }

    #[test]
    fn visibility_matches_the_start_old_rule_exactly() {
        let diff = two_hunk_diff();
        for cursor_offset in 1..=6 {
            let selection = select(&diff, cursor_offset, false);
            for hunk in &diff.hunks {
                let visible = selection.visible.iter().any(|v| v == hunk);
                assert_eq!(visible, hunk.start_old >= cursor_offset);
            }
        }
    }

    #[test]
    fn suppresses_everything_above_the_cursor() {
        let diff = two_hunk_diff();
        let selection = select(&diff, 5, false);
        assert!(selection.visible.is_empty());
        assert!(!selection.used_fallback);
    }

    #[test]
    fn falls_back_to_the_first_hunk_in_document_order() {
        let diff = two_hunk_diff();
        let selection = select(&diff, 5, true);
        assert_eq!(selection.visible.len(), 1);
        assert_eq!(selection.visible[0].start_old, 2);
        assert!(selection.used_fallback);
    }

    #[test]
    fn fallback_needs_changes() {
        let diff = compute(&["same"], &["same"]);
        let selection = select(&diff, 3, true);
        assert!(selection.visible.is_empty());
        assert!(!selection.used_fallback);
    }

    #[test]
    fn no_fallback_when_a_hunk_is_already_visible() {
        let diff = two_hunk_diff();
        let selection = select(&diff, 4, true);
        assert_eq!(selection.visible.len(), 1);
        assert!(!selection.used_fallback);
    }

    #[test]
    fn cursor_offset_zero_clamps_to_one() {
        let diff = two_hunk_diff();
        let selection = select(&diff, 0, false);
        assert_eq!(selection.visible.len(), 2);
    }

    #[test]
    fn malformed_hunks_are_dropped() {
        let mut diff = two_hunk_diff();
        diff.hunks[0].count_new = 99;
        let selection = select(&diff, 1, false);
        assert_eq!(selection.visible.len(), 1);
        assert_eq!(selection.visible[0].kind, HunkKind::Modification);
        assert_eq!(selection.visible[0].start_old, 4);
    }
}
