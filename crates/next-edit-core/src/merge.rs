//! Merging an accepted prediction back into the buffer.

use crate::diff;
use crate::prediction::LineRange;
use crate::prediction::Prediction;

/// Read access to the live buffer, provided by the buffer owner. Used
/// exactly once per apply, for the freshness check.
pub trait BufferRead {
    /// Returns the lines in `range` (1-indexed, half-open).
    fn read_lines(&self, range: LineRange) -> Vec<String>;
}

/// Result of attempting to apply a prediction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The buffer still matches the snapshot. The caller replaces `replace`
    /// with `lines` and re-anchors the cursor; nothing has been written yet.
    Applied {
        replace: LineRange,
        lines: Vec<String>,
    },
    /// The buffer changed since the snapshot was taken. The prediction must
    /// be discarded and fresh state requested; no partial write occurred.
    Stale,
}

/// Computes the lines that result from accepting the visible portion of a
/// prediction.
///
/// Everything before the cursor-relative boundary is taken verbatim from
/// the snapshot. From the boundary onward the predicted lines take over,
/// with the start index shifted by the net line delta of hunks anchored
/// above the boundary, so accepted forward edits line up even when
/// suppressed edits above the cursor changed the window's length.
pub fn merge(prediction: &Prediction) -> Vec<String> {
    if prediction.is_empty() {
        return prediction.snapshot.clone();
    }

    let cursor_offset = prediction.cursor_offset() as usize;
    let result = diff::compute(&prediction.snapshot, &prediction.predicted);

    let mut line_offset = 0i64;
    for hunk in &result.hunks {
        if (hunk.start_old as usize) < cursor_offset {
            line_offset += i64::from(hunk.count_new) - i64::from(hunk.count_old);
        }
    }
    let predicted_start = (cursor_offset as i64 + line_offset).max(1) as usize;

    let keep = cursor_offset
        .saturating_sub(1)
        .min(prediction.snapshot.len());
    let mut merged: Vec<String> = prediction.snapshot[..keep].to_vec();
    if predicted_start <= prediction.predicted.len() {
        merged.extend_from_slice(&prediction.predicted[predicted_start - 1..]);
    }
    merged
}

/// Applies a prediction against the live buffer.
///
/// Re-reads the window range through `buffer` and compares it to the
/// snapshot: any drift means the prediction is stale and must be discarded
/// (compare-and-discard, not a lock). On a match, the returned range and
/// lines describe the single replacement the caller should perform.
pub fn apply(prediction: &Prediction, buffer: &dyn BufferRead) -> ApplyOutcome {
    let range = prediction.window_range();
    let live = buffer.read_lines(range);
    if live != prediction.snapshot {
        return ApplyOutcome::Stale;
    }

    ApplyOutcome::Applied {
        replace: range,
        lines: merge(prediction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::Cursor;

    struct FakeBuffer {
        lines: Vec<String>,
    }

    impl FakeBuffer {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl BufferRead for FakeBuffer {
        fn read_lines(&self, range: LineRange) -> Vec<String> {
            let start = (range.start as usize).saturating_sub(1);
            let end = (range.end as usize).saturating_sub(1).min(self.lines.len());
            if start >= end {
                return Vec::new();
            }
            self.lines[start..end].to_vec()
        }
    }

    fn prediction(
        window_start: u32,
        snapshot: &[&str],
        predicted: &[&str],
        cursor: Cursor,
    ) -> Prediction {
        Prediction {
            window_start,
            snapshot: snapshot.iter().map(|s| s.to_string()).collect(),
            predicted: predicted.iter().map(|s| s.to_string()).collect(),
            cursor,
            allow_fallback: false,
        }
    }

    #[test]
    fn merge_takes_predicted_lines_from_the_cursor_on() {
        let p = prediction(
            1,
            &["a", "b", "c"],
            &["a", "b!", "c!"],
            Cursor { line: 2, col: 0 },
        );
        assert_eq!(merge(&p), vec!["a", "b!", "c!"]);
    }

    #[test]
    fn merge_preserves_every_line_above_the_cursor() {
        let p = prediction(
            1,
            &["keep 1", "keep 2", "old"],
            &["KEEP 1", "KEEP 2", "new"],
            Cursor { line: 3, col: 0 },
        );
        assert_eq!(merge(&p), vec!["keep 1", "keep 2", "new"]);
    }

    #[test]
    fn merge_compensates_for_insertions_above_the_cursor() {
        // Two lines inserted above the boundary shift where the predicted
        // tail begins.
        let p = prediction(
            1,
            &["a", "b", "c"],
            &["x", "y", "a", "b", "C"],
            Cursor { line: 3, col: 0 },
        );
        assert_eq!(merge(&p), vec!["a", "b", "C"]);
    }

    #[test]
    fn merge_compensates_for_deletions_above_the_cursor() {
        let p = prediction(
            1,
            &["a", "b", "c", "d"],
            &["a", "c", "D"],
            Cursor { line: 4, col: 0 },
        );
        assert_eq!(merge(&p), vec!["a", "b", "c", "D"]);
    }

    #[test]
    fn merge_with_cursor_on_the_first_line_is_the_prediction() {
        let p = prediction(
            1,
            &["a", "b"],
            &["A", "B", "C"],
            Cursor { line: 1, col: 0 },
        );
        assert_eq!(merge(&p), vec!["A", "B", "C"]);
    }

    #[test]
    fn merge_of_an_empty_prediction_is_a_no_op() {
        let p = prediction(1, &["a", "b"], &[], Cursor { line: 1, col: 0 });
        assert_eq!(merge(&p), vec!["a", "b"]);
    }

    #[test]
    fn merge_respects_the_window_offset() {
        let p = prediction(
            10,
            &["a", "b", "c"],
            &["a", "b", "c2"],
            Cursor { line: 12, col: 0 },
        );
        // cursor_offset is 3: the first two lines come from the snapshot.
        assert_eq!(merge(&p), vec!["a", "b", "c2"]);
    }

    #[test]
    fn apply_succeeds_on_a_fresh_buffer() {
        let buffer = FakeBuffer::new(&["before", "a", "b", "after"]);
        let p = prediction(2, &["a", "b"], &["a", "b2"], Cursor { line: 3, col: 0 });

        match apply(&p, &buffer) {
            ApplyOutcome::Applied { replace, lines } => {
                assert_eq!(replace, LineRange { start: 2, end: 4 });
                assert_eq!(lines, vec!["a", "b2"]);
            }
            ApplyOutcome::Stale => panic!("expected a fresh apply"),
        }
    }

    #[test]
    fn apply_detects_a_drifted_buffer() {
        let buffer = FakeBuffer::new(&["before", "a EDITED", "b", "after"]);
        let p = prediction(2, &["a", "b"], &["a", "b2"], Cursor { line: 3, col: 0 });
        assert_eq!(apply(&p, &buffer), ApplyOutcome::Stale);
    }

    #[test]
    fn apply_detects_a_shrunk_buffer() {
        let buffer = FakeBuffer::new(&["before", "a"]);
        let p = prediction(2, &["a", "b"], &["a", "b2"], Cursor { line: 3, col: 0 });
        assert_eq!(apply(&p, &buffer), ApplyOutcome::Stale);
    }
}
