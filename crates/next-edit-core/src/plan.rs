//! Maps visible hunks to abstract display instructions.

use crate::diff::DiffHunk;
use crate::diff::HunkKind;
use crate::line_change;
use crate::prediction::Prediction;

/// One display instruction for the external renderer.
///
/// Geometry is absolute: 1-indexed buffer lines, 0-indexed character
/// columns, plain text. Translating these into concrete editor annotations
/// is the renderer's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Ghost text immediately after the cursor, on the cursor's line.
    InlineSuffix { line: u32, col: u32, text: String },
    /// Proposed replacement text shown from `col` to the end of the line.
    OverlayText { line: u32, col: u32, text: String },
    /// Marks one snapshot line as removed.
    DeletionMarker { line: u32 },
    /// Marks `count` snapshot lines starting at `line` as replaced.
    ReplacementMarkers { line: u32, count: u32 },
    /// A block of proposed lines anchored before `line`. At most one per
    /// plan: only one preview surface may be open at a time.
    InsertionPreview { line: u32, lines: Vec<String> },
    /// Points at a relevant change that is not inline at the cursor.
    JumpIndicator { line: u32, col: u32 },
}

/// A complete, ordered replacement for whatever was previously displayed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderPlan {
    pub instructions: Vec<RenderInstruction>,
}

impl RenderPlan {
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Live-editor facts the caller samples just before planning. Passing them
/// as plain values keeps the planner a pure function.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlanCapabilities<'a> {
    /// Current text of the cursor's line in the live buffer, which may have
    /// drifted from the snapshot since the prediction was requested.
    pub cursor_line: &'a str,
    /// True while some blocking UI (e.g. a completion list) is open.
    pub completion_active: bool,
}

/// Builds the render plan for the visible hunks of `prediction`.
///
/// Hunks are processed in document order. A single-line insertion at or one
/// past the cursor line becomes ghost text when the predicted line still
/// extends what is typed; everything else degrades to overlays, markers,
/// and at most one preview block. A jump indicator anchors the first
/// visible hunk unless that hunk already resolved as ghost text at the
/// cursor. An empty selection produces an empty plan.
pub fn plan(
    prediction: &Prediction,
    visible: &[DiffHunk],
    caps: &PlanCapabilities<'_>,
) -> RenderPlan {
    let mut out = RenderPlan::default();
    if visible.is_empty() || prediction.is_empty() {
        return out;
    }

    let window_start = prediction.window_start;
    let window_last = window_start + prediction.snapshot.len() as u32 - 1;
    let cursor = prediction.cursor;
    let cursor_rel = prediction.cursor_offset();

    let first_idx = visible.iter().position(|h| h.is_well_formed());
    let mut preview_open = false;
    let mut first_resolved_inline = false;

    for (i, hunk) in visible.iter().enumerate() {
        if !hunk.is_well_formed() {
            log::warn!(
                "dropping malformed hunk at old line {} ({}x{})",
                hunk.start_old,
                hunk.count_old,
                hunk.count_new
            );
            continue;
        }
        let abs = window_start + hunk.start_old - 1;

        match hunk.kind {
            HunkKind::Insertion => {
                let at_cursor =
                    hunk.start_old == cursor_rel || hunk.start_old == cursor_rel + 1;
                let mut resolved_inline = false;
                if hunk.count_new == 1 && at_cursor && !caps.completion_active
                    && let Some(suffix) =
                        inline_suffix(caps.cursor_line, cursor.col, &hunk.new_lines[0])
                {
                    out.instructions.push(RenderInstruction::InlineSuffix {
                        line: cursor.line,
                        col: cursor.col,
                        text: suffix,
                    });
                    resolved_inline = true;
                    if Some(i) == first_idx {
                        first_resolved_inline = true;
                    }
                }
                if !resolved_inline && !preview_open {
                    out.instructions.push(RenderInstruction::InsertionPreview {
                        line: abs,
                        lines: hunk.new_lines.clone(),
                    });
                    preview_open = true;
                }
            }
            HunkKind::Deletion => {
                for offset in 0..hunk.count_old {
                    out.instructions
                        .push(RenderInstruction::DeletionMarker { line: abs + offset });
                }
            }
            HunkKind::Modification => {
                for lc in &hunk.line_changes {
                    let line = abs + lc.index - 1;
                    let line_len = hunk
                        .old_lines
                        .get(lc.index as usize - 1)
                        .map(|l| l.chars().count() as u32)
                        .unwrap_or(0);
                    out.instructions.push(RenderInstruction::OverlayText {
                        line,
                        col: lc.change.col.min(line_len),
                        text: lc.change.text.clone(),
                    });
                }
            }
            HunkKind::Replacement => {
                out.instructions.push(RenderInstruction::ReplacementMarkers {
                    line: abs,
                    count: hunk.count_old,
                });
                if !preview_open {
                    out.instructions.push(RenderInstruction::InsertionPreview {
                        line: abs,
                        lines: hunk.new_lines.clone(),
                    });
                    preview_open = true;
                } else {
                    // Preview surface taken: degrade to per-pair overlays.
                    let pairs = hunk.count_old.min(hunk.count_new) as usize;
                    for k in 0..pairs {
                        let old_line = &hunk.old_lines[k];
                        let new_line = &hunk.new_lines[k];
                        if old_line == new_line {
                            continue;
                        }
                        let change = line_change::analyze(old_line, new_line);
                        out.instructions.push(RenderInstruction::OverlayText {
                            line: abs + k as u32,
                            col: change.col.min(old_line.chars().count() as u32),
                            text: change.text,
                        });
                    }
                }
            }
        }
    }

    if !first_resolved_inline
        && let Some(first_idx) = first_idx
    {
        let first = &visible[first_idx];
        let line = (window_start + first.start_old - 1).min(window_last);
        out.instructions
            .push(RenderInstruction::JumpIndicator { line, col: 0 });
    }

    out
}

/// The ghost-text remainder, if the predicted line still starts with what
/// is typed up to the cursor column.
fn inline_suffix(cursor_line: &str, cursor_col: u32, predicted_line: &str) -> Option<String> {
    let prefix_end = byte_at_char(cursor_line, cursor_col as usize);
    let prefix = &cursor_line[..prefix_end];
    if predicted_line.len() > prefix.len() && predicted_line.starts_with(prefix) {
        Some(predicted_line[prefix.len()..].to_string())
    } else {
        None
    }
}

fn byte_at_char(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map(|(b, _)| b).unwrap_or(s.len())
}
