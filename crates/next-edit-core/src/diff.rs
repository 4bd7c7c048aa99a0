//! Line-level diffing between a snapshot and its predicted rewrite.

use std::ops::Range;

use similar::Algorithm;
use similar::DiffTag;
use similar::capture_diff_slices;

use crate::line_change;
use crate::line_change::LineChange;

/// Kind of a contiguous changed region, derived purely from how many lines
/// each side consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HunkKind {
    /// `count_old == 0`: new lines appear without consuming old ones.
    Insertion,
    /// `count_new == 0`: old lines disappear without replacement.
    Deletion,
    /// Equal non-zero counts: lines edited in place, pairwise.
    Modification,
    /// Unequal non-zero counts: a block rewritten with a different shape.
    Replacement,
}

/// One maximal contiguous block of difference.
///
/// Starts are 1-indexed. For a zero-length side the start is the position
/// *before* which the change is anchored: an insertion with `start_old = 3`
/// sits between old lines 2 and 3.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    pub kind: HunkKind,
    pub start_old: u32,
    pub start_new: u32,
    pub count_old: u32,
    pub count_new: u32,
    pub old_lines: Vec<String>,
    pub new_lines: Vec<String>,
    /// Intra-line edits for the pairs that differ; populated for
    /// `Modification` hunks only, in index order.
    pub line_changes: Vec<LineChange>,
}

impl DiffHunk {
    /// Shapes [`compute`] can never produce. Consumers treat anything that
    /// fails this as absent rather than propagating it.
    pub fn is_well_formed(&self) -> bool {
        self.old_lines.len() == self.count_old as usize
            && self.new_lines.len() == self.count_new as usize
            && (self.count_old > 0 || self.count_new > 0)
            && self.kind == classify(self.count_old, self.count_new)
            && self.start_old >= 1
            && self.start_new >= 1
    }
}

/// Ordered hunks between two line arrays.
///
/// `has_changes` is false exactly when `hunks` is empty, which happens
/// exactly when the inputs are equal line-for-line (or either is absent).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub has_changes: bool,
    pub hunks: Vec<DiffHunk>,
}

#[derive(Clone, Debug)]
struct Block {
    old: Range<usize>,
    new: Range<usize>,
}

/// Computes the typed line diff from `old` to `new`.
///
/// Alignment is a longest-common-subsequence over whole lines. Where
/// duplicate lines admit more than one minimal alignment, a pure insertion
/// or deletion block slides upward while the equal line just above it
/// matches the block's last line, so equal lines align as late as possible
/// and the changed block lands as early as possible.
///
/// An empty `old` or `new` yields an empty result: a missing side means
/// there is nothing to compare, not that everything changed.
pub fn compute<S: AsRef<str>>(old: &[S], new: &[S]) -> DiffResult {
    if old.is_empty() || new.is_empty() {
        return DiffResult::default();
    }

    let old: Vec<&str> = old.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = new.iter().map(AsRef::as_ref).collect();

    let ops = capture_diff_slices(Algorithm::Myers, &old, &new);
    let mut blocks: Vec<Block> = Vec::new();
    for op in &ops {
        if op.tag() == DiffTag::Equal {
            continue;
        }
        let old_range = op.old_range();
        let new_range = op.new_range();
        if let Some(last) = blocks.last_mut()
            && last.old.end == old_range.start
            && last.new.end == new_range.start
        {
            last.old.end = old_range.end;
            last.new.end = new_range.end;
            continue;
        }
        blocks.push(Block {
            old: old_range,
            new: new_range,
        });
    }

    slide_blocks_up(&mut blocks, &old, &new);

    let hunks: Vec<DiffHunk> = blocks
        .into_iter()
        .map(|block| build_hunk(block, &old, &new))
        .collect();
    DiffResult {
        has_changes: !hunks.is_empty(),
        hunks,
    }
}

/// Slides each pure insertion/deletion block upward over equal neighbours,
/// merging blocks that meet. Mixed blocks never slide; their placement is
/// forced by the alignment.
fn slide_blocks_up(blocks: &mut Vec<Block>, old: &[&str], new: &[&str]) {
    let mut i = 0;
    while i < blocks.len() {
        loop {
            let floor_old = if i == 0 { 0 } else { blocks[i - 1].old.end };
            let floor_new = if i == 0 { 0 } else { blocks[i - 1].new.end };
            let block = &blocks[i];
            let can_slide = if block.old.is_empty() && !block.new.is_empty() {
                block.old.start > floor_old
                    && block.new.start > floor_new
                    && new[block.new.start - 1] == new[block.new.end - 1]
            } else if block.new.is_empty() && !block.old.is_empty() {
                block.old.start > floor_old
                    && block.new.start > floor_new
                    && old[block.old.start - 1] == old[block.old.end - 1]
            } else {
                false
            };
            if !can_slide {
                break;
            }
            let block = &mut blocks[i];
            block.old.start -= 1;
            block.old.end -= 1;
            block.new.start -= 1;
            block.new.end -= 1;
        }

        if i > 0
            && blocks[i - 1].old.end == blocks[i].old.start
            && blocks[i - 1].new.end == blocks[i].new.start
        {
            let merged = blocks.remove(i);
            blocks[i - 1].old.end = merged.old.end;
            blocks[i - 1].new.end = merged.new.end;
            continue;
        }
        i += 1;
    }
}

fn build_hunk(block: Block, old: &[&str], new: &[&str]) -> DiffHunk {
    let count_old = block.old.len() as u32;
    let count_new = block.new.len() as u32;
    let kind = classify(count_old, count_new);
    let old_lines: Vec<String> = old[block.old.clone()].iter().map(|s| s.to_string()).collect();
    let new_lines: Vec<String> = new[block.new.clone()].iter().map(|s| s.to_string()).collect();

    let line_changes = if kind == HunkKind::Modification {
        old_lines
            .iter()
            .zip(new_lines.iter())
            .enumerate()
            .filter(|(_, (old_line, new_line))| old_line != new_line)
            .map(|(i, (old_line, new_line))| LineChange {
                index: i as u32 + 1,
                change: line_change::analyze(old_line, new_line),
            })
            .collect()
    } else {
        Vec::new()
    };

    DiffHunk {
        kind,
        start_old: block.old.start as u32 + 1,
        start_new: block.new.start as u32 + 1,
        count_old,
        count_new,
        old_lines,
        new_lines,
        line_changes,
    }
}

fn classify(count_old: u32, count_new: u32) -> HunkKind {
    if count_old == 0 {
        HunkKind::Insertion
    } else if count_new == 0 {
        HunkKind::Deletion
    } else if count_old == count_new {
        HunkKind::Modification
    } else {
        HunkKind::Replacement
    }
}
