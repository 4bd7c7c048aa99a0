//! `next-edit-core` turns a snapshot of buffer text, a model-proposed
//! rewrite of that window, and a cursor position into a typed diff, a
//! cursor-relative selection, an abstract render plan, and a race-safe
//! merge.
//!
//! ## Design goals
//!
//! - Pure pipeline: every step is a deterministic function of its inputs.
//!   No async runtime, no interior state, no editor dependency.
//! - The renderer is external: a [`plan::RenderPlan`] carries plain buffer
//!   lines, character columns, and text, never editor handles. Each plan is
//!   a complete replacement for the previous one, not a delta.
//! - Failures are values: empty results for empty input, an empty plan when
//!   nothing is worth surfacing, [`merge::ApplyOutcome::Stale`] when the
//!   buffer drifted. Nothing in this crate panics on user text.
//!
//! ## Pipeline
//!
//! 1. [`diff::compute`] aligns the snapshot against the predicted lines and
//!    groups every run of non-aligned lines into a typed [`diff::DiffHunk`].
//! 2. [`select::select`] keeps the hunks at or after the cursor line
//!    (next-edit semantics: never propose retroactive edits), with an
//!    optional fallback to the first change in the window.
//! 3. [`plan::plan`] maps the visible hunks to display instructions and
//!    decides between ghost text at the cursor, overlays, markers, a single
//!    preview block, and a jump indicator.
//! 4. [`merge::merge`] computes the accepted text, and [`merge::apply`]
//!    guards it with a freshness re-read through [`merge::BufferRead`].
//!
//! Hosts that juggle several buffers keep the currently surfaced prediction
//! per buffer in an [`active::ActivePredictions`] map they own themselves.

pub mod active;
pub mod diff;
pub mod line_change;
pub mod merge;
pub mod plan;
pub mod prediction;
pub mod select;
