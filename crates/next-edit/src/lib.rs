//! `next-edit` renders the plans produced by [`next_edit_core`] in a
//! terminal UI.
//!
//! The core crate decides *what* to show — ghost text, overlays, markers, a
//! preview block, a jump indicator — as plain geometry and text. This crate
//! is one renderer for those plans: [`overlay::PredictionOverlay`] draws a
//! window of buffer lines with a plan layered over it into a ratatui
//! `Buffer`, replacing the previous frame wholesale each time.
//!
//! The engine modules are re-exported, so apps can depend on this crate
//! alone.

pub mod overlay;
pub mod render;
pub mod theme;

pub use next_edit_core::active;
pub use next_edit_core::diff;
pub use next_edit_core::line_change;
pub use next_edit_core::merge;
pub use next_edit_core::plan;
pub use next_edit_core::prediction;
pub use next_edit_core::select;
