//! Runs the whole pipeline on a small window and prints the plan, the
//! rendered frame, and the merge result.
//!
//! ```sh
//! cargo run -p next-edit --example plan_dump
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use next_edit::overlay::PredictionOverlay;
use next_edit::theme::Theme;
use next_edit_core::diff;
use next_edit_core::merge;
use next_edit_core::plan;
use next_edit_core::plan::PlanCapabilities;
use next_edit_core::prediction::{Cursor, Prediction};
use next_edit_core::select;

fn main() {
    let prediction = Prediction {
        window_start: 12,
        snapshot: vec![
            "function setup(opts)".to_string(),
            "  local ".to_string(),
            "  opts = opts or {}".to_string(),
            "end".to_string(),
        ],
        predicted: vec![
            "function setup(opts)".to_string(),
            "  local api = vim.api".to_string(),
            "  opts = opts or {}".to_string(),
            "  validate(opts)".to_string(),
            "end".to_string(),
        ],
        cursor: Cursor { line: 13, col: 8 },
        allow_fallback: true,
    };

    let result = diff::compute(&prediction.snapshot, &prediction.predicted);
    println!("hunks:");
    for hunk in &result.hunks {
        println!(
            "  {:?} old {}+{} / new {}+{}",
            hunk.kind, hunk.start_old, hunk.count_old, hunk.start_new, hunk.count_new
        );
    }

    let selection = select::select(&result, prediction.cursor_offset(), prediction.allow_fallback);
    println!(
        "\nvisible: {} hunk(s), fallback: {}",
        selection.visible.len(),
        selection.used_fallback
    );

    let caps = PlanCapabilities {
        cursor_line: "  local ",
        completion_active: false,
    };
    let render_plan = plan::plan(&prediction, &selection.visible, &caps);
    println!("\nplan:");
    for instruction in &render_plan.instructions {
        println!("  {instruction:?}");
    }

    let mut overlay = PredictionOverlay::new();
    overlay.set_window(prediction.window_start, prediction.snapshot.clone());
    overlay.set_plan(render_plan);

    let area = Rect::new(0, 0, 40, 8);
    let mut buf = Buffer::empty(area);
    overlay.render_ref(area, &mut buf, &Theme::default());

    println!("\nframe:");
    for y in 0..area.height {
        let row: String = (0..area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        println!("  |{}|", row.trim_end());
    }

    println!("\nmerged:");
    for line in merge::merge(&prediction) {
        println!("  {line}");
    }
}
