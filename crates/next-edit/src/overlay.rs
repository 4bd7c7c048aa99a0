use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use next_edit_core::plan::RenderInstruction;
use next_edit_core::plan::RenderPlan;

use crate::render;
use crate::theme::Theme;

/// Renders a window of buffer lines with a prediction plan layered over it.
///
/// Instructions are drawn where the plan puts them: ghost and overlay text
/// after the existing content of their line, deletion/replacement marks in
/// a two-column gutter, preview blocks as extra rows before their anchor
/// line, and the jump indicator as a gutter glyph. Every call to
/// [`render_ref`](Self::render_ref) repaints the whole area, so a new plan
/// (or an empty one) fully replaces whatever was on screen before.
#[derive(Clone, Debug, Default)]
pub struct PredictionOverlay {
    window_start: u32,
    lines: Vec<String>,
    plan: RenderPlan,
}

const GUTTER_W: u16 = 2;

enum Row<'a> {
    Line { no: u32, text: &'a str },
    Preview { text: &'a str },
}

impl PredictionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window of buffer text to draw under the plan.
    pub fn set_window(&mut self, window_start: u32, lines: Vec<String>) {
        self.window_start = window_start.max(1);
        self.lines = lines;
    }

    /// Replaces the displayed plan. The previous plan's affordances vanish
    /// on the next render.
    pub fn set_plan(&mut self, plan: RenderPlan) {
        self.plan = plan;
    }

    /// Drops the plan, leaving only the window text.
    pub fn clear_plan(&mut self) {
        self.plan = RenderPlan::default();
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for dy in 0..area.height {
            let y = area.y + dy;
            for dx in 0..area.width {
                if let Some(cell) = buf.cell_mut((area.x + dx, y)) {
                    cell.set_style(theme.text_primary);
                    cell.set_symbol(" ");
                }
            }
        }

        let rows = self.build_rows();
        let text_x = area.x + GUTTER_W.min(area.width);
        let text_w = area.width.saturating_sub(GUTTER_W);

        for (dy, row) in rows.iter().enumerate() {
            if dy as u16 >= area.height {
                break;
            }
            let y = area.y + dy as u16;

            match row {
                Row::Preview { text } => {
                    render::render_str_clipped(area.x, y, GUTTER_W, buf, "+", theme.preview);
                    render::render_str_clipped(text_x, y, text_w, buf, text, theme.preview);
                }
                Row::Line { no, text } => {
                    let marked_deleted = self.is_deleted(*no);
                    let marker = if marked_deleted {
                        "-"
                    } else if self.has_indicator(*no) {
                        "»"
                    } else {
                        " "
                    };
                    let marker_style = if marked_deleted {
                        theme.deletion
                    } else {
                        theme.indicator
                    };
                    render::render_str_clipped(area.x, y, GUTTER_W, buf, marker, marker_style);

                    let line_style = if marked_deleted {
                        theme.deletion
                    } else {
                        theme.text_primary
                    };
                    render::render_str_clipped(text_x, y, text_w, buf, text, line_style);

                    for instruction in &self.plan.instructions {
                        let (col, ghost, style) = match instruction {
                            RenderInstruction::InlineSuffix { line, col, text: t }
                                if line == no =>
                            {
                                (*col, t, theme.ghost)
                            }
                            RenderInstruction::OverlayText { line, col, text: t }
                                if line == no =>
                            {
                                (*col, t, theme.overlay)
                            }
                            _ => continue,
                        };
                        let at = render::display_col(text, col).min(text_w);
                        render::render_str_clipped(
                            text_x + at,
                            y,
                            text_w - at,
                            buf,
                            ghost,
                            style,
                        );
                    }
                }
            }
        }
    }

    fn build_rows(&self) -> Vec<Row<'_>> {
        let mut rows: Vec<Row<'_>> = Vec::new();
        for (i, text) in self.lines.iter().enumerate() {
            let no = self.window_start + i as u32;
            self.push_previews_at(no, &mut rows);
            rows.push(Row::Line {
                no,
                text: text.as_str(),
            });
        }
        let window_end = self.window_start + self.lines.len() as u32;
        for instruction in &self.plan.instructions {
            if let RenderInstruction::InsertionPreview { line, lines } = instruction
                && *line >= window_end
            {
                for text in lines {
                    rows.push(Row::Preview {
                        text: text.as_str(),
                    });
                }
            }
        }
        rows
    }

    fn push_previews_at<'a>(&'a self, no: u32, rows: &mut Vec<Row<'a>>) {
        for instruction in &self.plan.instructions {
            if let RenderInstruction::InsertionPreview { line, lines } = instruction
                && *line == no
            {
                for text in lines {
                    rows.push(Row::Preview {
                        text: text.as_str(),
                    });
                }
            }
        }
    }

    fn is_deleted(&self, no: u32) -> bool {
        self.plan.instructions.iter().any(|i| match i {
            RenderInstruction::DeletionMarker { line } => *line == no,
            RenderInstruction::ReplacementMarkers { line, count } => {
                no >= *line && no < line + count
            }
            _ => false,
        })
    }

    fn has_indicator(&self, no: u32) -> bool {
        self.plan
            .instructions
            .iter()
            .any(|i| matches!(i, RenderInstruction::JumpIndicator { line, .. } if *line == no))
    }
}
