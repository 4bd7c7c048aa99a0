use ratatui::style::Style;

/// Styles for each prediction affordance.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    /// Ghost text completing the cursor's line.
    pub ghost: Style,
    /// Proposed replacement text overlaid from a column onward.
    pub overlay: Style,
    /// Lines marked as removed or replaced.
    pub deletion: Style,
    /// Proposed new lines shown as a preview block.
    pub preview: Style,
    /// The jump-to-next-edit marker.
    pub indicator: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            ghost: Style::default().dark_gray().underlined(),
            overlay: Style::default().dark_gray().italic(),
            deletion: Style::default().red().crossed_out(),
            preview: Style::default().green(),
            indicator: Style::default().cyan().bold(),
        }
    }
}
