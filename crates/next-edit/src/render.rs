use ratatui::buffer::Buffer;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// Writes `input` at `(x, y)`, clipped to `max_cols` terminal columns.
/// Tabs expand to four spaces; a wide glyph that would straddle the clip
/// edge is dropped. Returns the number of columns written.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    if max_cols == 0 {
        return 0;
    }

    let mut out_cols: u16 = 0;
    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        if ch == '\t' {
            for _ in 0..4 {
                if out_cols >= max_cols {
                    return out_cols;
                }
                if let Some(cell) = buf.cell_mut((x + out_cols, y)) {
                    cell.set_style(style);
                    cell.set_symbol(" ");
                }
                out_cols += 1;
            }
            continue;
        }

        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if out_cols + w > max_cols {
            return out_cols;
        }

        let s = ch.encode_utf8(&mut tmp);
        if let Some(cell) = buf.cell_mut((x + out_cols, y)) {
            cell.set_style(style);
            cell.set_symbol(s);
        }
        out_cols += 1;

        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + out_cols, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
            out_cols += 1;
        }
    }

    out_cols
}

/// Display column occupied by the first `char_col` characters of `input`,
/// with tabs counted as four columns. Character columns past the end of the
/// line map to the line's full width.
pub fn display_col(input: &str, char_col: u32) -> u16 {
    let mut cols = 0u16;
    for (i, ch) in input.chars().enumerate() {
        if i as u32 >= char_col {
            break;
        }
        cols = cols.saturating_add(match ch {
            '\t' => 4,
            _ => UnicodeWidthChar::width(ch).unwrap_or(0) as u16,
        });
    }
    cols
}
