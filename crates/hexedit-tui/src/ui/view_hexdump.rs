use crate::events::translate_key;
use crate::theme::Theme;
use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::UIState;
use crossterm::event::KeyEvent;
use hexedit_core::Session;
use hexedit_core::state::{CellAttr, DisplayMode, Window};
use hexedit_core::utils::printable;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// The offset / hex / ascii grid. Key presses that reach it go to the
/// session's dispatcher.
pub struct HexDumpView;

impl Widget for HexDumpView {
    fn render(&self, f: &mut Frame, area: Rect, session: &Session, ui_state: &mut UIState) {
        let Some(window) = ui_state.window.as_ref() else {
            return;
        };
        let theme = ui_state.theme;
        let line = window.line_length.max(1);
        let block_size = session.view.block_size();
        let rows = (area.height as usize).max(1);
        let total_rows = window.page.div_ceil(line);
        let cursor_row = window.cursor / line;

        let mut scroll = ui_state.scroll_row;
        if cursor_row < scroll {
            scroll = cursor_row;
        } else if cursor_row >= scroll + rows {
            scroll = cursor_row + 1 - rows;
        }

        let lines: Vec<Line> = (scroll..total_rows.min(scroll + rows))
            .map(|row| render_row(window, row, block_size, &theme))
            .collect();

        let col = window.cursor % line;
        let x = match window.display {
            DisplayMode::Hex => 10 + col * 3 + col / block_size + window.nibble as usize,
            DisplayMode::Ascii => 10 + line * 3 + line / block_size + col,
        };
        let cursor = Position::new(
            area.x.saturating_add(x as u16),
            area.y.saturating_add((cursor_row - scroll) as u16),
        );

        let grid = Paragraph::new(lines)
            .style(Style::default().bg(theme.background).fg(theme.foreground));
        f.render_widget(grid, area);
        if area.contains(cursor) {
            f.set_cursor_position(cursor);
        }
        ui_state.scroll_row = scroll;
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        session: &mut Session,
        _ui_state: &mut UIState,
    ) -> WidgetResult {
        match translate_key(key) {
            Some(input) => WidgetResult::Respond(session.handle_input(input)),
            None => WidgetResult::Ignored,
        }
    }
}

fn cell_style(attr: CellAttr, fg: ratatui::style::Color, theme: &Theme) -> Style {
    let mut style = Style::default().fg(fg);
    if attr.modified {
        style = style
            .fg(theme.modified_fg)
            .add_modifier(theme.modified_modifier);
    }
    if attr.marked {
        style = style
            .bg(theme.marked_bg)
            .add_modifier(theme.marked_modifier);
        if !attr.modified {
            style = style.fg(theme.marked_fg);
        }
    }
    if attr.inserted {
        style = style
            .bg(theme.inserted_bg)
            .add_modifier(Modifier::UNDERLINED);
    }
    style
}

fn render_row(window: &Window, row: usize, block_size: usize, theme: &Theme) -> Line<'static> {
    let line = window.line_length;
    let start = row * line;
    let mut spans = Vec::with_capacity(line * 3 + 2);
    spans.push(Span::styled(
        format!("{:08X}  ", window.base + start as u64),
        Style::default().fg(theme.offset),
    ));

    let mut ascii = Vec::with_capacity(line);
    for i in start..start + line {
        let is_cursor = i == window.cursor;
        let (hex_text, ascii_text, attr) = match window.bytes.get(i) {
            Some(&b) => (
                format!("{:02X}", b),
                printable(b).to_string(),
                window.attrs.get(i).copied().unwrap_or_default(),
            ),
            None => ("  ".to_string(), " ".to_string(), CellAttr::default()),
        };

        let mut hex_style = cell_style(attr, theme.hex_bytes, theme);
        let mut ascii_style = cell_style(attr, theme.hex_ascii, theme);
        if is_cursor {
            match window.display {
                DisplayMode::Hex => {
                    hex_style = theme.cursor();
                    ascii_style = ascii_style.add_modifier(Modifier::UNDERLINED);
                }
                DisplayMode::Ascii => {
                    ascii_style = theme.cursor();
                    hex_style = hex_style.add_modifier(Modifier::UNDERLINED);
                }
            }
        }

        spans.push(Span::styled(hex_text, hex_style));
        spans.push(Span::raw(" "));
        if (i + 1 - start) % block_size.max(1) == 0 {
            spans.push(Span::raw(" "));
        }
        ascii.push(Span::styled(ascii_text, ascii_style));
    }
    spans.extend(ascii);
    Line::from(spans)
}
