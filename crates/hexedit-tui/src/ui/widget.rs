use crate::theme::Theme;
use crate::ui_state::UIState;
use crossterm::event::KeyEvent;
use hexedit_core::{Response, Session};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

#[derive(Debug, PartialEq)]
pub enum WidgetResult {
    Ignored,
    Handled,
    Close,
    /// Close, then act on what the session answered.
    Respond(Response),
}

pub trait Widget {
    fn render(&self, f: &mut Frame, area: Rect, session: &Session, ui_state: &mut UIState);
    fn handle_input(
        &mut self,
        key: KeyEvent,
        session: &mut Session,
        ui_state: &mut UIState,
    ) -> WidgetResult;
}

pub fn create_dialog_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(theme.dialog_border))
        .style(Style::default().bg(theme.dialog_bg).fg(theme.dialog_fg))
}
