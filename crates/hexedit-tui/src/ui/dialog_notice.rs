use crate::ui::widget::{Widget, WidgetResult, create_dialog_block};
use crate::ui_state::UIState;
use crate::utils::centered_rect;
use crossterm::event::KeyEvent;
use hexedit_core::Session;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Clear, Paragraph, Wrap},
};

/// A message that stays up until any key is pressed.
pub struct NoticeDialog {
    message: String,
}

impl NoticeDialog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Widget for NoticeDialog {
    fn render(&self, f: &mut Frame, area: Rect, _session: &Session, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let block = create_dialog_block(" hexedit ", theme);

        let area = centered_rect(50, 7, area);
        f.render_widget(Clear, area);
        f.render_widget(block.clone(), area);

        let inner = block.inner(area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Message
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let message = Paragraph::new(self.message.clone())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(
                Style::default()
                    .fg(theme.error_fg)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(message, layout[0]);

        let footer = Paragraph::new("Press any key to continue")
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.highlight_fg));
        f.render_widget(footer, layout[1]);
    }

    fn handle_input(
        &mut self,
        _key: KeyEvent,
        _session: &mut Session,
        _ui_state: &mut UIState,
    ) -> WidgetResult {
        WidgetResult::Close
    }
}
