use crate::ui::widget::{Widget, WidgetResult, create_dialog_block};
use crate::ui_state::UIState;
use crate::utils::centered_rect;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hexedit_core::{Prompt, PromptKind, Session};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::{Clear, Paragraph},
};

/// One-line text entry for goto, insert, fill and file names.
pub struct PromptDialog {
    pub kind: PromptKind,
    pub label: String,
    pub input: String,
}

impl PromptDialog {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            kind: prompt.kind,
            label: prompt.label,
            input: prompt.initial,
        }
    }
}

impl Widget for PromptDialog {
    fn render(&self, f: &mut Frame, area: Rect, _session: &Session, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let title = format!(" {} ", self.label.trim_end());
        let block = create_dialog_block(&title, theme);

        let area = centered_rect(60, 3, area);
        f.render_widget(Clear, area);
        let inner = block.inner(area);

        let input = Paragraph::new(self.input.clone()).block(block).style(
            Style::default()
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(input, area);

        let x = inner.x.saturating_add(self.input.chars().count() as u16);
        f.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y));
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        session: &mut Session,
        ui_state: &mut UIState,
    ) -> WidgetResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                ui_state.set_status_message("Cancelled");
                WidgetResult::Close
            }
            KeyCode::Char('g') | KeyCode::Char('c') if ctrl => {
                ui_state.set_status_message("Cancelled");
                WidgetResult::Close
            }
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                WidgetResult::Handled
            }
            KeyCode::Enter => WidgetResult::Respond(session.submit(self.kind, &self.input)),
            KeyCode::Backspace => {
                self.input.pop();
                WidgetResult::Handled
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                WidgetResult::Handled
            }
            _ => WidgetResult::Handled,
        }
    }
}
