use crate::ui::widget::{Widget, WidgetResult, create_dialog_block};
use crate::ui_state::UIState;
use crate::utils::centered_rect;
use crossterm::event::{KeyCode, KeyEvent};
use hexedit_core::{Answer, Question, Session};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Clear, Paragraph},
};

pub struct ConfirmationDialog {
    pub title: String,
    pub question: Question,
}

impl ConfirmationDialog {
    pub fn new(title: impl Into<String>, question: Question) -> Self {
        Self {
            title: title.into(),
            question,
        }
    }

    fn instructions(&self) -> &'static str {
        if self.question.allow_cancel {
            "y: Yes  |  n: No  |  Enter / Esc: Cancel"
        } else {
            "y: Yes  |  n / Enter / Esc: No"
        }
    }
}

impl Widget for ConfirmationDialog {
    fn render(&self, f: &mut Frame, area: Rect, _session: &Session, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let title = format!(" {} ", self.title);
        let block = create_dialog_block(&title, theme);

        let area = centered_rect(50, 7, area);
        f.render_widget(Clear, area);
        f.render_widget(block.clone(), area);

        let inner = block.inner(area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Message
                Constraint::Length(1), // Gap
                Constraint::Length(1), // Instructions
            ])
            .split(inner);

        let message = Paragraph::new(self.question.message.clone())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.dialog_fg)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(message, layout[0]);

        let instructions = Paragraph::new(self.instructions())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.highlight_fg));
        f.render_widget(instructions, layout[2]);
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        session: &mut Session,
        ui_state: &mut UIState,
    ) -> WidgetResult {
        let answer = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Answer::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') => Answer::No,
            // Enter only means "no" on y/N questions; on the save question it
            // must never discard edits.
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => {
                if self.question.allow_cancel {
                    Answer::Cancel
                } else {
                    Answer::No
                }
            }
            _ => return WidgetResult::Handled,
        };
        if answer == Answer::Cancel {
            ui_state.set_status_message("Cancelled");
        }
        WidgetResult::Respond(session.answer(self.question.kind.clone(), answer))
    }
}
