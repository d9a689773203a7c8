use crate::ui::widget::{Widget, WidgetResult, create_dialog_block};
use crate::ui_state::UIState;
use crate::utils::centered_rect;
use crossterm::event::{KeyCode, KeyEvent};
use hexedit_core::{Command, Session};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Clear, List, ListItem};

enum Row {
    Header(&'static str),
    Key(&'static str, Command),
    Blank,
}

/// Letters after the `|` only act as commands in hex mode; in ascii mode
/// they are typed into the file.
const SHORTCUTS: &[Row] = &[
    Row::Header("Movement"),
    Row::Key("Right | l", Command::ForwardChar),
    Row::Key("Left | h", Command::BackwardChar),
    Row::Key("Down, Enter | j", Command::NextLine),
    Row::Key("Up | k", Command::PreviousLine),
    Row::Key("Ctrl+d", Command::NextLines),
    Row::Key("Ctrl+u", Command::PreviousLines),
    Row::Key("| w", Command::ForwardBlock),
    Row::Key("| W", Command::BackwardBlock),
    Row::Key("Home, Ctrl+a | ^", Command::BeginningOfLine),
    Row::Key("End, Ctrl+e | $", Command::EndOfLine),
    Row::Key("PgDn, Ctrl+f, F6", Command::PageForward),
    Row::Key("PgUp, Ctrl+b, F5", Command::PageBackward),
    Row::Key("| <", Command::BeginningOfBuffer),
    Row::Key("| >, G", Command::EndOfBuffer),
    Row::Key("F4 | g", Command::Goto),
    Row::Key("Alt+l, Esc l", Command::Recenter),
    Row::Blank,
    Row::Header("Editing"),
    Row::Key("Tab, Ctrl+t", Command::ToggleDisplay),
    Row::Key("Ctrl+q", Command::QuotedInsert),
    Row::Key("Backspace, Ctrl+h", Command::DeleteBackwardChar),
    Row::Key("Ctrl+Alt+h", Command::DeleteBackwardBlock),
    Row::Key("Delete | x", Command::DeleteForwardChar),
    Row::Key("Ctrl+_ | u", Command::Undo),
    Row::Key("| i", Command::InsertString),
    Row::Key("Alt+t", Command::Truncate),
    Row::Blank,
    Row::Header("Marking"),
    Row::Key("F9 | v", Command::SetMark),
    Row::Key("F7 | y", Command::CopyRegion),
    Row::Key("F8 | p", Command::Yank),
    Row::Key("F11 | P", Command::YankToFile),
    Row::Key("F12", Command::Fill),
    Row::Key("| d", Command::RemoveMarked),
    Row::Blank,
    Row::Header("Files"),
    Row::Key("Ctrl+w, F2", Command::Save),
    Row::Key("F3, Ctrl+o", Command::OpenFile),
    Row::Key("| :", Command::CommandLine),
    Row::Key("F1, Esc h", Command::Help),
    Row::Key("Ctrl+l", Command::Redisplay),
    Row::Key("Ctrl+z", Command::Suspend),
    Row::Key("F10, Ctrl+x", Command::SaveAndQuit),
    Row::Key("Ctrl+c", Command::Quit),
];

pub struct ShortcutsDialog {
    pub scroll_offset: usize,
}

impl Default for ShortcutsDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutsDialog {
    pub fn new() -> Self {
        Self { scroll_offset: 0 }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < SHORTCUTS.len() {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

impl Widget for ShortcutsDialog {
    fn render(&self, f: &mut Frame, area: Rect, _session: &Session, ui_state: &mut UIState) {
        let theme = &ui_state.theme;
        let area = centered_rect(60, area.height.saturating_sub(4), area);
        f.render_widget(Clear, area);

        let block = create_dialog_block(" Keyboard Shortcuts ", theme);

        let items: Vec<ListItem> = SHORTCUTS
            .iter()
            .skip(self.scroll_offset)
            .map(|row| match row {
                Row::Blank => ListItem::new(""),
                Row::Header(title) => ListItem::new(Span::styled(
                    *title,
                    Style::default()
                        .fg(theme.highlight_fg)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )),
                Row::Key(keys, command) => ListItem::new(format!("{:<22} {}", keys, command.name()))
                    .style(Style::default().fg(theme.dialog_fg)),
            })
            .collect();

        f.render_widget(List::new(items).block(block), area);
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        _session: &mut Session,
        _ui_state: &mut UIState,
    ) -> WidgetResult {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::F(1) => WidgetResult::Close,
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down();
                WidgetResult::Handled
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up();
                WidgetResult::Handled
            }
            KeyCode::PageDown => {
                for _ in 0..10 {
                    self.scroll_down();
                }
                WidgetResult::Handled
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                WidgetResult::Handled
            }
            _ => WidgetResult::Handled,
        }
    }
}
