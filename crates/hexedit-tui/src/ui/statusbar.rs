use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::UIState;
use crossterm::event::KeyEvent;
use hexedit_core::Session;
use hexedit_core::state::Addressing;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

pub struct StatusBar;

/// The left half of the status line: modified flag, file name, position
/// and percentage, sector number in sector mode.
pub fn modeline(session: &Session) -> String {
    let size = session.effective_size();
    let abs = session.view.absolute();
    let name = session
        .store
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let percent = if size == 0 { 0 } else { abs * 100 / size };
    let mut line = format!(
        "-{}  {}       --0x{:X}/0x{:X}--{}%",
        if session.is_modified() { "**" } else { "--" },
        name,
        abs,
        size,
        percent,
    );
    if session.view.addressing() == Addressing::Sector {
        line.push_str(&format!("--sector {}", abs / session.view.sector_size()));
    }
    if session.is_read_only() {
        line.push_str("--RO");
    }
    line
}

impl Widget for StatusBar {
    fn render(&self, f: &mut Frame, area: Rect, session: &Session, ui_state: &mut UIState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        let style = ui_state.theme.status_bar();

        let info = Paragraph::new(Span::styled(
            modeline(session),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .style(style);
        f.render_widget(info, chunks[0]);

        let message = Paragraph::new(format!("{} ", ui_state.status_message))
            .alignment(Alignment::Right)
            .style(style);
        f.render_widget(message, chunks[1]);
    }

    fn handle_input(
        &mut self,
        _key: KeyEvent,
        _session: &mut Session,
        _ui_state: &mut UIState,
    ) -> WidgetResult {
        WidgetResult::Ignored
    }
}
