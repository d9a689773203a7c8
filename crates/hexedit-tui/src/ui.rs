pub mod dialog_confirmation;
pub mod dialog_keyboard_shortcut;
pub mod dialog_notice;
pub mod dialog_prompt;
pub mod statusbar;
pub mod view_hexdump;
pub mod widget;

use crate::ui_state::UIState;
use hexedit_core::Session;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use statusbar::StatusBar;
use view_hexdump::HexDumpView;
use widget::Widget;

pub fn ui(f: &mut Frame, session: &Session, ui_state: &mut UIState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    HexDumpView.render(f, chunks[0], session, ui_state);
    StatusBar.render(f, chunks[1], session, ui_state);

    if let Some(dialog) = ui_state.active_dialog.take() {
        dialog.render(f, f.area(), session, ui_state);
        ui_state.active_dialog = Some(dialog);
    }
}
