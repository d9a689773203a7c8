use crate::ui::dialog_confirmation::ConfirmationDialog;
use crate::ui::dialog_keyboard_shortcut::ShortcutsDialog;
use crate::ui::dialog_notice::NoticeDialog;
use crate::ui::dialog_prompt::PromptDialog;
use crate::ui::ui;
use crate::ui::view_hexdump::HexDumpView;
use crate::ui::widget::{Widget, WidgetResult};
use crate::ui_state::UIState;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hexedit_core::{Input, NamedKey, Response, Session};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Decodes a crossterm key event into the editor's key vocabulary.
/// Returns `None` for keys the editor has no use for.
pub fn translate_key(key: KeyEvent) -> Option<Input> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let named = |k| Some(Input::Key(k));
    match key.code {
        KeyCode::Char(c) => {
            // Terminals report Ctrl-_ as Ctrl-7.
            let c = if ctrl && c == '7' { '_' } else { c };
            let lower = c.to_ascii_lowercase();
            Some(match (ctrl, alt) {
                (true, true) => Input::CtrlAlt(lower),
                (true, false) => Input::Ctrl(lower),
                (false, true) => Input::Alt(lower),
                (false, false) => Input::Char(c),
            })
        }
        KeyCode::Backspace if alt => Some(Input::CtrlAlt('h')),
        KeyCode::Backspace => named(NamedKey::Backspace),
        KeyCode::Enter => named(NamedKey::Enter),
        KeyCode::Tab => named(NamedKey::Tab),
        KeyCode::Delete => named(NamedKey::Delete),
        KeyCode::Esc => named(NamedKey::Esc),
        KeyCode::Up => named(NamedKey::Up),
        KeyCode::Down => named(NamedKey::Down),
        KeyCode::Left => named(NamedKey::Left),
        KeyCode::Right => named(NamedKey::Right),
        KeyCode::Home => named(NamedKey::Home),
        KeyCode::End => named(NamedKey::End),
        KeyCode::PageUp => named(NamedKey::PageUp),
        KeyCode::PageDown => named(NamedKey::PageDown),
        KeyCode::F(n) => named(NamedKey::F(n)),
        _ => None,
    }
}

/// Turns what the session answered into screen state: a status line,
/// a dialog, or a request the main loop acts on.
pub fn apply_response(response: Response, ui_state: &mut UIState) {
    match response {
        Response::Done => {}
        Response::Redraw => ui_state.clear_requested = true,
        Response::Message(message) => ui_state.set_status_message(message),
        Response::Notice(message) => {
            ui_state.active_dialog = Some(Box::new(NoticeDialog::new(message)));
        }
        Response::Prompt(prompt) => {
            ui_state.active_dialog = Some(Box::new(PromptDialog::new(prompt)));
        }
        Response::Confirm(question) => {
            ui_state.active_dialog = Some(Box::new(ConfirmationDialog::new("hexedit", question)));
        }
        Response::Help => {
            ui_state.active_dialog = Some(Box::new(ShortcutsDialog::new()));
        }
        Response::Suspend => ui_state.suspend_requested = true,
        Response::Quit => ui_state.should_quit = true,
    }
}

pub fn handle_key(key: KeyEvent, session: &mut Session, ui_state: &mut UIState) {
    if let Some(mut dialog) = ui_state.active_dialog.take() {
        match dialog.handle_input(key, session, ui_state) {
            WidgetResult::Handled | WidgetResult::Ignored => {
                // The dialog may have been replaced while it handled the key.
                if ui_state.active_dialog.is_none() {
                    ui_state.active_dialog = Some(dialog);
                }
            }
            WidgetResult::Close => {}
            WidgetResult::Respond(response) => apply_response(response, ui_state),
        }
        return;
    }

    ui_state.status_message.clear();
    if let WidgetResult::Respond(response) = HexDumpView.handle_input(key, session, ui_state) {
        apply_response(response, ui_state);
    }
}

pub fn enter_terminal(terminal: &mut Tui) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()
}

pub fn leave_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

#[cfg(unix)]
fn suspend(terminal: &mut Tui, _ui_state: &mut UIState) -> anyhow::Result<()> {
    use nix::sys::signal::{Signal, raise};

    leave_terminal(terminal)?;
    log::info!("Suspending");
    raise(Signal::SIGTSTP)?;
    log::info!("Resumed");
    enter_terminal(terminal)?;
    Ok(())
}

#[cfg(not(unix))]
fn suspend(_terminal: &mut Tui, ui_state: &mut UIState) -> anyhow::Result<()> {
    ui_state.set_status_message("Suspend is not supported on this platform");
    Ok(())
}

pub fn run_app(terminal: &mut Tui, session: &mut Session, ui_state: &mut UIState) -> anyhow::Result<()> {
    loop {
        let size = terminal.size()?;
        ui_state.fit_to(session, size.width, size.height);
        ui_state.refresh(session);

        if ui_state.clear_requested {
            ui_state.clear_requested = false;
            terminal.clear()?;
        }
        terminal.draw(|f| ui(f, session, ui_state))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key(key, session, ui_state);
            }
            Event::Resize(_, _) => ui_state.clear_requested = true,
            _ => {}
        }

        if ui_state.suspend_requested {
            ui_state.suspend_requested = false;
            suspend(terminal, ui_state)?;
        }
        if ui_state.should_quit {
            log::info!("Quitting");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_and_modified_chars() {
        assert_eq!(
            translate_key(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Input::Char('G'))
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('W'), KeyModifiers::CONTROL)),
            Some(Input::Ctrl('w'))
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('t'), KeyModifiers::ALT)),
            Some(Input::Alt('t'))
        );
        assert_eq!(
            translate_key(key(
                KeyCode::Char('h'),
                KeyModifiers::CONTROL | KeyModifiers::ALT
            )),
            Some(Input::CtrlAlt('h'))
        );
    }

    #[test]
    fn test_ctrl_underscore_variants() {
        assert_eq!(
            translate_key(key(KeyCode::Char('7'), KeyModifiers::CONTROL)),
            Some(Input::Ctrl('_'))
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('_'), KeyModifiers::CONTROL)),
            Some(Input::Ctrl('_'))
        );
        // A bare 7 is still data.
        assert_eq!(
            translate_key(key(KeyCode::Char('7'), KeyModifiers::NONE)),
            Some(Input::Char('7'))
        );
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            translate_key(key(KeyCode::F(12), KeyModifiers::NONE)),
            Some(Input::Key(NamedKey::F(12)))
        );
        assert_eq!(
            translate_key(key(KeyCode::Backspace, KeyModifiers::ALT)),
            Some(Input::CtrlAlt('h'))
        );
        assert_eq!(
            translate_key(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(Input::Key(NamedKey::PageDown))
        );
        assert_eq!(translate_key(key(KeyCode::Insert, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_apply_response_opens_dialogs() {
        let mut ui_state = UIState::new(crate::theme::Theme::dark(), None);
        apply_response(Response::Message("Saved".into()), &mut ui_state);
        assert_eq!(ui_state.status_message, "Saved");
        assert!(ui_state.active_dialog.is_none());

        apply_response(Response::Help, &mut ui_state);
        assert!(ui_state.active_dialog.is_some());

        apply_response(Response::Quit, &mut ui_state);
        assert!(ui_state.should_quit);
    }
}
