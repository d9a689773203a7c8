//! Abstract input events and their mapping onto [`Command`]s.
//!
//! Lookup happens in two levels. Control keys (arrows, function keys,
//! control/alt chords) resolve the same way in both display modes. Plain
//! printable characters only act as shortcuts in hex mode; in ascii mode
//! they are data and fall through to overwrite.

use crate::commands::Command;
use crate::state::DisplayMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Tab,
    Backspace,
    Delete,
    Esc,
    F(u8),
}

/// A decoded key press. Letters inside `Ctrl`/`Alt`/`CtrlAlt` are lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Ctrl(char),
    Alt(char),
    CtrlAlt(char),
    Key(NamedKey),
}

impl Input {
    pub fn is_printable(&self) -> bool {
        matches!(self, Input::Char(_))
    }

    /// The byte this input stands for when taken literally (typed data and
    /// quoted insert). Only ASCII characters map to a byte; anything else,
    /// Latin-1 included, has no literal value.
    pub fn literal_byte(&self) -> Option<u8> {
        match *self {
            Input::Char(c) => c.is_ascii().then_some(c as u8),
            Input::Ctrl(c) | Input::CtrlAlt(c) => c.is_ascii().then_some(c as u8 & 0x1F),
            Input::Alt(_) => None,
            Input::Key(NamedKey::Enter) => Some(b'\r'),
            Input::Key(NamedKey::Tab) => Some(b'\t'),
            Input::Key(NamedKey::Backspace) => Some(0x7F),
            Input::Key(NamedKey::Esc) => Some(0x1B),
            Input::Key(_) => None,
        }
    }
}

pub fn resolve(input: Input, display: DisplayMode) -> Option<Command> {
    if let Some(command) = control_command(input) {
        return Some(command);
    }
    match (input, display) {
        (Input::Char(c), DisplayMode::Hex) => printable_command(c),
        _ => None,
    }
}

fn control_command(input: Input) -> Option<Command> {
    use NamedKey::*;
    let command = match input {
        Input::Key(Right) => Command::ForwardChar,
        Input::Key(Left) => Command::BackwardChar,
        Input::Key(Down) | Input::Key(Enter) => Command::NextLine,
        Input::Key(Up) => Command::PreviousLine,
        Input::Ctrl('d') => Command::NextLines,
        Input::Ctrl('u') => Command::PreviousLines,
        Input::Key(Home) | Input::Ctrl('a') => Command::BeginningOfLine,
        Input::Key(End) | Input::Ctrl('e') => Command::EndOfLine,
        Input::Key(PageDown) | Input::Ctrl('f') | Input::Key(F(6)) => Command::PageForward,
        Input::Key(PageUp) | Input::Ctrl('b') | Input::Key(F(5)) => Command::PageBackward,
        Input::Ctrl('z') => Command::Suspend,
        Input::Ctrl('_') | Input::Ctrl('/') => Command::Undo,
        Input::Ctrl('q') => Command::QuotedInsert,
        Input::Key(Tab) | Input::Ctrl('t') => Command::ToggleDisplay,
        Input::Key(F(4)) => Command::Goto,
        Input::Alt('l') => Command::Recenter,
        Input::Ctrl('w') | Input::Key(F(2)) => Command::Save,
        Input::Key(Esc) => Command::Escape,
        Input::Key(F(1)) => Command::Help,
        Input::Key(F(3)) | Input::Ctrl('o') => Command::OpenFile,
        Input::Ctrl('l') => Command::Redisplay,
        Input::Key(Backspace) | Input::Ctrl('h') => Command::DeleteBackwardChar,
        Input::CtrlAlt('h') => Command::DeleteBackwardBlock,
        Input::Key(Delete) => Command::DeleteForwardChar,
        Input::Key(F(9)) => Command::SetMark,
        Input::Key(F(7)) => Command::CopyRegion,
        Input::Key(F(8)) => Command::Yank,
        Input::Key(F(11)) => Command::YankToFile,
        Input::Key(F(12)) => Command::Fill,
        Input::Ctrl('c') => Command::Quit,
        Input::Alt('t') => Command::Truncate,
        Input::Key(F(10)) | Input::Ctrl('x') => Command::SaveAndQuit,
        _ => return None,
    };
    Some(command)
}

fn printable_command(c: char) -> Option<Command> {
    let command = match c {
        'l' => Command::ForwardChar,
        'h' => Command::BackwardChar,
        'j' => Command::NextLine,
        'k' => Command::PreviousLine,
        'w' => Command::ForwardBlock,
        'W' => Command::BackwardBlock,
        '^' => Command::BeginningOfLine,
        '$' => Command::EndOfLine,
        '<' => Command::BeginningOfBuffer,
        '>' | 'G' => Command::EndOfBuffer,
        'u' => Command::Undo,
        'g' => Command::Goto,
        'x' => Command::DeleteForwardChar,
        'v' => Command::SetMark,
        'y' => Command::CopyRegion,
        'p' => Command::Yank,
        'P' => Command::YankToFile,
        ':' => Command::CommandLine,
        'i' => Command::InsertString,
        'd' => Command::RemoveMarked,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_gated_by_display_mode() {
        assert_eq!(
            resolve(Input::Char('j'), DisplayMode::Hex),
            Some(Command::NextLine)
        );
        assert_eq!(resolve(Input::Char('j'), DisplayMode::Ascii), None);
        assert_eq!(resolve(Input::Char('i'), DisplayMode::Ascii), None);
        assert_eq!(resolve(Input::Char('d'), DisplayMode::Ascii), None);
    }

    #[test]
    fn test_control_keys_work_in_both_modes() {
        for display in [DisplayMode::Hex, DisplayMode::Ascii] {
            assert_eq!(
                resolve(Input::Key(NamedKey::Down), display),
                Some(Command::NextLine)
            );
            assert_eq!(resolve(Input::Ctrl('w'), display), Some(Command::Save));
            assert_eq!(resolve(Input::Key(NamedKey::F(9)), display), Some(Command::SetMark));
            assert_eq!(resolve(Input::Alt('t'), display), Some(Command::Truncate));
        }
    }

    #[test]
    fn test_hex_digits_without_shortcut_fall_through() {
        assert_eq!(resolve(Input::Char('a'), DisplayMode::Hex), None);
        assert_eq!(resolve(Input::Char('7'), DisplayMode::Hex), None);
        assert_eq!(resolve(Input::Char('D'), DisplayMode::Hex), None);
    }

    #[test]
    fn test_literal_bytes() {
        assert_eq!(Input::Char('A').literal_byte(), Some(0x41));
        assert_eq!(Input::Ctrl('a').literal_byte(), Some(0x01));
        assert_eq!(Input::Key(NamedKey::Enter).literal_byte(), Some(0x0D));
        assert_eq!(Input::Char('\u{263A}').literal_byte(), None);
        assert_eq!(Input::Char('\u{E9}').literal_byte(), None);
        assert_eq!(Input::Char('\u{7F}').literal_byte(), Some(0x7F));
        assert_eq!(Input::Key(NamedKey::Up).literal_byte(), None);
    }
}
