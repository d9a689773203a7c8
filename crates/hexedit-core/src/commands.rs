use crate::error::{EditorError, Result};
use crate::events::{AfterSave, Prompt, PromptKind, Question, QuestionKind, Response};
use crate::state::session::PendingKey;
use crate::state::{Addressing, DisplayMode, Session};
use crate::utils::hex_value;

/// Everything a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ForwardChar,
    BackwardChar,
    NextLine,
    PreviousLine,
    NextLines,
    PreviousLines,
    ForwardBlock,
    BackwardBlock,
    BeginningOfLine,
    EndOfLine,
    PageForward,
    PageBackward,
    BeginningOfBuffer,
    EndOfBuffer,
    Goto,
    Recenter,
    ToggleDisplay,
    Suspend,
    Undo,
    QuotedInsert,
    Escape,
    Save,
    Help,
    OpenFile,
    Redisplay,
    DeleteBackwardChar,
    DeleteBackwardBlock,
    DeleteForwardChar,
    SetMark,
    CopyRegion,
    Yank,
    YankToFile,
    Fill,
    Truncate,
    CommandLine,
    InsertString,
    RemoveMarked,
    Quit,
    SaveAndQuit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ForwardChar => "Forward character",
            Command::BackwardChar => "Backward character",
            Command::NextLine => "Next line",
            Command::PreviousLine => "Previous line",
            Command::NextLines => "Forward a block of lines",
            Command::PreviousLines => "Backward a block of lines",
            Command::ForwardBlock => "Forward one block",
            Command::BackwardBlock => "Backward one block",
            Command::BeginningOfLine => "Beginning of line",
            Command::EndOfLine => "End of line",
            Command::PageForward => "Page down",
            Command::PageBackward => "Page up",
            Command::BeginningOfBuffer => "Beginning of file",
            Command::EndOfBuffer => "End of file",
            Command::Goto => "Go to offset or sector",
            Command::Recenter => "Scroll cursor line to top",
            Command::ToggleDisplay => "Toggle hex/ascii",
            Command::Suspend => "Suspend",
            Command::Undo => "Undo all pending changes",
            Command::QuotedInsert => "Insert next key literally",
            Command::Escape => "Escape prefix",
            Command::Save => "Save",
            Command::Help => "Help",
            Command::OpenFile => "Open another file",
            Command::Redisplay => "Redraw screen",
            Command::DeleteBackwardChar => "Revert previous byte",
            Command::DeleteBackwardBlock => "Revert previous block",
            Command::DeleteForwardChar => "Revert byte under cursor",
            Command::SetMark => "Start or stop marking",
            Command::CopyRegion => "Copy marked bytes",
            Command::Yank => "Paste",
            Command::YankToFile => "Paste into a file",
            Command::Fill => "Fill marked bytes",
            Command::Truncate => "Truncate file at cursor",
            Command::CommandLine => "Command line (w, q)",
            Command::InsertString => "Insert bytes",
            Command::RemoveMarked => "Delete marked bytes",
            Command::Quit => "Quit without saving",
            Command::SaveAndQuit => "Quit",
        }
    }
}

impl Session {
    pub fn execute(&mut self, command: Command) -> Response {
        log::trace!("Executing {:?}", command);
        let line = self.view.line_length() as i64;
        let block = self.view.block_size() as i64;
        let page = self.view.page() as i64;

        match command {
            Command::ForwardChar => self.forward_char(),
            Command::BackwardChar => self.backward_char(),
            Command::NextLine => self.move_by(line),
            Command::PreviousLine => self.move_by(-line),
            Command::NextLines => self.move_by(line * block),
            Command::PreviousLines => self.move_by(-line * block),
            Command::ForwardBlock => self.move_by(block),
            Command::BackwardBlock => self.move_by(-block),
            Command::BeginningOfLine => self.beginning_of_line(),
            Command::EndOfLine => self.end_of_line(),
            Command::PageForward => {
                let size = self.effective_size();
                self.view.move_base(page, size);
            }
            Command::PageBackward => {
                let size = self.effective_size();
                self.view.move_base(-page, size);
            }
            Command::BeginningOfBuffer => self.beginning_of_buffer(),
            Command::EndOfBuffer => self.end_of_buffer(),
            Command::Goto => return self.goto_prompt(),
            Command::Recenter => self.recenter(),
            Command::ToggleDisplay => self.view.toggle_display(),
            Command::Suspend => return Response::Suspend,
            Command::Undo => self.undo(),
            Command::QuotedInsert => self.pending = PendingKey::Quoted,
            Command::Escape => self.pending = PendingKey::Escape,
            Command::Save => return self.save(),
            Command::Help => return Response::Help,
            Command::OpenFile => return self.ask_about_save(AfterSave::OpenFile),
            Command::Redisplay => return Response::Redraw,
            Command::DeleteBackwardChar => self.delete_backward(1),
            Command::DeleteBackwardBlock => self.delete_backward(block as usize),
            Command::DeleteForwardChar => self.delete_forward_char(),
            Command::SetMark => self.set_mark(),
            Command::CopyRegion => return self.copy_region(),
            Command::Yank => return self.yank(),
            Command::YankToFile => {
                if self.clipboard.is_empty() {
                    return Response::Notice("Nothing to paste".to_string());
                }
                return Response::Prompt(Prompt {
                    kind: PromptKind::YankFile,
                    label: "File name: ".to_string(),
                    initial: String::new(),
                });
            }
            Command::Fill => {
                if !self.selection.is_set() {
                    return Response::Notice("Nothing marked".to_string());
                }
                if self.is_read_only() {
                    return Response::Notice(EditorError::ReadOnly.to_string());
                }
                return self.fill_prompt();
            }
            Command::Truncate => {
                if self.is_read_only() {
                    return Response::Notice(EditorError::ReadOnly.to_string());
                }
                return Response::Confirm(Question {
                    kind: QuestionKind::Truncate,
                    message: "Really truncate here? (y/N)".to_string(),
                    allow_cancel: false,
                });
            }
            Command::CommandLine => {
                return Response::Prompt(Prompt {
                    kind: PromptKind::CommandLine,
                    label: ":".to_string(),
                    initial: String::new(),
                });
            }
            Command::InsertString => {
                if self.is_read_only() {
                    return Response::Notice(EditorError::ReadOnly.to_string());
                }
                return self.ask_about_save(AfterSave::InsertString);
            }
            Command::RemoveMarked => {
                if !self.selection.is_set() {
                    return Response::Notice("Nothing marked".to_string());
                }
                if self.is_read_only() {
                    return Response::Notice(EditorError::ReadOnly.to_string());
                }
                return self.ask_about_save(AfterSave::RemoveMarked);
            }
            Command::Quit => return Response::Quit,
            Command::SaveAndQuit => return self.ask_about_save(AfterSave::Quit),
        }
        Response::Done
    }

    fn move_by(&mut self, delta: i64) {
        let size = self.effective_size();
        self.view.move_cursor(delta, size);
    }

    /// In hex mode the first step goes to the low nibble, the second to the
    /// next byte.
    pub fn forward_char(&mut self) {
        let size = self.effective_size();
        match self.view.display {
            DisplayMode::Ascii => {
                self.view.move_cursor(1, size);
            }
            DisplayMode::Hex => {
                let at_append = self.view.absolute() >= size;
                if self.view.nibble == 0 && !at_append {
                    self.view.nibble = 1;
                } else if self.view.move_cursor(1, size) {
                    self.view.nibble = 0;
                }
            }
        }
    }

    pub fn backward_char(&mut self) {
        let size = self.effective_size();
        match self.view.display {
            DisplayMode::Ascii => {
                self.view.move_cursor(-1, size);
            }
            DisplayMode::Hex => {
                if self.view.nibble == 1 {
                    self.view.nibble = 0;
                } else if self.view.move_cursor(-1, size) {
                    self.view.nibble = 1;
                }
            }
        }
    }

    fn beginning_of_line(&mut self) {
        let line = self.view.line_length();
        self.view.nibble = 0;
        self.move_by(-((self.view.cursor % line) as i64));
    }

    /// Last byte of the line, or the end of the data when the line is short.
    fn end_of_line(&mut self) {
        let size = self.effective_size();
        let line = self.view.line_length();
        self.view.nibble = 0;
        let to_line_end = (line - 1 - self.view.cursor % line) as i64;
        if !self.view.move_cursor(to_line_end, size) {
            let to_data_end = self.view.visible(size) as i64 - self.view.cursor as i64;
            self.view.move_cursor(to_data_end, size);
        }
    }

    fn beginning_of_buffer(&mut self) {
        let size = self.effective_size();
        self.view.nibble = 0;
        self.view.set_cursor(0, size);
    }

    pub(crate) fn end_of_buffer(&mut self) {
        let size = self.effective_size();
        self.view.nibble = 0;
        if self.view.addressing() == Addressing::Sector {
            let page = self.view.page() as u64;
            self.view.set_base(size - size % page, size);
        }
        self.view.set_cursor(size, size);
    }

    /// Makes the cursor line the top line of the window.
    fn recenter(&mut self) {
        if self.view.cursor == 0 {
            return;
        }
        let size = self.effective_size();
        let abs = self.view.absolute();
        self.view.set_base(abs, size);
        self.view.set_cursor(abs, size);
    }

    /// Drops pending edits behind the cursor, moving back over them.
    fn delete_backward(&mut self, count: usize) {
        let size = self.effective_size();
        if count == 1 {
            self.backward_char();
        } else {
            self.move_by(-(count as i64));
        }
        let abs = self.view.absolute();
        self.edits.remove_edits(abs, count as u64);
        self.view.nibble = 0;
        self.forget_mark_past_end(size);
        if abs > self.effective_size() {
            self.end_of_buffer();
        }
    }

    fn delete_forward_char(&mut self) {
        let abs = self.view.absolute();
        let old_size = self.effective_size();
        self.edits.remove_edits(abs, 1);
        self.forget_mark_past_end(old_size);
        let size = self.effective_size();
        self.view.move_cursor(1, size);
        self.view.nibble = 0;
        if self.view.absolute() > size {
            self.end_of_buffer();
        }
    }

    /// Overwrites the byte under the cursor with a typed key. Returns
    /// `Ok(false)` when the key is not valid data in the current mode.
    pub fn set_to(&mut self, key: u8) -> Result<bool> {
        let size = self.effective_size();
        if self.view.cursor > self.view.visible(size) {
            return Ok(false);
        }
        let abs = self.view.absolute();
        let value = match self.view.display {
            DisplayMode::Ascii => key,
            DisplayMode::Hex => {
                if !key.is_ascii_hexdigit() {
                    return Ok(false);
                }
                let digit = hex_value(key);
                let current = self.byte_at(abs)?.unwrap_or(0);
                if self.view.nibble == 0 {
                    (digit << 4) | (current & 0x0F)
                } else {
                    (current & 0xF0) | digit
                }
            }
        };
        if self.is_read_only() {
            return Err(EditorError::ReadOnly);
        }
        self.edits.set_byte(abs, value);
        self.forward_char();
        Ok(true)
    }

    fn set_mark(&mut self) {
        self.selection.toggle(self.view.absolute());
    }

    fn copy_region(&mut self) -> Response {
        let Some(range) = self.selection.range() else {
            return Response::Notice("Nothing to copy".to_string());
        };
        let len = (range.end - range.start) as usize;
        match self.read_range(range.start, len) {
            Ok(bytes) => {
                log::debug!("Copied {} bytes from {:#x}", bytes.len(), range.start);
                self.clipboard = bytes;
                self.selection.clear();
                Response::Done
            }
            Err(e) => Response::Notice(e.to_string()),
        }
    }

    fn yank(&mut self) -> Response {
        if self.clipboard.is_empty() {
            return Response::Notice("Nothing to paste".to_string());
        }
        if self.is_read_only() {
            return Response::Notice(EditorError::ReadOnly.to_string());
        }
        let abs = self.view.absolute();
        self.edits.write_bytes(abs, &self.clipboard);
        Response::Done
    }

    /// Repeats `pattern` over the marked bytes as pending edits. The fill
    /// stops at the end of the file and never grows it.
    pub(crate) fn fill(&mut self, pattern: &[u8]) -> Response {
        let Some(range) = self.selection.range() else {
            return Response::Notice("Nothing marked".to_string());
        };
        let range = range.start..range.end.min(self.effective_size());
        for (offset, value) in range.zip(pattern.iter().cycle()) {
            self.edits.set_byte(offset, *value);
        }
        Response::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewState;
    use std::io::Write;

    fn session_with(data: &[u8]) -> (tempfile::NamedTempFile, Session) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        let view = ViewState::new(16, 4, 4, 512, Addressing::Byte);
        let session = Session::open(file.path(), false, view).unwrap();
        (file, session)
    }

    #[test]
    fn test_forward_char_walks_nibbles() {
        let (_tmp, mut session) = session_with(b"ABCD");
        session.forward_char();
        assert_eq!((session.view.cursor, session.view.nibble), (0, 1));
        session.forward_char();
        assert_eq!((session.view.cursor, session.view.nibble), (1, 0));
        session.backward_char();
        assert_eq!((session.view.cursor, session.view.nibble), (0, 1));
    }

    #[test]
    fn test_failed_move_keeps_nibble() {
        let (_tmp, mut session) = session_with(b"AB");
        session.backward_char();
        assert_eq!((session.view.cursor, session.view.nibble), (0, 0));
    }

    #[test]
    fn test_hex_digits_set_high_then_low_nibble() {
        let (_tmp, mut session) = session_with(&[0x00, 0x00]);
        assert!(session.set_to(b'a').unwrap());
        assert_eq!(session.edits.get(0), Some(0xA0));
        assert!(session.set_to(b'5').unwrap());
        assert_eq!(session.edits.get(0), Some(0xA5));
        assert_eq!(session.view.absolute(), 1);
        assert!(!session.set_to(b'z').unwrap());
    }

    #[test]
    fn test_ascii_overwrite_moves_one_byte() {
        let (_tmp, mut session) = session_with(b"....");
        session.view.toggle_display();
        assert!(session.set_to(b'Q').unwrap());
        assert_eq!(session.edits.get(0), Some(b'Q'));
        assert_eq!(session.view.absolute(), 1);
    }

    #[test]
    fn test_end_of_line_stops_at_data_end() {
        let (_tmp, mut session) = session_with(b"0123456789");
        session.execute(Command::EndOfLine);
        assert_eq!(session.view.absolute(), 10);
        session.execute(Command::BeginningOfLine);
        assert_eq!(session.view.absolute(), 0);
    }

    #[test]
    fn test_delete_backward_reverts_edit() {
        let (_tmp, mut session) = session_with(b"ABCD");
        session.view.toggle_display();
        session.set_to(b'x').unwrap();
        session.set_to(b'y').unwrap();
        session.execute(Command::DeleteBackwardChar);
        assert_eq!(session.view.absolute(), 1);
        assert_eq!(session.edits.get(0), Some(b'x'));
        assert_eq!(session.edits.get(1), None);
        assert_eq!(session.effective_size(), 4);
    }

    #[test]
    fn test_copy_and_yank() {
        let (_tmp, mut session) = session_with(b"ABCDEFGH");
        session.execute(Command::SetMark);
        session.view.set_cursor(2, 8);
        session.selection.extend(2);
        assert_eq!(session.execute(Command::CopyRegion), Response::Done);
        assert_eq!(session.clipboard, b"ABC");
        assert!(!session.selection.is_set());

        session.view.set_cursor(5, 8);
        session.execute(Command::Yank);
        assert_eq!(session.read_range(0, 8).unwrap(), b"ABCDEABC");
    }

    #[test]
    fn test_copy_without_mark() {
        let (_tmp, mut session) = session_with(b"AB");
        assert_eq!(
            session.execute(Command::CopyRegion),
            Response::Notice("Nothing to copy".to_string())
        );
    }

    #[test]
    fn test_fill_repeats_pattern() {
        let (_tmp, mut session) = session_with(&[0u8; 8]);
        session.selection.toggle(1);
        session.selection.extend(5);
        session.fill(&[0xAB, 0xCD]);
        assert_eq!(
            session.read_range(0, 8).unwrap(),
            vec![0, 0xAB, 0xCD, 0xAB, 0xCD, 0xAB, 0, 0]
        );
    }

    #[test]
    fn test_fill_stops_at_end_of_file() {
        let (_tmp, mut session) = session_with(&[0u8; 8]);
        session.selection.toggle(6);
        session.selection.extend(8);
        session.fill(&[0xEE]);
        assert_eq!(session.effective_size(), 8);
        assert_eq!(session.edits.last_edited_loc(), 8);
    }

    #[test]
    fn test_truncate_asks_first() {
        let (_tmp, mut session) = session_with(b"ABCD");
        assert!(matches!(
            session.execute(Command::Truncate),
            Response::Confirm(Question {
                kind: QuestionKind::Truncate,
                ..
            })
        ));
    }
}
