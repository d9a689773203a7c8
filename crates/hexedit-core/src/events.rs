//! Input entry points of a [`Session`] and the responses it hands back.
//!
//! The core never talks to the terminal. Anything that needs the user's
//! attention (a typed answer, a yes/no question, a notice to acknowledge)
//! comes back as a [`Response`]; the front end collects the reply and calls
//! [`Session::submit`] or [`Session::answer`] with it.

use crate::commands::Command;
use crate::error::EditorError;
use crate::keymap::{self, Input};
use crate::state::session::PendingKey;
use crate::state::{Addressing, DisplayMode, Session};
use crate::utils::{parse_hex_string, parse_number};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Done,
    /// Clear and repaint the whole screen.
    Redraw,
    /// One-line status text; does not block.
    Message(String),
    /// Must be acknowledged with a key press before editing resumes.
    Notice(String),
    Prompt(Prompt),
    Confirm(Question),
    Help,
    Suspend,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    GotoOffset,
    GotoSector,
    InsertString,
    FillPattern,
    YankFile,
    OpenFile,
    CommandLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub label: String,
    pub initial: String,
}

/// What to carry on with once pending changes are saved or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSave {
    Quit,
    OpenFile,
    InsertString,
    RemoveMarked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Truncate,
    SaveChanges(AfterSave),
    OverwriteFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: QuestionKind,
    pub message: String,
    pub allow_cancel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Cancel,
}

impl Prompt {
    fn new(kind: PromptKind, label: &str, initial: impl Into<String>) -> Response {
        Response::Prompt(Prompt {
            kind,
            label: label.to_string(),
            initial: initial.into(),
        })
    }
}

impl Session {
    /// Runs one key press through the dispatcher.
    pub fn handle_input(&mut self, input: Input) -> Response {
        self.previous = self.view.snapshot();
        self.highlight = None;

        let response = match std::mem::take(&mut self.pending) {
            PendingKey::Quoted => match input.literal_byte() {
                Some(byte) => self.overwrite(byte),
                None => Response::Done,
            },
            PendingKey::Escape => match input {
                Input::Char('l') => self.execute(Command::Recenter),
                Input::Char('h') => Response::Help,
                _ => self.unknown_command(),
            },
            PendingKey::None => match keymap::resolve(input, self.view.display) {
                Some(command) => self.execute(command),
                None => match input {
                    Input::Char(_) => match input.literal_byte() {
                        Some(byte) => self.overwrite(byte),
                        None => self.unknown_command(),
                    },
                    _ => self.unknown_command(),
                },
            },
        };

        self.after_command();
        response
    }

    /// Treats `byte` as data for the byte under the cursor.
    fn overwrite(&mut self, byte: u8) -> Response {
        match self.set_to(byte) {
            Ok(true) => Response::Done,
            Ok(false) => self.unknown_command(),
            Err(e) => Response::Notice(e.to_string()),
        }
    }

    /// The help hint is shown for the first unknown key only.
    pub(crate) fn unknown_command(&mut self) -> Response {
        if self.hint_shown {
            return Response::Done;
        }
        self.hint_shown = true;
        Response::Message(EditorError::UnknownCommand.to_string())
    }

    pub(crate) fn goto_prompt(&self) -> Response {
        match self.view.addressing() {
            Addressing::Sector => Prompt::new(PromptKind::GotoSector, "New sector ? ", ""),
            Addressing::Byte => Prompt::new(PromptKind::GotoOffset, "New position ? ", "0x"),
        }
    }

    fn string_prompt(&self, kind: PromptKind, verb: &str) -> Response {
        let (label, initial) = match self.view.display {
            DisplayMode::Hex => (format!("Hex string to {verb}: "), &self.last_hex_string),
            DisplayMode::Ascii => (format!("Ascii string to {verb}: "), &self.last_ascii_string),
        };
        Prompt::new(kind, &label, initial.clone())
    }

    pub(crate) fn fill_prompt(&self) -> Response {
        self.string_prompt(PromptKind::FillPattern, "fill with")
    }

    /// Structural edits and file switches need an empty log first.
    pub(crate) fn ask_about_save(&mut self, then: AfterSave) -> Response {
        if self.edits.is_empty() {
            return self.continue_after_save(then);
        }
        Response::Confirm(Question {
            kind: QuestionKind::SaveChanges(then),
            message: "Save changes (Yes/No/Cancel) ?".to_string(),
            allow_cancel: true,
        })
    }

    fn continue_after_save(&mut self, then: AfterSave) -> Response {
        match then {
            AfterSave::Quit => Response::Quit,
            AfterSave::OpenFile => Prompt::new(PromptKind::OpenFile, "File name: ", ""),
            AfterSave::InsertString => self.string_prompt(PromptKind::InsertString, "insert"),
            AfterSave::RemoveMarked => self.remove_marked(),
        }
    }

    /// Delivers the text typed into a prompt. An empty answer aborts.
    pub fn submit(&mut self, kind: PromptKind, text: &str) -> Response {
        let response = self.dispatch_submit(kind, text);
        self.after_command();
        response
    }

    fn dispatch_submit(&mut self, kind: PromptKind, text: &str) -> Response {
        if text.trim().is_empty() {
            return Response::Done;
        }
        match kind {
            PromptKind::GotoOffset => {
                let size = self.effective_size();
                match parse_number(text) {
                    Some(loc) if self.view.set_cursor(loc, size) => {
                        self.view.nibble = 0;
                        Response::Done
                    }
                    _ => Response::Notice(EditorError::OutOfBounds.to_string()),
                }
            }
            PromptKind::GotoSector => {
                let size = self.effective_size();
                let loc = parse_number(text)
                    .and_then(|sector| sector.checked_mul(self.view.sector_size()));
                match loc {
                    Some(loc) if self.view.set_base(loc, size) && self.view.set_cursor(loc, size) => {
                        self.view.nibble = 0;
                        Response::Done
                    }
                    _ => Response::Notice("Invalid sector!".to_string()),
                }
            }
            PromptKind::InsertString => match self.parse_payload(text) {
                Ok(payload) if payload.is_empty() => Response::Done,
                Ok(payload) => self.insert_bytes(&payload),
                Err(e) => Response::Notice(e.to_string()),
            },
            PromptKind::FillPattern => match self.parse_payload(text) {
                Ok(pattern) if pattern.is_empty() => Response::Done,
                Ok(pattern) => self.fill(&pattern),
                Err(e) => Response::Notice(e.to_string()),
            },
            PromptKind::YankFile => {
                let path = PathBuf::from(text.trim());
                if path.exists() {
                    Response::Confirm(Question {
                        message: format!("Overwrite {}? (y/N)", path.display()),
                        kind: QuestionKind::OverwriteFile(path),
                        allow_cancel: false,
                    })
                } else {
                    self.yank_to_file(&path)
                }
            }
            PromptKind::OpenFile => self.open_file(text.trim()),
            PromptKind::CommandLine => self.run_command_line(text),
        }
    }

    /// Hex or ascii payload depending on the display mode; remembered for
    /// the next prompt of the same kind.
    fn parse_payload(&mut self, text: &str) -> crate::error::Result<Vec<u8>> {
        match self.view.display {
            DisplayMode::Hex => {
                self.last_hex_string = text.to_string();
                parse_hex_string(text)
            }
            DisplayMode::Ascii => {
                self.last_ascii_string = text.to_string();
                Ok(text.bytes().collect())
            }
        }
    }

    /// `:` line: `w` saves, `q` quits, in the order typed.
    fn run_command_line(&mut self, text: &str) -> Response {
        for c in text.trim().chars() {
            match c {
                'w' => {
                    if let notice @ Response::Notice(_) = self.save() {
                        return notice;
                    }
                }
                'q' => return self.ask_about_save(AfterSave::Quit),
                ' ' => {}
                _ => return Response::Notice(format!("Not an editor command: {c}")),
            }
        }
        Response::Done
    }

    /// Delivers the user's answer to a [`Question`].
    pub fn answer(&mut self, kind: QuestionKind, answer: Answer) -> Response {
        let response = match (kind, answer) {
            (QuestionKind::Truncate, Answer::Yes) => self.truncate_at_cursor(),
            (QuestionKind::SaveChanges(then), Answer::Yes) => match self.save() {
                notice @ Response::Notice(_) => notice,
                _ => self.continue_after_save(then),
            },
            (QuestionKind::SaveChanges(then), Answer::No) => {
                self.undo();
                self.continue_after_save(then)
            }
            (QuestionKind::OverwriteFile(path), Answer::Yes) => self.yank_to_file(&path),
            _ => Response::Done,
        };
        self.after_command();
        response
    }
}
