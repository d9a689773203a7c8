#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod keymap;
pub mod persistence;
pub mod state;
pub mod utils;

pub use commands::Command;
pub use error::{EditorError, Result};
pub use events::{AfterSave, Answer, Prompt, PromptKind, Question, QuestionKind, Response};
pub use keymap::{Input, NamedKey};
pub use state::Session;
