#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod events;
pub mod theme;
pub mod ui;
pub mod ui_state;
pub mod utils;
