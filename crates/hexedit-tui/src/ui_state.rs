use crate::theme::Theme;
use crate::ui::widget::Widget;
use crate::utils::{classic_line_length, fit_line_length};
use hexedit_core::state::{Addressing, Window};
use hexedit_core::Session;

pub struct UIState {
    pub theme: Theme,
    pub status_message: String,
    pub active_dialog: Option<Box<dyn Widget>>,
    /// Bytes per line from the command line; `None` fits the terminal.
    pub forced_line_length: Option<usize>,
    /// Use the full terminal width instead of the classic 16 byte line.
    pub maximize: bool,
    /// Snapshot of the visible bytes, refreshed before every frame.
    pub window: Option<Window>,
    /// First grid row on screen when a sector page is taller than the
    /// terminal.
    pub scroll_row: usize,
    pub should_quit: bool,
    pub clear_requested: bool,
    pub suspend_requested: bool,
    geometry: (u16, u16),
}

impl UIState {
    pub fn new(theme: Theme, forced_line_length: Option<usize>) -> Self {
        Self {
            theme,
            status_message: String::new(),
            active_dialog: None,
            forced_line_length,
            maximize: false,
            window: None,
            scroll_row: 0,
            should_quit: false,
            clear_requested: false,
            suspend_requested: false,
            geometry: (0, 0),
        }
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Re-derives line length and row count when the terminal size
    /// changed. The last row belongs to the status bar.
    pub fn fit_to(&mut self, session: &mut Session, width: u16, height: u16) {
        if self.geometry == (width, height) {
            return;
        }
        self.geometry = (width, height);
        let sector = match session.view.addressing() {
            Addressing::Sector => Some(session.view.sector_size()),
            Addressing::Byte => None,
        };
        let block = session.view.block_size();
        let line_length = self.forced_line_length.unwrap_or_else(|| {
            let fitted = fit_line_length(width as usize, block, sector);
            if self.maximize {
                fitted
            } else {
                fitted.min(classic_line_length(block))
            }
        });
        let rows = (height as usize).saturating_sub(1).max(1);
        log::debug!("Terminal {}x{}: {} bytes x {} rows", width, height, line_length, rows);
        session.resize(line_length, rows);
        self.scroll_row = 0;
    }

    pub fn refresh(&mut self, session: &mut Session) {
        if session.previous.base != session.view.base {
            self.scroll_row = 0;
        }
        match session.window() {
            Ok(window) => self.window = Some(window),
            Err(e) => {
                log::error!("Reading the window failed: {}", e);
                self.set_status_message(e.to_string());
            }
        }
    }
}
