use super::types::{Addressing, DisplayMode};

/// Cursor/base/nibble captured before a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSnapshot {
    pub base: u64,
    pub cursor: usize,
    pub nibble: u8,
}

/// The scrollable window over the file and the cursor inside it.
///
/// Every operation that can move the cursor takes the current effective
/// file size, and refuses (returning `false`, state untouched) any target
/// outside `[0, size]`. Offset `size` itself is the append position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub base: u64,
    pub cursor: usize,
    pub nibble: u8,
    pub display: DisplayMode,
    addressing: Addressing,
    line_length: usize,
    rows: usize,
    block_size: usize,
    sector_size: u64,
}

fn floor_to(value: u64, unit: u64) -> u64 {
    value - value % unit
}

impl ViewState {
    pub fn new(
        line_length: usize,
        rows: usize,
        block_size: usize,
        sector_size: u64,
        addressing: Addressing,
    ) -> Self {
        Self {
            base: 0,
            cursor: 0,
            nibble: 0,
            display: DisplayMode::Hex,
            addressing,
            line_length: line_length.max(1),
            rows: rows.max(1),
            block_size: block_size.max(1),
            sector_size: sector_size.max(1),
        }
    }

    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    pub fn line_length(&self) -> usize {
        self.line_length
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn sector_size(&self) -> u64 {
        self.sector_size
    }

    /// Window length in bytes. In sector mode it is a whole number of
    /// sectors, at least one.
    pub fn page(&self) -> usize {
        let raw = self.rows * self.line_length;
        match self.addressing {
            Addressing::Byte => raw,
            Addressing::Sector => {
                let sector = self.sector_size as usize;
                (raw - raw % sector).max(sector)
            }
        }
    }

    pub fn absolute(&self) -> u64 {
        self.base + self.cursor as u64
    }

    /// Number of real bytes shown in the window.
    pub fn visible(&self, size: u64) -> usize {
        size.saturating_sub(self.base).min(self.page() as u64) as usize
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            base: self.base,
            cursor: self.cursor,
            nibble: self.nibble,
        }
    }

    pub fn move_cursor(&mut self, delta: i64, size: u64) -> bool {
        match self.absolute().checked_add_signed(delta) {
            Some(target) => self.set_cursor(target, size),
            None => false,
        }
    }

    /// Puts the cursor on `loc`, scrolling so it stays visible.
    pub fn set_cursor(&mut self, loc: u64, size: u64) -> bool {
        if loc > size {
            return false;
        }
        let page = self.page() as u64;
        let line = self.line_length as u64;

        if loc < self.base || loc >= self.base + page {
            match self.addressing {
                Addressing::Sector => self.base = floor_to(loc, page),
                Addressing::Byte => {
                    let phase = self.base % line;
                    self.base = if loc < self.base {
                        // Target line becomes the top line.
                        if loc < phase {
                            0
                        } else {
                            floor_to(loc - phase, line) + phase
                        }
                    } else {
                        // Target line becomes the bottom line.
                        floor_to(loc - phase, line) + phase + line - page
                    };
                }
            }
        }
        self.cursor = (loc - self.base) as usize;
        true
    }

    /// Moves the window start to `loc` (floored to a page in sector mode).
    pub fn set_base(&mut self, loc: u64, size: u64) -> bool {
        let page = self.page() as u64;
        let loc = match self.addressing {
            Addressing::Sector => floor_to(loc, page),
            Addressing::Byte => loc,
        };
        if loc > size {
            return false;
        }
        self.base = loc;

        if self.addressing == Addressing::Byte && self.base != 0 {
            let visible = self.visible(size) as u64;
            let line = self.line_length as u64;
            if visible + line < page {
                let pull = floor_to(page - visible - line, line);
                self.base = self.base.saturating_sub(pull);
            }
        }

        let visible = self.visible(size);
        if self.cursor > visible {
            self.cursor = visible;
            self.nibble = 0;
        }
        true
    }

    /// Scrolls the window by `delta` bytes; sector mode always scrolls by at
    /// least a whole page.
    pub fn move_base(&mut self, delta: i64, size: u64) -> bool {
        let page = self.page() as i64;
        let delta = match self.addressing {
            Addressing::Sector if delta > 0 && delta < page => page,
            Addressing::Sector if delta < 0 && delta > -page => -page,
            _ => delta,
        };
        let target = self.base.checked_add_signed(delta).unwrap_or(0);
        self.set_base(target, size)
    }

    pub fn toggle_display(&mut self) {
        self.display = self.display.toggled();
        self.nibble = 0;
    }

    /// Applies new terminal geometry, keeping the absolute cursor offset.
    pub fn resize(&mut self, line_length: usize, rows: usize, size: u64) {
        let abs = self.absolute().min(size);
        self.line_length = line_length.max(1);
        self.rows = rows.max(1);
        self.realign(abs, size);
    }

    fn realign(&mut self, abs: u64, size: u64) {
        if self.addressing == Addressing::Sector {
            self.base = floor_to(self.base, self.page() as u64);
        }
        self.cursor = 0;
        if !self.set_cursor(abs, size) {
            self.set_cursor(size, size);
        }
    }

    /// Re-validates base and cursor after the file size changed.
    pub fn normalize(&mut self, size: u64) {
        let misaligned = self.addressing == Addressing::Sector
            && self.base % self.page() as u64 != 0;
        if self.base > size || misaligned {
            let abs = self.absolute().min(size);
            self.set_base(abs, size);
            self.set_cursor(abs, size);
        }
        let visible = self.visible(size);
        if self.cursor > visible {
            self.cursor = visible;
            self.nibble = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn byte_view() -> ViewState {
        // 16 bytes per line, 4 rows: a 64-byte window.
        ViewState::new(16, 4, 4, 512, Addressing::Byte)
    }

    #[test]
    fn test_move_within_window() {
        let mut view = byte_view();
        assert!(view.move_cursor(5, 1000));
        assert_eq!((view.base, view.cursor), (0, 5));
    }

    #[test]
    fn test_refuses_out_of_bounds() {
        let mut view = byte_view();
        assert!(!view.move_cursor(-1, 1000));
        assert!(!view.set_cursor(1001, 1000));
        assert_eq!(view.snapshot(), ViewSnapshot::default());
    }

    #[test]
    fn test_append_position_is_reachable() {
        let mut view = byte_view();
        assert!(view.set_cursor(10, 10));
        assert_eq!(view.absolute(), 10);
        assert!(!view.move_cursor(1, 10));
    }

    #[test]
    fn test_scroll_down_keeps_target_on_bottom_line() {
        let mut view = byte_view();
        assert!(view.set_cursor(64, 1000));
        // Window of 4 lines ending with the line that holds offset 64.
        assert_eq!(view.base, 16);
        assert_eq!(view.cursor, 48);
    }

    #[test]
    fn test_scroll_up_keeps_target_on_top_line() {
        let mut view = byte_view();
        view.set_base(160, 1000);
        assert!(view.set_cursor(150, 1000));
        assert_eq!(view.base, 144);
        assert_eq!(view.absolute(), 150);
    }

    #[test]
    fn test_set_base_pulls_back_near_end() {
        let mut view = byte_view();
        assert!(view.set_base(96, 100));
        // Only 4 bytes would show; the window slides back by whole lines.
        assert_eq!(view.base, 64);
        assert_eq!(view.visible(100), 36);
    }

    #[test]
    fn test_sector_mode_pages_whole_sectors() {
        let mut view = ViewState::new(16, 40, 4, 512, Addressing::Sector);
        assert_eq!(view.page(), 512);
        assert!(view.move_cursor(520, 4096));
        assert_eq!(view.base, 512);
        assert_eq!(view.cursor, 8);
        assert!(view.move_base(16, 4096));
        assert_eq!(view.base, 1024);
        assert_eq!(view.base % 512, 0);
    }

    #[test]
    fn test_sector_mode_base_is_aligned() {
        let mut view = ViewState::new(16, 40, 4, 512, Addressing::Sector);
        assert!(view.set_base(700, 4096));
        assert_eq!(view.base, 512);
    }

    #[test]
    fn test_sector_page_never_below_one_sector() {
        let view = ViewState::new(16, 4, 4, 512, Addressing::Sector);
        assert_eq!(view.page(), 512);
    }

    #[test]
    fn test_toggle_keeps_offset() {
        let mut view = byte_view();
        view.set_cursor(33, 100);
        view.nibble = 1;
        view.toggle_display();
        assert_eq!(view.absolute(), 33);
        assert_eq!(view.display, DisplayMode::Ascii);
        assert_eq!(view.nibble, 0);
    }

    #[test]
    fn test_normalize_after_shrink() {
        let mut view = byte_view();
        view.set_cursor(90, 100);
        view.normalize(20);
        assert!(view.absolute() <= 20);
        assert!(view.cursor <= view.visible(20));
    }

    #[test]
    fn test_resize_keeps_absolute_offset() {
        let mut view = byte_view();
        view.set_cursor(300, 1000);
        view.resize(8, 10, 1000);
        assert_eq!(view.absolute(), 300);
        assert!(view.cursor < view.page());
    }
}
