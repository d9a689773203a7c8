/// Which of the two columns takes typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Hex,
    Ascii,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Hex => DisplayMode::Ascii,
            DisplayMode::Ascii => DisplayMode::Hex,
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Hex => write!(f, "hex"),
            DisplayMode::Ascii => write!(f, "ascii"),
        }
    }
}

/// Addressing granularity for scrolling and goto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Addressing {
    #[default]
    Byte,
    Sector,
}

/// Display attributes of one cell of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellAttr {
    pub modified: bool,
    pub marked: bool,
    pub inserted: bool,
}

/// What the presentation layer needs to paint the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub base: u64,
    pub line_length: usize,
    pub page: usize,
    /// Effective bytes of `[base, base + bytes.len())`.
    pub bytes: Vec<u8>,
    pub attrs: Vec<CellAttr>,
    pub cursor: usize,
    pub nibble: u8,
    pub display: DisplayMode,
}
