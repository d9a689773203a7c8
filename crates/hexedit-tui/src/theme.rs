use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,

    // Hex grid
    pub offset: Color,
    pub hex_bytes: Color,
    pub hex_ascii: Color,
    pub modified_fg: Color,
    pub marked_bg: Color,
    pub marked_fg: Color,
    pub inserted_bg: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,

    // UI elements
    pub dialog_bg: Color,
    pub dialog_fg: Color,
    pub dialog_border: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error_fg: Color,

    /// Extra modifiers for cells that colors alone would not distinguish.
    pub modified_modifier: Modifier,
    pub marked_modifier: Modifier,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn for_color(color: bool) -> Self {
        if color { Self::dark() } else { Self::mono() }
    }

    pub fn dark() -> Self {
        Self {
            name: "Dark",
            background: Color::Reset,
            foreground: Color::Gray,
            status_bar_bg: Color::Rgb(40, 44, 52),
            status_bar_fg: Color::White,

            offset: Color::Cyan,
            hex_bytes: Color::Gray,
            hex_ascii: Color::Green,
            modified_fg: Color::Yellow,
            marked_bg: Color::Blue,
            marked_fg: Color::White,
            inserted_bg: Color::Magenta,
            cursor_bg: Color::Rgb(200, 200, 200),
            cursor_fg: Color::Black,

            dialog_bg: Color::Rgb(30, 33, 39),
            dialog_fg: Color::White,
            dialog_border: Color::Cyan,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Rgb(60, 64, 72),
            error_fg: Color::Red,

            modified_modifier: Modifier::BOLD,
            marked_modifier: Modifier::empty(),
        }
    }

    /// No colors at all: attributes only, for terminals started with
    /// `--no-color`.
    pub fn mono() -> Self {
        Self {
            name: "Mono",
            background: Color::Reset,
            foreground: Color::Reset,
            status_bar_bg: Color::Reset,
            status_bar_fg: Color::Reset,

            offset: Color::Reset,
            hex_bytes: Color::Reset,
            hex_ascii: Color::Reset,
            modified_fg: Color::Reset,
            marked_bg: Color::Reset,
            marked_fg: Color::Reset,
            inserted_bg: Color::Reset,
            cursor_bg: Color::Reset,
            cursor_fg: Color::Reset,

            dialog_bg: Color::Reset,
            dialog_fg: Color::Reset,
            dialog_border: Color::Reset,
            highlight_fg: Color::Reset,
            highlight_bg: Color::Reset,
            error_fg: Color::Reset,

            modified_modifier: Modifier::BOLD,
            marked_modifier: Modifier::REVERSED,
        }
    }

    pub fn status_bar(&self) -> Style {
        let style = Style::default().bg(self.status_bar_bg).fg(self.status_bar_fg);
        if self.status_bar_bg == Color::Reset {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn cursor(&self) -> Style {
        let style = Style::default().bg(self.cursor_bg).fg(self.cursor_fg);
        if self.cursor_bg == Color::Reset {
            style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED)
        } else {
            style
        }
    }
}
