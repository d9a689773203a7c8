use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A `percent_x` wide, `height` rows tall rectangle centered in `r`.
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(r.height)),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Screen columns one grid line of `n` bytes needs: an 8 digit offset and
/// two spaces, `n` hex pairs each followed by a space, one more space after
/// every block, then the ascii column.
pub fn line_width(n: usize, block_size: usize) -> usize {
    10 + n * 3 + n / block_size.max(1) + n
}

/// Bytes per line for a terminal `cols` wide.
///
/// Always a multiple of the block size. In sector mode it must also divide
/// the sector size so sectors start on a line boundary.
pub fn fit_line_length(cols: usize, block_size: usize, sector_size: Option<u64>) -> usize {
    let block = block_size.max(1);
    let mut n = block;
    while line_width(n + block, block) <= cols {
        n += block;
    }
    if let Some(sector) = sector_size {
        while n > block && sector % n as u64 != 0 {
            n -= block;
        }
    }
    n
}

/// The line length used unless the display is maximized: 16 bytes, or
/// the nearest block multiple below it.
pub fn classic_line_length(block_size: usize) -> usize {
    let block = block_size.max(1);
    (16 / block).max(1) * block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_line_length_classic_terminal() {
        // 80 columns with 4-byte blocks: 16 bytes use 10 + 48 + 4 + 16 = 78.
        assert_eq!(fit_line_length(80, 4, None), 16);
        assert_eq!(line_width(16, 4), 78);
    }

    #[test]
    fn test_fit_line_length_is_block_multiple() {
        for cols in 20..200 {
            let n = fit_line_length(cols, 4, None);
            assert_eq!(n % 4, 0);
            assert!(n == 4 || line_width(n, 4) <= cols);
        }
    }

    #[test]
    fn test_fit_line_length_divides_sector() {
        // 120 columns fit 24 bytes; 512 is not a multiple of 24, 16 is.
        assert_eq!(fit_line_length(120, 4, None), 24);
        assert_eq!(fit_line_length(120, 4, Some(512)), 16);
    }

    #[test]
    fn test_classic_line_length() {
        assert_eq!(classic_line_length(4), 16);
        assert_eq!(classic_line_length(3), 15);
        assert_eq!(classic_line_length(32), 32);
    }

    #[test]
    fn test_tiny_terminal_still_one_block() {
        assert_eq!(fit_line_length(5, 8, None), 8);
    }
}
