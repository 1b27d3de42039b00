use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows of the drill screen, top to bottom.
pub struct DrillLayout {
    pub header: Rect,
    pub input: Rect,
    /// Active line followed by the lookahead line.
    pub words: Rect,
    pub hint: Rect,
    pub keyboard: Rect,
    pub footer: Rect,
}

impl DrillLayout {
    pub const KEYBOARD_HEIGHT: u16 = 3;

    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(Self::KEYBOARD_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: rows[0],
            input: rows[1],
            words: rows[2],
            hint: rows[4],
            keyboard: rows[6],
            footer: rows[8],
        }
    }
}

/// Columns available to a word line. Lines are sampled against this width.
pub fn line_width(area: Rect) -> usize {
    area.width as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_stacked_in_order() {
        let layout = DrillLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.y, 0);
        assert_eq!(layout.input.y, 1);
        assert_eq!(layout.words.y, 2);
        assert_eq!(layout.words.height, 2);
        assert_eq!(layout.hint.y, 5);
        assert_eq!(layout.keyboard.y, 7);
        assert_eq!(layout.keyboard.height, DrillLayout::KEYBOARD_HEIGHT);
        assert_eq!(layout.footer.y, 23);
        assert_eq!(layout.words.width, 80);
    }

    #[test]
    fn test_line_width_is_full_row() {
        assert_eq!(line_width(Rect::new(0, 0, 57, 10)), 57);
    }
}
