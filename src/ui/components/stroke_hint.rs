use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

/// Chord for the word under the cursor.
pub struct StrokeHint<'a> {
    word: &'a str,
    stroke: &'a str,
    theme: &'a Theme,
}

impl<'a> StrokeHint<'a> {
    pub fn new(word: &'a str, stroke: &'a str, theme: &'a Theme) -> Self {
        Self {
            word,
            stroke,
            theme,
        }
    }
}

impl Widget for StrokeHint<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let line = Line::from(vec![
            Span::styled(
                self.stroke,
                Style::default()
                    .fg(colors.stroke_hint())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", self.word),
                Style::default().fg(colors.lookahead()),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_stroke_then_word() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        StrokeHint::new("cat", "KAT", &theme).render(area, &mut buf);
        let text: String = (0..8).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(text, "KAT  cat");
        assert!(buf[(0, 0)].modifier.contains(Modifier::BOLD));
    }
}
