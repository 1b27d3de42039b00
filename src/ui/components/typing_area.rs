use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::session::input::CharStatus;
use crate::ui::theme::Theme;

/// The active line diffed against the input, with the lookahead line below.
pub struct TypingArea<'a> {
    target: &'a str,
    statuses: &'a [CharStatus],
    lookahead: &'a str,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(
        target: &'a str,
        statuses: &'a [CharStatus],
        lookahead: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            target,
            statuses,
            lookahead,
            theme,
        }
    }

    fn active_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        let cursor = self
            .statuses
            .iter()
            .position(|s| matches!(s, CharStatus::Pending));

        let spans: Vec<Span> = self
            .target
            .chars()
            .zip(self.statuses.iter())
            .enumerate()
            .map(|(idx, (ch, status))| {
                let style = match status {
                    CharStatus::Matched => Style::default()
                        .fg(colors.text_matched())
                        .add_modifier(Modifier::UNDERLINED),
                    CharStatus::Mismatched(_) => Style::default()
                        .fg(colors.text_mismatched())
                        .bg(colors.text_mismatched_bg())
                        .add_modifier(Modifier::REVERSED),
                    CharStatus::Pending if Some(idx) == cursor => Style::default()
                        .fg(colors.text_cursor_fg())
                        .bg(colors.text_cursor_bg()),
                    CharStatus::Pending => Style::default().fg(colors.text_pending()),
                };
                // Always show the target; the raw input is echoed above.
                Span::styled(ch.to_string(), style)
            })
            .collect();

        Line::from(spans)
    }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let lines = vec![
            self.active_line(),
            Line::from(Span::styled(
                self.lookahead,
                Style::default().fg(colors.lookahead()),
            )),
        ];
        Paragraph::new(lines)
            .style(Style::default().bg(colors.bg()))
            .render(area, buf);
    }
}
