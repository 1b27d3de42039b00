use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::keyboard::steno::{LAYOUT_ROWS, StenoKeys, key_label};
use crate::ui::theme::Theme;

/// Static steno board, dimmed, with the keys of the hinted chord lit.
pub struct KeyboardDiagram<'a> {
    pub pressed: StenoKeys,
    pub theme: &'a Theme,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(pressed: StenoKeys, theme: &'a Theme) -> Self {
        Self { pressed, theme }
    }
}

const KEY_WIDTH: u16 = 2;

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        for (row_idx, row) in LAYOUT_ROWS.iter().enumerate() {
            let y = area.y + row_idx as u16;
            if y >= area.y + area.height {
                break;
            }

            for &(col, index) in row.iter() {
                let x = area.x + col * KEY_WIDTH;
                if x >= area.x + area.width {
                    break;
                }

                let style = if self.pressed.contains(index) {
                    Style::default()
                        .fg(colors.key_active())
                        .bg(colors.key_active_bg())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(colors.key_idle())
                        .add_modifier(Modifier::DIM)
                };

                buf.set_string(x, y, key_label(index).to_string(), style);
            }
        }
    }
}
