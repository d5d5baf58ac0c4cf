//! Bars widget - the array as a vertical bar chart
//!
//! Columns map onto elements proportionally: wide terminals stretch each bar
//! over several columns, narrow ones sample. Heights use eighth blocks, scaled
//! so `max` fills the area.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::step::Step;
use crate::tui::theme::{symbols, BarTheme};

pub struct Bars<'a> {
    values: &'a [u32],
    max: u32,
    highlight: Option<Step>,
    sorted: bool,
    theme: &'a BarTheme,
}

impl<'a> Bars<'a> {
    pub fn new(values: &'a [u32], max: u32, theme: &'a BarTheme) -> Self {
        Self {
            values,
            max: max.max(1),
            highlight: None,
            sorted: false,
            theme,
        }
    }

    /// Highlight the elements touched by `step`
    pub fn highlight(mut self, step: Option<Step>) -> Self {
        self.highlight = step;
        self
    }

    /// Paint every bar in the sorted color
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    fn style_for(&self, index: usize) -> Style {
        match self.highlight {
            Some(step) if step.touches(index) => self.theme.active_bar(),
            _ if self.sorted => self.theme.sorted_bar(),
            _ => self.theme.bar(),
        }
    }

    /// Filled height of `value` in eighths of a row
    fn eighths(&self, value: u32, rows: u16) -> u64 {
        let capped = value.min(self.max) as u64;
        capped * rows as u64 * 8 / self.max as u64
    }
}

impl Widget for Bars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.values.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }
        let n = self.values.len();
        let width = area.width as usize;

        for column in 0..area.width {
            let index = column as usize * n / width;
            let style = self.style_for(index);
            let filled = self.eighths(self.values[index], area.height);

            for row in 0..area.height {
                let level = filled.saturating_sub(row as u64 * 8).min(8) as usize;
                if level == 0 {
                    break;
                }
                let y = area.bottom() - 1 - row;
                if let Some(cell) = buf.cell_mut((area.x + column, y)) {
                    cell.set_symbol(symbols::EIGHTHS[level]).set_style(style);
                }
            }
        }
    }
}
