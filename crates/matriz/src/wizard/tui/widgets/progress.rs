//! Step progress gauge.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Gauge, Widget},
};

/// Position within the step sequence
pub struct ProgressWidget {
    percentage: u8,
    label: String,
}

impl ProgressWidget {
    /// `index` is zero-based; `index == total` means the summary
    pub fn new(index: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (index.min(total) * 100 / total) as u8
        };
        let label = if index >= total {
            format!("Resumen · {} pasos completados", total)
        } else {
            format!("Paso {} de {}", index + 1, total)
        };
        Self { percentage, label }
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }
}

impl Widget for ProgressWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = match self.percentage {
            0..=25 => Color::Red,
            26..=50 => Color::Yellow,
            51..=75 => Color::Blue,
            _ => Color::Green,
        };

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .percent(self.percentage as u16)
            .label(self.label);

        gauge.render(area, buf);
    }
}
