//! Live preview of the research matrix.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
        Widget, Wrap,
    },
};

use matriz_core::export::SummarySection;
use matriz_core::FieldKey;

/// Widget for displaying the matrix built so far
pub struct MatrixWidget<'a> {
    sections: &'a [SummarySection],
    title: &'a str,
    /// Field being answered, drawn highlighted
    active: Option<FieldKey>,
    scroll_offset: u16,
}

impl<'a> MatrixWidget<'a> {
    pub fn new(sections: &'a [SummarySection]) -> Self {
        Self {
            sections,
            title: " Matriz ",
            active: None,
            scroll_offset: 0,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn active(mut self, active: Option<FieldKey>) -> Self {
        self.active = active;
        self
    }

    pub fn scroll(mut self, offset: u16) -> Self {
        self.scroll_offset = offset;
        self
    }

    fn text(&self) -> Text<'a> {
        let mut lines = vec![];

        for section in self.sections {
            lines.push(Line::from(Span::styled(
                format!("## {}", section.title),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));

            for item in &section.items {
                let is_active = self.active == Some(item.key);
                let title_style = if is_active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                };
                let value_style = if item.is_defined() {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                if item.is_list && item.is_defined() {
                    lines.push(Line::from(Span::styled(
                        format!("{}:", item.title),
                        title_style,
                    )));
                    for (i, line) in item.lines.iter().enumerate() {
                        lines.push(Line::from(Span::styled(
                            format!("  {}. {}", i + 1, line),
                            value_style,
                        )));
                    }
                } else {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{}: ", item.title), title_style),
                        Span::styled(item.lines.join(" "), value_style),
                    ]));
                }
            }
            lines.push(Line::from(""));
        }

        Text::from(lines)
    }
}

impl Widget for MatrixWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(self.title);

        let inner_area = block.inner(area);
        block.render(area, buf);

        let text = self.text();
        let content_height = text.height() as u16;
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0))
            .render(inner_area, buf);

        // Render scrollbar if content is larger than area
        if content_height > inner_area.height {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(content_height as usize)
                .position(self.scroll_offset as usize)
                .viewport_content_length(inner_area.height as usize);

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));

            scrollbar.render(inner_area, buf, &mut scrollbar_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matriz_core::export::summary;
    use matriz_core::{FieldValue, MatrixData};

    fn text_of(widget: &MatrixWidget) -> String {
        widget
            .text()
            .lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_preview_lists_objectives() {
        let mut data = MatrixData::default();
        data.set(FieldKey::Topic, FieldValue::text("Uso de redes sociales"));
        data.set(
            FieldKey::SpecificObjectives,
            FieldValue::text("Identificar usos\nDescribir hábitos"),
        );
        let sections = summary(&data);
        let out = text_of(&MatrixWidget::new(&sections));

        assert!(out.contains("## Planteamiento"));
        assert!(out.contains("Uso de redes sociales"));
        assert!(out.contains("  1. Identificar usos"));
        assert!(out.contains("  2. Describir hábitos"));
        assert!(out.contains("No definido"));
    }

    #[test]
    fn test_preview_omits_quantitative_block_for_qualitative() {
        let mut data = MatrixData::default();
        data.set(FieldKey::ResearchType, FieldValue::text("Cualitativa"));
        let sections = summary(&data);
        let out = text_of(&MatrixWidget::new(&sections));
        assert!(!out.contains("Variables e hipótesis"));
    }
}
