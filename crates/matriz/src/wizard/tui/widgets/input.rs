//! Input widgets for the two kinds of answers.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use matriz_core::ChoiceOption;

use crate::wizard::tui::text::cursor_line;

fn border_color(focused: bool, valid: bool) -> Color {
    match (focused, valid) {
        (false, _) => Color::DarkGray,
        (true, true) => Color::Green,
        (true, false) => Color::Yellow,
    }
}

/// Text input widget with a char-indexed cursor. Multi-line values render
/// one line per row.
pub struct TextInput<'a> {
    value: &'a str,
    cursor_position: usize,
    placeholder: &'a str,
    title: &'a str,
    focused: bool,
    valid: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(value: &'a str, cursor_position: usize) -> Self {
        Self {
            value,
            cursor_position,
            placeholder: "Escribe tu respuesta...",
            title: " Respuesta ",
            focused: true,
            valid: true,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        let mut lines = Vec::new();
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut buffer = String::new();

        for (i, c) in self.value.chars().enumerate() {
            let at_cursor = self.focused && i == self.cursor_position;
            if at_cursor {
                if !buffer.is_empty() {
                    spans.push(Span::raw(std::mem::take(&mut buffer)));
                }
                let shown = if c == '\n' { ' ' } else { c };
                spans.push(Span::styled(shown.to_string(), cursor_style));
            } else if c != '\n' {
                buffer.push(c);
            }
            if c == '\n' {
                if !buffer.is_empty() {
                    spans.push(Span::raw(std::mem::take(&mut buffer)));
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
        }

        if !buffer.is_empty() {
            spans.push(Span::raw(buffer));
        }
        if self.focused && self.cursor_position >= self.value.chars().count() {
            spans.push(Span::styled(" ", cursor_style));
        }
        lines.push(Line::from(spans));
        lines
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color(self.focused, self.valid)))
            .title(self.title);

        let inner_area = block.inner(area);
        block.render(area, buf);

        if self.value.is_empty() && !self.focused {
            Paragraph::new(Span::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            ))
            .render(inner_area, buf);
            return;
        }

        // Keep the cursor row visible
        let row = cursor_line(self.value, self.cursor_position) as u16;
        let scroll = row.saturating_sub(inner_area.height.saturating_sub(1));

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(inner_area, buf);
    }
}

/// Single-select list. Options with a description show it after the label.
pub struct SelectInput<'a> {
    options: &'a [ChoiceOption],
    highlighted: usize,
    /// Index of the value currently stored, if any
    chosen: Option<usize>,
    focused: bool,
}

impl<'a> SelectInput<'a> {
    pub fn new(options: &'a [ChoiceOption], highlighted: usize) -> Self {
        Self {
            options,
            highlighted,
            chosen: None,
            focused: true,
        }
    }

    pub fn chosen(mut self, chosen: Option<usize>) -> Self {
        self.chosen = chosen;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SelectInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color(self.focused, self.chosen.is_some())))
            .title(" Selecciona (↑↓ para moverte, Enter para confirmar) ");

        let inner_area = block.inner(area);
        block.render(area, buf);

        if self.options.is_empty() {
            Paragraph::new(Span::styled(
                "Elige primero el tipo de investigación.",
                Style::default().fg(Color::DarkGray),
            ))
            .render(inner_area, buf);
            return;
        }

        let mut lines = vec![];
        for (i, option) in self.options.iter().enumerate() {
            let is_highlighted = i == self.highlighted;
            let marker = if self.chosen == Some(i) { "(•) " } else { "( ) " };
            let prefix = if is_highlighted { "▶ " } else { "  " };

            let style = if is_highlighted {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut line_spans = vec![
                Span::styled(prefix, style),
                Span::styled(marker, style),
                Span::styled(option.value, style),
            ];

            if let Some(desc) = option.description {
                line_spans.push(Span::styled(
                    format!(" - {}", desc),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            lines.push(Line::from(line_spans));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}
