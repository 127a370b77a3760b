//! Question display widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// The active step: prompt, guidance and examples
pub struct QuestionWidget<'a> {
    question: &'a str,
    section: &'a str,
    explanation: &'a str,
    examples: &'a [&'a str],
}

impl<'a> QuestionWidget<'a> {
    pub fn new(question: &'a str, section: &'a str) -> Self {
        Self {
            question,
            section,
            explanation: "",
            examples: &[],
        }
    }

    pub fn explanation(mut self, explanation: &'a str) -> Self {
        self.explanation = explanation;
        self
    }

    pub fn examples(mut self, examples: &'a [&'a str]) -> Self {
        self.examples = examples;
        self
    }
}

impl Widget for QuestionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("[{}] ", self.section),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.question,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        if !self.explanation.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                self.explanation,
                Style::default().fg(Color::Gray),
            )));
        }

        if !self.examples.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Ejemplos:",
                Style::default().fg(Color::DarkGray),
            )));
            for example in self.examples {
                lines.push(Line::from(Span::styled(
                    format!("  • {}", example),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Pregunta ");

        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// Critique text, or a notice while a request is running
pub struct FeedbackWidget<'a> {
    title: &'a str,
    text: Option<&'a str>,
    waiting: bool,
}

impl<'a> FeedbackWidget<'a> {
    pub fn new(title: &'a str, text: Option<&'a str>) -> Self {
        Self {
            title,
            text,
            waiting: false,
        }
    }

    pub fn waiting(mut self, waiting: bool) -> Self {
        self.waiting = waiting;
        self
    }

    /// Rows needed to show it, borders included (0 when there is nothing)
    pub fn height(text: Option<&str>, waiting: bool) -> u16 {
        match text {
            Some(text) => (text.lines().count().min(8) as u16 + 2).max(3),
            None if waiting => 3,
            None => 0,
        }
    }
}

impl Widget for FeedbackWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (body, color) = match self.text {
            Some(text) => (Text::from(text), Color::Magenta),
            None if self.waiting => (
                Text::from(Span::styled(
                    "⏳ Consultando a la IA...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Color::Yellow,
            ),
            None => return,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(self.title);

        Paragraph::new(body)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_height() {
        assert_eq!(FeedbackWidget::height(None, false), 0);
        assert_eq!(FeedbackWidget::height(None, true), 3);
        assert_eq!(FeedbackWidget::height(Some("una línea"), false), 3);
        assert_eq!(FeedbackWidget::height(Some(&"x\n".repeat(30)), false), 10);
    }
}
