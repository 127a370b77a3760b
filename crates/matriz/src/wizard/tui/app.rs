//! Main TUI application for the wizard.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::task::JoinHandle;

use matriz_core::export::{summary, SummarySection};
use matriz_core::{
    CritiqueOutcome, CritiqueRequest, CritiqueSubject, CritiqueTarget, CritiqueTicket,
    DocumentFormat, InputKind, NavigationError, Position, StepView, SummaryView, Wizard,
    WizardView,
};
use matriz_critic::{display_text, Critic, CritiqueError, CritiquePrompts};
use matriz_logging::{LogEvent, Logger};

use super::layout::{LayoutMode, MainLayout, StepLayout, SummaryLayout};
use super::text;
use super::widgets::{
    FeedbackWidget, MatrixWidget, ProgressWidget, QuestionWidget, SelectInput, TextInput,
};
use crate::wizard::{write_export, SessionOutcome};

/// The current focus area in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Preview,
}

/// A critique call running on the runtime
struct PendingCritique {
    ticket: CritiqueTicket,
    started: Instant,
    handle: JoinHandle<Result<String, CritiqueError>>,
}

/// The main TUI application
pub struct App {
    wizard: Wizard,
    critic: Option<Critic>,
    logger: Arc<Logger>,
    format: DocumentFormat,
    output_path: PathBuf,
    focus: Focus,
    /// Char index into the staged answer
    text_cursor: usize,
    /// Highlighted option of a choice field
    highlighted: usize,
    preview_scroll: u16,
    pending: Option<PendingCritique>,
    exported: Option<PathBuf>,
    running: bool,
    error_message: Option<String>,
    status_message: Option<String>,
    terminal_active: bool,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    pub fn new(
        critic: Option<Critic>,
        logger: Arc<Logger>,
        format: DocumentFormat,
        output_path: PathBuf,
    ) -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            wizard: Wizard::new(),
            critic,
            logger,
            format,
            output_path,
            focus: Focus::Input,
            text_cursor: 0,
            highlighted: 0,
            preview_scroll: 0,
            pending: None,
            exported: None,
            running: true,
            error_message: None,
            status_message: None,
            terminal_active: true,
            terminal,
        })
    }

    /// Run until the user quits
    pub async fn run(&mut self) -> Result<SessionOutcome> {
        self.sync_input();
        self.log_position();

        while self.running {
            self.poll_critique().await;
            self.draw()?;

            // Poll with a timeout so a finished critique shows up promptly
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key)?;
                    }
                }
            }
        }

        self.cleanup_terminal()?;

        Ok(SessionOutcome {
            data: self.wizard.data().clone(),
            completed: self.wizard.is_complete(),
            exported: self.exported.clone(),
        })
    }

    /// Cleanup the terminal
    fn cleanup_terminal(&mut self) -> Result<()> {
        if !self.terminal_active {
            return Ok(());
        }
        self.terminal_active = false;
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal
            .show_cursor()
            .context("Failed to show cursor")?;
        Ok(())
    }

    /// Draw the UI
    fn draw(&mut self) -> Result<()> {
        let render_state = RenderState {
            agent_name: self
                .critic
                .as_ref()
                .map(|c| c.agent_name().to_string()),
            research_type: self.wizard.research_type().map(|rt| rt.label()),
            view: self.wizard.view(),
            preview: summary(self.wizard.data()),
            focus: self.focus,
            text_cursor: self.text_cursor,
            highlighted: self.highlighted,
            preview_scroll: self.preview_scroll,
            error_message: self.error_message.clone(),
            status_message: self.status_message.clone(),
        };

        self.terminal.draw(|frame| {
            render_state.render(frame);
        })?;
        Ok(())
    }
}

/// State needed for rendering (to avoid borrow issues)
struct RenderState {
    agent_name: Option<String>,
    research_type: Option<&'static str>,
    view: WizardView,
    /// The store as it stands, for the live preview
    preview: Vec<SummarySection>,
    focus: Focus,
    text_cursor: usize,
    highlighted: usize,
    preview_scroll: u16,
    error_message: Option<String>,
    status_message: Option<String>,
}

impl RenderState {
    fn render(&self, frame: &mut Frame) {
        let layout = MainLayout::new(frame.area());

        self.render_header(frame, layout.header);

        match layout.mode {
            LayoutMode::DualPanel => {
                self.render_main_panel(frame, layout.left_panel);
                self.render_preview_panel(frame, layout.right_panel);
            }
            LayoutMode::SinglePanel => match self.focus {
                Focus::Input => self.render_main_panel(frame, layout.left_panel),
                Focus::Preview => self.render_preview_panel(frame, layout.right_panel),
            },
        }

        self.render_footer(frame, layout.footer);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                " matriz ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("| "),
            Span::styled(
                format!(
                    "Investigación: {} ",
                    self.research_type.unwrap_or("sin seleccionar")
                ),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("| "),
            Span::styled(
                format!(
                    "IA: {} ",
                    self.agent_name.as_deref().unwrap_or("desactivada")
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        frame.render_widget(Paragraph::new(title).block(block), area);
    }

    fn render_main_panel(&self, frame: &mut Frame, area: Rect) {
        match &self.view {
            WizardView::Step(step) => self.render_step(frame, area, step),
            WizardView::Summary(summary) => self.render_summary(frame, area, summary),
        }
    }

    fn render_step(&self, frame: &mut Frame, area: Rect, step: &StepView) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(format!(" {} ", step.key.title()));
        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let input_height = match step.input_kind {
            InputKind::ShortText => 3,
            InputKind::LongText => 8,
            InputKind::SingleChoice | InputKind::ChoiceWithDescription => {
                (step.options.len().max(1) as u16 + 2).min(10)
            }
        };
        let feedback = step.feedback.as_deref();
        let feedback_height = FeedbackWidget::height(feedback, step.critique_in_flight);
        let layout = StepLayout::new(inner_area, input_height, feedback_height);

        frame.render_widget(ProgressWidget::new(step.index, step.total), layout.progress);

        let question = QuestionWidget::new(step.prompt_text, step.key.title())
            .explanation(step.explanation)
            .examples(step.examples);
        frame.render_widget(question, layout.question);

        let focused = self.focus == Focus::Input;
        if step.input_kind.is_choice() {
            let chosen = step
                .options
                .iter()
                .position(|option| option.value == step.input.trim());
            let input = SelectInput::new(&step.options, self.highlighted)
                .chosen(chosen)
                .focused(focused);
            frame.render_widget(input, layout.input);
        } else {
            let title = match step.input_kind {
                InputKind::LongText => " Respuesta (Enter: nueva línea, Ctrl+O: editor) ",
                _ => " Respuesta (Enter: siguiente) ",
            };
            let input = TextInput::new(&step.input, self.text_cursor)
                .title(title)
                .focused(focused)
                .valid(step.verdict.is_ok());
            frame.render_widget(input, layout.input);
        }

        let status = self.status_line(step.warning.as_deref());
        frame.render_widget(Paragraph::new(status), layout.status);

        let feedback = FeedbackWidget::new(" Revisión con IA ", feedback)
            .waiting(step.critique_in_flight);
        frame.render_widget(feedback, layout.feedback);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, view: &SummaryView) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Resumen de tu matriz ");
        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let feedback = view.matrix_feedback.as_deref();
        let layout = SummaryLayout::new(
            inner_area,
            FeedbackWidget::height(feedback, view.critique_in_flight),
        );

        frame.render_widget(ProgressWidget::new(view.total, view.total), layout.progress);

        let matrix = MatrixWidget::new(&view.sections)
            .title(" ✅ ¡Has completado tu matriz! ")
            .scroll(self.preview_scroll);
        frame.render_widget(matrix, layout.matrix);

        let feedback = FeedbackWidget::new(" Revisión integral con IA ", feedback)
            .waiting(view.critique_in_flight);
        frame.render_widget(feedback, layout.feedback);
    }

    fn render_preview_panel(&self, frame: &mut Frame, area: Rect) {
        match &self.view {
            WizardView::Step(step) => {
                let matrix = MatrixWidget::new(&self.preview)
                    .title(" Vista previa de la matriz ")
                    .active(Some(step.key))
                    .scroll(self.preview_scroll);
                frame.render_widget(matrix, area);
            }
            WizardView::Summary(view) => {
                let text = view
                    .matrix_feedback
                    .as_deref()
                    .unwrap_or("Pulsa Ctrl+G para revisar la coherencia de toda la matriz.");
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Revisión integral ");
                frame.render_widget(
                    Paragraph::new(text)
                        .block(block)
                        .wrap(Wrap { trim: false }),
                    area,
                );
            }
        }
    }

    fn status_line<'a>(&'a self, warning: Option<&'a str>) -> Line<'a> {
        if let Some(ref err) = self.error_message {
            Line::from(Span::styled(
                format!("Error: {}", err),
                Style::default().fg(Color::Red),
            ))
        } else if let Some(warning) = warning {
            Line::from(Span::styled(warning, Style::default().fg(Color::Yellow)))
        } else if let Some(ref msg) = self.status_message {
            Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Green)))
        } else {
            Line::from(Span::styled(
                "✓ Respuesta válida",
                Style::default().fg(Color::Green),
            ))
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &'static str| {
            Span::styled(k, Style::default().bg(Color::DarkGray).fg(Color::White))
        };
        let mut spans = match self.view {
            WizardView::Step(_) => vec![
                key(" Ctrl+N "),
                Span::raw(" Siguiente "),
                key(" Ctrl+B "),
                Span::raw(" Anterior "),
                key(" Ctrl+R "),
                Span::raw(" Revisar "),
            ],
            WizardView::Summary(_) => vec![
                key(" Ctrl+E "),
                Span::raw(" Exportar "),
                key(" Ctrl+G "),
                Span::raw(" Revisión integral "),
            ],
        };
        spans.extend([
            key(" Ctrl+X "),
            Span::raw(" Reiniciar "),
            key(" Tab "),
            Span::raw(" Panel "),
            key(" Ctrl+C "),
            Span::raw(" Salir "),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

impl App {
    /// Handle a key event
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        self.error_message = None;

        // Global shortcuts
        let control = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);
        if control {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.running = false,
                KeyCode::Char('n') => self.advance(),
                KeyCode::Char('b') => self.retreat(),
                KeyCode::Char('r') => self.start_field_critique(),
                KeyCode::Char('g') => self.start_matrix_critique(),
                KeyCode::Char('e') => self.export(),
                KeyCode::Char('x') => self.reset(),
                KeyCode::Char('o') => self.edit_in_external_editor()?,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Preview,
                    Focus::Preview => Focus::Input,
                };
                return Ok(());
            }
            KeyCode::PageUp => {
                self.preview_scroll = self.preview_scroll.saturating_sub(10);
                return Ok(());
            }
            KeyCode::PageDown => {
                self.preview_scroll = self.preview_scroll.saturating_add(10);
                return Ok(());
            }
            _ => {}
        }

        match (self.focus, self.wizard.view()) {
            (Focus::Preview, _) | (_, WizardView::Summary(_)) => self.handle_scroll(key),
            (Focus::Input, WizardView::Step(step)) => {
                if step.input_kind.is_choice() {
                    self.handle_choice_input(key, &step);
                } else {
                    self.handle_text_input(key, step.input_kind);
                }
            }
        }
        Ok(())
    }

    fn handle_scroll(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.preview_scroll = self.preview_scroll.saturating_sub(1),
            KeyCode::Down => self.preview_scroll = self.preview_scroll.saturating_add(1),
            KeyCode::Home => self.preview_scroll = 0,
            KeyCode::Esc => self.focus = Focus::Input,
            _ => {}
        }
    }

    fn handle_choice_input(&mut self, key: KeyEvent, step: &StepView) {
        let count = step.options.len();
        if count == 0 {
            return;
        }
        match key.code {
            KeyCode::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
                self.select(step, self.highlighted);
            }
            KeyCode::Down => {
                self.highlighted = (self.highlighted + 1).min(count - 1);
                self.select(step, self.highlighted);
            }
            KeyCode::Char(' ') => self.select(step, self.highlighted),
            KeyCode::Enter => {
                self.select(step, self.highlighted);
                self.advance();
            }
            _ => {}
        }
    }

    /// Store the option at `index` as the answer
    fn select(&mut self, step: &StepView, index: usize) {
        if let Some(option) = step.options.get(index) {
            self.edit(option.value.to_string());
        }
    }

    fn handle_text_input(&mut self, key: KeyEvent, kind: InputKind) {
        let value = self.wizard.staged().to_string();
        let cursor = self.text_cursor.min(text::char_len(&value));

        let edited = match key.code {
            KeyCode::Enter if kind == InputKind::LongText => {
                Some(text::insert(&value, cursor, '\n'))
            }
            KeyCode::Enter => {
                self.advance();
                None
            }
            KeyCode::Char(c) => Some(text::insert(&value, cursor, c)),
            KeyCode::Backspace => Some(text::delete_before(&value, cursor)),
            KeyCode::Delete => Some(text::delete_at(&value, cursor)),
            KeyCode::Left => {
                self.text_cursor = cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.text_cursor = (cursor + 1).min(text::char_len(&value));
                None
            }
            KeyCode::Home => {
                self.text_cursor = text::line_start(&value, cursor);
                None
            }
            KeyCode::End => {
                self.text_cursor = text::line_end(&value, cursor);
                None
            }
            _ => None,
        };

        if let Some((new_value, new_cursor)) = edited {
            self.text_cursor = new_cursor;
            self.edit(new_value);
        }
    }

    /// Write an answer through to the wizard
    fn edit(&mut self, value: String) {
        let before = self.wizard.research_type();
        self.wizard.edit(value);
        self.exported = None;

        let after = self.wizard.research_type();
        if after != before {
            self.logger.log(&LogEvent::ResearchTypeChanged {
                research_type: after.map(|rt| rt.label()).unwrap_or_default().to_string(),
                total_steps: self.wizard.position().total(),
            });
        }
    }

    fn advance(&mut self) {
        let field = self.wizard.position().field().map(|f| f.key);
        match self.wizard.advance() {
            Ok(position) => {
                self.status_message = None;
                self.after_move();
                if let Position::Terminal { total } = position {
                    self.logger
                        .log(&LogEvent::MatrixCompleted { total_steps: total });
                }
            }
            Err(err) => {
                if let (NavigationError::Rejected { .. }, Some(field)) = (&err, field) {
                    self.logger.log(&LogEvent::AdvanceRejected {
                        field: field.to_string(),
                        reason: err.to_string(),
                    });
                }
                self.error_message = Some(err.to_string());
            }
        }
    }

    fn retreat(&mut self) {
        match self.wizard.retreat() {
            Ok(_) => {
                self.status_message = None;
                self.after_move();
            }
            Err(err) => self.error_message = Some(err.to_string()),
        }
    }

    fn reset(&mut self) {
        self.wizard.reset();
        self.exported = None;
        self.preview_scroll = 0;
        self.logger.log(&LogEvent::SessionReset);
        self.status_message = Some("Matriz reiniciada.".to_string());
        self.after_move();
    }

    fn after_move(&mut self) {
        self.sync_input();
        self.log_position();
    }

    /// Put the text cursor at the end and highlight the stored option
    fn sync_input(&mut self) {
        let staged = self.wizard.staged().to_string();
        self.text_cursor = text::char_len(&staged);
        self.highlighted = match self.wizard.view() {
            WizardView::Step(step) => step
                .options
                .iter()
                .position(|option| option.value == staged.trim())
                .unwrap_or(0),
            WizardView::Summary(_) => 0,
        };
    }

    fn log_position(&self) {
        if let Position::Active {
            index,
            total,
            field,
        } = self.wizard.position()
        {
            self.logger.log(&LogEvent::StepEntered {
                index,
                total,
                field: field.key.to_string(),
            });
        }
    }

    fn start_field_critique(&mut self) {
        match self.wizard.begin_field_critique() {
            Ok(request) => self.dispatch(request),
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    fn start_matrix_critique(&mut self) {
        match self.wizard.begin_matrix_critique() {
            Ok(request) => self.dispatch(request),
            Err(err) => self.status_message = Some(err.to_string()),
        }
    }

    /// Run a critique on the runtime; without a provider answer right away
    fn dispatch(&mut self, request: CritiqueRequest) {
        let Some(critic) = self.critic.clone() else {
            let text = display_text(&Err(CritiqueError::Disabled));
            self.wizard.finish_critique(request.ticket, text);
            return;
        };

        let (field, prompt_len) = match &request.subject {
            CritiqueSubject::Field { key, value } => (
                Some(key.to_string()),
                CritiquePrompts::field_prompt(*key, value, request.research_type)
                    .map(|p| p.len())
                    .unwrap_or(0),
            ),
            CritiqueSubject::Matrix(data) => (
                None,
                CritiquePrompts::matrix_prompt(data, request.research_type).len(),
            ),
        };
        self.logger
            .log(&LogEvent::CritiqueRequested { field, prompt_len });

        let ticket = request.ticket;
        let handle = tokio::spawn(async move { critic.critique_request(&request).await });
        self.pending = Some(PendingCritique {
            ticket,
            started: Instant::now(),
            handle,
        });
    }

    /// Hand a finished critique back to the wizard
    async fn poll_critique(&mut self) {
        if !self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.handle.is_finished())
        {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };

        let field = match pending.ticket.target {
            CritiqueTarget::Field(key) => Some(key.to_string()),
            CritiqueTarget::Matrix => None,
        };
        let text = match pending.handle.await {
            Ok(result) => {
                match &result {
                    Ok(text) => self.logger.log(&LogEvent::CritiqueCompleted {
                        field: field.clone(),
                        duration_secs: pending.started.elapsed().as_secs_f64(),
                        response_len: text.len(),
                    }),
                    Err(err) => self.logger.log(&LogEvent::CritiqueFailed {
                        field: field.clone(),
                        error: err.to_string(),
                    }),
                }
                display_text(&result)
            }
            Err(join_err) => {
                self.logger.log(&LogEvent::CritiqueFailed {
                    field: field.clone(),
                    error: join_err.to_string(),
                });
                format!("❌ La revisión se interrumpió: {}", join_err)
            }
        };

        if self.wizard.finish_critique(pending.ticket, text) == CritiqueOutcome::Discarded {
            self.logger.log(&LogEvent::CritiqueDiscarded { field });
        }
    }

    fn export(&mut self) {
        if !self.wizard.is_complete() {
            self.error_message = Some("Completa la matriz antes de exportarla.".to_string());
            return;
        }
        match write_export(self.wizard.data(), self.format, &self.output_path) {
            Ok(bytes) => {
                self.logger.log(&LogEvent::MatrixExported {
                    path: self.output_path.display().to_string(),
                    format: self.format.to_string(),
                    bytes,
                });
                self.exported = Some(self.output_path.clone());
                self.status_message = Some(format!(
                    "Exportada a {} ({})",
                    self.output_path.display(),
                    self.format.mime_type()
                ));
            }
            Err(err) => self.error_message = Some(format!("{:#}", err)),
        }
    }

    /// Edit the active text answer in `$EDITOR`. Failures are reported on
    /// the status line; only terminal errors end the session.
    fn edit_in_external_editor(&mut self) -> Result<()> {
        let (prompt, current) = match self.wizard.view() {
            WizardView::Step(step) if !step.input_kind.is_choice() => {
                (step.prompt_text, step.input)
            }
            _ => return Ok(()),
        };

        let temp_path =
            std::env::temp_dir().join(format!("matriz_respuesta_{}.md", std::process::id()));
        if let Err(err) = write_editor_file(&temp_path, prompt, &current) {
            self.error_message = Some(format!(
                "No se pudo preparar {}: {}",
                temp_path.display(),
                err
            ));
            return Ok(());
        }

        // Temporarily exit TUI mode
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;

        let editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| "vi".to_string());
        let status = std::process::Command::new(&editor).arg(&temp_path).status();

        // Restore TUI mode
        enable_raw_mode().context("Failed to re-enable raw mode")?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)
            .context("Failed to re-enter alternate screen")?;
        self.terminal.clear()?;

        let content = match status {
            Ok(status) if status.success() => std::fs::read_to_string(&temp_path).ok(),
            Ok(_) => None,
            Err(err) => {
                self.error_message = Some(format!("No se pudo abrir {}: {}", editor, err));
                None
            }
        };
        let _ = std::fs::remove_file(&temp_path);

        if let Some(content) = content {
            let answer = strip_editor_header(&content);
            self.text_cursor = text::char_len(&answer);
            self.edit(answer);
        }
        Ok(())
    }
}

/// Write the answer under a commented header for `$EDITOR`
fn write_editor_file(path: &Path, prompt: &str, current: &str) -> io::Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "# {}", prompt)?;
    writeln!(file, "# Las líneas que empiezan con '# ' se ignoran.")?;
    write!(file, "{}", current)?;
    Ok(())
}

/// Drop the header lines added by [`write_editor_file`]
fn strip_editor_header(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.starts_with("# "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
        let _ = self.cleanup_terminal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_file_round_trips_answer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("respuesta.md");
        write_editor_file(&path, "Escribe el tema.", "Uso de tabletas\nen primaria").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Escribe el tema.\n"));
        assert_eq!(strip_editor_header(&content), "Uso de tabletas\nen primaria");
    }

    #[test]
    fn test_editor_file_error_is_returned_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_existe").join("respuesta.md");
        assert!(write_editor_file(&path, "Escribe el tema.", "").is_err());
    }
}
