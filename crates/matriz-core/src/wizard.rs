//! The wizard session: store, cursor, staged input and AI feedback.
//!
//! Every edit is written through to the store immediately. The staged
//! input keeps the raw text as typed so list fields can be validated line by
//! line before the store drops malformed lines.

use thiserror::Error;
use tracing::{debug, info};

use crate::export::{summary, SummarySection};
use crate::field::{ChoiceOption, FieldKey, FieldValue, InputKind};
use crate::guidance;
use crate::messages;
use crate::sequencer::{Cursor, NavigationError, Position};
use crate::store::MatrixData;
use crate::validation::Violation;
use crate::ResearchType;

/// What a critique is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CritiqueTarget {
    Field(FieldKey),
    Matrix,
}

/// Issued when a critique starts; must be handed back to
/// [`Wizard::finish_critique`] with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CritiqueTicket {
    id: u64,
    revision: u64,
    pub target: CritiqueTarget,
}

/// Snapshot of what should be sent for critique
#[derive(Debug, Clone)]
pub struct CritiqueRequest {
    pub ticket: CritiqueTicket,
    pub research_type: Option<ResearchType>,
    pub subject: CritiqueSubject,
}

#[derive(Debug, Clone)]
pub enum CritiqueSubject {
    Field { key: FieldKey, value: FieldValue },
    Matrix(Box<MatrixData>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CritiqueRequestError {
    #[error("Ya hay una revisión con IA en curso")]
    Busy,

    #[error("No hay un campo activo para revisar")]
    NoActiveField,
}

/// Outcome of handing a critique result back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CritiqueOutcome {
    Stored,
    /// The answer or step changed while the call was running
    Discarded,
}

#[derive(Debug, Clone, Default)]
struct FeedbackCache {
    field: Option<(FieldKey, String)>,
    matrix: Option<String>,
}

/// Presentation model of the active step
#[derive(Debug, Clone)]
pub struct StepView {
    pub index: usize,
    pub total: usize,
    pub key: FieldKey,
    pub prompt_text: &'static str,
    pub explanation: &'static str,
    pub examples: &'static [&'static str],
    pub input_kind: InputKind,
    pub options: Vec<ChoiceOption>,
    /// Raw text currently in the input widget
    pub input: String,
    pub verdict: Result<(), Violation>,
    pub warning: Option<String>,
    pub feedback: Option<String>,
    pub matrix_feedback: Option<String>,
    pub critique_in_flight: bool,
}

/// Presentation model of the terminal state
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub total: usize,
    pub sections: Vec<SummarySection>,
    pub matrix_feedback: Option<String>,
    pub critique_in_flight: bool,
}

#[derive(Debug, Clone)]
pub enum WizardView {
    Step(StepView),
    Summary(SummaryView),
}

#[derive(Debug, Default)]
pub struct Wizard {
    data: MatrixData,
    cursor: Cursor,
    staged: String,
    feedback: FeedbackCache,
    in_flight: Option<u64>,
    next_ticket: u64,
    /// Bumped on every edit and cursor move
    revision: u64,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &MatrixData {
        &self.data
    }

    pub fn research_type(&self) -> Option<ResearchType> {
        self.data.research_type()
    }

    pub fn position(&self) -> Position {
        self.cursor.position(&self.data)
    }

    pub fn is_complete(&self) -> bool {
        self.position().is_terminal()
    }

    pub fn critique_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Raw input of the active step
    pub fn staged(&self) -> &str {
        &self.staged
    }

    /// Current presentation model
    pub fn view(&self) -> WizardView {
        let research_type = self.research_type();
        match self.position() {
            Position::Active {
                index,
                total,
                field,
            } => {
                let verdict = field.validate(&self.staged_value(), research_type);
                let warning = verdict
                    .as_ref()
                    .err()
                    .map(|violation| messages::warning(field.key, violation));
                WizardView::Step(StepView {
                    index,
                    total,
                    key: field.key,
                    prompt_text: field.prompt_text,
                    explanation: guidance::explanation(field.key, research_type),
                    examples: guidance::examples(field.key, research_type),
                    input_kind: field.input_kind,
                    options: field.options(research_type),
                    input: self.staged.clone(),
                    verdict,
                    warning,
                    feedback: self
                        .feedback
                        .field
                        .as_ref()
                        .filter(|(key, _)| *key == field.key)
                        .map(|(_, text)| text.clone()),
                    matrix_feedback: self.feedback.matrix.clone(),
                    critique_in_flight: self.critique_in_flight(),
                })
            }
            Position::Terminal { total } => WizardView::Summary(SummaryView {
                total,
                sections: summary(&self.data),
                matrix_feedback: self.feedback.matrix.clone(),
                critique_in_flight: self.critique_in_flight(),
            }),
        }
    }

    /// Replace the active step's input and write it through to the store.
    /// Ignored at the summary.
    pub fn edit(&mut self, raw: impl Into<String>) {
        let Some(field) = self.position().field() else {
            return;
        };
        let raw = raw.into();
        if raw == self.staged {
            return;
        }

        let before = self.research_type();
        self.data.set(field.key, FieldValue::Text(raw.clone()));
        self.staged = raw;
        self.touch();

        if self.research_type() != before {
            info!(
                research_type = ?self.research_type(),
                total_steps = self.cursor.position(&self.data).total(),
                "research type changed"
            );
        }
    }

    pub fn advance(&mut self) -> Result<Position, NavigationError> {
        let position = self.cursor.advance(&self.data, &self.staged_value())?;
        self.reseed();
        self.touch();
        debug!(index = self.cursor.index(&self.data), "advanced");
        Ok(position)
    }

    pub fn retreat(&mut self) -> Result<Position, NavigationError> {
        let position = self.cursor.retreat(&self.data)?;
        self.reseed();
        self.touch();
        Ok(position)
    }

    /// Start over: default store, first step, no feedback. Allowed anywhere.
    pub fn reset(&mut self) {
        self.cursor.reset(&mut self.data);
        self.reseed();
        self.touch();
        info!("wizard reset");
    }

    /// Reserve the single critique slot for the active field
    pub fn begin_field_critique(&mut self) -> Result<CritiqueRequest, CritiqueRequestError> {
        if self.in_flight.is_some() {
            return Err(CritiqueRequestError::Busy);
        }
        let field = self
            .position()
            .field()
            .ok_or(CritiqueRequestError::NoActiveField)?;
        let subject = CritiqueSubject::Field {
            key: field.key,
            value: self.data.get(field.key),
        };
        Ok(self.issue(CritiqueTarget::Field(field.key), subject))
    }

    /// Reserve the single critique slot for the whole matrix
    pub fn begin_matrix_critique(&mut self) -> Result<CritiqueRequest, CritiqueRequestError> {
        if self.in_flight.is_some() {
            return Err(CritiqueRequestError::Busy);
        }
        let subject = CritiqueSubject::Matrix(Box::new(self.data.clone()));
        Ok(self.issue(CritiqueTarget::Matrix, subject))
    }

    fn issue(&mut self, target: CritiqueTarget, subject: CritiqueSubject) -> CritiqueRequest {
        self.next_ticket += 1;
        let ticket = CritiqueTicket {
            id: self.next_ticket,
            revision: self.revision,
            target,
        };
        self.in_flight = Some(ticket.id);
        CritiqueRequest {
            ticket,
            research_type: self.research_type(),
            subject,
        }
    }

    /// Hand back a critique result. The text is kept only if nothing was
    /// edited and the cursor did not move since the ticket was issued.
    /// The in-flight slot is released either way.
    pub fn finish_critique(&mut self, ticket: CritiqueTicket, text: String) -> CritiqueOutcome {
        if self.in_flight == Some(ticket.id) {
            self.in_flight = None;
        }

        if ticket.revision != self.revision {
            debug!(target = ?ticket.target, "stale critique discarded");
            return CritiqueOutcome::Discarded;
        }

        match ticket.target {
            CritiqueTarget::Field(key) => self.feedback.field = Some((key, text)),
            CritiqueTarget::Matrix => self.feedback.matrix = Some(text),
        }
        CritiqueOutcome::Stored
    }

    fn staged_value(&self) -> FieldValue {
        FieldValue::Text(self.staged.clone())
    }

    /// Seed the input from the store for the step under the cursor
    fn reseed(&mut self) {
        self.staged = match self.position().field() {
            Some(field) => self.data.get(field.key).to_input_text(),
            None => String::new(),
        };
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.feedback = FeedbackCache::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(wizard: &Wizard) -> StepView {
        match wizard.view() {
            WizardView::Step(view) => view,
            WizardView::Summary(_) => panic!("expected an active step"),
        }
    }

    fn answer(wizard: &mut Wizard, raw: &str) {
        wizard.edit(raw);
        wizard.advance().unwrap();
    }

    fn through_general_objective(wizard: &mut Wizard) {
        answer(wizard, "Cualitativa");
        answer(wizard, "Percepción docente sobre la enseñanza remota");
        answer(wizard, "¿Cómo perciben los docentes la enseñanza remota?");
        answer(wizard, "Comprender la percepción docente sobre la enseñanza.");
    }

    #[test]
    fn test_new_wizard_shows_research_type_choice() {
        let wizard = Wizard::new();
        let view = step(&wizard);
        assert_eq!(view.index, 0);
        assert_eq!(view.total, 11);
        assert_eq!(view.key, FieldKey::ResearchType);
        assert_eq!(view.options.len(), 3);
        assert_eq!(view.verdict, Err(Violation::Empty));
        assert!(view.warning.is_some());
    }

    #[test]
    fn test_edit_writes_through() {
        let mut wizard = Wizard::new();
        wizard.edit("Cuantitativa");
        assert_eq!(wizard.research_type(), Some(ResearchType::Quantitative));
        assert_eq!(step(&wizard).total, 15);
        assert!(step(&wizard).verdict.is_ok());
    }

    #[test]
    fn test_seed_skips_blank_objectives() {
        let mut wizard = Wizard::new();
        through_general_objective(&mut wizard);
        assert_eq!(step(&wizard).key, FieldKey::SpecificObjectives);
        assert_eq!(wizard.staged(), "");
    }

    #[test]
    fn test_retreat_reseeds_from_store() {
        let mut wizard = Wizard::new();
        through_general_objective(&mut wizard);
        wizard.edit("Describir la experiencia docente.\n\nInterpretar los significados.\n");
        wizard.retreat().unwrap();
        wizard.advance().unwrap();
        assert_eq!(
            wizard.staged(),
            "Describir la experiencia docente.\nInterpretar los significados."
        );
    }

    #[test]
    fn test_malformed_framework_line_blocks_advance() {
        let mut wizard = Wizard::new();
        through_general_objective(&mut wizard);
        answer(&mut wizard, "Describir la experiencia docente.");
        answer(
            &mut wizard,
            "La enseñanza remota transformó la práctica docente rural y debe comprenderse.",
        );
        wizard.edit("Enseñanza remota - Hodges (2020)\nPresencia social");
        assert_eq!(
            step(&wizard).verdict,
            Err(Violation::LineMalformed { line: 2 })
        );
        assert!(wizard.advance().is_err());
        // The store only keeps the well-formed line
        assert_eq!(wizard.data().framework.len(), 1);
    }

    #[test]
    fn test_critique_guard_and_staleness() {
        let mut wizard = Wizard::new();
        wizard.edit("Mixta");
        let request = wizard.begin_field_critique().unwrap();
        assert!(matches!(
            request.subject,
            CritiqueSubject::Field {
                key: FieldKey::ResearchType,
                ..
            }
        ));
        assert_eq!(
            wizard.begin_matrix_critique().unwrap_err(),
            CritiqueRequestError::Busy
        );

        assert_eq!(
            wizard.finish_critique(request.ticket, "Bien elegido.".into()),
            CritiqueOutcome::Stored
        );
        assert!(!wizard.critique_in_flight());
        assert_eq!(step(&wizard).feedback.as_deref(), Some("Bien elegido."));

        let request = wizard.begin_matrix_critique().unwrap();
        wizard.edit("Cualitativa");
        assert_eq!(step(&wizard).feedback, None);
        assert_eq!(
            wizard.finish_critique(request.ticket, "Tarde.".into()),
            CritiqueOutcome::Discarded
        );
        assert!(!wizard.critique_in_flight());
        assert_eq!(step(&wizard).matrix_feedback, None);
    }

    #[test]
    fn test_field_feedback_cleared_on_step_change() {
        let mut wizard = Wizard::new();
        wizard.edit("Cualitativa");
        let request = wizard.begin_field_critique().unwrap();
        wizard.finish_critique(request.ticket, "Correcto.".into());
        wizard.advance().unwrap();
        assert_eq!(step(&wizard).feedback, None);
    }
}
