//! Core of the research-matrix wizard: field schema, answer store, step
//! sequencing, validation and export. No I/O happens here.

pub mod decompose;
pub mod export;
pub mod field;
pub mod guidance;
pub mod messages;
mod research_type;
pub mod schema;
pub mod sequencer;
pub mod store;
pub mod validation;
pub mod wizard;

pub use export::{render_document, DocumentFormat, ExportError, NOT_DEFINED};
pub use field::{ChoiceOption, FieldDescriptor, FieldKey, FieldValue, InputKind};
pub use research_type::ResearchType;
pub use schema::{applicable_fields, descriptor};
pub use sequencer::{Cursor, NavigationError, Position};
pub use store::{FrameworkEntry, MatrixData};
pub use validation::Violation;
pub use wizard::{
    CritiqueOutcome, CritiqueRequest, CritiqueRequestError, CritiqueSubject, CritiqueTarget,
    CritiqueTicket, StepView, SummaryView, Wizard, WizardView,
};
