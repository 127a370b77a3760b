//! TUI widgets for the wizard.

mod input;
mod matrix;
mod progress;
mod question;

pub use input::{SelectInput, TextInput};
pub use matrix::MatrixWidget;
pub use progress::ProgressWidget;
pub use question::{FeedbackWidget, QuestionWidget};
