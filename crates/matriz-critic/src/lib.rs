mod critic;
mod prompts;

pub use critic::{display_text, Critic, CritiqueError};
pub use prompts::CritiquePrompts;
