//! Terminal UI for the wizard.

mod app;
mod layout;
mod text;
mod widgets;

pub use app::App;
