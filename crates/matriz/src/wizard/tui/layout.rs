//! Layout calculations for the TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Minimum width for dual panel mode (cols)
const DUAL_PANEL_MIN_WIDTH: u16 = 100;

/// Layout mode based on terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Single panel - toggle between the step and the preview with Tab
    SinglePanel,
    /// Dual panel - show both side by side
    DualPanel,
}

/// Main layout areas
pub struct MainLayout {
    pub header: Rect,
    pub left_panel: Rect,
    pub right_panel: Rect,
    pub footer: Rect,
    pub mode: LayoutMode,
}

/// Left panel layout for an active step
pub struct StepLayout {
    pub progress: Rect,
    pub question: Rect,
    pub input: Rect,
    pub status: Rect,
    pub feedback: Rect,
}

/// Left panel layout for the summary
pub struct SummaryLayout {
    pub progress: Rect,
    pub matrix: Rect,
    pub feedback: Rect,
}

impl MainLayout {
    /// Calculate the main layout from the terminal area
    pub fn new(area: Rect) -> Self {
        let mode = if area.width >= DUAL_PANEL_MIN_WIDTH {
            LayoutMode::DualPanel
        } else {
            LayoutMode::SinglePanel
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Main content
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let header = chunks[0];
        let main_area = chunks[1];
        let footer = chunks[2];

        match mode {
            LayoutMode::DualPanel => {
                let panels = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Percentage(55), // Step
                        Constraint::Percentage(45), // Matrix preview
                    ])
                    .split(main_area);

                Self {
                    header,
                    left_panel: panels[0],
                    right_panel: panels[1],
                    footer,
                    mode,
                }
            }
            LayoutMode::SinglePanel => Self {
                header,
                left_panel: main_area,
                right_panel: main_area,
                footer,
                mode,
            },
        }
    }
}

impl StepLayout {
    /// `input_height` includes the borders; `feedback_height` is 0 when
    /// there is no feedback to show.
    pub fn new(area: Rect, input_height: u16, feedback_height: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1),               // Progress
                Constraint::Min(5),                  // Question
                Constraint::Length(input_height),    // Input
                Constraint::Length(2),               // Status
                Constraint::Length(feedback_height), // AI feedback
            ])
            .split(area);

        Self {
            progress: chunks[0],
            question: chunks[1],
            input: chunks[2],
            status: chunks[3],
            feedback: chunks[4],
        }
    }
}

impl SummaryLayout {
    pub fn new(area: Rect, feedback_height: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(feedback_height),
            ])
            .split(area);

        Self {
            progress: chunks[0],
            matrix: chunks[1],
            feedback: chunks[2],
        }
    }
}
