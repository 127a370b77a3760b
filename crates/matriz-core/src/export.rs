//! Document export and the summary shown at the end of the wizard.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::FieldKey;
use crate::store::MatrixData;

/// Placeholder for unanswered fields
pub const NOT_DEFINED: &str = "No definido";

const PAGE_BREAK: &str = "<div style=\"page-break-after: always;\"></div>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Markdown,
    Json,
}

impl DocumentFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "text/markdown; charset=utf-8",
            DocumentFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "md",
            DocumentFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Markdown => write!(f, "markdown"),
            DocumentFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(DocumentFormat::Markdown),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(format!("Unknown document format: {}", s)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize matrix: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One titled block of the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub title: &'static str,
    pub items: Vec<SummaryItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub key: FieldKey,
    pub title: &'static str,
    /// Rendered lines; `[NOT_DEFINED]` when empty
    pub lines: Vec<String>,
    pub is_list: bool,
}

impl SummaryItem {
    fn text(key: FieldKey, value: &str) -> Self {
        let value = value.trim();
        Self {
            key,
            title: key.title(),
            lines: vec![if value.is_empty() {
                NOT_DEFINED.to_string()
            } else {
                value.to_string()
            }],
            is_list: false,
        }
    }

    fn list(key: FieldKey, items: Vec<String>) -> Self {
        let mut lines: Vec<String> = items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if lines.is_empty() {
            lines.push(NOT_DEFINED.to_string());
        }
        Self {
            key,
            title: key.title(),
            lines,
            is_list: true,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.lines.first().map(|l| l != NOT_DEFINED).unwrap_or(false)
    }
}

/// Summary of the whole record. Variables and hypotheses appear only for
/// research types that include them.
pub fn summary(data: &MatrixData) -> Vec<SummarySection> {
    let mut sections = vec![
        SummarySection {
            title: "Planteamiento",
            items: vec![
                SummaryItem::text(
                    FieldKey::ResearchType,
                    data.research_type().map(|rt| rt.label()).unwrap_or_default(),
                ),
                SummaryItem::text(FieldKey::Topic, &data.topic),
                SummaryItem::text(FieldKey::Question, &data.question),
            ],
        },
        SummarySection {
            title: "Objetivos",
            items: vec![
                SummaryItem::text(FieldKey::GeneralObjective, &data.general_objective),
                SummaryItem::list(FieldKey::SpecificObjectives, data.objectives.clone()),
            ],
        },
    ];

    if data
        .research_type()
        .map(|rt| rt.has_quantitative_block())
        .unwrap_or(false)
    {
        sections.push(SummarySection {
            title: "Variables e hipótesis",
            items: vec![
                SummaryItem::text(FieldKey::IndependentVariable, &data.variables.independent),
                SummaryItem::text(FieldKey::DependentVariable, &data.variables.dependent),
                SummaryItem::text(FieldKey::NullHypothesis, &data.hypotheses.null),
                SummaryItem::text(FieldKey::AlternativeHypothesis, &data.hypotheses.alternative),
            ],
        });
    }

    sections.push(SummarySection {
        title: "Justificación y marco teórico",
        items: vec![
            SummaryItem::text(FieldKey::Justification, &data.justification),
            SummaryItem::list(
                FieldKey::TheoreticalFramework,
                data.framework
                    .iter()
                    .map(|entry| format!("{}: {}", entry.concept, entry.authors))
                    .collect(),
            ),
        ],
    });
    sections.push(SummarySection {
        title: "Metodología",
        items: vec![
            SummaryItem::text(FieldKey::Design, &data.methodology.design),
            SummaryItem::text(FieldKey::Population, &data.methodology.population),
            SummaryItem::text(FieldKey::Sample, &data.methodology.sample),
            SummaryItem::text(FieldKey::Techniques, &data.methodology.techniques),
        ],
    });

    sections
}

/// Serialize the record into a document
pub fn render_document(data: &MatrixData, format: DocumentFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        DocumentFormat::Markdown => Ok(to_markdown(data).into_bytes()),
        DocumentFormat::Json => Ok(serde_json::to_vec_pretty(data)?),
    }
}

/// Markdown report, one section per page
pub fn to_markdown(data: &MatrixData) -> String {
    let mut md = String::from("# Matriz de investigación\n");

    for (idx, section) in summary(data).iter().enumerate() {
        if idx > 0 {
            md.push('\n');
            md.push_str(PAGE_BREAK);
            md.push('\n');
        }
        let _ = writeln!(md, "\n## {}\n", section.title);
        for item in &section.items {
            if item.is_list && item.is_defined() {
                let _ = writeln!(md, "**{}:**\n", item.title);
                for line in &item.lines {
                    let _ = writeln!(md, "- {}", line);
                }
                md.push('\n');
            } else {
                let _ = writeln!(md, "**{}:** {}\n", item.title, item.lines.join(" "));
            }
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;

    #[test]
    fn test_empty_record_renders_not_defined() {
        let md = to_markdown(&MatrixData::default());
        assert!(md.starts_with("# Matriz de investigación"));
        assert!(md.contains("**Tema:** No definido"));
        assert!(md.contains("**Objetivos específicos:** No definido"));
        assert!(!md.contains("Variables e hipótesis"));
    }

    #[test]
    fn test_quantitative_sections_and_page_breaks() {
        let mut data = MatrixData::default();
        data.set(FieldKey::ResearchType, FieldValue::text("Cuantitativa"));
        data.set(FieldKey::IndependentVariable, FieldValue::text("Horas de sueño"));
        data.set(
            FieldKey::SpecificObjectives,
            FieldValue::text("Identificar X.\nDeterminar Y."),
        );
        let md = to_markdown(&data);
        assert!(md.contains("## Variables e hipótesis"));
        assert!(md.contains("**Variable independiente:** Horas de sueño"));
        assert!(md.contains("- Identificar X.\n- Determinar Y.\n"));
        assert_eq!(md.matches(PAGE_BREAK).count(), 4);
    }

    #[test]
    fn test_json_document_round_trips() {
        let mut data = MatrixData::default();
        data.set(FieldKey::Topic, FieldValue::text("Clima escolar en secundaria"));
        let bytes = render_document(&data, DocumentFormat::Json).unwrap();
        let back: MatrixData = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, data);
        assert_eq!(DocumentFormat::Json.mime_type(), "application/json");
    }

    #[test]
    fn test_framework_summary_lines() {
        let mut data = MatrixData::default();
        data.set(
            FieldKey::TheoreticalFramework,
            FieldValue::text("Motivación - Deci y Ryan"),
        );
        let sections = summary(&data);
        let framework = sections
            .iter()
            .flat_map(|s| &s.items)
            .find(|i| i.key == FieldKey::TheoreticalFramework)
            .unwrap();
        assert_eq!(framework.lines, vec!["Motivación: Deci y Ryan"]);
    }
}
