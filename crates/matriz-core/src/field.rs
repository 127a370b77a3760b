//! Field vocabulary: keys, values and static descriptors.

use serde::{Deserialize, Serialize};

use crate::decompose::split_lines;
use crate::guidance;
use crate::validation::{Rule, Violation};
use crate::ResearchType;

/// Every field of the matrix, addressed by its dotted key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FieldKey {
    ResearchType,
    Topic,
    Question,
    GeneralObjective,
    SpecificObjectives,
    IndependentVariable,
    DependentVariable,
    NullHypothesis,
    AlternativeHypothesis,
    Justification,
    TheoreticalFramework,
    Design,
    Population,
    Sample,
    Techniques,
}

impl FieldKey {
    pub const ALL: [FieldKey; 15] = [
        FieldKey::ResearchType,
        FieldKey::Topic,
        FieldKey::Question,
        FieldKey::GeneralObjective,
        FieldKey::SpecificObjectives,
        FieldKey::IndependentVariable,
        FieldKey::DependentVariable,
        FieldKey::NullHypothesis,
        FieldKey::AlternativeHypothesis,
        FieldKey::Justification,
        FieldKey::TheoreticalFramework,
        FieldKey::Design,
        FieldKey::Population,
        FieldKey::Sample,
        FieldKey::Techniques,
    ];

    /// Dotted path of the field in the exported record
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::ResearchType => "tipo_investigacion",
            FieldKey::Topic => "tema",
            FieldKey::Question => "pregunta",
            FieldKey::GeneralObjective => "objetivo_general",
            FieldKey::SpecificObjectives => "objetivos_especificos",
            FieldKey::IndependentVariable => "variables.independiente",
            FieldKey::DependentVariable => "variables.dependiente",
            FieldKey::NullHypothesis => "hipotesis.nula",
            FieldKey::AlternativeHypothesis => "hipotesis.alternativa",
            FieldKey::Justification => "justificacion",
            FieldKey::TheoreticalFramework => "marco_teorico",
            FieldKey::Design => "metodologia.diseno",
            FieldKey::Population => "metodologia.poblacion",
            FieldKey::Sample => "metodologia.muestra",
            FieldKey::Techniques => "metodologia.tecnicas",
        }
    }

    /// Short Spanish title used in summaries and exports
    pub fn title(&self) -> &'static str {
        match self {
            FieldKey::ResearchType => "Tipo de investigación",
            FieldKey::Topic => "Tema",
            FieldKey::Question => "Pregunta de investigación",
            FieldKey::GeneralObjective => "Objetivo general",
            FieldKey::SpecificObjectives => "Objetivos específicos",
            FieldKey::IndependentVariable => "Variable independiente",
            FieldKey::DependentVariable => "Variable dependiente",
            FieldKey::NullHypothesis => "Hipótesis nula (H₀)",
            FieldKey::AlternativeHypothesis => "Hipótesis alternativa (H₁)",
            FieldKey::Justification => "Justificación",
            FieldKey::TheoreticalFramework => "Marco teórico",
            FieldKey::Design => "Diseño",
            FieldKey::Population => "Población",
            FieldKey::Sample => "Muestra",
            FieldKey::Techniques => "Técnicas de recolección",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown field key: {}", s))
    }
}

impl From<FieldKey> for String {
    fn from(key: FieldKey) -> Self {
        key.as_str().to_string()
    }
}

impl TryFrom<String> for FieldKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A value held for a field, either as entered or as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Text shown in an input widget: lists become one item per line, blanks skipped
    pub fn to_input_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => crate::decompose::join_lines(items),
        }
    }

    /// Items of the value: decomposed lines for text, non-blank items for lists
    pub fn items(&self) -> Vec<String> {
        match self {
            FieldValue::Text(text) => split_lines(text),
            FieldValue::List(items) => items
                .iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

/// Widget used to capture a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    SingleChoice,
    ShortText,
    LongText,
    ChoiceWithDescription,
}

impl InputKind {
    pub fn is_choice(&self) -> bool {
        matches!(self, InputKind::SingleChoice | InputKind::ChoiceWithDescription)
    }
}

/// Which research types include the field in their sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Always,
    QuantitativeOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    Scalar,
    List { max: Option<usize> },
}

/// How raw multi-line input becomes a stored list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decomposition {
    None,
    /// One item per non-blank line
    Lines,
    /// One `Concepto - Autores` record per non-blank line
    ConceptAuthors,
}

/// An option offered by a choice field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub description: Option<&'static str>,
}

impl ChoiceOption {
    pub const fn new(value: &'static str) -> Self {
        Self {
            value,
            description: None,
        }
    }

    pub const fn described(value: &'static str, description: &'static str) -> Self {
        Self {
            value,
            description: Some(description),
        }
    }
}

/// Static description of one wizard step
#[derive(Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    pub prompt_text: &'static str,
    pub input_kind: InputKind,
    pub applicability: Applicability,
    pub rule: Rule,
    pub multiplicity: Multiplicity,
    pub decomposition: Decomposition,
}

impl FieldDescriptor {
    pub fn applies_to(&self, research_type: Option<ResearchType>) -> bool {
        match self.applicability {
            Applicability::Always => true,
            Applicability::QuantitativeOnly => research_type
                .map(|rt| rt.has_quantitative_block())
                .unwrap_or(false),
        }
    }

    /// Options for choice fields; empty for free-text fields
    pub fn options(&self, research_type: Option<ResearchType>) -> Vec<ChoiceOption> {
        guidance::options(self.key, research_type)
    }

    /// Evaluate the field's rule against a staged value
    pub fn validate(
        &self,
        value: &FieldValue,
        research_type: Option<ResearchType>,
    ) -> Result<(), Violation> {
        let options = self.options(research_type);
        self.rule.check(value, &options)
    }

    pub fn is_valid(&self, value: &FieldValue, research_type: Option<ResearchType>) -> bool {
        self.validate(value, research_type).is_ok()
    }

    /// Maximum number of list items kept by the store
    pub fn max_items(&self) -> Option<usize> {
        match self.multiplicity {
            Multiplicity::Scalar => None,
            Multiplicity::List { max } => max,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.multiplicity, Multiplicity::List { .. })
    }
}
