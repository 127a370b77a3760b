//! The answer store: one typed record per session.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::decompose::{parse_concept_authors, split_capped};
use crate::field::{FieldKey, FieldValue};
use crate::schema::{descriptor, MAX_OBJECTIVES};
use crate::ResearchType;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variables {
    #[serde(rename = "independiente", default)]
    pub independent: String,
    #[serde(rename = "dependiente", default)]
    pub dependent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypotheses {
    #[serde(rename = "nula", default)]
    pub null: String,
    #[serde(rename = "alternativa", default)]
    pub alternative: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Methodology {
    #[serde(rename = "diseno", default)]
    pub design: String,
    #[serde(rename = "poblacion", default)]
    pub population: String,
    #[serde(rename = "muestra", default)]
    pub sample: String,
    #[serde(rename = "tecnicas", default)]
    pub techniques: String,
}

/// One `Concepto - Autores` entry of the theoretical framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkEntry {
    #[serde(rename = "concepto")]
    pub concept: String,
    #[serde(rename = "autores")]
    pub authors: String,
}

impl FrameworkEntry {
    pub fn new(concept: impl Into<String>, authors: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            authors: authors.into(),
        }
    }

    /// The line form shown in the input widget
    pub fn to_line(&self) -> String {
        format!("{} - {}", self.concept, self.authors)
    }
}

/// All answers of a session. Field names follow the exported vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixData {
    #[serde(
        rename = "tipo_investigacion",
        serialize_with = "serialize_research_type",
        deserialize_with = "deserialize_research_type",
        default
    )]
    pub research_type: Option<ResearchType>,
    #[serde(rename = "tema", default)]
    pub topic: String,
    #[serde(rename = "pregunta", default)]
    pub question: String,
    #[serde(rename = "objetivo_general", default)]
    pub general_objective: String,
    #[serde(rename = "objetivos_especificos", default = "default_objectives")]
    pub objectives: Vec<String>,
    #[serde(rename = "justificacion", default)]
    pub justification: String,
    #[serde(rename = "marco_teorico", default)]
    pub framework: Vec<FrameworkEntry>,
    #[serde(rename = "metodologia", default)]
    pub methodology: Methodology,
    #[serde(default)]
    pub variables: Variables,
    #[serde(rename = "hipotesis", default)]
    pub hypotheses: Hypotheses,
}

fn default_objectives() -> Vec<String> {
    vec![String::new(); MAX_OBJECTIVES]
}

impl Default for MatrixData {
    fn default() -> Self {
        Self {
            research_type: None,
            topic: String::new(),
            question: String::new(),
            general_objective: String::new(),
            objectives: default_objectives(),
            justification: String::new(),
            framework: Vec::new(),
            methodology: Methodology::default(),
            variables: Variables::default(),
            hypotheses: Hypotheses::default(),
        }
    }
}

impl MatrixData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn research_type(&self) -> Option<ResearchType> {
        self.research_type
    }

    /// Current value of a field. Unset fields return their zero value.
    pub fn get(&self, key: FieldKey) -> FieldValue {
        match key {
            FieldKey::ResearchType => FieldValue::text(
                self.research_type
                    .map(|rt| rt.label())
                    .unwrap_or_default(),
            ),
            FieldKey::SpecificObjectives => FieldValue::List(self.objectives.clone()),
            FieldKey::TheoreticalFramework => {
                FieldValue::List(self.framework.iter().map(FrameworkEntry::to_line).collect())
            }
            _ => match self.text_slot(key) {
                Some(slot) => FieldValue::text(slot.as_str()),
                None => FieldValue::text(""),
            },
        }
    }

    /// Write a field. Never fails: text written to a list field is
    /// decomposed, a list written to a text field is joined by newline and
    /// an unknown research-type label clears the selection.
    pub fn set(&mut self, key: FieldKey, value: FieldValue) {
        match key {
            FieldKey::ResearchType => {
                self.research_type = ResearchType::from_label(&value.to_input_text());
            }
            FieldKey::SpecificObjectives => {
                let max = descriptor(key).max_items();
                self.objectives = match value {
                    FieldValue::Text(text) => split_capped(&text, max),
                    FieldValue::List(_) => {
                        let mut items = value.items();
                        if let Some(max) = max {
                            items.truncate(max);
                        }
                        items
                    }
                };
            }
            FieldKey::TheoreticalFramework => {
                // Lines without a separator are not kept
                self.framework = value
                    .items()
                    .iter()
                    .filter_map(|line| parse_concept_authors(line))
                    .map(|(concept, authors)| FrameworkEntry::new(concept, authors))
                    .collect();
            }
            _ => {
                if let Some(slot) = self.text_slot_mut(key) {
                    *slot = value.to_input_text();
                }
            }
        }
    }

    /// Restore the default record
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn text_slot(&self, key: FieldKey) -> Option<&String> {
        match key {
            FieldKey::Topic => Some(&self.topic),
            FieldKey::Question => Some(&self.question),
            FieldKey::GeneralObjective => Some(&self.general_objective),
            FieldKey::IndependentVariable => Some(&self.variables.independent),
            FieldKey::DependentVariable => Some(&self.variables.dependent),
            FieldKey::NullHypothesis => Some(&self.hypotheses.null),
            FieldKey::AlternativeHypothesis => Some(&self.hypotheses.alternative),
            FieldKey::Justification => Some(&self.justification),
            FieldKey::Design => Some(&self.methodology.design),
            FieldKey::Population => Some(&self.methodology.population),
            FieldKey::Sample => Some(&self.methodology.sample),
            FieldKey::Techniques => Some(&self.methodology.techniques),
            FieldKey::ResearchType
            | FieldKey::SpecificObjectives
            | FieldKey::TheoreticalFramework => None,
        }
    }

    fn text_slot_mut(&mut self, key: FieldKey) -> Option<&mut String> {
        match key {
            FieldKey::Topic => Some(&mut self.topic),
            FieldKey::Question => Some(&mut self.question),
            FieldKey::GeneralObjective => Some(&mut self.general_objective),
            FieldKey::IndependentVariable => Some(&mut self.variables.independent),
            FieldKey::DependentVariable => Some(&mut self.variables.dependent),
            FieldKey::NullHypothesis => Some(&mut self.hypotheses.null),
            FieldKey::AlternativeHypothesis => Some(&mut self.hypotheses.alternative),
            FieldKey::Justification => Some(&mut self.justification),
            FieldKey::Design => Some(&mut self.methodology.design),
            FieldKey::Population => Some(&mut self.methodology.population),
            FieldKey::Sample => Some(&mut self.methodology.sample),
            FieldKey::Techniques => Some(&mut self.methodology.techniques),
            FieldKey::ResearchType
            | FieldKey::SpecificObjectives
            | FieldKey::TheoreticalFramework => None,
        }
    }
}

// An unselected research type is stored as "" in the exported record
fn serialize_research_type<S>(value: &Option<ResearchType>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.map(|rt| rt.label()).unwrap_or_default())
}

fn deserialize_research_type<'de, D>(deserializer: D) -> Result<Option<ResearchType>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(ResearchType::from_label))
}
