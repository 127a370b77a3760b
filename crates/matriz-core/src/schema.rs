//! The single static field schema and the derived step sequence.

use crate::field::{
    Applicability, Decomposition, FieldDescriptor, FieldKey, InputKind, Multiplicity,
};
use crate::validation::{LineShape, Rule};
use crate::ResearchType;

/// Maximum number of specific objectives kept
pub const MAX_OBJECTIVES: usize = 3;

const fn scalar(
    key: FieldKey,
    prompt_text: &'static str,
    input_kind: InputKind,
    applicability: Applicability,
    rule: Rule,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        prompt_text,
        input_kind,
        applicability,
        rule,
        multiplicity: Multiplicity::Scalar,
        decomposition: Decomposition::None,
    }
}

pub static BASE_STEPS: [FieldDescriptor; 5] = [
    scalar(
        FieldKey::ResearchType,
        "¡Hola! Vamos a crear tu matriz de investigación. ¿Qué tipo de investigación realizarás?",
        InputKind::SingleChoice,
        Applicability::Always,
        Rule::Choice,
    ),
    scalar(
        FieldKey::Topic,
        "Perfecto. Ahora, ¿cuál es el tema de tu investigación? Describe brevemente el fenómeno y el contexto.",
        InputKind::LongText,
        Applicability::Always,
        Rule::MinLength(20),
    ),
    scalar(
        FieldKey::Question,
        "¿Cuál es tu pregunta de investigación? Asegúrate de que sea clara y esté alineada con tu tema.",
        InputKind::LongText,
        Applicability::Always,
        Rule::Contains {
            min: 15,
            needle: "?",
        },
    ),
    scalar(
        FieldKey::GeneralObjective,
        "Ahora escribe tu objetivo general. ¿Qué quieres lograr con tu investigación?",
        InputKind::LongText,
        Applicability::Always,
        Rule::LeadingVerb(20),
    ),
    FieldDescriptor {
        key: FieldKey::SpecificObjectives,
        prompt_text: "Escribe hasta 3 objetivos específicos. Estos deben detallar cómo alcanzarás tu objetivo general. Ingresa uno por línea.",
        input_kind: InputKind::LongText,
        applicability: Applicability::Always,
        rule: Rule::Lines {
            min_line: 10,
            shape: LineShape::Any,
            max: Some(MAX_OBJECTIVES),
        },
        multiplicity: Multiplicity::List {
            max: Some(MAX_OBJECTIVES),
        },
        decomposition: Decomposition::Lines,
    },
];

pub static QUANTITATIVE_STEPS: [FieldDescriptor; 4] = [
    scalar(
        FieldKey::IndependentVariable,
        "Define tu variable independiente (la causa).",
        InputKind::ShortText,
        Applicability::QuantitativeOnly,
        Rule::MinLength(5),
    ),
    scalar(
        FieldKey::DependentVariable,
        "Define tu variable dependiente (el efecto).",
        InputKind::ShortText,
        Applicability::QuantitativeOnly,
        Rule::MinLength(5),
    ),
    scalar(
        FieldKey::NullHypothesis,
        "Escribe tu hipótesis nula (H₀).",
        InputKind::LongText,
        Applicability::QuantitativeOnly,
        Rule::MinLength(20),
    ),
    scalar(
        FieldKey::AlternativeHypothesis,
        "Escribe tu hipótesis alternativa (H₁).",
        InputKind::LongText,
        Applicability::QuantitativeOnly,
        Rule::MinLength(20),
    ),
];

pub static FINAL_STEPS: [FieldDescriptor; 6] = [
    scalar(
        FieldKey::Justification,
        "¿Por qué es importante tu investigación? Escribe la justificación.",
        InputKind::LongText,
        Applicability::Always,
        Rule::MinLength(50),
    ),
    FieldDescriptor {
        key: FieldKey::TheoreticalFramework,
        prompt_text: "Para el marco teórico, ingresa un concepto o variable clave y sus autores (formato: Concepto - Autores). Ingresa uno por línea.",
        input_kind: InputKind::LongText,
        applicability: Applicability::Always,
        rule: Rule::Lines {
            min_line: 5,
            shape: LineShape::ConceptAuthors,
            max: None,
        },
        multiplicity: Multiplicity::List { max: None },
        decomposition: Decomposition::ConceptAuthors,
    },
    scalar(
        FieldKey::Design,
        "¿Qué diseño de investigación seguirás?",
        InputKind::ChoiceWithDescription,
        Applicability::Always,
        Rule::Choice,
    ),
    scalar(
        FieldKey::Population,
        "Describe la población de tu estudio (¿quiénes son los participantes?).",
        InputKind::LongText,
        Applicability::Always,
        Rule::MinLength(20),
    ),
    scalar(
        FieldKey::Sample,
        "Describe la muestra (¿cómo seleccionarás a los participantes?).",
        InputKind::LongText,
        Applicability::Always,
        Rule::MinLength(20),
    ),
    scalar(
        FieldKey::Techniques,
        "¿Qué técnicas usarás para recolectar datos? (Ej. entrevistas, encuestas, observación).",
        InputKind::LongText,
        Applicability::Always,
        Rule::MinLength(10),
    ),
];

/// Ordered step sequence for a research type: base steps, then the
/// quantitative block when it applies, then the final steps.
pub fn applicable_fields(research_type: Option<ResearchType>) -> Vec<&'static FieldDescriptor> {
    all_fields()
        .filter(|descriptor| descriptor.applies_to(research_type))
        .collect()
}

/// Static descriptor of a field
pub fn descriptor(key: FieldKey) -> &'static FieldDescriptor {
    match key {
        FieldKey::ResearchType => &BASE_STEPS[0],
        FieldKey::Topic => &BASE_STEPS[1],
        FieldKey::Question => &BASE_STEPS[2],
        FieldKey::GeneralObjective => &BASE_STEPS[3],
        FieldKey::SpecificObjectives => &BASE_STEPS[4],
        FieldKey::IndependentVariable => &QUANTITATIVE_STEPS[0],
        FieldKey::DependentVariable => &QUANTITATIVE_STEPS[1],
        FieldKey::NullHypothesis => &QUANTITATIVE_STEPS[2],
        FieldKey::AlternativeHypothesis => &QUANTITATIVE_STEPS[3],
        FieldKey::Justification => &FINAL_STEPS[0],
        FieldKey::TheoreticalFramework => &FINAL_STEPS[1],
        FieldKey::Design => &FINAL_STEPS[2],
        FieldKey::Population => &FINAL_STEPS[3],
        FieldKey::Sample => &FINAL_STEPS[4],
        FieldKey::Techniques => &FINAL_STEPS[5],
    }
}

/// Every descriptor in schema order, regardless of applicability
pub fn all_fields() -> impl Iterator<Item = &'static FieldDescriptor> {
    BASE_STEPS
        .iter()
        .chain(QUANTITATIVE_STEPS.iter())
        .chain(FINAL_STEPS.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(research_type: Option<ResearchType>) -> Vec<FieldKey> {
        applicable_fields(research_type)
            .into_iter()
            .map(|d| d.key)
            .collect()
    }

    #[test]
    fn test_every_key_has_exactly_one_descriptor() {
        for key in FieldKey::ALL {
            assert_eq!(all_fields().filter(|d| d.key == key).count(), 1, "{}", key);
            assert_eq!(descriptor(key).key, key);
        }
    }

    #[test]
    fn test_sequence_lengths() {
        assert_eq!(applicable_fields(None).len(), 11);
        assert_eq!(applicable_fields(Some(ResearchType::Qualitative)).len(), 11);
        assert_eq!(applicable_fields(Some(ResearchType::Quantitative)).len(), 15);
        assert_eq!(applicable_fields(Some(ResearchType::Mixed)).len(), 15);
    }

    #[test]
    fn test_quantitative_block_sits_between_base_and_final() {
        let quant = keys(Some(ResearchType::Quantitative));
        assert_eq!(quant[4], FieldKey::SpecificObjectives);
        assert_eq!(quant[5], FieldKey::IndependentVariable);
        assert_eq!(quant[8], FieldKey::AlternativeHypothesis);
        assert_eq!(quant[9], FieldKey::Justification);

        let qual = keys(Some(ResearchType::Qualitative));
        assert_eq!(qual[5], FieldKey::Justification);
        assert!(!qual.contains(&FieldKey::NullHypothesis));
    }

    #[test]
    fn test_none_matches_qualitative_sequence() {
        assert_eq!(keys(None), keys(Some(ResearchType::Qualitative)));
    }
}
