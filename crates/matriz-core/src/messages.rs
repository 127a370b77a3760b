//! Fixed Spanish warnings shown when a field's rule fails.

use crate::field::FieldKey;
use crate::validation::Violation;

/// Warning text for a failed field. Falls back to a generic wording when
/// the field has no specific message for the violation.
pub fn warning(key: FieldKey, violation: &Violation) -> String {
    use FieldKey::*;
    use Violation::*;

    let specific: Option<&'static str> = match (key, violation) {
        (ResearchType, Empty) => Some("⚠️ Selecciona un tipo de investigación."),
        (ResearchType, NotAnOption) => {
            Some("⚠️ El tipo de investigación debe ser Cualitativa, Cuantitativa o Mixta.")
        }
        (Topic, Empty) => Some("⚠️ Escribe el tema de tu investigación."),
        (Topic, TooShort { .. }) => Some(
            "⚠️ El tema es muy breve. Debe tener más de 20 caracteres e indicar el fenómeno y el contexto.",
        ),
        (Question, Empty) => Some("⚠️ Escribe tu pregunta de investigación."),
        (Question, TooShort { .. }) => {
            Some("⚠️ La pregunta es muy breve. Debe tener más de 15 caracteres.")
        }
        (Question, MissingPattern { .. }) => {
            Some("⚠️ La pregunta debe formularse como pregunta e incluir el signo '?'.")
        }
        (GeneralObjective, Empty) => Some("⚠️ Escribe el objetivo general."),
        (GeneralObjective, TooShort { .. }) => {
            Some("⚠️ El objetivo general es muy breve. Debe tener más de 20 caracteres.")
        }
        (GeneralObjective, NotInfinitive { .. }) => Some(
            "⚠️ El objetivo general debe comenzar con un verbo en infinitivo (terminado en -ar, -er o -ir).",
        ),
        (SpecificObjectives, NoLines) => {
            Some("⚠️ Escribe al menos un objetivo específico, uno por línea.")
        }
        (SpecificObjectives, LineTooShort { .. }) => {
            Some("⚠️ Cada objetivo específico debe tener más de 10 caracteres.")
        }
        (IndependentVariable, Empty) => Some("⚠️ Define la variable independiente."),
        (IndependentVariable, TooShort { .. }) => {
            Some("⚠️ La variable independiente debe tener más de 5 caracteres.")
        }
        (DependentVariable, Empty) => Some("⚠️ Define la variable dependiente."),
        (DependentVariable, TooShort { .. }) => {
            Some("⚠️ La variable dependiente debe tener más de 5 caracteres.")
        }
        (NullHypothesis, Empty) => Some("⚠️ Escribe la hipótesis nula."),
        (NullHypothesis, TooShort { .. }) => {
            Some("⚠️ La hipótesis nula debe tener más de 20 caracteres.")
        }
        (AlternativeHypothesis, Empty) => Some("⚠️ Escribe la hipótesis alternativa."),
        (AlternativeHypothesis, TooShort { .. }) => {
            Some("⚠️ La hipótesis alternativa debe tener más de 20 caracteres.")
        }
        (Justification, Empty) => Some("⚠️ Escribe la justificación de tu investigación."),
        (Justification, TooShort { .. }) => Some(
            "⚠️ La justificación debe tener más de 50 caracteres y explicar la relevancia del estudio.",
        ),
        (TheoreticalFramework, NoLines) => {
            Some("⚠️ Incluye al menos un concepto con sus autores, uno por línea.")
        }
        (TheoreticalFramework, LineTooShort { .. }) => {
            Some("⚠️ Cada entrada del marco teórico debe tener más de 5 caracteres.")
        }
        (Design, Empty) => Some("⚠️ Selecciona un diseño de investigación."),
        (Design, NotAnOption) => {
            Some("⚠️ El diseño elegido no corresponde al tipo de investigación seleccionado.")
        }
        (Population, Empty) => Some("⚠️ Describe la población de estudio."),
        (Population, TooShort { .. }) => {
            Some("⚠️ La descripción de la población debe tener más de 20 caracteres.")
        }
        (Sample, Empty) => Some("⚠️ Describe la muestra."),
        (Sample, TooShort { .. }) => {
            Some("⚠️ La descripción de la muestra debe tener más de 20 caracteres.")
        }
        (Techniques, Empty) => Some("⚠️ Indica las técnicas de recolección de datos."),
        (Techniques, TooShort { .. }) => {
            Some("⚠️ Las técnicas de recolección deben tener más de 10 caracteres.")
        }
        _ => None,
    };

    // Line-level violations name the offending line
    match violation {
        LineTooShort { line, .. } | LineMalformed { line } => {
            let base = specific.map(str::to_string).unwrap_or_else(|| generic(violation));
            format!("{} (línea {})", base, line)
        }
        _ => specific
            .map(str::to_string)
            .unwrap_or_else(|| generic(violation)),
    }
}

fn generic(violation: &Violation) -> String {
    match violation {
        Violation::Empty => "⚠️ Este campo es obligatorio.".to_string(),
        Violation::NotAnOption => "⚠️ Selecciona una de las opciones disponibles.".to_string(),
        Violation::TooShort { min } => {
            format!("⚠️ La respuesta debe tener más de {} caracteres.", min)
        }
        Violation::MissingPattern { needle } => {
            format!("⚠️ La respuesta debe incluir '{}'.", needle)
        }
        Violation::NotInfinitive { word } => {
            format!("⚠️ '{}' no parece un verbo en infinitivo.", word)
        }
        Violation::NoLines => "⚠️ Escribe al menos una línea.".to_string(),
        Violation::LineTooShort { min, .. } => {
            format!("⚠️ Cada línea debe tener más de {} caracteres.", min)
        }
        Violation::LineMalformed { .. } => {
            "⚠️ Usa el formato 'Concepto - Autores' en cada línea.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_warnings_are_field_specific() {
        let msg = warning(
            FieldKey::Question,
            &Violation::MissingPattern { needle: "?" },
        );
        assert!(msg.contains("signo '?'"));
        let msg = warning(FieldKey::Question, &Violation::TooShort { min: 15 });
        assert!(msg.contains("15"));
    }

    #[test]
    fn test_line_warnings_name_the_line() {
        let msg = warning(
            FieldKey::TheoreticalFramework,
            &Violation::LineMalformed { line: 2 },
        );
        assert!(msg.contains("Concepto - Autores"));
        assert!(msg.ends_with("(línea 2)"));
    }

    #[test]
    fn test_every_violation_has_a_warning() {
        let violations = [
            Violation::Empty,
            Violation::NotAnOption,
            Violation::TooShort { min: 3 },
            Violation::MissingPattern { needle: "?" },
            Violation::NotInfinitive { word: "La".into() },
            Violation::NoLines,
            Violation::LineTooShort { line: 1, min: 3 },
            Violation::LineMalformed { line: 1 },
        ];
        for key in FieldKey::ALL {
            for violation in &violations {
                assert!(warning(key, violation).starts_with("⚠️"));
            }
        }
    }
}
