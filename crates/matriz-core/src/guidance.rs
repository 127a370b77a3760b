//! Explanations, examples and choice options shown beside each field.
//!
//! All tables are total over `(FieldKey, Option<ResearchType>)`; `None` is
//! the "type not selected yet" case.

use crate::field::{ChoiceOption, FieldKey};
use crate::ResearchType;

const RESEARCH_TYPE_OPTIONS: [ChoiceOption; 3] = [
    ChoiceOption::new("Cualitativa"),
    ChoiceOption::new("Cuantitativa"),
    ChoiceOption::new("Mixta"),
];

const QUALITATIVE_DESIGNS: [ChoiceOption; 5] = [
    ChoiceOption::described(
        "Fenomenológico",
        "Explora la experiencia vivida de los participantes",
    ),
    ChoiceOption::described(
        "Etnográfico",
        "Describe la cultura y prácticas de un grupo en su contexto",
    ),
    ChoiceOption::described(
        "Teoría fundamentada",
        "Construye una teoría a partir de los datos recogidos",
    ),
    ChoiceOption::described(
        "Estudio de caso",
        "Analiza en profundidad uno o pocos casos delimitados",
    ),
    ChoiceOption::described(
        "Investigación-acción",
        "Diagnostica y transforma una situación junto a los participantes",
    ),
];

const QUANTITATIVE_DESIGNS: [ChoiceOption; 4] = [
    ChoiceOption::described(
        "Experimental",
        "Manipula la variable independiente con asignación aleatoria",
    ),
    ChoiceOption::described(
        "Cuasiexperimental",
        "Manipula la variable independiente con grupos ya formados",
    ),
    ChoiceOption::described(
        "Correlacional",
        "Mide la relación entre variables sin manipularlas",
    ),
    ChoiceOption::described(
        "Descriptivo",
        "Caracteriza la distribución de las variables en la población",
    ),
];

const MIXED_DESIGNS: [ChoiceOption; 4] = [
    ChoiceOption::described(
        "Convergente paralelo",
        "Recoge datos cualitativos y cuantitativos a la vez y los compara",
    ),
    ChoiceOption::described(
        "Explicativo secuencial",
        "Primero cuantitativo, luego cualitativo para explicar los resultados",
    ),
    ChoiceOption::described(
        "Exploratorio secuencial",
        "Primero cualitativo, luego cuantitativo para generalizar hallazgos",
    ),
    ChoiceOption::described(
        "Incrustado",
        "Un enfoque secundario se anida dentro del enfoque principal",
    ),
];

/// Options offered for a choice field
pub fn options(key: FieldKey, research_type: Option<ResearchType>) -> Vec<ChoiceOption> {
    match key {
        FieldKey::ResearchType => RESEARCH_TYPE_OPTIONS.to_vec(),
        FieldKey::Design => match research_type {
            Some(ResearchType::Qualitative) => QUALITATIVE_DESIGNS.to_vec(),
            Some(ResearchType::Quantitative) => QUANTITATIVE_DESIGNS.to_vec(),
            Some(ResearchType::Mixed) => MIXED_DESIGNS.to_vec(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Explanation displayed above the input
pub fn explanation(key: FieldKey, research_type: Option<ResearchType>) -> &'static str {
    use ResearchType::*;

    match (key, research_type) {
        (FieldKey::ResearchType, _) => {
            "La investigación cualitativa comprende significados y experiencias; la \
             cuantitativa mide variables y prueba hipótesis; la mixta integra ambos enfoques."
        }
        (FieldKey::Topic, Some(Qualitative)) => {
            "Delimita el fenómeno que quieres comprender, quiénes lo viven y en qué contexto."
        }
        (FieldKey::Topic, Some(Quantitative)) => {
            "Delimita el fenómeno medible, la población y el contexto (lugar y tiempo)."
        }
        (FieldKey::Topic, _) => {
            "Describe brevemente el fenómeno que estudiarás y el contexto en que ocurre."
        }
        (FieldKey::Question, Some(Qualitative)) => {
            "Una buena pregunta cualitativa es abierta: suele empezar con ¿Cómo...? o \
             ¿Qué significado...?"
        }
        (FieldKey::Question, Some(Quantitative)) => {
            "Una buena pregunta cuantitativa relaciona variables medibles: ¿Qué relación \
             existe entre...? o ¿Cuál es el efecto de...?"
        }
        (FieldKey::Question, _) => {
            "La pregunta debe ser clara, estar alineada con el tema y terminar en signo de \
             interrogación."
        }
        (FieldKey::GeneralObjective, _) => {
            "El objetivo general expresa lo que quieres lograr. Empieza con un verbo en \
             infinitivo (analizar, comprender, determinar...)."
        }
        (FieldKey::SpecificObjectives, Some(Qualitative)) => {
            "Hasta 3 objetivos, uno por línea, que desglosen el objetivo general en etapas \
             (describir, interpretar, comprender)."
        }
        (FieldKey::SpecificObjectives, _) => {
            "Hasta 3 objetivos, uno por línea, que detallen cómo alcanzarás el objetivo \
             general. Empieza cada uno con un verbo en infinitivo."
        }
        (FieldKey::IndependentVariable, _) => {
            "La variable independiente es la causa o factor que se supone influye en otra."
        }
        (FieldKey::DependentVariable, _) => {
            "La variable dependiente es el efecto o resultado que se mide."
        }
        (FieldKey::NullHypothesis, _) => {
            "La hipótesis nula (H₀) afirma que no existe relación o diferencia entre las \
             variables."
        }
        (FieldKey::AlternativeHypothesis, _) => {
            "La hipótesis alternativa (H₁) afirma la relación o diferencia que esperas \
             encontrar."
        }
        (FieldKey::Justification, _) => {
            "Explica por qué es importante tu investigación: relevancia social, aporte \
             teórico, utilidad práctica y viabilidad."
        }
        (FieldKey::TheoreticalFramework, _) => {
            "Un concepto o variable clave por línea con sus autores, en el formato \
             Concepto - Autores."
        }
        (FieldKey::Design, Some(Qualitative)) => {
            "Elige la tradición cualitativa que guiará la recolección y el análisis."
        }
        (FieldKey::Design, Some(Quantitative)) => {
            "Elige el diseño según si manipularás variables o solo las medirás."
        }
        (FieldKey::Design, Some(Mixed)) => {
            "Elige cómo se combinarán y en qué orden los componentes cualitativo y \
             cuantitativo."
        }
        (FieldKey::Design, None) => {
            "Selecciona primero el tipo de investigación para ver los diseños disponibles."
        }
        (FieldKey::Population, _) => {
            "La población es el conjunto total de personas, casos o elementos que comparten \
             las características que estudiarás."
        }
        (FieldKey::Sample, Some(Qualitative)) => {
            "En estudios cualitativos la muestra suele ser intencional: explica los criterios \
             para elegir a los participantes y cuándo alcanzarás la saturación."
        }
        (FieldKey::Sample, Some(Quantitative)) => {
            "Indica el tamaño de la muestra y el tipo de muestreo (probabilístico o no) y \
             cómo lo calcularás."
        }
        (FieldKey::Sample, _) => {
            "Describe cómo seleccionarás a los participantes y cuántos serán."
        }
        (FieldKey::Techniques, Some(Qualitative)) => {
            "Técnicas habituales: entrevista en profundidad, grupo focal, observación \
             participante, análisis documental."
        }
        (FieldKey::Techniques, Some(Quantitative)) => {
            "Técnicas habituales: encuesta con cuestionario estandarizado, escalas, pruebas, \
             registros. Menciona la validez y confiabilidad del instrumento."
        }
        (FieldKey::Techniques, _) => {
            "Indica las técnicas e instrumentos con los que recolectarás los datos."
        }
    }
}

/// Sample answers displayed below the explanation
pub fn examples(key: FieldKey, research_type: Option<ResearchType>) -> &'static [&'static str] {
    use ResearchType::*;

    match (key, research_type) {
        (FieldKey::Topic, Some(Qualitative)) => &[
            "Experiencias de docentes rurales con la enseñanza remota durante la pandemia",
        ],
        (FieldKey::Topic, Some(Quantitative)) => &[
            "Relación entre horas de sueño y rendimiento académico en universitarios de Lima, 2024",
        ],
        (FieldKey::Topic, _) => &[
            "Uso de redes sociales y bienestar emocional en adolescentes de secundaria",
        ],
        (FieldKey::Question, Some(Qualitative)) => &[
            "¿Cómo perciben los docentes rurales la enseñanza remota?",
        ],
        (FieldKey::Question, Some(Quantitative)) => &[
            "¿Qué relación existe entre las horas de sueño y el promedio ponderado de los estudiantes?",
        ],
        (FieldKey::Question, _) => &[
            "¿De qué manera el uso de redes sociales se relaciona con el bienestar emocional?",
        ],
        (FieldKey::GeneralObjective, Some(Qualitative)) => &[
            "Comprender la percepción de los docentes rurales sobre la enseñanza remota.",
        ],
        (FieldKey::GeneralObjective, _) => &[
            "Determinar la relación entre las horas de sueño y el rendimiento académico.",
        ],
        (FieldKey::SpecificObjectives, _) => &[
            "Identificar las horas de sueño promedio de los estudiantes.",
            "Describir el rendimiento académico del último semestre.",
            "Establecer la correlación entre ambas variables.",
        ],
        (FieldKey::IndependentVariable, _) => &["Horas de sueño por noche"],
        (FieldKey::DependentVariable, _) => &["Promedio ponderado del semestre"],
        (FieldKey::NullHypothesis, _) => &[
            "No existe relación significativa entre las horas de sueño y el rendimiento académico.",
        ],
        (FieldKey::AlternativeHypothesis, _) => &[
            "Existe una relación significativa entre las horas de sueño y el rendimiento académico.",
        ],
        (FieldKey::TheoreticalFramework, _) => &[
            "Higiene del sueño - Hauri (1977)",
            "Rendimiento académico - Navarro (2003)",
        ],
        (FieldKey::Sample, Some(Qualitative)) => &[
            "12 docentes seleccionados por muestreo intencional hasta la saturación teórica",
        ],
        (FieldKey::Sample, _) => &[
            "230 estudiantes elegidos por muestreo aleatorio estratificado por facultad",
        ],
        (FieldKey::Techniques, Some(Qualitative)) => &["Entrevista semiestructurada y grupo focal"],
        (FieldKey::Techniques, _) => &["Encuesta con cuestionario de escala Likert"],
        (FieldKey::ResearchType, _)
        | (FieldKey::Justification, _)
        | (FieldKey::Design, _)
        | (FieldKey::Population, _) => &[],
    }
}
