use matriz_core::export::to_markdown;
use matriz_core::{FieldKey, FieldValue, MatrixData, ResearchType};

/// Prompt templates for the critique
pub struct CritiquePrompts;

impl CritiquePrompts {
    /// Prompt evaluating one answer. `None` for fields without a template
    /// (the choice fields).
    pub fn field_prompt(
        key: FieldKey,
        value: &FieldValue,
        research_type: Option<ResearchType>,
    ) -> Option<String> {
        let criteria = criteria(key)?;
        let answer = value.to_input_text();
        let answer = if answer.trim().is_empty() {
            "(sin respuesta)"
        } else {
            answer.trim()
        };

        Some(format!(
            r#"Eres un asesor metodológico con experiencia en investigación {approach}. Un estudiante está construyendo su matriz de investigación y te pide revisar un componente.

## {title}
{answer}

## Criterios de evaluación
{criteria}

## Formato de respuesta
Responde en español, en un máximo de 5 viñetas breves:
- una fortaleza,
- las debilidades principales,
- una sugerencia concreta de mejora (puedes proponer una redacción alternativa).

No repitas el texto del estudiante."#,
            approach = approach(research_type),
            title = key.title(),
            answer = truncate(answer, 4000),
            criteria = criteria,
        ))
    }

    /// Prompt evaluating the coherence of the whole matrix
    pub fn matrix_prompt(data: &MatrixData, research_type: Option<ResearchType>) -> String {
        format!(
            r#"Eres un asesor metodológico con experiencia en investigación {approach}. Revisa la siguiente matriz de investigación completa.

{matrix}

## Qué evaluar
1. Coherencia entre tema, pregunta y objetivos.
2. Si los objetivos específicos permiten alcanzar el objetivo general.
3. Consistencia entre el tipo de investigación, el diseño, la muestra y las técnicas.
4. Si hay variables e hipótesis, que sean medibles y estén alineadas con la pregunta.
5. Pertinencia del marco teórico.

## Formato de respuesta
Responde en español con un párrafo de diagnóstico general y luego una lista numerada de hasta 5 recomendaciones priorizadas."#,
            approach = approach(research_type),
            matrix = truncate(&to_markdown(data), 12000),
        )
    }
}

fn approach(research_type: Option<ResearchType>) -> &'static str {
    match research_type {
        Some(ResearchType::Qualitative) => "cualitativa",
        Some(ResearchType::Quantitative) => "cuantitativa",
        Some(ResearchType::Mixed) => "mixta",
        None => "académica",
    }
}

fn criteria(key: FieldKey) -> Option<&'static str> {
    let text = match key {
        FieldKey::ResearchType | FieldKey::Design => return None,
        FieldKey::Topic => {
            "- ¿Delimita el fenómeno, la población y el contexto (lugar y tiempo)?\n\
             - ¿Es viable y relevante?\n\
             - ¿Es lo bastante específico?"
        }
        FieldKey::Question => {
            "- ¿Es clara, precisa y está formulada como pregunta?\n\
             - ¿Es coherente con el tipo de investigación?\n\
             - ¿Puede responderse con el estudio planteado?"
        }
        FieldKey::GeneralObjective => {
            "- ¿Comienza con un verbo en infinitivo adecuado al alcance del estudio?\n\
             - ¿Responde directamente a la pregunta de investigación?\n\
             - ¿Es alcanzable y evaluable?"
        }
        FieldKey::SpecificObjectives => {
            "- ¿Cada objetivo empieza con un verbo en infinitivo?\n\
             - ¿En conjunto permiten alcanzar el objetivo general?\n\
             - ¿Son concretos y no se superponen?"
        }
        FieldKey::IndependentVariable | FieldKey::DependentVariable => {
            "- ¿La variable está definida de forma observable y medible?\n\
             - ¿Su papel (causa o efecto) es correcto?\n\
             - ¿Qué indicadores podrían usarse para medirla?"
        }
        FieldKey::NullHypothesis => {
            "- ¿Expresa ausencia de relación o diferencia entre las variables?\n\
             - ¿Es contrastable estadísticamente?"
        }
        FieldKey::AlternativeHypothesis => {
            "- ¿Expresa la relación o diferencia esperada entre las variables?\n\
             - ¿Es contrastable y coherente con la hipótesis nula?"
        }
        FieldKey::Justification => {
            "- ¿Explica la relevancia social, teórica y práctica?\n\
             - ¿Menciona la viabilidad del estudio?\n\
             - ¿Se apoya en evidencia o datos?"
        }
        FieldKey::TheoreticalFramework => {
            "- ¿Los conceptos son pertinentes al tema?\n\
             - ¿Los autores son referentes reconocidos y están bien citados?\n\
             - ¿Falta algún concepto clave?"
        }
        FieldKey::Population => {
            "- ¿Define claramente quiénes son los participantes y sus características?\n\
             - ¿Indica lugar y tiempo?"
        }
        FieldKey::Sample => {
            "- ¿Indica el tamaño y el tipo de muestreo?\n\
             - ¿El muestreo es adecuado para el tipo de investigación?\n\
             - ¿Incluye criterios de inclusión y exclusión?"
        }
        FieldKey::Techniques => {
            "- ¿Las técnicas e instrumentos son adecuados al enfoque?\n\
             - ¿Permiten responder a los objetivos?\n\
             - ¿Se menciona validez y confiabilidad?"
        }
    };
    Some(text)
}

/// Cut at a line boundary, never inside a character
fn truncate(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    match text[..end].rfind('\n') {
        Some(pos) => &text[..pos],
        None => &text[..end],
    }
}
