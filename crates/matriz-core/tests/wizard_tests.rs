use matriz_core::decompose::{join_lines, split_capped};
use matriz_core::schema::{BASE_STEPS, FINAL_STEPS, QUANTITATIVE_STEPS};
use matriz_core::{
    applicable_fields, descriptor, CritiqueOutcome, FieldKey, FieldValue, MatrixData,
    NavigationError, Position, ResearchType, Violation, Wizard, WizardView,
};
use proptest::prelude::*;

/// Helper: type an answer and move on.
fn answer(wizard: &mut Wizard, raw: &str) {
    wizard.edit(raw);
    wizard
        .advance()
        .unwrap_or_else(|e| panic!("advance rejected for {:?}: {}", raw, e));
}

/// Helper: answer every step of a quantitative matrix.
fn complete_quantitative(wizard: &mut Wizard) {
    answer(wizard, "Cuantitativa");
    answer(
        wizard,
        "Relación entre horas de sueño y rendimiento académico en universitarios",
    );
    answer(
        wizard,
        "¿Qué relación existe entre las horas de sueño y el rendimiento académico?",
    );
    answer(
        wizard,
        "Determinar la relación entre las horas de sueño y el rendimiento académico.",
    );
    answer(
        wizard,
        "Identificar las horas de sueño promedio.\nDescribir el rendimiento académico.",
    );
    answer(wizard, "Horas de sueño por noche");
    answer(wizard, "Promedio ponderado del semestre");
    answer(
        wizard,
        "No existe relación entre las horas de sueño y el rendimiento.",
    );
    answer(
        wizard,
        "Existe una relación positiva entre las horas de sueño y el rendimiento.",
    );
    answer(
        wizard,
        "Dormir poco es frecuente entre universitarios y puede explicar parte del bajo rendimiento observado.",
    );
    answer(
        wizard,
        "Higiene del sueño - Hauri (1977)\nRendimiento académico - Navarro (2003)",
    );
    answer(wizard, "Correlacional");
    answer(wizard, "Estudiantes de pregrado de una universidad pública de Lima");
    answer(wizard, "230 estudiantes elegidos por muestreo aleatorio estratificado");
    answer(wizard, "Encuesta con cuestionario de escala Likert");
}

// ============================================================
// Field schema
// ============================================================

#[test]
fn test_sequence_order_for_every_research_type() {
    let cases = [
        None,
        Some(ResearchType::Qualitative),
        Some(ResearchType::Quantitative),
        Some(ResearchType::Mixed),
    ];
    for research_type in cases {
        let with_block = research_type
            .map(|rt| rt.has_quantitative_block())
            .unwrap_or(false);
        let expected: Vec<FieldKey> = BASE_STEPS
            .iter()
            .chain(QUANTITATIVE_STEPS.iter().filter(|_| with_block))
            .chain(FINAL_STEPS.iter())
            .map(|d| d.key)
            .collect();
        let actual: Vec<FieldKey> = applicable_fields(research_type)
            .into_iter()
            .map(|d| d.key)
            .collect();
        assert_eq!(actual, expected, "{:?}", research_type);
    }
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn test_scenario_a_topic_survives_type_change() {
    let mut wizard = Wizard::new();
    answer(&mut wizard, "Cuantitativa");
    let topic = "Sueño y notas en pregrado"; // 25 characters
    assert_eq!(topic.chars().count(), 25);
    wizard.edit(topic);

    assert!(descriptor(FieldKey::Topic).is_valid(&FieldValue::text(topic), wizard.research_type()));
    assert!(wizard.advance().is_ok());

    wizard.retreat().unwrap();
    wizard.retreat().unwrap();
    wizard.edit("Cualitativa");
    assert_eq!(wizard.research_type(), Some(ResearchType::Qualitative));
    assert_eq!(wizard.data().topic, topic);

    wizard.advance().unwrap();
    assert_eq!(wizard.staged(), topic);
}

#[test]
fn test_scenario_b_objectives_drop_blank_lines() {
    let raw = "Identificar X.\nDeterminar Y.\n";
    assert_eq!(
        split_capped(raw, descriptor(FieldKey::SpecificObjectives).max_items()),
        vec!["Identificar X.", "Determinar Y."]
    );

    let objectives = descriptor(FieldKey::SpecificObjectives);
    assert!(objectives.is_valid(&FieldValue::text(raw), None));
    assert!(objectives.is_valid(&FieldValue::text("Identificar X.\nDeterminar Y.\n\n"), None));

    let mut data = MatrixData::default();
    data.set(FieldKey::SpecificObjectives, FieldValue::text(raw));
    assert_eq!(data.objectives, vec!["Identificar X.", "Determinar Y."]);
}

#[test]
fn test_objectives_beyond_three_are_dropped_not_rejected() {
    let raw = "Identificar las prácticas docentes.\n\
               Describir los recursos disponibles.\n\
               Analizar la participación estudiantil.\n\
               Comparar los resultados por sede.";
    let objectives = descriptor(FieldKey::SpecificObjectives);
    assert_eq!(objectives.validate(&FieldValue::text(raw), None), Ok(()));

    let mut data = MatrixData::default();
    data.set(FieldKey::SpecificObjectives, FieldValue::text(raw));
    assert_eq!(
        data.objectives,
        vec![
            "Identificar las prácticas docentes.",
            "Describir los recursos disponibles.",
            "Analizar la participación estudiantil.",
        ]
    );
}

#[test]
fn test_scenario_c_leading_verb() {
    let general = descriptor(FieldKey::GeneralObjective);
    assert!(general.is_valid(&FieldValue::text("Comprender la percepción docente."), None));
    assert_eq!(
        general.validate(&FieldValue::text("La percepción docente es importante."), None),
        Err(Violation::NotInfinitive {
            word: "La".to_string()
        })
    );
    // Two-letter infinitives count too
    assert!(general.is_valid(
        &FieldValue::text("Ir a las escuelas rurales para comprender su realidad."),
        None
    ));
}

#[test]
fn test_scenario_e_reset_from_summary() {
    let mut wizard = Wizard::new();
    complete_quantitative(&mut wizard);

    assert!(wizard.is_complete());
    assert_eq!(wizard.data().variables.independent, "Horas de sueño por noche");
    assert_eq!(wizard.data().framework.len(), 2);
    match wizard.view() {
        WizardView::Summary(summary) => {
            assert_eq!(summary.total, 15);
            assert_eq!(summary.sections.len(), 5);
        }
        WizardView::Step(step) => panic!("expected summary, got {}", step.key),
    }

    wizard.reset();
    assert!(matches!(wizard.position(), Position::Active { index: 0, .. }));
    assert_eq!(wizard.data(), &MatrixData::default());
    assert_eq!(wizard.data().hypotheses.null, "");
    assert_eq!(wizard.data().methodology.techniques, "");
}

#[test]
fn test_reset_mid_sequence_with_critique_in_flight() {
    let mut wizard = Wizard::new();
    answer(&mut wizard, "Mixta");
    answer(&mut wizard, "Uso de tabletas en el aprendizaje de la lectura inicial");
    wizard.edit("¿Cómo influye el uso de tabletas en la lectura inicial?");
    assert!(matches!(wizard.position(), Position::Active { index: 2, .. }));

    let request = wizard.begin_field_critique().unwrap();
    assert!(wizard.critique_in_flight());

    wizard.reset();
    assert!(matches!(wizard.position(), Position::Active { index: 0, .. }));
    assert_eq!(wizard.data(), &MatrixData::default());
    assert_eq!(wizard.staged(), "");

    assert_eq!(
        wizard.finish_critique(request.ticket, "Buena pregunta.".into()),
        CritiqueOutcome::Discarded
    );
    assert!(!wizard.critique_in_flight());
    match wizard.view() {
        WizardView::Step(step) => assert_eq!(step.feedback, None),
        WizardView::Summary(_) => panic!("expected the first step"),
    }
}

// ============================================================
// Navigation
// ============================================================

#[test]
fn test_research_type_label_must_match_exactly() {
    let mut wizard = Wizard::new();
    wizard.edit("cualitativa");
    assert_eq!(wizard.research_type(), None);
    assert!(matches!(
        wizard.advance(),
        Err(NavigationError::Rejected { .. })
    ));

    wizard.edit("Cualitativa");
    assert_eq!(wizard.research_type(), Some(ResearchType::Qualitative));
    assert!(wizard.advance().is_ok());
}

#[test]
fn test_summary_rejects_advance_and_retreat() {
    let mut wizard = Wizard::new();
    complete_quantitative(&mut wizard);
    assert_eq!(wizard.advance().unwrap_err(), NavigationError::AtTerminal);
    assert_eq!(wizard.retreat().unwrap_err(), NavigationError::AtTerminal);
    wizard.edit("ignored");
    assert!(wizard.is_complete());
}

#[test]
fn test_rejected_advance_keeps_cursor() {
    let mut wizard = Wizard::new();
    answer(&mut wizard, "Mixta");
    wizard.edit("Sueño");
    match wizard.advance() {
        Err(NavigationError::Rejected { field, message, .. }) => {
            assert_eq!(field, FieldKey::Topic);
            assert!(message.contains("20"));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(wizard.position(), Position::Active { index: 1, .. }));
}

#[test]
fn test_design_options_follow_research_type() {
    let mut wizard = Wizard::new();
    complete_quantitative(&mut wizard);
    wizard.reset();
    answer(&mut wizard, "Cualitativa");
    let design = descriptor(FieldKey::Design);
    assert!(!design.is_valid(&FieldValue::text("Correlacional"), wizard.research_type()));
    assert!(design.is_valid(&FieldValue::text("Etnográfico"), wizard.research_type()));
}

proptest! {
    #[test]
    fn prop_retreat_decrements_by_one(steps in 1usize..5) {
        let mut wizard = Wizard::new();
        answer(&mut wizard, "Cualitativa");
        answer(&mut wizard, "Percepción docente sobre la enseñanza remota");
        answer(&mut wizard, "¿Cómo perciben los docentes la enseñanza remota?");
        answer(&mut wizard, "Comprender la percepción docente sobre la enseñanza.");
        let start = 4;
        for n in 1..=steps.min(start) {
            match wizard.retreat() {
                Ok(Position::Active { index, .. }) => prop_assert_eq!(index, start - n),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn prop_objectives_join_split_is_stable(lines in proptest::collection::vec("[a-z ]{0,20}", 0..6)) {
        let cap = descriptor(FieldKey::SpecificObjectives).max_items();
        let once = split_capped(&lines.join("\n"), cap);
        let twice = split_capped(&join_lines(&once), cap);
        prop_assert_eq!(once, twice);
    }
}
