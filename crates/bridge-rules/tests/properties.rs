use bridge_core::models::proteinuria::Proteinuria;
use bridge_core::models::recommendation::Priority;
use bridge_core::models::risk::RiskLevel;
use bridge_core::models::symptom::{Symptom, SymptomSet};
use bridge_core::models::vitals::{PartialVitals, VitalsSnapshot};
use bridge_rules::{assess, evaluate};

fn base() -> PartialVitals {
    PartialVitals {
        bp_systolic: Some(118),
        bp_diastolic: Some(76),
        hemoglobin: Some(12.0),
        platelets: Some(220_000),
        gestational_age_weeks: Some(30),
        proteinuria: Some(Proteinuria::Nil),
        weight_kg: Some(58.0),
    }
}

fn complete(v: PartialVitals, symptoms: &[Symptom]) -> VitalsSnapshot {
    v.complete(SymptomSet::new(symptoms.iter().copied()).unwrap())
        .unwrap()
}

fn symptom_sets() -> Vec<Vec<Symptom>> {
    vec![
        vec![],
        vec![Symptom::Headache],
        vec![Symptom::BlurredVision],
        vec![Symptom::Breathlessness, Symptom::ReducedFetalMovement],
        vec![Symptom::Dizziness, Symptom::FacialEdema, Symptom::AbdominalPain],
    ]
}

#[test]
fn evaluation_is_deterministic() {
    let snapshot = complete(
        PartialVitals {
            bp_systolic: Some(150),
            hemoglobin: Some(8.0),
            proteinuria: Some(Proteinuria::Plus2),
            ..base()
        },
        &[Symptom::Headache, Symptom::PedalEdema],
    );
    let first = assess(&snapshot);
    for _ in 0..10 {
        assert_eq!(assess(&snapshot), first);
    }
}

/// Re-evaluate `snapshot` with one field changed.
fn varied(snapshot: &VitalsSnapshot, change: impl FnOnce(&mut PartialVitals)) -> RiskLevel {
    let mut partial = snapshot.to_partial();
    change(&mut partial);
    evaluate(&partial.complete(snapshot.symptoms().clone()).unwrap()).risk_level
}

fn assert_non_decreasing(levels: impl IntoIterator<Item = (String, RiskLevel)>) {
    let mut previous: Option<(String, RiskLevel)> = None;
    for (step, level) in levels {
        if let Some((prev_step, prev)) = &previous {
            assert!(level >= *prev, "{step} lowered risk from {prev} at {prev_step} to {level}");
        }
        previous = Some((step, level));
    }
}

#[test]
fn raising_systolic_never_lowers_risk() {
    for symptoms in symptom_sets() {
        let snapshot = complete(base(), &symptoms);
        assert_non_decreasing((90..=240).step_by(5).map(|systolic| {
            let level = varied(&snapshot, |p| p.bp_systolic = Some(systolic));
            (format!("systolic {systolic} with {symptoms:?}"), level)
        }));
    }
}

#[test]
fn raising_diastolic_never_lowers_risk() {
    for symptoms in symptom_sets() {
        let snapshot = complete(
            PartialVitals {
                bp_systolic: Some(125),
                ..base()
            },
            &symptoms,
        );
        assert_non_decreasing((50..=120).step_by(2).map(|diastolic| {
            let level = varied(&snapshot, |p| p.bp_diastolic = Some(diastolic));
            (format!("diastolic {diastolic} with {symptoms:?}"), level)
        }));
    }
}

#[test]
fn lowering_hemoglobin_never_lowers_risk() {
    for symptoms in symptom_sets() {
        let snapshot = complete(base(), &symptoms);
        assert_non_decreasing((30..=160).rev().step_by(3).map(|tenths| {
            let hb = f64::from(tenths) / 10.0;
            let level = varied(&snapshot, |p| p.hemoglobin = Some(hb));
            (format!("hemoglobin {hb} with {symptoms:?}"), level)
        }));
    }
}

#[test]
fn lowering_platelets_never_lowers_risk() {
    for symptoms in symptom_sets() {
        let snapshot = complete(base(), &symptoms);
        assert_non_decreasing((10_000..=400_000u32).rev().step_by(10_000).map(|count| {
            let level = varied(&snapshot, |p| p.platelets = Some(count));
            (format!("platelets {count} with {symptoms:?}"), level)
        }));
    }
}

#[test]
fn raising_proteinuria_grade_never_lowers_risk() {
    let grades = [
        Proteinuria::Nil,
        Proteinuria::Plus1,
        Proteinuria::Plus2,
        Proteinuria::Plus3,
    ];
    for systolic in [118u16, 145, 165] {
        for symptoms in symptom_sets() {
            let snapshot = complete(
                PartialVitals {
                    bp_systolic: Some(systolic),
                    ..base()
                },
                &symptoms,
            );
            assert_non_decreasing(grades.map(|grade| {
                let level = varied(&snapshot, |p| p.proteinuria = Some(grade));
                (format!("proteinuria {grade} at {systolic} with {symptoms:?}"), level)
            }));
        }
    }
}

#[test]
fn recommendations_are_priority_ordered_and_unique() {
    for systolic in [118u16, 135, 145, 165] {
        for hb in [6.0, 9.0, 12.0] {
            for grade in [Proteinuria::Nil, Proteinuria::Plus1, Proteinuria::Plus3] {
                for symptoms in symptom_sets() {
                    let a = assess(&complete(
                        PartialVitals {
                            bp_systolic: Some(systolic),
                            hemoglobin: Some(hb),
                            proteinuria: Some(grade),
                            ..base()
                        },
                        &symptoms,
                    ));
                    let priorities: Vec<Priority> =
                        a.recommendations.iter().map(|r| r.priority).collect();
                    assert!(priorities.windows(2).all(|w| w[0] <= w[1]));

                    let mut keys: Vec<&str> =
                        a.recommendations.iter().map(|r| r.action.as_str()).collect();
                    let total = keys.len();
                    keys.sort_unstable();
                    keys.dedup();
                    assert_eq!(keys.len(), total);
                }
            }
        }
    }
}
