use bridge_core::models::risk::RiskLevel;
use bridge_llm::quality::{QcRejection, clean, review};

const GOOD: &str = "Blood pressure of 162/112 mmHg at 32 weeks is severely raised. \
                    This HIGH risk level means the mother needs urgent referral today.";

#[test]
fn accepts_consistent_explanation() {
    let text = review(GOOD, RiskLevel::High).unwrap();
    assert_eq!(text, GOOD);
}

#[test]
fn strips_fences_and_prompt_leakage() {
    let raw = format!("```\nRISK LEVEL: HIGH (final)\n{GOOD}\n```<end_of_turn>");
    let text = review(&raw, RiskLevel::High).unwrap();
    assert_eq!(text, GOOD);
}

#[test]
fn collapses_repetition_loops() {
    let raw = "Hemoglobin is low. Hemoglobin is low. Hemoglobin is low.\n\
               Hemoglobin is low.\nIron supplements and a CBC recheck are advised.";
    assert_eq!(
        clean(raw),
        "Hemoglobin is low. Iron supplements and a CBC recheck are advised."
    );
}

#[test]
fn rejects_lower_risk_claim_on_high_assessment() {
    let raw = "These readings suggest low risk overall and the pregnancy can continue as usual.";
    assert_eq!(
        review(raw, RiskLevel::High).unwrap_err(),
        QcRejection::Contradiction {
            claimed: RiskLevel::Low,
            expected: RiskLevel::High,
        }
    );
}

#[test]
fn rejects_higher_risk_claim_on_low_assessment() {
    let raw = "Mild swelling of the feet is common, but this is a high-risk pregnancy in every sense.";
    assert!(matches!(
        review(raw, RiskLevel::Low),
        Err(QcRejection::Contradiction {
            claimed: RiskLevel::High,
            ..
        })
    ));
}

#[test]
fn rejects_risk_level_stated_after_the_word_risk() {
    let cases = [
        "Overall the risk level is low. Routine antenatal care can continue at the next visit.",
        "This patient's risk is LOW and she can continue her usual antenatal schedule.",
        "Risk: low. Blood pressure is within range and no further action is required today.",
        "The pregnancy is classified as low by these readings, so routine care can continue.",
    ];
    for raw in cases {
        assert_eq!(
            review(raw, RiskLevel::High).unwrap_err(),
            QcRejection::Contradiction {
                claimed: RiskLevel::Low,
                expected: RiskLevel::High,
            },
            "{raw}"
        );
    }
}

#[test]
fn risk_level_matching_the_assessment_is_accepted() {
    let raw = "Overall the risk level is high because blood pressure is 162/112 mmHg; refer today.";
    assert!(review(raw, RiskLevel::High).is_ok());
    assert!(review("The risk is not low here: severe hypertension needs referral now.", RiskLevel::High).is_ok());
}

#[test]
fn negated_risk_claim_is_not_a_contradiction() {
    let raw = "This is not a low risk situation: severe hypertension needs referral to a facility now.";
    assert!(review(raw, RiskLevel::High).is_ok());
}

#[test]
fn rejects_reassurance_when_high() {
    let raw = "Blood pressure is raised, but there is no immediate concern for the mother or baby.";
    assert_eq!(
        review(raw, RiskLevel::High).unwrap_err(),
        QcRejection::Reassurance("no immediate concern".into())
    );
    assert!(review(raw, RiskLevel::Moderate).is_ok());
}

#[test]
fn rejects_empty_and_short_output() {
    assert_eq!(review("```\n```", RiskLevel::Low).unwrap_err(), QcRejection::Empty);
    assert!(matches!(
        review("Refer now.", RiskLevel::High),
        Err(QcRejection::TooShort(_))
    ));
}
