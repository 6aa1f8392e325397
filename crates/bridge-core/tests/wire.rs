use bridge_core::models::explanation::{Explanation, ExplanationSource};
use bridge_core::models::proteinuria::Proteinuria;
use bridge_core::models::recommendation::{
    ActionKey, Priority, Recommendation, RecommendationEntry,
};
use bridge_core::models::risk::{RiskCategory, RiskLevel};

#[test]
fn risk_level_ingestion_is_case_insensitive() {
    let level: RiskLevel = serde_json::from_str(r#""high""#).unwrap();
    assert_eq!(level, RiskLevel::High);
    assert_eq!(" Moderate ".parse::<RiskLevel>().unwrap(), RiskLevel::Moderate);
    assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), r#""LOW""#);
}

#[test]
fn malformed_risk_category_is_unknown_not_low() {
    let cat: RiskCategory = serde_json::from_str(r#""severe-ish""#).unwrap();
    assert_eq!(cat, RiskCategory::Unknown);
    let cat: RiskCategory = serde_json::from_str("null").unwrap();
    assert_eq!(cat, RiskCategory::Unknown);
    assert_eq!(cat.level(), None);
    assert_eq!(RiskCategory::parse("low"), RiskCategory::Low);
}

#[test]
fn risk_levels_are_totally_ordered() {
    assert!(RiskLevel::Low < RiskLevel::Moderate);
    assert!(RiskLevel::Moderate < RiskLevel::High);
}

#[test]
fn proteinuria_spellings() {
    assert_eq!("negative".parse::<Proteinuria>().unwrap(), Proteinuria::Nil);
    assert_eq!("trace".parse::<Proteinuria>().unwrap(), Proteinuria::Plus1);
    assert_eq!("++".parse::<Proteinuria>().unwrap(), Proteinuria::Plus2);
    assert_eq!("2+".parse::<Proteinuria>().unwrap(), Proteinuria::Plus2);
    assert_eq!("+3".parse::<Proteinuria>().unwrap(), Proteinuria::Plus3);
    assert_eq!("4+".parse::<Proteinuria>().unwrap(), Proteinuria::Plus3);
    assert!("lots".parse::<Proteinuria>().is_err());
    assert_eq!(serde_json::to_string(&Proteinuria::Plus1).unwrap(), r#""+1""#);
}

#[test]
fn unrecognised_values_name_the_input() {
    let err = "lots".parse::<Proteinuria>().unwrap_err();
    assert_eq!(err.to_string(), r#"unrecognised proteinuria grade "lots""#);
    let err = "severe".parse::<RiskLevel>().unwrap_err();
    assert_eq!(err.to_string(), r#"unrecognised risk level "severe""#);
    let err = serde_json::from_str::<RiskLevel>(r#""severe""#).unwrap_err();
    assert!(err.to_string().contains("unrecognised risk level"));
}

#[test]
fn recommendation_entries_accept_both_shapes() {
    let entries: Vec<RecommendationEntry> = serde_json::from_str(
        r#"[
            "Refer to PHC within a week",
            {"action": "recheck_bp", "priority": "follow-up", "rationale": "Recheck BP", "practical_note": null}
        ]"#,
    )
    .unwrap();

    match &entries[0] {
        RecommendationEntry::LegacyText(text) => assert_eq!(text, "Refer to PHC within a week"),
        other => panic!("expected legacy text, got {other:?}"),
    }
    match &entries[1] {
        RecommendationEntry::Structured(rec) => {
            assert_eq!(rec.action, ActionKey::RecheckBp);
            assert_eq!(rec.priority, Priority::FollowUp);
        }
        other => panic!("expected structured entry, got {other:?}"),
    }
}

#[test]
fn unknown_action_key_survives_and_humanizes() {
    let rec = Recommendation {
        action: ActionKey::parse("check_fundal_height"),
        priority: Priority::NearTerm,
        rationale: String::new(),
        practical_note: None,
    };
    assert_eq!(rec.action, ActionKey::Other("check_fundal_height".to_string()));
    assert_eq!(rec.action.humanize(), "Check fundal height");
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["action"], "check_fundal_height");
    assert_eq!(json["priority"], "near-term");
}

#[test]
fn explanation_source_serializes_as_tag() {
    let fallback = Explanation::fallback("text");
    let json = serde_json::to_value(&fallback).unwrap();
    assert_eq!(json["source"], "rule-derived-fallback");
    assert_eq!(json["qc_pass"], false);
    assert!(json.get("risk_level").is_none());

    let model = Explanation::from_model("medgemma-4b-it-q4", "text");
    assert_eq!(model.source, ExplanationSource::Model("medgemma-4b-it-q4".to_string()));
}
