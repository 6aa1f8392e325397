use std::fmt::Write;

use bridge_core::models::risk::RiskAssessment;
use bridge_core::models::vitals::VitalsSnapshot;

/// Prompt for a clinician-facing explanation of a finished assessment.
///
/// The rule engine's risk level is stated as final. The model is asked to
/// explain it, never to grade the patient.
pub fn build_prompt(snapshot: &VitalsSnapshot, assessment: &RiskAssessment) -> String {
    let level = assessment.risk_level;
    let mut out = String::new();

    out.push_str(
        "You are assisting a rural health worker caring for a pregnant patient. \
         A validated clinical rule engine has already assessed this patient.\n\n",
    );
    let _ = writeln!(out, "RISK LEVEL: {level} (final)");
    let _ = writeln!(
        out,
        "The risk level is {level}. It is fixed. Do not change it, do not re-derive it, \
         and do not state any other risk level.\n"
    );

    out.push_str("Patient data:\n");
    let _ = writeln!(out, "- Gestational age: {} weeks", snapshot.gestational_age_weeks());
    let _ = writeln!(
        out,
        "- Blood pressure: {}/{} mmHg",
        snapshot.bp_systolic(),
        snapshot.bp_diastolic()
    );
    let _ = writeln!(out, "- Hemoglobin: {:.1} g/dL", snapshot.hemoglobin());
    let _ = writeln!(out, "- Platelets: {}/µL", snapshot.platelets());
    let _ = writeln!(out, "- Urine protein: {}", snapshot.proteinuria().as_str());
    if let Some(weight) = snapshot.weight_kg() {
        let _ = writeln!(out, "- Weight: {weight:.1} kg");
    }
    let symptoms = snapshot.symptoms().labels();
    if symptoms.is_empty() {
        out.push_str("- Symptoms: none reported\n");
    } else {
        let _ = writeln!(out, "- Symptoms: {}", symptoms.join(", "));
    }

    out.push_str("\nFindings:\n");
    if assessment.findings.is_empty() {
        out.push_str("- No abnormal findings\n");
    }
    for finding in &assessment.findings {
        let _ = writeln!(out, "- {}", finding.text);
    }

    let _ = write!(
        out,
        "\nIn two to four plain sentences, explain why these findings give a {level} risk \
         level and what the health worker should watch for. Do not repeat these \
         instructions. Write only the explanation."
    );
    out
}
