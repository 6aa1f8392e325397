use regex::Regex;
use tracing::debug;

use bridge_core::bounds;
use bridge_core::models::field::{ExtractedField, FieldStatus, Flag, FlagSeverity, LabField};
use bridge_core::models::proteinuria::Proteinuria;

use crate::flags::clinical_flags;
use crate::ocr::{canonical_unit, read_number, round1, trim_word_tail};
use crate::patterns;
use crate::report::Extraction;

/// Extract every tracked parameter from OCR text.
pub fn extract(text: &str) -> Extraction {
    let mut fields = Vec::with_capacity(LabField::ALL.len());
    let mut flags = Vec::new();

    for (field, notes) in [
        hemoglobin(text),
        platelets(text),
    ] {
        fields.push(field);
        flags.extend(notes);
    }

    let (systolic, diastolic, bp_notes) = blood_pressure(text);
    fields.push(systolic);
    fields.push(diastolic);
    flags.extend(bp_notes);

    for (field, notes) in [gestational_age(text), proteinuria(text), weight(text)] {
        fields.push(field);
        flags.extend(notes);
    }

    for field in &fields {
        flags.extend(clinical_flags(field));
    }

    let found = fields.iter().filter(|f| f.is_found()).count();
    debug!(found, total = fields.len(), flags = flags.len(), "lab report extracted");

    Extraction::new(fields, flags)
}

// ── Helpers ───────────────────────────────────────────────────────────────

/// A located numeric reading: the cleaned token, the matched span and the
/// byte offset right after the token.
struct Reading<'t> {
    token: &'t str,
    start: usize,
    end: usize,
}

/// Find the labelled reading. A number that opens a reference range
/// (`ref 11-15`) is skipped in favour of the next one on the line; a label
/// followed only by ranges has no reading.
fn locate<'t>(pattern: &Regex, text: &'t str) -> Option<Reading<'t>> {
    let caps = pattern.captures(text)?;
    let start = caps.get(0)?.start();
    let num = caps.name("num")?;
    let (mut num_start, mut num_str) = (num.start(), num.as_str());

    loop {
        let next = text[num_start + num_str.len()..].chars().next();
        let token = trim_word_tail(num_str, next);
        let end = num_start + token.len();

        let Some(range) = patterns::RANGE_TAIL.find(&text[end..]) else {
            return Some(Reading { token, start, end });
        };
        let after = end + range.end();
        let caps = patterns::NEXT_NUMBER.captures(&text[after..])?;
        let num = caps.name("num")?;
        num_start = after + num.start();
        num_str = num.as_str();
    }
}

fn unit_after(pattern: &Regex, text: &str, offset: usize) -> Option<(String, usize)> {
    let caps = pattern.captures(&text[offset..])?;
    let unit = caps.name("unit")?;
    Some((unit.as_str().to_string(), offset + unit.end()))
}

fn raw_span(text: &str, start: usize, end: usize) -> String {
    text[start..end].trim().to_string()
}

fn discarded(field: LabField, raw: String, unit: Option<String>, why: String) -> (ExtractedField, Vec<Flag>) {
    debug!(field = %field, raw = %raw, "discarding unreadable value");
    let flag = Flag::new(field, FlagSeverity::Notice, why);
    (
        ExtractedField {
            raw_text: Some(raw),
            unit_hint: unit,
            ..ExtractedField::not_found(field)
        },
        vec![flag],
    )
}

fn found(
    field: LabField,
    raw: String,
    value: f64,
    status: FieldStatus,
    unit: Option<String>,
) -> ExtractedField {
    ExtractedField {
        field,
        raw_text: Some(raw),
        value: Some(value),
        status,
        unit_hint: unit,
    }
}

// ── Fields ────────────────────────────────────────────────────────────────

fn hemoglobin(text: &str) -> (ExtractedField, Vec<Flag>) {
    let field = LabField::Hemoglobin;
    let Some(reading) = locate(&patterns::HEMOGLOBIN, text) else {
        return (ExtractedField::not_found(field), Vec::new());
    };

    let (unit, end) = match unit_after(&patterns::HEMOGLOBIN_UNIT, text, reading.end) {
        Some((unit, end)) => (Some(unit), end),
        None => (None, reading.end),
    };
    let raw = raw_span(text, reading.start, end);

    let Some(mut value) = read_number(reading.token, true) else {
        return discarded(field, raw, unit, format!("Could not read hemoglobin from {:?}", reading.token));
    };

    let canonical = unit.as_deref().map(canonical_unit);
    let grams_per_litre = canonical
        .as_deref()
        .is_some_and(|u| u.ends_with("/l") && !u.ends_with("/dl") && !u.ends_with("/d1"));

    let mut status = FieldStatus::Extracted;
    let mut notes = Vec::new();
    if grams_per_litre {
        value /= 10.0;
    } else if !reading.token.contains(['.', ',']) && (100.0..=220.0).contains(&value) {
        // A three-digit integer in the g/dL slot is a dropped decimal point.
        value /= 10.0;
        status = FieldStatus::Corrected;
        notes.push(Flag::new(
            field,
            FlagSeverity::Notice,
            format!("Hemoglobin read as {:?}; assumed {} g/dL", reading.token, round1(value)),
        ));
    }

    let value = round1(value);
    if bounds::check(field, value).is_err() {
        return discarded(
            field,
            raw,
            unit,
            format!("Hemoglobin {value} g/dL is outside the physiological range"),
        );
    }

    (found(field, raw, value, status, unit), notes)
}

enum PlateletScale {
    Stated(f64),
    Inferred(f64, &'static str),
}

fn platelet_scale(unit: Option<&str>, value: f64) -> PlateletScale {
    if let Some(unit) = unit {
        let u = canonical_unit(unit);
        if u.starts_with("lakh") {
            return PlateletScale::Stated(100_000.0);
        }
        if u.starts_with("x10^3")
            || u.starts_with("10^3")
            || u.starts_with("x103")
            || u.starts_with("103")
            || u.starts_with("k/")
            || u.starts_with("thou/")
        {
            return PlateletScale::Stated(1_000.0);
        }
        return PlateletScale::Stated(1.0);
    }

    if value < 100.0 {
        PlateletScale::Inferred(100_000.0, "lakh")
    } else if value < 1_500.0 {
        PlateletScale::Inferred(1_000.0, "x10^3/µL")
    } else {
        PlateletScale::Inferred(1.0, "/µL")
    }
}

fn platelets(text: &str) -> (ExtractedField, Vec<Flag>) {
    let field = LabField::Platelets;
    let Some(reading) = locate(&patterns::PLATELETS, text) else {
        return (ExtractedField::not_found(field), Vec::new());
    };

    let (unit, end) = match unit_after(&patterns::PLATELETS_UNIT, text, reading.end) {
        Some((unit, end)) => (Some(unit), end),
        None => (None, reading.end),
    };
    let raw = raw_span(text, reading.start, end);

    let Some(number) = read_number(reading.token, false) else {
        return discarded(field, raw, unit, format!("Could not read platelets from {:?}", reading.token));
    };

    let mut notes = Vec::new();
    let (multiplier, unit_hint) = match platelet_scale(unit.as_deref(), number) {
        PlateletScale::Stated(m) => (m, unit),
        PlateletScale::Inferred(m, assumed) => {
            notes.push(Flag::new(
                field,
                FlagSeverity::Notice,
                format!("No unit printed for platelets {number}; assumed {assumed}"),
            ));
            (m, Some(assumed.to_string()))
        }
    };

    let value = (number * multiplier).round();
    if bounds::check(field, value).is_err() {
        return discarded(
            field,
            raw,
            unit_hint,
            format!("Platelets {value}/µL is outside the physiological range"),
        );
    }

    (found(field, raw, value, FieldStatus::Extracted, unit_hint), notes)
}

/// Systolic and diastolic are read together from one `sys/dia` reading.
fn blood_pressure(text: &str) -> (ExtractedField, ExtractedField, Vec<Flag>) {
    let not_found = || {
        (
            ExtractedField::not_found(LabField::BpSystolic),
            ExtractedField::not_found(LabField::BpDiastolic),
            Vec::new(),
        )
    };
    let Some(caps) = patterns::BLOOD_PRESSURE.captures(text) else {
        return not_found();
    };
    let (Some(whole), Some(sys), Some(dia)) = (caps.get(0), caps.name("sys"), caps.name("dia")) else {
        return not_found();
    };
    let raw = whole.as_str().trim().to_string();
    let unit = Some("mmHg".to_string());

    let systolic = read_number(sys.as_str(), false);
    let diastolic = read_number(dia.as_str(), false);

    let plausible = match (systolic, diastolic) {
        (Some(s), Some(d)) => {
            bounds::check(LabField::BpSystolic, s).is_ok()
                && bounds::check(LabField::BpDiastolic, d).is_ok()
                && d < s
        }
        _ => false,
    };

    match (systolic, diastolic) {
        (Some(s), Some(d)) if plausible => (
            found(LabField::BpSystolic, raw.clone(), s, FieldStatus::Extracted, unit.clone()),
            found(LabField::BpDiastolic, raw, d, FieldStatus::Extracted, unit),
            Vec::new(),
        ),
        _ => {
            let flag = Flag::new(
                LabField::BpSystolic,
                FlagSeverity::Notice,
                format!("Blood pressure {raw:?} could not be read as a plausible systolic/diastolic pair"),
            );
            let keep_raw = |field| ExtractedField {
                raw_text: Some(raw.clone()),
                unit_hint: unit.clone(),
                ..ExtractedField::not_found(field)
            };
            (
                keep_raw(LabField::BpSystolic),
                keep_raw(LabField::BpDiastolic),
                vec![flag],
            )
        }
    }
}

fn gestational_age(text: &str) -> (ExtractedField, Vec<Flag>) {
    let field = LabField::GestationalAge;
    let Some(caps) = patterns::GESTATIONAL_AGE.captures(text) else {
        return (ExtractedField::not_found(field), Vec::new());
    };
    let (Some(whole), Some(num)) = (caps.get(0), caps.name("num")) else {
        return (ExtractedField::not_found(field), Vec::new());
    };
    let raw = whole.as_str().trim().to_string();
    let unit = Some("weeks".to_string());

    match read_number(num.as_str(), false) {
        Some(weeks) if bounds::check(field, weeks).is_ok() => {
            (found(field, raw, weeks, FieldStatus::Extracted, unit), Vec::new())
        }
        _ => discarded(
            field,
            raw,
            unit,
            "Gestational age is outside 4-42 weeks".to_string(),
        ),
    }
}

fn proteinuria(text: &str) -> (ExtractedField, Vec<Flag>) {
    let field = LabField::Proteinuria;
    let Some(caps) = patterns::PROTEINURIA.captures(text) else {
        return (ExtractedField::not_found(field), Vec::new());
    };
    let (Some(whole), Some(grade)) = (caps.get(0), caps.name("grade")) else {
        return (ExtractedField::not_found(field), Vec::new());
    };
    let raw = whole.as_str().trim().to_string();

    match grade.as_str().parse::<Proteinuria>() {
        Ok(p) => (
            found(field, raw, f64::from(p.grade()), FieldStatus::Extracted, Some("dipstick".to_string())),
            Vec::new(),
        ),
        Err(e) => discarded(field, raw, None, e.to_string()),
    }
}

fn weight(text: &str) -> (ExtractedField, Vec<Flag>) {
    let field = LabField::Weight;
    let Some(caps) = patterns::WEIGHT.captures(text) else {
        return (ExtractedField::not_found(field), Vec::new());
    };
    let (Some(whole), Some(num)) = (caps.get(0), caps.name("num")) else {
        return (ExtractedField::not_found(field), Vec::new());
    };
    let raw = whole.as_str().trim().to_string();
    let unit = Some("kg".to_string());

    match read_number(num.as_str(), false) {
        Some(kg) if bounds::check(field, kg).is_ok() => {
            (found(field, raw, round1(kg), FieldStatus::Extracted, unit), Vec::new())
        }
        _ => discarded(field, raw, unit, "Weight is outside 30-150 kg".to_string()),
    }
}
