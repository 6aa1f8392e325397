use std::sync::LazyLock;

use regex::Regex;

// Numeric token: a digit, or an OCR letter immediately followed by a digit,
// then any run of digits, OCR look-alikes and separators.
const NUMBER: &str = r"(?P<num>(?:\d|[OoIl|]\d)[\dOoIl|SB.,]*)";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static extraction pattern must compile")
}

pub static HEMOGLOBIN: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)(?:\bha?em[o0]gl[o0]bin\b|\bhgb\b|\bhb\b)[^\d\n]{{0,25}}?{NUMBER}"
    ))
});

/// The rest of a reference range (`-15`, `– 4.5`) right after a number.
pub static RANGE_TAIL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\s*[-–]\s*(?:\d|[OoIl|]\d)[\dOoIl|.,]*"));

/// The next number on the same line, within the same label gap.
pub static NEXT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^[^\d\n]{{0,25}}?{NUMBER}")));

pub static HEMOGLOBIN_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^\s*(?P<unit>g(?:ms?)?\s*/\s*d[l1]|g(?:ms?)?\s*/\s*l\b|g(?:ms?)?\s*%)")
});

pub static PLATELETS: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)(?:\bplatelets?(?:\s+count)?\b|\bplt\b|\bthrombocytes?\b)[^\d\n]{{0,25}}?{NUMBER}"
    ))
});

pub static PLATELETS_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)^\s*(?P<unit>lakhs?(?:\s*/\s*(?:cumm|mm3|mm³|[uµμ]l))?|(?:x\s*)?10\s*(?:\^|\*\*)?\s*(?:3|³)\s*/\s*(?:[uµμ]l|cumm|mm3|mm³)|(?:k|thou)\s*/\s*[uµμ]l|(?:cells\s*)?/\s*(?:cumm|mm3|mm³|[uµμ]l))",
    )
});

pub static BLOOD_PRESSURE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)(?:\bblood\s+pressure\b|\bb\.?\s?p\b\.?)[^\d\n]{0,15}?(?P<sys>(?:\d|[OoIl|]\d)[\dOoIl|]{1,2})\s*/\s*(?P<dia>[\dOoIl|]{2,3})",
    )
});

pub static GESTATIONAL_AGE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)(?:\bgestational\s+age\b|\bperiod\s+of\s+gestation\b|\bpog\b|\bga\b)[^\d\n]{0,15}?(?P<num>\d{1,2})(?:\.\d)?\s*(?:weeks?|wks?|w\b)?",
    )
});

pub static PROTEINURIA: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)(?:\burine\s+protein\b|\bproteinuria\b|\bprotein\b|\balbumin\b)[^\n]{0,20}?(?P<grade>\bnil\b|\bnegative\b|\bneg\b|\btrace\b|\babsent\b|\+\s*[1-4]|[1-4]\s*\+|\+{1,4})",
    )
});

pub static WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)(?:\bweight\b|\bwt\b)\.?[^\d\n]{0,10}?(?P<num>\d{2,3}(?:\.\d+)?)\s*(?:kgs?\b|kilograms?\b)?")
});
