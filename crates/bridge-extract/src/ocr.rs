//! Repair of OCR-damaged numeric tokens.

/// Map characters OCR commonly confuses with digits.
fn confusable_digit(c: char) -> Option<char> {
    match c {
        'O' | 'o' => Some('0'),
        'I' | 'l' | '|' => Some('1'),
        'S' => Some('5'),
        'B' => Some('8'),
        _ => None,
    }
}

/// Drop trailing look-alike letters when the token runs straight into a word,
/// e.g. `2.5l` from `2.5lakh`. A token followed by a space or punctuation is
/// kept whole so `1O` still reads as 10.
pub fn trim_word_tail<'a>(token: &'a str, next: Option<char>) -> &'a str {
    if next.is_some_and(|c| c.is_alphabetic()) {
        token.trim_end_matches(|c: char| confusable_digit(c).is_some())
    } else {
        token
    }
}

/// Parse a numeric token, repairing digit confusions and separators.
///
/// Commas are thousands separators (both `250,000` and the Indian
/// `2,50,000`), except that with `decimal_comma` a single comma followed by
/// one or two digits is read as a decimal point (`11,5`).
pub fn read_number(token: &str, decimal_comma: bool) -> Option<f64> {
    let token = token.trim().trim_end_matches(['.', ',']);
    if token.is_empty() {
        return None;
    }

    let mut repaired = String::with_capacity(token.len());
    for c in token.chars() {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            repaired.push(c);
        } else {
            repaired.push(confusable_digit(c)?);
        }
    }

    let commas = repaired.matches(',').count();
    let normalized = if decimal_comma
        && commas == 1
        && !repaired.contains('.')
        && repaired
            .rsplit(',')
            .next()
            .is_some_and(|tail| (1..=2).contains(&tail.len()))
    {
        repaired.replace(',', ".")
    } else {
        repaired.replace(',', "")
    };

    if normalized.matches('.').count() > 1 {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Canonical spelling of a unit string for table lookup: lowercase, no
/// whitespace, `µ`/`μ` as `u`, superscript three as `3`, `**` as `^`.
pub fn canonical_unit(unit: &str) -> String {
    unit.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'µ' | 'μ' => 'u',
            '³' => '3',
            other => other,
        })
        .collect::<String>()
        .replace("**", "^")
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
