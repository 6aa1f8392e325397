use std::collections::HashSet;
use std::sync::LazyLock;

use bridge_core::models::risk::RiskLevel;
use regex::Regex;
use thiserror::Error;

/// Shortest explanation worth showing.
pub const MIN_CHARS: usize = 40;

/// Why generated text was thrown away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QcRejection {
    #[error("output is empty after cleanup")]
    Empty,

    #[error("output is too short ({0} chars)")]
    TooShort(usize),

    #[error("output claims {claimed} risk, assessment is {expected}")]
    Contradiction {
        claimed: RiskLevel,
        expected: RiskLevel,
    },

    #[error("output reassures ({0:?}) on a HIGH risk assessment")]
    Reassurance(String),
}

/// Ways a text can name a risk level. Group 1 is always the level word.
static RISK_CLAIMS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // "low risk", "high-risk pregnancy"
        r"(?i)\b(low|moderate|medium|high)[\s-]+risk\b",
        // "risk is low", "risk level of high", "Risk: low"
        r"(?i)\brisk(?:\s+level)?(?:\s+(?:is|was|of)\s+|\s*[:=]\s*)(?:a\s+|an\s+)?(?:very\s+)?(low|moderate|medium|high)\b",
        // "classified as low", "considered a high"
        r"(?i)\b(?:classified|considered|categori[sz]ed|assessed)\s+(?:as\s+)?(?:a\s+|an\s+)?(low|moderate|medium|high)\b",
    ]
    .map(|pattern| Regex::new(pattern).expect("static quality pattern must compile"))
});

static NEGATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:not|no|never|isn't|is not|rather than|instead of)\s+(?:a\s+|an\s+|at\s+)?$")
        .expect("static quality pattern must compile")
});

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?](?:\s+|$)").expect("static quality pattern must compile"));

/// Lines that echo the prompt back instead of answering it.
const LEAKAGE_PREFIXES: [&str; 9] = [
    "risk level:",
    "patient data:",
    "findings:",
    "explanation:",
    "your response:",
    "question:",
    "patient:",
    "you are assisting",
    "write only the explanation",
];

const LEAKAGE_TOKENS: [&str; 5] = [
    "<start_of_turn>",
    "<end_of_turn>",
    "<bos>",
    "<eos>",
    "</s>",
];

const REASSURANCE: [&str; 5] = [
    "no immediate concern",
    "no need for referral",
    "no referral needed",
    "nothing to worry about",
    "no cause for concern",
];

/// Clean raw model output and decide whether it may be shown.
///
/// Returns the cleaned text, or the reason it was rejected.
pub fn review(raw: &str, expected: RiskLevel) -> Result<String, QcRejection> {
    let text = clean(raw);
    if text.is_empty() {
        return Err(QcRejection::Empty);
    }
    let chars = text.chars().count();
    if chars < MIN_CHARS {
        return Err(QcRejection::TooShort(chars));
    }

    if let Some(claimed) = contradicting_claim(&text, expected) {
        return Err(QcRejection::Contradiction { claimed, expected });
    }

    if expected == RiskLevel::High {
        let lower = text.to_lowercase();
        if let Some(phrase) = REASSURANCE.iter().find(|p| lower.contains(**p)) {
            return Err(QcRejection::Reassurance(phrase.to_string()));
        }
    }

    Ok(text)
}

/// Strip fences and prompt leakage, then drop repeated lines and sentences.
pub fn clean(raw: &str) -> String {
    let mut seen_lines = HashSet::new();
    let mut lines = Vec::new();

    for line in raw.lines() {
        let mut line = line.to_string();
        for token in LEAKAGE_TOKENS {
            line = line.replace(token, "");
        }
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            continue;
        }
        let trimmed = trimmed.trim_start_matches(['*', '#', '-', ' ']).trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if LEAKAGE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            continue;
        }
        if seen_lines.insert(normalize(trimmed)) {
            lines.push(trimmed.to_string());
        }
    }

    dedupe_sentences(&lines.join(" "))
}

fn dedupe_sentences(text: &str) -> String {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    let mut start = 0;

    let mut push = |sentence: &str| {
        let sentence = sentence.trim();
        if !sentence.is_empty() && seen.insert(normalize(sentence)) {
            kept.push(sentence.to_string());
        }
    };

    for m in SENTENCE_END.find_iter(text) {
        push(&text[start..m.start() + 1]);
        start = m.end();
    }
    push(&text[start..]);

    kept.join(" ")
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['.', '!', '?'])
        .to_lowercase()
}

/// First un-negated risk claim that names a different level.
fn contradicting_claim(text: &str, expected: RiskLevel) -> Option<RiskLevel> {
    let claims = RISK_CLAIMS.iter().flat_map(|pattern| pattern.captures_iter(text));
    for caps in claims {
        let Some(word) = caps.get(1) else { continue };
        let Ok(claimed) = word.as_str().parse::<RiskLevel>() else {
            continue;
        };
        if claimed == expected {
            continue;
        }
        let before = &text[..word.start()];
        let window = before.char_indices().rev().nth(23).map_or(0, |(i, _)| i);
        let prefix = &before[window..];
        if NEGATION.is_match(prefix) {
            continue;
        }
        return Some(claimed);
    }
    None
}
