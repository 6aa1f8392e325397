use bridge_extract::ocr::{canonical_unit, read_number, trim_word_tail};

#[test]
fn thousands_separators_are_removed() {
    assert_eq!(read_number("2,50,000", false), Some(250_000.0));
    assert_eq!(read_number("250,000", false), Some(250_000.0));
}

#[test]
fn decimal_comma_only_when_allowed() {
    assert_eq!(read_number("11,5", true), Some(11.5));
    assert_eq!(read_number("11,5", false), Some(115.0));
}

#[test]
fn confusable_letters_become_digits() {
    assert_eq!(read_number("1O", false), Some(10.0));
    assert_eq!(read_number("l2.5", false), Some(12.5));
    assert_eq!(read_number("1S0", false), Some(150.0));
}

#[test]
fn garbage_tokens_do_not_parse() {
    assert_eq!(read_number("1.2.3", false), None);
    assert_eq!(read_number("", false), None);
    assert_eq!(read_number("12x", false), None);
}

#[test]
fn word_tails_are_trimmed_only_before_letters() {
    assert_eq!(trim_word_tail("2.5l", Some('a')), "2.5");
    assert_eq!(trim_word_tail("1O", Some(' ')), "1O");
    assert_eq!(trim_word_tail("1O", None), "1O");
}

#[test]
fn units_are_canonicalised() {
    assert_eq!(canonical_unit("x 10³ / µL"), "x103/ul");
    assert_eq!(canonical_unit("x10**3/uL"), "x10^3/ul");
    assert_eq!(canonical_unit("g/dL"), "g/dl");
}
