use crate::domain::clue::normalize_clue;
use crate::errors::domain::{DomainError, ValidationKind};

fn assert_invalid(input: &str) {
    match normalize_clue(input) {
        Err(DomainError::Validation(ValidationKind::InvalidClueFormat, _)) => {}
        other => panic!("expected InvalidClueFormat for {input:?}, got {other:?}"),
    }
}

#[test]
fn single_word_is_valid() {
    assert_eq!(normalize_clue("kunai").unwrap(), "kunai");
}

#[test]
fn up_to_five_words_are_valid() {
    assert_eq!(
        normalize_clue("one two three four five").unwrap(),
        "one two three four five"
    );
}

#[test]
fn leading_and_trailing_whitespace_is_trimmed() {
    assert_eq!(normalize_clue("  ninja village  ").unwrap(), "ninja village");
}

#[test]
fn accents_enye_digits_and_hyphens_are_allowed() {
    assert_eq!(normalize_clue("señor árbol x-23").unwrap(), "señor árbol x-23");
}

#[test]
fn six_words_are_rejected() {
    assert_invalid("a b c d e f");
}

#[test]
fn empty_and_blank_are_rejected() {
    assert_invalid("");
    assert_invalid("   ");
}

#[test]
fn overlong_token_is_rejected() {
    assert_invalid("abcdefghijklmnopqrstu"); // 21 chars
}

#[test]
fn punctuation_is_rejected() {
    assert_invalid("hello!");
    assert_invalid("two,words");
}
