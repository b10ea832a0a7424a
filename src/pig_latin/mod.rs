//! Pig latin translation
//!
//! - Leading consonant cluster moves to the end plus "ay": `string` -> `ing-stray`
//! - Leading vowel gets "way": `eat` -> `eat-way`
//!
//! Case is kept as written and everything between words (spaces,
//! punctuation) is left untouched.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[a-zA-Z0-9']+").unwrap();
    static ref CONSONANT_START: Regex =
        Regex::new(r"^([bcdfghjklmnpqrstvwxzBCDFGHJKLMNPQRSTVWXZ']+)(.*)$").unwrap();
    static ref VOWEL_START: Regex = Regex::new(r"^[aeiouyAEIOUY']").unwrap();
}

pub const DEFAULT_PHRASE: &str =
    "I've been wondering - what is the answer?!?!? How will we know it's correct?";

/// Translate every word of `phrase`, leaving separators as they are
pub fn translate(phrase: &str) -> String {
    WORD.replace_all(phrase, |caps: &Captures| translate_word(&caps[0]))
        .into_owned()
}

/// Translate a single word; words starting with neither a consonant nor a vowel are returned unchanged
pub fn translate_word(word: &str) -> String {
    if let Some(caps) = CONSONANT_START.captures(word) {
        return format!("{}-{}ay", &caps[2], &caps[1]);
    }
    if VOWEL_START.is_match(word) {
        return format!("{word}-way");
    }
    word.to_string()
}
