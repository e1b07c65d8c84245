//! Heuristics for deciding whether free text is a meaningful journal entry.
//!
//! Two independent checks live here. `count_valid_sentences` scores an
//! in-progress buffer sentence by sentence, while `validate_entry` judges a
//! whole entry before it is saved. Their gibberish rules overlap but are not
//! identical: the vowel and repetition thresholds differ.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static LETTER_DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[A-Za-z]\.){2,}$").unwrap());
static CONSONANT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[bcdfghjklmnpqrstvwxyz]{5,}").unwrap());

const MIN_SENTENCE_WORDS: usize = 5;
const MIN_DISTINCT_SENTENCE_WORDS: usize = 4;
const MIN_LETTER_RATIO: f64 = 0.3;

pub const REASON_EMPTY: &str = "Entry is empty";
pub const REASON_REPEATED_CHARACTERS: &str = "Entry is just repeated characters";
pub const REASON_LETTER_DOTS: &str = "Entry looks like random letters with periods";
pub const REASON_FEW_LETTERS: &str = "Entry has too few actual letters";
pub const REASON_NO_WORDS: &str = "Entry has no meaningful words";
pub const REASON_KEYBOARD_SMASH: &str = "Entry looks like keyboard smashing";
pub const REASON_REPETITIVE: &str = "Entry is made of repetitive patterns";

/// Verdict for a whole journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryValidation {
    pub is_valid: bool,
    pub reasons: Vec<String>,
}

/// Count the sentences in `text` that look like real writing.
///
/// The text is split on runs of `.`, `!` and `?`. A segment counts when it is
/// not one character repeated four or more times, has a vowel once it is
/// longer than two characters, and carries at least five words (four of them
/// distinct, ignoring case).
pub fn count_valid_sentences(text: &str) -> usize {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter(|segment| is_valid_sentence(segment))
        .count()
}

fn is_valid_sentence(segment: &str) -> bool {
    if is_single_char_run(segment, 4) {
        return false;
    }

    if segment.chars().count() > 2 && !segment.chars().any(is_vowel) {
        return false;
    }

    let words: Vec<String> = segment
        .split_whitespace()
        .filter(|word| word.chars().count() > 1 && word.chars().any(char::is_alphabetic))
        .map(str::to_lowercase)
        .collect();
    let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();

    words.len() >= MIN_SENTENCE_WORDS && distinct.len() >= MIN_DISTINCT_SENTENCE_WORDS
}

/// Judge a complete entry, collecting every rule it breaks.
pub fn validate_entry(text: &str) -> EntryValidation {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return EntryValidation {
            is_valid: false,
            reasons: vec![REASON_EMPTY.to_string()],
        };
    }

    let stripped: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    let stripped_len = stripped.chars().count();
    let mut reasons = Vec::new();

    if is_single_char_run(trimmed, 5) {
        reasons.push(REASON_REPEATED_CHARACTERS);
    }

    if LETTER_DOTS.is_match(&stripped) {
        reasons.push(REASON_LETTER_DOTS);
    }

    if stripped_len > 3 {
        let letters = stripped.chars().filter(char::is_ascii_alphabetic).count();
        if (letters as f64) / (stripped_len as f64) < MIN_LETTER_RATIO {
            reasons.push(REASON_FEW_LETTERS);
        }
    }

    if trimmed.chars().count() > 5 {
        let meaningful = trimmed
            .split_whitespace()
            .filter(|word| {
                word.chars().count() > 2 && word.chars().filter(|c| c.is_alphabetic()).count() >= 2
            })
            .count();
        if meaningful < 2 {
            reasons.push(REASON_NO_WORDS);
        }
    }

    if CONSONANT_RUN.is_match(trimmed) {
        reasons.push(REASON_KEYBOARD_SMASH);
    }

    if is_repeated_block(&stripped) {
        reasons.push(REASON_REPETITIVE);
    }

    EntryValidation {
        is_valid: reasons.is_empty(),
        reasons: reasons.into_iter().map(String::from).collect(),
    }
}

/// Highest sentence count seen while one buffer is being edited.
///
/// Deleting text never lowers the count; only `clear` resets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentenceSession {
    max_seen: usize,
}

impl SentenceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a previously reported maximum.
    pub fn resume(max_seen: usize) -> Self {
        Self { max_seen }
    }

    pub fn observe(&mut self, text: &str) -> usize {
        self.max_seen = self.max_seen.max(count_valid_sentences(text));
        self.max_seen
    }

    pub fn max_seen(&self) -> usize {
        self.max_seen
    }

    pub fn clear(&mut self) {
        self.max_seen = 0;
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_single_char_run(text: &str, min_len: usize) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let mut len = 1;
    for c in chars {
        if c != first {
            return false;
        }
        len += 1;
    }
    len >= min_len
}

// A block of 1-4 chars repeated at least three times, covering the whole text.
fn is_repeated_block(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    (1..=4).any(|block| {
        chars.len() % block == 0
            && chars.len() / block >= 3
            && chars.chunks(block).all(|chunk| chunk == &chars[..block])
    })
}
