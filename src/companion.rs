//! Supportive-text generation behind a fallible collaborator.
//!
//! Reward and validation paths never wait on this: any failure is logged and
//! replaced with a fixed fallback.

use crate::models::Mood;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum CompanionError {
    #[error("text generation is not configured")]
    Unavailable,

    #[error("text generation rate limited")]
    RateLimited,

    #[error("text generation failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct NoteRequest<'a> {
    pub text: &'a str,
    pub sentence_count: usize,
    pub mood: Option<Mood>,
}

pub trait Companion: Send + Sync {
    fn kind_note(&self, request: &NoteRequest<'_>) -> Result<String, CompanionError>;

    fn replacements(&self, habit: &str) -> Result<Vec<Suggestion>, CompanionError>;
}

/// Used when no generator is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCompanion;

impl Companion for OfflineCompanion {
    fn kind_note(&self, _request: &NoteRequest<'_>) -> Result<String, CompanionError> {
        Err(CompanionError::Unavailable)
    }

    fn replacements(&self, _habit: &str) -> Result<Vec<Suggestion>, CompanionError> {
        Err(CompanionError::Unavailable)
    }
}

const FALLBACK_NOTES: [&str; 4] = [
    "Thank you for taking a moment to write today. That matters.",
    "Every line you write is a small act of care for yourself.",
    "You showed up for yourself today. Be proud of that.",
    "Writing things down is a quiet kind of strength. Keep going.",
];

const FALLBACK_REPLACEMENTS: [(&str, &str); 4] = [
    ("Take a short walk", "Movement resets the urge and clears your head."),
    ("Drink a glass of water", "A simple ritual gives your hands something to do."),
    ("Breathe slowly for one minute", "Slow breathing eases the tension behind the craving."),
    ("Message a friend", "Connection is a healthier reward than the habit."),
];

pub fn kind_note_or_fallback(companion: &dyn Companion, request: &NoteRequest<'_>) -> String {
    match companion.kind_note(request) {
        Ok(note) if !note.trim().is_empty() => note,
        Ok(_) => fallback_note(request),
        Err(err) => {
            warn!("kind note unavailable, using fallback: {err}");
            fallback_note(request)
        }
    }
}

pub fn replacements_or_fallback(companion: &dyn Companion, habit: &str) -> Vec<Suggestion> {
    match companion.replacements(habit) {
        Ok(suggestions) if !suggestions.is_empty() => suggestions,
        Ok(_) => fallback_replacements(),
        Err(err) => {
            warn!("replacement suggestions unavailable, using fallback: {err}");
            fallback_replacements()
        }
    }
}

pub fn fallback_note(request: &NoteRequest<'_>) -> String {
    match request.mood {
        Some(Mood::Low | Mood::Awful) => {
            "Hard days count too. Thank you for being honest with yourself.".to_string()
        }
        _ => FALLBACK_NOTES[request.sentence_count % FALLBACK_NOTES.len()].to_string(),
    }
}

pub fn fallback_replacements() -> Vec<Suggestion> {
    FALLBACK_REPLACEMENTS
        .iter()
        .map(|(name, reason)| Suggestion {
            name: name.to_string(),
            reason: reason.to_string(),
        })
        .collect()
}
