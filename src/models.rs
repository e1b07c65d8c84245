use crate::completions::CompletionLog;
use crate::errors::ReflectionError;
use crate::journal::{DailyEntry, JournalStore};
use crate::ledger::RewardLedger;
use crate::streaks::StreakSummary;
use crate::text_quality::EntryValidation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub completions: CompletionLog,
    #[serde(default)]
    pub ledger: RewardLedger,
    #[serde(default)]
    pub journal: JournalStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Low,
    Awful,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Okay => "okay",
            Self::Low => "low",
            Self::Awful => "awful",
        };
        f.write_str(label)
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "great" => Ok(Self::Great),
            "good" => Ok(Self::Good),
            "okay" => Ok(Self::Okay),
            "low" => Ok(Self::Low),
            "awful" => Ok(Self::Awful),
            other => Err(format!("unknown mood '{other}'")),
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ReflectionError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ReflectionError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parse an optional request date, defaulting to `today`.
pub fn date_or(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate, ReflectionError> {
    value.map_or(Ok(today), parse_date)
}

pub fn require_subject(value: &str) -> Result<&str, ReflectionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReflectionError::InvalidSubject);
    }
    Ok(trimmed)
}

pub fn mood_subject(user: &str) -> String {
    format!("mood:{user}")
}

#[derive(Debug, Default, Deserialize)]
pub struct ToggleRequest {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub today: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub subject_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub reward_granted: bool,
    pub jar_total: u64,
    pub stats: StreakSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JarResponse {
    pub total: u64,
    pub by_subject: BTreeMap<String, u64>,
}

#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    pub user: String,
    pub date: Option<String>,
    pub text: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JournalResponse {
    pub saved: bool,
    pub validation: EntryValidation,
    pub entry: Option<DailyEntry>,
    pub sentence_count: usize,
    pub reward_granted: bool,
    pub jar_total: u64,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub user: String,
    pub date: Option<String>,
    pub mood: Mood,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct SentenceRequest {
    pub text: String,
    #[serde(default)]
    pub session_max: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceResponse {
    pub count: usize,
    pub session_max: usize,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub habit: String,
}
