use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A subject was completed on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub subject_id: String,
    pub date: NaiveDate,
}

/// State change produced by a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Completed,
    Undone,
}

impl Transition {
    /// Only a not-done to done change may earn a reward.
    pub fn is_qualifying(self) -> bool {
        self == Self::Completed
    }
}

/// Completion dates per subject, at most one per (subject, date).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionLog {
    #[serde(default)]
    subjects: BTreeMap<String, BTreeSet<NaiveDate>>,
}

impl CompletionLog {
    /// Returns `true` when the date was not already marked.
    pub fn mark(&mut self, subject_id: &str, date: NaiveDate) -> bool {
        self.subjects
            .entry(subject_id.to_string())
            .or_default()
            .insert(date)
    }

    /// Returns `true` when a mark was removed.
    pub fn unmark(&mut self, subject_id: &str, date: NaiveDate) -> bool {
        let Some(dates) = self.subjects.get_mut(subject_id) else {
            return false;
        };
        let removed = dates.remove(&date);
        if dates.is_empty() {
            self.subjects.remove(subject_id);
        }
        removed
    }

    pub fn toggle(&mut self, subject_id: &str, date: NaiveDate) -> Transition {
        if self.unmark(subject_id, date) {
            Transition::Undone
        } else {
            self.mark(subject_id, date);
            Transition::Completed
        }
    }

    pub fn is_completed(&self, subject_id: &str, date: NaiveDate) -> bool {
        self.subjects
            .get(subject_id)
            .is_some_and(|dates| dates.contains(&date))
    }

    /// Completion dates for one subject, oldest first.
    pub fn dates(&self, subject_id: &str) -> Vec<NaiveDate> {
        self.subjects
            .get(subject_id)
            .map(|dates| dates.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn records(&self, subject_id: &str) -> Vec<CompletionRecord> {
        self.dates(subject_id)
            .into_iter()
            .map(|date| CompletionRecord {
                subject_id: subject_id.to_string(),
                date,
            })
            .collect()
    }
}
