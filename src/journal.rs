use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One free-text entry for a subject on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub subject_id: String,
    pub date: NaiveDate,
    pub text: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Date-keyed entries, one per (subject, date). Saving again on the same
/// date replaces the earlier entry wholesale, tags included.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalStore {
    #[serde(default)]
    entries: BTreeMap<String, BTreeMap<NaiveDate, DailyEntry>>,
}

impl JournalStore {
    pub fn upsert(
        &mut self,
        subject_id: &str,
        date: NaiveDate,
        text: impl Into<String>,
        tags: BTreeMap<String, String>,
    ) -> DailyEntry {
        let entry = DailyEntry {
            subject_id: subject_id.to_string(),
            date,
            text: text.into(),
            tags,
        };
        self.entries
            .entry(subject_id.to_string())
            .or_default()
            .insert(date, entry.clone());
        entry
    }

    pub fn get(&self, subject_id: &str, date: NaiveDate) -> Option<&DailyEntry> {
        self.entries.get(subject_id)?.get(&date)
    }

    /// Entries for one subject, most recent date first.
    pub fn history(&self, subject_id: &str) -> Vec<DailyEntry> {
        self.entries
            .get(subject_id)
            .map(|by_date| by_date.values().rev().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn upsert_then_get_returns_same_entry() {
        let mut store = JournalStore::default();
        let saved = store.upsert("journal:ana", day(1), "Slept well.", tags(&[("mood", "good")]));
        assert_eq!(store.get("journal:ana", day(1)), Some(&saved));
    }

    #[test]
    fn same_day_save_replaces_text_and_tags() {
        let mut store = JournalStore::default();
        store.upsert("mood:ana", day(2), "first", tags(&[("mood", "low"), ("note", "tired")]));
        store.upsert("mood:ana", day(2), "second", tags(&[("mood", "great")]));

        let entry = store.get("mood:ana", day(2)).unwrap();
        assert_eq!(entry.text, "second");
        assert_eq!(entry.tags, tags(&[("mood", "great")]));
        assert_eq!(store.history("mood:ana").len(), 1);
    }

    #[test]
    fn history_is_newest_first() {
        let mut store = JournalStore::default();
        store.upsert("journal:ana", day(3), "c", BTreeMap::new());
        store.upsert("journal:ana", day(1), "a", BTreeMap::new());
        store.upsert("journal:ana", day(2), "b", BTreeMap::new());
        store.upsert("journal:ben", day(4), "other", BTreeMap::new());

        let texts: Vec<String> = store
            .history("journal:ana")
            .into_iter()
            .map(|entry| entry.text)
            .collect();
        assert_eq!(texts, vec!["c", "b", "a"]);
    }

    #[test]
    fn missing_entries_are_none() {
        let store = JournalStore::default();
        assert!(store.get("journal:ana", day(1)).is_none());
        assert!(store.history("journal:ana").is_empty());
    }
}
