//! Once-per-day reward bookkeeping.
//!
//! A grant for `(subject, date)` is permanent. Undoing the completion that
//! earned it does not revoke it, and completing again on the same date does
//! not earn a second one. The jar total is simply the number of grants.

use crate::errors::ReflectionError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardGrant {
    pub subject_id: String,
    pub date: NaiveDate,
    pub granted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantOutcome {
    pub granted: bool,
}

/// Feature that earned a reward. Each maps to its own ledger subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardSource {
    Habit(String),
    BadHabit(String),
    Journal(String),
}

impl RewardSource {
    pub fn subject_id(&self) -> String {
        self.to_string()
    }

    /// Owner id without the feature prefix.
    pub fn owner(&self) -> &str {
        match self {
            Self::Habit(id) | Self::BadHabit(id) | Self::Journal(id) => id,
        }
    }

    /// Trim the owner id, rejecting blank ones.
    pub fn normalized(self) -> Result<Self, ReflectionError> {
        let owner = self.owner().trim();
        if owner.is_empty() {
            return Err(ReflectionError::InvalidSubject);
        }
        let owner = owner.to_string();
        Ok(match self {
            Self::Habit(_) => Self::Habit(owner),
            Self::BadHabit(_) => Self::BadHabit(owner),
            Self::Journal(_) => Self::Journal(owner),
        })
    }
}

impl fmt::Display for RewardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Habit(id) => write!(f, "habit:{id}"),
            Self::BadHabit(id) => write!(f, "bad-habit:{id}"),
            Self::Journal(id) => write!(f, "journal:{id}"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewardLedger {
    #[serde(default)]
    grants: BTreeMap<String, BTreeMap<NaiveDate, RewardGrant>>,
}

impl RewardLedger {
    pub fn try_grant(&mut self, subject_id: &str, date: NaiveDate) -> GrantOutcome {
        self.try_grant_at(subject_id, date, Utc::now())
    }

    pub fn try_grant_at(
        &mut self,
        subject_id: &str,
        date: NaiveDate,
        granted_at: DateTime<Utc>,
    ) -> GrantOutcome {
        let by_date = self.grants.entry(subject_id.to_string()).or_default();
        if by_date.contains_key(&date) {
            debug!(subject_id, %date, "reward already granted");
            return GrantOutcome { granted: false };
        }

        by_date.insert(
            date,
            RewardGrant {
                subject_id: subject_id.to_string(),
                date,
                granted_at,
            },
        );
        info!(subject_id, %date, "reward granted");
        GrantOutcome { granted: true }
    }

    pub fn is_granted(&self, subject_id: &str, date: NaiveDate) -> bool {
        self.grants
            .get(subject_id)
            .is_some_and(|by_date| by_date.contains_key(&date))
    }

    pub fn total_for(&self, subject_id: &str) -> u64 {
        self.grants
            .get(subject_id)
            .map_or(0, |by_date| by_date.len() as u64)
    }

    /// All-time size of the jar across every subject.
    pub fn total(&self) -> u64 {
        self.grants.values().map(|by_date| by_date.len() as u64).sum()
    }

    pub fn totals(&self) -> BTreeMap<String, u64> {
        self.grants
            .iter()
            .filter(|(_, by_date)| !by_date.is_empty())
            .map(|(subject, by_date)| (subject.clone(), by_date.len() as u64))
            .collect()
    }

    /// Grants for one subject, oldest date first.
    pub fn grants_for(&self, subject_id: &str) -> Vec<RewardGrant> {
        self.grants
            .get(subject_id)
            .map(|by_date| by_date.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completions::CompletionLog;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    #[test]
    fn second_grant_same_day_is_refused() {
        let mut ledger = RewardLedger::default();
        assert!(ledger.try_grant("habit:run", day(1)).granted);
        assert!(!ledger.try_grant("habit:run", day(1)).granted);
        assert_eq!(ledger.total_for("habit:run"), 1);
    }

    #[test]
    fn different_days_and_subjects_each_grant() {
        let mut ledger = RewardLedger::default();
        assert!(ledger.try_grant("habit:run", day(1)).granted);
        assert!(ledger.try_grant("habit:run", day(2)).granted);
        assert!(ledger.try_grant("habit:read", day(1)).granted);
        assert_eq!(ledger.total(), 3);
        assert_eq!(ledger.total_for("habit:run"), 2);
        assert_eq!(ledger.totals().get("habit:read"), Some(&1));
    }

    #[test]
    fn complete_undo_recomplete_nets_one_reward() {
        let mut log = CompletionLog::default();
        let mut ledger = RewardLedger::default();
        let subject = RewardSource::Habit("stretch".into()).subject_id();

        for _ in 0..3 {
            let transition = log.toggle(&subject, day(7));
            if transition.is_qualifying() {
                ledger.try_grant(&subject, day(7));
            }
        }

        assert!(log.is_completed(&subject, day(7)));
        assert_eq!(ledger.total_for(&subject), 1);

        log.toggle(&subject, day(7));
        assert!(ledger.is_granted(&subject, day(7)));
        assert_eq!(ledger.total(), 1);
    }

    #[test]
    fn refused_grant_keeps_original_timestamp() {
        let mut ledger = RewardLedger::default();
        let first = Utc::now();
        ledger.try_grant_at("journal:sam", day(3), first);
        ledger.try_grant_at("journal:sam", day(3), first + chrono::Duration::hours(2));

        let grants = ledger.grants_for("journal:sam");
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].granted_at, first);
    }

    #[test]
    fn sources_are_namespaced() {
        assert_eq!(RewardSource::Habit("a".into()).subject_id(), "habit:a");
        assert_eq!(RewardSource::BadHabit("a".into()).subject_id(), "bad-habit:a");
        assert_eq!(RewardSource::Journal("a".into()).subject_id(), "journal:a");
        assert!(RewardSource::Journal("  ".into()).normalized().is_err());
        assert_eq!(
            RewardSource::Habit(" run ".into()).normalized().unwrap(),
            RewardSource::Habit("run".into())
        );
    }

    #[test]
    fn ledger_survives_json_round_trip() {
        let mut ledger = RewardLedger::default();
        ledger.try_grant("habit:run", day(1));

        let json = serde_json::to_string(&ledger).unwrap();
        let mut restored: RewardLedger = serde_json::from_str(&json).unwrap();
        assert!(!restored.try_grant("habit:run", day(1)).granted);
        assert_eq!(restored.total(), 1);
    }
}
