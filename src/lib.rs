pub mod app;
pub mod companion;
pub mod completions;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod journal;
pub mod ledger;
pub mod models;
pub mod state;
pub mod storage;
pub mod streaks;
pub mod text_quality;

pub use app::router;
pub use companion::{Companion, CompanionError, OfflineCompanion, Suggestion};
pub use completions::{CompletionLog, CompletionRecord, Transition};
pub use config::Config;
pub use errors::{AppError, ReflectionError};
pub use journal::{DailyEntry, JournalStore};
pub use ledger::{GrantOutcome, RewardGrant, RewardLedger, RewardSource};
pub use state::AppState;
pub use storage::{load_data, persist_data};
pub use streaks::{completion_rate, current_streak, longest_streak, summarize, StreakSummary};
pub use text_quality::{count_valid_sentences, validate_entry, EntryValidation, SentenceSession};
