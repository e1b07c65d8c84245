use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/jar", get(handlers::get_jar))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/habits/:id/stats", get(handlers::habit_stats))
        .route("/api/bad-habits/:id/toggle", post(handlers::toggle_bad_habit))
        .route("/api/bad-habits/:id/stats", get(handlers::bad_habit_stats))
        .route("/api/journal", post(handlers::save_journal))
        .route("/api/journal/:user", get(handlers::journal_history))
        .route("/api/journal/:user/:date", get(handlers::journal_entry))
        .route("/api/mood", post(handlers::check_in_mood))
        .route("/api/mood/:user", get(handlers::mood_history))
        .route("/api/sentences", post(handlers::count_sentences))
        .route("/api/suggestions", get(handlers::suggestions))
        .with_state(state)
}
