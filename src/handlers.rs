use crate::companion::{kind_note_or_fallback, replacements_or_fallback, NoteRequest, Suggestion};
use crate::errors::AppError;
use crate::journal::DailyEntry;
use crate::ledger::RewardSource;
use crate::models::{
    date_or, mood_subject, parse_date, require_subject, JarResponse, JournalRequest,
    JournalResponse, Mood, MoodRequest, SentenceRequest, SentenceResponse, StatsQuery,
    SuggestionQuery, ToggleRequest, ToggleResponse,
};
use crate::state::AppState;
use crate::storage::commit;
use crate::streaks::{summarize, StreakSummary};
use crate::text_quality::{count_valid_sentences, validate_entry, SentenceSession};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use tracing::info;

pub async fn get_jar(State(state): State<AppState>) -> Json<JarResponse> {
    let data = state.data.lock().await;
    Json(JarResponse {
        total: data.ledger.total(),
        by_subject: data.ledger.totals(),
    })
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let response = apply_toggle(&state, RewardSource::Habit(id), payload.date.as_deref()).await?;
    Ok(Json(response))
}

pub async fn toggle_bad_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let response =
        apply_toggle(&state, RewardSource::BadHabit(id), payload.date.as_deref()).await?;
    Ok(Json(response))
}

pub async fn habit_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StreakSummary>, AppError> {
    stats_for(&state, RewardSource::Habit(id), query.today.as_deref()).await
}

pub async fn bad_habit_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StreakSummary>, AppError> {
    stats_for(&state, RewardSource::BadHabit(id), query.today.as_deref()).await
}

pub async fn save_journal(
    State(state): State<AppState>,
    Json(payload): Json<JournalRequest>,
) -> Result<(StatusCode, Json<JournalResponse>), AppError> {
    let JournalRequest {
        user,
        date,
        text,
        tags,
    } = payload;
    let user = require_subject(&user)?;
    let date = date_or(date.as_deref(), today())?;
    let subject_id = RewardSource::Journal(user.to_string()).subject_id();

    let validation = validate_entry(&text);
    let sentence_count = count_valid_sentences(&text);

    if !validation.is_valid {
        let jar_total = state.data.lock().await.ledger.total();
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(JournalResponse {
                saved: false,
                validation,
                entry: None,
                sentence_count,
                reward_granted: false,
                jar_total,
                note: None,
            }),
        ));
    }

    let mood = tags.get("mood").and_then(|value| value.parse::<Mood>().ok());
    let (entry, reward_granted, jar_total) = {
        let mut data = state.data.lock().await;
        let (entry, reward_granted) = commit(&state.data_path, &mut data, |next| {
            let entry = next.journal.upsert(&subject_id, date, text, tags);
            (entry, next.ledger.try_grant(&subject_id, date).granted)
        })
        .await?;
        (entry, reward_granted, data.ledger.total())
    };

    info!(%subject_id, %date, sentence_count, "journal entry saved");

    let note = kind_note_or_fallback(
        state.companion.as_ref(),
        &NoteRequest {
            text: &entry.text,
            sentence_count,
            mood,
        },
    );

    Ok((
        StatusCode::OK,
        Json(JournalResponse {
            saved: true,
            validation,
            entry: Some(entry),
            sentence_count,
            reward_granted,
            jar_total,
            note: Some(note),
        }),
    ))
}

pub async fn journal_history(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<Vec<DailyEntry>>, AppError> {
    let subject_id = RewardSource::Journal(require_subject(&user)?.to_string()).subject_id();
    let data = state.data.lock().await;
    Ok(Json(data.journal.history(&subject_id)))
}

pub async fn journal_entry(
    State(state): State<AppState>,
    Path((user, date)): Path<(String, String)>,
) -> Result<Json<DailyEntry>, AppError> {
    let subject_id = RewardSource::Journal(require_subject(&user)?.to_string()).subject_id();
    let date = parse_date(&date)?;
    let data = state.data.lock().await;
    data.journal
        .get(&subject_id, date)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no journal entry for {date}")))
}

pub async fn check_in_mood(
    State(state): State<AppState>,
    Json(payload): Json<MoodRequest>,
) -> Result<Json<DailyEntry>, AppError> {
    let subject_id = mood_subject(require_subject(&payload.user)?);
    let date = date_or(payload.date.as_deref(), today())?;
    let tags = BTreeMap::from([("mood".to_string(), payload.mood.to_string())]);

    let note = payload.note;
    let mut data = state.data.lock().await;
    let entry = commit(&state.data_path, &mut data, |next| {
        next.journal.upsert(&subject_id, date, note, tags)
    })
    .await?;

    info!(%subject_id, %date, mood = %payload.mood, "mood recorded");
    Ok(Json(entry))
}

pub async fn mood_history(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<Vec<DailyEntry>>, AppError> {
    let subject_id = mood_subject(require_subject(&user)?);
    let data = state.data.lock().await;
    Ok(Json(data.journal.history(&subject_id)))
}

pub async fn count_sentences(Json(payload): Json<SentenceRequest>) -> Json<SentenceResponse> {
    let mut session = SentenceSession::resume(payload.session_max);
    let session_max = session.observe(&payload.text);
    Json(SentenceResponse {
        count: count_valid_sentences(&payload.text),
        session_max,
    })
}

pub async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<Vec<Suggestion>>, AppError> {
    let habit = require_subject(&query.habit)?;
    Ok(Json(replacements_or_fallback(state.companion.as_ref(), habit)))
}

async fn apply_toggle(
    state: &AppState,
    source: RewardSource,
    date: Option<&str>,
) -> Result<ToggleResponse, AppError> {
    let source = source.normalized()?;
    let today = today();
    let date = date_or(date, today)?;
    let subject_id = source.subject_id();

    let mut data = state.data.lock().await;
    let (transition, reward_granted) = commit(&state.data_path, &mut data, |next| {
        let transition = next.completions.toggle(&subject_id, date);
        let granted =
            transition.is_qualifying() && next.ledger.try_grant(&subject_id, date).granted;
        (transition, granted)
    })
    .await?;

    let dates = data.completions.dates(&subject_id);
    Ok(ToggleResponse {
        completed: transition.is_qualifying(),
        reward_granted,
        jar_total: data.ledger.total(),
        stats: summarize(&dates, today),
        subject_id,
        date,
    })
}

async fn stats_for(
    state: &AppState,
    source: RewardSource,
    today_override: Option<&str>,
) -> Result<Json<StreakSummary>, AppError> {
    let source = source.normalized()?;
    let today = date_or(today_override, today())?;
    let data = state.data.lock().await;
    let dates = data.completions.dates(&source.subject_id());
    Ok(Json(summarize(&dates, today)))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
