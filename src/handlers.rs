use crate::errors::AppError;
use crate::models::{BlogPayload, BlogPost, Entry, EntryPayload, Problem, StatsSnapshot};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, Utc};
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_index(&store.stats))
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<Entry>> {
    let store = state.store.lock().await;
    Json(store.data.entries.clone())
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<EntryPayload>,
) -> Result<Json<Entry>, AppError> {
    let entry = build_entry(Uuid::new_v4().to_string(), payload, None)?;

    let mut store = state.store.lock().await;
    store.data.entries.insert(0, entry.clone());
    store.refresh_stats();
    persist_data(&state.data_path, &store.data).await?;

    Ok(Json(entry))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EntryPayload>,
) -> Result<Json<Entry>, AppError> {
    let mut store = state.store.lock().await;
    let Some(index) = store.data.entries.iter().position(|entry| entry.id == id) else {
        return Err(AppError::not_found(format!("no entry with id {id}")));
    };

    let previous_date = store.data.entries[index].date.clone();
    let entry = build_entry(id, payload, Some(previous_date))?;
    store.data.entries[index] = entry.clone();
    store.refresh_stats();
    persist_data(&state.data_path, &store.data).await?;

    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    let before = store.data.entries.len();
    store.data.entries.retain(|entry| entry.id != id);
    if store.data.entries.len() == before {
        return Err(AppError::not_found(format!("no entry with id {id}")));
    }

    store.refresh_stats();
    persist_data(&state.data_path, &store.data).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    let store = state.store.lock().await;
    Json(store.stats.clone())
}

pub async fn list_blogs(State(state): State<AppState>) -> Json<Vec<BlogPost>> {
    let store = state.store.lock().await;
    Json(store.data.blogs.clone())
}

pub async fn create_blog(
    State(state): State<AppState>,
    Json(payload): Json<BlogPayload>,
) -> Result<Json<BlogPost>, AppError> {
    if payload.title.trim().is_empty() || payload.content.trim().is_empty() {
        return Err(AppError::bad_request("a blog post needs a title and content"));
    }

    let blog = BlogPost {
        id: Uuid::new_v4().to_string(),
        read_time: estimate_read_time(&payload.content),
        title: payload.title,
        content: payload.content,
        author: payload.author,
        date: Utc::now().to_rfc3339(),
        tags: payload.tags,
        difficulty: payload.difficulty,
        problem_slug: payload.problem_slug.filter(|slug| !slug.trim().is_empty()),
        images: payload.images.filter(|images| !images.is_empty()),
    };

    let mut store = state.store.lock().await;
    store.data.blogs.insert(0, blog.clone());
    persist_data(&state.data_path, &store.data).await?;

    Ok(Json(blog))
}

/// Normalizes a payload into a stored entry: blank problems are dropped,
/// `problems_solved` is recomputed, missing urls come from the slug.
fn build_entry(
    id: String,
    payload: EntryPayload,
    fallback_date: Option<String>,
) -> Result<Entry, AppError> {
    let problems: Vec<Problem> = payload
        .problems
        .into_iter()
        .filter(|problem| !problem.title.trim().is_empty() && !problem.slug.trim().is_empty())
        .map(|problem| {
            let url = problem
                .url
                .filter(|url| !url.trim().is_empty())
                .or_else(|| Some(format!("https://leetcode.com/problems/{}/", problem.slug)));
            Problem {
                id: problem.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                title: problem.title,
                slug: problem.slug,
                difficulty: problem.difficulty,
                pattern: problem.pattern.filter(|pattern| !pattern.trim().is_empty()),
                url,
            }
        })
        .collect();

    if problems.is_empty() {
        return Err(AppError::bad_request(
            "an entry needs at least one problem with a title and slug",
        ));
    }

    let date = payload
        .date
        .filter(|date| !date.trim().is_empty())
        .or(fallback_date)
        .unwrap_or_else(today_string);

    Ok(Entry {
        id,
        date,
        day: payload.day,
        pattern: payload.pattern,
        problems_solved: problems.len() as u32,
        problems,
        tags: payload.tags,
        notes: payload.notes.filter(|notes| !notes.trim().is_empty()),
        images: payload.images.filter(|images| !images.is_empty()),
    })
}

fn estimate_read_time(content: &str) -> u32 {
    const WORDS_PER_MINUTE: u32 = 200;
    let words = content.split_whitespace().count() as u32;
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
