// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        first_validation_message,
        quiz::{CreateQuizRequest, Quiz, UpdateQuizRequest},
    },
    store::JsonStore,
};

/// Query parameters for listing quizzes.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// Lists all quizzes, optionally filtered and sorted.
///
/// The search keyword matches case-insensitively against the title or any
/// question text. Sorting runs after filtering: `title` (ascending),
/// `date` (newest first) or `questions` (most questions first); anything
/// else keeps insertion order.
pub async fn list_quizzes(
    State(store): State<Arc<JsonStore>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let doc = store.load_quizzes().await;
    let mut quizzes = doc.quizzes;

    if let Some(keyword) = params.search.as_deref().filter(|s| !s.is_empty()) {
        let keyword = keyword.to_lowercase();
        quizzes.retain(|quiz| {
            quiz.title.to_lowercase().contains(&keyword)
                || quiz
                    .questions
                    .iter()
                    .any(|q| q.text.to_lowercase().contains(&keyword))
        });
    }

    match params.sort.as_deref() {
        Some("title") => quizzes.sort_by(|a, b| a.title.cmp(&b.title)),
        Some("date") => quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some("questions") => quizzes.sort_by(|a, b| b.questions.len().cmp(&a.questions.len())),
        _ => {}
    }

    Ok(Json(quizzes))
}

/// Creates a new quiz.
///
/// Validates the draft, assigns a fresh id, stamps both timestamps and
/// appends it to the collection. Returns 201 with the stored record.
pub async fn create_quiz(
    State(store): State<Arc<JsonStore>>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(errors) = payload.validate() {
        return Err(AppError::BadRequest(first_validation_message(
            &errors,
            &["title", "questions"],
        )));
    }

    let now = Utc::now();
    let quiz = Quiz {
        id: Uuid::new_v4().to_string(),
        title: payload.title.unwrap_or_default(),
        questions: payload
            .questions
            .unwrap_or_default()
            .into_iter()
            .map(|q| q.into_question())
            .collect(),
        created_at: now,
        updated_at: now,
    };

    let _guard = store.lock_quizzes().await;
    let mut doc = store.load_quizzes().await;
    doc.quizzes.push(quiz.clone());
    store.save_quizzes(&doc).await?;

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Retrieves a single quiz by id.
pub async fn get_quiz(
    State(store): State<Arc<JsonStore>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let doc = store.load_quizzes().await;
    let quiz = doc
        .quizzes
        .into_iter()
        .find(|q| q.id == quiz_id)
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

/// Updates a quiz by id.
///
/// Merge semantics: only fields present in the draft replace the stored
/// ones. `id` and `createdAt` are never touched; `updatedAt` is refreshed.
pub async fn update_quiz(
    State(store): State<Arc<JsonStore>>,
    Path(quiz_id): Path<String>,
    Json(payload): Json<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(errors) = payload.validate() {
        return Err(AppError::BadRequest(first_validation_message(
            &errors,
            &["title", "questions"],
        )));
    }

    let _guard = store.lock_quizzes().await;
    let mut doc = store.load_quizzes().await;
    let quiz = doc
        .quizzes
        .iter_mut()
        .find(|q| q.id == quiz_id)
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    if let Some(title) = payload.title {
        quiz.title = title;
    }
    if let Some(questions) = payload.questions {
        quiz.questions = questions.into_iter().map(|q| q.into_question()).collect();
    }
    quiz.updated_at = Utc::now();

    let updated = quiz.clone();
    store.save_quizzes(&doc).await?;

    Ok(Json(updated))
}

/// Deletes a quiz and cascades to its results.
///
/// Both collection locks are held for the whole operation, quizzes first,
/// then results. The two file writes are still separate: a crash between
/// them leaves orphaned results behind.
pub async fn delete_quiz(
    State(store): State<Arc<JsonStore>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _quizzes_guard = store.lock_quizzes().await;
    let _results_guard = store.lock_results().await;

    let mut doc = store.load_quizzes().await;
    let index = doc
        .quizzes
        .iter()
        .position(|q| q.id == quiz_id)
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;
    let deleted = doc.quizzes.remove(index);
    store.save_quizzes(&doc).await?;

    let mut results_doc = store.load_results().await;
    let before = results_doc.results.len();
    results_doc.results.retain(|r| r.quiz_id != quiz_id);
    let removed = before - results_doc.results.len();
    store.save_results(&results_doc).await.map_err(|e| {
        tracing::error!(
            "Quiz {} deleted but cascading result cleanup failed: {}",
            quiz_id,
            e
        );
        AppError::from(e)
    })?;

    Ok(Json(json!({
        "message": "Quiz and associated results deleted successfully",
        "deletedQuiz": deleted,
        "deletedResults": removed,
    })))
}
