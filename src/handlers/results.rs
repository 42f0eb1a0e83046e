// src/handlers/results.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    error::AppError,
    models::result::{QuizResult, ResultStats},
    store::JsonStore,
};

/// Lists the results recorded for a quiz together with aggregate stats.
///
/// An unknown quiz id is not an error: it yields an empty list and a
/// zero-valued stats block.
pub async fn list_results(
    State(store): State<Arc<JsonStore>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let doc = store.load_results().await;
    let results: Vec<QuizResult> = doc
        .results
        .into_iter()
        .filter(|r| r.quiz_id == quiz_id)
        .collect();
    let stats = ResultStats::compute(&results);

    Ok(Json(json!({
        "results": results,
        "stats": stats,
    })))
}

/// Deletes a single result by id.
pub async fn delete_result(
    State(store): State<Arc<JsonStore>>,
    Path(result_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _guard = store.lock_results().await;
    let mut doc = store.load_results().await;
    let index = doc
        .results
        .iter()
        .position(|r| r.id == result_id)
        .ok_or(AppError::NotFound("Result not found".to_string()))?;
    let deleted = doc.results.remove(index);
    store.save_results(&doc).await?;

    Ok(Json(json!({
        "message": "Result deleted successfully",
        "deletedResult": deleted,
    })))
}
