// src/handlers/submission.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        first_validation_message,
        result::{QuestionResult, QuizResult, SubmitRequest},
    },
    store::JsonStore,
};

/// Scores a student's submission against a quiz and records the result.
///
/// * Validates the student name and that one answer was given per question.
/// * Compares each answer positionally with the question's correct option.
/// * Builds the per-question breakdown returned alongside the totals.
pub async fn submit_quiz(
    State(store): State<Arc<JsonStore>>,
    Path(quiz_id): Path<String>,
    Json(payload): Json<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(errors) = payload.validate() {
        return Err(AppError::BadRequest(first_validation_message(
            &errors,
            &["student_name", "answers"],
        )));
    }
    let student_name = payload.student_name.unwrap_or_default();
    let answers = payload.answers.unwrap_or_default();

    let quiz = {
        let doc = store.load_quizzes().await;
        doc.quizzes
            .into_iter()
            .find(|q| q.id == quiz_id)
            .ok_or(AppError::NotFound("Quiz not found".to_string()))?
    };

    if answers.len() != quiz.questions.len() {
        return Err(AppError::BadRequest(format!(
            "Expected {} answers, got {}",
            quiz.questions.len(),
            answers.len()
        )));
    }

    let mut score = 0u32;
    let mut question_results = Vec::with_capacity(quiz.questions.len());
    for (question, &answer) in quiz.questions.iter().zip(&answers) {
        // An index outside the option list is simply an incorrect answer.
        let chosen = usize::try_from(answer)
            .ok()
            .and_then(|i| question.options.get(i));
        let is_correct = usize::try_from(answer).ok() == Some(question.correct_option);
        if is_correct {
            score += 1;
        }

        question_results.push(QuestionResult {
            question_text: question.text.clone(),
            user_answer: chosen.cloned(),
            correct_answer: question
                .options
                .get(question.correct_option)
                .cloned()
                .unwrap_or_default(),
            is_correct,
        });
    }

    let total_questions = quiz.questions.len() as u32;
    let result = QuizResult {
        id: Uuid::new_v4().to_string(),
        quiz_id,
        student_name,
        score,
        total_questions,
        percentage: 100.0 * f64::from(score) / f64::from(total_questions),
        question_results,
        submitted_at: Utc::now(),
    };

    let _guard = store.lock_results().await;
    let mut doc = store.load_results().await;
    doc.results.push(result.clone());
    store.save_results(&doc).await?;

    Ok(Json(result))
}
