// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// On-disk document for the quizzes collection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct QuizDocument {
    pub quizzes: Vec<Quiz>,
}

/// A stored quiz. The wire format (and the JSON document on disk) is
/// camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,

    pub title: String,

    /// Ordered question list, never empty for a quiz that passed validation.
    pub questions: Vec<Question>,

    /// Set at creation and never touched again.
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Refreshed on every update.
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,

    /// Ordered answer options (at least two).
    pub options: Vec<String>,

    /// Index into `options` marking the correct answer.
    pub correct_option: usize,
}

/// DTO for creating a quiz.
///
/// Fields are `Option` so that a missing field surfaces as a 400 with a
/// readable message instead of a body-deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(
        required(message = "title is required"),
        custom(function = validate_title)
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "questions is required"),
        custom(function = validate_questions)
    )]
    pub questions: Option<Vec<QuestionDraft>>,
}

/// DTO for updating a quiz. Absent fields are preserved on the stored
/// record (merge semantics); provided fields are validated like a create.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizRequest {
    #[validate(custom(function = validate_title))]
    pub title: Option<String>,
    #[validate(custom(function = validate_questions))]
    pub questions: Option<Vec<QuestionDraft>>,
}

/// Candidate question inside a quiz draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_option: Option<i64>,
}

impl QuestionDraft {
    /// Converts a validated draft into a stored question. Callers run
    /// `validate_questions` first, so the fallbacks here are unreachable.
    pub fn into_question(self) -> Question {
        Question {
            text: self.text.unwrap_or_default(),
            options: self.options.unwrap_or_default(),
            correct_option: self.correct_option.unwrap_or(0) as usize,
        }
    }
}

fn validation_error(message: String) -> ValidationError {
    let mut error = ValidationError::new("invalid_quiz");
    error.message = Some(message.into());
    error
}

/// Validates that a title is non-empty after trimming.
fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(validation_error(
            "title must be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

/// Validates the question list, stopping at the first failure.
///
/// Messages identify the offending question 1-indexed, the way quiz
/// authors see them in the editor.
fn validate_questions(questions: &[QuestionDraft]) -> Result<(), ValidationError> {
    if questions.is_empty() {
        return Err(validation_error(
            "quiz must contain at least one question".to_string(),
        ));
    }

    for (index, question) in questions.iter().enumerate() {
        let number = index + 1;

        let text_ok = question
            .text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if !text_ok {
            return Err(validation_error(format!(
                "Question {}: text must be a non-empty string",
                number
            )));
        }

        let options_len = question.options.as_deref().map_or(0, |o| o.len());
        if options_len < 2 {
            return Err(validation_error(format!(
                "Question {}: at least two options are required",
                number
            )));
        }

        let correct_ok = question
            .correct_option
            .is_some_and(|c| c >= 0 && (c as usize) < options_len);
        if !correct_ok {
            return Err(validation_error(format!(
                "Question {}: correctOption must be a valid option index",
                number
            )));
        }
    }

    Ok(())
}
