// src/models/result.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// On-disk document for the results collection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResultDocument {
    pub results: Vec<QuizResult>,
}

/// A recorded submission. Write-once: results are only ever created by the
/// submission handler and removed by the delete handler, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,

    /// Weak reference to the quiz. The cascade delete keeps these in sync;
    /// nothing else enforces existence after submission time.
    pub quiz_id: String,

    pub student_name: String,

    /// Count of correctly answered questions.
    pub score: u32,

    /// Question count of the quiz at submission time. Editing the quiz
    /// later does not rewrite old results.
    pub total_questions: u32,

    /// `100 * score / totalQuestions`.
    pub percentage: f64,

    /// One entry per question, in question order.
    pub question_results: Vec<QuestionResult>,

    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Per-question breakdown of a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_text: String,

    /// Text of the option the student picked, or `None` when the submitted
    /// index does not reference any option.
    pub user_answer: Option<String>,

    /// Text of the correct option.
    pub correct_answer: String,

    pub is_correct: bool,
}

/// DTO for a student submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[validate(
        required(message = "studentName is required"),
        custom(function = validate_student_name)
    )]
    pub student_name: Option<String>,

    /// One option index per question, in question order. Indices outside
    /// the question's option list score as incorrect.
    #[validate(required(message = "answers is required"))]
    pub answers: Option<Vec<i64>>,
}

fn validate_student_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("invalid_student_name");
        error.message = Some("studentName must be a non-empty string".into());
        return Err(error);
    }
    Ok(())
}

/// Aggregate statistics over the attempts recorded for one quiz.
/// All percentages; zero-valued when there are no attempts.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultStats {
    pub total_attempts: usize,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
}

impl ResultStats {
    pub fn compute(results: &[QuizResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let sum: f64 = results.iter().map(|r| r.percentage).sum();
        let highest = results.iter().map(|r| r.percentage).fold(f64::MIN, f64::max);
        let lowest = results.iter().map(|r| r.percentage).fold(f64::MAX, f64::min);

        Self {
            total_attempts: results.len(),
            average_score: sum / results.len() as f64,
            highest_score: highest,
            lowest_score: lowest,
        }
    }
}
