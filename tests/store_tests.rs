// tests/store_tests.rs

use chrono::Utc;
use quiz_backend::models::quiz::{Question, Quiz, QuizDocument};
use quiz_backend::models::result::ResultDocument;
use quiz_backend::store::JsonStore;
use std::path::PathBuf;

fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("quiz_store_test_{}", uuid::Uuid::new_v4()))
}

fn sample_quiz() -> Quiz {
    let now = Utc::now();
    Quiz {
        id: uuid::Uuid::new_v4().to_string(),
        title: "Persisted".to_string(),
        questions: vec![Question {
            text: "Q".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
            correct_option: 1,
        }],
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn missing_files_load_as_empty_collections() {
    // Arrange
    let store = JsonStore::open(temp_data_dir()).unwrap();

    // Act
    let quizzes = store.load_quizzes().await;
    let results = store.load_results().await;

    // Assert
    assert!(quizzes.quizzes.is_empty());
    assert!(results.results.is_empty());
}

#[tokio::test]
async fn save_then_load_round_trips_the_document() {
    // Arrange
    let store = JsonStore::open(temp_data_dir()).unwrap();
    let quiz = sample_quiz();
    let doc = QuizDocument {
        quizzes: vec![quiz.clone()],
    };

    // Act
    store.save_quizzes(&doc).await.expect("save failed");
    let loaded = store.load_quizzes().await;

    // Assert
    assert_eq!(loaded.quizzes.len(), 1);
    assert_eq!(loaded.quizzes[0].id, quiz.id);
    assert_eq!(loaded.quizzes[0].title, quiz.title);
    assert_eq!(loaded.quizzes[0].questions[0].correct_option, 1);
}

#[tokio::test]
async fn corrupt_file_degrades_to_empty_collection() {
    // Arrange
    let data_dir = temp_data_dir();
    let store = JsonStore::open(&data_dir).unwrap();
    std::fs::write(data_dir.join("quizzes.json"), b"{ not json").unwrap();

    // Act: retries are exhausted, then the empty default is served
    let loaded = store.load_quizzes().await;

    // Assert
    assert!(loaded.quizzes.is_empty());
}

#[tokio::test]
async fn saving_overwrites_the_previous_document() {
    // Arrange
    let store = JsonStore::open(temp_data_dir()).unwrap();
    let first = QuizDocument {
        quizzes: vec![sample_quiz(), sample_quiz()],
    };
    store.save_quizzes(&first).await.unwrap();

    // Act
    let second = QuizDocument {
        quizzes: vec![sample_quiz()],
    };
    store.save_quizzes(&second).await.unwrap();
    let loaded = store.load_quizzes().await;

    // Assert: whole-document overwrite, nothing merged
    assert_eq!(loaded.quizzes.len(), 1);
    assert_eq!(loaded.quizzes[0].id, second.quizzes[0].id);
}

#[tokio::test]
async fn documents_are_pretty_printed_on_disk() {
    // Arrange
    let data_dir = temp_data_dir();
    let store = JsonStore::open(&data_dir).unwrap();
    let doc = QuizDocument {
        quizzes: vec![sample_quiz()],
    };

    // Act
    store.save_quizzes(&doc).await.unwrap();
    let raw = std::fs::read_to_string(data_dir.join("quizzes.json")).unwrap();

    // Assert: indented output, camelCase keys
    assert!(raw.contains("\n  \"quizzes\""));
    assert!(raw.contains("\"correctOption\""));
}

#[tokio::test]
async fn results_collection_is_independent_of_quizzes() {
    // Arrange
    let store = JsonStore::open(temp_data_dir()).unwrap();
    let doc = QuizDocument {
        quizzes: vec![sample_quiz()],
    };
    store.save_quizzes(&doc).await.unwrap();

    // Act
    let results: ResultDocument = store.load_results().await;

    // Assert
    assert!(results.results.is_empty());
}
