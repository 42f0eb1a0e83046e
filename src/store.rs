// src/store.rs

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{Mutex, MutexGuard};

use crate::models::{quiz::QuizDocument, result::ResultDocument};

/// How many times a read is attempted before degrading to the default.
const LOAD_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles on each subsequent attempt.
const BACKOFF_BASE: Duration = Duration::from_millis(50);

/// Error raised by collection writes. Reads never fail (see [`JsonStore`]).
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

/// File-backed document store holding the two collections.
///
/// Each collection is one JSON file rewritten wholesale on every mutation.
/// A per-collection mutex serializes the read-modify-write cycle: handlers
/// hold the guard from `lock_*` across their load and save. For the cascade
/// delete both locks are taken, always quizzes before results.
///
/// Reads never fail the caller. A missing file means an empty collection;
/// decode or I/O failures are retried with bounded exponential backoff and
/// then degrade to the empty default with a warning. Operators therefore
/// cannot tell "empty" from "unreadable" without checking the logs.
pub struct JsonStore {
    quizzes_path: PathBuf,
    results_path: PathBuf,
    quizzes_lock: Mutex<()>,
    results_lock: Mutex<()>,
}

impl JsonStore {
    /// Opens the store rooted at `data_dir`, creating the directory if needed.
    pub fn open<P: Into<PathBuf>>(data_dir: P) -> std::io::Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        Ok(Self {
            quizzes_path: data_dir.join("quizzes.json"),
            results_path: data_dir.join("results.json"),
            quizzes_lock: Mutex::new(()),
            results_lock: Mutex::new(()),
        })
    }

    pub async fn lock_quizzes(&self) -> MutexGuard<'_, ()> {
        self.quizzes_lock.lock().await
    }

    pub async fn lock_results(&self) -> MutexGuard<'_, ()> {
        self.results_lock.lock().await
    }

    pub async fn load_quizzes(&self) -> QuizDocument {
        load_document(&self.quizzes_path).await
    }

    pub async fn save_quizzes(&self, doc: &QuizDocument) -> Result<(), StoreError> {
        save_document(&self.quizzes_path, doc).await
    }

    pub async fn load_results(&self) -> ResultDocument {
        load_document(&self.results_path).await
    }

    pub async fn save_results(&self, doc: &ResultDocument) -> Result<(), StoreError> {
        save_document(&self.results_path, doc).await
    }
}

/// Reads and decodes one collection file.
async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Loads a collection, degrading to the empty default instead of failing.
///
/// A missing file is normal first-run state and short-circuits the backoff.
/// Anything else (decode failure, transient I/O error) is retried before
/// the degradation kicks in.
async fn load_document<T: Default + DeserializeOwned>(path: &Path) -> T {
    let mut attempt = 0;
    loop {
        match read_document(path).await {
            Ok(doc) => return doc,
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Collection file {} absent, starting empty", path.display());
                return T::default();
            }
            Err(e) => {
                attempt += 1;
                if attempt >= LOAD_ATTEMPTS {
                    tracing::warn!(
                        "Giving up on {} after {} attempts, serving empty collection: {}",
                        path.display(),
                        attempt,
                        e
                    );
                    return T::default();
                }
                tokio::time::sleep(BACKOFF_BASE * 2u32.pow(attempt - 1)).await;
            }
        }
    }
}

/// Serializes and overwrites one collection file.
///
/// Pretty-printed to keep the documents hand-inspectable. The write is a
/// plain overwrite, not an atomic rename: a crash mid-write can corrupt
/// the file, which the next load then reports as an empty collection.
async fn save_document<T: Serialize>(path: &Path, doc: &T) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(doc)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
