// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{health, quiz, results, submission},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quizzes, submissions, results).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store + config).
pub fn create_router(state: AppState) -> Router {
    // Browser quiz clients may be served from anywhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route(
            "/{quiz_id}",
            get(quiz::get_quiz)
                .put(quiz::update_quiz)
                .delete(quiz::delete_quiz),
        );

    // GET takes a quiz id, DELETE takes a result id.
    let result_routes = Router::new().route(
        "/{id}",
        get(results::list_results).delete(results::delete_result),
    );

    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/quizzes", quiz_routes)
        .route("/api/submit/{quiz_id}", post(submission::submit_quiz))
        .nest("/api/results", result_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
