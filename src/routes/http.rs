//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, http::StatusCode, Json, response::{IntoResponse, Response}};
use tracing::{info, instrument};

use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, lessons: state.catalog().await.len() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_lessons(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let catalog = list_lessons(&state).await;
  let lessons: Vec<LessonOut> = catalog.lessons().iter().map(LessonOut::from).collect();
  Json(lessons)
}

#[instrument(level = "info", skip(state), fields(lesson_id = %q.lesson_id, seed_offset = ?q.seed_offset))]
pub async fn http_get_quiz(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuizQuery>,
) -> impl IntoResponse {
  let served = chapter_quiz(&state, &q.lesson_id, q.seed_offset).await;
  info!(target: "study_aids", lesson_id = %q.lesson_id, quiz_id = %served.quiz_id, origin = %served.quiz.origin, "HTTP chapter quiz served");
  Json(quiz_out(&served))
}

#[instrument(level = "info", skip(state), fields(size = ?q.size, seed_offset = ?q.seed_offset))]
pub async fn http_get_exam(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ExamQuery>,
) -> impl IntoResponse {
  let served = final_exam(&state, q.size, q.seed_offset).await;
  info!(target: "study_aids", quiz_id = %served.quiz_id, items = served.quiz.items.len(), "HTTP exam served");
  Json(quiz_out(&served))
}

#[instrument(level = "info", skip(state, body), fields(quiz_id = %body.quiz_id, answers = body.answers.len()))]
pub async fn http_post_grade(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GradeIn>,
) -> Response {
  match grade_submission(&state, body.quiz_id, &body.answers).await {
    Ok(graded) => {
      info!(target: "study_aids", quiz_id = %body.quiz_id, score = graded.summary.score, total = graded.summary.total, "HTTP submission graded");
      Json(grade_out(graded)).into_response()
    }
    Err(e) => (StatusCode::NOT_FOUND, Json(ErrorOut { error: e.to_string() })).into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_refresh(State(state): State<Arc<AppState>>) -> Response {
  match state.refresh_catalog().await {
    Ok(lessons) => Json(RefreshOut { ok: true, lessons, error: None }).into_response(),
    Err(e) => {
      let lessons = state.catalog().await.len();
      (StatusCode::BAD_GATEWAY, Json(RefreshOut { ok: false, lessons, error: Some(e.to_string()) })).into_response()
    }
  }
}
