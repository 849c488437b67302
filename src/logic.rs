//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! Each operation tries the upstream study-aids API first (when configured) and falls back to
//! the local engine on any failure:
//!   - chapter quiz (curated bank, synthesis, presence check)
//!   - final exam
//!   - grading against the items that were actually served

use rand::Rng;
use thiserror::Error;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::domain::{SubmissionSummary, SubmittedAnswer};
use crate::engine;
use crate::state::{AppState, IssuedQuiz, IssuedScope};

/// Upper bound for random seed offsets handed to practice quizzes.
const SEED_OFFSET_RANGE: u32 = 10_000;
const MAX_EXAM_SIZE: usize = 500;

#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("Unknown quizId: {0}")]
  UnknownQuiz(Uuid),
}

#[derive(Clone, Debug)]
pub struct ServedQuiz {
  pub quiz_id: Uuid,
  pub quiz: IssuedQuiz,
}

#[derive(Clone, Debug)]
pub struct GradedQuiz {
  pub quiz_id: Uuid,
  pub source: &'static str,
  pub summary: SubmissionSummary,
}

fn pick_seed_offset(requested: Option<u32>) -> u32 {
  requested.unwrap_or_else(|| rand::thread_rng().gen_range(0..SEED_OFFSET_RANGE))
}

/// Current catalog, in teaching order.
pub async fn list_lessons(state: &AppState) -> Arc<Catalog> {
  state.catalog().await
}

#[instrument(level = "info", skip(state), fields(%lesson_id))]
pub async fn chapter_quiz(state: &AppState, lesson_id: &str, seed_offset: Option<u32>) -> ServedQuiz {
  let seed_offset = pick_seed_offset(seed_offset);

  let remote_items = match &state.remote {
    Some(remote) => match remote.fetch_chapter_quiz(lesson_id, seed_offset).await {
      Ok(items) => Some(items),
      Err(e) => {
        error!(target: "study_aids", %lesson_id, error = %e, "Upstream chapter quiz failed; using local engine.");
        None
      }
    },
    None => None,
  };

  let (origin, items) = match remote_items {
    Some(items) => ("remote", items),
    None => {
      let catalog = state.catalog().await;
      let quiz = engine::chapter_quiz(lesson_id, &catalog, &state.bank, state.settings.max_per_lesson, seed_offset);
      (quiz.origin.as_str(), quiz.items)
    }
  };

  let scope = IssuedScope::Chapter { lesson_id: lesson_id.to_string() };
  let quiz = IssuedQuiz { scope, origin, seed_offset, items };
  let quiz_id = state.register_issued(&quiz).await;
  info!(target: "study_aids", %lesson_id, %quiz_id, %origin, seed_offset, items = quiz.items.len(), "Chapter quiz served");
  ServedQuiz { quiz_id, quiz }
}

#[instrument(level = "info", skip(state))]
pub async fn final_exam(state: &AppState, size: Option<usize>, seed_offset: Option<u32>) -> ServedQuiz {
  let mut size = size.unwrap_or(state.settings.exam_size);
  if size > MAX_EXAM_SIZE {
    warn!(target: "study_aids", requested = size, max = MAX_EXAM_SIZE, "Exam size clamped");
    size = MAX_EXAM_SIZE;
  }
  let seed_offset = pick_seed_offset(seed_offset);

  let remote_items = match &state.remote {
    Some(remote) => match remote.fetch_exam(size, seed_offset).await {
      Ok(items) => Some(items),
      Err(e) => {
        error!(target: "study_aids", size, error = %e, "Upstream exam failed; using local engine.");
        None
      }
    },
    None => None,
  };

  let (origin, items) = match remote_items {
    Some(items) => ("remote", items),
    None => {
      let catalog = state.catalog().await;
      ("assembled", engine::assemble_exam(&catalog, &state.bank, size, seed_offset))
    }
  };

  if items.len() < size {
    warn!(target: "study_aids", size, got = items.len(), "Exam shorter than requested");
  }

  let scope = IssuedScope::Exam { size };
  let quiz = IssuedQuiz { scope, origin, seed_offset, items };
  let quiz_id = state.register_issued(&quiz).await;
  info!(target: "study_aids", %quiz_id, %origin, size, seed_offset, items = quiz.items.len(), "Final exam served");
  ServedQuiz { quiz_id, quiz }
}

#[instrument(level = "info", skip(state, answers), fields(%quiz_id, answers = answers.len()))]
pub async fn grade_submission(
  state: &AppState,
  quiz_id: Uuid,
  answers: &[Option<SubmittedAnswer>],
) -> Result<GradedQuiz, ServiceError> {
  let issued = state.get_issued(&quiz_id).await.ok_or(ServiceError::UnknownQuiz(quiz_id))?;

  if let Some(remote) = &state.remote {
    match remote.grade(&issued.items, answers).await {
      Ok(summary) => {
        info!(target: "study_aids", %quiz_id, score = summary.score, total = summary.total, "Graded upstream");
        return Ok(GradedQuiz { quiz_id, source: "remote", summary });
      }
      Err(e) => {
        error!(target: "study_aids", %quiz_id, error = %e, "Upstream grading failed; grading locally.");
      }
    }
  }

  let summary = engine::grade(&issued.items, answers);
  info!(target: "study_aids", %quiz_id, score = summary.score, total = summary.total, "Graded locally");
  Ok(GradedQuiz { quiz_id, source: "local", summary })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::StudyAidsConfig;
  use crate::domain::QuestionBody;
  use crate::remote::RemoteStudyAids;

  fn local_state() -> AppState {
    AppState::from_parts(StudyAidsConfig::default(), None)
  }

  /// Answers that match every key.
  fn perfect_answers(quiz: &IssuedQuiz) -> Vec<Option<SubmittedAnswer>> {
    quiz
      .items
      .iter()
      .map(|q| {
        Some(match &q.body {
          QuestionBody::SingleChoice { answer, .. } => SubmittedAnswer::Number(*answer as f64),
          QuestionBody::MultiChoice { answer, .. } => SubmittedAnswer::List(answer.iter().rev().map(|&i| i as f64).collect()),
          QuestionBody::Numeric { answer } => SubmittedAnswer::Number(*answer),
        })
      })
      .collect()
  }

  #[tokio::test]
  async fn chapter_quiz_is_reproducible_with_offset() {
    let state = local_state();
    let a = chapter_quiz(&state, "h1b", Some(12)).await;
    let b = chapter_quiz(&state, "h1b", Some(12)).await;
    assert_ne!(a.quiz_id, b.quiz_id);
    assert_eq!(a.quiz.items, b.quiz.items);
    assert_eq!(a.quiz.origin, "synthesized");
    assert_eq!(a.quiz.items.len(), 2);
  }

  #[tokio::test]
  async fn random_offset_is_reported() {
    let state = local_state();
    let served = chapter_quiz(&state, "f1", None).await;
    assert!(served.quiz.seed_offset < SEED_OFFSET_RANGE);
    let again = chapter_quiz(&state, "f1", Some(served.quiz.seed_offset)).await;
    assert_eq!(served.quiz.items, again.quiz.items);
  }

  #[tokio::test]
  async fn unknown_lesson_still_gets_a_quiz() {
    let served = chapter_quiz(&local_state(), "no-such-lesson", Some(0)).await;
    assert_eq!(served.quiz.origin, "presence_check");
    assert_eq!(served.quiz.items.len(), 5);
  }

  #[tokio::test]
  async fn default_exam_has_configured_size() {
    let state = local_state();
    let served = final_exam(&state, None, Some(0)).await;
    assert_eq!(served.quiz.items.len(), 35);
    assert_eq!(served.quiz.scope, IssuedScope::Exam { size: 35 });
    let clamped = final_exam(&state, Some(10_000), Some(0)).await;
    assert_eq!(clamped.quiz.scope, IssuedScope::Exam { size: MAX_EXAM_SIZE });
  }

  #[tokio::test]
  async fn grades_against_served_items() {
    let state = local_state();
    let served = final_exam(&state, Some(12), Some(1)).await;
    let graded = grade_submission(&state, served.quiz_id, &perfect_answers(&served.quiz)).await.unwrap();
    assert_eq!(graded.source, "local");
    assert_eq!(graded.summary.total, 12);
    assert_eq!(graded.summary.score, 12);

    let blank = grade_submission(&state, served.quiz_id, &[]).await.unwrap();
    assert_eq!(blank.summary.score, 0);
  }

  #[tokio::test]
  async fn regrading_a_quiz_gives_the_same_summary() {
    let state = local_state();
    let served = chapter_quiz(&state, "naturalization", Some(9)).await;
    let answers = vec![Some(SubmittedAnswer::Number(0.0)), None];
    let first = grade_submission(&state, served.quiz_id, &answers).await.unwrap();
    let second = grade_submission(&state, served.quiz_id, &answers).await.unwrap();
    assert_eq!(first.summary, second.summary);
    assert!(state.get_issued(&served.quiz_id).await.is_some());
  }

  #[tokio::test]
  async fn unknown_quiz_id_is_an_error() {
    let err = grade_submission(&local_state(), Uuid::new_v4(), &[]).await.unwrap_err();
    assert!(matches!(err, ServiceError::UnknownQuiz(_)));
  }

  #[tokio::test]
  async fn upstream_failure_falls_back_locally() {
    let remote = RemoteStudyAids::new("http://127.0.0.1:9".into(), None);
    let state = AppState::from_parts(StudyAidsConfig::default(), remote);
    let served = chapter_quiz(&state, "eb5", Some(3)).await;
    assert_eq!(served.quiz.origin, "synthesized");
    let graded = grade_submission(&state, served.quiz_id, &perfect_answers(&served.quiz)).await.unwrap();
    assert_eq!(graded.source, "local");
    assert_eq!(graded.summary.score, graded.summary.total);
  }
}
