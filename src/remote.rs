//! Minimal client for the upstream study-aids REST backend.
//!
//! The upstream owns the authoritative lesson catalog and can serve quizzes, exams and grades
//! itself. Every call here may fail; callers in `logic.rs` fall back to the local engine.
//! Calls are instrumented and log status and sizes (not contents). The token is never logged.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::{Lesson, QuestionItem, SubmissionSummary, SubmittedAnswer};
use crate::util::trunc_for_log;

pub const API_URL_ENV: &str = "STUDY_AIDS_API_URL";
pub const API_TOKEN_ENV: &str = "STUDY_AIDS_API_TOKEN";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT_VALUE: &str = "study-aids-backend/0.1";

#[derive(Debug, Error)]
pub enum RemoteError {
  #[error("upstream request failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("upstream HTTP {status}: {message}")]
  Status { status: StatusCode, message: String },
  #[error("invalid upstream payload: {0}")]
  Invalid(String),
}

#[derive(Clone)]
pub struct RemoteStudyAids {
  client: reqwest::Client,
  pub base_url: String,
  token: Option<String>,
}

#[derive(Deserialize)]
struct QuestionsEnvelope {
  questions: Vec<QuestionItem>,
}

#[derive(Serialize)]
struct GradeRequest<'a> {
  items: &'a [QuestionItem],
  answers: &'a [Option<SubmittedAnswer>],
}

impl RemoteStudyAids {
  /// Construct the client if STUDY_AIDS_API_URL is set; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let base_url = std::env::var(API_URL_ENV).ok()?;
    let token = std::env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty());
    Self::new(base_url, token)
  }

  pub fn new(base_url: String, token: Option<String>) -> Option<Self> {
    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build().ok()?;
    Some(Self { client, base_url: base_url.trim_end_matches('/').to_string(), token })
  }

  fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    let builder = builder.header(USER_AGENT, USER_AGENT_VALUE).header(CONTENT_TYPE, "application/json");
    match &self.token {
      Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
      None => builder,
    }
  }

  async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, RemoteError> {
    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      let message = extract_upstream_error(&body).unwrap_or_else(|| trunc_for_log(&body, 200));
      return Err(RemoteError::Status { status, message });
    }
    Ok(res.json::<T>().await?)
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, RemoteError> {
    let url = format!("{}{}", self.base_url, path);
    let res = self.request(self.client.get(&url)).query(query).send().await?;
    Self::read_json(res).await
  }

  /// Upstream catalog, in teaching order.
  #[instrument(level = "info", skip(self))]
  pub async fn fetch_lessons(&self) -> Result<Vec<Lesson>, RemoteError> {
    let start = std::time::Instant::now();
    let lessons: Vec<Lesson> = self.get_json("/lessons", &[]).await?;
    info!(target: "study_aids", elapsed = ?start.elapsed(), lessons = lessons.len(), "Fetched upstream lessons");
    if lessons.is_empty() {
      return Err(RemoteError::Invalid("empty lesson list".into()));
    }
    Ok(lessons)
  }

  #[instrument(level = "info", skip(self))]
  pub async fn fetch_chapter_quiz(&self, lesson_id: &str, seed_offset: u32) -> Result<Vec<QuestionItem>, RemoteError> {
    let path = format!("/study-aids/chapters/{lesson_id}/quiz");
    let env: QuestionsEnvelope = self.get_json(&path, &[("seedOffset", seed_offset.to_string())]).await?;
    checked_items(env.questions)
  }

  #[instrument(level = "info", skip(self))]
  pub async fn fetch_exam(&self, size: usize, seed_offset: u32) -> Result<Vec<QuestionItem>, RemoteError> {
    let query = [("size", size.to_string()), ("seedOffset", seed_offset.to_string())];
    let env: QuestionsEnvelope = self.get_json("/study-aids/exam", &query).await?;
    if env.questions.len() > size {
      return Err(RemoteError::Invalid(format!("exam has {} items, requested {size}", env.questions.len())));
    }
    checked_items(env.questions)
  }

  #[instrument(level = "info", skip(self, items, answers), fields(items = items.len(), answers = answers.len()))]
  pub async fn grade(&self, items: &[QuestionItem], answers: &[Option<SubmittedAnswer>]) -> Result<SubmissionSummary, RemoteError> {
    let url = format!("{}/study-aids/grade", self.base_url);
    let res = self.request(self.client.post(&url)).json(&GradeRequest { items, answers }).send().await?;
    let summary: SubmissionSummary = Self::read_json(res).await?;
    if summary.total != items.len() || summary.results.len() != items.len() || summary.score > summary.total {
      return Err(RemoteError::Invalid(format!(
        "summary total={} results={} score={} for {} items",
        summary.total,
        summary.results.len(),
        summary.score,
        items.len()
      )));
    }
    Ok(summary)
  }
}

/// Remote items must satisfy the same answer-key invariants as local ones, and a quiz is never empty.
fn checked_items(items: Vec<QuestionItem>) -> Result<Vec<QuestionItem>, RemoteError> {
  if items.is_empty() {
    return Err(RemoteError::Invalid("empty question list".into()));
  }
  for item in &items {
    item.validate().map_err(|e| RemoteError::Invalid(format!("item {}: {e}", item.id)))?;
  }
  Ok(items)
}

/// Try to extract a clean error message from an upstream error body (`{"error": "..."}` or
/// `{"message": "..."}`).
fn extract_upstream_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EBody {
    #[serde(default)] error: Option<String>,
    #[serde(default)] message: Option<String>,
  }
  let parsed = serde_json::from_str::<EBody>(body).ok()?;
  parsed.error.or(parsed.message)
}
