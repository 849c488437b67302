//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//! Answer keys never leave the server; explanations are revealed with the grade.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{GradeResult, Lesson, QuestionBody, QuestionItem, SubmittedAnswer};
use crate::logic::{GradedQuiz, ServedQuiz};
use crate::state::IssuedScope;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ChapterQuiz {
        #[serde(rename = "lessonId")]
        lesson_id: String,
        #[serde(default, rename = "seedOffset")]
        seed_offset: Option<u32>,
    },
    FinalExam {
        #[serde(default)]
        size: Option<usize>,
        #[serde(default, rename = "seedOffset")]
        seed_offset: Option<u32>,
    },
    SubmitAnswers {
        #[serde(rename = "quizId")]
        quiz_id: Uuid,
        #[serde(default)]
        answers: Vec<Option<SubmittedAnswer>>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Quiz { quiz: QuizOut },
    GradeResult { result: GradeOut },
    Error { message: String },
}

/// A question as shown to the learner: no answer key, no explanation.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub id: String,
    pub kind: &'static str,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl From<&QuestionItem> for QuestionOut {
    fn from(q: &QuestionItem) -> Self {
        let options = match &q.body {
            QuestionBody::SingleChoice { options, .. } | QuestionBody::MultiChoice { options, .. } => Some(options.clone()),
            QuestionBody::Numeric { .. } => None,
        };
        Self { id: q.id.clone(), kind: q.kind_name(), prompt: q.prompt.clone(), options }
    }
}

/// DTO used by both WS and HTTP for quiz and exam delivery.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOut {
    pub quiz_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
    pub origin: &'static str,
    pub seed_offset: u32,
    pub total: usize,
    pub questions: Vec<QuestionOut>,
}

pub fn quiz_out(served: &ServedQuiz) -> QuizOut {
    let lesson_id = match &served.quiz.scope {
        IssuedScope::Chapter { lesson_id } => Some(lesson_id.clone()),
        IssuedScope::Exam { .. } => None,
    };
    QuizOut {
        quiz_id: served.quiz_id,
        lesson_id,
        origin: served.quiz.origin,
        seed_offset: served.quiz.seed_offset,
        total: served.quiz.items.len(),
        questions: served.quiz.items.iter().map(QuestionOut::from).collect(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOut {
    pub quiz_id: Uuid,
    pub source: &'static str,
    pub total: usize,
    pub score: usize,
    pub results: Vec<GradeResult>,
}

pub fn grade_out(graded: GradedQuiz) -> GradeOut {
    GradeOut {
        quiz_id: graded.quiz_id,
        source: graded.source,
        total: graded.summary.total,
        score: graded.summary.score,
        results: graded.summary.results,
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuery {
    pub lesson_id: String,
    #[serde(default)]
    pub seed_offset: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuery {
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub seed_offset: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeIn {
    pub quiz_id: Uuid,
    #[serde(default)]
    pub answers: Vec<Option<SubmittedAnswer>>,
}

#[derive(Debug, Serialize)]
pub struct LessonOut {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub tags: Vec<String>,
}

impl From<&Lesson> for LessonOut {
    fn from(l: &Lesson) -> Self {
        Self { id: l.id.clone(), number: l.number, title: l.title.clone(), tags: l.tags.clone() }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshOut {
    pub ok: bool,
    pub lessons: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub lessons: usize,
}
