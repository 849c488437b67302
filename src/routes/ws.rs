//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{grade_out, quiz_out, ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "study_aids", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "study_aids", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_json(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "study_aids", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "study_aids", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
async fn reply_json(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "study_aids", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::ChapterQuiz { lesson_id, seed_offset } => {
      let served = chapter_quiz(state, &lesson_id, seed_offset).await;
      info!(target: "study_aids", %lesson_id, quiz_id = %served.quiz_id, "WS chapter quiz served");
      ServerWsMessage::Quiz { quiz: quiz_out(&served) }
    }

    ClientWsMessage::FinalExam { size, seed_offset } => {
      let served = final_exam(state, size, seed_offset).await;
      info!(target: "study_aids", quiz_id = %served.quiz_id, items = served.quiz.items.len(), "WS exam served");
      ServerWsMessage::Quiz { quiz: quiz_out(&served) }
    }

    ClientWsMessage::SubmitAnswers { quiz_id, answers } => match grade_submission(state, quiz_id, &answers).await {
      Ok(graded) => {
        info!(target: "study_aids", %quiz_id, score = graded.summary.score, "WS submission graded");
        ServerWsMessage::GradeResult { result: grade_out(graded) }
      }
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::StudyAidsConfig;

  #[tokio::test]
  async fn quiz_then_grade_over_ws_messages() {
    let state = AppState::from_parts(StudyAidsConfig::default(), None);

    let quiz: serde_json::Value =
      serde_json::from_str(&reply_json(r#"{"type":"chapter_quiz","lessonId":"tn","seedOffset":2}"#, &state).await).unwrap();
    assert_eq!(quiz["type"], "quiz");
    assert_eq!(quiz["quiz"]["total"], 2);
    let quiz_id = quiz["quiz"]["quizId"].as_str().unwrap().to_string();

    let submit = format!(r#"{{"type":"submit_answers","quizId":"{quiz_id}","answers":[]}}"#);
    let graded: serde_json::Value = serde_json::from_str(&reply_json(&submit, &state).await).unwrap();
    assert_eq!(graded["type"], "grade_result");
    assert_eq!(graded["result"]["total"], 2);
    assert_eq!(graded["result"]["score"], 0);
  }

  #[tokio::test]
  async fn bad_messages_get_error_replies() {
    let state = AppState::from_parts(StudyAidsConfig::default(), None);
    let v: serde_json::Value = serde_json::from_str(&reply_json("not json", &state).await).unwrap();
    assert_eq!(v["type"], "error");

    let unknown = r#"{"type":"submit_answers","quizId":"67e55044-10b1-426f-9247-bb680e5fe0c8","answers":[1]}"#;
    let v: serde_json::Value = serde_json::from_str(&reply_json(unknown, &state).await).unwrap();
    assert_eq!(v["type"], "error");
    assert!(v["message"].as_str().unwrap().contains("Unknown quizId"));
  }
}
