//! Domain models: lessons (read-only content), question items, submitted answers and grades.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum option count for any multi-choice item.
pub const MIN_MULTI_OPTIONS: usize = 3;
/// Minimum number of correct indices in a multi-choice answer key.
pub const MIN_MULTI_CORRECT: usize = 2;

/// External link attached to a lesson (policy manual page, form, etc.).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceLink {
  pub label: String,
  pub url: String,
}

/// Structured content unit. Supplied by the catalog loader; never mutated here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
  pub id: String,
  /// Display ordinal (1-based). Also feeds seed derivation; never used for indexing.
  pub number: u32,
  #[serde(default)] pub title: String,
  #[serde(default)] pub objectives: Vec<String>,
  #[serde(default)] pub summary: String,
  #[serde(default, alias = "teaching_points")] pub teaching_points: Vec<String>,
  #[serde(default)] pub tags: Vec<String>,
  #[serde(default)] pub resources: Vec<ResourceLink>,
}

/// Kind-specific body of a question. Each variant only carries what its kind needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum QuestionBody {
  SingleChoice { options: Vec<String>, answer: usize },
  MultiChoice { options: Vec<String>, answer: Vec<usize> },
  Numeric { answer: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionItem {
  pub id: String,
  pub prompt: String,
  #[serde(flatten)]
  pub body: QuestionBody,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
  #[error("answer index {index} out of bounds for {options} options")]
  IndexOutOfBounds { index: usize, options: usize },
  #[error("multi-choice needs at least 3 options, got {0}")]
  TooFewOptions(usize),
  #[error("multi-choice needs at least 2 correct answers and one distractor, got {0} correct")]
  BadCorrectCount(usize),
  #[error("duplicate answer index {0}")]
  DuplicateIndex(usize),
  #[error("numeric answer must be finite")]
  NonFinite,
}

impl QuestionItem {
  pub fn single_choice(id: String, prompt: String, options: Vec<String>, answer: usize, explanation: Option<String>) -> Self {
    Self { id, prompt, body: QuestionBody::SingleChoice { options, answer }, explanation }
  }

  pub fn multi_choice(id: String, prompt: String, options: Vec<String>, answer: Vec<usize>, explanation: Option<String>) -> Self {
    Self { id, prompt, body: QuestionBody::MultiChoice { options, answer }, explanation }
  }

  /// "True"/"False" single-choice item; index 0 is True.
  pub fn true_false(id: String, prompt: String, truth: bool, explanation: Option<String>) -> Self {
    let options = vec!["True".to_string(), "False".to_string()];
    Self::single_choice(id, prompt, options, if truth { 0 } else { 1 }, explanation)
  }

  pub fn kind_name(&self) -> &'static str {
    match self.body {
      QuestionBody::SingleChoice { .. } => "single-choice",
      QuestionBody::MultiChoice { .. } => "multi-choice",
      QuestionBody::Numeric { .. } => "numeric",
    }
  }

  /// Checks the answer-key invariants. Used on curated and remote items before serving them.
  pub fn validate(&self) -> Result<(), ItemError> {
    match &self.body {
      QuestionBody::SingleChoice { options, answer } => {
        if *answer >= options.len() {
          return Err(ItemError::IndexOutOfBounds { index: *answer, options: options.len() });
        }
      }
      QuestionBody::MultiChoice { options, answer } => {
        if options.len() < MIN_MULTI_OPTIONS {
          return Err(ItemError::TooFewOptions(options.len()));
        }
        if answer.len() < MIN_MULTI_CORRECT || answer.len() >= options.len() {
          return Err(ItemError::BadCorrectCount(answer.len()));
        }
        let mut seen = vec![false; options.len()];
        for &idx in answer {
          if idx >= options.len() {
            return Err(ItemError::IndexOutOfBounds { index: idx, options: options.len() });
          }
          if seen[idx] {
            return Err(ItemError::DuplicateIndex(idx));
          }
          seen[idx] = true;
        }
      }
      QuestionBody::Numeric { answer } => {
        if !answer.is_finite() {
          return Err(ItemError::NonFinite);
        }
      }
    }
    Ok(())
  }
}

/// A learner's answer for one question as it arrives over the wire:
/// a number, a list of numbers, or anything else (graded incorrect).
/// Unanswered questions are `None` at the `Option<SubmittedAnswer>` level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
  Number(f64),
  List(Vec<f64>),
  Malformed(serde_json::Value),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
  pub question_id: String,
  pub correct: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionSummary {
  pub total: usize,
  pub score: usize,
  pub results: Vec<GradeResult>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn item_json_is_kind_tagged() {
    let item = QuestionItem::multi_choice(
      "eb1-c-m1".into(),
      "Pick two".into(),
      vec!["a".into(), "b".into(), "c".into()],
      vec![0, 2],
      None,
    );
    let v = serde_json::to_value(&item).unwrap();
    assert_eq!(v["kind"], "multi-choice");
    assert_eq!(v["answer"], serde_json::json!([0, 2]));
    assert!(v.get("explanation").is_none());

    let back: QuestionItem = serde_json::from_value(v).unwrap();
    assert_eq!(back, item);
  }

  #[test]
  fn numeric_item_has_no_options() {
    let raw = r#"{"id":"q","prompt":"How many?","kind":"numeric","answer":5}"#;
    let item: QuestionItem = serde_json::from_str(raw).unwrap();
    assert_eq!(item.body, QuestionBody::Numeric { answer: 5.0 });
    assert_eq!(item.kind_name(), "numeric");
  }

  #[test]
  fn validate_rejects_broken_keys() {
    let single = QuestionItem::single_choice("s".into(), "p".into(), vec!["x".into()], 1, None);
    assert_eq!(single.validate(), Err(ItemError::IndexOutOfBounds { index: 1, options: 1 }));

    let opts: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let one_correct = QuestionItem::multi_choice("m".into(), "p".into(), opts.clone(), vec![1], None);
    assert_eq!(one_correct.validate(), Err(ItemError::BadCorrectCount(1)));

    let all_correct = QuestionItem::multi_choice("m".into(), "p".into(), opts.clone(), vec![0, 1, 2], None);
    assert_eq!(all_correct.validate(), Err(ItemError::BadCorrectCount(3)));

    let dup = QuestionItem::multi_choice("m".into(), "p".into(), opts, vec![1, 1], None);
    assert_eq!(dup.validate(), Err(ItemError::DuplicateIndex(1)));

    let two = QuestionItem::multi_choice("m".into(), "p".into(), vec!["a".into(), "b".into()], vec![0, 1], None);
    assert_eq!(two.validate(), Err(ItemError::TooFewOptions(2)));
  }

  #[test]
  fn submitted_answers_parse_every_shape() {
    let raw = r#"[1, [0, 2], null, "x", 2.5]"#;
    let answers: Vec<Option<SubmittedAnswer>> = serde_json::from_str(raw).unwrap();
    assert_eq!(answers[0], Some(SubmittedAnswer::Number(1.0)));
    assert_eq!(answers[1], Some(SubmittedAnswer::List(vec![0.0, 2.0])));
    assert_eq!(answers[2], None);
    assert!(matches!(answers[3], Some(SubmittedAnswer::Malformed(_))));
    assert_eq!(answers[4], Some(SubmittedAnswer::Number(2.5)));
  }
}
