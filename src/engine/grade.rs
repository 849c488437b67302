//! Grading of submitted answers against question items.
//!
//! Missing, null and wrongly shaped answers are simply incorrect; grading never errors.

use tracing::debug;

use crate::domain::{GradeResult, QuestionBody, QuestionItem, SubmissionSummary, SubmittedAnswer};

/// Grade `answers` against `items` by position. Extra answers are ignored.
pub fn grade(items: &[QuestionItem], answers: &[Option<SubmittedAnswer>]) -> SubmissionSummary {
  let results: Vec<GradeResult> = items
    .iter()
    .enumerate()
    .map(|(i, item)| GradeResult {
      question_id: item.id.clone(),
      correct: is_correct(&item.body, answers.get(i).and_then(Option::as_ref)),
      explanation: item.explanation.clone(),
    })
    .collect();

  let score = results.iter().filter(|r| r.correct).count();
  debug!(target: "assessment", total = items.len(), score, submitted = answers.len(), "Graded submission");
  SubmissionSummary { total: items.len(), score, results }
}

fn is_correct(body: &QuestionBody, answer: Option<&SubmittedAnswer>) -> bool {
  match (body, answer) {
    (QuestionBody::SingleChoice { answer: key, .. }, Some(SubmittedAnswer::Number(n))) => *n == *key as f64,
    (QuestionBody::MultiChoice { answer: key, .. }, Some(SubmittedAnswer::List(picked))) => same_index_set(key, picked),
    (QuestionBody::Numeric { answer: key }, Some(SubmittedAnswer::Number(n))) => n == key,
    _ => false,
  }
}

/// Order-independent equality; duplicates count.
fn same_index_set(key: &[usize], picked: &[f64]) -> bool {
  if key.len() != picked.len() {
    return false;
  }
  let mut expected: Vec<f64> = key.iter().map(|&k| k as f64).collect();
  let mut got = picked.to_vec();
  expected.sort_by(f64::total_cmp);
  got.sort_by(f64::total_cmp);
  expected == got
}

#[cfg(test)]
mod tests {
  use super::*;

  fn items() -> Vec<QuestionItem> {
    let opts: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    vec![
      QuestionItem::single_choice("s".into(), "Single".into(), opts.clone(), 1, Some("b is right".into())),
      QuestionItem::multi_choice("m".into(), "Multi".into(), opts, vec![0, 1], None),
      QuestionItem { id: "n".into(), prompt: "Numeric".into(), body: QuestionBody::Numeric { answer: 5.0 }, explanation: None },
    ]
  }

  fn parse(raw: &str) -> Vec<Option<SubmittedAnswer>> {
    serde_json::from_str(raw).unwrap()
  }

  #[test]
  fn all_kinds_correct() {
    let summary = grade(&items(), &parse("[1, [0, 1], 5]"));
    assert_eq!(summary.total, 3);
    assert_eq!(summary.score, 3);
    assert!(summary.results.iter().all(|r| r.correct));
    assert_eq!(summary.results[0].explanation.as_deref(), Some("b is right"));
    let ids: Vec<&str> = summary.results.iter().map(|r| r.question_id.as_str()).collect();
    assert_eq!(ids, vec!["s", "m", "n"]);
  }

  #[test]
  fn multi_choice_ignores_order_but_not_membership() {
    let opts: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    let item = vec![QuestionItem::multi_choice("m".into(), "p".into(), opts, vec![0, 2], None)];
    assert_eq!(grade(&item, &parse("[[2, 0]]")).score, 1);
    assert_eq!(grade(&item, &parse("[[0]]")).score, 0);
    assert_eq!(grade(&item, &parse("[[0, 2, 2]]")).score, 0);
    assert_eq!(grade(&item, &parse("[[0, 0]]")).score, 0);
  }

  #[test]
  fn missing_and_null_answers_are_wrong() {
    let summary = grade(&items(), &parse("[null, [1, 0]]"));
    assert_eq!(summary.total, 3);
    assert_eq!(summary.score, 1);
    assert_eq!(summary.results.iter().map(|r| r.correct).collect::<Vec<_>>(), vec![false, true, false]);
  }

  #[test]
  fn wrong_shapes_never_match() {
    let summary = grade(&items(), &parse(r#"[[1], 0, "5"]"#));
    assert_eq!(summary.score, 0);
    assert_eq!(summary.total, 3);
  }

  #[test]
  fn numeric_is_exact() {
    assert_eq!(grade(&items()[2..], &parse("[5.0]")).score, 1);
    assert_eq!(grade(&items()[2..], &parse("[5.0001]")).score, 0);
    assert_eq!(grade(&items()[..1], &parse("[1.5]")).score, 0);
  }

  #[test]
  fn grading_is_idempotent() {
    let answers = parse("[2, [1, 0], 4]");
    assert_eq!(grade(&items(), &answers), grade(&items(), &answers));
  }

  #[test]
  fn empty_inputs() {
    let summary = grade(&[], &parse("[1, 2]"));
    assert_eq!((summary.total, summary.score), (0, 0));
    assert!(summary.results.is_empty());
  }
}
