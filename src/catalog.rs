//! Read-only content snapshots handed to the assessment engine.
//!
//! `Catalog` is the ordered lesson list; `CuratedBank` maps lesson ids to pre-authored items.
//! Both are built once (config, seeds or upstream) and shared behind `Arc` afterwards.

use std::collections::{HashMap, HashSet};

use tracing::{error, warn};

use crate::domain::{Lesson, QuestionItem};

#[derive(Clone, Debug, Default)]
pub struct Catalog {
  lessons: Vec<Lesson>,
}

impl Catalog {
  /// Keeps catalog order; a repeated id keeps its first occurrence.
  pub fn new(lessons: Vec<Lesson>) -> Self {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(lessons.len());
    for lesson in lessons {
      if !seen.insert(lesson.id.clone()) {
        warn!(target: "study_aids", id = %lesson.id, "Dropping duplicate lesson id from catalog");
        continue;
      }
      if lesson.number == 0 {
        warn!(target: "study_aids", id = %lesson.id, "Lesson ordinal should be positive");
      }
      kept.push(lesson);
    }
    Self { lessons: kept }
  }

  pub fn lessons(&self) -> &[Lesson] {
    &self.lessons
  }

  pub fn len(&self) -> usize {
    self.lessons.len()
  }

  pub fn get(&self, id: &str) -> Option<&Lesson> {
    self.lessons.iter().find(|l| l.id == id)
  }

  /// Every lesson except `id`, in catalog order.
  pub fn siblings<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Lesson> + 'a {
    self.lessons.iter().filter(move |l| l.id != id)
  }
}

#[derive(Clone, Debug, Default)]
pub struct CuratedBank {
  entries: HashMap<String, Vec<QuestionItem>>,
}

impl CuratedBank {
  /// Items breaking the answer-key invariants are dropped and logged.
  pub fn new(entries: HashMap<String, Vec<QuestionItem>>) -> Self {
    let entries = entries
      .into_iter()
      .map(|(lesson_id, items)| {
        let valid: Vec<QuestionItem> = items
          .into_iter()
          .filter(|item| match item.validate() {
            Ok(()) => true,
            Err(e) => {
              error!(target: "study_aids", %lesson_id, item = %item.id, error = %e, "Skipping curated item");
              false
            }
          })
          .collect();
        (lesson_id, valid)
      })
      .collect();
    Self { entries }
  }

  /// Curated items for a lesson; empty when the bank has no entry.
  pub fn get(&self, lesson_id: &str) -> &[QuestionItem] {
    self.entries.get(lesson_id).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn lesson_count(&self) -> usize {
    self.entries.values().filter(|items| !items.is_empty()).count()
  }

  pub fn item_count(&self) -> usize {
    self.entries.values().map(Vec::len).sum()
  }
}
