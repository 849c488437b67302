//! Final exam assembly across every lesson in the catalog.
//!
//! Slots are split evenly; when the size does not divide the lesson count, the earliest
//! lessons in catalog order take one extra item each. Each lesson's pool is its curated items
//! followed by synthesized ones, shuffled with a per-lesson seed.

use tracing::debug;

use crate::catalog::{Catalog, CuratedBank};
use crate::domain::QuestionItem;
use crate::engine::sequence::seeded_shuffle;
use crate::engine::synthesize::synthesize;

pub const DEFAULT_EXAM_SIZE: usize = 35;
const LEFTOVER_SEED_FACTOR: usize = 7;

/// Per-lesson slot counts: `base + 1` for the first `size % lessons`, `base` for the rest.
pub fn allocation(size: usize, lesson_count: usize) -> Vec<usize> {
  if lesson_count == 0 {
    return Vec::new();
  }
  let base = size / lesson_count;
  let remainder = size - base * lesson_count;
  (0..lesson_count).map(|idx| base + usize::from(idx < remainder)).collect()
}

/// Exactly `min(size, achievable)` items spanning the catalog.
pub fn assemble_exam(catalog: &Catalog, bank: &CuratedBank, size: usize, seed_offset: u32) -> Vec<QuestionItem> {
  let lesson_count = catalog.len();
  let targets = allocation(size, lesson_count);

  let mut exam = Vec::new();
  let mut leftovers: Vec<Vec<QuestionItem>> = Vec::with_capacity(lesson_count);

  for (idx, (lesson, &target)) in catalog.lessons().iter().zip(&targets).enumerate() {
    let mut pool = bank.get(&lesson.id).to_vec();
    if pool.len() < target {
      pool.extend(synthesize(lesson, catalog, target, seed_offset));
    }

    let mut pool = seeded_shuffle(&pool, (lesson_count + idx) as u32);
    let take = target.min(pool.len());
    let rest = pool.split_off(take);
    debug!(target: "assessment", lesson_id = %lesson.id, target, taken = pool.len(), spare = rest.len(), "Exam lesson pool");
    exam.extend(pool);
    leftovers.push(rest);
  }

  if exam.len() < size {
    fill_from_leftovers(&mut exam, leftovers, size, lesson_count);
  }

  exam.truncate(size);
  exam
}

/// Tops `exam` up to `size` from each lesson's unused items, shuffled per lesson with
/// `lesson_count * 7 + idx` and concatenated in catalog order.
fn fill_from_leftovers(exam: &mut Vec<QuestionItem>, leftovers: Vec<Vec<QuestionItem>>, size: usize, lesson_count: usize) {
  let combined: Vec<QuestionItem> = leftovers
    .iter()
    .enumerate()
    .flat_map(|(idx, rest)| seeded_shuffle(rest, (lesson_count * LEFTOVER_SEED_FACTOR + idx) as u32))
    .collect();
  let missing = size.saturating_sub(exam.len());
  debug!(target: "assessment", missing, available = combined.len(), "Filling exam shortfall from leftovers");
  exam.extend(combined.into_iter().take(missing));
}
