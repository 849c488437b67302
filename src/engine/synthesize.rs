//! Question synthesis from lesson metadata.
//!
//! Items are built only from the target lesson's own fields, with sibling lessons supplying
//! distractors. Every shuffle is seeded from the catalog size, the lesson ordinal and a
//! caller-chosen offset, so the same catalog revision always yields the same quiz.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::domain::{Lesson, QuestionItem, MIN_MULTI_CORRECT, MIN_MULTI_OPTIONS};
use crate::engine::sequence::seeded_shuffle;

pub const DEFAULT_MAX_PER_LESSON: usize = 2;

/// A lesson needs this many teaching points before a multi-choice item is attempted.
pub const MIN_TEACHING_POINTS: usize = 2;
/// A lesson needs this many objectives before an objective-matching item is attempted.
pub const MIN_OBJECTIVES: usize = 1;
/// At least one wrong option, otherwise "select all" is trivially every option.
pub const MIN_MULTI_DISTRACTORS: usize = 1;

const TITLE_DISTRACTORS: usize = 3;
const OBJECTIVE_DISTRACTORS: usize = 3;
const MAX_CORRECT_POINTS: usize = 3;
const MAX_MULTI_OPTIONS: usize = 6;

const TITLE_RESHUFFLE_SALT: u32 = 13;
const POINT_POOL_SALT: u32 = 29;
const POINT_RESHUFFLE_SALT: u32 = 31;
const OBJECTIVE_POOL_SALT: u32 = 41;
const OBJECTIVE_RESHUFFLE_SALT: u32 = 43;

/// `catalogSize + lessonOrdinal + seedOffset`, wrapping at 32 bits.
pub fn local_seed(catalog_size: usize, lesson: &Lesson, seed_offset: u32) -> u32 {
  (catalog_size as u32).wrapping_add(lesson.number).wrapping_add(seed_offset)
}

/// Build exactly `max_per_lesson` items for `lesson`.
///
/// Order of preference: title identification, teaching-point selection, objective matching,
/// then tag-presence True/False padding for whatever slots remain.
pub fn synthesize(lesson: &Lesson, catalog: &Catalog, max_per_lesson: usize, seed_offset: u32) -> Vec<QuestionItem> {
  let seed = local_seed(catalog.len(), lesson, seed_offset);
  let siblings: Vec<&Lesson> = catalog.siblings(&lesson.id).collect();
  let mut items = Vec::new();

  if items.len() < max_per_lesson {
    items.extend(title_item(lesson, &siblings, seed));
  }
  if items.len() < max_per_lesson {
    items.extend(teaching_point_item(lesson, &siblings, seed));
  }
  if items.len() < max_per_lesson {
    items.extend(objective_item(lesson, &siblings, seed));
  }

  let mut pad = 1;
  while items.len() < max_per_lesson {
    items.push(tag_presence_item(lesson, pad));
    pad += 1;
  }

  items.truncate(max_per_lesson);
  items
}

/// Title if present, else "Chapter N".
pub fn lesson_label(lesson: &Lesson) -> String {
  if lesson.title.trim().is_empty() {
    format!("Chapter {}", lesson.number)
  } else {
    lesson.title.clone()
  }
}

/// Drop repeated texts, keeping the first occurrence in catalog order.
fn distinct<'a>(texts: impl IntoIterator<Item = &'a String>) -> Vec<String> {
  let mut seen = HashSet::new();
  texts.into_iter().filter(|t| seen.insert(*t)).cloned().collect()
}

/// Shuffle `(is_correct, text)` pairs and return the option texts with the correct positions.
fn keyed_options(options: Vec<(bool, String)>, seed: u32) -> (Vec<String>, Vec<usize>) {
  let shuffled = seeded_shuffle(&options, seed);
  let answer = shuffled
    .iter()
    .enumerate()
    .filter(|(_, (correct, _))| *correct)
    .map(|(i, _)| i)
    .collect();
  (shuffled.into_iter().map(|(_, text)| text).collect(), answer)
}

fn title_item(lesson: &Lesson, siblings: &[&Lesson], seed: u32) -> Option<QuestionItem> {
  if lesson.title.trim().is_empty() {
    return None;
  }

  let titles = distinct(siblings.iter().map(|s| &s.title));
  let mut options = vec![(true, lesson.title.clone())];
  options.extend(
    seeded_shuffle(&titles, seed)
      .into_iter()
      .filter(|t| !t.trim().is_empty() && *t != lesson.title)
      .take(TITLE_DISTRACTORS)
      .map(|t| (false, t)),
  );

  let (options, answer) = keyed_options(options, seed.wrapping_add(TITLE_RESHUFFLE_SALT));
  let answer = answer.first().copied()?;
  Some(QuestionItem::single_choice(
    format!("{}-c-t1", lesson.id),
    format!("What is the title of Chapter {}?", lesson.number),
    options,
    answer,
    Some(format!("Chapter {} is titled \"{}\".", lesson.number, lesson.title)),
  ))
}

fn teaching_point_item(lesson: &Lesson, siblings: &[&Lesson], seed: u32) -> Option<QuestionItem> {
  if lesson.teaching_points.len() < MIN_TEACHING_POINTS {
    return None;
  }

  let correct: Vec<String> = lesson.teaching_points.iter().take(MAX_CORRECT_POINTS).cloned().collect();
  let pool: Vec<String> = distinct(siblings.iter().filter_map(|s| s.teaching_points.first()))
    .into_iter()
    .filter(|p| !p.trim().is_empty() && !correct.contains(p))
    .collect();
  let distractors: Vec<String> = seeded_shuffle(&pool, seed.wrapping_add(POINT_POOL_SALT))
    .into_iter()
    .take(MAX_MULTI_OPTIONS.saturating_sub(correct.len()))
    .collect();

  if correct.len() < MIN_MULTI_CORRECT
    || distractors.len() < MIN_MULTI_DISTRACTORS
    || correct.len() + distractors.len() < MIN_MULTI_OPTIONS
  {
    return None;
  }

  let explanation = format!("{} covers: {}.", lesson_label(lesson), correct.join("; "));
  let options: Vec<(bool, String)> = correct
    .into_iter()
    .map(|p| (true, p))
    .chain(distractors.into_iter().map(|d| (false, d)))
    .collect();
  let (options, answer) = keyed_options(options, seed.wrapping_add(POINT_RESHUFFLE_SALT));

  Some(QuestionItem::multi_choice(
    format!("{}-c-m1", lesson.id),
    format!("Which of the following are teaching points of \"{}\"? Select all that apply.", lesson_label(lesson)),
    options,
    answer,
    Some(explanation),
  ))
}

fn objective_item(lesson: &Lesson, siblings: &[&Lesson], seed: u32) -> Option<QuestionItem> {
  if lesson.objectives.len() < MIN_OBJECTIVES {
    return None;
  }
  let objective = lesson.objectives[0].clone();

  let pool: Vec<String> = distinct(siblings.iter().filter_map(|s| s.objectives.first()))
    .into_iter()
    .filter(|o| !o.trim().is_empty() && *o != objective)
    .collect();
  let mut options = vec![(true, objective.clone())];
  options.extend(
    seeded_shuffle(&pool, seed.wrapping_add(OBJECTIVE_POOL_SALT))
      .into_iter()
      .take(OBJECTIVE_DISTRACTORS)
      .map(|o| (false, o)),
  );

  let (options, answer) = keyed_options(options, seed.wrapping_add(OBJECTIVE_RESHUFFLE_SALT));
  let answer = answer.first().copied()?;
  Some(QuestionItem::single_choice(
    format!("{}-c-o1", lesson.id),
    format!("Which learning objective belongs to \"{}\"?", lesson_label(lesson)),
    options,
    answer,
    Some(format!("{} aims to: {}", lesson_label(lesson), objective)),
  ))
}

fn tag_presence_item(lesson: &Lesson, n: usize) -> QuestionItem {
  let has_tags = !lesson.tags.is_empty();
  let explanation = if has_tags {
    format!("Tagged: {}.", lesson.tags.join(", "))
  } else {
    "This lesson carries no tags.".to_string()
  };
  QuestionItem::true_false(
    format!("{}-c-p{}", lesson.id, n),
    format!("\"{}\" has at least one tag.", lesson_label(lesson)),
    has_tags,
    Some(explanation),
  )
}
