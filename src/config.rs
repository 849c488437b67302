//! Loading service configuration (engine settings, optional lesson catalog, curated bank) from TOML.
//!
//! Schema:
//! ```toml
//! [engine]
//! max_per_lesson = 2
//! exam_size = 35
//! issued_capacity = 1024
//!
//! [[lessons]]
//! id = "h1b"
//! number = 1
//! title = "H-1B Specialty Occupations"
//!
//! [[bank.h1b]]
//! id = "h1b-q1"
//! kind = "single-choice"
//! prompt = "..."
//! options = ["...", "..."]
//! answer = 0
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::{Lesson, QuestionItem};
use crate::engine::{DEFAULT_EXAM_SIZE, DEFAULT_MAX_PER_LESSON};

pub const CONFIG_PATH_ENV: &str = "STUDY_AIDS_CONFIG_PATH";
const DEFAULT_ISSUED_CAPACITY: usize = 1024;
/// Upper bound for `[engine] max_per_lesson`; synthesis pads every slot, so it must stay small.
pub const MAX_PER_LESSON_LIMIT: usize = 20;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct StudyAidsConfig {
  #[serde(default)]
  pub engine: EngineSettings,
  /// Replaces the built-in catalog when non-empty.
  #[serde(default)]
  pub lessons: Vec<Lesson>,
  /// Curated items keyed by lesson id.
  #[serde(default)]
  pub bank: HashMap<String, Vec<QuestionItem>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineSettings {
  pub max_per_lesson: usize,
  pub exam_size: usize,
  /// How many issued quizzes are remembered for grading before the oldest is evicted.
  pub issued_capacity: usize,
}

impl Default for EngineSettings {
  fn default() -> Self {
    Self {
      max_per_lesson: DEFAULT_MAX_PER_LESSON,
      exam_size: DEFAULT_EXAM_SIZE,
      issued_capacity: DEFAULT_ISSUED_CAPACITY,
    }
  }
}

/// Attempt to load `StudyAidsConfig` from STUDY_AIDS_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<StudyAidsConfig> {
  let path = std::env::var(CONFIG_PATH_ENV).ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "study_aids", %path, lessons = cfg.lessons.len(), bank_lessons = cfg.bank.len(), "Loaded study aids config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "study_aids", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "study_aids", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

pub fn parse_config(raw: &str) -> Result<StudyAidsConfig, toml::de::Error> {
  let mut cfg = toml::from_str::<StudyAidsConfig>(raw)?;
  if cfg.engine.max_per_lesson > MAX_PER_LESSON_LIMIT {
    warn!(target: "study_aids", requested = cfg.engine.max_per_lesson, max = MAX_PER_LESSON_LIMIT, "max_per_lesson clamped");
    cfg.engine.max_per_lesson = MAX_PER_LESSON_LIMIT;
  }
  Ok(cfg)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuestionBody;

  #[test]
  fn empty_file_uses_defaults() {
    let cfg = parse_config("").unwrap();
    assert_eq!(cfg.engine, EngineSettings::default());
    assert_eq!(cfg.engine.exam_size, 35);
    assert_eq!(cfg.engine.max_per_lesson, 2);
    assert!(cfg.lessons.is_empty());
    assert!(cfg.bank.is_empty());
  }

  #[test]
  fn parses_lessons_and_bank() {
    let raw = r#"
      [engine]
      exam_size = 20

      [[lessons]]
      id = "h1b"
      number = 1
      title = "H-1B Specialty Occupations"
      objectives = ["Identify the degree requirement"]
      teachingPoints = ["Employer files the petition", "Annual cap applies"]
      tags = ["nonimmigrant"]
      resources = [{ label = "USCIS", url = "https://www.uscis.gov/" }]

      [[bank.h1b]]
      id = "h1b-q1"
      kind = "single-choice"
      prompt = "Who files the petition?"
      options = ["Employer", "Worker"]
      answer = 0
      explanation = "The U.S. employer is the petitioner."

      [[bank.h1b]]
      id = "h1b-q2"
      kind = "numeric"
      prompt = "Maximum total years in H-1B status?"
      answer = 6
    "#;
    let cfg = parse_config(raw).unwrap();
    assert_eq!(cfg.engine.exam_size, 20);
    assert_eq!(cfg.engine.max_per_lesson, 2);

    let lesson = &cfg.lessons[0];
    assert_eq!(lesson.teaching_points.len(), 2);
    assert!(lesson.summary.is_empty());
    assert_eq!(lesson.resources[0].label, "USCIS");

    let bank = &cfg.bank["h1b"];
    assert_eq!(bank.len(), 2);
    assert_eq!(bank[0].body, QuestionBody::SingleChoice { options: vec!["Employer".into(), "Worker".into()], answer: 0 });
    assert_eq!(bank[1].body, QuestionBody::Numeric { answer: 6.0 });
  }

  #[test]
  fn oversized_max_per_lesson_is_clamped() {
    let cfg = parse_config("[engine]\nmax_per_lesson = 1000000\n").unwrap();
    assert_eq!(cfg.engine.max_per_lesson, MAX_PER_LESSON_LIMIT);
    let cfg = parse_config("[engine]\nmax_per_lesson = 5\n").unwrap();
    assert_eq!(cfg.engine.max_per_lesson, 5);
  }

  #[test]
  fn snake_case_teaching_points_are_accepted() {
    let raw = r#"
      [[lessons]]
      id = "l1"
      number = 1
      teaching_points = ["a", "b"]
    "#;
    let cfg = parse_config(raw).unwrap();
    assert_eq!(cfg.lessons[0].teaching_points, vec!["a", "b"]);
  }
}
