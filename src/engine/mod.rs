//! Deterministic assessment engine: seeded shuffling, question synthesis, chapter quiz and
//! exam assembly, grading. Pure functions over an injected catalog and curated bank.

pub mod chapter;
pub mod exam;
pub mod grade;
pub mod sequence;
pub mod synthesize;

pub use chapter::chapter_quiz;
pub use exam::{assemble_exam, DEFAULT_EXAM_SIZE};
pub use grade::grade;
pub use synthesize::DEFAULT_MAX_PER_LESSON;
