//! LessonCore - EMS lesson prompt composition
//!
//! Pure, side-effect-free building blocks for generating Grade 7-9 Economic and
//! Management Sciences lesson material prompts.
//!
//! # Modules
//!
//! - [`curriculum`] - Grades and the topics taught in each
//! - [`params`] - Parameter enums, the validated [`ParameterSet`] and its wire form
//! - [`vocabulary`] - Objectives, scaffolding strategies, Bloom's guidance, local context
//! - [`composer`] - Fills the per-type template from the vocabulary tables
//! - [`scorer`] - Keyword-heuristic fallback quality scoring
//!
//! Every table is `&'static` data and every function reads only its inputs and
//! those tables, so all of it can be called from concurrent requests freely.
//!
//! # Example
//!
//! ```
//! use lessoncore::{BloomsLevel, LearningObjectType, ParameterSet, ScaffoldingLevel, compose, score_fallback};
//!
//! let params = ParameterSet {
//!     grade: 7,
//!     topic: "The Economy".to_string(),
//!     learning_object_type: LearningObjectType::Quiz,
//!     scaffolding_level: ScaffoldingLevel::HighSupport,
//!     blooms_level: BloomsLevel::Remember,
//!     include_local_context: false,
//! };
//!
//! let prompt = compose(&params);
//! assert!(prompt.starts_with("Create a comprehensive quiz for Grade 7 EMS"));
//!
//! let score = score_fallback(&prompt);
//! assert!(score.meets_minimum());
//! ```

pub mod composer;
pub mod curriculum;
mod error;
pub mod params;
pub mod scorer;
pub mod vocabulary;

pub use composer::{Placeholder, UncheckedParameters, compose, compose_raw, template_for};
pub use curriculum::{GradeTopic, all_topics, available_grades, find_topic, topic_by_name, topics_for_grade};
pub use error::{ComposeError, ValidationErrors};
pub use params::{BloomsLevel, LearningObjectType, ParameterRequest, ParameterSet, ScaffoldingLevel};
pub use scorer::{
    CriteriaScores, Criterion, CriterionScore, MAX_SCORE, ScoreColor, ScoreResult, improvement_suggestions,
    score_fallback, validate_criterion_score, validate_total_score,
};
