//! haven-assessment
//!
//! The self-report assessment: questionnaire catalog, therapy-area scoring,
//! and the controller that walks a respondent through the sections. Pure
//! logic with no I/O.

pub mod catalog;
pub mod error;
pub mod progress;
pub mod rules;
pub mod scoring;
pub mod summary;

pub use progress::AssessmentSession;
pub use scoring::{ScoringEngine, score};
pub use summary::summarize;
