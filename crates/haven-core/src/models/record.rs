use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answer::AnswerStore;
use super::recommendation::ScoredArea;

/// Snapshot of a finished assessment: what was answered and what it
/// recommended.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub completed_at: jiff::Timestamp,
    pub answers: AnswerStore,
    pub recommendations: Vec<ScoredArea>,
}

impl AssessmentRecord {
    pub fn new(answers: AnswerStore, recommendations: Vec<ScoredArea>) -> Self {
        Self {
            id: Uuid::new_v4(),
            completed_at: jiff::Timestamp::now(),
            answers,
            recommendations,
        }
    }
}
