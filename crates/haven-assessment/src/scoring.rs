use std::collections::HashSet;

use haven_core::models::answer::AnswerStore;
use haven_core::models::area::TherapyArea;
use haven_core::models::recommendation::ScoredArea;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::therapy_areas;
use crate::error::AssessmentError;
use crate::rules::{ScoringRule, default_rules, is_affirmative};

/// Number of recommendations returned unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 3;

/// Where a keyword was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum KeywordMatch {
    /// The keyword appears in the lower-cased answer text.
    Answer,
    /// The keyword appears in the question id and the answer is affirmative.
    QuestionId,
}

/// One increment to an area's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "source", rename_all = "snake_case")]
#[ts(export)]
pub enum Contribution {
    Keyword {
        question_id: String,
        keyword: String,
        matched: KeywordMatch,
    },
    Rule {
        question_id: String,
        weight: i32,
    },
}

impl Contribution {
    pub fn points(&self) -> i32 {
        match self {
            Contribution::Keyword { .. } => 1,
            Contribution::Rule { weight, .. } => *weight,
        }
    }

    pub fn question_id(&self) -> &str {
        match self {
            Contribution::Keyword { question_id, .. } | Contribution::Rule { question_id, .. } => {
                question_id.as_str()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AreaBreakdown {
    pub area_id: String,
    pub name: String,
    pub score: i32,
    pub contributions: Vec<Contribution>,
}

/// Every area's score with the contributions that produced it, in ranked
/// order. Unlike [`ScoringEngine::rank`], nothing is truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreBreakdown {
    pub areas: Vec<AreaBreakdown>,
}

impl ScoreBreakdown {
    pub fn area(&self, area_id: &str) -> Option<&AreaBreakdown> {
        self.areas.iter().find(|a| a.area_id == area_id)
    }
}

/// Ranks therapy areas against a set of answers.
///
/// Holds a validated area catalog and rule table. Scoring is a pure
/// function of the answers; the engine itself never changes after
/// construction.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    areas: Vec<TherapyArea>,
    rules: Vec<ScoringRule>,
    top_n: usize,
}

impl ScoringEngine {
    pub fn new(areas: Vec<TherapyArea>, rules: Vec<ScoringRule>) -> Result<Self, AssessmentError> {
        validate_catalog(&areas, &rules)?;
        Ok(Self {
            areas,
            rules,
            top_n: DEFAULT_TOP_N,
        })
    }

    /// Engine over the shipped area catalog and rule table.
    pub fn standard() -> Self {
        Self {
            areas: therapy_areas().to_vec(),
            rules: default_rules().to_vec(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Result<Self, AssessmentError> {
        if top_n == 0 {
            return Err(AssessmentError::InvalidTopN);
        }
        self.top_n = top_n;
        Ok(self)
    }

    pub fn areas(&self) -> &[TherapyArea] {
        &self.areas
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Score every area and return the best `top_n`, highest first.
    pub fn rank(&self, answers: &AnswerStore) -> Vec<ScoredArea> {
        rank_areas(&self.areas, &self.rules, answers, self.top_n)
    }

    /// Full per-area breakdown of how `answers` were scored.
    pub fn explain(&self, answers: &AnswerStore) -> ScoreBreakdown {
        let contributions = tally(&self.areas, &self.rules, answers);
        let scores: Vec<i32> = contributions.iter().map(|c| total(c)).collect();

        let mut slots: Vec<Option<Vec<Contribution>>> =
            contributions.into_iter().map(Some).collect();
        let areas = ranked_order(&scores)
            .into_iter()
            .map(|idx| AreaBreakdown {
                area_id: self.areas[idx].id.clone(),
                name: self.areas[idx].name.clone(),
                score: scores[idx],
                contributions: slots[idx].take().unwrap_or_default(),
            })
            .collect();

        ScoreBreakdown { areas }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Score `answers` against `areas` using the built-in rule table and return
/// the top three. Rules that target an area missing from `areas` are
/// skipped.
pub fn score(
    answers: &AnswerStore,
    areas: &[TherapyArea],
) -> Result<Vec<ScoredArea>, AssessmentError> {
    if areas.is_empty() {
        return Err(AssessmentError::EmptyCatalog);
    }
    Ok(rank_areas(areas, default_rules(), answers, DEFAULT_TOP_N))
}

/// Check the invariants the engine relies on.
pub fn validate_catalog(
    areas: &[TherapyArea],
    rules: &[ScoringRule],
) -> Result<(), AssessmentError> {
    if areas.is_empty() {
        return Err(AssessmentError::EmptyCatalog);
    }

    let mut seen = HashSet::new();
    for area in areas {
        if !seen.insert(area.id.as_str()) {
            return Err(AssessmentError::DuplicateArea(area.id.clone()));
        }
        if let Some(keyword) = area
            .keywords
            .iter()
            .find(|k| k.is_empty() || k.to_lowercase() != **k)
        {
            return Err(AssessmentError::InvalidKeyword {
                area_id: area.id.clone(),
                keyword: keyword.clone(),
            });
        }
    }

    for rule in rules {
        if !seen.contains(rule.area_id.as_str()) {
            return Err(AssessmentError::UnknownArea {
                question_id: rule.question_id.clone(),
                area_id: rule.area_id.clone(),
            });
        }
    }

    Ok(())
}

fn rank_areas(
    areas: &[TherapyArea],
    rules: &[ScoringRule],
    answers: &AnswerStore,
    top_n: usize,
) -> Vec<ScoredArea> {
    let scores: Vec<i32> = tally(areas, rules, answers)
        .iter()
        .map(|c| total(c))
        .collect();

    let ranked: Vec<ScoredArea> = ranked_order(&scores)
        .into_iter()
        .take(top_n)
        .map(|idx| ScoredArea {
            area: areas[idx].clone(),
            score: scores[idx],
        })
        .collect();

    debug!(
        answers = answers.len(),
        top_area = ranked.first().map(|s| s.id()).unwrap_or_default(),
        top_score = ranked.first().map(|s| s.score).unwrap_or_default(),
        "scored assessment"
    );
    ranked
}

/// Collect contributions per area, indexed like `areas`.
fn tally(
    areas: &[TherapyArea],
    rules: &[ScoringRule],
    answers: &AnswerStore,
) -> Vec<Vec<Contribution>> {
    let mut contributions = vec![Vec::new(); areas.len()];

    for (question_id, value) in answers {
        let text = value.to_text().to_lowercase();
        let affirmative = is_affirmative(value);

        for (idx, area) in areas.iter().enumerate() {
            for keyword in &area.keywords {
                // Both clauses may hold; a keyword still counts once per question.
                let matched = if text.contains(keyword.as_str()) {
                    Some(KeywordMatch::Answer)
                } else if affirmative && question_id.contains(keyword.as_str()) {
                    Some(KeywordMatch::QuestionId)
                } else {
                    None
                };

                if let Some(matched) = matched {
                    contributions[idx].push(Contribution::Keyword {
                        question_id: question_id.clone(),
                        keyword: keyword.clone(),
                        matched,
                    });
                }
            }
        }
    }

    for rule in rules {
        if !rule.applies(answers.get(&rule.question_id)) {
            continue;
        }
        if let Some(idx) = areas.iter().position(|a| a.id == rule.area_id) {
            contributions[idx].push(Contribution::Rule {
                question_id: rule.question_id.clone(),
                weight: rule.weight,
            });
        }
    }

    contributions
}

/// Rule weights come from callers, so the sum saturates instead of
/// overflowing.
fn total(contributions: &[Contribution]) -> i32 {
    contributions
        .iter()
        .fold(0i32, |acc, c| acc.saturating_add(c.points()))
}

/// Area indices by descending score. `sort_by` is stable, so equal scores
/// keep catalog order.
fn ranked_order(scores: &[i32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));
    order
}
