use haven_core::models::answer::AnswerValue;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Answers that count as a strong "yes" when a keyword matches the question
/// id rather than the answer text.
pub const AFFIRMATIVE_ANSWERS: [&str; 3] = ["Yes", "Often", "Nearly every day"];

/// Wellbeing ratings at or below this value trigger the low-wellbeing rules.
pub const LOW_WELLBEING_THRESHOLD: f64 = 4.0;

pub fn is_affirmative(value: &AnswerValue) -> bool {
    value
        .as_str()
        .is_some_and(|s| AFFIRMATIVE_ANSWERS.contains(&s))
}

/// When a rule fires, evaluated against a single answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum RuleCondition {
    /// Text answer equals `value` exactly.
    Equals { value: String },
    /// Text answer is one of `values`.
    OneOf { values: Vec<String> },
    /// Numeric answer (or numeric text) is `<= threshold`.
    AtMost { threshold: f64 },
    /// Numeric answer (or numeric text) is `>= threshold`.
    AtLeast { threshold: f64 },
}

impl RuleCondition {
    pub fn matches(&self, answer: &AnswerValue) -> bool {
        match self {
            RuleCondition::Equals { value } => answer.as_str() == Some(value.as_str()),
            RuleCondition::OneOf { values } => answer
                .as_str()
                .is_some_and(|s| values.iter().any(|v| v == s)),
            RuleCondition::AtMost { threshold } => {
                answer.as_number().is_some_and(|n| n <= *threshold)
            }
            RuleCondition::AtLeast { threshold } => {
                answer.as_number().is_some_and(|n| n >= *threshold)
            }
        }
    }
}

/// A direct score boost: if `question_id`'s answer satisfies `condition`,
/// add `weight` to `area_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringRule {
    pub question_id: String,
    pub condition: RuleCondition,
    pub area_id: String,
    pub weight: i32,
}

impl ScoringRule {
    pub fn equals(question_id: &str, value: &str, area_id: &str, weight: i32) -> Self {
        Self {
            question_id: question_id.to_string(),
            condition: RuleCondition::Equals {
                value: value.to_string(),
            },
            area_id: area_id.to_string(),
            weight,
        }
    }

    pub fn one_of(question_id: &str, values: &[&str], area_id: &str, weight: i32) -> Self {
        Self {
            question_id: question_id.to_string(),
            condition: RuleCondition::OneOf {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
            area_id: area_id.to_string(),
            weight,
        }
    }

    pub fn at_most(question_id: &str, threshold: f64, area_id: &str, weight: i32) -> Self {
        Self {
            question_id: question_id.to_string(),
            condition: RuleCondition::AtMost { threshold },
            area_id: area_id.to_string(),
            weight,
        }
    }

    pub fn at_least(question_id: &str, threshold: f64, area_id: &str, weight: i32) -> Self {
        Self {
            question_id: question_id.to_string(),
            condition: RuleCondition::AtLeast { threshold },
            area_id: area_id.to_string(),
            weight,
        }
    }

    /// Whether this rule fires against `answer`. `None` (unanswered) never
    /// fires.
    pub fn applies(&self, answer: Option<&AnswerValue>) -> bool {
        answer.is_some_and(|a| self.condition.matches(a))
    }
}

/// The built-in boost table for the shipped questionnaire.
pub fn default_rules() -> &'static [ScoringRule] {
    static RULES: std::sync::LazyLock<Vec<ScoringRule>> = std::sync::LazyLock::new(|| {
        const FREQUENT: &[&str] = &["Often", "Nearly every day"];

        vec![
            // Feelings
            ScoringRule::one_of("anxiety-frequency", FREQUENT, "anxiety", 3),
            ScoringRule::one_of("low-mood-frequency", FREQUENT, "depression", 3),
            ScoringRule::one_of("anger-outbursts", FREQUENT, "anger", 3),
            ScoringRule::one_of("self-criticism", FREQUENT, "self-esteem", 2),
            ScoringRule::at_most("wellbeing-scale", LOW_WELLBEING_THRESHOLD, "depression", 2),
            ScoringRule::at_most("wellbeing-scale", LOW_WELLBEING_THRESHOLD, "self-esteem", 1),
            // Experiences
            ScoringRule::equals("trauma-experience", "Yes", "trauma", 3),
            ScoringRule::equals("grief-loss", "Yes", "grief", 3),
            ScoringRule::one_of("substance-use", FREQUENT, "addiction", 3),
            ScoringRule::equals("sleep-problems", "Yes", "sleep", 2),
            ScoringRule::one_of("work-stress", FREQUENT, "stress", 3),
            // Relationships
            ScoringRule::equals("relationship-stress", "Yes", "couples", 3),
            ScoringRule::equals("family-conflicts", "Yes", "family", 2),
            ScoringRule::equals("social-isolation", "Yes", "depression", 1),
            // Goals
            ScoringRule::equals("primary-goal", "Manage anxiety or worry", "anxiety", 2),
            ScoringRule::equals("primary-goal", "Lift a low mood", "depression", 2),
            ScoringRule::equals("primary-goal", "Cope with stress or burnout", "stress", 2),
            ScoringRule::equals("primary-goal", "Heal from past trauma", "trauma", 2),
            ScoringRule::equals("primary-goal", "Improve my relationship", "couples", 2),
            ScoringRule::equals("primary-goal", "Resolve family conflict", "family", 2),
            ScoringRule::equals("primary-goal", "Process grief or loss", "grief", 2),
            ScoringRule::equals("primary-goal", "Build confidence and self-worth", "self-esteem", 2),
            ScoringRule::equals("primary-goal", "Reduce alcohol or substance use", "addiction", 2),
            ScoringRule::equals("primary-goal", "Sleep better", "sleep", 2),
            ScoringRule::equals("primary-goal", "Control anger", "anger", 2),
        ]
    });
    &RULES
}
