use std::collections::HashSet;

use haven_assessment::catalog::{find_question, find_section, sections, therapy_areas};
use haven_assessment::error::AssessmentError;
use haven_assessment::rules::{RuleCondition, ScoringRule, default_rules, is_affirmative};
use haven_assessment::scoring::{ScoringEngine, validate_catalog};
use haven_core::models::answer::AnswerValue;
use haven_core::models::area::TherapyArea;
use haven_core::models::question::QuestionType;

#[test]
fn shipped_catalog_is_valid() {
    validate_catalog(therapy_areas(), default_rules()).unwrap();
    ScoringEngine::new(therapy_areas().to_vec(), default_rules().to_vec()).unwrap();
}

#[test]
fn question_ids_are_unique_and_sections_consistent() {
    let mut seen = HashSet::new();
    for section in sections() {
        assert!(!section.questions.is_empty(), "{} has no questions", section.id);
        for question in &section.questions {
            assert!(seen.insert(question.id.as_str()), "duplicate {}", question.id);
            assert_eq!(question.section_id, section.id);
            match question.question_type {
                QuestionType::NumericScale => {
                    assert!(question.options.is_empty());
                    assert!(question.scale.is_some());
                }
                QuestionType::SingleChoice | QuestionType::SingleSelect => {
                    assert!(!question.options.is_empty());
                    assert!(question.scale.is_none());
                }
            }
        }
    }
}

#[test]
fn every_rule_points_at_a_real_question_and_option() {
    for rule in default_rules() {
        let question = find_question(sections(), &rule.question_id)
            .unwrap_or_else(|| panic!("rule references unknown question {}", rule.question_id));

        match &rule.condition {
            RuleCondition::Equals { value } => assert!(question.has_option(value), "{value}"),
            RuleCondition::OneOf { values } => {
                for value in values {
                    assert!(question.has_option(value), "{value}");
                }
            }
            RuleCondition::AtMost { .. } | RuleCondition::AtLeast { .. } => {
                assert!(question.is_numeric())
            }
        }
    }
}

#[test]
fn lookups_find_questions_and_sections() {
    assert_eq!(
        find_question(sections(), "wellbeing-scale").map(|q| q.section_id.as_str()),
        Some("feelings")
    );
    assert!(find_question(sections(), "missing").is_none());
    assert_eq!(
        find_section(sections(), "goals").map(|s| s.questions.len()),
        Some(2)
    );
}

#[test]
fn question_type_serializes_kebab_case() {
    let question = find_question(sections(), "wellbeing-scale").unwrap();
    let json = serde_json::to_value(question).unwrap();

    assert_eq!(json["type"], "numeric-scale");
    assert!(json.get("options").is_none());
    assert_eq!(json["scale"]["max"], 10.0);
}

#[test]
fn affirmative_tokens_are_exact() {
    assert!(is_affirmative(&AnswerValue::from("Yes")));
    assert!(is_affirmative(&AnswerValue::from("Often")));
    assert!(is_affirmative(&AnswerValue::from("Nearly every day")));
    assert!(!is_affirmative(&AnswerValue::from("yes")));
    assert!(!is_affirmative(&AnswerValue::from("Sometimes")));
    assert!(!is_affirmative(&AnswerValue::from(1)));
}

#[test]
fn conditions_compare_text_strictly_and_numbers_loosely() {
    let equals = RuleCondition::Equals {
        value: "3".to_string(),
    };
    assert!(equals.matches(&AnswerValue::from("3")));
    assert!(!equals.matches(&AnswerValue::from(3)));

    let at_least = RuleCondition::AtLeast { threshold: 8.0 };
    assert!(at_least.matches(&AnswerValue::from(9)));
    assert!(at_least.matches(&AnswerValue::from("8")));
    assert!(!at_least.matches(&AnswerValue::from("high")));

    let rule = ScoringRule::at_most("wellbeing-scale", 4.0, "depression", 2);
    assert!(rule.applies(Some(&AnswerValue::from(4))));
    assert!(!rule.applies(None));
}

#[test]
fn at_least_rules_fire_from_the_threshold_up() {
    let rule = ScoringRule::at_least("wellbeing-scale", 8.0, "stress", 1);
    assert_eq!(rule.condition, RuleCondition::AtLeast { threshold: 8.0 });

    assert!(rule.applies(Some(&AnswerValue::from(8))));
    assert!(rule.applies(Some(&AnswerValue::from(10.0))));
    assert!(rule.applies(Some(&AnswerValue::from(" 9 "))));
    assert!(!rule.applies(Some(&AnswerValue::from(7.5))));
    assert!(!rule.applies(Some(&AnswerValue::from(""))));
    assert!(!rule.applies(Some(&AnswerValue::from(true))));
    assert!(!rule.applies(None));

    let json = serde_json::to_value(&rule).unwrap();
    assert_eq!(json["condition"]["kind"], "at_least");
    assert_eq!(json["condition"]["threshold"], 8.0);
}

#[test]
fn rules_round_trip_as_tagged_json() {
    let rule = ScoringRule::one_of("grief-loss", &["Yes"], "grief", 3);
    let json = serde_json::to_value(&rule).unwrap();
    assert_eq!(json["condition"]["kind"], "one_of");

    let parsed: ScoringRule = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, rule);
}

fn area(id: &str, keywords: &[&str]) -> TherapyArea {
    TherapyArea {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

#[test]
fn engine_rejects_broken_catalogs() {
    let err = ScoringEngine::new(vec![], vec![]).unwrap_err();
    assert!(matches!(err, AssessmentError::EmptyCatalog));

    let err = ScoringEngine::new(vec![area("a", &["x"]), area("a", &["y"])], vec![]).unwrap_err();
    assert!(matches!(err, AssessmentError::DuplicateArea(id) if id == "a"));

    let err = ScoringEngine::new(vec![area("a", &["Upper"])], vec![]).unwrap_err();
    assert!(matches!(err, AssessmentError::InvalidKeyword { keyword, .. } if keyword == "Upper"));

    let err = ScoringEngine::new(vec![area("a", &[""])], vec![]).unwrap_err();
    assert!(matches!(err, AssessmentError::InvalidKeyword { .. }));

    let err = ScoringEngine::new(
        vec![area("a", &["x"])],
        vec![ScoringRule::equals("q", "Yes", "missing", 1)],
    )
    .unwrap_err();
    assert!(matches!(err, AssessmentError::UnknownArea { area_id, .. } if area_id == "missing"));
}
