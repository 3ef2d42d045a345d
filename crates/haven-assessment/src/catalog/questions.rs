use haven_core::models::question::{Question, QuestionType, ScaleRange, Section};

const FREQUENCY: &[&str] = &["Never", "Sometimes", "Often", "Nearly every day"];
const YES_NO: &[&str] = &["Yes", "No"];

pub const WELLBEING_SCALE: ScaleRange = ScaleRange {
    min: 1.0,
    max: 10.0,
    step: Some(1.0),
};

fn choice(section_id: &str, id: &str, prompt: &str, options: &[&str]) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        question_type: QuestionType::SingleChoice,
        options: options.iter().map(|o| o.to_string()).collect(),
        section_id: section_id.to_string(),
        scale: None,
    }
}

fn select(section_id: &str, id: &str, prompt: &str, options: &[&str]) -> Question {
    Question {
        question_type: QuestionType::SingleSelect,
        ..choice(section_id, id, prompt, options)
    }
}

fn scale(section_id: &str, id: &str, prompt: &str, range: ScaleRange) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        question_type: QuestionType::NumericScale,
        options: Vec::new(),
        section_id: section_id.to_string(),
        scale: Some(range),
    }
}

/// The questionnaire, in the order it is presented.
pub fn sections() -> &'static [Section] {
    static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
        vec![
            Section {
                id: "feelings".to_string(),
                title: "How you've been feeling".to_string(),
                description: "Think about the last two weeks.".to_string(),
                questions: vec![
                    choice(
                        "feelings",
                        "anxiety-frequency",
                        "How often have you felt nervous, anxious, or on edge?",
                        FREQUENCY,
                    ),
                    choice(
                        "feelings",
                        "low-mood-frequency",
                        "How often have you felt down, depressed, or hopeless?",
                        FREQUENCY,
                    ),
                    choice(
                        "feelings",
                        "anger-outbursts",
                        "How often have you lost your temper in ways you regretted?",
                        FREQUENCY,
                    ),
                    choice(
                        "feelings",
                        "self-criticism",
                        "How often are you harshly critical of yourself?",
                        FREQUENCY,
                    ),
                    scale(
                        "feelings",
                        "wellbeing-scale",
                        "Overall, how would you rate your wellbeing right now? (1 = very poor, 10 = excellent)",
                        WELLBEING_SCALE,
                    ),
                ],
            },
            Section {
                id: "experiences".to_string(),
                title: "Life experiences".to_string(),
                description: "Events and habits that may be affecting you.".to_string(),
                questions: vec![
                    choice(
                        "experiences",
                        "trauma-experience",
                        "Have you experienced an event that still feels distressing or unsafe to think about?",
                        &["Yes", "No", "Prefer not to say"],
                    ),
                    choice(
                        "experiences",
                        "grief-loss",
                        "Have you lost someone or something important to you recently?",
                        YES_NO,
                    ),
                    choice(
                        "experiences",
                        "substance-use",
                        "How often do you use alcohol or other substances to cope?",
                        FREQUENCY,
                    ),
                    choice(
                        "experiences",
                        "sleep-problems",
                        "Do you regularly have trouble falling or staying asleep?",
                        YES_NO,
                    ),
                    choice(
                        "experiences",
                        "work-stress",
                        "How often do work or study demands feel like too much?",
                        FREQUENCY,
                    ),
                ],
            },
            Section {
                id: "relationships".to_string(),
                title: "Relationships".to_string(),
                description: "The people closest to you.".to_string(),
                questions: vec![
                    choice(
                        "relationships",
                        "relationship-stress",
                        "Is your relationship with a partner a significant source of strain?",
                        YES_NO,
                    ),
                    choice(
                        "relationships",
                        "family-conflicts",
                        "Are there ongoing conflicts within your family?",
                        YES_NO,
                    ),
                    choice(
                        "relationships",
                        "social-isolation",
                        "Do you often feel isolated or without support?",
                        YES_NO,
                    ),
                ],
            },
            Section {
                id: "goals".to_string(),
                title: "Your goals".to_string(),
                description: "What you would most like help with.".to_string(),
                questions: vec![
                    select(
                        "goals",
                        "primary-goal",
                        "What would you most like to work on?",
                        &[
                            "Manage anxiety or worry",
                            "Lift a low mood",
                            "Cope with stress or burnout",
                            "Heal from past trauma",
                            "Improve my relationship",
                            "Resolve family conflict",
                            "Process grief or loss",
                            "Build confidence and self-worth",
                            "Reduce alcohol or substance use",
                            "Sleep better",
                            "Control anger",
                        ],
                    ),
                    select(
                        "goals",
                        "support-preference",
                        "What kind of sessions are you looking for?",
                        &[
                            "Individual sessions",
                            "Couples sessions",
                            "Family sessions",
                            "Not sure yet",
                        ],
                    ),
                ],
            },
        ]
    });
    &SECTIONS
}
