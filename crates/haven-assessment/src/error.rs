use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("therapy area catalog is empty")]
    EmptyCatalog,

    #[error("duplicate therapy area id: {0}")]
    DuplicateArea(String),

    #[error("invalid keyword '{keyword}' on area '{area_id}': keywords must be non-empty and lowercase")]
    InvalidKeyword { area_id: String, keyword: String },

    #[error("rule on question '{question_id}' targets unknown area '{area_id}'")]
    UnknownArea {
        question_id: String,
        area_id: String,
    },

    #[error("result count must be at least 1")]
    InvalidTopN,

    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("'{value}' is not an option for question '{question_id}'")]
    InvalidOption { question_id: String, value: String },

    #[error("'{value}' is outside the scale for question '{question_id}'")]
    OutOfRange { question_id: String, value: String },

    #[error("section '{0}' has unanswered questions")]
    SectionIncomplete(String),

    #[error("the assessment can only be completed from the final section")]
    NotOnFinalSection,

    #[error("assessment already completed; reset to change answers")]
    SessionCompleted,

    #[error("assessment has not been completed")]
    NotCompleted,
}
