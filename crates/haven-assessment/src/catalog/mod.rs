//! Static questionnaire and therapy-area data.

pub mod areas;
pub mod questions;

pub use areas::therapy_areas;
pub use questions::sections;

use haven_core::models::question::{Question, Section};

/// Look up a question anywhere in the given sections.
pub fn find_question<'a>(sections: &'a [Section], id: &str) -> Option<&'a Question> {
    sections.iter().find_map(|s| s.question(id))
}

/// Look up a section by ID.
pub fn find_section<'a>(sections: &'a [Section], id: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.id == id)
}
