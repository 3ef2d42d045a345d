use haven_core::models::answer::{AnswerStore, AnswerValue};
use haven_core::models::question::{Question, Section};
use haven_core::models::recommendation::ScoredArea;
use haven_core::models::record::AssessmentRecord;
use tracing::info;

use crate::catalog::{find_question, find_section, sections};
use crate::error::AssessmentError;
use crate::scoring::ScoringEngine;

/// Walks a respondent through the questionnaire one section at a time.
///
/// Owns the answer store for the session. Scoring happens once, in
/// [`AssessmentSession::complete`]; after that the answers are frozen until
/// [`AssessmentSession::reset`].
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    sections: Vec<Section>,
    engine: ScoringEngine,
    answers: AnswerStore,
    current: usize,
    recommendations: Option<Vec<ScoredArea>>,
}

impl AssessmentSession {
    pub fn new(sections: Vec<Section>, engine: ScoringEngine) -> Self {
        Self {
            sections,
            engine,
            answers: AnswerStore::new(),
            current: 0,
            recommendations: None,
        }
    }

    /// Session over the shipped questionnaire and scoring tables.
    pub fn standard() -> Self {
        Self::new(sections().to_vec(), ScoringEngine::standard())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.sections.get(self.current)
    }

    pub fn is_last_section(&self) -> bool {
        self.current + 1 >= self.sections.len()
    }

    /// Validate `value` against the question and record it, replacing any
    /// earlier answer.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        value: impl Into<AnswerValue>,
    ) -> Result<(), AssessmentError> {
        if self.recommendations.is_some() {
            return Err(AssessmentError::SessionCompleted);
        }

        let question = find_question(&self.sections, question_id)
            .ok_or_else(|| AssessmentError::UnknownQuestion(question_id.to_string()))?;
        let value = value.into();
        check_answer(question, &value)?;

        self.answers.record(question_id, value);
        Ok(())
    }

    /// True iff every question in the section has an answer. Unknown
    /// sections are never complete.
    pub fn is_section_complete(&self, section_id: &str) -> bool {
        find_section(&self.sections, section_id)
            .is_some_and(|s| s.questions.iter().all(|q| self.answers.contains(&q.id)))
    }

    pub fn all_answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Move to the next section once the current one is complete. Stays put
    /// on the last section.
    pub fn advance(&mut self) -> Result<usize, AssessmentError> {
        self.require_current_complete()?;
        if !self.is_last_section() {
            self.current += 1;
        }
        Ok(self.current)
    }

    /// Move to the previous section, stopping at the first.
    pub fn retreat(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// Finish the questionnaire and score it.
    ///
    /// Requires the final section to be active and every section complete.
    /// The first successful call scores; later calls return the same
    /// recommendations without scoring again.
    pub fn complete(&mut self) -> Result<&[ScoredArea], AssessmentError> {
        if self.recommendations.is_none() {
            if !self.is_last_section() {
                return Err(AssessmentError::NotOnFinalSection);
            }
            if let Some(section) = self
                .sections
                .iter()
                .find(|s| !self.is_section_complete(&s.id))
            {
                return Err(AssessmentError::SectionIncomplete(section.id.clone()));
            }

            let ranked = self.engine.rank(&self.answers);
            info!(
                answers = self.answers.len(),
                recommendations = ranked.len(),
                "assessment completed"
            );
            self.recommendations = Some(ranked);
        }

        Ok(self.recommendations.as_deref().unwrap_or_default())
    }

    pub fn is_completed(&self) -> bool {
        self.recommendations.is_some()
    }

    pub fn recommendations(&self) -> Option<&[ScoredArea]> {
        self.recommendations.as_deref()
    }

    /// Clear answers and results and return to the first section.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.recommendations = None;
        self.current = 0;
    }

    /// Package a completed session for output.
    pub fn into_record(self) -> Result<AssessmentRecord, AssessmentError> {
        let recommendations = self.recommendations.ok_or(AssessmentError::NotCompleted)?;
        Ok(AssessmentRecord::new(self.answers, recommendations))
    }

    fn require_current_complete(&self) -> Result<(), AssessmentError> {
        match self.current_section() {
            Some(section) if !self.is_section_complete(&section.id) => {
                Err(AssessmentError::SectionIncomplete(section.id.clone()))
            }
            _ => Ok(()),
        }
    }
}

fn check_answer(question: &Question, value: &AnswerValue) -> Result<(), AssessmentError> {
    if question.is_numeric() {
        let in_range = match (value.as_number(), question.scale) {
            (Some(n), Some(range)) => range.contains(n),
            (Some(n), None) => n.is_finite(),
            (None, _) => false,
        };
        if !in_range {
            return Err(AssessmentError::OutOfRange {
                question_id: question.id.clone(),
                value: value.to_text(),
            });
        }
    } else if !value.as_str().is_some_and(|s| question.has_option(s)) {
        return Err(AssessmentError::InvalidOption {
            question_id: question.id.clone(),
            value: value.to_text(),
        });
    }
    Ok(())
}
