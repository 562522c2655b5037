use super::answers::{can_advance, AnswerStore};
use super::blueprint::QuestionnaireBlueprint;
use super::domain::{AnswerValue, Question, QuestionnaireError};
use serde::Serialize;

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The session moved to a new step.
    Moved { step: usize },
    /// The current question still needs an answer.
    Blocked { question_id: &'static str },
    /// Advanced past the last question; answers are ready for scoring.
    Completed,
    /// Retreated from the first question; the caller leaves the questionnaire.
    Exited,
}

/// Point-in-time view of a session for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot<'a> {
    pub step: usize,
    pub total_steps: usize,
    pub progress: f64,
    pub is_last_step: bool,
    pub can_advance: bool,
    pub current_question: &'a Question,
    pub current_answer: AnswerValue,
    pub questions: Vec<&'a Question>,
}

/// One user's walk through the questionnaire.
///
/// The resolved sequence is never cached: every accessor re-derives it from the blueprint and
/// the current answers, and the step index is clamped against that fresh sequence.
#[derive(Debug, Clone)]
pub struct QuestionnaireSession {
    blueprint: QuestionnaireBlueprint,
    answers: AnswerStore,
    step: usize,
}

impl Default for QuestionnaireSession {
    fn default() -> Self {
        Self::new(QuestionnaireBlueprint::standard())
    }
}

impl QuestionnaireSession {
    pub fn new(blueprint: QuestionnaireBlueprint) -> Self {
        Self {
            blueprint,
            answers: AnswerStore::new(),
            step: 0,
        }
    }

    /// Rebuild a session from previously collected answers, positioned at `step`.
    pub fn resume(blueprint: QuestionnaireBlueprint, answers: AnswerStore, step: usize) -> Self {
        let mut session = Self {
            blueprint,
            answers,
            step,
        };
        session.step = session.step_index();
        session
    }

    pub fn blueprint(&self) -> &QuestionnaireBlueprint {
        &self.blueprint
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn questions(&self) -> Vec<&Question> {
        self.blueprint.resolve(&self.answers)
    }

    pub fn total_steps(&self) -> usize {
        self.questions().len()
    }

    pub fn step_index(&self) -> usize {
        self.step.min(self.total_steps().saturating_sub(1))
    }

    pub fn current_question(&self) -> &Question {
        let questions = self.questions();
        let index = self.step.min(questions.len().saturating_sub(1));
        questions[index]
    }

    pub fn current_answer(&self) -> AnswerValue {
        let question = self.current_question();
        self.answers.get(question.id, question.cardinality)
    }

    pub fn progress_fraction(&self) -> f64 {
        (self.step_index() + 1) as f64 / self.total_steps() as f64
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index() + 1 == self.total_steps()
    }

    pub fn can_advance(&self) -> bool {
        can_advance(self.current_question(), &self.answers)
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            step: self.step_index(),
            total_steps: self.total_steps(),
            progress: self.progress_fraction(),
            is_last_step: self.is_last_step(),
            can_advance: self.can_advance(),
            current_question: self.current_question(),
            current_answer: self.current_answer(),
            questions: self.questions(),
        }
    }

    /// Record an answer for a question in the resolved sequence.
    pub fn record(
        &mut self,
        question_id: &str,
        value: impl Into<AnswerValue>,
    ) -> Result<(), QuestionnaireError> {
        let value = value.into();
        let question = self
            .questions()
            .into_iter()
            .find(|question| question.id == question_id)
            .ok_or_else(|| QuestionnaireError::UnknownQuestion(question_id.to_string()))?;

        if value.cardinality() != question.cardinality {
            return Err(QuestionnaireError::CardinalityMismatch {
                question_id: question_id.to_string(),
                expected: question.cardinality,
            });
        }

        if let Some(unknown) = value
            .option_ids()
            .into_iter()
            .map(str::trim)
            .filter(|option_id| !option_id.is_empty())
            .find(|option_id| question.option(option_id).is_none())
        {
            return Err(QuestionnaireError::UnknownOption {
                question_id: question_id.to_string(),
                option_id: unknown.to_string(),
            });
        }

        let question_id = question.id;
        self.answers.record(question_id, value);
        self.step = self.step_index();
        tracing::debug!(question_id, answered = self.answers.len(), "answer recorded");
        Ok(())
    }

    pub fn advance(&mut self) -> StepOutcome {
        let question = self.current_question();
        if !can_advance(question, &self.answers) {
            return StepOutcome::Blocked {
                question_id: question.id,
            };
        }

        let step = self.step_index();
        if step + 1 >= self.total_steps() {
            return StepOutcome::Completed;
        }

        self.step = step + 1;
        StepOutcome::Moved { step: self.step }
    }

    pub fn retreat(&mut self) -> StepOutcome {
        let step = self.step_index();
        if step == 0 {
            return StepOutcome::Exited;
        }

        self.step = step - 1;
        StepOutcome::Moved { step: self.step }
    }

    /// Drop every answer and return to the first question.
    pub fn restart(&mut self) {
        self.answers.clear();
        self.step = 0;
    }

    pub fn into_answers(self) -> AnswerStore {
        self.answers
    }
}
