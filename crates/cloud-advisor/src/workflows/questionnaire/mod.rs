//! Adaptive questionnaire: the static question graph, the per-session answer store, and the
//! navigation state that walks the resolved sequence.

mod answers;
mod blueprint;
pub mod domain;
mod session;

pub use answers::{can_advance, AnswerStore};
pub use blueprint::QuestionnaireBlueprint;
pub use domain::{
    question_ids, AnswerValue, Cardinality, Question, QuestionOption, QuestionnaireError,
    ALL_PROVIDERS,
};
pub use session::{QuestionnaireSession, SessionSnapshot, StepOutcome};
