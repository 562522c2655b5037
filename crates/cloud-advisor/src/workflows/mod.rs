pub mod catalog;
pub mod questionnaire;
pub mod recommendation;
