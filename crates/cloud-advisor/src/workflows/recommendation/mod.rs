//! Scoring, ranking, and presentation of cloud service recommendations.
//!
//! A pass fetches a catalog snapshot, scores every variant against the active questionnaire
//! answers, keeps the best variant per provider, and ranks those picks by score.

pub mod evaluation;
pub mod ranking;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use evaluation::{
    ScoreComponent, ScoreFactor, ScoredRecommendation, ScoringEngine, ScoringWeights,
    DEFAULT_JUSTIFICATION,
};
pub use ranking::{select, select_for, ProviderFilter, RankedRecommendation, UnknownProviderFilter};
pub use report::views::{
    ComparisonRow, CostAnalysis, CostBreakdownEntry, RecommendationSummary, RecommendationView,
};
pub use report::RecommendationReport;
pub use router::{recommendation_router, QuestionnaireStateRequest, RecommendationRequest};
pub use service::{RecommendationError, RecommendationService};
