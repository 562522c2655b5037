use std::sync::Arc;

use super::evaluation::ScoringEngine;
use super::ranking::select;
use super::report::RecommendationReport;
use crate::workflows::catalog::{load_snapshot, CatalogAccessor, CatalogError};
use crate::workflows::questionnaire::{
    AnswerStore, QuestionnaireBlueprint, QuestionnaireError, QuestionnaireSession,
};

/// Service composing the catalog accessor, the scoring engine, and the ranking selector.
pub struct RecommendationService<C> {
    catalog: Arc<C>,
    engine: Arc<ScoringEngine>,
}

impl<C> RecommendationService<C>
where
    C: CatalogAccessor + 'static,
{
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_engine(catalog, ScoringEngine::default())
    }

    pub fn with_engine(catalog: Arc<C>, engine: ScoringEngine) -> Self {
        Self {
            catalog,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn blueprint(&self) -> &QuestionnaireBlueprint {
        self.engine.blueprint()
    }

    /// Rebuild a questionnaire session from client-held answers.
    pub fn session(
        &self,
        answers: &AnswerStore,
        step: usize,
    ) -> Result<QuestionnaireSession, QuestionnaireError> {
        let answers = self.blueprint().conform(answers)?;
        Ok(QuestionnaireSession::resume(
            self.blueprint().clone(),
            answers,
            step,
        ))
    }

    /// Fetch a fresh catalog snapshot, score it against `answers`, and rank the results.
    pub async fn recommend(
        &self,
        answers: &AnswerStore,
    ) -> Result<RecommendationReport, RecommendationError> {
        let answers = self.blueprint().conform(answers)?;
        let snapshot = load_snapshot(self.catalog.as_ref())
            .await
            .map_err(|source| {
                tracing::error!(error = %source, "recommendation generation failed");
                RecommendationError::GenerationFailed { source }
            })?;

        let scored = self.engine.score_snapshot(&snapshot, &answers);
        let ranked = select(&scored);

        tracing::info!(
            candidates = scored.len(),
            ranked = ranked.len(),
            top_score = ranked.first().map(|entry| entry.score()),
            "recommendations generated"
        );

        Ok(RecommendationReport::new(ranked))
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("invalid answers: {0}")]
    InvalidAnswers(#[from] QuestionnaireError),
    #[error("recommendation generation failed")]
    GenerationFailed {
        #[source]
        source: CatalogError,
    },
}
