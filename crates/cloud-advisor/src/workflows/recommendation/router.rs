use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::ranking::ProviderFilter;
use super::service::{RecommendationError, RecommendationService};
use crate::workflows::catalog::CatalogAccessor;
use crate::workflows::questionnaire::AnswerStore;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionnaireStateRequest {
    #[serde(default)]
    pub answers: AnswerStore,
    #[serde(default)]
    pub step: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub answers: AnswerStore,
    #[serde(default)]
    pub provider: ProviderFilter,
}

/// Router builder exposing the questionnaire and recommendation endpoints.
pub fn recommendation_router<C>(service: Arc<RecommendationService<C>>) -> Router
where
    C: CatalogAccessor + 'static,
{
    Router::new()
        .route(
            "/api/v1/questionnaire/state",
            post(questionnaire_state_handler::<C>),
        )
        .route("/api/v1/recommendations", post(recommend_handler::<C>))
        .with_state(service)
}

pub(crate) async fn questionnaire_state_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    axum::Json(request): axum::Json<QuestionnaireStateRequest>,
) -> Response
where
    C: CatalogAccessor + 'static,
{
    match service.session(&request.answers, request.step) {
        Ok(session) => (StatusCode::OK, axum::Json(session.snapshot())).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn recommend_handler<C>(
    State(service): State<Arc<RecommendationService<C>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    C: CatalogAccessor + 'static,
{
    match service.recommend(&request.answers).await {
        Ok(report) => {
            let summary = report.summary(request.provider);
            (StatusCode::OK, axum::Json(summary)).into_response()
        }
        Err(error @ RecommendationError::InvalidAnswers(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(error @ RecommendationError::GenerationFailed { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
