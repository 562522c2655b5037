use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use cloud_advisor::workflows::catalog::{CatalogAccessor, ServiceCategory};
use cloud_advisor::workflows::questionnaire::{Question, QuestionnaireBlueprint};
use cloud_advisor::workflows::recommendation::{recommendation_router, RecommendationService};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct FollowUpGroup {
    pub(crate) category: &'static str,
    pub(crate) questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionnaireCatalogResponse {
    pub(crate) base: Vec<Question>,
    pub(crate) follow_ups: Vec<FollowUpGroup>,
}

pub(crate) fn with_recommendation_routes<C>(service: Arc<RecommendationService<C>>) -> axum::Router
where
    C: CatalogAccessor + 'static,
{
    recommendation_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/questionnaire",
            axum::routing::get(questionnaire_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Full question graph, for clients that render the questionnaire themselves.
pub(crate) async fn questionnaire_endpoint() -> Json<QuestionnaireCatalogResponse> {
    let blueprint = QuestionnaireBlueprint::standard();
    let follow_ups = ServiceCategory::ordered()
        .into_iter()
        .map(|category| FollowUpGroup {
            category: category.option_id(),
            questions: blueprint.follow_ups(category).to_vec(),
        })
        .collect();

    Json(QuestionnaireCatalogResponse {
        base: blueprint.base_questions().to_vec(),
        follow_ups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;

    fn state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let response = readiness_endpoint(Extension(state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn healthcheck_is_always_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn questionnaire_endpoint_lists_every_follow_up_group() {
        let Json(body) = questionnaire_endpoint().await;

        assert_eq!(body.base.len(), 3);
        assert_eq!(body.follow_ups.len(), 6);
        assert_eq!(body.follow_ups[0].category, "compute");
        assert_eq!(body.follow_ups[0].questions.len(), 3);
        let total: usize = body
            .follow_ups
            .iter()
            .map(|group| group.questions.len())
            .sum();
        assert_eq!(body.base.len() + total, 14);
    }
}
