use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::recommendation::router::{recommend_handler, RecommendationRequest};
use crate::workflows::recommendation::{ProviderFilter, RecommendationService};

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).expect("payload serializes")))
        .expect("request builds")
}

#[tokio::test]
async fn questionnaire_state_reports_the_resolved_sequence() {
    let router = router_with_service(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/questionnaire/state",
            json!({
                "answers": {
                    "workload_type": "web",
                    "services": ["storage", "security"],
                },
                "step": 1,
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["step"], 1);
    assert_eq!(body["total_steps"], 6);
    assert_eq!(body["can_advance"], true);
    assert_eq!(body["current_question"]["id"], "services");
    assert_eq!(body["current_answer"], json!(["storage", "security"]));

    let ids: Vec<&str> = body["questions"]
        .as_array()
        .expect("questions array")
        .iter()
        .filter_map(|question| question["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "workload_type",
            "services",
            "providers",
            "storage_access",
            "storage_size",
            "security_compliance",
        ]
    );
}

#[tokio::test]
async fn questionnaire_state_defaults_to_the_first_step() {
    let router = router_with_service(reference_service());

    let response = router
        .oneshot(post_json("/api/v1/questionnaire/state", json!({})))
        .await
        .expect("route responds");

    let body = read_json_body(response).await;
    assert_eq!(body["step"], 0);
    assert_eq!(body["total_steps"], 3);
    assert_eq!(body["can_advance"], false);
    assert_eq!(body["current_answer"], "");
}

#[tokio::test]
async fn recommendations_route_returns_views_and_cost_analysis() {
    let router = router_with_service(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            json!({
                "answers": {
                    "workload_type": "web",
                    "services": ["storage"],
                    "providers": ["aws"],
                },
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["provider_filter"], "all");

    let top = &body["recommendations"][0];
    assert_eq!(top["rank"], 1);
    assert_eq!(top["provider"], "AWS");
    assert_eq!(top["instance_type"], "t3.medium");
    assert_eq!(top["monthly_cost"], "$29.95");
    assert_eq!(top["cpu"], "2");
    assert_eq!(top["ram"], "4GB");
    assert_eq!(top["gpu"], "None");
    assert_eq!(top["use_case"], "General Purpose");
    assert_eq!(top["justification"], "Optimized for web applications");

    assert_eq!(body["comparison"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["cost_analysis"]["scaled_monthly_cost"], "$59.90");
    assert_eq!(
        body["cost_analysis"]["optimization_tip"],
        "Consider reserved instances for a 30-40% discount if you plan to run this workload long-term."
    );
}

#[tokio::test]
async fn scalar_provider_answers_are_read_as_selections() {
    let router = router_with_service(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            json!({
                "answers": {
                    "workload_type": "web",
                    "services": "storage",
                    "providers": "aws",
                },
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["recommendations"][0]["instance_id"], "aws-t3-medium");
    assert_eq!(body["recommendations"][0]["score"], 65);
}

#[tokio::test]
async fn set_answers_to_single_choice_questions_are_bad_requests() {
    let router = router_with_service(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            json!({ "answers": { "workload_type": ["web", "ml"] } }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("workload_type"));
}

#[tokio::test]
async fn questionnaire_state_coerces_scalar_service_selections() {
    let router = router_with_service(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/questionnaire/state",
            json!({ "answers": { "workload_type": "ml", "services": "compute" } }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_steps"], 6);
}

#[tokio::test]
async fn provider_filter_keeps_original_ranks() {
    let service = Arc::new(reference_service());
    let request = RecommendationRequest {
        answers: web_storage_aws_answers(),
        provider: ProviderFilter::Only(crate::workflows::catalog::Provider::Azure),
    };

    let response = recommend_handler(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let recommendations = body["recommendations"].as_array().expect("array");
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["rank"], 3);
    assert_eq!(recommendations[0]["provider"], "Azure");
    assert_eq!(body["cost_analysis"]["breakdown"][0]["monthly_cost"], "$29.95");
}

#[tokio::test]
async fn recommendations_route_rejects_unknown_provider_filters() {
    let router = router_with_service(reference_service());

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            json!({ "answers": {}, "provider": "oracle" }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn catalog_outage_maps_to_service_unavailable() {
    let service = RecommendationService::new(Arc::new(OfflineCatalog::default()));
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            json!({ "answers": { "workload_type": "ml" } }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "recommendation generation failed");
}
