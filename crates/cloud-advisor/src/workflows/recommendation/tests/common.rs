use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::catalog::{
    CatalogAccessor, CatalogError, Provider, Service, ServiceCategory, StaticCatalog, Variant,
    NO_GPU,
};
use crate::workflows::questionnaire::{question_ids, AnswerStore, AnswerValue};
use crate::workflows::recommendation::{
    recommendation_router, RecommendationService, ScoredRecommendation, ScoringEngine,
};

pub(super) fn service(service_id: &str, provider: Provider, category: ServiceCategory) -> Service {
    Service {
        service_id: service_id.to_string(),
        provider,
        category,
    }
}

pub(super) fn variant(variant_id: &str, service_id: &str) -> Variant {
    Variant {
        variant_id: variant_id.to_string(),
        service_id: service_id.to_string(),
        name: variant_id.to_string(),
        vcpu: Some(4.0),
        ram_gb: Some(16.0),
        gpu: NO_GPU.to_string(),
        price_per_hour: Some(2.5),
        network_tier: None,
        use_case: None,
    }
}

pub(super) fn gpu_variant(variant_id: &str, service_id: &str, gpu: &str) -> Variant {
    Variant {
        vcpu: Some(16.0),
        ram_gb: Some(64.0),
        gpu: gpu.to_string(),
        price_per_hour: Some(3.67),
        ..variant(variant_id, service_id)
    }
}

pub(super) fn answers(entries: Vec<(&str, AnswerValue)>) -> AnswerStore {
    entries.into_iter().collect()
}

pub(super) fn ml_gpu_answers() -> AnswerStore {
    answers(vec![
        (question_ids::WORKLOAD_TYPE, "ml".into()),
        (question_ids::SERVICES, vec!["compute"].into()),
        (question_ids::PROVIDERS, vec!["all"].into()),
        (question_ids::COMPUTE_GPU, "yes".into()),
    ])
}

pub(super) fn web_storage_aws_answers() -> AnswerStore {
    answers(vec![
        (question_ids::WORKLOAD_TYPE, "web".into()),
        (question_ids::SERVICES, vec!["storage"].into()),
        (question_ids::PROVIDERS, vec!["aws"].into()),
    ])
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::default()
}

pub(super) fn score_one(
    service: &Service,
    variant: &Variant,
    answers: &AnswerStore,
) -> ScoredRecommendation {
    let mut scored = engine().score(
        std::slice::from_ref(service),
        std::slice::from_ref(variant),
        answers,
    );
    assert_eq!(scored.len(), 1, "variant should join its service");
    scored.remove(0)
}

pub(super) fn reference_service() -> RecommendationService<StaticCatalog> {
    RecommendationService::new(Arc::new(StaticCatalog::reference()))
}

/// Accessor whose variant fetch always fails, counting the attempts.
#[derive(Default)]
pub(super) struct OfflineCatalog {
    pub(super) attempts: AtomicUsize,
}

#[async_trait]
impl CatalogAccessor for OfflineCatalog {
    async fn fetch_services(&self) -> Result<Vec<Service>, CatalogError> {
        Ok(vec![service("aws-ec2", Provider::Aws, ServiceCategory::Compute)])
    }

    async fn fetch_variants(&self) -> Result<Vec<Variant>, CatalogError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(CatalogError::Unavailable("variants table offline".to_string()))
    }
}

pub(super) fn router_with_service<C>(service: RecommendationService<C>) -> axum::Router
where
    C: CatalogAccessor + 'static,
{
    recommendation_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
