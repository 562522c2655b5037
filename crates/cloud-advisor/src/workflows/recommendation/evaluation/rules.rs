use super::config::ScoringWeights;
use super::{ScoreComponent, ScoreFactor};
use crate::workflows::catalog::{Service, ServiceCategory, Variant};
use crate::workflows::questionnaire::{question_ids, AnswerStore, ALL_PROVIDERS};

pub(crate) const WEB_JUSTIFICATION: &str = "Optimized for web applications";
pub(crate) const ML_JUSTIFICATION: &str = "GPU acceleration for ML workloads";
pub(crate) const BATCH_JUSTIFICATION: &str = "Suitable for batch processing";
pub(crate) const HIGH_TRAFFIC_JUSTIFICATION: &str = "High CPU count for high traffic";
pub(crate) const LOW_TRAFFIC_JUSTIFICATION: &str = "Cost-effective for low traffic";
pub(crate) const GPU_AVAILABLE_JUSTIFICATION: &str = "GPU available";
pub(crate) const NO_GPU_JUSTIFICATION: &str = "No unnecessary GPU";

/// Requirement signals read from the active answers of one scoring pass.
pub(crate) struct RequirementSignals<'a> {
    pub workload: &'a str,
    pub categories: Vec<ServiceCategory>,
    pub providers: &'a [String],
    pub traffic: &'a str,
    pub gpu: &'a str,
}

impl<'a> RequirementSignals<'a> {
    pub(crate) fn from_answers(answers: &'a AnswerStore, categories: Vec<ServiceCategory>) -> Self {
        Self {
            workload: answers.single(question_ids::WORKLOAD_TYPE),
            categories,
            providers: answers.multiple(question_ids::PROVIDERS),
            traffic: answers.single(question_ids::COMPUTE_TRAFFIC),
            gpu: answers.single(question_ids::COMPUTE_GPU),
        }
    }

    fn prefers_provider(&self, label: &str) -> bool {
        self.providers.iter().any(|preference| {
            preference.eq_ignore_ascii_case(ALL_PROVIDERS) || preference.eq_ignore_ascii_case(label)
        })
    }
}

pub(crate) fn score_variant(
    service: &Service,
    variant: &Variant,
    signals: &RequirementSignals<'_>,
    weights: &ScoringWeights,
) -> (Vec<ScoreComponent>, u32) {
    let mut components = Vec::new();
    let is_compute = service.category == ServiceCategory::Compute;

    match signals.workload {
        "web" if is_compute => components.push(ScoreComponent::noted(
            ScoreFactor::Workload,
            weights.web_on_compute,
            WEB_JUSTIFICATION,
        )),
        "ml" if variant.has_gpu() => components.push(ScoreComponent::noted(
            ScoreFactor::Workload,
            weights.ml_on_gpu,
            ML_JUSTIFICATION,
        )),
        "batch" if is_compute => components.push(ScoreComponent::noted(
            ScoreFactor::Workload,
            weights.batch_on_compute,
            BATCH_JUSTIFICATION,
        )),
        _ => {}
    }

    for category in &signals.categories {
        if category.rewards_selection() && *category == service.category {
            components.push(ScoreComponent::silent(
                ScoreFactor::CategoryMatch,
                weights.category_match,
            ));
        }
    }

    if signals.prefers_provider(service.provider.label()) {
        components.push(ScoreComponent::silent(
            ScoreFactor::ProviderPreference,
            weights.provider_preference,
        ));
    }

    if let Some(vcpu) = variant.known_vcpu() {
        match signals.traffic {
            "high" if vcpu >= f64::from(weights.high_traffic_min_vcpu) => {
                components.push(ScoreComponent::noted(
                    ScoreFactor::Traffic,
                    weights.high_traffic,
                    HIGH_TRAFFIC_JUSTIFICATION,
                ))
            }
            "low" if vcpu <= f64::from(weights.low_traffic_max_vcpu) => {
                components.push(ScoreComponent::noted(
                    ScoreFactor::Traffic,
                    weights.low_traffic,
                    LOW_TRAFFIC_JUSTIFICATION,
                ))
            }
            _ => {}
        }
    }

    match (signals.gpu, variant.has_gpu()) {
        ("yes", true) => components.push(ScoreComponent::noted(
            ScoreFactor::GpuFit,
            weights.gpu_required,
            GPU_AVAILABLE_JUSTIFICATION,
        )),
        ("no", false) => components.push(ScoreComponent::noted(
            ScoreFactor::GpuFit,
            weights.gpu_avoided,
            NO_GPU_JUSTIFICATION,
        )),
        _ => {}
    }

    let hourly = variant.hourly_price();
    if hourly > 0.0 && hourly < weights.cost_efficient_below_hourly {
        components.push(ScoreComponent::silent(
            ScoreFactor::CostEfficiency,
            weights.cost_efficiency,
        ));
    }

    let total = components.iter().map(|component| component.points).sum();
    (components, total)
}

/// Compliance tags implied by the variant's use-case tag, in a stable order.
pub(crate) fn compliance_tags(variant: &Variant) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: &str| {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    };

    if variant.use_case_mentions("Enterprise") {
        push("SOC 2");
        push("GDPR");
    }
    if variant.use_case_mentions("High Performance") {
        push("Performance Certified");
    }

    tags
}
