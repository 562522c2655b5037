use super::super::ranking::{ProviderFilter, RankedRecommendation};
use crate::workflows::catalog::{Provider, Variant, NO_GPU};
use serde::Serialize;

pub const UNKNOWN_LABEL: &str = "N/A";
pub const DEFAULT_NETWORK: &str = "Standard";
pub const DEFAULT_USE_CASE: &str = "General Purpose";
pub const SCALE_FACTOR: u32 = 2;
pub const RESERVED_INSTANCE_TIP: &str =
    "Consider reserved instances for a 30-40% discount if you plan to run this workload long-term.";

/// Display record for one ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub rank: usize,
    pub instance_id: String,
    pub provider: Provider,
    pub instance_type: String,
    pub monthly_cost: String,
    pub cpu: String,
    pub ram: String,
    pub gpu: String,
    pub network: String,
    pub use_case: String,
    pub score: u32,
    pub justification: String,
    pub compliance: Vec<String>,
}

impl From<&RankedRecommendation> for RecommendationView {
    fn from(entry: &RankedRecommendation) -> Self {
        let recommendation = &entry.recommendation;
        let variant = &recommendation.variant;

        Self {
            rank: entry.rank,
            instance_id: variant.variant_id.clone(),
            provider: recommendation.provider,
            instance_type: variant.name.clone(),
            monthly_cost: monthly_cost_label(variant),
            cpu: cpu_label(variant),
            ram: ram_label(variant),
            gpu: gpu_label(variant),
            network: text_or(variant.network_tier.as_deref(), DEFAULT_NETWORK),
            use_case: text_or(variant.use_case.as_deref(), DEFAULT_USE_CASE),
            score: recommendation.score,
            justification: recommendation.justification(),
            compliance: recommendation.compliance_tags.clone(),
        }
    }
}

/// One row of the side-by-side comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub rank: usize,
    pub provider: Provider,
    pub instance_type: String,
    pub cpu: String,
    pub ram: String,
    pub gpu: String,
    pub monthly_cost: String,
    pub score: u32,
}

impl From<&RecommendationView> for ComparisonRow {
    fn from(view: &RecommendationView) -> Self {
        Self {
            rank: view.rank,
            provider: view.provider,
            instance_type: view.instance_type.clone(),
            cpu: view.cpu.clone(),
            ram: view.ram.clone(),
            gpu: view.gpu.clone(),
            monthly_cost: view.monthly_cost.clone(),
            score: view.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdownEntry {
    pub rank: usize,
    pub provider: Provider,
    pub instance_type: String,
    pub monthly_cost: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostAnalysis {
    pub breakdown: Vec<CostBreakdownEntry>,
    pub scale_factor: u32,
    /// Monthly cost of the top displayed recommendation times `scale_factor`.
    pub scaled_monthly_cost: String,
    pub optimization_tip: &'static str,
}

/// Everything the results screen shows for one provider filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSummary {
    pub provider_filter: ProviderFilter,
    pub recommendations: Vec<RecommendationView>,
    pub comparison: Vec<ComparisonRow>,
    pub cost_analysis: CostAnalysis,
}

pub fn format_dollars(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Monthly cost rounded to cents, the precision the label carries.
pub(crate) fn monthly_cost_cents(variant: &Variant) -> f64 {
    (variant.monthly_cost() * 100.0).round() / 100.0
}

pub fn monthly_cost_label(variant: &Variant) -> String {
    format_dollars(variant.monthly_cost())
}

pub fn cpu_label(variant: &Variant) -> String {
    variant
        .known_vcpu()
        .map(|count| format!("{count}"))
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

pub fn ram_label(variant: &Variant) -> String {
    match variant.ram_gb {
        Some(ram) if ram.is_finite() && ram > 0.0 => format!("{ram}GB"),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

pub fn gpu_label(variant: &Variant) -> String {
    text_or(Some(variant.gpu.as_str()), NO_GPU)
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
