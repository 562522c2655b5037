use super::super::ranking::{ProviderFilter, RankedRecommendation};
use super::views::{
    format_dollars, monthly_cost_cents, ComparisonRow, CostAnalysis, CostBreakdownEntry,
    RecommendationSummary, RecommendationView, RESERVED_INSTANCE_TIP, SCALE_FACTOR,
};
use serde::Serialize;

/// Ranked output of one recommendation pass. Filtering happens at read time, so the same report
/// serves every provider tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub ranked: Vec<RankedRecommendation>,
}

impl RecommendationReport {
    pub fn new(ranked: Vec<RankedRecommendation>) -> Self {
        Self { ranked }
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn views(&self, filter: ProviderFilter) -> Vec<RecommendationView> {
        filter
            .apply(&self.ranked)
            .map(RecommendationView::from)
            .collect()
    }

    pub fn comparison(&self, filter: ProviderFilter) -> Vec<ComparisonRow> {
        self.views(filter).iter().map(ComparisonRow::from).collect()
    }

    pub fn cost_analysis(&self, filter: ProviderFilter) -> CostAnalysis {
        let displayed: Vec<&RankedRecommendation> = filter.apply(&self.ranked).collect();

        let breakdown = displayed
            .iter()
            .map(|entry| CostBreakdownEntry {
                rank: entry.rank,
                provider: entry.provider(),
                instance_type: entry.recommendation.variant.name.clone(),
                monthly_cost: format_dollars(monthly_cost_cents(&entry.recommendation.variant)),
            })
            .collect();

        let top_monthly = displayed
            .first()
            .map(|entry| monthly_cost_cents(&entry.recommendation.variant))
            .unwrap_or(0.0);

        CostAnalysis {
            breakdown,
            scale_factor: SCALE_FACTOR,
            scaled_monthly_cost: format_dollars(top_monthly * f64::from(SCALE_FACTOR)),
            optimization_tip: RESERVED_INSTANCE_TIP,
        }
    }

    pub fn summary(&self, filter: ProviderFilter) -> RecommendationSummary {
        let recommendations = self.views(filter);
        let comparison = recommendations.iter().map(ComparisonRow::from).collect();

        RecommendationSummary {
            provider_filter: filter,
            recommendations,
            comparison,
            cost_analysis: self.cost_analysis(filter),
        }
    }
}
