mod config;
pub(crate) mod rules;

pub use config::ScoringWeights;

use crate::workflows::catalog::{CatalogSnapshot, Provider, Service, ServiceCategory, Variant};
use crate::workflows::questionnaire::{AnswerStore, QuestionnaireBlueprint};
use rules::{compliance_tags, score_variant, RequirementSignals};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_JUSTIFICATION: &str = "Matches your requirements";

/// Additive heuristic scorer. Pure: identical inputs produce identical output.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: ScoringWeights,
    blueprint: QuestionnaireBlueprint,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringWeights::standard(), QuestionnaireBlueprint::standard())
    }
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights, blueprint: QuestionnaireBlueprint) -> Self {
        Self { weights, blueprint }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn blueprint(&self) -> &QuestionnaireBlueprint {
        &self.blueprint
    }

    pub fn score_snapshot(
        &self,
        snapshot: &CatalogSnapshot,
        answers: &AnswerStore,
    ) -> Vec<ScoredRecommendation> {
        self.score(&snapshot.services, &snapshot.variants, answers)
    }

    /// Score every variant whose service is present, in catalog order. Variants referencing an
    /// unknown service are skipped.
    pub fn score(
        &self,
        services: &[Service],
        variants: &[Variant],
        answers: &AnswerStore,
    ) -> Vec<ScoredRecommendation> {
        let active = self.blueprint.active_answers(answers);
        let categories = self.blueprint.selected_categories(&active);
        let signals = RequirementSignals::from_answers(&active, categories);

        let mut by_id: HashMap<&str, &Service> = HashMap::with_capacity(services.len());
        for service in services {
            by_id.entry(service.service_id.as_str()).or_insert(service);
        }

        let mut dropped = 0usize;
        let scored: Vec<ScoredRecommendation> = variants
            .iter()
            .filter_map(|variant| {
                let Some(service) = by_id.get(variant.service_id.as_str()) else {
                    dropped += 1;
                    return None;
                };
                Some(self.score_one(service, variant, &signals))
            })
            .collect();

        tracing::debug!(scored = scored.len(), dropped, "scoring pass complete");

        scored
    }

    fn score_one(
        &self,
        service: &Service,
        variant: &Variant,
        signals: &RequirementSignals<'_>,
    ) -> ScoredRecommendation {
        let (components, score) = score_variant(service, variant, signals, &self.weights);
        let justification_parts = components
            .iter()
            .filter_map(|component| component.note)
            .map(str::to_string)
            .collect();

        ScoredRecommendation {
            variant: variant.clone(),
            provider: service.provider,
            category: service.category,
            score,
            components,
            justification_parts,
            compliance_tags: compliance_tags(variant),
        }
    }
}

/// Scoring term that produced a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Workload,
    CategoryMatch,
    ProviderPreference,
    Traffic,
    GpuFit,
    CostEfficiency,
}

/// Discrete contribution to a variant's score, kept for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u32,
    /// Justification text shown to the user; silent terms only move the score.
    pub note: Option<&'static str>,
}

impl ScoreComponent {
    pub(crate) fn noted(factor: ScoreFactor, points: u32, note: &'static str) -> Self {
        Self {
            factor,
            points,
            note: Some(note),
        }
    }

    pub(crate) fn silent(factor: ScoreFactor, points: u32) -> Self {
        Self {
            factor,
            points,
            note: None,
        }
    }
}

/// A variant annotated with its score, justification and compliance tags for one pass.
///
/// The score has no upper bound. Presentation treats it as a rough 0-100 scale, so values
/// above 100 are possible when most terms fire and are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecommendation {
    pub variant: Variant,
    pub provider: Provider,
    pub category: ServiceCategory,
    pub score: u32,
    pub components: Vec<ScoreComponent>,
    pub justification_parts: Vec<String>,
    pub compliance_tags: Vec<String>,
}

impl ScoredRecommendation {
    pub fn variant_id(&self) -> &str {
        &self.variant.variant_id
    }

    pub fn justification(&self) -> String {
        if self.justification_parts.is_empty() {
            DEFAULT_JUSTIFICATION.to_string()
        } else {
            self.justification_parts.join(", ")
        }
    }

    pub fn points_for(&self, factor: ScoreFactor) -> u32 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.points)
            .sum()
    }
}
