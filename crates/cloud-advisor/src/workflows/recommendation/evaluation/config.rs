use serde::{Deserialize, Serialize};

/// Points awarded by each scoring term, plus the thresholds those terms compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub web_on_compute: u32,
    pub ml_on_gpu: u32,
    pub batch_on_compute: u32,
    pub category_match: u32,
    pub provider_preference: u32,
    pub high_traffic: u32,
    pub low_traffic: u32,
    pub gpu_required: u32,
    pub gpu_avoided: u32,
    pub cost_efficiency: u32,
    pub high_traffic_min_vcpu: u32,
    pub low_traffic_max_vcpu: u32,
    /// Exclusive upper bound on the hourly price for the cost-efficiency bonus.
    pub cost_efficient_below_hourly: f64,
}

impl ScoringWeights {
    pub fn standard() -> Self {
        Self {
            web_on_compute: 30,
            ml_on_gpu: 40,
            batch_on_compute: 25,
            category_match: 25,
            provider_preference: 20,
            high_traffic: 20,
            low_traffic: 15,
            gpu_required: 35,
            gpu_avoided: 10,
            cost_efficiency: 15,
            high_traffic_min_vcpu: 8,
            low_traffic_max_vcpu: 4,
            cost_efficient_below_hourly: 1.0,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::standard()
    }
}
