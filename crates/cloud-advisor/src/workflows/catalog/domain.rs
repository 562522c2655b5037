use serde::{Deserialize, Serialize};

/// Cloud providers the recommendation engine knows how to rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "GCP")]
    Gcp,
    #[serde(rename = "Azure")]
    Azure,
}

impl Provider {
    /// Canonical ranking order.
    pub const fn ordered() -> [Self; 3] {
        [Self::Aws, Self::Gcp, Self::Azure]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Gcp => "GCP",
            Self::Azure => "Azure",
        }
    }

    /// Lowercase identifier used by questionnaire options and provider filters.
    pub const fn option_id(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Gcp => "gcp",
            Self::Azure => "azure",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "aws" | "amazon" | "amazon web services" => Some(Self::Aws),
            "gcp" | "google" | "google cloud" | "google cloud platform" => Some(Self::Gcp),
            "azure" | "microsoft azure" => Some(Self::Azure),
            _ => None,
        }
    }
}

/// Service categories offered by the catalog and selectable in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceCategory {
    Compute,
    Storage,
    Database,
    Networking,
    Security,
    Monitoring,
}

impl ServiceCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Compute,
            Self::Storage,
            Self::Database,
            Self::Networking,
            Self::Security,
            Self::Monitoring,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Storage => "Storage",
            Self::Database => "Database",
            Self::Networking => "Networking",
            Self::Security => "Security",
            Self::Monitoring => "Monitoring",
        }
    }

    pub const fn option_id(self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Storage => "storage",
            Self::Database => "database",
            Self::Networking => "networking",
            Self::Security => "security",
            Self::Monitoring => "monitoring",
        }
    }

    /// Whether selecting this category in the questionnaire earns a category-match bonus.
    /// Networking, security and monitoring selections only drive follow-up questions.
    pub const fn rewards_selection(self) -> bool {
        matches!(self, Self::Compute | Self::Storage | Self::Database)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compute" => Some(Self::Compute),
            "storage" => Some(Self::Storage),
            "database" => Some(Self::Database),
            "networking" | "network" => Some(Self::Networking),
            "security" => Some(Self::Security),
            "monitoring" => Some(Self::Monitoring),
            _ => None,
        }
    }
}

/// Immutable catalog entry grouping variants under a provider and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub service_id: String,
    pub provider: Provider,
    pub category: ServiceCategory,
}

/// Purchasable SKU of a catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub variant_id: String,
    pub service_id: String,
    pub name: String,
    pub vcpu: Option<f64>,
    pub ram_gb: Option<f64>,
    pub gpu: String,
    pub price_per_hour: Option<f64>,
    pub network_tier: Option<String>,
    pub use_case: Option<String>,
}

pub const NO_GPU: &str = "None";

impl Variant {
    pub fn has_gpu(&self) -> bool {
        let gpu = self.gpu.trim();
        !gpu.is_empty() && !gpu.eq_ignore_ascii_case(NO_GPU)
    }

    /// vCPU count if known. Shared-core SKUs report fractions; a non-positive count carries
    /// no information and is treated as absent.
    pub fn known_vcpu(&self) -> Option<f64> {
        self.vcpu.filter(|count| count.is_finite() && *count > 0.0)
    }

    pub fn hourly_price(&self) -> f64 {
        self.price_per_hour.unwrap_or(0.0)
    }

    pub fn monthly_cost(&self) -> f64 {
        self.hourly_price() * HOURS_PER_MONTH
    }

    pub fn use_case_mentions(&self, needle: &str) -> bool {
        self.use_case
            .as_deref()
            .map(|tag| tag.contains(needle))
            .unwrap_or(false)
    }
}

pub const HOURS_PER_MONTH: f64 = 24.0 * 30.0;

/// Read-only snapshot of the catalog for one scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub services: Vec<Service>,
    pub variants: Vec<Variant>,
}

impl CatalogSnapshot {
    pub fn new(services: Vec<Service>, variants: Vec<Variant>) -> Self {
        Self { services, variants }
    }

    pub fn service(&self, service_id: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|service| service.service_id == service_id)
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
