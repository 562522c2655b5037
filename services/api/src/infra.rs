use async_trait::async_trait;
use clap::Args;
use cloud_advisor::config::CatalogConfig;
use cloud_advisor::error::AppError;
use cloud_advisor::workflows::catalog::{
    CatalogAccessor, CatalogError, CsvCatalog, Service, StaticCatalog, Variant,
};
use cloud_advisor::workflows::questionnaire::{AnswerStore, QuestionnaireBlueprint};
use cloud_advisor::workflows::recommendation::ProviderFilter;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog selected at startup: the built-in reference data or a pair of CSV exports.
#[derive(Debug, Clone)]
pub(crate) enum AdvisorCatalog {
    Reference(StaticCatalog),
    Csv(CsvCatalog),
}

impl AdvisorCatalog {
    pub(crate) fn from_config(config: &CatalogConfig) -> Self {
        match config {
            CatalogConfig::Reference => Self::Reference(StaticCatalog::reference()),
            CatalogConfig::Csv { services, variants } => {
                Self::Csv(CsvCatalog::new(services.clone(), variants.clone()))
            }
        }
    }

    pub(crate) fn source_label(&self) -> &'static str {
        match self {
            Self::Reference(_) => "built-in reference catalog",
            Self::Csv(_) => "CSV catalog exports",
        }
    }
}

#[async_trait]
impl CatalogAccessor for AdvisorCatalog {
    async fn fetch_services(&self) -> Result<Vec<Service>, CatalogError> {
        match self {
            Self::Reference(catalog) => catalog.fetch_services().await,
            Self::Csv(catalog) => catalog.fetch_services().await,
        }
    }

    async fn fetch_variants(&self) -> Result<Vec<Variant>, CatalogError> {
        match self {
            Self::Reference(catalog) => catalog.fetch_variants().await,
            Self::Csv(catalog) => catalog.fetch_variants().await,
        }
    }
}

/// Catalog overrides shared by the offline commands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CatalogArgs {
    /// services.csv export (requires --variants-csv)
    #[arg(long, requires = "variants_csv")]
    pub(crate) services_csv: Option<PathBuf>,
    /// variants.csv export (requires --services-csv)
    #[arg(long, requires = "services_csv")]
    pub(crate) variants_csv: Option<PathBuf>,
}

impl CatalogArgs {
    /// Explicit CSV paths win; otherwise fall back to the environment configuration.
    pub(crate) fn resolve(self, configured: CatalogConfig) -> CatalogConfig {
        match (self.services_csv, self.variants_csv) {
            (Some(services), Some(variants)) => CatalogConfig::Csv { services, variants },
            _ => configured,
        }
    }
}

pub(crate) fn load_answers(path: &Path) -> Result<AnswerStore, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_answers(&raw)
}

fn parse_answers(raw: &str) -> Result<AnswerStore, AppError> {
    let answers: AnswerStore = serde_json::from_str(raw)?;
    let answers = QuestionnaireBlueprint::standard().conform(&answers)?;
    Ok(answers)
}

pub(crate) fn parse_provider_filter(raw: &str) -> Result<ProviderFilter, String> {
    raw.parse::<ProviderFilter>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_csv_paths_override_configuration() {
        let args = CatalogArgs {
            services_csv: Some(PathBuf::from("services.csv")),
            variants_csv: Some(PathBuf::from("variants.csv")),
        };

        let resolved = args.resolve(CatalogConfig::Reference);

        assert_eq!(
            resolved,
            CatalogConfig::Csv {
                services: PathBuf::from("services.csv"),
                variants: PathBuf::from("variants.csv"),
            }
        );
        assert_eq!(
            CatalogArgs::default().resolve(CatalogConfig::Reference),
            CatalogConfig::Reference
        );
    }

    #[test]
    fn answers_files_accept_scalar_selections() {
        let answers = parse_answers(r#"{"services":"compute","providers":"aws"}"#)
            .expect("answers load");

        assert_eq!(answers.multiple("services"), ["compute".to_string()]);
        assert_eq!(answers.multiple("providers"), ["aws".to_string()]);

        let err = parse_answers(r#"{"compute_gpu":["yes","no"]}"#).expect_err("rejected");
        assert!(matches!(err, AppError::Questionnaire(_)));
    }

    #[test]
    fn provider_filter_parser_reports_unknown_values() {
        assert_eq!(parse_provider_filter("all"), Ok(ProviderFilter::All));
        assert!(parse_provider_filter("oracle")
            .expect_err("unknown provider")
            .contains("oracle"));
    }

    #[tokio::test]
    async fn reference_catalog_is_the_default_source() {
        let catalog = AdvisorCatalog::from_config(&CatalogConfig::Reference);

        assert_eq!(catalog.source_label(), "built-in reference catalog");
        assert!(!catalog.fetch_services().await.expect("services").is_empty());
    }
}
