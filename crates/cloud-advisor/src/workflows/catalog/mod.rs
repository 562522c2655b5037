//! Read-only access to the cloud service catalog.
//!
//! The engine only ever sees a complete [`CatalogSnapshot`]. Accessors fetch services and
//! variants separately, and [`load_snapshot`] fails the whole pass if either fetch fails.

pub mod domain;
mod parser;
mod reference;

pub use domain::{
    CatalogSnapshot, Provider, Service, ServiceCategory, Variant, HOURS_PER_MONTH, NO_GPU,
};

use async_trait::async_trait;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid catalog record on line {line}: {detail}")]
    InvalidRecord { line: usize, detail: String },
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Source of catalog records. Implementations return complete collections or fail.
#[async_trait]
pub trait CatalogAccessor: Send + Sync {
    async fn fetch_services(&self) -> Result<Vec<Service>, CatalogError>;
    async fn fetch_variants(&self) -> Result<Vec<Variant>, CatalogError>;
}

/// Fetch both collections and return a snapshot; partial catalogs are never produced.
pub async fn load_snapshot<C>(accessor: &C) -> Result<CatalogSnapshot, CatalogError>
where
    C: CatalogAccessor + ?Sized,
{
    let services = accessor.fetch_services().await?;
    let variants = accessor.fetch_variants().await?;

    tracing::debug!(
        services = services.len(),
        variants = variants.len(),
        "catalog snapshot loaded"
    );

    Ok(CatalogSnapshot::new(services, variants))
}

/// In-memory catalog, used for the built-in reference data and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    snapshot: CatalogSnapshot,
}

impl StaticCatalog {
    pub fn new(services: Vec<Service>, variants: Vec<Variant>) -> Self {
        Self {
            snapshot: CatalogSnapshot::new(services, variants),
        }
    }

    /// Small curated catalog covering every provider and the scored categories.
    pub fn reference() -> Self {
        Self {
            snapshot: reference::reference_snapshot(),
        }
    }

    pub fn from_readers<S: Read, V: Read>(services: S, variants: V) -> Result<Self, CatalogError> {
        Ok(Self::new(
            parser::parse_services(services)?,
            parser::parse_variants(variants)?,
        ))
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl CatalogAccessor for StaticCatalog {
    async fn fetch_services(&self) -> Result<Vec<Service>, CatalogError> {
        Ok(self.snapshot.services.clone())
    }

    async fn fetch_variants(&self) -> Result<Vec<Variant>, CatalogError> {
        Ok(self.snapshot.variants.clone())
    }
}

/// Catalog backed by a pair of CSV exports, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    services_path: PathBuf,
    variants_path: PathBuf,
}

impl CsvCatalog {
    pub fn new(services_path: impl Into<PathBuf>, variants_path: impl Into<PathBuf>) -> Self {
        Self {
            services_path: services_path.into(),
            variants_path: variants_path.into(),
        }
    }

    async fn read(path: &Path) -> Result<Vec<u8>, CatalogError> {
        tokio::fs::read(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[async_trait]
impl CatalogAccessor for CsvCatalog {
    async fn fetch_services(&self) -> Result<Vec<Service>, CatalogError> {
        let bytes = Self::read(&self.services_path).await?;
        parser::parse_services(bytes.as_slice())
    }

    async fn fetch_variants(&self) -> Result<Vec<Variant>, CatalogError> {
        let bytes = Self::read(&self.variants_path).await?;
        parser::parse_variants(bytes.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenVariants;

    #[async_trait]
    impl CatalogAccessor for BrokenVariants {
        async fn fetch_services(&self) -> Result<Vec<Service>, CatalogError> {
            Ok(StaticCatalog::reference().snapshot().services.clone())
        }

        async fn fetch_variants(&self) -> Result<Vec<Variant>, CatalogError> {
            Err(CatalogError::Unavailable("variants table offline".to_string()))
        }
    }

    #[tokio::test]
    async fn snapshot_fails_when_either_collection_fails() {
        let err = load_snapshot(&BrokenVariants)
            .await
            .expect_err("partial catalogs are rejected");

        assert!(err.to_string().contains("variants table offline"));
    }

    #[tokio::test]
    async fn static_catalog_round_trips_snapshot() {
        let catalog = StaticCatalog::reference();

        let snapshot = load_snapshot(&catalog).await.expect("snapshot loads");

        assert_eq!(&snapshot, catalog.snapshot());
        assert!(!snapshot.is_empty());
    }

    #[tokio::test]
    async fn csv_catalog_reports_missing_files() {
        let catalog = CsvCatalog::new("/nonexistent/services.csv", "/nonexistent/variants.csv");

        let err = load_snapshot(&catalog).await.expect_err("missing file");

        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
