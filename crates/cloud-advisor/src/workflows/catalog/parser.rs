use super::domain::{Provider, Service, ServiceCategory, Variant, NO_GPU};
use super::CatalogError;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_services<R: Read>(reader: R) -> Result<Vec<Service>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut services = Vec::new();

    for (index, record) in csv_reader.deserialize::<ServiceRow>().enumerate() {
        let row = record?;
        let Some(provider) = Provider::parse(&row.provider) else {
            tracing::debug!(
                service_id = %row.service_id,
                provider = %row.provider,
                "skipping service from unsupported provider"
            );
            continue;
        };
        let category =
            ServiceCategory::parse(&row.category).ok_or_else(|| CatalogError::InvalidRecord {
                line: index + 2,
                detail: format!("unknown service category '{}'", row.category),
            })?;

        services.push(Service {
            service_id: row.service_id,
            provider,
            category,
        });
    }

    Ok(services)
}

pub(crate) fn parse_variants<R: Read>(reader: R) -> Result<Vec<Variant>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut variants = Vec::new();

    for (index, record) in csv_reader.deserialize::<VariantRow>().enumerate() {
        let row = record?;
        let line = index + 2;

        if let Some(price) = row.price_per_hr {
            if !price.is_finite() || price < 0.0 {
                return Err(CatalogError::InvalidRecord {
                    line,
                    detail: format!("price_per_hr must be a non-negative number, got {price}"),
                });
            }
        }

        variants.push(Variant {
            variant_id: row.variant_id,
            service_id: row.service_id,
            name: row.variant_name,
            vcpu: row.vcpu,
            ram_gb: row.ram_gb,
            gpu: row.gpu.unwrap_or_else(|| NO_GPU.to_string()),
            price_per_hour: row.price_per_hr,
            network_tier: row.network_gbps,
            use_case: row.use_case,
        });
    }

    Ok(variants)
}

#[derive(Debug, Deserialize)]
struct ServiceRow {
    service_id: String,
    provider: String,
    category: String,
}

#[derive(Debug, Deserialize)]
struct VariantRow {
    variant_id: String,
    service_id: String,
    variant_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vcpu: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ram_gb: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gpu: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    price_per_hr: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    network_gbps: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    use_case: Option<String>,
}

fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
