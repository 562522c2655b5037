use super::domain::{CatalogSnapshot, Provider, Service, ServiceCategory, Variant, NO_GPU};

pub(super) fn reference_snapshot() -> CatalogSnapshot {
    CatalogSnapshot::new(reference_services(), reference_variants())
}

fn service(service_id: &str, provider: Provider, category: ServiceCategory) -> Service {
    Service {
        service_id: service_id.to_string(),
        provider,
        category,
    }
}

struct Sku {
    variant_id: &'static str,
    service_id: &'static str,
    name: &'static str,
    vcpu: Option<f64>,
    ram_gb: Option<f64>,
    gpu: &'static str,
    price_per_hour: Option<f64>,
    network: Option<&'static str>,
    use_case: Option<&'static str>,
}

impl Sku {
    fn into_variant(self) -> Variant {
        Variant {
            variant_id: self.variant_id.to_string(),
            service_id: self.service_id.to_string(),
            name: self.name.to_string(),
            vcpu: self.vcpu,
            ram_gb: self.ram_gb,
            gpu: self.gpu.to_string(),
            price_per_hour: self.price_per_hour,
            network_tier: self.network.map(str::to_string),
            use_case: self.use_case.map(str::to_string),
        }
    }
}

fn reference_services() -> Vec<Service> {
    vec![
        service("aws-ec2", Provider::Aws, ServiceCategory::Compute),
        service("aws-s3", Provider::Aws, ServiceCategory::Storage),
        service("aws-rds", Provider::Aws, ServiceCategory::Database),
        service("gcp-compute-engine", Provider::Gcp, ServiceCategory::Compute),
        service("gcp-cloud-storage", Provider::Gcp, ServiceCategory::Storage),
        service("gcp-cloud-sql", Provider::Gcp, ServiceCategory::Database),
        service("azure-vm", Provider::Azure, ServiceCategory::Compute),
        service("azure-blob", Provider::Azure, ServiceCategory::Storage),
        service("azure-sql", Provider::Azure, ServiceCategory::Database),
        service("azure-monitor", Provider::Azure, ServiceCategory::Monitoring),
    ]
}

fn reference_variants() -> Vec<Variant> {
    vec![
        Sku {
            variant_id: "aws-t3-medium",
            service_id: "aws-ec2",
            name: "t3.medium",
            vcpu: Some(2.0),
            ram_gb: Some(4.0),
            gpu: NO_GPU,
            price_per_hour: Some(0.0416),
            network: Some("Up to 5 Gbps"),
            use_case: Some("General Purpose"),
        },
        Sku {
            variant_id: "aws-m5-2xlarge",
            service_id: "aws-ec2",
            name: "m5.2xlarge",
            vcpu: Some(8.0),
            ram_gb: Some(32.0),
            gpu: NO_GPU,
            price_per_hour: Some(0.384),
            network: Some("Up to 10 Gbps"),
            use_case: Some("Enterprise Applications"),
        },
        Sku {
            variant_id: "aws-p3-2xlarge",
            service_id: "aws-ec2",
            name: "p3.2xlarge",
            vcpu: Some(8.0),
            ram_gb: Some(61.0),
            gpu: "V100",
            price_per_hour: Some(3.06),
            network: Some("Up to 10 Gbps"),
            use_case: Some("High Performance ML Training"),
        },
        Sku {
            variant_id: "aws-s3-standard",
            service_id: "aws-s3",
            name: "S3 Standard",
            vcpu: None,
            ram_gb: None,
            gpu: NO_GPU,
            price_per_hour: Some(0.032),
            network: None,
            use_case: Some("Object Storage"),
        },
        Sku {
            variant_id: "aws-db-m5-large",
            service_id: "aws-rds",
            name: "db.m5.large",
            vcpu: Some(2.0),
            ram_gb: Some(8.0),
            gpu: NO_GPU,
            price_per_hour: Some(0.171),
            network: Some("Up to 10 Gbps"),
            use_case: Some("Enterprise Database"),
        },
        Sku {
            variant_id: "gcp-e2-medium",
            service_id: "gcp-compute-engine",
            name: "e2-medium",
            vcpu: Some(2.0),
            ram_gb: Some(4.0),
            gpu: NO_GPU,
            price_per_hour: Some(0.0335),
            network: Some("Up to 4 Gbps"),
            use_case: Some("General Purpose"),
        },
        Sku {
            variant_id: "gcp-n2-standard-8",
            service_id: "gcp-compute-engine",
            name: "n2-standard-8",
            vcpu: Some(8.0),
            ram_gb: Some(32.0),
            gpu: NO_GPU,
            price_per_hour: Some(0.3885),
            network: Some("16 Gbps"),
            use_case: Some("Enterprise Applications"),
        },
        Sku {
            variant_id: "gcp-a2-highgpu-1g",
            service_id: "gcp-compute-engine",
            name: "a2-highgpu-1g",
            vcpu: Some(12.0),
            ram_gb: Some(85.0),
            gpu: "A100",
            price_per_hour: Some(3.67),
            network: Some("24 Gbps"),
            use_case: Some("High Performance ML Training"),
        },
        Sku {
            variant_id: "gcp-gcs-standard",
            service_id: "gcp-cloud-storage",
            name: "Cloud Storage Standard",
            vcpu: None,
            ram_gb: None,
            gpu: NO_GPU,
            price_per_hour: Some(0.028),
            network: None,
            use_case: Some("Object Storage"),
        },
        Sku {
            variant_id: "gcp-sql-custom-2",
            service_id: "gcp-cloud-sql",
            name: "db-custom-2-7680",
            vcpu: Some(2.0),
            ram_gb: Some(7.5),
            gpu: NO_GPU,
            price_per_hour: Some(0.1256),
            network: Some("Up to 10 Gbps"),
            use_case: Some("Managed SQL"),
        },
        Sku {
            variant_id: "azure-b2s",
            service_id: "azure-vm",
            name: "B2s",
            vcpu: Some(2.0),
            ram_gb: Some(4.0),
            gpu: NO_GPU,
            price_per_hour: Some(0.0416),
            network: Some("Moderate"),
            use_case: Some("Burstable General Purpose"),
        },
        Sku {
            variant_id: "azure-d8s-v5",
            service_id: "azure-vm",
            name: "D8s v5",
            vcpu: Some(8.0),
            ram_gb: Some(32.0),
            gpu: NO_GPU,
            price_per_hour: Some(0.384),
            network: Some("12.5 Gbps"),
            use_case: Some("Enterprise Applications"),
        },
        Sku {
            variant_id: "azure-nc6s-v3",
            service_id: "azure-vm",
            name: "NC6s v3",
            vcpu: Some(6.0),
            ram_gb: Some(112.0),
            gpu: "V100",
            price_per_hour: Some(3.06),
            network: Some("24 Gbps"),
            use_case: Some("High Performance ML Training"),
        },
        Sku {
            variant_id: "azure-blob-hot",
            service_id: "azure-blob",
            name: "Blob Storage Hot",
            vcpu: None,
            ram_gb: None,
            gpu: NO_GPU,
            price_per_hour: Some(0.025),
            network: None,
            use_case: Some("Object Storage"),
        },
        Sku {
            variant_id: "azure-sql-gp-2",
            service_id: "azure-sql",
            name: "SQL Database GP Gen5 2 vCore",
            vcpu: Some(2.0),
            ram_gb: Some(10.2),
            gpu: NO_GPU,
            price_per_hour: Some(0.505),
            network: None,
            use_case: Some("Enterprise Database"),
        },
        Sku {
            variant_id: "azure-monitor-logs",
            service_id: "azure-monitor",
            name: "Monitor Log Analytics",
            vcpu: None,
            ram_gb: None,
            gpu: NO_GPU,
            price_per_hour: None,
            network: None,
            use_case: None,
        },
    ]
    .into_iter()
    .map(Sku::into_variant)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_reference_variant_references_a_known_service() {
        let snapshot = reference_snapshot();

        for variant in &snapshot.variants {
            assert!(
                snapshot.service(&variant.service_id).is_some(),
                "variant {} references unknown service {}",
                variant.variant_id,
                variant.service_id
            );
        }
    }

    #[test]
    fn reference_catalog_covers_every_provider() {
        let snapshot = reference_snapshot();

        for provider in Provider::ordered() {
            assert!(snapshot
                .services
                .iter()
                .any(|service| service.provider == provider));
        }
    }
}
