/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Standard AWS partitions and the hostname rules used to build endpoints within them.

pub mod endpoint;

use crate::{AwsEndpoint, BoxError, CredentialScope, Params, ResolveAwsEndpoint};
use aws_types::region::{Region, SigningRegion};
use aws_types::SigningService;
use endpoint::{Definition, Protocol};
use once_cell::sync::Lazy;
use regex::Regex;
use smithy_http::endpoint::Endpoint;

/// A group of AWS regions sharing a DNS suffix, for example `aws-cn`
#[derive(Debug)]
pub struct Partition {
    id: &'static str,
    region_regex: Regex,
    dns_suffix: &'static str,
    dual_stack_dns_suffix: &'static str,
    supports_fips: bool,
    supports_dual_stack: bool,
}

impl Partition {
    pub fn builder() -> builder::Builder {
        builder::Builder::default()
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn can_resolve(&self, region: &Region) -> bool {
        self.region_regex.is_match(region.as_ref())
    }

    /// The endpoint definition for `service` in this partition, honoring the FIPS and
    /// dual-stack flags
    pub fn definition(
        &self,
        service: &str,
        use_fips: bool,
        use_dual_stack: bool,
    ) -> Result<Definition, BoxError> {
        if use_fips && !self.supports_fips {
            return Err(format!("partition `{}` does not support FIPS", self.id).into());
        }
        if use_dual_stack && !self.supports_dual_stack {
            return Err(format!("partition `{}` does not support dual-stack", self.id).into());
        }
        let service = if use_fips {
            format!("{}-fips", service)
        } else {
            service.to_string()
        };
        let dns_suffix = if use_dual_stack {
            self.dual_stack_dns_suffix
        } else {
            self.dns_suffix
        };
        Ok(Definition {
            uri_template: format!("{}.{{region}}.{}", service, dns_suffix),
            protocol: Protocol::Https,
            credential_scope: CredentialScope::default(),
        })
    }
}

pub mod builder {
    use crate::partition::Partition;
    use regex::Regex;

    #[derive(Debug, Default)]
    pub struct Builder {
        id: Option<&'static str>,
        region_regex: Option<Regex>,
        dns_suffix: Option<&'static str>,
        dual_stack_dns_suffix: Option<&'static str>,
        supports_fips: bool,
        supports_dual_stack: bool,
    }

    impl Builder {
        pub fn id(mut self, id: &'static str) -> Self {
            self.id = Some(id);
            self
        }

        pub fn region_regex(mut self, regex: &'static str) -> Self {
            self.region_regex = Regex::new(regex).ok();
            self
        }

        pub fn dns_suffix(mut self, suffix: &'static str) -> Self {
            self.dns_suffix = Some(suffix);
            self
        }

        pub fn dual_stack_dns_suffix(mut self, suffix: &'static str) -> Self {
            self.dual_stack_dns_suffix = Some(suffix);
            self
        }

        pub fn supports_fips(mut self, supports: bool) -> Self {
            self.supports_fips = supports;
            self
        }

        pub fn supports_dual_stack(mut self, supports: bool) -> Self {
            self.supports_dual_stack = supports;
            self
        }

        /// Returns `None` if a required field is missing or the region regex was invalid
        pub fn build(self) -> Option<Partition> {
            let dns_suffix = self.dns_suffix?;
            Some(Partition {
                id: self.id?,
                region_regex: self.region_regex?,
                dns_suffix,
                dual_stack_dns_suffix: self.dual_stack_dns_suffix.unwrap_or(dns_suffix),
                supports_fips: self.supports_fips,
                supports_dual_stack: self.supports_dual_stack,
            })
        }
    }
}

/// Selects the partition for a region, falling back to a base partition for regions no partition
/// claims
#[derive(Debug)]
pub struct PartitionResolver {
    base: Partition,
    regionalized: Vec<Partition>,
}

impl PartitionResolver {
    pub fn new(base: Partition, regionalized: Vec<Partition>) -> Self {
        Self { base, regionalized }
    }

    pub fn resolve_partition(&self, region: &Region) -> &Partition {
        self.regionalized
            .iter()
            .find(|partition| partition.can_resolve(region))
            .unwrap_or(&self.base)
    }
}

fn aws_partitions() -> Option<PartitionResolver> {
    let aws_cn = Partition::builder()
        .id("aws-cn")
        .region_regex(r#"^cn\-\w+\-\d+$"#)
        .dns_suffix("amazonaws.com.cn")
        .dual_stack_dns_suffix("api.amazonwebservices.com.cn")
        .supports_fips(true)
        .supports_dual_stack(true)
        .build()?;
    let aws_us_gov = Partition::builder()
        .id("aws-us-gov")
        .region_regex(r#"^us\-gov\-\w+\-\d+$"#)
        .dns_suffix("amazonaws.com")
        .dual_stack_dns_suffix("api.aws")
        .supports_fips(true)
        .supports_dual_stack(true)
        .build()?;
    // `aws` also takes every region no other partition claims
    let aws = Partition::builder()
        .id("aws")
        .region_regex(r#"^(us|eu|ap|sa|ca|me|af|il|mx)\-\w+\-\d+$"#)
        .dns_suffix("amazonaws.com")
        .dual_stack_dns_suffix("api.aws")
        .supports_fips(true)
        .supports_dual_stack(true)
        .build()?;
    Some(PartitionResolver::new(aws, vec![aws_us_gov, aws_cn]))
}

static AWS_PARTITIONS: Lazy<Option<PartitionResolver>> = Lazy::new(aws_partitions);

// Region names are used verbatim as a hostname label.
static VALID_REGION: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"^[a-z0-9]([a-z0-9\-]*[a-z0-9])?$"#).ok());

/// Resolves endpoints for one service across the standard AWS partitions
/// (`aws`, `aws-cn` and `aws-us-gov`)
#[derive(Debug, Clone)]
pub struct DefaultAwsEndpointResolver {
    service: &'static str,
    signing_service: Option<SigningService>,
}

impl DefaultAwsEndpointResolver {
    /// `service` is the endpoint prefix of the service, for example `datapipeline`
    pub fn new(service: &'static str) -> Self {
        Self {
            service,
            signing_service: None,
        }
    }

    /// Sign for a service name that differs from the endpoint prefix
    pub fn with_signing_service(mut self, signing_service: SigningService) -> Self {
        self.signing_service = Some(signing_service);
        self
    }

    fn resolve_override(&self, url: &str, region: &Region) -> Result<AwsEndpoint, BoxError> {
        let uri: http::Uri = url.parse()?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(format!(
                "endpoint override `{}` must include a scheme and a host",
                url
            )
            .into());
        }
        Ok(AwsEndpoint::new(
            Endpoint::immutable(uri),
            self.credential_scope(region),
        ))
    }

    fn credential_scope(&self, region: &Region) -> CredentialScope {
        let scope = CredentialScope::builder().region(SigningRegion::from(region.clone()));
        match &self.signing_service {
            Some(service) => scope.service(service.clone()).build(),
            None => scope.build(),
        }
    }
}

impl ResolveAwsEndpoint for DefaultAwsEndpointResolver {
    fn resolve_endpoint(&self, params: &Params) -> Result<AwsEndpoint, BoxError> {
        let region = params.region().ok_or("no region configured")?;
        if let Some(url) = params.endpoint_url() {
            if params.use_fips() || params.use_dual_stack() {
                tracing::debug!("FIPS and dual-stack settings are ignored for endpoint overrides");
            }
            return self.resolve_override(url, region);
        }
        let valid_region = VALID_REGION
            .as_ref()
            .map(|regex| regex.is_match(region.as_ref()))
            .unwrap_or(false);
        if !valid_region {
            return Err(format!("`{}` is not a valid region", region).into());
        }
        let partitions = AWS_PARTITIONS
            .as_ref()
            .ok_or("partition metadata is invalid")?;
        let partition = partitions.resolve_partition(region);
        let mut definition =
            partition.definition(self.service, params.use_fips(), params.use_dual_stack())?;
        if let Some(service) = &self.signing_service {
            definition.credential_scope =
                CredentialScope::builder().service(service.clone()).build();
        }
        tracing::trace!(partition = partition.id(), "selected partition");
        definition.resolve(region)
    }
}

#[cfg(test)]
mod test {
    use crate::partition::{
        DefaultAwsEndpointResolver, Partition, PartitionResolver, AWS_PARTITIONS,
    };
    use crate::{Params, ResolveAwsEndpoint};
    use aws_types::region::{Region, SigningRegion};
    use aws_types::SigningService;

    fn resolve(params: Params) -> String {
        DefaultAwsEndpointResolver::new("datapipeline")
            .resolve_endpoint(&params)
            .expect("valid endpoint")
            .endpoint()
            .uri()
            .to_string()
    }

    fn region(region: &'static str) -> Params {
        Params::new(Some(Region::from_static(region)))
    }

    #[test]
    fn standard_partitions() {
        assert_eq!(
            resolve(region("us-east-1")),
            "https://datapipeline.us-east-1.amazonaws.com/"
        );
        assert_eq!(
            resolve(region("cn-north-1")),
            "https://datapipeline.cn-north-1.amazonaws.com.cn/"
        );
        assert_eq!(
            resolve(region("us-gov-west-1")),
            "https://datapipeline.us-gov-west-1.amazonaws.com/"
        );
    }

    #[test]
    fn unknown_regions_use_the_aws_partition() {
        assert_eq!(
            resolve(region("mars-central-1")),
            "https://datapipeline.mars-central-1.amazonaws.com/"
        );
    }

    #[test]
    fn fips_and_dual_stack_variants() {
        assert_eq!(
            resolve(region("us-east-1").with_fips(true)),
            "https://datapipeline-fips.us-east-1.amazonaws.com/"
        );
        assert_eq!(
            resolve(region("us-east-1").with_dual_stack(true)),
            "https://datapipeline.us-east-1.api.aws/"
        );
        assert_eq!(
            resolve(region("cn-north-1").with_fips(true).with_dual_stack(true)),
            "https://datapipeline-fips.cn-north-1.api.amazonwebservices.com.cn/"
        );
    }

    #[test]
    fn override_wins_over_partitions() {
        assert_eq!(
            resolve(
                region("us-east-1")
                    .with_fips(true)
                    .with_endpoint_url(Some("https://proxy.internal:8443".into()))
            ),
            "https://proxy.internal:8443/"
        );
    }

    #[test]
    fn invalid_inputs_fail() {
        let resolver = DefaultAwsEndpointResolver::new("datapipeline");
        assert!(resolver.resolve_endpoint(&Params::new(None)).is_err());
        assert!(resolver
            .resolve_endpoint(&region("Not A Region"))
            .is_err());
        assert!(resolver
            .resolve_endpoint(&region("us-east-1").with_endpoint_url(Some("/just/a/path".into())))
            .is_err());
    }

    #[test]
    fn credential_scope_uses_region_and_signing_service() {
        let endpoint = DefaultAwsEndpointResolver::new("datapipeline")
            .with_signing_service(SigningService::from_static("datapipeline"))
            .resolve_endpoint(&region("eu-west-1"))
            .expect("valid endpoint");
        assert_eq!(
            endpoint.credential_scope().region(),
            Some(&SigningRegion::from_static("eu-west-1"))
        );
        assert_eq!(
            endpoint.credential_scope().service(),
            Some(&SigningService::from_static("datapipeline"))
        );
    }

    #[test]
    fn each_region_maps_to_one_partition() {
        let partitions = AWS_PARTITIONS.as_ref().expect("valid partitions");
        let id = |region: &'static str| {
            partitions
                .resolve_partition(&Region::from_static(region))
                .id()
        };
        assert_eq!(id("us-gov-west-1"), "aws-us-gov");
        assert_eq!(id("cn-northwest-1"), "aws-cn");
        assert_eq!(id("eu-central-1"), "aws");
        assert_eq!(id("mars-central-1"), "aws");
    }

    #[test]
    fn credential_scope_without_signing_service() {
        let endpoint = DefaultAwsEndpointResolver::new("appsync")
            .resolve_endpoint(&region("ap-south-1"))
            .expect("valid endpoint");
        assert_eq!(
            endpoint.credential_scope().region(),
            Some(&SigningRegion::from_static("ap-south-1"))
        );
        assert_eq!(endpoint.credential_scope().service(), None);
    }

    #[test]
    fn partition_without_dual_stack_rejects_it() {
        let partition = Partition::builder()
            .id("test")
            .region_regex(r#"^test\-\d+$"#)
            .dns_suffix("example.com")
            .build()
            .expect("valid partition");
        assert!(partition.definition("svc", false, true).is_err());
        assert!(partition.definition("svc", true, false).is_err());
        let resolver = PartitionResolver::new(partition, vec![]);
        assert_eq!(
            resolver
                .resolve_partition(&Region::from_static("anything"))
                .id(),
            "test"
        );
    }
}
