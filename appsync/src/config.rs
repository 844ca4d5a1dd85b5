/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Service configuration shared by every operation

use aws_auth::provider::env::EnvironmentVariableCredentialsProvider;
use aws_auth::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_endpoint::{set_endpoint_resolver, DefaultAwsEndpointResolver, Params, ResolveAwsEndpoint};
use aws_http::user_agent::AwsUserAgent;
use aws_sig_auth::signer::OperationSigningConfig;
use aws_types::os_shim_internal::Env;
use aws_types::region::{EnvironmentVariableRegionProvider, Region};
use aws_types::SigningService;
use smithy_http::property_bag::PropertyBag;
use smithy_http::sleep::AsyncSleep;
use smithy_observability::provider::TelemetryProvider;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "client")]
use aws_hyper::retry::RetryConfig;

const SERVICE: &str = "appsync";

pub struct Config {
    pub(crate) region: Option<Region>,
    pub(crate) credentials_provider: SharedCredentialsProvider,
    pub(crate) endpoint_resolver: Arc<dyn ResolveAwsEndpoint>,
    pub(crate) endpoint_url: Option<String>,
    pub(crate) use_fips: bool,
    pub(crate) use_dual_stack: bool,
    #[cfg(feature = "client")]
    pub(crate) retry_config: Option<RetryConfig>,
    pub(crate) sleep_impl: Option<Arc<dyn AsyncSleep>>,
    pub(crate) telemetry: Option<TelemetryProvider>,
    env: Env,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("credentials_provider", &self.credentials_provider)
            .field("endpoint_resolver", &self.endpoint_resolver)
            .field("endpoint_url", &self.endpoint_url)
            .field("use_fips", &self.use_fips)
            .field("use_dual_stack", &self.use_dual_stack)
            .finish()
    }
}

impl Config {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Load the region and credentials from the process environment
    ///
    /// The region comes from `AWS_REGION` (or `AWS_DEFAULT_REGION`), credentials from
    /// `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_SESSION_TOKEN`.
    pub fn from_env() -> Self {
        Builder::default().env(Env::real()).build()
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn use_fips(&self) -> bool {
        self.use_fips
    }

    pub fn use_dual_stack(&self) -> bool {
        self.use_dual_stack
    }

    /// Populate the property bag of an operation with everything the middleware stack needs to
    /// resolve an endpoint, load credentials and sign.
    pub(crate) fn configure_request(&self, properties: &mut PropertyBag) {
        properties.insert(
            Params::new(self.region.clone())
                .with_fips(self.use_fips)
                .with_dual_stack(self.use_dual_stack)
                .with_endpoint_url(self.endpoint_url.clone()),
        );
        set_endpoint_resolver(properties, self.endpoint_resolver.clone());
        aws_auth::set_provider(properties, self.credentials_provider.clone());
        properties.insert(SigningService::from_static(SERVICE));
        properties.insert(OperationSigningConfig::default_config());
        properties.insert(AwsUserAgent::new_from_environment(
            self.env.clone(),
            crate::API_METADATA,
        ));
    }
}

#[derive(Default)]
pub struct Builder {
    region: Option<Region>,
    credentials_provider: Option<SharedCredentialsProvider>,
    endpoint_resolver: Option<Arc<dyn ResolveAwsEndpoint>>,
    endpoint_url: Option<String>,
    use_fips: Option<bool>,
    use_dual_stack: Option<bool>,
    #[cfg(feature = "client")]
    retry_config: Option<RetryConfig>,
    sleep_impl: Option<Arc<dyn AsyncSleep>>,
    telemetry: Option<TelemetryProvider>,
    env: Option<Env>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, region: impl Into<Option<Region>>) -> Self {
        self.region = region.into();
        self
    }

    pub fn credentials_provider(mut self, provider: impl ProvideCredentials + 'static) -> Self {
        self.credentials_provider = Some(SharedCredentialsProvider::new(provider));
        self
    }

    /// Replace the partition based endpoint resolver
    ///
    /// [`Endpoint`](smithy_http::endpoint::Endpoint) implements
    /// [`ResolveAwsEndpoint`] so a fixed endpoint can be used directly.
    pub fn endpoint_resolver(mut self, resolver: impl ResolveAwsEndpoint + 'static) -> Self {
        self.endpoint_resolver = Some(Arc::new(resolver));
        self
    }

    /// Send requests to `url` instead of the endpoint of the configured region
    ///
    /// `url` must include a scheme and a host. Requests are still signed for the configured region.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    pub fn use_fips(mut self, use_fips: bool) -> Self {
        self.use_fips = Some(use_fips);
        self
    }

    pub fn use_dual_stack(mut self, use_dual_stack: bool) -> Self {
        self.use_dual_stack = Some(use_dual_stack);
        self
    }

    #[cfg(feature = "client")]
    pub fn retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = Some(retry_config);
        self
    }

    pub fn sleep_impl(mut self, sleep_impl: Arc<dyn AsyncSleep>) -> Self {
        self.sleep_impl = Some(sleep_impl);
        self
    }

    pub fn telemetry_provider(mut self, telemetry: TelemetryProvider) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Fill unset fields from `env`
    ///
    /// An explicitly configured region or credentials provider always wins over the environment.
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    pub fn build(self) -> Config {
        let region = match (self.region, &self.env) {
            (Some(region), _) => Some(region),
            (None, Some(env)) => {
                EnvironmentVariableRegionProvider::new_with_env(env.clone()).region_now()
            }
            (None, None) => None,
        };
        let self_env = &self.env;
        let credentials_provider = self.credentials_provider.unwrap_or_else(|| {
            let env = self_env.clone().unwrap_or_else(Env::real);
            SharedCredentialsProvider::new(EnvironmentVariableCredentialsProvider::new_with_env(
                env,
            ))
        });
        tracing::debug!(region = ?region, "built {} config", SERVICE);
        Config {
            region,
            credentials_provider,
            endpoint_resolver: self
                .endpoint_resolver
                .unwrap_or_else(|| Arc::new(DefaultAwsEndpointResolver::new(SERVICE))),
            endpoint_url: self.endpoint_url,
            use_fips: self.use_fips.unwrap_or_default(),
            use_dual_stack: self.use_dual_stack.unwrap_or_default(),
            #[cfg(feature = "client")]
            retry_config: self.retry_config,
            sleep_impl: self.sleep_impl,
            telemetry: self.telemetry,
            env: self.env.unwrap_or_else(Env::real),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::Config;
    use crate::Region;
    use aws_endpoint::Params;
    use aws_types::os_shim_internal::Env;
    use aws_types::SigningService;
    use smithy_http::property_bag::PropertyBag;

    #[test]
    fn default_region_from_env() {
        let env = Env::from_slice(&[("AWS_DEFAULT_REGION", "ap-southeast-2")]);
        let conf = Config::builder().env(env).build();
        assert_eq!(conf.region(), Some(&Region::new("ap-southeast-2")));
    }

    #[test]
    fn request_properties() {
        let conf = Config::builder()
            .region(Region::new("us-east-2"))
            .use_dual_stack(true)
            .endpoint_url("https://example.com")
            .build();
        let mut bag = PropertyBag::new();
        conf.configure_request(&mut bag);
        let params = bag.get::<Params>().expect("params are set");
        assert!(params.use_dual_stack());
        assert!(!params.use_fips());
        assert_eq!(params.endpoint_url(), Some("https://example.com"));
        assert_eq!(
            bag.get::<SigningService>(),
            Some(&SigningService::from_static("appsync"))
        );
    }
}
