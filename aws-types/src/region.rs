/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Regions, and the providers that find one for a client
//!
//! A client needs a region before any request can be resolved to an endpoint. Service configs
//! take one directly or ask a [`ProvideRegion`] when built from the environment.

use crate::os_shim_internal::Env;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// An AWS region name such as `us-east-1`
///
/// Not validated: an unknown region still resolves, through the `aws` partition's template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region(Cow<'static, str>);

impl AsRef<str> for Region {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Region {
    pub fn new(region: impl Into<Cow<'static, str>>) -> Self {
        Self(region.into())
    }

    pub const fn from_static(region: &'static str) -> Self {
        Self(Cow::Borrowed(region))
    }
}

/// Boxed future of a region lookup
pub struct RegionFuture<'a>(Pin<Box<dyn Future<Output = Option<Region>> + Send + 'a>>);

impl<'a> RegionFuture<'a> {
    pub fn new(f: impl Future<Output = Option<Region>> + Send + 'a) -> Self {
        RegionFuture(Box::pin(f))
    }

    pub fn ready(region: Option<Region>) -> Self {
        Self::new(std::future::ready(region))
    }
}

impl Future for RegionFuture<'_> {
    type Output = Option<Region>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.0.as_mut().poll(cx)
    }
}

/// A source of a [`Region`], eg. the environment or a fixed value
///
/// Lookups are async so that providers backed by files or instance metadata fit the same trait.
pub trait ProvideRegion: Send + Sync {
    fn region(&self) -> RegionFuture<'_>;
}

impl ProvideRegion for Region {
    fn region(&self) -> RegionFuture<'_> {
        RegionFuture::ready(Some(self.clone()))
    }
}

impl ProvideRegion for Option<Region> {
    fn region(&self) -> RegionFuture<'_> {
        RegionFuture::ready(self.clone())
    }
}

/// The first region found by a list of providers, asked in order
///
/// ```rust
/// use aws_types::region::{ChainProvider, Region};
/// let provider = ChainProvider::first_try(aws_types::region::default_provider())
///     .or_else(Region::new("us-east-2"));
/// ```
pub struct ChainProvider {
    providers: Vec<Box<dyn ProvideRegion>>,
}

impl ChainProvider {
    pub fn first_try(provider: impl ProvideRegion + 'static) -> Self {
        ChainProvider {
            providers: vec![Box::new(provider)],
        }
    }

    pub fn or_else(mut self, fallback: impl ProvideRegion + 'static) -> Self {
        self.providers.push(Box::new(fallback));
        self
    }

    async fn resolve(&self) -> Option<Region> {
        for provider in &self.providers {
            if let Some(region) = provider.region().await {
                return Some(region);
            }
        }
        None
    }
}

impl ProvideRegion for ChainProvider {
    fn region(&self) -> RegionFuture<'_> {
        RegionFuture::new(self.resolve())
    }
}

pub fn default_provider() -> impl ProvideRegion {
    EnvironmentVariableRegionProvider::new()
}

/// Load a region from the `AWS_REGION` environment variable, falling back to `AWS_DEFAULT_REGION`
#[non_exhaustive]
#[derive(Debug)]
pub struct EnvironmentVariableRegionProvider {
    env: Env,
}

impl Default for EnvironmentVariableRegionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentVariableRegionProvider {
    pub fn new() -> Self {
        EnvironmentVariableRegionProvider { env: Env::real() }
    }

    /// Read the environment from `env` rather than the process environment
    pub fn new_with_env(env: Env) -> Self {
        EnvironmentVariableRegionProvider { env }
    }

    pub fn region_now(&self) -> Option<Region> {
        self.env
            .first_set(&["AWS_REGION", "AWS_DEFAULT_REGION"])
            .map(Region::new)
    }
}

impl ProvideRegion for EnvironmentVariableRegionProvider {
    fn region(&self) -> RegionFuture<'_> {
        let region = self.region_now();
        tracing::debug!(region = ?region, "loaded region from environment");
        RegionFuture::ready(region)
    }
}

/// The region to use when signing requests
///
/// Generally, user code will not need to interact with `SigningRegion`. See `[Region](crate::Region)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningRegion(Cow<'static, str>);

impl AsRef<str> for SigningRegion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Region> for SigningRegion {
    fn from(inp: Region) -> Self {
        SigningRegion(inp.0)
    }
}

impl From<&'static str> for SigningRegion {
    fn from(region: &'static str) -> Self {
        Self::from_static(region)
    }
}

impl SigningRegion {
    pub fn from_static(region: &'static str) -> Self {
        SigningRegion(Cow::Borrowed(region))
    }
}

#[cfg(test)]
mod test {
    use crate::os_shim_internal::Env;
    use crate::region::{ChainProvider, EnvironmentVariableRegionProvider, ProvideRegion, Region};
    use futures_util::FutureExt;

    fn test_provider(vars: &[(&str, &str)]) -> EnvironmentVariableRegionProvider {
        EnvironmentVariableRegionProvider::new_with_env(Env::from_slice(vars))
    }

    #[test]
    fn no_region() {
        assert_eq!(
            test_provider(&[])
                .region()
                .now_or_never()
                .expect("no polling"),
            None
        );
    }

    #[test]
    fn prefers_aws_region() {
        let provider = test_provider(&[
            ("AWS_REGION", "us-east-1"),
            ("AWS_DEFAULT_REGION", "us-east-2"),
        ]);
        assert_eq!(
            provider.region().now_or_never().expect("no polling"),
            Some(Region::new("us-east-1"))
        );
    }

    #[test]
    fn falls_back_to_default_region() {
        let provider = test_provider(&[("AWS_DEFAULT_REGION", "us-east-2")]);
        assert_eq!(provider.region_now(), Some(Region::new("us-east-2")));
    }

    #[test]
    fn blank_region_is_ignored() {
        assert_eq!(test_provider(&[("AWS_REGION", " ")]).region_now(), None);
    }

    #[test]
    fn chain_uses_first_region_found() {
        let chain = ChainProvider::first_try(test_provider(&[]))
            .or_else(Region::from_static("eu-west-1"))
            .or_else(Region::from_static("us-west-2"));
        assert_eq!(
            chain.region().now_or_never().expect("no polling"),
            Some(Region::from_static("eu-west-1"))
        );
    }
}
