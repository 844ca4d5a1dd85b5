/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod env;

use crate::Credentials;
use std::error::Error;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CredentialsError {
    /// No credentials were available for this provider
    #[error("The provider could not provide credentials or required configuration was not set")]
    CredentialsNotLoaded,

    /// The provider was given an invalid configuration
    #[error("The credentials provider was not properly configured: {0}")]
    InvalidConfiguration(#[source] Box<dyn Error + Send + Sync + 'static>),

    /// The provider experienced an error during credential resolution
    #[error("An error occurred while loading credentials: {0}")]
    ProviderError(#[source] Box<dyn Error + Send + Sync + 'static>),

    /// An unexpected error occurred during credential resolution
    #[error("Unexpected credentials error: {0}")]
    Unhandled(#[source] Box<dyn Error + Send + Sync + 'static>),
}

pub type Result = std::result::Result<Credentials, CredentialsError>;

pub mod future {
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

    /// Future returned by [`ProvideCredentials`](super::ProvideCredentials)
    pub struct ProvideCredentials<'a>(BoxFuture<'a, super::Result>);

    impl<'a> ProvideCredentials<'a> {
        pub fn new(future: impl Future<Output = super::Result> + Send + 'a) -> Self {
            ProvideCredentials(Box::pin(future))
        }

        pub fn ready(credentials: super::Result) -> Self {
            Self::new(std::future::ready(credentials))
        }
    }

    impl Future for ProvideCredentials<'_> {
        type Output = super::Result;

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
            self.0.as_mut().poll(cx)
        }
    }
}

/// Asynchronous Credentials Provider
pub trait ProvideCredentials: Send + Sync + Debug {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a;
}

impl ProvideCredentials for Credentials {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::ready(Ok(self.clone()))
    }
}

/// Credentials provider that can be cheaply cloned and shared between requests
#[derive(Clone)]
pub struct SharedCredentialsProvider(Arc<dyn ProvideCredentials>);

impl SharedCredentialsProvider {
    pub fn new(provider: impl ProvideCredentials + 'static) -> Self {
        Self(Arc::new(provider))
    }
}

impl Debug for SharedCredentialsProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedCredentialsProvider")
            .field(&self.0)
            .finish()
    }
}

impl From<Arc<dyn ProvideCredentials>> for SharedCredentialsProvider {
    fn from(provider: Arc<dyn ProvideCredentials>) -> Self {
        SharedCredentialsProvider(provider)
    }
}

impl ProvideCredentials for SharedCredentialsProvider {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        self.0.provide_credentials()
    }
}

pub fn default_provider() -> impl ProvideCredentials {
    env::EnvironmentVariableCredentialsProvider::new()
}

#[cfg(test)]
mod test {
    use crate::provider::{CredentialsError, ProvideCredentials, SharedCredentialsProvider};
    use crate::Credentials;
    use std::error::Error;

    #[tokio::test]
    async fn static_credentials_provide_themselves() {
        let provider =
            SharedCredentialsProvider::new(Credentials::from_keys("akid", "secret", None));
        let creds = provider
            .provide_credentials()
            .await
            .expect("static credentials");
        assert_eq!(creds.access_key_id(), "akid");
        assert_eq!(creds.secret_access_key(), "secret");
    }

    #[test]
    fn errors_keep_their_source() {
        let err = CredentialsError::ProviderError("boom".into());
        assert_eq!(
            format!("{}", err),
            "An error occurred while loading credentials: boom"
        );
        assert!(err.source().is_some());
        assert!(CredentialsError::CredentialsNotLoaded.source().is_none());
    }
}
