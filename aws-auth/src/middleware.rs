/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::provider::{CredentialsError, ProvideCredentials, SharedCredentialsProvider};
use smithy_http::operation::Request;
use smithy_http_tower::map_request::AsyncMapRequest;
use std::future::Future;
use std::pin::Pin;

/// Middleware stage that loads credentials from a [SharedCredentialsProvider](crate::provider::SharedCredentialsProvider)
/// and places them in the property bag of the request.
///
/// [CredentialsStage] implements [`AsyncMapRequest`](smithy_http_tower::map_request::AsyncMapRequest), and:
/// 1. Retrieves a `SharedCredentialsProvider` from the property bag.
/// 2. Calls the credential provider's `provide_credentials` and awaits its result.
/// 3. Places returned `Credentials` into the property bad to drive downstream signing middleware.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct CredentialsStage;

impl CredentialsStage {
    pub fn new() -> Self {
        CredentialsStage
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsStageError {
    #[error("No credentials provider in the property bag")]
    MissingCredentialsProvider,
    #[error("Failed to load credentials from the credentials provider: {0}")]
    CredentialsLoadingError(#[from] CredentialsError),
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

impl AsyncMapRequest for CredentialsStage {
    type Error = CredentialsStageError;
    type Future = BoxFuture<Result<Request, Self::Error>>;

    fn name(&self) -> &'static str {
        "retrieve_credentials"
    }

    fn apply(&self, mut request: Request) -> Self::Future {
        Box::pin(async move {
            let provider = request
                .properties()
                .get::<SharedCredentialsProvider>()
                .cloned();
            let provider = match provider {
                Some(provider) => provider,
                None => {
                    tracing::error!("no credentials provider in the property bag");
                    return Err(CredentialsStageError::MissingCredentialsProvider);
                }
            };
            let credentials = provider.provide_credentials().await?;
            tracing::debug!(provider = credentials.provider_name(), "loaded credentials");
            request.properties_mut().insert(credentials);
            Ok(request)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialsStage, CredentialsStageError};
    use crate::provider::env::EnvironmentVariableCredentialsProvider;
    use crate::provider::SharedCredentialsProvider;
    use crate::{set_provider, Credentials};
    use aws_types::os_shim_internal::Env;
    use smithy_http::body::SdkBody;
    use smithy_http::operation;
    use smithy_http_tower::map_request::AsyncMapRequest;

    #[tokio::test]
    async fn no_credential_provider_is_an_error() {
        let req = operation::Request::new(http::Request::new(SdkBody::from("some body")));
        let err = CredentialsStage::new()
            .apply(req)
            .await
            .expect_err("no credential provider");
        assert!(matches!(err, CredentialsStageError::MissingCredentialsProvider));
    }

    #[tokio::test]
    async fn provider_errors_are_propagated() {
        let mut req = operation::Request::new(http::Request::new(SdkBody::from("some body")));
        set_provider(
            &mut req.properties_mut(),
            SharedCredentialsProvider::new(EnvironmentVariableCredentialsProvider::new_with_env(
                Env::from_slice(&[]),
            )),
        );
        let err = CredentialsStage::new()
            .apply(req)
            .await
            .expect_err("no credentials in the environment");
        assert!(matches!(err, CredentialsStageError::CredentialsLoadingError(_)));
    }

    #[tokio::test]
    async fn credentials_are_placed_in_the_bag() {
        let mut req = operation::Request::new(http::Request::new(SdkBody::from("some body")));
        set_provider(
            &mut req.properties_mut(),
            SharedCredentialsProvider::new(Credentials::from_keys("test", "test", None)),
        );
        let req = CredentialsStage::new()
            .apply(req)
            .await
            .expect("credential provider is in the bag; should succeed");
        assert!(
            req.properties().get::<Credentials>().is_some(),
            "it should set credentials on the request config"
        );
    }
}
