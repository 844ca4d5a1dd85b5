/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use aws_hyper::conn::Standard;
use std::fmt;
use std::sync::Arc;

pub(crate) struct Handle<C> {
    client: aws_hyper::Client<C>,
    conf: Config,
}

impl<C: fmt::Debug> fmt::Debug for Handle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("client", &self.client)
            .field("conf", &self.conf)
            .finish()
    }
}

/// Client for AWS AppSync
///
/// Each method returns a fluent builder for one operation; call `send()` on it to run the
/// operation. Clones share the connection pool and the retry quota.
#[derive(Debug)]
pub struct Client<C = Standard> {
    handle: Arc<Handle<C>>,
}

impl<C> Clone for Client<C> {
    fn clone(&self) -> Self {
        Client {
            handle: self.handle.clone(),
        }
    }
}

impl Client<Standard> {
    /// Construct a client that sends requests over HTTPS
    pub fn new(conf: Config) -> Self {
        Self::from_conf_conn(conf, Standard::https())
    }

    /// Construct an HTTPS client configured from the process environment
    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }
}

impl<C> Client<C> {
    /// Construct a client that dispatches requests through `conn`
    pub fn from_conf_conn(conf: Config, conn: C) -> Self {
        let mut client = aws_hyper::Client::new(conn);
        if let Some(retry_config) = &conf.retry_config {
            client = client.with_retry_config(retry_config.clone());
        }
        if let Some(sleep_impl) = &conf.sleep_impl {
            client = client.with_sleep_impl(sleep_impl.clone());
        }
        if let Some(telemetry) = &conf.telemetry {
            client = client.with_telemetry(telemetry.clone());
        }
        Client {
            handle: Arc::new(Handle { client, conf }),
        }
    }

    pub fn conf(&self) -> &Config {
        &self.handle.conf
    }

    pub fn get_graphql_api(&self) -> fluent_builders::GetGraphqlApi<C> {
        fluent_builders::GetGraphqlApi::new(self.handle.clone())
    }

    pub fn list_graphql_apis(&self) -> fluent_builders::ListGraphqlApis<C> {
        fluent_builders::ListGraphqlApis::new(self.handle.clone())
    }

    pub fn create_api_key(&self) -> fluent_builders::CreateApiKey<C> {
        fluent_builders::CreateApiKey::new(self.handle.clone())
    }

    pub fn delete_graphql_api(&self) -> fluent_builders::DeleteGraphqlApi<C> {
        fluent_builders::DeleteGraphqlApi::new(self.handle.clone())
    }
}

pub mod fluent_builders {
    use crate::client::Handle;
    use crate::error::*;
    use crate::output::*;
    use aws_hyper::conn::Standard;
    use aws_hyper::SdkError;
    use smithy_http::body::SdkBody;
    use std::sync::Arc;

    type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

    macro_rules! fluent_builder {
        ($name:ident, $builder:path, $output:ident, $error:ident) => {
            #[derive(Debug)]
            pub struct $name<C = Standard> {
                handle: Arc<Handle<C>>,
                inner: $builder,
            }

            impl<C> $name<C> {
                pub(crate) fn new(handle: Arc<Handle<C>>) -> Self {
                    Self {
                        handle,
                        inner: Default::default(),
                    }
                }

                /// Validate the input, then send the request through the client's middleware
                pub async fn send(self) -> Result<$output, SdkError<$error>>
                where
                    C: tower::Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
                        + Send
                        + Clone
                        + 'static,
                    C::Error: Into<BoxError> + Send + Sync + 'static,
                    C::Future: Send + 'static,
                {
                    let input = self
                        .inner
                        .build()
                        .map_err(|err| SdkError::ConstructionFailure(err.into()))?;
                    let op = input
                        .make_operation(&self.handle.conf)
                        .map_err(|err| SdkError::ConstructionFailure(err.into()))?;
                    self.handle.client.call(op).await
                }
            }
        };
    }

    fluent_builder!(
        GetGraphqlApi,
        crate::input::get_graphql_api_input::Builder,
        GetGraphqlApiOutput,
        GetGraphqlApiError
    );

    impl<C> GetGraphqlApi<C> {
        pub fn api_id(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.api_id(inp);
            self
        }
    }

    fluent_builder!(
        ListGraphqlApis,
        crate::input::list_graphql_apis_input::Builder,
        ListGraphqlApisOutput,
        ListGraphqlApisError
    );

    impl<C> ListGraphqlApis<C> {
        pub fn next_token(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.next_token(inp);
            self
        }

        pub fn set_next_token(mut self, inp: Option<String>) -> Self {
            self.inner = self.inner.set_next_token(inp);
            self
        }

        pub fn max_results(mut self, inp: i32) -> Self {
            self.inner = self.inner.max_results(inp);
            self
        }
    }

    fluent_builder!(
        CreateApiKey,
        crate::input::create_api_key_input::Builder,
        CreateApiKeyOutput,
        CreateApiKeyError
    );

    impl<C> CreateApiKey<C> {
        pub fn api_id(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.api_id(inp);
            self
        }

        pub fn description(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.description(inp);
            self
        }

        pub fn expires(mut self, inp: i64) -> Self {
            self.inner = self.inner.expires(inp);
            self
        }
    }

    fluent_builder!(
        DeleteGraphqlApi,
        crate::input::delete_graphql_api_input::Builder,
        DeleteGraphqlApiOutput,
        DeleteGraphqlApiError
    );

    impl<C> DeleteGraphqlApi<C> {
        pub fn api_id(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.api_id(inp);
            self
        }
    }
}
