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

/// Client for AWS Data Pipeline
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

    pub fn create_pipeline(&self) -> fluent_builders::CreatePipeline<C> {
        fluent_builders::CreatePipeline::new(self.handle.clone())
    }

    pub fn activate_pipeline(&self) -> fluent_builders::ActivatePipeline<C> {
        fluent_builders::ActivatePipeline::new(self.handle.clone())
    }

    pub fn delete_pipeline(&self) -> fluent_builders::DeletePipeline<C> {
        fluent_builders::DeletePipeline::new(self.handle.clone())
    }

    pub fn describe_pipelines(&self) -> fluent_builders::DescribePipelines<C> {
        fluent_builders::DescribePipelines::new(self.handle.clone())
    }

    pub fn list_pipelines(&self) -> fluent_builders::ListPipelines<C> {
        fluent_builders::ListPipelines::new(self.handle.clone())
    }
}

pub mod fluent_builders {
    use crate::client::Handle;
    use crate::error::*;
    use crate::model::Tag;
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
        CreatePipeline,
        crate::input::create_pipeline_input::Builder,
        CreatePipelineOutput,
        CreatePipelineError
    );

    impl<C> CreatePipeline<C> {
        pub fn name(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.name(inp);
            self
        }

        pub fn unique_id(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.unique_id(inp);
            self
        }

        pub fn description(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.description(inp);
            self
        }

        pub fn tags(mut self, inp: Tag) -> Self {
            self.inner = self.inner.tags(inp);
            self
        }

        pub fn set_tags(mut self, inp: Option<Vec<Tag>>) -> Self {
            self.inner = self.inner.set_tags(inp);
            self
        }
    }

    fluent_builder!(
        ActivatePipeline,
        crate::input::activate_pipeline_input::Builder,
        ActivatePipelineOutput,
        ActivatePipelineError
    );

    impl<C> ActivatePipeline<C> {
        pub fn pipeline_id(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.pipeline_id(inp);
            self
        }

        pub fn start_timestamp(mut self, inp: f64) -> Self {
            self.inner = self.inner.start_timestamp(inp);
            self
        }
    }

    fluent_builder!(
        DeletePipeline,
        crate::input::delete_pipeline_input::Builder,
        DeletePipelineOutput,
        DeletePipelineError
    );

    impl<C> DeletePipeline<C> {
        pub fn pipeline_id(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.pipeline_id(inp);
            self
        }
    }

    fluent_builder!(
        DescribePipelines,
        crate::input::describe_pipelines_input::Builder,
        DescribePipelinesOutput,
        DescribePipelinesError
    );

    impl<C> DescribePipelines<C> {
        pub fn pipeline_ids(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.pipeline_ids(inp);
            self
        }

        pub fn set_pipeline_ids(mut self, inp: Option<Vec<String>>) -> Self {
            self.inner = self.inner.set_pipeline_ids(inp);
            self
        }
    }

    fluent_builder!(
        ListPipelines,
        crate::input::list_pipelines_input::Builder,
        ListPipelinesOutput,
        ListPipelinesError
    );

    impl<C> ListPipelines<C> {
        pub fn marker(mut self, inp: impl Into<String>) -> Self {
            self.inner = self.inner.marker(inp);
            self
        }

        pub fn set_marker(mut self, inp: Option<String>) -> Self {
            self.inner = self.inner.set_marker(inp);
            self
        }
    }
}
