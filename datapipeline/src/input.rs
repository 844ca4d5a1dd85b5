/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation inputs
//!
//! Builders never fail: required members are checked by `make_operation`, before anything is sent.

use crate::config::Config;
use crate::model::Tag;
use aws_http::AwsErrorRetryPolicy;
use serde::Serialize;
use smithy_http::body::SdkBody;
use smithy_http::operation;
use smithy_http::operation::{BuildError, Metadata, Operation};

fn new_operation<O>(
    config: &Config,
    request: http::Request<SdkBody>,
    handler: O,
    name: &'static str,
) -> Operation<O, AwsErrorRetryPolicy> {
    let mut request = operation::Request::new(request);
    config.configure_request(&mut request.properties_mut());
    Operation::new(request, handler)
        .with_metadata(Metadata::new(name, "datapipeline"))
        .with_retry_policy(AwsErrorRetryPolicy::new())
}

/// See [`CreatePipelineInput`](crate::input::CreatePipelineInput)
pub mod create_pipeline_input {
    use crate::input::CreatePipelineInput;
    use crate::model::Tag;
    use smithy_http::operation::BuildError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        name: Option<String>,
        unique_id: Option<String>,
        description: Option<String>,
        tags: Option<Vec<Tag>>,
    }

    impl Builder {
        /// The name for the pipeline. Names do not have to be unique.
        pub fn name(mut self, inp: impl Into<String>) -> Self {
            self.name = Some(inp.into());
            self
        }

        /// A unique identifier that makes `CreatePipeline` idempotent
        ///
        /// Retrying a call with the same name and unique id returns the pipeline created by the
        /// first call.
        pub fn unique_id(mut self, inp: impl Into<String>) -> Self {
            self.unique_id = Some(inp.into());
            self
        }

        pub fn description(mut self, inp: impl Into<String>) -> Self {
            self.description = Some(inp.into());
            self
        }

        /// Appends a tag
        pub fn tags(mut self, inp: Tag) -> Self {
            self.tags.get_or_insert_with(Vec::new).push(inp);
            self
        }

        pub fn set_tags(mut self, inp: Option<Vec<Tag>>) -> Self {
            self.tags = inp;
            self
        }

        pub fn build(self) -> Result<CreatePipelineInput, BuildError> {
            Ok(CreatePipelineInput {
                name: self.name,
                unique_id: self.unique_id,
                description: self.description,
                tags: self.tags,
            })
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipelineInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl CreatePipelineInput {
    pub fn builder() -> create_pipeline_input::Builder {
        create_pipeline_input::Builder::default()
    }

    pub fn make_operation(
        &self,
        config: &Config,
    ) -> Result<Operation<crate::operation::CreatePipeline, AwsErrorRetryPolicy>, BuildError> {
        if self.name.is_none() {
            return Err(BuildError::missing_field(
                "name",
                "A pipeline name is required",
            ));
        }
        if self.unique_id.is_none() {
            return Err(BuildError::missing_field(
                "unique_id",
                "A unique id is required to make pipeline creation idempotent",
            ));
        }
        let request = crate::json::request("CreatePipeline", self)?;
        Ok(new_operation(
            config,
            request,
            crate::operation::CreatePipeline::new(),
            "CreatePipeline",
        ))
    }
}

/// See [`ActivatePipelineInput`](crate::input::ActivatePipelineInput)
pub mod activate_pipeline_input {
    use crate::input::ActivatePipelineInput;
    use smithy_http::operation::BuildError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        pipeline_id: Option<String>,
        start_timestamp: Option<f64>,
    }

    impl Builder {
        pub fn pipeline_id(mut self, inp: impl Into<String>) -> Self {
            self.pipeline_id = Some(inp.into());
            self
        }

        /// Resume the pipeline from this point in time, in epoch seconds
        pub fn start_timestamp(mut self, inp: f64) -> Self {
            self.start_timestamp = Some(inp);
            self
        }

        pub fn build(self) -> Result<ActivatePipelineInput, BuildError> {
            Ok(ActivatePipelineInput {
                pipeline_id: self.pipeline_id,
                start_timestamp: self.start_timestamp,
            })
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivatePipelineInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<f64>,
}

impl ActivatePipelineInput {
    pub fn builder() -> activate_pipeline_input::Builder {
        activate_pipeline_input::Builder::default()
    }

    pub fn make_operation(
        &self,
        config: &Config,
    ) -> Result<Operation<crate::operation::ActivatePipeline, AwsErrorRetryPolicy>, BuildError>
    {
        if self.pipeline_id.is_none() {
            return Err(BuildError::missing_field(
                "pipeline_id",
                "The pipeline to activate must be specified",
            ));
        }
        let request = crate::json::request("ActivatePipeline", self)?;
        Ok(new_operation(
            config,
            request,
            crate::operation::ActivatePipeline::new(),
            "ActivatePipeline",
        ))
    }
}

/// See [`DeletePipelineInput`](crate::input::DeletePipelineInput)
pub mod delete_pipeline_input {
    use crate::input::DeletePipelineInput;
    use smithy_http::operation::BuildError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        pipeline_id: Option<String>,
    }

    impl Builder {
        pub fn pipeline_id(mut self, inp: impl Into<String>) -> Self {
            self.pipeline_id = Some(inp.into());
            self
        }

        pub fn build(self) -> Result<DeletePipelineInput, BuildError> {
            Ok(DeletePipelineInput {
                pipeline_id: self.pipeline_id,
            })
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePipelineInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,
}

impl DeletePipelineInput {
    pub fn builder() -> delete_pipeline_input::Builder {
        delete_pipeline_input::Builder::default()
    }

    pub fn make_operation(
        &self,
        config: &Config,
    ) -> Result<Operation<crate::operation::DeletePipeline, AwsErrorRetryPolicy>, BuildError> {
        if self.pipeline_id.is_none() {
            return Err(BuildError::missing_field(
                "pipeline_id",
                "The pipeline to delete must be specified",
            ));
        }
        let request = crate::json::request("DeletePipeline", self)?;
        Ok(new_operation(
            config,
            request,
            crate::operation::DeletePipeline::new(),
            "DeletePipeline",
        ))
    }
}

/// See [`DescribePipelinesInput`](crate::input::DescribePipelinesInput)
pub mod describe_pipelines_input {
    use crate::input::DescribePipelinesInput;
    use smithy_http::operation::BuildError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        pipeline_ids: Option<Vec<String>>,
    }

    impl Builder {
        /// Appends a pipeline id. Up to 25 pipelines can be described in one call.
        pub fn pipeline_ids(mut self, inp: impl Into<String>) -> Self {
            self.pipeline_ids
                .get_or_insert_with(Vec::new)
                .push(inp.into());
            self
        }

        pub fn set_pipeline_ids(mut self, inp: Option<Vec<String>>) -> Self {
            self.pipeline_ids = inp;
            self
        }

        pub fn build(self) -> Result<DescribePipelinesInput, BuildError> {
            Ok(DescribePipelinesInput {
                pipeline_ids: self.pipeline_ids,
            })
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribePipelinesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_ids: Option<Vec<String>>,
}

impl DescribePipelinesInput {
    pub fn builder() -> describe_pipelines_input::Builder {
        describe_pipelines_input::Builder::default()
    }

    pub fn make_operation(
        &self,
        config: &Config,
    ) -> Result<Operation<crate::operation::DescribePipelines, AwsErrorRetryPolicy>, BuildError>
    {
        if self.pipeline_ids.is_none() {
            return Err(BuildError::missing_field(
                "pipeline_ids",
                "The pipelines to describe must be specified",
            ));
        }
        let request = crate::json::request("DescribePipelines", self)?;
        Ok(new_operation(
            config,
            request,
            crate::operation::DescribePipelines::new(),
            "DescribePipelines",
        ))
    }
}

/// See [`ListPipelinesInput`](crate::input::ListPipelinesInput)
pub mod list_pipelines_input {
    use crate::input::ListPipelinesInput;
    use smithy_http::operation::BuildError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        marker: Option<String>,
    }

    impl Builder {
        /// The starting point for the results, taken from the `marker` of a previous response
        pub fn marker(mut self, inp: impl Into<String>) -> Self {
            self.marker = Some(inp.into());
            self
        }

        pub fn set_marker(mut self, inp: Option<String>) -> Self {
            self.marker = inp;
            self
        }

        pub fn build(self) -> Result<ListPipelinesInput, BuildError> {
            Ok(ListPipelinesInput {
                marker: self.marker,
            })
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPipelinesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl ListPipelinesInput {
    pub fn builder() -> list_pipelines_input::Builder {
        list_pipelines_input::Builder::default()
    }

    pub fn make_operation(
        &self,
        config: &Config,
    ) -> Result<Operation<crate::operation::ListPipelines, AwsErrorRetryPolicy>, BuildError> {
        let request = crate::json::request("ListPipelines", self)?;
        Ok(new_operation(
            config,
            request,
            crate::operation::ListPipelines::new(),
            "ListPipelines",
        ))
    }
}

#[cfg(test)]
mod test {
    use crate::input::{CreatePipelineInput, DescribePipelinesInput, ListPipelinesInput};
    use crate::model::Tag;
    use crate::{Config, Region};
    use aws_endpoint::Params;
    use aws_types::SigningService;
    use smithy_http::operation::BuildError;

    fn config() -> Config {
        Config::builder().region(Region::new("us-east-1")).build()
    }

    #[test]
    fn create_pipeline_requires_name_and_unique_id() {
        let input = CreatePipelineInput::builder()
            .unique_id("token")
            .build()
            .unwrap();
        match input.make_operation(&config()) {
            Err(BuildError::MissingField { field, .. }) => assert_eq!(field, "name"),
            other => panic!("expected a missing name, got {:?}", other.map(|_| ())),
        }
        let input = CreatePipelineInput::builder().name("p").build().unwrap();
        match input.make_operation(&config()) {
            Err(BuildError::MissingField { field, .. }) => assert_eq!(field, "unique_id"),
            other => panic!("expected a missing unique id, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn create_pipeline_body_skips_unset_members() {
        let input = CreatePipelineInput::builder()
            .name("my-pipeline")
            .unique_id("token")
            .tags(Tag::builder().key("team").value("data").build())
            .build()
            .unwrap();
        let op = input.make_operation(&config()).expect("valid input");
        let (request, _) = op.into_request_response();
        let body: serde_json::Value =
            serde_json::from_slice(request.http().body().bytes().expect("in-memory body"))
                .expect("json body");
        assert_eq!(
            body,
            serde_json::json!({
                "name": "my-pipeline",
                "uniqueId": "token",
                "tags": [{"key": "team", "value": "data"}]
            })
        );
    }

    #[test]
    fn describe_pipelines_requires_ids() {
        let input = DescribePipelinesInput::builder().build().unwrap();
        assert!(matches!(
            input.make_operation(&config()),
            Err(BuildError::MissingField {
                field: "pipeline_ids",
                ..
            })
        ));
    }

    #[test]
    fn operations_carry_middleware_properties() {
        let conf = Config::builder()
            .region(Region::new("us-west-2"))
            .use_fips(true)
            .build();
        let op = ListPipelinesInput::builder()
            .build()
            .unwrap()
            .make_operation(&conf)
            .expect("valid input");
        assert_eq!(op.metadata().map(|m| m.name()), Some("ListPipelines"));
        let props = op.properties();
        let params = props.get::<Params>().expect("endpoint params are set");
        assert_eq!(params.region(), Some(&Region::new("us-west-2")));
        assert!(params.use_fips());
        assert_eq!(
            props.get::<SigningService>(),
            Some(&SigningService::from_static("datapipeline"))
        );
    }
}
