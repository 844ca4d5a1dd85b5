/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Response handlers, one per operation

use crate::error::*;
use crate::output::*;
use aws_http::error::parse_generic_error;
use bytes::Bytes;
use smithy_http::response::ParseStrictResponse;

/// Parse a response: successful responses into the output shape, anything else into the
/// operation's error.
fn parse<O, E>(
    response: &http::Response<Bytes>,
    from_generic: impl FnOnce(smithy_types::Error) -> E,
    unhandled: impl FnOnce(serde_json::Error) -> E,
) -> Result<O, E>
where
    O: serde::de::DeserializeOwned + Default,
{
    if !response.status().is_success() {
        return Err(from_generic(parse_generic_error(response)));
    }
    crate::json::parse_output(response.body()).map_err(unhandled)
}

macro_rules! operation {
    ($(#[$meta:meta])* $name:ident, $builder:path, $output:ident, $error:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default, Debug)]
        pub struct $name {
            _private: (),
        }

        impl $name {
            pub fn builder() -> $builder {
                <$builder>::default()
            }

            pub fn new() -> Self {
                Self { _private: () }
            }
        }

        impl ParseStrictResponse for $name {
            type Output = Result<$output, $error>;

            fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
                parse(response, $error::from_generic_error, $error::unhandled)
            }
        }
    };
}

operation!(
    /// Creates a new, empty pipeline. Use `PutPipelineDefinition` to populate it.
    CreatePipeline,
    crate::input::create_pipeline_input::Builder,
    CreatePipelineOutput,
    CreatePipelineError
);
operation!(
    /// Validates the specified pipeline and starts processing pipeline tasks
    ActivatePipeline,
    crate::input::activate_pipeline_input::Builder,
    ActivatePipelineOutput,
    ActivatePipelineError
);
operation!(
    /// Deletes a pipeline, its pipeline definition, and its run history
    DeletePipeline,
    crate::input::delete_pipeline_input::Builder,
    DeletePipelineOutput,
    DeletePipelineError
);
operation!(
    /// Retrieves metadata about one or more pipelines
    DescribePipelines,
    crate::input::describe_pipelines_input::Builder,
    DescribePipelinesOutput,
    DescribePipelinesError
);
operation!(
    /// Lists the pipeline identifiers for all active pipelines that you have permission to access
    ListPipelines,
    crate::input::list_pipelines_input::Builder,
    ListPipelinesOutput,
    ListPipelinesError
);

#[cfg(test)]
mod test {
    use crate::operation::{DeletePipeline, DescribePipelines, ListPipelines};
    use bytes::Bytes;
    use smithy_http::response::ParseStrictResponse;

    fn response(status: u16, body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(status)
            .header("x-amzn-requestid", "req-1")
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn parse_list_pipelines() {
        let output = ListPipelines::new()
            .parse(&response(
                200,
                r#"{"pipelineIdList": [{"id": "df-1", "name": "nightly"}], "hasMoreResults": false}"#,
            ))
            .expect("valid response");
        let pipelines = output.pipeline_id_list.expect("list is present");
        assert_eq!(pipelines[0].id.as_deref(), Some("df-1"));
        assert_eq!(pipelines[0].name.as_deref(), Some("nightly"));
        assert_eq!(output.has_more_results, Some(false));
    }

    #[test]
    fn parse_pipeline_state() {
        let output = DescribePipelines::new()
            .parse(&response(
                200,
                r#"{"pipelineDescriptionList": [{
                    "pipelineId": "df-1",
                    "name": "nightly",
                    "fields": [{"key": "@pipelineState", "stringValue": "SCHEDULED"}]
                }]}"#,
            ))
            .expect("valid response");
        let descriptions = output.pipeline_description_list.expect("present");
        assert_eq!(descriptions[0].state(), Some("SCHEDULED"));
    }

    #[test]
    fn empty_success_body() {
        DeletePipeline::new()
            .parse(&response(200, ""))
            .expect("empty output");
    }

    #[test]
    fn parse_modeled_error() {
        let err = DeletePipeline::new()
            .parse(&response(
                400,
                r#"{"__type": "com.amazonaws.datapipeline#PipelineNotFoundException", "message": "no such pipeline"}"#,
            ))
            .expect_err("modeled error");
        assert!(err.is_pipeline_not_found_exception());
        assert_eq!(err.message(), Some("no such pipeline"));
        assert_eq!(err.request_id(), Some("req-1"));
    }

    #[test]
    fn invalid_json_is_unhandled() {
        let err = ListPipelines::new()
            .parse(&response(200, "{not json"))
            .expect_err("invalid body");
        assert_eq!(err.code(), None);
    }
}
