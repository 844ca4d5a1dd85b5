/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::model::{PipelineDescription, PipelineIdName};
use serde::Deserialize;

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipelineOutput {
    /// The ID that AWS Data Pipeline assigns the newly created pipeline, for example
    /// `df-06372391ZG65EXAMPLE`
    pub pipeline_id: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ActivatePipelineOutput {}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DeletePipelineOutput {}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribePipelinesOutput {
    pub pipeline_description_list: Option<Vec<PipelineDescription>>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPipelinesOutput {
    pub pipeline_id_list: Option<Vec<PipelineIdName>>,
    /// Pass this marker to the next `ListPipelines` call to fetch the following page
    pub marker: Option<String>,
    pub has_more_results: Option<bool>,
}
