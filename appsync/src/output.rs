/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::model::{ApiKey, GraphqlApi};
use serde::Deserialize;

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGraphqlApiOutput {
    pub graphql_api: Option<GraphqlApi>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGraphqlApisOutput {
    pub graphql_apis: Option<Vec<GraphqlApi>>,
    /// Present when more results are available; pass it to the next call
    pub next_token: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyOutput {
    pub api_key: Option<ApiKey>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DeleteGraphqlApiOutput {}
