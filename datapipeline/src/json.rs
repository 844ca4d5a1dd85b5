/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! awsJson1.1 request construction and response body parsing

use serde::de::DeserializeOwned;
use serde::Serialize;
use smithy_http::body::SdkBody;
use smithy_http::operation::BuildError;

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const TARGET_PREFIX: &str = "DataPipeline";

pub(crate) fn request<T: Serialize>(
    operation: &str,
    input: &T,
) -> Result<http::Request<SdkBody>, BuildError> {
    let body =
        serde_json::to_vec(input).map_err(|err| BuildError::SerializationError(err.into()))?;
    http::Request::builder()
        .method("POST")
        .uri("/")
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .header(http::header::CONTENT_LENGTH, body.len())
        .header("x-amz-target", format!("{}.{}", TARGET_PREFIX, operation))
        .body(SdkBody::from(body))
        .map_err(|err| BuildError::Other(err.into()))
}

/// Operations without output members may answer with an empty body
pub(crate) fn parse_output<T: DeserializeOwned + Default>(
    body: &[u8],
) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
}
