/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! restJson1 request construction and response body parsing

use serde::de::DeserializeOwned;
use serde::Serialize;
use smithy_http::body::SdkBody;
use smithy_http::label;
use smithy_http::operation::BuildError;

/// Format a required path label. Unset and empty labels are both rejected: either would
/// produce a URI addressing a different resource.
pub(crate) fn label(value: Option<&str>, field: &'static str) -> Result<String, BuildError> {
    match value {
        Some(value) if !value.is_empty() => {
            Ok(label::fmt_string(value, label::EncodingStrategy::Default))
        }
        _ => Err(BuildError::missing_field(field, "cannot be empty or unset")),
    }
}

pub(crate) fn request(
    method: http::Method,
    uri: String,
) -> Result<http::Request<SdkBody>, BuildError> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(SdkBody::empty())
        .map_err(|err| BuildError::Other(err.into()))
}

pub(crate) fn request_with_body<T: Serialize>(
    method: http::Method,
    uri: String,
    input: &T,
) -> Result<http::Request<SdkBody>, BuildError> {
    let body =
        serde_json::to_vec(input).map_err(|err| BuildError::SerializationError(err.into()))?;
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::CONTENT_LENGTH, body.len())
        .body(SdkBody::from(body))
        .map_err(|err| BuildError::Other(err.into()))
}

pub(crate) fn parse_output<T: DeserializeOwned + Default>(
    body: &[u8],
) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
}
