/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use super::canonical_request::{
    header, param, CanonicalRequest, StringToSign, HMAC_256,
};
use super::error::SigningError;
use super::url_escape::percent_encode;
use super::{SignatureLocation, SigningParams};
use crate::sign::{calculate_signature, generate_signing_key, sha256_hex_string};
use http::header::HeaderName;
use http::{HeaderMap, HeaderValue, Method, Uri};

/// Represents all of the information necessary to sign an HTTP request.
#[derive(Debug)]
#[non_exhaustive]
pub struct SignableRequest<'a> {
    method: &'a Method,
    uri: &'a Uri,
    headers: &'a HeaderMap<HeaderValue>,
    body: SignableBody<'a>,
}

impl<'a> SignableRequest<'a> {
    /// Creates a new `SignableRequest`. If you have an [`http::Request`], then
    /// consider using [`SignableRequest::from`] instead of `new`.
    pub fn new(
        method: &'a Method,
        uri: &'a Uri,
        headers: &'a HeaderMap<HeaderValue>,
        body: SignableBody<'a>,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    pub(crate) fn uri(&self) -> &Uri {
        self.uri
    }

    pub(crate) fn method(&self) -> &Method {
        self.method
    }

    pub(crate) fn headers(&self) -> &HeaderMap<HeaderValue> {
        self.headers
    }

    pub(crate) fn body(&self) -> &SignableBody<'_> {
        &self.body
    }
}

impl<'a, B> From<&'a http::Request<B>> for SignableRequest<'a>
where
    B: 'a,
    B: AsRef<[u8]>,
{
    fn from(request: &'a http::Request<B>) -> SignableRequest<'a> {
        SignableRequest::new(
            request.method(),
            request.uri(),
            request.headers(),
            SignableBody::Bytes(request.body().as_ref()),
        )
    }
}

/// A signable HTTP request body
#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum SignableBody<'a> {
    /// A body composed of a slice of bytes
    Bytes(&'a [u8]),

    /// An unsigned payload
    ///
    /// UnsignedPayload is used for streaming requests where the contents of the body cannot be
    /// known prior to signing
    UnsignedPayload,

    /// A precomputed body checksum. The checksum should be a SHA256 checksum of the body,
    /// lowercase hex encoded. Eg:
    /// `e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855`
    Precomputed(String),
}

/// Instructions for applying a signature to an HTTP request.
#[derive(Debug)]
pub struct SigningInstructions {
    headers: Option<HeaderMap<HeaderValue>>,
    params: Option<Vec<(&'static str, String)>>,
    signature: String,
}

impl SigningInstructions {
    /// Headers that should be added to the request
    pub fn headers(&self) -> Option<&HeaderMap<HeaderValue>> {
        self.headers.as_ref()
    }

    /// Query parameters that should be added to the request
    pub fn params(&self) -> Option<&[(&'static str, String)]> {
        self.params.as_deref()
    }

    /// The hex encoded signature
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Applies the instructions to the given `request`.
    pub fn apply_to_request<B>(self, request: &mut http::Request<B>) -> Result<(), SigningError> {
        if let Some(headers) = self.headers {
            for (name, value) in headers.iter() {
                request.headers_mut().insert(name.clone(), value.clone());
            }
        }
        if let Some(params) = self.params {
            let mut uri = request.uri().to_string();
            let mut separator = if request.uri().query().is_some() {
                '&'
            } else {
                '?'
            };
            for (name, value) in params {
                uri.push(separator);
                uri.push_str(name);
                uri.push('=');
                uri.push_str(&percent_encode(&value));
                separator = '&';
            }
            *request.uri_mut() = uri.parse()?;
        }
        Ok(())
    }
}

/// Produces a signature for the given `request` and returns instructions
/// that can be used to apply that signature to an HTTP request.
pub fn sign<'a>(
    request: SignableRequest<'a>,
    params: &'a SigningParams<'a>,
) -> Result<SigningInstructions, SigningError> {
    tracing::trace!(request = ?request, params = ?params, "signing request");
    let creq = CanonicalRequest::from(&request, params)?;
    let encoded_creq = sha256_hex_string(creq.to_string().as_bytes());
    let sts = StringToSign::new(
        params.date_time,
        params.region,
        params.service_name,
        &encoded_creq,
    );
    let signing_key = generate_signing_key(
        params.secret_key,
        params.date_time,
        params.region,
        params.service_name,
    );
    let signature = calculate_signature(signing_key, sts.to_string().as_bytes());
    tracing::trace!(canonical_request = %creq, string_to_sign = %sts, "calculated signature");

    match params.settings.signature_location {
        SignatureLocation::Headers => {
            let mut headers = HeaderMap::new();
            add_header(&mut headers, header::X_AMZ_DATE, &creq.date_time, false)?;
            if let Some(security_token) = params.security_token {
                add_header(&mut headers, header::X_AMZ_SECURITY_TOKEN, security_token, true)?;
            }
            if creq
                .headers
                .contains_key(header::X_AMZ_CONTENT_SHA_256)
            {
                add_header(
                    &mut headers,
                    header::X_AMZ_CONTENT_SHA_256,
                    &creq.content_sha256,
                    false,
                )?;
            }
            // Authorization: algorithm Credential=access key ID/credential scope, SignedHeaders=SignedHeaders, Signature=signature
            let authorization = format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                HMAC_256, params.access_key, sts.scope, creq.signed_headers, signature
            );
            add_header(&mut headers, "authorization", &authorization, true)?;
            Ok(SigningInstructions {
                headers: Some(headers),
                params: None,
                signature,
            })
        }
        SignatureLocation::QueryParams => {
            let mut query = creq.presign_params;
            query.push((param::X_AMZ_SIGNATURE, signature.clone()));
            Ok(SigningInstructions {
                headers: None,
                params: Some(query),
                signature,
            })
        }
    }
}

fn add_header(
    map: &mut HeaderMap<HeaderValue>,
    key: &'static str,
    value: &str,
    sensitive: bool,
) -> Result<(), SigningError> {
    let mut value = HeaderValue::from_str(value)?;
    value.set_sensitive(sensitive);
    map.insert(HeaderName::from_static(key), value);
    Ok(())
}
