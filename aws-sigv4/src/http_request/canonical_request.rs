/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use super::error::SigningError;
use super::sign::{SignableBody, SignableRequest};
use super::url_escape::percent_encode;
use super::{PayloadChecksumKind, SignatureLocation, SigningParams, UriEncoding};
use crate::date_fmt::{format_date, format_date_time};
use crate::sign::sha256_hex_string;
use chrono::{DateTime, Utc};
use http::header::{HeaderName, HOST, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method, Uri};
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

pub(super) const HMAC_256: &str = "AWS4-HMAC-SHA256";

const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// Presigned URLs are valid for 15 minutes unless configured otherwise
const DEFAULT_EXPIRES_IN: Duration = Duration::from_secs(15 * 60);

pub(super) mod header {
    pub(crate) const X_AMZ_CONTENT_SHA_256: &str = "x-amz-content-sha256";
    pub(crate) const X_AMZ_DATE: &str = "x-amz-date";
    pub(crate) const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";
}

pub(super) mod param {
    pub(crate) const X_AMZ_ALGORITHM: &str = "X-Amz-Algorithm";
    pub(crate) const X_AMZ_CREDENTIAL: &str = "X-Amz-Credential";
    pub(crate) const X_AMZ_DATE: &str = "X-Amz-Date";
    pub(crate) const X_AMZ_EXPIRES: &str = "X-Amz-Expires";
    pub(crate) const X_AMZ_SECURITY_TOKEN: &str = "X-Amz-Security-Token";
    pub(crate) const X_AMZ_SIGNED_HEADERS: &str = "X-Amz-SignedHeaders";
    pub(crate) const X_AMZ_SIGNATURE: &str = "X-Amz-Signature";
}

#[derive(Debug, PartialEq)]
pub(super) struct CanonicalRequest<'a> {
    pub(super) method: &'a Method,
    pub(super) path: String,
    pub(super) params: Option<String>,
    pub(super) headers: HeaderMap,
    pub(super) signed_headers: SignedHeaders,
    pub(super) date_time: String,
    pub(super) content_sha256: Cow<'a, str>,
    /// Signing values that travel in the query string when presigning
    pub(super) presign_params: Vec<(&'static str, String)>,
}

impl<'a> CanonicalRequest<'a> {
    /// Construct a CanonicalRequest from a signable request and the signing parameters
    ///
    /// ## Behavior
    /// - If a security token is provided it is included in the signed headers (or, when
    ///   presigning, in the query string)
    /// - If `settings.uri_encoding` specifies double encoding, `%` in the path will be re-encoded
    ///   as `%25`
    /// - If `settings.payload_checksum_kind` is `XAmzSha256`, an `x-amz-content-sha256` header
    ///   carrying the payload hash is added and signed
    /// - The `user-agent` header is never signed since proxies may alter it
    pub(super) fn from<'b>(
        req: &'b SignableRequest<'b>,
        params: &SigningParams<'_>,
    ) -> Result<CanonicalRequest<'b>, SigningError> {
        let settings = &params.settings;
        let path = match req.uri().path() {
            "" => "/",
            path => path,
        };
        let path = match settings.uri_encoding {
            // The path is already URI encoded, only `%` needs another pass
            UriEncoding::Double => path.replace('%', "%25"),
            UriEncoding::Single => path.to_string(),
        };
        let content_sha256 = Self::payload_hash(req.body());
        let date_time = format_date_time(&params.date_time);

        let mut headers = req.headers().clone();
        Self::insert_host_header(&mut headers, req.uri())?;
        if settings.signature_location == SignatureLocation::Headers {
            headers.insert(
                HeaderName::from_static(header::X_AMZ_DATE),
                HeaderValue::from_str(&date_time)?,
            );
            if let Some(security_token) = params.security_token {
                let mut value = HeaderValue::from_str(security_token)?;
                value.set_sensitive(true);
                headers.insert(HeaderName::from_static(header::X_AMZ_SECURITY_TOKEN), value);
            }
            if settings.payload_checksum_kind == PayloadChecksumKind::XAmzSha256 {
                headers.insert(
                    HeaderName::from_static(header::X_AMZ_CONTENT_SHA_256),
                    HeaderValue::from_str(&content_sha256)?,
                );
            }
        }

        let signed_headers = SignedHeaders::new(
            headers
                .keys()
                .filter(|name| **name != USER_AGENT)
                .cloned()
                .collect(),
        );

        let mut presign_params = Vec::new();
        if settings.signature_location == SignatureLocation::QueryParams {
            let scope = Scope::new(params.date_time, params.region, params.service_name);
            let expires_in = settings.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);
            presign_params.push((param::X_AMZ_ALGORITHM, HMAC_256.to_string()));
            presign_params.push((
                param::X_AMZ_CREDENTIAL,
                format!("{}/{}", params.access_key, scope),
            ));
            presign_params.push((param::X_AMZ_DATE, date_time.clone()));
            presign_params.push((param::X_AMZ_EXPIRES, expires_in.as_secs().to_string()));
            presign_params.push((param::X_AMZ_SIGNED_HEADERS, signed_headers.to_string()));
            if let Some(security_token) = params.security_token {
                presign_params.push((param::X_AMZ_SECURITY_TOKEN, security_token.to_string()));
            }
        }

        Ok(CanonicalRequest {
            method: req.method(),
            path,
            params: Self::params(req.uri(), &presign_params),
            headers,
            signed_headers,
            date_time,
            content_sha256,
            presign_params,
        })
    }

    fn payload_hash<'b>(body: &'b SignableBody<'b>) -> Cow<'b, str> {
        match body {
            SignableBody::Bytes(data) => Cow::Owned(sha256_hex_string(data)),
            SignableBody::Precomputed(digest) => Cow::Borrowed(digest.as_str()),
            SignableBody::UnsignedPayload => Cow::Borrowed(UNSIGNED_PAYLOAD),
        }
    }

    /// Query parameters sorted by name, then by value, each name and value percent encoded
    fn params(uri: &Uri, extra: &[(&'static str, String)]) -> Option<String> {
        let query = uri.query().unwrap_or_default();
        if query.is_empty() && extra.is_empty() {
            return None;
        }
        let mut params: Vec<(Cow<'_, str>, Cow<'_, str>)> =
            form_urlencoded::parse(query.as_bytes()).collect();
        params.extend(
            extra
                .iter()
                .map(|(k, v)| (Cow::Borrowed(*k), Cow::Borrowed(v.as_str()))),
        );
        params.sort();
        let encoded = params
            .iter()
            .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        Some(encoded)
    }

    fn insert_host_header(headers: &mut HeaderMap, uri: &Uri) -> Result<(), SigningError> {
        if !headers.contains_key(HOST) {
            let authority = uri.authority().ok_or_else(SigningError::missing_authority)?;
            headers.insert(HOST, HeaderValue::from_str(authority.as_str())?);
        }
        Ok(())
    }

    /// Canonical header value: all values of the header joined with `,`, surrounding whitespace
    /// trimmed and inner runs of spaces collapsed
    fn header_value(&self, name: &HeaderName) -> String {
        self.headers
            .get_all(name)
            .iter()
            .map(|value| {
                let value = String::from_utf8_lossy(value.as_bytes());
                value.split_whitespace().collect::<Vec<_>>().join(" ")
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<'a> fmt::Display for CanonicalRequest<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.path)?;
        writeln!(f, "{}", self.params.as_deref().unwrap_or(""))?;
        for name in &self.signed_headers.inner {
            writeln!(f, "{}:{}", name.as_str(), self.header_value(name))?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.content_sha256)
    }
}

/// Lowercase header names in sorted order
#[derive(Debug, PartialEq, Default)]
pub(super) struct SignedHeaders {
    inner: Vec<HeaderName>,
}

impl SignedHeaders {
    fn new(mut inner: Vec<HeaderName>) -> Self {
        inner.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        inner.dedup();
        SignedHeaders { inner }
    }
}

impl fmt::Display for SignedHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.inner.iter().map(|name| name.as_str()).collect();
        write!(f, "{}", names.join(";"))
    }
}

#[derive(PartialEq, Debug, Clone)]
pub(super) struct Scope<'a> {
    date: DateTime<Utc>,
    region: &'a str,
    service: &'a str,
}

impl<'a> Scope<'a> {
    pub(super) fn new(date: DateTime<Utc>, region: &'a str, service: &'a str) -> Self {
        Self {
            date,
            region,
            service,
        }
    }
}

impl<'a> fmt::Display for Scope<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/aws4_request",
            format_date(&self.date),
            self.region,
            self.service
        )
    }
}

#[derive(PartialEq, Debug)]
pub(super) struct StringToSign<'a> {
    pub(super) scope: Scope<'a>,
    pub(super) date: DateTime<Utc>,
    pub(super) hashed_creq: &'a str,
}

impl<'a> StringToSign<'a> {
    pub(super) fn new(
        date: DateTime<Utc>,
        region: &'a str,
        service: &'a str,
        hashed_creq: &'a str,
    ) -> Self {
        Self {
            scope: Scope::new(date, region, service),
            date,
            hashed_creq,
        }
    }
}

impl<'a> fmt::Display for StringToSign<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}\n{}",
            HMAC_256,
            format_date_time(&self.date),
            self.scope,
            self.hashed_creq
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CanonicalRequest, Scope, StringToSign};
    use crate::date_fmt::parse_date_time;
    use crate::http_request::{
        PayloadChecksumKind, SignableBody, SignableRequest, SignatureLocation, SigningParams,
        SigningSettings, UriEncoding,
    };
    use crate::sign::sha256_hex_string;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const QUERY_ORDER_CREQ: &str = "GET\n\
        /\n\
        Param1=value1&Param2=value2\n\
        host:example.amazonaws.com\n\
        x-amz-date:20150830T123600Z\n\
        \n\
        host;x-amz-date\n\
        e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn params(settings: SigningSettings) -> SigningParams<'static> {
        SigningParams::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "us-east-1",
            "service",
            parse_date_time("20150830T123600Z").unwrap(),
            settings,
        )
    }

    fn query_order_request() -> http::Request<&'static str> {
        http::Request::builder()
            .uri("https://example.amazonaws.com/?Param2=value2&Param1=value1")
            .body("")
            .unwrap()
    }

    #[test]
    fn canonical_request_sorts_query_params() {
        let req = query_order_request();
        let req = SignableRequest::from(&req);
        let params = params(SigningSettings::default());
        let creq = CanonicalRequest::from(&req, &params).unwrap();
        assert_eq!(QUERY_ORDER_CREQ, creq.to_string());
    }

    #[test]
    fn test_digest_of_canonical_request() {
        let expected = "816cd5b414d056048ba4f7c5386d6e0533120fb1fcfa93762cf0fc39e2cf19e0";
        assert_eq!(expected, sha256_hex_string(QUERY_ORDER_CREQ.as_bytes()));
    }

    #[test]
    fn test_set_xamz_sha_256() {
        let req = query_order_request();
        let req = SignableRequest::from(&req);
        let mut settings = SigningSettings {
            payload_checksum_kind: PayloadChecksumKind::XAmzSha256,
            ..Default::default()
        };
        let params_with_header = params(settings.clone());
        let creq = CanonicalRequest::from(&req, &params_with_header).unwrap();
        assert_eq!(
            &creq.content_sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            creq.signed_headers.to_string(),
            "host;x-amz-content-sha256;x-amz-date"
        );

        settings.payload_checksum_kind = PayloadChecksumKind::NoHeader;
        let params_without_header = params(settings);
        let creq = CanonicalRequest::from(&req, &params_without_header).unwrap();
        assert_eq!(creq.signed_headers.to_string(), "host;x-amz-date");
    }

    #[test]
    fn test_unsigned_payload() {
        let req = query_order_request();
        let req = SignableRequest::new(
            req.method(),
            req.uri(),
            req.headers(),
            SignableBody::UnsignedPayload,
        );
        let params = params(SigningSettings::default());
        let creq = CanonicalRequest::from(&req, &params).unwrap();
        assert_eq!(&creq.content_sha256, "UNSIGNED-PAYLOAD");
        assert!(creq.to_string().ends_with("UNSIGNED-PAYLOAD"));
    }

    #[test]
    fn test_precomputed_payload() {
        let payload_hash = "44ce7dd67c959e0d3524ffac1771dfbba87d2b6b4b4e99e42034a8b803f8b072";
        let req = query_order_request();
        let req = SignableRequest::new(
            req.method(),
            req.uri(),
            req.headers(),
            SignableBody::Precomputed(String::from(payload_hash)),
        );
        let params = params(SigningSettings::default());
        let creq = CanonicalRequest::from(&req, &params).unwrap();
        assert_eq!(&creq.content_sha256, payload_hash);
        assert!(creq.to_string().ends_with(payload_hash));
    }

    #[test]
    fn user_agent_and_session_token() {
        let req = http::Request::builder()
            .uri("https://example.amazonaws.com/")
            .header("user-agent", "aws-sdk-rust/0.1.0")
            .header("X-Amz-Target", "DataPipeline.ListPipelines")
            .body("")
            .unwrap();
        let req = SignableRequest::from(&req);
        let mut params = params(SigningSettings::default());
        params.security_token = Some("notarealsessiontoken");
        let creq = CanonicalRequest::from(&req, &params).unwrap();
        assert_eq!(
            "host;x-amz-date;x-amz-security-token;x-amz-target",
            creq.signed_headers.to_string()
        );
        assert!(creq
            .to_string()
            .contains("x-amz-security-token:notarealsessiontoken\n"));
    }

    #[test]
    fn header_values_are_trimmed_and_joined() {
        let req = http::Request::builder()
            .uri("https://example.amazonaws.com/")
            .header("My-Header1", "  value1   with  spaces ")
            .header("My-Header2", "a")
            .header("My-Header2", "b")
            .body("")
            .unwrap();
        let req = SignableRequest::from(&req);
        let params = params(SigningSettings::default());
        let creq = CanonicalRequest::from(&req, &params).unwrap();
        let creq = creq.to_string();
        assert!(creq.contains("my-header1:value1 with spaces\n"));
        assert!(creq.contains("my-header2:a,b\n"));
    }

    #[test]
    fn test_double_url_encode() {
        let req = http::Request::builder()
            .uri("https://example.amazonaws.com/path/with%20space")
            .body("")
            .unwrap();
        let req = SignableRequest::from(&req);
        let double = params(SigningSettings::default());
        let creq = CanonicalRequest::from(&req, &double).unwrap();
        assert_eq!("/path/with%2520space", creq.path);

        let single = params(SigningSettings {
            uri_encoding: UriEncoding::Single,
            ..Default::default()
        });
        let creq = CanonicalRequest::from(&req, &single).unwrap();
        assert_eq!("/path/with%20space", creq.path);
    }

    #[test]
    fn test_tilde_in_uri() {
        let req = http::Request::builder()
            .uri("https://s3.us-east-1.amazonaws.com/my-bucket?list-type=2&prefix=~objprefix&single&k=&unreserved=-_.~")
            .body("")
            .unwrap();
        let req = SignableRequest::from(&req);
        let params = params(SigningSettings::default());
        let creq = CanonicalRequest::from(&req, &params).unwrap();
        assert_eq!(
            Some("k=&list-type=2&prefix=~objprefix&single=&unreserved=-_.~"),
            creq.params.as_deref(),
        );
    }

    #[test]
    fn presigning_moves_values_into_query() {
        let req = http::Request::builder()
            .uri("https://example.amazonaws.com/")
            .body("")
            .unwrap();
        let req = SignableRequest::from(&req);
        let params = params(SigningSettings {
            signature_location: SignatureLocation::QueryParams,
            expires_in: Some(Duration::from_secs(300)),
            ..Default::default()
        });
        let creq = CanonicalRequest::from(&req, &params).unwrap();
        assert_eq!("host", creq.signed_headers.to_string());
        assert_eq!(
            Some(
                "X-Amz-Algorithm=AWS4-HMAC-SHA256\
                 &X-Amz-Credential=AKIDEXAMPLE%2F20150830%2Fus-east-1%2Fservice%2Faws4_request\
                 &X-Amz-Date=20150830T123600Z\
                 &X-Amz-Expires=300\
                 &X-Amz-SignedHeaders=host"
            ),
            creq.params.as_deref()
        );
    }

    #[test]
    fn missing_authority_is_an_error() {
        let req = http::Request::builder().uri("/").body("").unwrap();
        let req = SignableRequest::from(&req);
        let params = params(SigningSettings::default());
        assert!(CanonicalRequest::from(&req, &params).is_err());
    }

    #[test]
    fn test_generate_scope() {
        let date = parse_date_time("20150830T123600Z").unwrap();
        let scope = Scope::new(date, "us-east-1", "iam");
        assert_eq!("20150830/us-east-1/iam/aws4_request", scope.to_string());
    }

    #[test]
    fn test_string_to_sign() {
        let date = parse_date_time("20150830T123600Z").unwrap();
        let encoded = sha256_hex_string(QUERY_ORDER_CREQ.as_bytes());
        let sts = StringToSign::new(date, "us-east-1", "service", &encoded);
        assert_eq!(
            "AWS4-HMAC-SHA256\n\
             20150830T123600Z\n\
             20150830/us-east-1/service/aws4_request\n\
             816cd5b414d056048ba4f7c5386d6e0533120fb1fcfa93762cf0fc39e2cf19e0",
            sts.to_string()
        );
    }
}
