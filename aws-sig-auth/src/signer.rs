/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation level signing configuration and the SigV4 signer that applies it

use aws_auth::Credentials;
use aws_sigv4::http_request::{
    sign, PayloadChecksumKind, SignableRequest, SignatureLocation, SigningParams,
    SigningSettings, UriEncoding,
};
use aws_types::region::SigningRegion;
use aws_types::SigningService;
use chrono::{DateTime, Utc};
use http::Uri;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::time::{Duration, SystemTime};

pub use aws_sigv4::http_request::{SignableBody, SigningError};

const EXPIRATION_WARNING: &str =
    "presigned request expires after the credentials used to sign it; it will stop working early";

static LEADING_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(/|%2F){2,}").expect("valid regex"));

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum SigningAlgorithm {
    SigV4,
}

/// Where the signature goes
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum HttpSignatureType {
    /// `authorization` and `x-amz-date` headers
    HttpRequestHeaders,

    /// `X-Amz-*` query parameters, for presigned URLs
    HttpRequestQueryParams,
}

/// How requests of one operation are signed
///
/// Service configs insert [`OperationSigningConfig::default_config`] into every operation.
#[derive(Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub struct OperationSigningConfig {
    pub algorithm: SigningAlgorithm,
    pub signature_type: HttpSignatureType,
    pub signing_options: SigningOptions,
    pub signing_requirements: SigningRequirements,
    /// Lifetime of a presigned request
    pub expires_in: Option<Duration>,
}

impl OperationSigningConfig {
    /// Header based SigV4 with double URI encoding and no `x-amz-content-sha256` header
    pub fn default_config() -> Self {
        OperationSigningConfig {
            algorithm: SigningAlgorithm::SigV4,
            signature_type: HttpSignatureType::HttpRequestHeaders,
            signing_options: SigningOptions {
                double_uri_encode: true,
                content_sha256_header: false,
            },
            signing_requirements: SigningRequirements::Required,
            expires_in: None,
        }
    }

    /// Query parameter signature valid for `expires_in`
    pub fn presigned(expires_in: Duration) -> Self {
        OperationSigningConfig {
            signature_type: HttpSignatureType::HttpRequestQueryParams,
            expires_in: Some(expires_in),
            ..Self::default_config()
        }
    }

    fn signing_settings(&self) -> SigningSettings {
        let mut settings = SigningSettings::default();
        settings.uri_encoding = match self.signing_options.double_uri_encode {
            true => UriEncoding::Double,
            false => UriEncoding::Single,
        };
        settings.payload_checksum_kind = match self.signing_options.content_sha256_header {
            true => PayloadChecksumKind::XAmzSha256,
            false => PayloadChecksumKind::NoHeader,
        };
        settings.signature_location = match self.signature_type {
            HttpSignatureType::HttpRequestHeaders => SignatureLocation::Headers,
            HttpSignatureType::HttpRequestQueryParams => SignatureLocation::QueryParams,
        };
        settings.expires_in = self.expires_in;
        settings
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum SigningRequirements {
    /// Sign when credentials are available, send unsigned otherwise
    Optional,

    /// Fail before dispatch when no credentials are available
    Required,

    /// Never sign
    Disabled,
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[non_exhaustive]
pub struct SigningOptions {
    pub double_uri_encode: bool,
    pub content_sha256_header: bool,
}

/// Per-request signing inputs
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RequestConfig<'a> {
    pub request_ts: SystemTime,
    pub region: &'a SigningRegion,
    pub service: &'a SigningService,
    /// Sign this instead of the request body, eg. `UNSIGNED-PAYLOAD` for streaming bodies
    pub payload_override: Option<&'a SignableBody<'static>>,
}

/// Signs HTTP requests with SigV4
///
/// Usually driven by [`SigV4SigningStage`](crate::middleware::SigV4SigningStage).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct SigV4Signer;

impl SigV4Signer {
    pub fn new() -> Self {
        SigV4Signer
    }

    /// Sign `request` in place and return the hex encoded signature
    pub fn sign<B>(
        &self,
        operation_config: &OperationSigningConfig,
        request_config: &RequestConfig<'_>,
        credentials: &Credentials,
        request: &mut http::Request<B>,
    ) -> Result<String, SigningError>
    where
        B: AsRef<[u8]>,
    {
        let settings = operation_config.signing_settings();
        if let Some(expires_in) = settings.expires_in {
            warn_if_outlived_by(expires_in, request_config.request_ts, credentials);
        }
        let params = SigningParams::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            request_config.region.as_ref(),
            request_config.service.as_ref(),
            DateTime::<Utc>::from(request_config.request_ts),
            settings,
        )
        .with_security_token(credentials.session_token());

        // the service sees the request's own path, so it must be deduped too, not just the
        // canonical request
        let deduped = match dedupe_leading_forward_slashes(request.uri().path()) {
            Cow::Owned(path) => Some(path),
            Cow::Borrowed(_) => None,
        };
        if let Some(path) = deduped {
            *request.uri_mut() = replace_path(request.uri(), &path)?;
        }

        let body = match request_config.payload_override {
            Some(payload) => payload.clone(),
            None => SignableBody::Bytes(request.body().as_ref()),
        };
        let instructions = sign(
            SignableRequest::new(request.method(), request.uri(), request.headers(), body),
            &params,
        )?;
        let signature = instructions.signature().to_string();
        instructions.apply_to_request(request)?;
        Ok(signature)
    }
}

fn warn_if_outlived_by(expires_in: Duration, request_ts: SystemTime, credentials: &Credentials) {
    if let Some(credentials_expire) = credentials.expiry() {
        if request_ts + expires_in > credentials_expire {
            tracing::warn!(expires_in = ?expires_in, "{}", EXPIRATION_WARNING);
        }
    }
}

fn replace_path(uri: &Uri, path: &str) -> Result<Uri, SigningError> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse()?);
    Ok(Uri::from_parts(parts)?)
}

fn dedupe_leading_forward_slashes(path: &str) -> Cow<'_, str> {
    LEADING_SLASHES.replace(path, "/")
}

#[cfg(test)]
mod tests {
    use super::{
        dedupe_leading_forward_slashes, warn_if_outlived_by, OperationSigningConfig,
        RequestConfig, SigV4Signer, EXPIRATION_WARNING,
    };
    use aws_auth::Credentials;
    use aws_types::region::SigningRegion;
    use aws_types::SigningService;
    use std::borrow::Cow;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn warns_when_a_presigned_request_outlives_its_credentials() {
        let now = UNIX_EPOCH + Duration::from_secs(1000);
        let credentials = Credentials::new(
            "test-access-key",
            "test-secret-key",
            Some("test-session-token".into()),
            Some(now + Duration::from_secs(100)),
            "test",
        );
        warn_if_outlived_by(Duration::from_secs(90), now, &credentials);
        assert!(!logs_contain(EXPIRATION_WARNING));

        warn_if_outlived_by(Duration::from_secs(110), now, &credentials);
        assert!(logs_contain(EXPIRATION_WARNING));
    }

    #[test]
    fn sign_with_default_config() {
        let signer = SigV4Signer::new();
        let credentials = Credentials::from_keys("AKIDEXAMPLE", "secret", None);
        let request_config = RequestConfig {
            request_ts: UNIX_EPOCH + Duration::from_secs(1440938160),
            region: &SigningRegion::from_static("us-east-1"),
            service: &SigningService::from_static("datapipeline"),
            payload_override: None,
        };
        let mut request = http::Request::builder()
            .uri("https://datapipeline.us-east-1.amazonaws.com//")
            .body(b"{}".to_vec())
            .unwrap();
        let signature = signer
            .sign(
                &OperationSigningConfig::default_config(),
                &request_config,
                &credentials,
                &mut request,
            )
            .expect("signing succeeds");
        assert_eq!("/", request.uri().path());
        assert_eq!("20150830T123600Z", request.headers()["x-amz-date"]);
        let authorization = request.headers()["authorization"].to_str().unwrap();
        assert!(authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/datapipeline/aws4_request"
        ));
        assert!(authorization.ends_with(&signature));
    }

    #[test]
    fn presigned_config_uses_query_params() {
        let signer = SigV4Signer::new();
        let credentials = Credentials::from_keys("AKIDEXAMPLE", "secret", None);
        let request_config = RequestConfig {
            request_ts: SystemTime::now(),
            region: &SigningRegion::from_static("us-east-1"),
            service: &SigningService::from_static("appsync"),
            payload_override: None,
        };
        let mut request = http::Request::builder()
            .uri("https://appsync.us-east-1.amazonaws.com/v1/apis")
            .body(vec![])
            .unwrap();
        signer
            .sign(
                &OperationSigningConfig::presigned(Duration::from_secs(120)),
                &request_config,
                &credentials,
                &mut request,
            )
            .expect("signing succeeds");
        assert!(request.headers().get("authorization").is_none());
        let query = request.uri().query().unwrap();
        assert!(query.contains("X-Amz-Expires=120"));
        assert!(query.contains("X-Amz-Signature="));
    }

    #[test]
    fn dedupe_leading_forward_slashes_should_work_when_input_contains_leading_forward_slashes() {
        assert_eq!(
            dedupe_leading_forward_slashes("//foo/bar"),
            Cow::<'_, str>::Owned("/foo/bar".to_owned())
        );
        assert_eq!(
            dedupe_leading_forward_slashes("///foo/bar"),
            Cow::<'_, str>::Owned("/foo/bar".to_owned())
        );
    }

    #[test]
    fn dedupe_leading_forward_slashes_should_work_when_input_contains_percent_encoded_leading_forward_slashes(
    ) {
        assert_eq!(
            dedupe_leading_forward_slashes("/%2Ffoo/bar"),
            Cow::<'_, str>::Owned("/foo/bar".to_owned())
        );
        assert_eq!(
            dedupe_leading_forward_slashes("/%2F/foo/bar"),
            Cow::<'_, str>::Owned("/foo/bar".to_owned())
        );
    }

    #[test]
    fn dedupe_leading_forward_slashes_should_not_modify_input_when_multiple_slashes_appear_in_the_middle_of_input(
    ) {
        assert_eq!(
            dedupe_leading_forward_slashes("/foo//bar"),
            Cow::<'_, str>::Borrowed("/foo//bar")
        );
        assert_eq!(
            dedupe_leading_forward_slashes("/foo/bar"),
            Cow::<'_, str>::Borrowed("/foo/bar")
        );
    }
}
