/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! `User-Agent` and `x-amz-user-agent` headers
//!
//! Both headers are built from space separated `name/value` tokens:
//!
//! ```text
//! aws-sdk-rust/<sdk version> [api/<service>/<version>] os/<family>[/<version>] lang/rust/<rustc> [exec-env/<env>]
//! ```
//!
//! The `api` and `exec-env` tokens only appear in `x-amz-user-agent`.

use aws_types::build_metadata::BUILD_METADATA;
use aws_types::os_shim_internal::Env;
use http::header::{HeaderName, InvalidHeaderValue, USER_AGENT};
use http::HeaderValue;
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use std::convert::TryFrom;
use std::fmt::Write;
use thiserror::Error;

const X_AMZ_USER_AGENT: &str = "x-amz-user-agent";

/// Name and version of the service API a client was generated for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiMetadata {
    service_id: &'static str,
    version: &'static str,
}

impl ApiMetadata {
    pub const fn new(service_id: &'static str, version: &'static str) -> Self {
        ApiMetadata {
            service_id,
            version,
        }
    }
}

/// Everything reported in the user agent headers of one client
///
/// Service configs insert one into every operation's property bag; [`UserAgentStage`] turns it
/// into headers.
#[derive(Clone, Debug)]
pub struct AwsUserAgent {
    sdk_version: &'static str,
    api: ApiMetadata,
    os_family: &'static str,
    os_version: Option<String>,
    rust_version: &'static str,
    exec_env: Option<String>,
}

impl AwsUserAgent {
    /// Build metadata of this crate plus `AWS_EXECUTION_ENV` (eg. `AWS_Lambda_rust`) from `env`
    pub fn new_from_environment(env: Env, api: ApiMetadata) -> Self {
        AwsUserAgent {
            sdk_version: BUILD_METADATA.core_pkg_version,
            api,
            os_family: BUILD_METADATA.os_family,
            os_version: None,
            rust_version: BUILD_METADATA.rust_version,
            exec_env: env.first_set(&["AWS_EXECUTION_ENV"]),
        }
    }

    /// A user agent that renders the same on every platform
    pub fn for_tests() -> Self {
        AwsUserAgent {
            sdk_version: "0.123.test",
            api: ApiMetadata::new("test-service", "0.123"),
            os_family: "windows",
            os_version: Some("XPSP3".to_string()),
            rust_version: "1.50.0",
            exec_env: None,
        }
    }

    /// Value of `x-amz-user-agent`
    pub fn aws_ua_header(&self) -> String {
        let mut header = format!(
            "aws-sdk-rust/{} api/{}/{} ",
            self.sdk_version, self.api.service_id, self.api.version
        );
        self.write_platform(&mut header);
        if let Some(exec_env) = &self.exec_env {
            let _ = write!(header, " exec-env/{}", exec_env);
        }
        header
    }

    /// Value of `User-Agent`, kept short for proxies and older services
    pub fn ua_header(&self) -> String {
        let mut header = format!("aws-sdk-rust/{} ", self.sdk_version);
        self.write_platform(&mut header);
        header
    }

    fn write_platform(&self, out: &mut String) {
        // writing into a String cannot fail
        let _ = write!(out, "os/{}", self.os_family);
        if let Some(version) = &self.os_version {
            let _ = write!(out, "/{}", version);
        }
        let _ = write!(out, " lang/rust/{}", self.rust_version);
    }
}

/// Sets both user agent headers from the [`AwsUserAgent`] in the property bag
#[non_exhaustive]
#[derive(Default, Clone, Debug)]
pub struct UserAgentStage;

impl UserAgentStage {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Error)]
pub enum UserAgentStageError {
    #[error("no user agent was configured for this request")]
    UserAgentMissing,
    #[error("user agent is not a valid header value")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl MapRequest for UserAgentStage {
    type Error = UserAgentStageError;

    fn name(&self) -> &'static str {
        "user_agent"
    }

    fn apply(&self, request: Request) -> Result<Request, Self::Error> {
        request.augment(|mut req, properties| {
            let ua = properties
                .get::<AwsUserAgent>()
                .ok_or(UserAgentStageError::UserAgentMissing)?;
            let headers = req.headers_mut();
            headers.insert(USER_AGENT, HeaderValue::try_from(ua.ua_header())?);
            headers.insert(
                HeaderName::from_static(X_AMZ_USER_AGENT),
                HeaderValue::try_from(ua.aws_ua_header())?,
            );
            Ok(req)
        })
    }
}
