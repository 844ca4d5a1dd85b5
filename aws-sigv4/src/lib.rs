/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Provides functions for calculating Sigv4 signing keys and signatures, and for signing
//! HTTP requests.
//!
//! # Example: Signing an HTTP request
//!
//! ```rust
//! use aws_sigv4::http_request::{sign, SignableRequest, SigningSettings};
//! use aws_sigv4::SigningParams;
//!
//! let mut request = http::Request::builder()
//!     .uri("https://datapipeline.us-east-1.amazonaws.com/")
//!     .body("")
//!     .unwrap();
//! let params = SigningParams::new(
//!     "AKIDEXAMPLE",
//!     "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
//!     "us-east-1",
//!     "datapipeline",
//!     chrono::Utc::now(),
//!     SigningSettings::default(),
//! );
//! let instructions = sign(SignableRequest::from(&request), &params).unwrap();
//! instructions.apply_to_request(&mut request).unwrap();
//! assert!(request.headers().contains_key("authorization"));
//! ```

#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]

use chrono::{DateTime, Utc};

pub mod sign;

mod date_fmt;

pub mod http_request;

/// Everything a signature depends on besides the request itself
///
/// `S` carries the settings of the signing flavour, [`SigningSettings`](http_request::SigningSettings)
/// for HTTP requests.
#[non_exhaustive]
pub struct SigningParams<'a, S> {
    pub(crate) access_key: &'a str,
    pub(crate) secret_key: &'a str,
    pub(crate) security_token: Option<&'a str>,
    pub(crate) region: &'a str,
    pub(crate) service_name: &'a str,
    /// `Utc::now()` outside of tests
    pub(crate) date_time: DateTime<Utc>,
    pub(crate) settings: S,
}

impl<'a, S> SigningParams<'a, S> {
    /// Parameters for signing with long term credentials
    pub fn new(
        access_key: &'a str,
        secret_key: &'a str,
        region: &'a str,
        service_name: &'a str,
        date_time: DateTime<Utc>,
        settings: S,
    ) -> Self {
        SigningParams {
            access_key,
            secret_key,
            security_token: None,
            region,
            service_name,
            date_time,
            settings,
        }
    }

    /// Sign with temporary credentials. The token is sent as `x-amz-security-token`.
    pub fn with_security_token(mut self, security_token: Option<&'a str>) -> Self {
        self.security_token = security_token;
        self
    }

    /// Region the request is signed for
    pub fn region(&self) -> &str {
        self.region
    }

    /// Service the request is signed for
    pub fn service_name(&self) -> &str {
        self.service_name
    }

    /// Time the signature is computed for
    pub fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }

    /// Signing settings
    pub fn settings(&self) -> &S {
        &self.settings
    }
}

impl<'a, S: std::fmt::Debug> std::fmt::Debug for SigningParams<'a, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningParams")
            .field("access_key", &"** redacted **")
            .field("secret_key", &"** redacted **")
            .field("security_token", &self.security_token.map(|_| "** redacted **"))
            .field("region", &self.region)
            .field("service_name", &self.service_name)
            .field("date_time", &self.date_time)
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use crate::http_request::SigningSettings;
    use crate::SigningParams;

    #[test]
    fn debug_redacts_credentials() {
        let params = SigningParams::new(
            "AKIDEXAMPLE",
            "supersecret",
            "us-east-1",
            "datapipeline",
            chrono::Utc::now(),
            SigningSettings::default(),
        )
        .with_security_token(Some("token"));
        let debug = format!("{:?}", params);
        assert!(!debug.contains("supersecret"));
        assert!(!debug.contains("AKIDEXAMPLE"));
        assert!(debug.contains("us-east-1"));
    }
}
