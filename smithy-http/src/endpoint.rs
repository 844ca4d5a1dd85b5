/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Where requests are sent
//!
//! Operations are serialized against a relative URI (`/`, or `/v1/apis/{apiId}` for REST
//! services). An [`Endpoint`] supplies the scheme and authority, plus an optional base path that
//! the operation's path is appended to.

use crate::operation::BuildError;
use http::uri::{Authority, PathAndQuery, Scheme, Uri};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

type BoxError = Box<dyn Error + Send + Sync>;

/// No usable endpoint could be determined or applied for a request
#[derive(Debug)]
pub struct ResolveEndpointError {
    message: String,
    source: Option<BoxError>,
}

impl ResolveEndpointError {
    pub fn message(message: impl Into<String>) -> Self {
        ResolveEndpointError {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.source = Some(cause.into());
        self
    }
}

impl fmt::Display for ResolveEndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ResolveEndpointError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|err| err as _)
    }
}

/// Host label prepended to the endpoint's authority, eg. `data.` for a data plane operation
///
/// Validated up front so that applying it can only fail when combined with a bad endpoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndpointPrefix(String);

impl EndpointPrefix {
    pub fn new(prefix: impl Into<String>) -> Result<Self, BuildError> {
        let prefix = prefix.into();
        Authority::from_str(&prefix).map_err(BuildError::InvalidUri)?;
        Ok(EndpointPrefix(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A base URI for a service
///
/// A mutable endpoint accepts an [`EndpointPrefix`]; an immutable one (a local test server, a
/// proxy) is used exactly as given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    uri: Uri,
    immutable: bool,
}

impl Endpoint {
    pub fn mutable(uri: Uri) -> Self {
        Endpoint {
            uri,
            immutable: false,
        }
    }

    /// ```rust
    /// # use smithy_http::endpoint::Endpoint;
    /// use http::Uri;
    /// let endpoint = Endpoint::immutable(Uri::from_static("http://localhost:8000"));
    /// ```
    pub fn immutable(uri: Uri) -> Self {
        Endpoint {
            uri,
            immutable: true,
        }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Rewrite the relative `uri` of a request into an absolute one on this endpoint
    ///
    /// The request's path and query are kept. A query on the endpoint itself is dropped.
    pub fn set_endpoint(
        &self,
        uri: &mut Uri,
        prefix: Option<&EndpointPrefix>,
    ) -> Result<(), ResolveEndpointError> {
        let scheme = self.scheme()?;
        let authority = self.authority(prefix)?;
        let path_and_query = self.join_path(uri)?;
        *uri = Uri::builder()
            .scheme(scheme)
            .authority(authority)
            .path_and_query(path_and_query)
            .build()
            .map_err(|err| ResolveEndpointError::message("invalid endpoint URI").with_cause(err))?;
        Ok(())
    }

    fn scheme(&self) -> Result<Scheme, ResolveEndpointError> {
        self.uri.scheme().cloned().ok_or_else(|| {
            ResolveEndpointError::message(format!("endpoint `{}` has no scheme", self.uri))
        })
    }

    fn authority(
        &self,
        prefix: Option<&EndpointPrefix>,
    ) -> Result<Authority, ResolveEndpointError> {
        let authority = self.uri.authority().ok_or_else(|| {
            ResolveEndpointError::message(format!("endpoint `{}` has no authority", self.uri))
        })?;
        match prefix {
            Some(prefix) if !self.immutable => {
                Authority::from_str(&format!("{}{}", prefix.as_str(), authority)).map_err(|err| {
                    ResolveEndpointError::message("endpoint prefix produced an invalid host")
                        .with_cause(err)
                })
            }
            _ => Ok(authority.clone()),
        }
    }

    fn join_path(&self, request: &Uri) -> Result<PathAndQuery, ResolveEndpointError> {
        if let Some(query) = self.uri.query() {
            tracing::warn!(query = %query, "ignoring the query string of a configured endpoint");
        }
        let request = request
            .path_and_query()
            .map(PathAndQuery::as_str)
            .unwrap_or_default();
        let base = self.uri.path().trim_end_matches('/');
        let joined = match (base.is_empty(), request.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => request.to_string(),
            (false, _) => format!("{}/{}", base, request.trim_start_matches('/')),
        };
        PathAndQuery::from_str(&joined)
            .map_err(|err| ResolveEndpointError::message("invalid request path").with_cause(err))
    }
}
