/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::{AwsEndpoint, BoxError, CredentialScope};
use aws_types::region::Region;
use smithy_http::endpoint::Endpoint;

/// Endpoint metadata
#[derive(Debug)]
pub struct Definition {
    /// URI for the endpoint.
    ///
    /// May contain `{region}` which will replaced with the region during endpoint construction
    pub uri_template: String,

    /// Protocol to use for this endpoint
    pub protocol: Protocol,

    /// Credential scope to set for requests to this endpoint
    pub credential_scope: CredentialScope,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl Definition {
    /// Build the endpoint for `region`
    ///
    /// If the definition doesn't fix a signing region, requests are signed for `region`.
    pub fn resolve(&self, region: &Region) -> Result<AwsEndpoint, BoxError> {
        let uri = self.uri_template.replace("{region}", region.as_ref());
        let uri = format!("{}://{}", self.protocol.as_str(), uri);
        let endpoint = Endpoint::mutable(uri.parse()?);
        let credential_scope = CredentialScope {
            service: self.credential_scope.service.clone(),
            region: self
                .credential_scope
                .region
                .clone()
                .or_else(|| Some(region.clone().into())),
        };
        Ok(AwsEndpoint::new(endpoint, credential_scope))
    }
}
