/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How clients authenticate against a GraphQL API
///
/// Values this version of the client does not know about are kept in `Unknown`.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthenticationType {
    ApiKey,
    AwsIam,
    AmazonCognitoUserPools,
    OpenidConnect,
    AwsLambda,
    Unknown(String),
}

impl AuthenticationType {
    pub fn as_str(&self) -> &str {
        match self {
            AuthenticationType::ApiKey => "API_KEY",
            AuthenticationType::AwsIam => "AWS_IAM",
            AuthenticationType::AmazonCognitoUserPools => "AMAZON_COGNITO_USER_POOLS",
            AuthenticationType::OpenidConnect => "OPENID_CONNECT",
            AuthenticationType::AwsLambda => "AWS_LAMBDA",
            AuthenticationType::Unknown(s) => s.as_ref(),
        }
    }
}

impl<'a> From<&'a str> for AuthenticationType {
    fn from(s: &'a str) -> Self {
        match s {
            "API_KEY" => AuthenticationType::ApiKey,
            "AWS_IAM" => AuthenticationType::AwsIam,
            "AMAZON_COGNITO_USER_POOLS" => AuthenticationType::AmazonCognitoUserPools,
            "OPENID_CONNECT" => AuthenticationType::OpenidConnect,
            "AWS_LAMBDA" => AuthenticationType::AwsLambda,
            other => AuthenticationType::Unknown(other.to_owned()),
        }
    }
}

impl From<String> for AuthenticationType {
    fn from(s: String) -> Self {
        AuthenticationType::from(s.as_str())
    }
}

impl From<AuthenticationType> for String {
    fn from(auth: AuthenticationType) -> Self {
        auth.as_str().to_owned()
    }
}

impl AsRef<str> for AuthenticationType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Describes a GraphQL API
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlApi {
    pub name: Option<String>,
    pub api_id: Option<String>,
    pub authentication_type: Option<AuthenticationType>,
    pub arn: Option<String>,
    /// Endpoints of the API, keyed by protocol (`GRAPHQL`, `REALTIME`)
    pub uris: Option<HashMap<String, String>>,
    pub tags: Option<HashMap<String, String>>,
    pub waf_web_acl_arn: Option<String>,
    pub xray_enabled: Option<bool>,
}

/// An API key used to authenticate against an `API_KEY` GraphQL API
///
/// `expires` and `deletes` are epoch seconds, rounded down to the hour.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: Option<String>,
    pub description: Option<String>,
    pub expires: Option<i64>,
    pub deletes: Option<i64>,
}
