/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use aws_http::AwsErrorRetryPolicy;
use serde::Serialize;
use smithy_http::body::SdkBody;
use smithy_http::operation;
use smithy_http::operation::{BuildError, Metadata, Operation};
use smithy_http::query;

fn new_operation<O>(
    config: &Config,
    request: http::Request<SdkBody>,
    handler: O,
    name: &'static str,
) -> Operation<O, AwsErrorRetryPolicy> {
    let mut request = operation::Request::new(request);
    config.configure_request(&mut request.properties_mut());
    Operation::new(request, handler)
        .with_metadata(Metadata::new(name, "appsync"))
        .with_retry_policy(AwsErrorRetryPolicy::new())
}

/// See [`GetGraphqlApiInput`](crate::input::GetGraphqlApiInput)
pub mod get_graphql_api_input {
    use crate::input::GetGraphqlApiInput;
    use smithy_http::operation::BuildError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        api_id: Option<String>,
    }

    impl Builder {
        pub fn api_id(mut self, inp: impl Into<String>) -> Self {
            self.api_id = Some(inp.into());
            self
        }

        pub fn build(self) -> Result<GetGraphqlApiInput, BuildError> {
            Ok(GetGraphqlApiInput {
                api_id: self.api_id,
            })
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct GetGraphqlApiInput {
    pub api_id: Option<String>,
}

impl GetGraphqlApiInput {
    pub fn builder() -> get_graphql_api_input::Builder {
        get_graphql_api_input::Builder::default()
    }

    pub fn make_operation(
        &self,
        config: &Config,
    ) -> Result<Operation<crate::operation::GetGraphqlApi, AwsErrorRetryPolicy>, BuildError> {
        let api_id = crate::json::label(self.api_id.as_deref(), "api_id")?;
        let request = crate::json::request(http::Method::GET, format!("/v1/apis/{}", api_id))?;
        Ok(new_operation(
            config,
            request,
            crate::operation::GetGraphqlApi::new(),
            "GetGraphqlApi",
        ))
    }
}

/// See [`ListGraphqlApisInput`](crate::input::ListGraphqlApisInput)
pub mod list_graphql_apis_input {
    use crate::input::ListGraphqlApisInput;
    use smithy_http::operation::BuildError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        next_token: Option<String>,
        max_results: Option<i32>,
    }

    impl Builder {
        /// The token returned by a previous call, to fetch the next page
        pub fn next_token(mut self, inp: impl Into<String>) -> Self {
            self.next_token = Some(inp.into());
            self
        }

        pub fn set_next_token(mut self, inp: Option<String>) -> Self {
            self.next_token = inp;
            self
        }

        pub fn max_results(mut self, inp: i32) -> Self {
            self.max_results = Some(inp);
            self
        }

        pub fn build(self) -> Result<ListGraphqlApisInput, BuildError> {
            Ok(ListGraphqlApisInput {
                next_token: self.next_token,
                max_results: self.max_results,
            })
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ListGraphqlApisInput {
    pub next_token: Option<String>,
    pub max_results: Option<i32>,
}

impl ListGraphqlApisInput {
    pub fn builder() -> list_graphql_apis_input::Builder {
        list_graphql_apis_input::Builder::default()
    }

    fn uri(&self) -> String {
        let mut uri = String::from("/v1/apis");
        let mut writer = query::Writer::new(&mut uri);
        if let Some(next_token) = &self.next_token {
            writer.push_kv("nextToken", &query::fmt_string(next_token));
        }
        if let Some(max_results) = self.max_results {
            writer.push_kv("maxResults", &max_results.to_string());
        }
        uri
    }

    pub fn make_operation(
        &self,
        config: &Config,
    ) -> Result<Operation<crate::operation::ListGraphqlApis, AwsErrorRetryPolicy>, BuildError>
    {
        let request = crate::json::request(http::Method::GET, self.uri())?;
        Ok(new_operation(
            config,
            request,
            crate::operation::ListGraphqlApis::new(),
            "ListGraphqlApis",
        ))
    }
}

/// See [`CreateApiKeyInput`](crate::input::CreateApiKeyInput)
pub mod create_api_key_input {
    use crate::input::CreateApiKeyInput;
    use smithy_http::operation::BuildError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        api_id: Option<String>,
        description: Option<String>,
        expires: Option<i64>,
    }

    impl Builder {
        pub fn api_id(mut self, inp: impl Into<String>) -> Self {
            self.api_id = Some(inp.into());
            self
        }

        pub fn description(mut self, inp: impl Into<String>) -> Self {
            self.description = Some(inp.into());
            self
        }

        /// When the key expires, in epoch seconds. Defaults to 7 days from creation.
        pub fn expires(mut self, inp: i64) -> Self {
            self.expires = Some(inp);
            self
        }

        pub fn build(self) -> Result<CreateApiKeyInput, BuildError> {
            Ok(CreateApiKeyInput {
                api_id: self.api_id,
                description: self.description,
                expires: self.expires,
            })
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateApiKeyInput {
    #[serde(skip)]
    pub api_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
}

impl CreateApiKeyInput {
    pub fn builder() -> create_api_key_input::Builder {
        create_api_key_input::Builder::default()
    }

    pub fn make_operation(
        &self,
        config: &Config,
    ) -> Result<Operation<crate::operation::CreateApiKey, AwsErrorRetryPolicy>, BuildError> {
        let api_id = crate::json::label(self.api_id.as_deref(), "api_id")?;
        let request = crate::json::request_with_body(
            http::Method::POST,
            format!("/v1/apis/{}/apikeys", api_id),
            self,
        )?;
        Ok(new_operation(
            config,
            request,
            crate::operation::CreateApiKey::new(),
            "CreateApiKey",
        ))
    }
}

/// See [`DeleteGraphqlApiInput`](crate::input::DeleteGraphqlApiInput)
pub mod delete_graphql_api_input {
    use crate::input::DeleteGraphqlApiInput;
    use smithy_http::operation::BuildError;

    #[non_exhaustive]
    #[derive(Debug, Clone, Default)]
    pub struct Builder {
        api_id: Option<String>,
    }

    impl Builder {
        pub fn api_id(mut self, inp: impl Into<String>) -> Self {
            self.api_id = Some(inp.into());
            self
        }

        pub fn build(self) -> Result<DeleteGraphqlApiInput, BuildError> {
            Ok(DeleteGraphqlApiInput {
                api_id: self.api_id,
            })
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteGraphqlApiInput {
    pub api_id: Option<String>,
}

impl DeleteGraphqlApiInput {
    pub fn builder() -> delete_graphql_api_input::Builder {
        delete_graphql_api_input::Builder::default()
    }

    pub fn make_operation(
        &self,
        config: &Config,
    ) -> Result<Operation<crate::operation::DeleteGraphqlApi, AwsErrorRetryPolicy>, BuildError>
    {
        let api_id = crate::json::label(self.api_id.as_deref(), "api_id")?;
        let request =
            crate::json::request(http::Method::DELETE, format!("/v1/apis/{}", api_id))?;
        Ok(new_operation(
            config,
            request,
            crate::operation::DeleteGraphqlApi::new(),
            "DeleteGraphqlApi",
        ))
    }
}

#[cfg(test)]
mod test {
    use crate::input::{CreateApiKeyInput, GetGraphqlApiInput, ListGraphqlApisInput};
    use crate::{Config, Region};
    use smithy_http::operation::BuildError;

    fn config() -> Config {
        Config::builder().region(Region::new("us-west-2")).build()
    }

    #[test]
    fn list_query_string() {
        let input = ListGraphqlApisInput::builder()
            .next_token("abc+def=")
            .max_results(10)
            .build()
            .unwrap();
        assert_eq!(input.uri(), "/v1/apis?nextToken=abc%2Bdef%3D&maxResults=10");
        assert_eq!(
            ListGraphqlApisInput::builder().build().unwrap().uri(),
            "/v1/apis"
        );
    }

    #[test]
    fn api_id_is_a_path_label() {
        let op = GetGraphqlApiInput::builder()
            .api_id("abc123")
            .build()
            .unwrap()
            .make_operation(&config())
            .expect("valid input");
        let (request, _) = op.into_request_response();
        assert_eq!(request.http().method(), http::Method::GET);
        assert_eq!(request.http().uri(), "/v1/apis/abc123");
        assert_eq!(request.http().body().bytes(), Some(&b""[..]));
    }

    #[test]
    fn empty_api_id_is_missing() {
        let input = GetGraphqlApiInput::builder().api_id("").build().unwrap();
        assert!(matches!(
            input.make_operation(&config()),
            Err(BuildError::MissingField { field: "api_id", .. })
        ));
    }

    #[test]
    fn create_api_key_body_excludes_label() {
        let op = CreateApiKeyInput::builder()
            .api_id("abc123")
            .description("ci key")
            .expires(1_700_000_000)
            .build()
            .unwrap()
            .make_operation(&config())
            .expect("valid input");
        let (request, _) = op.into_request_response();
        assert_eq!(request.http().uri(), "/v1/apis/abc123/apikeys");
        assert_eq!(request.http().headers()["content-type"], "application/json");
        let body: serde_json::Value =
            serde_json::from_slice(request.http().body().bytes().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"description": "ci key", "expires": 1700000000})
        );
    }
}
