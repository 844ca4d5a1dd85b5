/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Response handlers, one per operation

use crate::error::*;
use crate::output::*;
use aws_http::error::parse_generic_error;
use bytes::Bytes;
use smithy_http::response::ParseStrictResponse;

/// Parse a response: successful responses into the output shape, anything else into the
/// operation's error.
fn parse<O, E>(
    response: &http::Response<Bytes>,
    from_generic: impl FnOnce(smithy_types::Error) -> E,
    unhandled: impl FnOnce(serde_json::Error) -> E,
) -> Result<O, E>
where
    O: serde::de::DeserializeOwned + Default,
{
    if !response.status().is_success() {
        return Err(from_generic(parse_generic_error(response)));
    }
    crate::json::parse_output(response.body()).map_err(unhandled)
}

macro_rules! operation {
    ($(#[$meta:meta])* $name:ident, $builder:path, $output:ident, $error:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default, Debug)]
        pub struct $name {
            _private: (),
        }

        impl $name {
            pub fn builder() -> $builder {
                <$builder>::default()
            }

            pub fn new() -> Self {
                Self { _private: () }
            }
        }

        impl ParseStrictResponse for $name {
            type Output = Result<$output, $error>;

            fn parse(&self, response: &http::Response<Bytes>) -> Self::Output {
                parse(response, $error::from_generic_error, $error::unhandled)
            }
        }
    };
}

operation!(
    /// Retrieves a GraphQL API
    GetGraphqlApi,
    crate::input::get_graphql_api_input::Builder,
    GetGraphqlApiOutput,
    GetGraphqlApiError
);
operation!(
    /// Lists the GraphQL APIs in the account, a page at a time
    ListGraphqlApis,
    crate::input::list_graphql_apis_input::Builder,
    ListGraphqlApisOutput,
    ListGraphqlApisError
);
operation!(
    /// Creates a unique key that clients can use to invoke an `API_KEY` GraphQL API
    CreateApiKey,
    crate::input::create_api_key_input::Builder,
    CreateApiKeyOutput,
    CreateApiKeyError
);
operation!(
    /// Deletes a GraphQL API
    DeleteGraphqlApi,
    crate::input::delete_graphql_api_input::Builder,
    DeleteGraphqlApiOutput,
    DeleteGraphqlApiError
);
