/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS AppSync
//!
//! AWS AppSync provides API actions for creating and interacting with data sources using GraphQL
//! from your application. This crate speaks the `restJson1` protocol.

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod error;
pub mod input;
mod json;
pub mod model;
pub mod operation;
pub mod output;

use aws_http::user_agent::ApiMetadata;

pub static PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
static API_METADATA: ApiMetadata = ApiMetadata::new("appsync", env!("CARGO_PKG_VERSION"));

pub use aws_auth::Credentials;
pub use aws_types::region::Region;
#[cfg(feature = "client")]
pub use client::Client;
pub use config::Config;
pub use smithy_http::endpoint::Endpoint;
pub use smithy_http::result::SdkError;
