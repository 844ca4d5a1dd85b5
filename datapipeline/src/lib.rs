/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS Data Pipeline
//!
//! AWS Data Pipeline configures and manages a data-driven workflow called a pipeline. This crate
//! speaks the `awsJson1.1` protocol: every operation is a `POST /` whose target is selected by the
//! `X-Amz-Target` header.
//!
//! ```no_run
//! # async fn list() -> Result<(), Box<dyn std::error::Error>> {
//! let client = datapipeline::Client::from_env();
//! let pipelines = client.list_pipelines().send().await?;
//! for pipeline in pipelines.pipeline_id_list.unwrap_or_default() {
//!     println!("{:?}", pipeline.name);
//! }
//! # Ok(())
//! # }
//! ```

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
static API_METADATA: ApiMetadata = ApiMetadata::new("datapipeline", env!("CARGO_PKG_VERSION"));

pub use aws_auth::Credentials;
pub use aws_types::region::Region;
#[cfg(feature = "client")]
pub use client::Client;
pub use config::Config;
pub use smithy_http::endpoint::Endpoint;
pub use smithy_http::result::SdkError;
